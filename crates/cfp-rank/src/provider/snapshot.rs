// Offline provider backed by a JSON snapshot of one season.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, warn};

use super::{ProviderError, RatingSide, SportsDataProvider};
use crate::ranking::team::{Game, SeasonData, TeamRating, TeamRecord};

/// Serves a previously saved `SeasonData` file.
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    path: PathBuf,
    data: SeasonData,
}

impl SnapshotProvider {
    /// Read and parse the snapshot at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path).map_err(|source| ProviderError::SnapshotIo {
            path: path.clone(),
            source,
        })?;
        let data: SeasonData =
            serde_json::from_str(&text).map_err(|source| ProviderError::SnapshotFormat {
                path: path.clone(),
                source,
            })?;
        info!(
            path = %path.display(),
            year = data.year,
            teams = data.records.len(),
            games = data.games.len(),
            "loaded snapshot"
        );
        Ok(SnapshotProvider { path, data })
    }

    fn check_year(&self, year: i32) {
        if year != self.data.year {
            warn!(
                requested = year,
                snapshot = self.data.year,
                "snapshot {} holds a different season",
                self.path.display()
            );
        }
    }
}

#[async_trait]
impl SportsDataProvider for SnapshotProvider {
    async fn team_records(&self, year: i32) -> Result<Vec<TeamRecord>, ProviderError> {
        self.check_year(year);
        Ok(self.data.records.clone())
    }

    async fn team_ratings(
        &self,
        _year: i32,
        side: RatingSide,
    ) -> Result<Vec<TeamRating>, ProviderError> {
        Ok(match side {
            RatingSide::Offense => self.data.offense.clone(),
            RatingSide::Defense => self.data.defense.clone(),
        })
    }

    async fn games(&self, _year: i32) -> Result<Vec<Game>, ProviderError> {
        Ok(self.data.games.clone())
    }
}

/// Write `data` as pretty-printed JSON, creating parent directories.
pub fn save_snapshot(path: impl AsRef<Path>, data: &SeasonData) -> Result<(), ProviderError> {
    let path = path.as_ref();
    let io_err = |source| ProviderError::SnapshotIo {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(data).map_err(|source| {
        ProviderError::SnapshotFormat {
            path: path.to_path_buf(),
            source,
        }
    })?;
    fs::write(path, json).map_err(io_err)?;
    info!(path = %path.display(), "saved snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fetch_season;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cfp_rank_snapshot_{name}"));
        let _ = fs::remove_dir_all(&dir);
        dir.join("season.json")
    }

    fn sample() -> SeasonData {
        SeasonData {
            year: 2023,
            records: vec![TeamRecord {
                name: "Michigan".into(),
                conference: Some("Big Ten".into()),
                wins: 15,
                losses: 0,
                ties: 0,
            }],
            offense: vec![TeamRating {
                team: "Michigan".into(),
                conference: None,
                overall: 0.3,
            }],
            defense: vec![TeamRating {
                team: "Michigan".into(),
                conference: None,
                overall: 0.05,
            }],
            games: vec![Game {
                home_team: "Michigan".into(),
                away_team: "Ohio State".into(),
                home_points: Some(30.0),
                away_points: Some(24.0),
            }],
        }
    }

    #[tokio::test]
    async fn save_then_serve() {
        let path = temp_path("save_then_serve");
        save_snapshot(&path, &sample()).unwrap();

        let provider = SnapshotProvider::open(&path).unwrap();
        let data = fetch_season(&provider, 2023, true).await.unwrap();
        assert_eq!(data, sample());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn year_mismatch_still_serves_data() {
        let path = temp_path("year_mismatch");
        save_snapshot(&path, &sample()).unwrap();

        let provider = SnapshotProvider::open(&path).unwrap();
        let data = fetch_season(&provider, 2024, false).await.unwrap();
        assert_eq!(data.year, 2024);
        assert_eq!(data.records.len(), 1);
        assert!(data.defense.is_empty());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_snapshot_is_io_error() {
        let path = temp_path("missing");
        assert!(matches!(
            SnapshotProvider::open(&path),
            Err(ProviderError::SnapshotIo { .. })
        ));
    }

    #[test]
    fn malformed_snapshot_is_format_error() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            SnapshotProvider::open(&path),
            Err(ProviderError::SnapshotFormat { .. })
        ));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}

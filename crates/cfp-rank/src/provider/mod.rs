// Sports data providers: where a season's records, ratings and games come from.

pub mod cfbd;
pub mod snapshot;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::ranking::team::{Game, SeasonData, TeamRating, TeamRecord};

pub use cfbd::CfbdClient;
pub use snapshot::{save_snapshot, SnapshotProvider};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to build HTTP client: {source}")]
    Client { source: reqwest::Error },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: reqwest::Error,
    },

    #[error("no CollegeFootballData API key configured (set cfbd_api_key in config/credentials.toml)")]
    MissingApiKey,

    #[error("failed to read snapshot {path}: {source}")]
    SnapshotIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid snapshot {path}: {source}")]
    SnapshotFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Which efficiency rating to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingSide {
    Offense,
    Defense,
}

impl RatingSide {
    pub fn as_str(self) -> &'static str {
        match self {
            RatingSide::Offense => "offense",
            RatingSide::Defense => "defense",
        }
    }
}

/// A source of one season's raw data.
#[async_trait]
pub trait SportsDataProvider: Send + Sync {
    async fn team_records(&self, year: i32) -> Result<Vec<TeamRecord>, ProviderError>;

    async fn team_ratings(
        &self,
        year: i32,
        side: RatingSide,
    ) -> Result<Vec<TeamRating>, ProviderError>;

    async fn games(&self, year: i32) -> Result<Vec<Game>, ProviderError>;
}

/// Fetch everything the engine needs for `year`, one request at a time.
///
/// The defense ratings are skipped when defense is not scored. The first
/// failure aborts the fetch; nothing partial is returned.
pub async fn fetch_season(
    provider: &dyn SportsDataProvider,
    year: i32,
    score_defense: bool,
) -> Result<SeasonData, ProviderError> {
    let records = provider.team_records(year).await?;
    info!(year, count = records.len(), "fetched team records");

    let offense = provider.team_ratings(year, RatingSide::Offense).await?;
    info!(year, count = offense.len(), "fetched offense ratings");

    let defense = if score_defense {
        let defense = provider.team_ratings(year, RatingSide::Defense).await?;
        info!(year, count = defense.len(), "fetched defense ratings");
        defense
    } else {
        Vec::new()
    };

    let games = provider.games(year).await?;
    info!(year, count = games.len(), "fetched games");

    Ok(SeasonData {
        year,
        records,
        offense,
        defense,
        games,
    })
}

// Configuration loading and parsing (ranking.toml, credentials.toml).

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("neither defaults/ nor config/ found in {base}")]
    NoConfigDir { base: PathBuf },

    #[error("failed to copy default config to {path}: {source}")]
    DefaultsCopy {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub season: SeasonConfig,
    pub scoring: ScoringConfig,
    pub playoff: PlayoffConfig,
    pub provider: ProviderConfig,
    pub credentials: CredentialsConfig,
}

// ---------------------------------------------------------------------------
// ranking.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire ranking.toml file.
#[derive(Debug, Clone, Deserialize)]
struct RankingFile {
    season: SeasonSection,
    points: PointMaxima,
    #[serde(default)]
    variant: VariantConfig,
    conferences: ConferenceSection,
    #[serde(default)]
    champions: ChampionsSection,
    playoff: PlayoffConfig,
    provider: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct SeasonSection {
    #[serde(default)]
    year: Option<i32>,
    top_n: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct ConferenceSection {
    #[serde(default)]
    independent: Option<String>,
    points: HashMap<String, f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChampionsSection {
    #[serde(default)]
    teams: Vec<String>,
}

/// Which season to rank and how many teams to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonConfig {
    pub year: i32,
    pub top_n: usize,
}

/// Maximum points awarded per scoring category.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PointMaxima {
    pub record: f64,
    pub offense: f64,
    pub defense: f64,
    pub sos: f64,
    pub best_win: f64,
    pub lowest_loss: f64,
    /// Cap on the schedule-derived conference points an independent receives.
    pub independent_conference_bonus: f64,
    /// Flat bonus, not a cap.
    pub champion_bonus: f64,
}

/// Score used to rate an opponent in the best-win and lowest-loss passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BestWinBaseline {
    /// The base score frozen after the first pass.
    #[default]
    Base,
    /// The running total after strength of schedule has been applied.
    Running,
}

/// How the lowest-loss penalty affects a team's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LowestLossMode {
    /// Subtracted from the total.
    #[default]
    Subtract,
    /// Computed and reported, total untouched.
    Display,
    /// Not computed at all.
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VariantConfig {
    pub score_defense: bool,
    pub best_win_baseline: BestWinBaseline,
    pub lowest_loss: LowestLossMode,
}

impl Default for VariantConfig {
    fn default() -> Self {
        VariantConfig {
            score_defense: true,
            best_win_baseline: BestWinBaseline::Base,
            lowest_loss: LowestLossMode::Subtract,
        }
    }
}

/// Conference name -> prestige points, plus the name of the independent bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConferenceTable {
    points: HashMap<String, f64>,
    independent: Option<String>,
}

impl ConferenceTable {
    pub fn new(points: HashMap<String, f64>, independent: Option<String>) -> Self {
        ConferenceTable {
            points,
            independent,
        }
    }

    /// Prestige points for a conference. Unlisted or missing conferences get 0.
    pub fn points_for(&self, conference: Option<&str>) -> f64 {
        conference
            .and_then(|c| self.points.get(c))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn is_independent(&self, conference: Option<&str>) -> bool {
        match (conference, self.independent.as_deref()) {
            (Some(c), Some(ind)) => c == ind,
            _ => false,
        }
    }
}

/// Everything the ranking engine needs, fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub points: PointMaxima,
    pub variant: VariantConfig,
    pub conferences: ConferenceTable,
    pub champions: Vec<String>,
}

impl ScoringConfig {
    pub fn is_champion(&self, team: &str) -> bool {
        self.champions.iter().any(|c| c == team)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PlayoffConfig {
    pub num_spots: usize,
    pub byes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub cfbd_api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/ranking.toml` and
/// (optionally) `config/credentials.toml`, relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- ranking.toml (required) ---
    let ranking_path = config_dir.join("ranking.toml");
    let ranking_text = read_file(&ranking_path)?;
    let ranking_file: RankingFile =
        toml::from_str(&ranking_text).map_err(|e| ConfigError::ParseError {
            path: ranking_path.clone(),
            source: e,
        })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let season = SeasonConfig {
        year: ranking_file
            .season
            .year
            .unwrap_or_else(|| current_season(Utc::now())),
        top_n: ranking_file.season.top_n,
    };

    let scoring = ScoringConfig {
        points: ranking_file.points,
        variant: ranking_file.variant,
        conferences: ConferenceTable::new(
            ranking_file.conferences.points,
            ranking_file.conferences.independent,
        ),
        champions: ranking_file.champions.teams,
    };

    let config = Config {
        season,
        scoring,
        playoff: ranking_file.playoff,
        provider: ranking_file.provider,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Shipped files copied from `defaults/` into `config/` when missing.
/// Credentials are optional and only ship as an `.example`.
const DEFAULT_FILES: &[&str] = &["ranking.toml"];

/// Copy any missing default config file into `config/`. Returns the files
/// that were copied; existing files are left alone.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(Vec::new());
        }
        return Err(ConfigError::NoConfigDir {
            base: base_dir.to_path_buf(),
        });
    }

    let mut copied = Vec::new();
    for name in DEFAULT_FILES {
        let source = defaults_dir.join(name);
        let target = config_dir.join(name);
        if target.exists() || !source.is_file() {
            continue;
        }
        fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopy {
            path: config_dir.clone(),
            source: e,
        })?;
        fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopy {
            path: target.clone(),
            source: e,
        })?;
        copied.push(target);
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

/// The season in progress at `now`. The regular season starts in late
/// August, so anything earlier belongs to the previous year's season.
pub fn current_season(now: DateTime<Utc>) -> i32 {
    if now.month() >= 8 {
        now.year()
    } else {
        now.year() - 1
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub(crate) fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.season.top_n == 0 {
        return Err(ConfigError::ValidationError {
            field: "season.top_n".into(),
            message: "must be greater than 0".into(),
        });
    }

    // Core categories drive the ranking and must carry weight.
    let p = &config.scoring.points;
    let positive_fields: &[(&str, f64)] = &[
        ("points.record", p.record),
        ("points.offense", p.offense),
        ("points.sos", p.sos),
        ("points.best_win", p.best_win),
    ];
    for (name, val) in positive_fields {
        if !val.is_finite() || *val <= 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be > 0, got {val}"),
            });
        }
    }

    let non_negative_fields: &[(&str, f64)] = &[
        ("points.defense", p.defense),
        ("points.lowest_loss", p.lowest_loss),
        (
            "points.independent_conference_bonus",
            p.independent_conference_bonus,
        ),
        ("points.champion_bonus", p.champion_bonus),
    ];
    for (name, val) in non_negative_fields {
        if !val.is_finite() || *val < 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be >= 0, got {val}"),
            });
        }
    }

    for (conference, val) in &config.scoring.conferences.points {
        if !val.is_finite() {
            return Err(ConfigError::ValidationError {
                field: format!("conferences.points.{conference}"),
                message: format!("must be finite, got {val}"),
            });
        }
    }

    let playoff = &config.playoff;
    if playoff.num_spots == 0 {
        return Err(ConfigError::ValidationError {
            field: "playoff.num_spots".into(),
            message: "must be greater than 0".into(),
        });
    }
    if playoff.byes >= playoff.num_spots {
        return Err(ConfigError::ValidationError {
            field: "playoff.byes".into(),
            message: format!(
                "must be less than num_spots ({}), got {}",
                playoff.num_spots, playoff.byes
            ),
        });
    }
    // Every bye seed meets the winner of exactly one first-round game.
    let first_round_teams = playoff.num_spots - playoff.byes;
    if first_round_teams % 2 != 0 || first_round_teams / 2 != playoff.byes {
        return Err(ConfigError::ValidationError {
            field: "playoff.byes".into(),
            message: format!(
                "{} byes leave {} first-round teams; need exactly two per bye",
                playoff.byes, first_round_teams
            ),
        });
    }

    if config.provider.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "provider.base_url".into(),
            message: "must not be empty".into(),
        });
    }
    if config.provider.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "provider.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;

    /// Helper: returns the path to the cfp-rank crate root
    /// (works whether `cargo test` runs from the crate root or repo root).
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else if cwd.join("crates/cfp-rank/defaults").exists() {
            cwd.join("crates/cfp-rank")
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    /// Fresh temp dir with `config/ranking.toml` produced by `edit` applied to
    /// the default file.
    fn temp_with_ranking(name: &str, edit: impl Fn(String) -> String) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();

        let root = project_root();
        let text = fs::read_to_string(root.join("defaults/ranking.toml")).unwrap();
        fs::write(config_dir.join("ranking.toml"), edit(text)).unwrap();
        tmp
    }

    fn expect_validation_field(tmp: &Path, expected: &str) {
        let err = load_config_from(tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn load_valid_config_from_default_files() {
        let tmp = temp_with_ranking("cfp_config_defaults", |t| t);

        let config = load_config_from(&tmp).expect("should load valid config");

        assert_eq!(config.season.year, 2024);
        assert_eq!(config.season.top_n, 50);

        let p = &config.scoring.points;
        assert!((p.record - 45.0).abs() < f64::EPSILON);
        assert!((p.offense - 15.0).abs() < f64::EPSILON);
        assert!((p.defense - 10.0).abs() < f64::EPSILON);
        assert!((p.sos - 30.0).abs() < f64::EPSILON);
        assert!((p.best_win - 15.0).abs() < f64::EPSILON);
        assert!((p.lowest_loss - 10.0).abs() < f64::EPSILON);
        assert!((p.independent_conference_bonus - 20.0).abs() < f64::EPSILON);
        assert!((p.champion_bonus - 3.0).abs() < f64::EPSILON);

        assert_eq!(config.scoring.variant, VariantConfig::default());

        let conferences = &config.scoring.conferences;
        assert!((conferences.points_for(Some("SEC")) - 20.0).abs() < f64::EPSILON);
        assert!((conferences.points_for(Some("Sun Belt")) - 12.0).abs() < f64::EPSILON);
        assert_eq!(conferences.points_for(Some("Ivy")), 0.0);
        assert_eq!(conferences.points_for(None), 0.0);
        assert!(conferences.is_independent(Some("FBS Independents")));
        assert!(!conferences.is_independent(Some("SEC")));

        assert_eq!(config.scoring.champions.len(), 5);
        assert!(config.scoring.is_champion("Boise State"));
        assert!(!config.scoring.is_champion("Texas"));

        assert_eq!(config.playoff, PlayoffConfig { num_spots: 12, byes: 4 });
        assert_eq!(config.provider.base_url, "https://api.collegefootballdata.com");
        assert_eq!(config.provider.timeout_secs, 30);
        assert!(config.credentials.cfbd_api_key.is_none());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn variant_section_overrides() {
        let tmp = temp_with_ranking("cfp_config_variant", |t| {
            t.replace("score_defense = true", "score_defense = false")
                .replace("best_win_baseline = \"base\"", "best_win_baseline = \"running\"")
                .replace("lowest_loss = \"subtract\"", "lowest_loss = \"display\"")
        });

        let config = load_config_from(&tmp).expect("should load variant config");
        assert!(!config.scoring.variant.score_defense);
        assert_eq!(
            config.scoring.variant.best_win_baseline,
            BestWinBaseline::Running
        );
        assert_eq!(config.scoring.variant.lowest_loss, LowestLossMode::Display);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn unknown_variant_value_is_parse_error() {
        let tmp = temp_with_ranking("cfp_config_bad_variant", |t| {
            t.replace("lowest_loss = \"subtract\"", "lowest_loss = \"sometimes\"")
        });

        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }), "got: {err}");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_year_uses_current_season() {
        let tmp = temp_with_ranking("cfp_config_no_year", |t| t.replace("year = 2024\n", ""));

        let config = load_config_from(&tmp).expect("should load without a year");
        assert_eq!(config.season.year, current_season(Utc::now()));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn current_season_rolls_over_in_august() {
        let july = Utc.with_ymd_and_hms(2025, 7, 31, 12, 0, 0).unwrap();
        let august = Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap();
        let january = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
        assert_eq!(current_season(july), 2024);
        assert_eq!(current_season(august), 2025);
        assert_eq!(current_season(january), 2025);
    }

    #[test]
    fn credentials_toml_with_api_key() {
        let tmp = temp_with_ranking("cfp_config_with_creds", |t| t);
        fs::write(
            tmp.join("config/credentials.toml"),
            "cfbd_api_key = \"test-key\"\n",
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("should load with credentials.toml");
        assert_eq!(config.credentials.cfbd_api_key.as_deref(), Some("test-key"));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_top_n_zero() {
        let tmp = temp_with_ranking("cfp_config_top_zero", |t| t.replace("top_n = 50", "top_n = 0"));
        expect_validation_field(&tmp, "season.top_n");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_record_points() {
        let tmp = temp_with_ranking("cfp_config_record_zero", |t| {
            t.replace("record = 45.0", "record = 0.0")
        });
        expect_validation_field(&tmp, "points.record");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_negative_defense_points() {
        let tmp = temp_with_ranking("cfp_config_defense_negative", |t| {
            t.replace("defense = 10.0", "defense = -1.0")
        });
        expect_validation_field(&tmp, "points.defense");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn zero_champion_bonus_is_allowed() {
        let tmp = temp_with_ranking("cfp_config_champ_zero", |t| {
            t.replace("champion_bonus = 3.0", "champion_bonus = 0.0")
        });
        assert!(load_config_from(&tmp).is_ok());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_byes_that_do_not_fit_bracket() {
        let tmp = temp_with_ranking("cfp_config_bad_byes", |t| t.replace("byes = 4", "byes = 2"));
        expect_validation_field(&tmp, "playoff.byes");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_byes_not_less_than_spots() {
        let tmp = temp_with_ranking("cfp_config_byes_too_many", |t| {
            t.replace("num_spots = 12", "num_spots = 4")
        });
        expect_validation_field(&tmp, "playoff.byes");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn accepts_smaller_bracket_shape() {
        let tmp = temp_with_ranking("cfp_config_six_team", |t| {
            t.replace("num_spots = 12", "num_spots = 6")
                .replace("byes = 4", "byes = 2")
        });
        let config = load_config_from(&tmp).expect("6 teams with 2 byes is valid");
        assert_eq!(config.playoff, PlayoffConfig { num_spots: 6, byes: 2 });
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_timeout() {
        let tmp = temp_with_ranking("cfp_config_timeout_zero", |t| {
            t.replace("timeout_secs = 30", "timeout_secs = 0")
        });
        expect_validation_field(&tmp, "provider.timeout_secs");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_ranking_toml() {
        let tmp = std::env::temp_dir().join("cfp_config_missing_ranking");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => {
                assert!(path.ends_with("ranking.toml"));
            }
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = temp_with_ranking("cfp_config_invalid_toml", |_| {
            "this is not valid [[[ toml".to_string()
        });

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => {
                assert!(path.ends_with("ranking.toml"));
            }
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("cfp_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();

        let root = project_root();
        fs::copy(
            root.join("defaults/ranking.toml"),
            defaults_dir.join("ranking.toml"),
        )
        .unwrap();
        fs::copy(
            root.join("defaults/credentials.toml.example"),
            defaults_dir.join("credentials.toml.example"),
        )
        .unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/ranking.toml").exists());
        assert!(!tmp.join("config/credentials.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("cfp_config_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);

        let defaults_dir = tmp.join("defaults");
        let config_dir = tmp.join("config");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::create_dir_all(&config_dir).unwrap();

        let root = project_root();
        fs::copy(
            root.join("defaults/ranking.toml"),
            defaults_dir.join("ranking.toml"),
        )
        .unwrap();
        fs::write(config_dir.join("ranking.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());

        let content = fs::read_to_string(config_dir.join("ranking.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("cfp_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::NoConfigDir { base } => assert_eq!(base, &tmp),
            other => panic!("expected NoConfigDir, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_accepts_config_without_defaults() {
        let tmp = std::env::temp_dir().join("cfp_config_no_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());

        let _ = fs::remove_dir_all(&tmp);
    }
}

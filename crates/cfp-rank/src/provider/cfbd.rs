// CollegeFootballData HTTP client.
//
// Three endpoints, all keyed by season year:
//   GET /records?year=     team records (wins/losses/ties under `total`)
//   GET /ppa/teams?year=   predicted points added, `offense.overall` / `defense.overall`
//   GET /games?year=       game log; older responses use snake_case keys, newer camelCase

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{ProviderError, RatingSide, SportsDataProvider};
use crate::config::{CredentialsConfig, ProviderConfig};
use crate::ranking::team::{Game, TeamRating, TeamRecord};

const USER_AGENT: &str = concat!("cfp-rank/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawRecord {
    team: String,
    #[serde(default)]
    conference: Option<String>,
    #[serde(default)]
    total: RawTotals,
}

#[derive(Debug, Default, Deserialize)]
struct RawTotals {
    #[serde(default)]
    wins: u32,
    #[serde(default)]
    losses: u32,
    #[serde(default)]
    ties: u32,
}

#[derive(Debug, Deserialize)]
struct RawPpaTeam {
    team: String,
    #[serde(default)]
    conference: Option<String>,
    #[serde(default)]
    offense: Option<RawPpaSide>,
    #[serde(default)]
    defense: Option<RawPpaSide>,
}

#[derive(Debug, Deserialize)]
struct RawPpaSide {
    #[serde(default)]
    overall: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawGame {
    #[serde(alias = "homeTeam")]
    home_team: String,
    #[serde(alias = "awayTeam")]
    away_team: String,
    #[serde(default, alias = "homePoints")]
    home_points: Option<f64>,
    #[serde(default, alias = "awayPoints")]
    away_points: Option<f64>,
}

/// Empty conference strings mean "no conference".
fn non_empty(conference: Option<String>) -> Option<String> {
    conference.filter(|c| !c.trim().is_empty())
}

fn map_records(raw: Vec<RawRecord>) -> Vec<TeamRecord> {
    raw.into_iter()
        .map(|r| TeamRecord {
            name: r.team,
            conference: non_empty(r.conference),
            wins: r.total.wins,
            losses: r.total.losses,
            ties: r.total.ties,
        })
        .collect()
}

/// A team without a rating for `side` is rated 0.
fn map_ratings(raw: Vec<RawPpaTeam>, side: RatingSide) -> Vec<TeamRating> {
    raw.into_iter()
        .map(|r| {
            let stats = match side {
                RatingSide::Offense => r.offense,
                RatingSide::Defense => r.defense,
            };
            TeamRating {
                team: r.team,
                conference: non_empty(r.conference),
                overall: stats.and_then(|s| s.overall).unwrap_or(0.0),
            }
        })
        .collect()
}

fn map_games(raw: Vec<RawGame>) -> Vec<Game> {
    raw.into_iter()
        .map(|g| Game {
            home_team: g.home_team,
            away_team: g.away_team,
            home_points: g.home_points,
            away_points: g.away_points,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Bearer-token client for the CollegeFootballData API.
#[derive(Debug, Clone)]
pub struct CfbdClient {
    http: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl CfbdClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| ProviderError::Client { source })?;
        Ok(CfbdClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout,
        })
    }

    /// Build a client from the loaded config. Fails when no API key is set.
    pub fn from_config(
        provider: &ProviderConfig,
        credentials: &CredentialsConfig,
    ) -> Result<Self, ProviderError> {
        let api_key = credentials
            .cfbd_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::MissingApiKey)?;
        Self::new(
            provider.base_url.clone(),
            api_key,
            Duration::from_secs(provider.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, year: i32) -> Result<T, ProviderError> {
        let url = format!("{}{path}?year={year}", self.base_url);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ProviderError::Decode { url, source })
    }
}

#[async_trait]
impl SportsDataProvider for CfbdClient {
    async fn team_records(&self, year: i32) -> Result<Vec<TeamRecord>, ProviderError> {
        let raw: Vec<RawRecord> = self.get("/records", year).await?;
        Ok(map_records(raw))
    }

    async fn team_ratings(
        &self,
        year: i32,
        side: RatingSide,
    ) -> Result<Vec<TeamRating>, ProviderError> {
        let raw: Vec<RawPpaTeam> = self.get("/ppa/teams", year).await?;
        Ok(map_ratings(raw, side))
    }

    async fn games(&self, year: i32) -> Result<Vec<Game>, ProviderError> {
        let raw: Vec<RawGame> = self.get("/games", year).await?;
        Ok(map_games(raw))
    }
}

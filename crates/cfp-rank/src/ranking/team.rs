// Season input records and the scored team produced by the engine.

use serde::{Deserialize, Serialize};

use crate::config::LowestLossMode;

// ---------------------------------------------------------------------------
// Provider-facing records
// ---------------------------------------------------------------------------

/// One team's season record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    #[serde(default)]
    pub conference: Option<String>,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
}

impl TeamRecord {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

/// An efficiency rating (offense or defense) for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRating {
    pub team: String,
    #[serde(default)]
    pub conference: Option<String>,
    pub overall: f64,
}

/// A scheduled or played game. Either score may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub home_points: Option<f64>,
    #[serde(default)]
    pub away_points: Option<f64>,
}

/// Result of a fully scored game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    Decided { winner: &'a str, loser: &'a str },
    Tied,
}

impl Game {
    /// `(home, away)` points, only when both are present.
    pub fn final_score(&self) -> Option<(f64, f64)> {
        match (self.home_points, self.away_points) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }

    /// Winner and loser of a fully scored game; `None` when unscored.
    pub fn outcome(&self) -> Option<Outcome<'_>> {
        let (home, away) = self.final_score()?;
        let outcome = if home > away {
            Outcome::Decided {
                winner: &self.home_team,
                loser: &self.away_team,
            }
        } else if away > home {
            Outcome::Decided {
                winner: &self.away_team,
                loser: &self.home_team,
            }
        } else {
            Outcome::Tied
        };
        Some(outcome)
    }
}

/// Everything fetched from the provider for one season. Also the on-disk
/// snapshot format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonData {
    pub year: i32,
    pub records: Vec<TeamRecord>,
    #[serde(default)]
    pub offense: Vec<TeamRating>,
    #[serde(default)]
    pub defense: Vec<TeamRating>,
    #[serde(default)]
    pub games: Vec<Game>,
}

// ---------------------------------------------------------------------------
// Engine output
// ---------------------------------------------------------------------------

/// A team carried through every scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamScore {
    pub name: String,
    pub conference: Option<String>,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub record_points: f64,
    pub offense_points: f64,
    /// Always non-negative; subtracted from the total when defense is scored.
    pub defense_points: f64,
    pub conference_points: f64,
    pub champion_bonus: f64,
    pub sos_points: f64,
    pub best_win: Option<String>,
    pub best_win_points: f64,
    pub lowest_loss: Option<String>,
    /// Always non-negative; subtracted from the total in subtract mode.
    pub lowest_loss_points: f64,
    /// Total after the first pass, before any result-based adjustment.
    pub base_points: f64,
    pub total_points: f64,
}

impl TeamScore {
    /// Display label with the record embedded, e.g. "Oregon (13-0)".
    pub fn label(&self) -> String {
        format!(
            "{} ({})",
            self.name,
            format_record(self.wins, self.losses, self.ties)
        )
    }

    /// Recompute the total from its components.
    ///
    /// `defense_scored` and `lowest_loss` must match the variant that
    /// produced this score.
    pub fn component_sum(&self, defense_scored: bool, lowest_loss: LowestLossMode) -> f64 {
        let mut sum = self.record_points + self.offense_points + self.conference_points;
        if defense_scored {
            sum -= self.defense_points;
        }
        sum += self.champion_bonus + self.sos_points + self.best_win_points;
        if lowest_loss == LowestLossMode::Subtract {
            sum -= self.lowest_loss_points;
        }
        sum
    }
}

/// "W-L", or "W-L-T" when the team has ties.
fn format_record(wins: u32, losses: u32, ties: u32) -> String {
    if ties > 0 {
        format!("{wins}-{losses}-{ties}")
    } else {
        format!("{wins}-{losses}")
    }
}

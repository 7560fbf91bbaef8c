// Game-log passes: strength of schedule, best win, lowest loss.
//
// All three ignore games missing either score. Opponents that are not in the
// ranked records (FCS teams, typically) carry a score of 0 for SoS and best
// win, and are left out of lowest loss entirely.

use std::collections::HashMap;

use tracing::debug;

use crate::config::{BestWinBaseline, ScoringConfig};
use crate::ranking::normalize::{
    max_value, min_value, scale_inverse, scale_to_max, NORM_EPSILON,
};
use crate::ranking::team::{Game, Outcome, TeamScore};

// ---------------------------------------------------------------------------
// Strength of schedule
// ---------------------------------------------------------------------------

/// Sum of opponents' current totals for every team in the game log.
///
/// Every team that appears on either side of any game gets an entry, even if
/// none of its games were scored.
pub fn sos_accumulators(teams: &[TeamScore], games: &[Game]) -> HashMap<String, f64> {
    let totals: HashMap<&str, f64> = teams
        .iter()
        .map(|t| (t.name.as_str(), t.total_points))
        .collect();
    let total_of = |name: &str| totals.get(name).copied().unwrap_or(0.0);

    let mut acc: HashMap<String, f64> = HashMap::new();
    for game in games {
        let scored = game.final_score().is_some();

        let home = acc.entry(game.home_team.clone()).or_insert(0.0);
        if scored {
            *home += total_of(&game.away_team);
        }
        let away = acc.entry(game.away_team.clone()).or_insert(0.0);
        if scored {
            *away += total_of(&game.home_team);
        }
    }
    acc
}

/// Normalize schedule strength onto `points.sos` and add it to every total.
///
/// A team in the independent bucket has its conference points replaced by
/// `sos / SOS_MAX * INDEPENDENT_MAX`.
pub fn apply_strength_of_schedule(
    teams: &mut [TeamScore],
    games: &[Game],
    config: &ScoringConfig,
) {
    let points = &config.points;
    let acc = sos_accumulators(teams, games);
    let max_acc = max_value(acc.values().copied()).unwrap_or(1.0);
    debug!(teams_in_log = acc.len(), max_acc, "strength of schedule");

    for team in teams.iter_mut() {
        let raw = acc.get(&team.name).copied().unwrap_or(0.0);
        let sos = scale_to_max(raw, max_acc, points.sos);
        team.sos_points = sos;

        if config.conferences.is_independent(team.conference.as_deref()) {
            let replacement = scale_to_max(sos, points.sos, points.independent_conference_bonus);
            team.total_points += replacement - team.conference_points;
            team.conference_points = replacement;
        }

        team.total_points += sos;
    }
}

// ---------------------------------------------------------------------------
// Opponent baselines
// ---------------------------------------------------------------------------

/// Score used to rate each ranked team as an opponent.
pub fn opponent_baselines(
    teams: &[TeamScore],
    baseline: BestWinBaseline,
) -> HashMap<String, f64> {
    teams
        .iter()
        .map(|t| {
            let score = match baseline {
                BestWinBaseline::Base => t.base_points,
                BestWinBaseline::Running => t.total_points,
            };
            (t.name.clone(), score)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Best win / lowest loss
// ---------------------------------------------------------------------------

/// The chosen opponent and its baseline score.
#[derive(Debug, Clone, PartialEq)]
pub struct OpponentPick {
    pub opponent: String,
    pub score: f64,
}

/// For each ranked team with at least one win, the beaten opponent with the
/// highest baseline. Ties keep the earliest game.
pub fn best_wins(
    games: &[Game],
    baselines: &HashMap<String, f64>,
) -> HashMap<String, OpponentPick> {
    pick_opponents(
        games,
        baselines,
        |outcome| match outcome {
            Outcome::Decided { winner, loser } => Some((winner, loser)),
            Outcome::Tied => None,
        },
        Some(0.0),
        |candidate, current| candidate > current,
    )
}

/// For each ranked team with at least one loss to a ranked opponent, the
/// opponent it lost to with the lowest baseline. Ties keep the earliest game.
pub fn worst_losses(
    games: &[Game],
    baselines: &HashMap<String, f64>,
) -> HashMap<String, OpponentPick> {
    pick_opponents(
        games,
        baselines,
        |outcome| match outcome {
            Outcome::Decided { winner, loser } => Some((loser, winner)),
            Outcome::Tied => None,
        },
        None,
        |candidate, current| candidate < current,
    )
}

/// Walk the scored games and keep, per ranked team, the opponent preferred
/// by `better`. `side` maps an outcome to `(team, opponent)`. An opponent
/// without a baseline scores `unranked`, or is skipped when that is `None`.
fn pick_opponents<'g>(
    games: &'g [Game],
    baselines: &HashMap<String, f64>,
    side: impl Fn(Outcome<'g>) -> Option<(&'g str, &'g str)>,
    unranked: Option<f64>,
    better: impl Fn(f64, f64) -> bool,
) -> HashMap<String, OpponentPick> {
    let mut picks: HashMap<String, OpponentPick> = HashMap::new();

    for game in games {
        let Some((team, opponent)) = game.outcome().and_then(&side) else {
            continue;
        };
        if !baselines.contains_key(team) {
            continue;
        }
        let Some(score) = baselines.get(opponent).copied().or(unranked) else {
            continue;
        };

        match picks.get_mut(team) {
            Some(current) => {
                if better(score, current.score) {
                    current.opponent = opponent.to_string();
                    current.score = score;
                }
            }
            None => {
                picks.insert(
                    team.to_string(),
                    OpponentPick {
                        opponent: opponent.to_string(),
                        score,
                    },
                );
            }
        }
    }

    picks
}

/// Scale each team's best-win score against the best in the population and
/// add it to the total. Teams without a win get nothing.
pub fn apply_best_win(
    teams: &mut [TeamScore],
    games: &[Game],
    baselines: &HashMap<String, f64>,
    cap: f64,
) {
    let picks = best_wins(games, baselines);
    let max_score = max_value(picks.values().map(|p| p.score)).unwrap_or(0.0);
    debug!(teams_with_wins = picks.len(), max_score, "best win");

    for team in teams.iter_mut() {
        match picks.get(&team.name) {
            Some(pick) => {
                let points = scale_to_max(pick.score, max_score, cap);
                team.best_win = Some(pick.opponent.clone());
                team.best_win_points = points;
                team.total_points += points;
            }
            None => {
                team.best_win = None;
                team.best_win_points = 0.0;
            }
        }
    }
}

/// Score each team's weakest loss against the weakest in the population.
/// The penalty is subtracted from the total only when `subtract` is set.
///
/// The population minimum is taken over positive baselines only. A loss to
/// an opponent at or below zero earns the full `cap` without dragging every
/// other penalty down to nothing.
pub fn apply_lowest_loss(
    teams: &mut [TeamScore],
    games: &[Game],
    baselines: &HashMap<String, f64>,
    cap: f64,
    subtract: bool,
) {
    let picks = worst_losses(games, baselines);
    let min_score = min_value(
        picks
            .values()
            .map(|p| p.score)
            .filter(|s| *s > NORM_EPSILON),
    )
    .unwrap_or(0.0);
    debug!(teams_with_losses = picks.len(), min_score, subtract, "lowest loss");

    for team in teams.iter_mut() {
        match picks.get(&team.name) {
            Some(pick) => {
                let penalty = scale_inverse(pick.score, min_score, cap);
                team.lowest_loss = Some(pick.opponent.clone());
                team.lowest_loss_points = penalty;
                if subtract {
                    team.total_points -= penalty;
                }
            }
            None => {
                team.lowest_loss = None;
                team.lowest_loss_points = 0.0;
            }
        }
    }
}

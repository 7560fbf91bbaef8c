// Multi-pass team ranking.
//
// Pass order is fixed; each pass reads totals written by the ones before it:
// 1. Base score (record, offense, defense, conference).
// 2. Conference-champion bonus.
// 3. Strength of schedule (and independent conference substitution).
// 4. Best win.
// 5. Lowest loss.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::config::{LowestLossMode, ScoringConfig};
use crate::ranking::normalize::{max_value, scale_to_max};
use crate::ranking::schedule;
use crate::ranking::team::{SeasonData, TeamRating, TeamRecord, TeamScore};

// ---------------------------------------------------------------------------
// Rating lookup
// ---------------------------------------------------------------------------

/// Ratings keyed by team, with the population maximum used for scaling.
struct RatingTable<'a> {
    by_team: HashMap<&'a str, f64>,
    max: f64,
}

impl<'a> RatingTable<'a> {
    fn new(ratings: &'a [TeamRating]) -> Self {
        let mut by_team = HashMap::with_capacity(ratings.len());
        for rating in ratings {
            // First entry wins, later duplicates are ignored.
            by_team.entry(rating.team.as_str()).or_insert(rating.overall);
        }
        let max = max_value(ratings.iter().map(|r| r.overall)).unwrap_or(0.0);
        RatingTable { by_team, max }
    }

    /// Scaled points for `team`; 0 when the team has no rating.
    fn points_for(&self, team: &str, cap: f64) -> f64 {
        match self.by_team.get(team) {
            Some(&overall) => scale_to_max(overall, self.max, cap),
            None => 0.0,
        }
    }
}

/// `wins / games * cap`, or 0 for a team that has not played.
pub fn record_points(record: &TeamRecord, cap: f64) -> f64 {
    let games = record.games_played();
    if games == 0 {
        return 0.0;
    }
    record.wins as f64 / games as f64 * cap
}

/// Sort by total descending, then by name so equal totals order the same way
/// on every run.
pub fn sort_ranking(teams: &mut [TeamScore]) {
    teams.sort_by(|a, b| {
        b.total_points
            .total_cmp(&a.total_points)
            .then_with(|| a.name.cmp(&b.name))
    });
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Scores a season's teams with a fixed configuration.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    config: ScoringConfig,
}

impl RankingEngine {
    pub fn new(config: ScoringConfig) -> Self {
        RankingEngine { config }
    }

    /// Score every team in `data.records` and return them in ranking order.
    pub fn score(&self, data: &SeasonData) -> Vec<TeamScore> {
        let variant = self.config.variant;
        let points = &self.config.points;

        let mut teams = self.base_pass(data);
        self.champion_pass(&mut teams);
        schedule::apply_strength_of_schedule(&mut teams, &data.games, &self.config);

        // Frozen before best win so neither result pass feeds the other.
        let baselines = schedule::opponent_baselines(&teams, variant.best_win_baseline);
        schedule::apply_best_win(&mut teams, &data.games, &baselines, points.best_win);

        match variant.lowest_loss {
            LowestLossMode::Off => {}
            mode => schedule::apply_lowest_loss(
                &mut teams,
                &data.games,
                &baselines,
                points.lowest_loss,
                mode == LowestLossMode::Subtract,
            ),
        }

        sort_ranking(&mut teams);
        info!(
            year = data.year,
            teams = teams.len(),
            games = data.games.len(),
            "ranking computed"
        );
        teams
    }

    /// `score`, truncated to the top `top_n` teams.
    pub fn rank(&self, data: &SeasonData, top_n: usize) -> Vec<TeamScore> {
        let mut teams = self.score(data);
        teams.truncate(top_n);
        teams
    }

    fn base_pass(&self, data: &SeasonData) -> Vec<TeamScore> {
        let points = &self.config.points;
        let score_defense = self.config.variant.score_defense;

        let offense = RatingTable::new(&data.offense);
        let defense = RatingTable::new(&data.defense);

        let mut seen: HashSet<&str> = HashSet::with_capacity(data.records.len());
        let mut teams = Vec::with_capacity(data.records.len());

        for record in &data.records {
            if !seen.insert(record.name.as_str()) {
                warn!("duplicate record for '{}', keeping the first", record.name);
                continue;
            }

            let record_pts = record_points(record, points.record);
            let offense_pts = offense.points_for(&record.name, points.offense);
            let defense_pts = if score_defense {
                defense.points_for(&record.name, points.defense)
            } else {
                0.0
            };
            let conference_pts = self
                .config
                .conferences
                .points_for(record.conference.as_deref());

            let total = record_pts + offense_pts - defense_pts + conference_pts;

            teams.push(TeamScore {
                name: record.name.clone(),
                conference: record.conference.clone(),
                wins: record.wins,
                losses: record.losses,
                ties: record.ties,
                record_points: record_pts,
                offense_points: offense_pts,
                defense_points: defense_pts,
                conference_points: conference_pts,
                champion_bonus: 0.0,
                sos_points: 0.0,
                best_win: None,
                best_win_points: 0.0,
                lowest_loss: None,
                lowest_loss_points: 0.0,
                base_points: total,
                total_points: total,
            });
        }

        debug!(
            teams = teams.len(),
            offense_max = offense.max,
            defense_max = defense.max,
            "base scores"
        );
        teams
    }

    fn champion_pass(&self, teams: &mut [TeamScore]) {
        let bonus = self.config.points.champion_bonus;
        for team in teams.iter_mut() {
            if self.config.is_champion(&team.name) {
                team.champion_bonus = bonus;
                team.total_points += bonus;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

// Ranking engine: season data in, ordered team scores out.

pub mod engine;
pub mod normalize;
pub mod schedule;
pub mod team;

pub use engine::{RankingEngine, record_points, sort_ranking};
pub use team::{Game, Outcome, SeasonData, TeamRating, TeamRecord, TeamScore};

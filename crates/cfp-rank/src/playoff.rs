// Playoff field selection and bracket seeding.
//
// Conference champions take automatic bids; the rest of the field is filled
// by total points. Seeds follow the engine's ranking order. The top seeds get
// first-round byes and the others play highest vs lowest.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::PlayoffConfig;
use crate::ranking::engine::sort_ranking;
use crate::ranking::team::TeamScore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayoffError {
    #[error("playoff needs {needed} teams but only {available} were selected")]
    NotEnoughTeams { needed: usize, available: usize },

    #[error("cannot build a {spots}-team bracket with {byes} byes")]
    InvalidShape { spots: usize, byes: usize },
}

/// A team in the playoff field.
#[derive(Debug, Clone, PartialEq)]
pub struct SeededTeam {
    /// 1-based.
    pub seed: usize,
    pub champion: bool,
    pub team: TeamScore,
}

// ---------------------------------------------------------------------------
// Field selection
// ---------------------------------------------------------------------------

/// Pick the playoff field from a scored season.
///
/// Every champion present in `scores` gets a bid; if there are more champions
/// than spots, the highest-scoring ones win. The remaining spots go to the
/// best non-champions. The field is returned in seed order.
pub fn select_field(
    scores: &[TeamScore],
    champions: &[String],
    num_spots: usize,
) -> Vec<SeededTeam> {
    let champion_names: HashSet<&str> = champions.iter().map(String::as_str).collect();

    let mut ordered = scores.to_vec();
    sort_ranking(&mut ordered);

    let (auto_bids, at_large): (Vec<TeamScore>, Vec<TeamScore>) = ordered
        .into_iter()
        .partition(|t| champion_names.contains(t.name.as_str()));

    let missing: Vec<&str> = champions
        .iter()
        .map(String::as_str)
        .filter(|c| !auto_bids.iter().any(|t| t.name == *c))
        .collect();
    if !missing.is_empty() {
        debug!(?missing, "champions absent from the scored teams");
    }

    let auto_count = auto_bids.len().min(num_spots);
    let at_large_count = num_spots - auto_count;

    let mut field: Vec<TeamScore> = auto_bids.into_iter().take(auto_count).collect();
    field.extend(at_large.into_iter().take(at_large_count));
    sort_ranking(&mut field);

    info!(
        spots = num_spots,
        selected = field.len(),
        auto_bids = auto_count,
        "playoff field selected"
    );

    field
        .into_iter()
        .enumerate()
        .map(|(i, team)| SeededTeam {
            seed: i + 1,
            champion: champion_names.contains(team.name.as_str()),
            team,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Bracket
// ---------------------------------------------------------------------------

/// A first-round game. `number` is 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Matchup {
    pub number: usize,
    pub higher: SeededTeam,
    pub lower: SeededTeam,
}

/// A bye team waiting on the winner of first-round match `match_number`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quarterfinal {
    pub bye: SeededTeam,
    pub match_number: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bracket {
    pub byes: Vec<SeededTeam>,
    pub first_round: Vec<Matchup>,
    pub quarterfinals: Vec<Quarterfinal>,
}

impl Bracket {
    /// Seed a bracket from a field in seed order.
    ///
    /// The first `config.byes` teams get byes. The others pair highest vs
    /// lowest, and bye seed *i* meets the winner of first-round match *i*.
    pub fn seed(field: &[SeededTeam], config: PlayoffConfig) -> Result<Bracket, PlayoffError> {
        let PlayoffConfig { num_spots, byes } = config;

        let playing = num_spots.saturating_sub(byes);
        if byes >= num_spots || playing % 2 != 0 || playing / 2 != byes {
            return Err(PlayoffError::InvalidShape {
                spots: num_spots,
                byes,
            });
        }
        if field.len() < num_spots {
            return Err(PlayoffError::NotEnoughTeams {
                needed: num_spots,
                available: field.len(),
            });
        }

        let (top, rest) = field[..num_spots].split_at(byes);

        let first_round: Vec<Matchup> = (0..rest.len() / 2)
            .map(|i| Matchup {
                number: i + 1,
                higher: rest[i].clone(),
                lower: rest[rest.len() - 1 - i].clone(),
            })
            .collect();

        let quarterfinals = top
            .iter()
            .zip(&first_round)
            .map(|(bye, game)| Quarterfinal {
                bye: bye.clone(),
                match_number: game.number,
            })
            .collect();

        Ok(Bracket {
            byes: top.to_vec(),
            first_round,
            quarterfinals,
        })
    }
}

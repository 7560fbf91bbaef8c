// Text and CSV rendering of rankings, the playoff field and the bracket.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::config::{LowestLossMode, VariantConfig};
use crate::playoff::{Bracket, SeededTeam};
use crate::ranking::team::TeamScore;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

fn opponent(name: Option<&str>) -> &str {
    name.unwrap_or("N/A")
}

/// One ranking row. `conference_suffix` is appended to the conference column.
fn team_line(
    rank: usize,
    team: &TeamScore,
    variant: VariantConfig,
    conference_suffix: &str,
) -> String {
    let conference = format!(
        "{}{}",
        team.conference.as_deref().unwrap_or("-"),
        conference_suffix
    );
    let mut line = format!(
        "{rank:2}. {label:<30} | Conference: {conference:<20} | Total: {total:.2} | Base: {base:.2} | \
         Record: {record:.2} | Offense: {offense:.2}",
        label = team.label(),
        total = team.total_points,
        base = team.base_points,
        record = team.record_points,
        offense = team.offense_points,
    );
    if variant.score_defense {
        line.push_str(&format!(" | Defense: {:.2}", team.defense_points));
    }
    line.push_str(&format!(
        " | Conference: {:.2} | SoS: {:.2} | Best Win: {:.2} ({})",
        team.conference_points,
        team.sos_points,
        team.best_win_points,
        opponent(team.best_win.as_deref()),
    ));
    if variant.lowest_loss != LowestLossMode::Off {
        line.push_str(&format!(
            " | Lowest Loss: {:.2} ({})",
            team.lowest_loss_points,
            opponent(team.lowest_loss.as_deref()),
        ));
    }
    if team.champion_bonus > 0.0 {
        line.push_str(&format!(" | Champion: +{:.2}", team.champion_bonus));
    }
    line
}

/// One line per team, ranked from 1.
pub fn ranking_lines(scores: &[TeamScore], variant: VariantConfig) -> Vec<String> {
    scores
        .iter()
        .enumerate()
        .map(|(i, team)| team_line(i + 1, team, variant, ""))
        .collect()
}

/// The playoff field in seed order; champions are marked "(C)".
pub fn field_lines(field: &[SeededTeam], variant: VariantConfig) -> Vec<String> {
    field
        .iter()
        .map(|s| {
            let suffix = if s.champion { " (C)" } else { "" };
            team_line(s.seed, &s.team, variant, suffix)
        })
        .collect()
}

fn seeded_label(s: &SeededTeam) -> String {
    let marker = if s.champion { " (C)" } else { "" };
    format!("#{} {}{}", s.seed, s.team.label(), marker)
}

pub fn bracket_lines(bracket: &Bracket) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("First-Round Byes:".to_string());
    for s in &bracket.byes {
        lines.push(format!("  {}", seeded_label(s)));
    }

    lines.push(String::new());
    lines.push("First Round:".to_string());
    for m in &bracket.first_round {
        lines.push(format!(
            "  Match {}: {} vs {}",
            m.number,
            seeded_label(&m.higher),
            seeded_label(&m.lower)
        ));
    }

    lines.push(String::new());
    lines.push("Quarterfinals:".to_string());
    for q in &bracket.quarterfinals {
        lines.push(format!(
            "  {} vs Winner of Match {}",
            seeded_label(&q.bye),
            q.match_number
        ));
    }

    lines
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    rank: usize,
    team: &'a str,
    conference: Option<&'a str>,
    wins: u32,
    losses: u32,
    ties: u32,
    total_points: f64,
    base_points: f64,
    record_points: f64,
    offense_points: f64,
    defense_points: f64,
    conference_points: f64,
    champion_bonus: f64,
    sos_points: f64,
    best_win: Option<&'a str>,
    best_win_points: f64,
    lowest_loss: Option<&'a str>,
    lowest_loss_points: f64,
}

impl<'a> CsvRow<'a> {
    fn new(rank: usize, t: &'a TeamScore) -> Self {
        CsvRow {
            rank,
            team: &t.name,
            conference: t.conference.as_deref(),
            wins: t.wins,
            losses: t.losses,
            ties: t.ties,
            total_points: t.total_points,
            base_points: t.base_points,
            record_points: t.record_points,
            offense_points: t.offense_points,
            defense_points: t.defense_points,
            conference_points: t.conference_points,
            champion_bonus: t.champion_bonus,
            sos_points: t.sos_points,
            best_win: t.best_win.as_deref(),
            best_win_points: t.best_win_points,
            lowest_loss: t.lowest_loss.as_deref(),
            lowest_loss_points: t.lowest_loss_points,
        }
    }
}

fn write_csv_to<W: Write>(writer: W, scores: &[TeamScore]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (i, team) in scores.iter().enumerate() {
        wtr.serialize(CsvRow::new(i + 1, team))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export the ranking, one row per team with a header line.
pub fn write_csv(path: &Path, scores: &[TeamScore]) -> Result<(), ReportError> {
    let shown = path.display().to_string();
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: shown.clone(),
        source,
    })?;
    write_csv_to(file, scores).map_err(|source| ReportError::Csv {
        path: shown.clone(),
        source,
    })?;
    info!(path = %shown, rows = scores.len(), "wrote ranking CSV");
    Ok(())
}

// cfp-rank entry point.
//
// Startup sequence:
// 1. Parse CLI arguments
// 2. Initialize tracing (log to file, stdout is for the report)
// 3. Load config, apply CLI overrides
// 4. Fetch the season (API or snapshot), optionally save a snapshot
// 5. Score and print the top-N ranking
// 6. Select the playoff field and seed the bracket
// 7. Optional CSV export

use std::path::PathBuf;

use anyhow::{ensure, Context};
use clap::Parser;
use tracing::{info, warn};

use cfp_rank::config::{self, Config};
use cfp_rank::playoff::{self, Bracket};
use cfp_rank::provider::{self, CfbdClient, SnapshotProvider, SportsDataProvider};
use cfp_rank::ranking::RankingEngine;
use cfp_rank::report;

#[derive(Parser, Debug)]
#[command(name = "cfp-rank")]
#[command(version)]
#[command(about = "Ranks college football teams and seeds a playoff bracket")]
struct Cli {
    /// Season to rank (defaults to config, then the current season)
    #[arg(short, long)]
    year: Option<i32>,

    /// Number of teams to print
    #[arg(short, long)]
    top: Option<usize>,

    /// Read season data from a JSON snapshot instead of the API
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Save the fetched season data as a JSON snapshot
    #[arg(long)]
    save_snapshot: Option<PathBuf>,

    /// Export the printed ranking as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Skip playoff field selection and the bracket
    #[arg(long)]
    no_playoff: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing()?;
    info!("cfp-rank starting up");

    let mut config = config::load_config().context("failed to load configuration")?;
    apply_overrides(&mut config, &cli)?;
    info!(
        year = config.season.year,
        top_n = config.season.top_n,
        variant = ?config.scoring.variant,
        "config loaded"
    );

    let source: Box<dyn SportsDataProvider> = match &cli.snapshot {
        Some(path) => Box::new(
            SnapshotProvider::open(path)
                .with_context(|| format!("failed to open snapshot {}", path.display()))?,
        ),
        None => Box::new(
            CfbdClient::from_config(&config.provider, &config.credentials)
                .context("failed to create CollegeFootballData client")?,
        ),
    };

    let season = provider::fetch_season(
        &*source,
        config.season.year,
        config.scoring.variant.score_defense,
    )
    .await
    .with_context(|| format!("failed to fetch season {}", config.season.year))?;

    if let Some(path) = &cli.save_snapshot {
        provider::save_snapshot(path, &season).context("failed to save snapshot")?;
        println!("Saved season data to {}", path.display());
    }

    let engine = RankingEngine::new(config.scoring.clone());
    let scored = engine.score(&season);
    let top: Vec<_> = scored.iter().take(config.season.top_n).cloned().collect();
    let variant = config.scoring.variant;

    println!(
        "Top {} Teams for {} ({} ranked):",
        top.len(),
        season.year,
        scored.len()
    );
    for line in report::ranking_lines(&top, variant) {
        println!("{line}");
    }

    if !cli.no_playoff {
        let field = playoff::select_field(
            &scored,
            &config.scoring.champions,
            config.playoff.num_spots,
        );

        println!();
        println!("Playoff Field ({} teams):", field.len());
        println!(
            "Conference champions receive automatic bids: {}",
            config.scoring.champions.join(", ")
        );
        for line in report::field_lines(&field, variant) {
            println!("{line}");
        }

        match Bracket::seed(&field, config.playoff) {
            Ok(bracket) => {
                println!();
                println!("Bracket:");
                for line in report::bracket_lines(&bracket) {
                    println!("{line}");
                }
            }
            Err(e) => {
                warn!("bracket not seeded: {e}");
                eprintln!("Bracket not seeded: {e}");
            }
        }
    }

    if let Some(path) = &cli.csv {
        report::write_csv(path, &top).context("failed to export CSV")?;
        println!();
        println!("Wrote {} rows to {}", top.len(), path.display());
    }

    info!("cfp-rank finished");
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) -> anyhow::Result<()> {
    if let Some(year) = cli.year {
        config.season.year = year;
    }
    if let Some(top) = cli.top {
        ensure!(top > 0, "--top must be at least 1");
        config.season.top_n = top;
    }
    Ok(())
}

/// Initialize tracing to log to a file, keeping stdout for the report.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("cfp-rank.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cfp_rank=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

use std::path::PathBuf;

use admin::{AdminError, ScoreSheet, SheetLoader, SheetValidator};
use clap::{Parser, Subcommand};
use storage::{
    Database, PgStore,
    models::Course,
    services::{
        leaderboard::leaderboard,
        skins::{GroupSettlement, settle_all, settle_group},
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gcup-admin")]
#[command(about = "Gentlemen's Cup score administration", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a JSON score sheet and settle every group
    Import {
        file: PathBuf,

        #[arg(long)]
        validate_only: bool,
    },
    /// Write the raw score log to a JSON score sheet
    Export { output: PathBuf },
    /// Recompute skins from the raw scores
    Settle {
        #[arg(short, long, value_parser = clap::value_parser!(i16).range(1..=5))]
        group: Option<i16>,
    },
    /// Print the current standings
    Leaderboard,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("admin={},storage={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Import {
            file,
            validate_only,
        } => {
            handle_import(file, validate_only, cli.database_url.as_deref()).await?;
        }
        Commands::Export { output } => {
            let store = connect(cli.database_url.as_deref()).await?;
            let sheet = SheetLoader::new(&store).export().await?;
            let json = serde_json::to_string_pretty(&sheet)?;
            tokio::fs::write(&output, json).await?;
            tracing::info!(
                "Exported {} Day 1 and {} Day 2 row(s) to {}",
                sheet.day1.len(),
                sheet.day2.len(),
                output.display()
            );
        }
        Commands::Settle { group } => {
            let store = connect(cli.database_url.as_deref()).await?;
            let settlements = match group {
                Some(group) => vec![settle_group(&store, group).await?],
                None => settle_all(&store).await?,
            };
            report_settlements(&settlements);
        }
        Commands::Leaderboard => {
            let store = connect(cli.database_url.as_deref()).await?;
            let board = leaderboard(&store).await?;

            if !board.day1_released {
                tracing::info!("Day 1 points are withheld until every team finishes 18 holes");
            }
            for entry in &board.entries {
                tracing::info!(
                    "{}. {:<10} {:>6} pts (day 1: {} + {}, day 2: {}, skins won: {})",
                    entry.rank,
                    entry.team_name,
                    entry.total_points,
                    entry.day1_scramble_points,
                    entry.day1_alt_shot_points,
                    entry.day2_points,
                    entry.skins_won
                );
            }
            for progress in &board.groups {
                tracing::info!(
                    "Group {}: {}/{} holes resolved, {} skin(s) carried",
                    progress.group,
                    progress.holes_resolved,
                    progress.holes_total,
                    progress.carried_skins
                );
            }
        }
    }

    Ok(())
}

async fn connect(database_url: Option<&str>) -> Result<PgStore, AdminError> {
    let database_url = database_url.ok_or_else(|| {
        AdminError::ConfigError("DATABASE_URL or --database-url is required".to_string())
    })?;

    tracing::info!("Connecting to database...");
    let db = Database::new(database_url).await?;
    db.run_migrations().await?;

    Ok(PgStore::new(db))
}

async fn handle_import(
    file: PathBuf,
    validate_only: bool,
    database_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Loading score sheet from: {}", file.display());

    let json_content = tokio::fs::read_to_string(&file).await?;
    let sheet: ScoreSheet = serde_json::from_str(&json_content)?;

    tracing::info!(
        "Loaded {} Day 1 and {} Day 2 row(s) (v{})",
        sheet.day1.len(),
        sheet.day2.len(),
        sheet.format_version
    );

    tracing::info!("Validating score sheet...");
    let validation_report = SheetValidator::validate(&sheet)?;
    validation_report.log_warnings();
    tracing::info!("✓ Validation successful!");

    if validate_only {
        return Ok(());
    }

    let store = connect(database_url).await?;
    let summary = SheetLoader::new(&store).import(&sheet).await?;
    report_settlements(&summary.settlements);

    tracing::info!("✓ Import completed successfully!");

    Ok(())
}

fn report_settlements(settlements: &[GroupSettlement]) {
    for settlement in settlements {
        let points: Vec<String> = settlement
            .points()
            .iter()
            .map(|(team, points)| format!("{} {}", team, points))
            .collect();
        tracing::info!(
            "Group {}: {} of {} hole(s) resolved ({})",
            settlement.group,
            settlement.results.len(),
            Course::Day2.hole_count(),
            points.join(", ")
        );
        for failure in &settlement.persist_failures {
            tracing::error!(
                "  ✗ Group {} hole {} not persisted: {}",
                failure.group,
                failure.hole,
                failure.message
            );
        }
    }
}

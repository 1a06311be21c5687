//! shopdb CLI - seed the sample shop catalogue and print the shop report

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use shopdb::storage::ShopStore;
use shopdb::ui;
use shopdb::{config, report, seed};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "shopdb")]
#[command(version)]
#[command(about = "Seed a local shop database and print a nested shop report")]
#[command(long_about = r#"
shopdb keeps a small shop catalogue in a local SQLite file.

On every run it seeds the sample catalogue if the database has no countries
yet, then prints each shop with its city, workers and products.

Example usage:
  shopdb
  shopdb --format json
  shopdb --database data/shops.db stats
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, global = true, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Seed if empty, then print the shop report (default)
    Report,

    /// Seed the sample catalogue if the database is empty
    Seed,

    /// Show row counts for every table
    Stats,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the report
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let file_config = config::load_config(cli.config.as_deref())?;
    let database = config::resolve_database_path(cli.database.as_deref(), file_config.as_ref());
    config::ensure_db_dir(&database)?;

    tracing::info!("Using database {}", database.display());
    let mut store = ShopStore::open(&database)
        .with_context(|| format!("failed to open database {}", database.display()))?;

    match cli.command.unwrap_or(Commands::Report) {
        Commands::Report => {
            let outcome = seed::initialize(&mut store)?;
            tracing::debug!("{}", outcome);

            let shops = store.load_shop_details()?;
            match cli.format {
                ReportFormat::Text => {
                    let mut out = std::io::stdout().lock();
                    report::write_text(&mut out, &shops)?;
                    out.flush()?;
                }
                ReportFormat::Json => {
                    let json = report::render_json(&shops)?;
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
            }
        }

        Commands::Seed => {
            let outcome = seed::initialize(&mut store)?;
            match cli.format {
                ReportFormat::Text => {
                    println!("{}", ui::seed_summary(&database, &outcome));
                }
                ReportFormat::Json => {
                    let data = match outcome {
                        seed::SeedOutcome::AlreadySeeded => serde_json::json!({
                            "seeded": false,
                        }),
                        seed::SeedOutcome::Seeded(counts) => serde_json::json!({
                            "seeded": true,
                            "rows": counts.total(),
                        }),
                    };
                    println!("{}", serde_json::to_string_pretty(&data)?);
                }
            }
        }

        Commands::Stats => {
            let stats = store.stats()?;
            match cli.format {
                ReportFormat::Text => {
                    println!("{}", ui::stats_heading(&database));
                    println!("{}", ui::stats_table(&stats));
                }
                ReportFormat::Json => {
                    let data: serde_json::Map<String, serde_json::Value> = stats
                        .rows()
                        .iter()
                        .map(|(table, count)| (table.to_string(), serde_json::json!(count)))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&data)?);
                }
            }
        }
    }

    Ok(())
}

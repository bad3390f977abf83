use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use service_roster::display::{print_availability, print_fill_results};
use service_roster::parser::{load_availability, load_ledger, load_schedule};
use service_roster::roster::{AvailabilityIndex, DayType, FairnessLedger};
use service_roster::tasks::{extend_schedule, fill_missing_assignments, run_schedule, FillReport};
use service_roster::{web, RosterConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fair volunteer rostering for service days", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, global = true, default_value = "roster.toml")]
    config: PathBuf,

    /// Directory holding the CSV sheets (overrides the config file).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fill schedule rows that are missing one or both names
    Fill,
    /// Add upcoming Tuesdays, Thursdays and Fridays to the schedule
    Extend {
        /// Days to look ahead past the last scheduled date
        #[arg(long)]
        days: Option<u32>,
    },
    /// Extend the schedule, then fill missing assignments
    Run,
    /// Show who is available on each service day, least-served first
    Availability,
    /// Serve the schedule and a run trigger over HTTP
    Web {
        #[arg(long)]
        port: Option<u16>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("ROSTER_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "service_roster=debug,info"
        } else {
            "service_roster=info,warn"
        })
    });

    let format = env::var("ROSTER_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());
    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => registry.with(fmt::layer().json().with_ansi(false)).init(),
        _ => registry.with(fmt::layer().compact().with_writer(std::io::stderr)).init(),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report_fill(config: &RosterConfig, report: &FillReport, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(report);
    }
    let sheet = load_schedule(&config.schedule_path()).context("re-reading schedule")?;
    print_fill_results(&report.results, &sheet);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = RosterConfig::load(Some(&cli.config))
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Commands::Fill => {
            let report = fill_missing_assignments(&config).context("filling missing assignments")?;
            report_fill(&config, &report, cli.json)?;
        }
        Commands::Extend { days } => {
            let days = days.unwrap_or(config.window_days);
            let report = extend_schedule(&config, days).context("extending schedule")?;
            if cli.json {
                print_json(&report)?;
            } else {
                println!("Last date found: {}", report.last_date);
                println!("Added {} new schedule entries", report.added.len());
            }
        }
        Commands::Run => {
            let report = run_schedule(&config).context("running schedule")?;
            if cli.json {
                print_json(&report)?;
            } else {
                match &report.extended {
                    Some(ext) => println!("Added {} new schedule entries", ext.added.len()),
                    None => println!("Schedule not extended"),
                }
                report_fill(&config, &report.filled, false)?;
            }
        }
        Commands::Availability => {
            let records = load_availability(&config.availability_path())?;
            let ledger = load_ledger(&config.ledger_path())?;
            let index = AvailabilityIndex::build(&records);
            if cli.json {
                let days: Vec<_> = DayType::ALL
                    .into_iter()
                    .map(|day| {
                        let names = index.availability.available_on(day).to_vec();
                        serde_json::json!({ "day": day, "available": names })
                    })
                    .collect();
                print_json(&days)?;
            } else {
                print_availability(&index, &FairnessLedger::seed(&ledger));
            }
        }
        Commands::Web { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            if config.admin_password.is_none() {
                tracing::warn!("no admin password configured; POST /api/run will refuse every request");
            }
            println!("Starting web server on port {}...", config.port);
            println!("Access the API at http://localhost:{}/api/schedule", config.port);
            web::start_server(config).await?;
        }
    }

    Ok(())
}

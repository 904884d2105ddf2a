use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use bbload::config::ConnectionConfig;
use bbload::error::LoadError;
use bbload::loader::TableLoader;
use bbload::manifest;
use bbload::schema::ddl;

const LOG_FILE: &str = "load.log";

#[derive(Parser)]
#[command(name = "bbload")]
#[command(about = "Load wrangled baseball statistics into PostgreSQL")]
#[command(version)]
#[command(long_about = "bbload drops, recreates, and bulk-loads one PostgreSQL table per \
wrangled Lahman and Retrosheet CSV file, narrowing column types from the sidecar type \
files and applying primary-key and uniqueness constraints after each load.")]
#[command(after_help = "EXAMPLES:
    # Load everything from ../data with progress on the console
    DB_USER=postgres DB_PASS=... bbload --data-dir ../data -v

    # Quiet console, debug-level file log in load.log
    DB_USER=postgres DB_PASS=... bbload --log debug

Credentials come from the DB_USER and DB_PASS environment variables; the
target database is postgresql://localhost:5432/baseball.")]
struct Cli {
    /// Baseball data directory holding lahman/wrangled and retrosheet/wrangled
    #[arg(long, default_value = "../data")]
    data_dir: PathBuf,

    /// Send informational logging to the console
    #[arg(short, long)]
    verbose: bool,

    /// Enable file logging to load.log at the given level
    #[arg(long, value_enum, value_name = "LEVEL")]
    log: Option<LogLevel>,
}

#[derive(ValueEnum, Clone, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    info!("Starting bbload v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli).await {
        error!("Load failed: {}", e);
        eprintln!("Load failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Load every table of the manifest in order, one connection, one
/// table at a time. The first error aborts the run; the drop-then-create
/// prologue of each load makes a rerun safe.
async fn run(cli: &Cli) -> Result<(), LoadError> {
    let config = ConnectionConfig::from_env()?;
    let client = config.connect().await?;
    let loader = TableLoader::new(&client);

    for spec in manifest::TABLES {
        let source = spec.source_path(&cli.data_dir);
        loader.load(spec.prefix, &source, spec.primary_key()).await?;

        let table = ddl::target_table(spec.prefix, &source);
        for unique in spec.uniques {
            loader
                .add_unique(&table, unique.constraint, unique.columns)
                .await?;
        }
    }

    info!("Finished");
    Ok(())
}

/// Two optional sinks, independently enabled: console at INFO when
/// --verbose is set, file at the chosen threshold when --log is set.
fn initialize_logging(cli: &Cli) -> Result<()> {
    let console = cli.verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_filter(LevelFilter::INFO)
    });

    let file = match &cli.log {
        Some(level) => {
            let log_file = std::fs::File::create(LOG_FILE)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::new(log_file))
                    .with_filter(LevelFilter::from(level.clone())),
            )
        }
        None => None,
    };

    tracing_subscriber::registry().with(console).with(file).init();
    Ok(())
}

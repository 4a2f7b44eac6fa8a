use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::instrument::WithSubscriber;
use tracing::{error, info};

use hot100::dao;
use hot100::prelude::*;

/// Import Billboard Hot 100 chart JSON into the `hot100` table.
#[derive(Debug, Parser)]
#[command(name = "hot100-import", version, about = "Import Billboard Hot 100 data to MySQL/MariaDB", long_about = None)]
struct Args {
    #[command(flatten)]
    conn: ConnectionArgs,

    #[command(flatten)]
    verbosity: VerbosityArgs,

    /// Create the hot100 table first if it does not exist
    #[arg(long)]
    create_table: bool,

    /// JSON files or directories of JSON files to process
    #[arg(value_name = "FILES", required = true, num_args = 1..)]
    files: Vec<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let logging = Logging::from(args.verbosity);
    run(args).with_subscriber(logging.dispatch()).await
}

async fn run(args: Args) -> ExitCode {
    let db = match connect(&args).await {
        Ok(db) => db,
        Err(e) => {
            error!("Error connecting to database: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = import(&db, &args).await;
    db.close().await;
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn connect(args: &Args) -> Result<Database> {
    let url = args.conn.url()?;
    let db = Database::connect(&url).await?;
    info!("Successfully connected to the database at {}", args.conn.redacted_url());
    Ok(db)
}

async fn import(db: &Database, args: &Args) -> Result<()> {
    if args.create_table {
        db.ensure_schema().await?;
    }
    let report = import_paths(db, &args.files).await;
    if let Ok(total) = dao::count_rows(db.pool()).await {
        info!("hot100 now holds {total} rows");
    }
    if report.aborted {
        info!("Import stopped early; files before the failure were committed");
    }
    Ok(())
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::instrument::WithSubscriber;
use tracing::{error, info};

use hot100::prelude::*;

/// Export the `hot100` table as an HTML page of music-service search links.
#[derive(Debug, Parser)]
#[command(name = "hot100-export", version, about = "Export Billboard Hot 100 data to HTML with search links", long_about = None)]
struct Args {
    #[command(flatten)]
    conn: ConnectionArgs,

    #[command(flatten)]
    verbosity: VerbosityArgs,

    /// Output HTML file path
    #[arg(short, long, value_name = "OUTPUT")]
    output: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let logging = Logging::from(args.verbosity);
    run(args).with_subscriber(logging.dispatch()).await
}

async fn run(args: Args) -> ExitCode {
    let url = match args.conn.url() {
        Ok(u) => u,
        Err(e) => {
            error!("Error connecting to database: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            error!("Error connecting to database: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    info!("Successfully connected to the database at {}", args.conn.redacted_url());

    let outcome = export_to(&db, &args.output).await;
    db.close().await;
    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("An error occurred: {e:#}");
            ExitCode::FAILURE
        }
    }
}

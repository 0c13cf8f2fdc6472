use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;

use cleanspot_db_sqlite::Connections;

mod config;
mod gateways;
mod worker;

#[derive(Debug, Parser)]
#[command(
    name = "cleanspot",
    about = "Verification and reward backend for citizen litter cleanups",
    version
)]
struct Args {
    /// Path to the configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Overwrites the database URL from the configuration.
    #[arg(long, value_name = "URL")]
    db_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let mut cfg = config::Config::try_load_from_file_or_default(args.config.as_deref())?;
    if let Some(db_url) = args.db_url {
        cfg.db.conn_sqlite = db_url;
    }

    let connections = Connections::init(&cfg.db.conn_sqlite, cfg.db.conn_pool_size.into())
        .map_err(|err| anyhow!("Failed to open database {}: {err}", cfg.db.conn_sqlite))?;
    cleanspot_db_sqlite::run_embedded_database_migrations(
        connections
            .exclusive()
            .map_err(|err| anyhow!("Failed to obtain database connection: {err}"))?,
    );

    let images = gateways::image_store(&cfg.images)?;
    let judge = gateways::judge_gateway(&cfg.judge);

    // The sender half belongs to the upload layer: it enqueues one
    // event per committed AFTER-photo upload. It is kept alive here so
    // the worker keeps running until shutdown.
    let (_event_tx, event_rx) = worker::event_channel();
    let worker_task = tokio::spawn(worker::run(
        connections.clone(),
        judge,
        images,
        cfg.points,
        event_rx,
    ));

    log::info!("cleanspot verification worker is running (ctrl-c to stop)");
    tokio::signal::ctrl_c().await?;
    log::info!("Shutting down");
    worker_task.abort();
    Ok(())
}

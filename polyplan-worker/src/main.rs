use std::env;
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use gsf::config::GSFConfig;
use log::{info, warn};
use polyplan_worker::{Dispatcher, JobStore, serve};
use tokio::signal;

const DEFAULT_MAX_CONCURRENT_JOBS: usize = 4;

/// Reads newline-delimited JSON plan requests from stdin and writes one JSON line per finished job to stdout.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("[WORKER] starting polyplan-worker");

    let max_concurrent_jobs = match env::var("POLYPLAN_MAX_JOBS") {
        Ok(value) => value
            .parse::<usize>()
            .context("POLYPLAN_MAX_JOBS must be a positive integer")?,
        Err(_) => DEFAULT_MAX_CONCURRENT_JOBS,
    };
    let config = match env::var("POLYPLAN_CONFIG") {
        Ok(path) => {
            let reader = BufReader::new(
                File::open(&path).with_context(|| format!("could not open {path}"))?,
            );
            let config: GSFConfig =
                serde_json::from_reader(reader).context("incorrect config file format")?;
            config.validate().context("invalid config file")?;
            config
        }
        Err(_) => {
            warn!("[WORKER] POLYPLAN_CONFIG not set, using the default configuration");
            GSFConfig::default()
        }
    };
    info!("[WORKER] at most {max_concurrent_jobs} concurrent job(s)");

    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel::<()>(1);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("[WORKER] received interrupt");
            let _ = shutdown_tx.send(());
        }
    });

    let dispatcher = Dispatcher::new(JobStore::new(), config, max_concurrent_jobs);
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let n_written = serve(dispatcher, input, tokio::io::stdout(), shutdown_rx).await?;

    info!("[WORKER] all {n_written} job(s) finished, exiting");
    Ok(())
}

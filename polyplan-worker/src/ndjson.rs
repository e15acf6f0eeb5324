use anyhow::{Context, Result};
use log::{error, info};
use polyplan::io::ext_repr::ExtPlanRequest;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc};

use crate::dispatcher::Dispatcher;
use crate::store::JobRecord;

/// Reads newline-delimited JSON plan requests from `input` and writes one JSON line per finished job
/// to `output`, as soon as the job finishes.
/// Stops accepting requests at the end of `input` or on a shutdown signal,
/// returns once every accepted job is written. Returns the number of lines written.
pub async fn serve<R, W>(
    dispatcher: Dispatcher,
    input: R,
    mut output: W,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (finished_tx, mut finished_rx) = mpsc::unbounded_channel();
    let dispatcher = dispatcher.with_finished_channel(finished_tx);
    let mut lines = input.lines();

    let mut accepting = true;
    let mut shutdown_open = true;
    let mut n_pending = 0;
    let mut n_written = 0;

    while accepting || n_pending > 0 {
        tokio::select! {
            Some(record) = finished_rx.recv() => {
                n_pending -= 1;
                write_record(&mut output, &record).await?;
                dispatcher.store().take_finished(record.id);
                n_written += 1;
            }
            signal = shutdown_rx.recv(), if accepting && shutdown_open => {
                if let Err(RecvError::Closed) = signal {
                    shutdown_open = false;
                    continue;
                }
                info!("[WORKER] shutdown requested, no longer accepting requests ({n_pending} pending)");
                accepting = false;
            }
            line = lines.next_line(), if accepting => {
                let Some(line) = line.context("failed to read requests")? else {
                    accepting = false;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<ExtPlanRequest>(&line) {
                    Ok(request) => {
                        dispatcher.submit(request);
                        n_pending += 1;
                    }
                    Err(e) => error!(
                        "[WORKER] skipping malformed request: {e}. Line (first 200 chars): {}",
                        line.chars().take(200).collect::<String>()
                    ),
                }
            }
        }
    }

    Ok(n_written)
}

async fn write_record<W: AsyncWrite + Unpin>(output: &mut W, record: &JobRecord) -> Result<()> {
    let mut line = serde_json::to_string(record).context("failed to serialize job")?;
    line.push('\n');
    output.write_all(line.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

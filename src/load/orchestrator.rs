use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::config::RunConfig;
use crate::error::{AppError, AppResult, LoadError};
use crate::http::{PreparedRequest, build_client};
use crate::metrics::RequesterStats;
use crate::report::RunReport;
use crate::shutdown::ShutdownReceiver;

use super::{LoadSession, SessionReport, StopSignal};

/// Launches one session per worker, aggregates their reports, and derives
/// the run summary.
///
/// Interrupts set the stop signal; sessions still finish their in-flight
/// request and report before the run completes.
///
/// # Errors
///
/// Returns an error when the configuration cannot produce a client or
/// request, when a session fails, or when the results channel closes before
/// every session reported.
pub async fn run_load(config: RunConfig, interrupts: ShutdownReceiver) -> AppResult<RunReport> {
    if config.workers == 0 {
        return Err(AppError::load(LoadError::NoWorkers));
    }
    build_client(&config.client)?;
    PreparedRequest::from_spec(&config.request)?;

    let workers = config.workers;
    let duration_secs = config.duration_secs();
    info!(
        url = %config.request.url,
        workers,
        duration_secs,
        "Starting load run."
    );

    let config = Arc::new(config);
    let stop = StopSignal::new();
    let (results_tx, results_rx) = mpsc::channel::<SessionReport>(workers);

    let start = Instant::now();
    for id in 0..workers {
        let session = LoadSession::new(id, Arc::clone(&config), stop.clone());
        tokio::spawn(session.run(results_tx.clone()));
    }
    drop(results_tx);

    let drained = drain_reports(results_rx, interrupts, &stop, workers, duration_secs).await;
    let wall_clock = start.elapsed();
    if stop.stop() {
        debug!("Run complete; stop signal set.");
    }

    let (stats, reporters) = drained?;
    Ok(RunReport::new(stats, reporters, wall_clock))
}

/// Merges session reports until `expected` have arrived.
///
/// Returns the aggregate and the number of sessions that reported.
///
/// # Errors
///
/// Returns the first session error once every session reported, or
/// [`LoadError::ResultsChannelClosed`] when the channel ends early.
pub(crate) async fn drain_reports(
    mut results_rx: mpsc::Receiver<SessionReport>,
    mut interrupts: ShutdownReceiver,
    stop: &StopSignal,
    expected: usize,
    duration_secs: u64,
) -> AppResult<(RequesterStats, usize)> {
    let mut aggregate = RequesterStats::for_run(duration_secs)?;
    let mut reporters: usize = 0;
    let mut first_error: Option<AppError> = None;
    let mut interrupts_open = true;

    while reporters < expected {
        tokio::select! {
            signal = interrupts.recv(), if interrupts_open => match signal {
                Ok(()) | Err(RecvError::Lagged(_)) => {
                    if stop.stop() {
                        warn!("Interrupt received; stopping sessions.");
                    }
                }
                Err(RecvError::Closed) => interrupts_open = false,
            },
            report = results_rx.recv() => match report {
                Some(Ok(stats)) => {
                    reporters = reporters.saturating_add(1);
                    if let Err(err) = aggregate.merge(&stats) {
                        fail_run(stop, &mut first_error, err.into());
                    }
                }
                Some(Err(err)) => {
                    reporters = reporters.saturating_add(1);
                    fail_run(stop, &mut first_error, err);
                }
                None => {
                    return Err(AppError::load(LoadError::ResultsChannelClosed {
                        expected,
                        received: reporters,
                    }));
                }
            },
        }
    }

    first_error.map_or(Ok((aggregate, reporters)), Err)
}

fn fail_run(stop: &StopSignal, first_error: &mut Option<AppError>, err: AppError) {
    error!("Session failed: {}", err);
    if stop.stop() {
        warn!("Stopping remaining sessions after failure.");
    }
    if first_error.is_none() {
        *first_error = Some(err);
    }
}

use crate::shutdown::{ShutdownReceiver, ShutdownSender};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Forwards every Ctrl+C or SIGTERM to `interrupt_tx` until `done_rx` fires.
///
/// The handler keeps listening after the first signal so repeated interrupts
/// are still observed while sessions drain.
pub fn setup_signal_shutdown_handler(
    interrupt_tx: &ShutdownSender,
    mut done_rx: ShutdownReceiver,
) -> tokio::task::JoinHandle<()> {
    let interrupt_tx = interrupt_tx.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                tracing::warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        loop {
            #[cfg(unix)]
            {
                tokio::select! {
                    _ = done_rx.recv() => break,
                    result = tokio::signal::ctrl_c() => {
                        if result.is_err() {
                            break;
                        }
                    }
                    () = async {
                        if let Some(signal) = term_signal.as_mut() {
                            signal.recv().await;
                        } else {
                            std::future::pending::<()>().await;
                        }
                    } => {}
                }
            }

            #[cfg(not(unix))]
            {
                tokio::select! {
                    _ = done_rx.recv() => break,
                    result = tokio::signal::ctrl_c() => {
                        if result.is_err() {
                            break;
                        }
                    }
                }
            }

            if interrupt_tx.send(()).is_err() {
                break;
            }
        }
    })
}

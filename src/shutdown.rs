use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Shared stop request raised by Ctrl+C or SIGTERM.
///
/// Workers check it before each request; requests already in flight finish.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Raises `cancel` on the first Ctrl+C or SIGTERM.
///
/// The task runs until a signal arrives; abort it once the run is over.
pub fn spawn_signal_handler(runtime: &Handle, cancel: CancelFlag) -> JoinHandle<()> {
    runtime.spawn(async move {
        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                tracing::warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(err) = result {
                        tracing::warn!("Failed to listen for Ctrl+C: {}", err);
                        return;
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
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for Ctrl+C: {}", err);
                return;
            }
        }

        tracing::warn!("Interrupted; waiting for in-flight requests to finish.");
        cancel.cancel();
    })
}

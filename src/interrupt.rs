use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Shared stop state: set once by the interrupt handler, polled by the probe
/// loop before each attempt and awaited by in-flight request/sleep waits.
#[derive(Clone, Debug)]
pub struct StopSignal {
    stopping: Arc<AtomicBool>,
    tx: watch::Sender<bool>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            stopping: Arc::new(AtomicBool::new(false)),
            tx,
        }
    }

    /// Request a graceful stop. Returns whether a stop had already been
    /// requested, so the caller can escalate on a repeated interrupt.
    pub fn request_stop(&self) -> bool {
        let already = self.stopping.swap(true, Ordering::SeqCst);
        self.tx.send_replace(true);
        already
    }

    pub fn is_stopping(&self) -> bool {
        self.stopping.load(Ordering::SeqCst)
    }

    /// Resolves once a stop has been requested. Completes immediately on an
    /// already-stopped signal.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        let _ = rx.wait_for(|&stopped| stopped).await;
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

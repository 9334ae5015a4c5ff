//! Stop signal for running listeners.
//!
//! Each listener subscribes before it starts serving. Triggering closes the
//! accept loops; requests already in flight (a running command, a held
//! acknowledgment) run to completion.

use tokio::sync::broadcast;

#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver a listener awaits before closing.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Tell every subscribed listener to stop accepting. Returns how many were told.
    pub fn trigger(&self) -> usize {
        let listeners = self.tx.send(()).unwrap_or(0);
        if listeners == 0 {
            tracing::debug!("Stop requested with no listener running");
        } else {
            tracing::info!(listeners, "Closing listeners");
        }
        listeners
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

//! Handle for observing and stopping a running engine.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::EngineState;

/// Handle to a started [`PollingEngine`](super::PollingEngine).
///
/// Dropping the handle stops the engine, the same way unmounting a view ends
/// its session.
#[derive(Debug)]
pub struct EngineHandle {
    pub(super) state_rx: watch::Receiver<EngineState>,
    pub(super) stop_tx: watch::Sender<bool>,
    pub(super) task: Option<JoinHandle<()>>,
}

impl EngineHandle {
    /// Clone of the current state.
    pub fn snapshot(&self) -> EngineState {
        self.state_rx.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    ///
    /// After the engine stops the receiver keeps returning the last state.
    pub fn subscribe(&self) -> watch::Receiver<EngineState> {
        self.state_rx.clone()
    }

    /// Wait until the state satisfies `predicate` and return it.
    ///
    /// If the engine stops first, returns the final state instead.
    pub async fn wait_for(&self, predicate: impl FnMut(&EngineState) -> bool) -> EngineState {
        let mut rx = self.state_rx.clone();
        let result = rx.wait_for(predicate).await.map(|state| state.clone());
        result.unwrap_or_else(|_| rx.borrow().clone())
    }

    /// Stop polling. Idempotent.
    ///
    /// Once this returns, no fetch result is applied to the state, including
    /// results of fetches that were already in flight.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
        // The engine commits while holding the state lock and re-checks the
        // stop flag inside it, so taking the lock here waits out any commit
        // that began before the flag was set.
        drop(self.state_rx.borrow());
    }

    pub fn is_stopped(&self) -> bool {
        *self.stop_tx.borrow()
    }

    /// Stop polling and wait for the engine task to exit.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

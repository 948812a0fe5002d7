//! Live telemetry polling engine.
//!
//! The engine runs as a single tokio task that owns the [`EngineState`] and
//! publishes every change through a watch channel. Two timelines share the
//! task:
//!
//! - **Current reading**: fetched immediately on start and then every
//!   [`POLL_INTERVAL`]. At most one fetch is in flight; a tick that fires while
//!   one is outstanding is skipped.
//! - **History**: fetched exactly once on start, never retried.
//!
//! ```text
//! tick ──▶ fetch_current ──▶ apply_current ──┐
//!                                            ├──▶ watch::Sender<EngineState>
//! start ─▶ fetch_history ──▶ apply_history ──┘
//! stop ──▶ drop in-flight fetches, exit
//! ```
//!
//! Failures never stop the engine. They set `last_fetch_failed` and the last
//! good reading stays on display.

mod handle;
mod state;

pub use handle::EngineHandle;
pub use state::{EngineState, HistoryStatus};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::client::SensorApi;
use crate::data::Reading;
use crate::error::TelemetryError;

/// Interval between current-reading polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

type Pending<'a, T> = Pin<Box<dyn Future<Output = Result<T, TelemetryError>> + Send + 'a>>;

/// Polls a [`SensorApi`] and maintains the dashboard state.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use vitalwatch::{HttpSensorClient, PollingEngine};
///
/// # tokio_test::block_on(async {
/// let client = Arc::new(HttpSensorClient::new("http://localhost:5000").unwrap());
/// let handle = PollingEngine::new(client).start();
///
/// let mut updates = handle.subscribe();
/// while updates.changed().await.is_ok() {
///     let state = updates.borrow_and_update().clone();
///     println!("alert: {}", state.alert.label());
/// }
/// # });
/// ```
pub struct PollingEngine {
    api: Arc<dyn SensorApi>,
    interval: Duration,
}

impl PollingEngine {
    /// Create an engine polling `api` every [`POLL_INTERVAL`].
    pub fn new(api: Arc<dyn SensorApi>) -> Self {
        Self {
            api,
            interval: POLL_INTERVAL,
        }
    }

    /// Override the poll interval. Intended for embedding and tests; the
    /// dashboard itself always uses [`POLL_INTERVAL`].
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start polling on the current tokio runtime.
    ///
    /// Must be called from within a runtime.
    pub fn start(self) -> EngineHandle {
        let (state_tx, state_rx) = watch::channel(EngineState::new());
        let (stop_tx, stop_rx) = watch::channel(false);

        info!(
            "Starting engine for {} (interval {:?})",
            self.api.description(),
            self.interval
        );

        let task = tokio::spawn(run(self.api, self.interval, state_tx, stop_rx));

        EngineHandle {
            state_rx,
            stop_tx,
            task: Some(task),
        }
    }
}

impl std::fmt::Debug for PollingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollingEngine")
            .field("api", &self.api.description())
            .field("interval", &self.interval)
            .finish()
    }
}

async fn run(
    api: Arc<dyn SensorApi>,
    interval: Duration,
    state_tx: watch::Sender<EngineState>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut current_fetch: Option<Pending<'_, Reading>> = None;
    let mut history_fetch: Option<Pending<'_, Vec<Reading>>> = Some(api.fetch_history());

    loop {
        tokio::select! {
            biased;

            // Err means the handle is gone, which also ends the session.
            _ = stop_rx.changed() => break,

            Some(result) = resolve(&mut current_fetch), if current_fetch.is_some() => {
                current_fetch = None;
                match &result {
                    Ok(reading) => debug!("Received reading: {} bpm", reading.heart_rate),
                    Err(e) => warn!("Current reading fetch failed: {}", e),
                }
                if !commit(&state_tx, &stop_rx, |state| state.apply_current(result)) {
                    break;
                }
            }

            Some(result) = resolve(&mut history_fetch), if history_fetch.is_some() => {
                history_fetch = None;
                match &result {
                    Ok(readings) => info!("Loaded {} historical readings", readings.len()),
                    Err(e) => warn!("History fetch failed: {}", e),
                }
                if !commit(&state_tx, &stop_rx, |state| state.apply_history(result)) {
                    break;
                }
            }

            _ = ticker.tick() => {
                if current_fetch.is_some() {
                    debug!("Previous fetch still in flight, skipping tick");
                } else {
                    current_fetch = Some(api.fetch_current());
                }
            }
        }
    }

    info!("Engine stopped for {}", api.description());
}

/// Await the pending fetch, if there is one.
async fn resolve<T>(pending: &mut Option<Pending<'_, T>>) -> Option<Result<T, TelemetryError>> {
    match pending.as_mut() {
        Some(fetch) => Some(fetch.await),
        None => None,
    }
}

/// Apply a fetch result unless the engine has been stopped.
///
/// The stop flag is checked while holding the state lock. Returns false if
/// the result was discarded because of a stop.
fn commit(
    state_tx: &watch::Sender<EngineState>,
    stop_rx: &watch::Receiver<bool>,
    apply: impl FnOnce(&mut EngineState) -> bool,
) -> bool {
    let mut applied = false;
    state_tx.send_if_modified(|state| {
        if *stop_rx.borrow() {
            return false;
        }
        applied = true;
        apply(state)
    });
    applied
}

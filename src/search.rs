//! Debounced city search
//!
//! Coalesces keystroke bursts into a single outstanding lookup. Each
//! submission moves through an explicit lifecycle:
//!
//! `Idle -> Pending(timer) -> InFlight -> {Resolved, Cancelled}`
//!
//! A new keystroke discards the pending timer but never cancels a request
//! that is already on the wire; a late response for a superseded query is
//! discarded by generation comparison, so the consumer only ever sees the
//! newest submission's outcome.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::SkycastError;
use crate::geocode::Geocoder;
use crate::models::Location;

/// Seam over the geocoder's search contract
#[async_trait]
pub trait CitySearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Location>, SkycastError>;
}

#[async_trait]
impl CitySearch for Geocoder {
    async fn search(&self, query: &str) -> Result<Vec<Location>, SkycastError> {
        Geocoder::search(self, query).await
    }
}

/// Lifecycle of the most recent search submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// No submission yet
    Idle,
    /// Debounce timer armed, nothing on the wire
    Pending,
    /// Request issued, response outstanding
    InFlight,
    /// Outcome delivered
    Resolved,
    /// Abandoned via [`SearchController::cancel`]
    Cancelled,
}

/// Terminal result of a search submission
#[derive(Debug)]
pub struct SearchOutcome {
    /// Submission counter; strictly increasing across inputs
    pub generation: u64,
    /// The trimmed query this outcome belongs to
    pub query: String,
    /// Locations found, or the lookup error to surface
    pub result: Result<Vec<Location>, SkycastError>,
}

/// Debounced search driver over a [`CitySearch`] implementation
///
/// Outcomes arrive on the channel handed out by [`SearchController::new`];
/// superseded submissions produce no outcome at all.
pub struct SearchController<S: CitySearch + 'static> {
    searcher: Arc<S>,
    debounce: Duration,
    latest: Arc<AtomicU64>,
    phase: Arc<Mutex<SearchPhase>>,
    timer: Option<JoinHandle<()>>,
    outcomes: mpsc::UnboundedSender<SearchOutcome>,
}

impl<S: CitySearch + 'static> SearchController<S> {
    /// Create a controller and the receiving end of its outcome channel
    #[must_use]
    pub fn new(
        searcher: Arc<S>,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SearchOutcome>) {
        let (outcomes, rx) = mpsc::unbounded_channel();
        (
            Self {
                searcher,
                debounce,
                latest: Arc::new(AtomicU64::new(0)),
                phase: Arc::new(Mutex::new(SearchPhase::Idle)),
                timer: None,
                outcomes,
            },
            rx,
        )
    }

    /// Feed a keystroke's worth of input.
    ///
    /// Discards any pending timer and arms a new one; a blank query
    /// resolves immediately to an empty result list without touching the
    /// network.
    pub fn input(&mut self, query: &str) {
        self.discard_pending();
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim().to_string();

        if query.is_empty() {
            set_phase(&self.phase, SearchPhase::Resolved);
            let _ = self.outcomes.send(SearchOutcome {
                generation,
                query,
                result: Ok(Vec::new()),
            });
            return;
        }

        set_phase(&self.phase, SearchPhase::Pending);

        let searcher = Arc::clone(&self.searcher);
        let latest = Arc::clone(&self.latest);
        let phase = Arc::clone(&self.phase);
        let outcomes = self.outcomes.clone();
        let debounce = self.debounce;

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            if latest.load(Ordering::SeqCst) != generation {
                return;
            }
            set_phase(&phase, SearchPhase::InFlight);

            // Detached from the timer handle: aborting a pending timer must
            // never tear down a request that is already on the wire.
            tokio::spawn(async move {
                let result = searcher.search(&query).await;

                if latest.load(Ordering::SeqCst) != generation {
                    debug!(generation, "Discarding superseded result for '{query}'");
                    return;
                }

                set_phase(&phase, SearchPhase::Resolved);
                let _ = outcomes.send(SearchOutcome {
                    generation,
                    query,
                    result,
                });
            });
        }));
    }

    /// Abandon the current submission: drop the pending timer and mark any
    /// in-flight response as superseded. No outcome is delivered.
    pub fn cancel(&mut self) {
        self.discard_pending();
        self.latest.fetch_add(1, Ordering::SeqCst);
        set_phase(&self.phase, SearchPhase::Cancelled);
    }

    /// Lifecycle phase of the most recent submission
    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn discard_pending(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<S: CitySearch + 'static> Drop for SearchController<S> {
    fn drop(&mut self) {
        self.discard_pending();
    }
}

fn set_phase(phase: &Mutex<SearchPhase>, value: SearchPhase) {
    *phase.lock().unwrap_or_else(|e| e.into_inner()) = value;
}

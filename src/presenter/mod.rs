//! Presentation reducer
//!
//! Consumes pagination engine results and user actions, producing a
//! [`ViewState`] plus a stream of one-shot [`ViewEvent`]s. The flow is
//! strictly one-way: action → engine → reducer → state/event.
//!
//! The cardinal rule: once the user has visible data, a failure never
//! destroys it. Later failures degrade to a transient notification, and
//! the only path back to a blocking error view is failing while nothing
//! has been shown yet.

mod types;

pub use types::{
    Action, ViewEvent, ViewState, MSG_NETWORK_UNAVAILABLE, MSG_NO_MORE_ITEMS, MSG_UNEXPECTED,
};

use crate::engine::PaginationEngine;
use crate::error::Error;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// Long-lived reducer over the view state machine
pub struct Presenter {
    engine: Arc<PaginationEngine>,
    state_tx: watch::Sender<ViewState>,
    event_tx: mpsc::UnboundedSender<ViewEvent>,
    event_rx: Mutex<Option<mpsc::UnboundedReceiver<ViewEvent>>>,
}

impl Presenter {
    /// Create a presenter over an engine. Initial state is `Loading`.
    pub fn new(engine: Arc<PaginationEngine>) -> Self {
        let (state_tx, _) = watch::channel(ViewState::Loading);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            engine,
            state_tx,
            event_tx,
            event_rx: Mutex::new(Some(event_rx)),
        }
    }

    /// Subscribe to the view state. The receiver immediately holds the
    /// latest value, so late subscribers catch up without an extra push.
    pub fn state(&self) -> watch::Receiver<ViewState> {
        self.state_tx.subscribe()
    }

    /// The current view state
    pub fn current_state(&self) -> ViewState {
        self.state_tx.borrow().clone()
    }

    /// Take the one-shot event queue. Yields the receiver exactly once;
    /// events are never replayed to anyone else.
    pub fn events(&self) -> Option<mpsc::UnboundedReceiver<ViewEvent>> {
        self.event_rx
            .lock()
            .expect("event receiver lock poisoned")
            .take()
    }

    /// Perform the initial load. Call once after construction.
    pub async fn start(&self) {
        self.load().await;
    }

    /// Apply a user action. Actions that violate their guard conditions
    /// are silently ignored.
    pub async fn dispatch(&self, action: Action) {
        match action {
            Action::LoadMore => {
                if self.should_load_more() {
                    self.load().await;
                } else {
                    debug!("load-more ignored: guard conditions not met");
                }
            }
            Action::Retry => {
                if self.current_state().is_error() {
                    self.set_state(ViewState::Loading);
                    self.engine.reset();
                    self.load().await;
                } else {
                    debug!("retry ignored: not in a blocking error state");
                }
            }
        }
    }

    /// Load-more only makes sense once an initial page is on screen, more
    /// pages are advertised, and no fetch is already running.
    fn should_load_more(&self) -> bool {
        if self.engine.is_in_flight() {
            return false;
        }
        match &*self.state_tx.borrow() {
            ViewState::Success(feed) => feed.has_more,
            _ => false,
        }
    }

    async fn load(&self) {
        // None means the call was coalesced with a fetch already in
        // flight; that signals nothing to the UI.
        let Some(result) = self.engine.load_next().await else {
            return;
        };

        match result {
            Ok(feed) => self.set_state(ViewState::Success(feed)),
            Err(reason) => self.apply_failure(reason),
        }
    }

    fn apply_failure(&self, reason: Error) {
        let showing_data = self.current_state().is_success();

        match reason {
            Error::NoInternet => {
                if showing_data {
                    self.emit(ViewEvent::ShowTransientError(
                        MSG_NETWORK_UNAVAILABLE.to_string(),
                    ));
                } else {
                    self.set_state(ViewState::Error(MSG_NETWORK_UNAVAILABLE.to_string()));
                }
            }
            Error::NoMorePages => {
                // With no data on screen there is nothing to toast over
                // and nothing to degrade; the state stays as-is.
                if showing_data {
                    self.emit(ViewEvent::ShowTransientError(MSG_NO_MORE_ITEMS.to_string()));
                }
            }
            Error::Unknown { message } => {
                let message = if message.is_empty() {
                    MSG_UNEXPECTED.to_string()
                } else {
                    message
                };
                if showing_data {
                    self.emit(ViewEvent::ShowTransientError(message));
                } else {
                    self.set_state(ViewState::Error(message));
                }
            }
        }
    }

    fn set_state(&self, state: ViewState) {
        // send_replace delivers even when no receiver is subscribed yet.
        self.state_tx.send_replace(state);
    }

    fn emit(&self, event: ViewEvent) {
        // A closed queue means the consumer went away; one-shot events
        // are droppable by definition.
        let _ = self.event_tx.send(event);
    }
}

impl std::fmt::Debug for Presenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presenter")
            .field("state", &self.current_state())
            .finish_non_exhaustive()
    }
}

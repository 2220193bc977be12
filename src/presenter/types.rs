//! Presentation state, actions, and one-shot events

use crate::types::Feed;

/// User-facing message for pre-flight connectivity failures
pub const MSG_NETWORK_UNAVAILABLE: &str = "network unavailable";
/// User-facing message for an exhausted feed
pub const MSG_NO_MORE_ITEMS: &str = "no more items";
/// Fallback when an unknown failure carries no diagnostic
pub const MSG_UNEXPECTED: &str = "an unexpected error occurred";

/// User actions the presenter reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Request the next page of the feed
    LoadMore,
    /// Restart after a blocking error
    Retry,
}

/// What the UI should currently render. Exactly one state is active at a
/// time; the latest value is replayed to late subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// A load is in progress and there is nothing to show yet
    Loading,
    /// Data is on screen
    Success(Feed),
    /// The initial load failed; a retry affordance should be offered
    Error(String),
}

impl ViewState {
    /// Check if this is the loading state
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if data is currently shown
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Check if this is the blocking error state
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// One-shot notifications. Delivered to the single active consumer at
/// most once and never replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Show a transient, non-blocking error (e.g. a toast)
    ShowTransientError(String),
}

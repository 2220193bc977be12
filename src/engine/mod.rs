//! Pagination engine
//!
//! The core state machine. Owns the page cursor, the accumulated item
//! list, the "more pages available" flag, and the single-flight guard;
//! orchestrates connectivity gate → remote source → mapper.
//!
//! # Invariants
//!
//! - The cursor advances by exactly one per successful non-empty fetch
//!   and never moves otherwise (except back to the start via [`reset`]).
//! - The accumulator only grows within a session.
//! - `has_more` only transitions `true → false` within a session.
//! - At most one fetch is in flight at any time; concurrent callers are
//!   coalesced, never duplicated.
//! - Failed fetches mutate nothing. Only a successful non-empty page
//!   commits state.
//!
//! [`reset`]: PaginationEngine::reset

mod types;

pub use types::FeedSnapshot;

use crate::connectivity::ConnectivityGate;
use crate::error::{Error, Result};
use crate::mapper;
use crate::source::PageSource;
use crate::types::Feed;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// Clears the in-flight flag on every exit path, including cancellation
/// (dropping the `load_next` future mid-await runs this drop).
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Incremental loader for a paginated feed
pub struct PaginationEngine {
    source: Arc<dyn PageSource>,
    gate: Arc<dyn ConnectivityGate>,
    state: Mutex<FeedSnapshot>,
    in_flight: AtomicBool,
}

impl PaginationEngine {
    /// Create an engine over a source and a connectivity gate
    pub fn new(source: Arc<dyn PageSource>, gate: Arc<dyn ConnectivityGate>) -> Self {
        Self {
            source,
            gate,
            state: Mutex::new(FeedSnapshot::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Load the next page and fold it into the accumulated feed.
    ///
    /// Returns `None` when a fetch is already in flight: the call is
    /// coalesced without issuing a duplicate request, and the caller must
    /// not read anything into it. Otherwise returns the outcome:
    ///
    /// - `Ok(feed)`: the page was non-empty; `feed` carries the *full*
    ///   accumulated list, not just the new page.
    /// - `Err(NoMorePages)`: the feed is exhausted, either known up
    ///   front (no gate or source contact) or learned from an empty page.
    ///   An empty page is authoritative even when its metadata still
    ///   advertises a next pointer.
    /// - `Err(NoInternet)`: the pre-flight connectivity check failed; no
    ///   request was attempted.
    /// - `Err(Unknown)`: transport or decode failure, state untouched.
    pub async fn load_next(&self) -> Option<Result<Feed>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            debug!("load coalesced: a fetch is already in flight");
            return None;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let (cursor, epoch) = {
            let state = self.lock_state();
            if !state.has_more {
                debug!("load rejected: feed already exhausted");
                return Some(Err(Error::NoMorePages));
            }
            (state.cursor, state.epoch)
        };

        // Re-checked on every attempt, never cached.
        if !self.gate.is_available() {
            warn!(page = cursor, "load rejected: network unavailable");
            return Some(Err(Error::NoInternet));
        }

        let raw = match self.source.fetch_page(cursor).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(page = cursor, error = %e, "page fetch failed");
                return Some(Err(e));
            }
        };
        let page = mapper::to_page(&raw, cursor);

        let mut state = self.lock_state();
        if state.epoch != epoch {
            // reset() landed while the fetch was in flight; the page
            // belongs to a session that no longer exists.
            debug!(page = cursor, "load discarded: engine was reset mid-fetch");
            return Some(Err(Error::unknown("feed was reset during the fetch")));
        }

        if page.is_empty() {
            state.has_more = false;
            debug!(page = cursor, "empty page: marking feed exhausted");
            return Some(Err(Error::NoMorePages));
        }

        state.accumulated.extend(page.items);
        state.has_more = page.has_next;
        state.cursor += 1;
        debug!(
            page = cursor,
            total = state.accumulated.len(),
            has_more = state.has_more,
            "page committed"
        );

        Some(Ok(state.feed()))
    }

    /// Re-initialize the session: cursor back to the first page, empty
    /// accumulator, `has_more = true`.
    ///
    /// Synchronous and safe to call at any time; a fetch that was in
    /// flight when the reset happened commits nothing.
    pub fn reset(&self) {
        let mut state = self.lock_state();
        let next_epoch = state.epoch + 1;
        *state = FeedSnapshot::with_epoch(next_epoch);
        debug!("engine reset");
    }

    /// Read-only view of the accumulated feed
    pub fn snapshot(&self) -> Feed {
        self.lock_state().feed()
    }

    /// Whether a fetch is currently in flight
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn lock_state(&self) -> MutexGuard<'_, FeedSnapshot> {
        // Never held across an await and no panic path mutates state, so
        // poisoning would indicate a bug rather than a recoverable state.
        self.state.lock().expect("feed state lock poisoned")
    }
}

impl std::fmt::Debug for PaginationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationEngine")
            .field("state", &self.lock_state().clone())
            .field("in_flight", &self.is_in_flight())
            .finish_non_exhaustive()
    }
}

//! Engine state types

use crate::types::{Feed, Item, FIRST_PAGE};

/// The complete machine state of a pagination session.
///
/// Replaced as a unit under the engine's lock on every transition, so a
/// reader never observes a cursor that disagrees with the accumulator.
/// The `epoch` ties an in-flight fetch to the session it was issued in: a
/// `reset()` bumps it, and a fetch that lands afterwards commits nothing.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    /// Next page index to request (1-indexed)
    pub cursor: u32,
    /// Everything fetched so far, in fetch order. Append-only within a
    /// session.
    pub accumulated: Vec<Item>,
    /// Whether another page can still be requested
    pub has_more: bool,
    /// Session counter, bumped by `reset()`
    pub epoch: u64,
}

impl FeedSnapshot {
    /// Fresh session state
    pub fn new() -> Self {
        Self::with_epoch(0)
    }

    pub(crate) fn with_epoch(epoch: u64) -> Self {
        Self {
            cursor: FIRST_PAGE,
            accumulated: Vec::new(),
            has_more: true,
            epoch,
        }
    }

    /// View of the accumulated feed
    pub fn feed(&self) -> Feed {
        Feed {
            items: self.accumulated.clone(),
            has_more: self.has_more,
        }
    }
}

impl Default for FeedSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

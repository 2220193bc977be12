//! Domain records shared across the crate
//!
//! These are the normalized shapes the engine and presenter work with,
//! independent of the wire format (see `source::types` for that).

/// The first page index of the upstream feed (pages are 1-indexed)
pub const FIRST_PAGE: u32 = 1;

/// A single feed record. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique, stable identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Free-form status label
    pub status: String,
    /// Species label
    pub species: String,
    /// Gender label
    pub gender: String,
    /// URL of the item's image
    pub image_url: String,
}

/// One successfully fetched page of the feed.
///
/// `has_next` is derived from the presence of a "next" pointer in the
/// upstream pagination metadata, not from the item count. A page can
/// therefore be empty and still claim a next pointer; whether to trust
/// that claim is the engine's call, not the page's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// The page number that was requested to produce this page
    pub number: u32,
    /// Records on this page, in upstream order
    pub items: Vec<Item>,
    /// Whether the upstream metadata advertised a following page
    pub has_next: bool,
}

impl Page {
    /// Check if this page carries no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// A snapshot of everything fetched so far, handed to callers on success.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feed {
    /// All accumulated records, in fetch order
    pub items: Vec<Item>,
    /// Whether another page can still be requested
    pub has_more: bool,
}

impl Feed {
    /// Number of accumulated records
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing has been fetched yet
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

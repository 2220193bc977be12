//! Wire entities for the remote feed API
//!
//! These mirror the upstream JSON shape exactly; everything downstream of
//! the mapper works with the normalized records in `crate::types` instead.

use serde::Deserialize;

/// Top-level body of `GET /items?page={n}`
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    /// Pagination metadata
    pub info: PageInfo,
    /// Records on this page
    pub results: Vec<ItemRecord>,
}

/// Upstream pagination metadata.
///
/// Only the presence of `next` matters to the mapper; its value is an
/// opaque URL the engine never follows (pages are addressed by number).
#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    /// Total record count across all pages
    pub count: u64,
    /// Total page count
    pub pages: u32,
    /// URL of the following page, absent on the last page
    pub next: Option<String>,
    /// URL of the preceding page, absent on the first page
    pub prev: Option<String>,
}

/// A single record as the API serves it
#[derive(Debug, Clone, Deserialize)]
#[allow(missing_docs)]
pub struct ItemRecord {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub species: String,
    pub gender: String,
    pub image: String,
}

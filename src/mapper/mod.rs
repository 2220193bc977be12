//! Response mapper
//!
//! Converts a raw wire response plus the requested page number into a
//! normalized [`Page`]. Pure and infallible: structural validation already
//! happened in the source, so by the time a response reaches the mapper it
//! is known to be well-formed.

use crate::source::{FeedResponse, ItemRecord};
use crate::types::{Item, Page};

/// Map a raw response to a normalized page.
///
/// The requested page number is an explicit input because the response
/// body does not echo which page was asked for. `has_next` comes from the
/// presence of the upstream "next" pointer, never from the item count;
/// an empty page with a next pointer still maps to `has_next = true`.
pub fn to_page(response: &FeedResponse, requested_page: u32) -> Page {
    Page {
        number: requested_page,
        items: response.results.iter().map(to_item).collect(),
        has_next: response.info.next.is_some(),
    }
}

fn to_item(record: &ItemRecord) -> Item {
    Item {
        id: record.id,
        name: record.name.clone(),
        status: record.status.clone(),
        species: record.species.clone(),
        gender: record.gender.clone(),
        image_url: record.image.clone(),
    }
}

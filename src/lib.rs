//! # pagefeed
//!
//! A minimal, Rust-native engine for incrementally loading paginated HTTP
//! feeds. It fetches a remote collection one page at a time, accumulates
//! the records in memory, and exposes a presentation-ready state machine
//! (loading / success / error plus one-shot notifications) to a UI layer.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagefeed::connectivity::TcpProbeGate;
//! use pagefeed::engine::PaginationEngine;
//! use pagefeed::presenter::{Action, Presenter};
//! use pagefeed::source::RemoteSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> pagefeed::Result<()> {
//!     let source = RemoteSource::for_base_url("https://api.example.com")?;
//!     let engine = PaginationEngine::new(Arc::new(source), Arc::new(TcpProbeGate::default()));
//!     let presenter = Presenter::new(Arc::new(engine));
//!
//!     let mut state = presenter.state();
//!     presenter.start().await;
//!
//!     // ... render `state`, forward UI actions:
//!     presenter.dispatch(Action::LoadMore).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Action ──→ PaginationEngine ──→ Presenter ──→ ViewState / ViewEvent
//!                 │
//!       ┌─────────┼──────────┐
//!       ▼         ▼          ▼
//!  Connectivity  Remote   Response
//!     Gate       Source    Mapper
//! ```
//!
//! Data flows one way. The engine owns the page cursor, the accumulator,
//! and the single-flight guard; the presenter folds engine results and
//! user actions into what the UI should render.

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module declarations
// ============================================================================

/// Failure taxonomy
pub mod error;

/// Domain records shared across the crate
pub mod types;

/// Pre-flight connectivity checks
pub mod connectivity;

/// HTTP feed source and wire entities
pub mod source;

/// Wire response → domain page mapping
pub mod mapper;

/// The core pagination state machine
pub mod engine;

/// Presentation reducer: view state and one-shot events
pub mod presenter;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{Feed, Item, Page, FIRST_PAGE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

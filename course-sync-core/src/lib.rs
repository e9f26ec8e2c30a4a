//! Schedule data model, row projections, and feed loading.
//!
//! This crate defines the in-memory model of one schedule scrape without any
//! database or network dependencies. `course-sync-fetch` enriches it,
//! `course-sync-import` derives rows and blueprints from it, and
//! `course-sync-db` persists those rows.

pub mod feed;
pub mod rows;
pub mod types;
pub mod validate;

pub use feed::{FeedError, load_feed, parse_feed};
pub use rows::*;
pub use types::*;
pub use validate::{ConsistencyError, check_unique_crns};

//! Turn a scraped schedule into synchronized database tables.
//!
//! This crate owns the logic between the fetcher and the database: matching
//! sections to their lectures, aggregating course blueprints, projecting the
//! schedule onto table rows, and running the per-table sync passes.

pub mod blueprint;
pub mod export;
pub mod pipeline;
pub mod progress;
pub mod resolve;
pub mod rows;

pub use blueprint::{TITLE_DISTANCE_THRESHOLD, choose_title, compute_blueprints};
pub use export::{ExportError, write_blueprints_csv, write_courses_csv};
pub use pipeline::{
    DEFAULT_WORKERS, PipelineError, SyncOptions, SyncReport, fetch_catalog, reconcile_rows,
    sync_schedule,
};
pub use progress::{LogProgress, SilentProgress, SyncProgress};
pub use resolve::{ResolveError, resolve_lecture};
pub use rows::{TableRows, build_rows};

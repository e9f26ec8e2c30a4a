pub mod client;
pub mod error;
pub mod pool;
pub mod source;
pub mod table;

pub use client::{HttpDescriptionSource, HttpOptions};
pub use error::FetchError;
pub use pool::{PoolOutcome, WorkerPool};
pub use source::{DescriptionSource, StaticDescriptionSource};
pub use table::{CourseTable, build_course_table};

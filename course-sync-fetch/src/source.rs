//! Where course descriptions come from.

use std::collections::HashMap;
use std::future::Future;

use course_sync_core::{RawCourse, blueprint_key};

use crate::error::FetchError;

/// A source of free-text course descriptions.
///
/// Each call is an independent, possibly failing, I/O-bound lookup. The pool
/// calls this from many tasks at once, so implementations must be shareable.
pub trait DescriptionSource: Send + Sync {
    fn fetch_description(
        &self,
        course: &RawCourse,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Descriptions held in memory, keyed by subject and course number.
///
/// Used for offline runs and tests. Lookups ignore subject case, matching
/// the blueprint grouping key.
#[derive(Debug, Default, Clone)]
pub struct StaticDescriptionSource {
    descriptions: HashMap<(String, String), String>,
    fallback: Option<String>,
}

impl StaticDescriptionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Description returned for courses with no entry, instead of `NotFound`.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    pub fn insert(&mut self, subject: &str, course_num: &str, description: impl Into<String>) {
        self.descriptions
            .insert(blueprint_key(subject, course_num), description.into());
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    fn lookup(&self, course: &RawCourse) -> Result<String, FetchError> {
        self.descriptions
            .get(&blueprint_key(&course.subject, &course.course_num))
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                subject: course.subject.clone(),
                course_num: course.course_num.clone(),
            })
    }
}

impl DescriptionSource for StaticDescriptionSource {
    fn fetch_description(
        &self,
        course: &RawCourse,
    ) -> impl Future<Output = Result<String, FetchError>> + Send {
        let result = self.lookup(course);
        async move { result }
    }
}

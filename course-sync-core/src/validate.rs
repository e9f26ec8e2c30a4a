//! Consistency checks run on a scrape before anything is persisted.

use std::collections::HashSet;

use thiserror::Error;

use crate::types::{Crn, RawCourse};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("Duplicate CRN {crn} in scrape ({first} and {second})")]
    DuplicateCrn {
        crn: Crn,
        first: String,
        second: String,
    },
}

/// Fail on the first CRN that appears more than once.
///
/// A repeated CRN means the upstream scrape is corrupt; nothing downstream
/// can safely key on it.
pub fn check_unique_crns(courses: &[RawCourse]) -> Result<(), ConsistencyError> {
    let mut seen: HashSet<Crn> = HashSet::with_capacity(courses.len());
    for (i, course) in courses.iter().enumerate() {
        if !seen.insert(course.crn) {
            let first = courses[..i]
                .iter()
                .find(|c| c.crn == course.crn)
                .map(RawCourse::label)
                .unwrap_or_default();
            return Err(ConsistencyError::DuplicateCrn {
                crn: course.crn,
                first,
                second: course.label(),
            });
        }
    }
    Ok(())
}

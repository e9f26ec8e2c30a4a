//! Match discussion and lab sections to the lecture that owns them.
//!
//! The schedule lists each lecture followed by the sections that belong to
//! it, so ownership is positional: a subcourse belongs to the lecture that
//! opens the block it sits in.

use course_sync_core::{Crn, RawCourse};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No lecture block contains section {crn}")]
    NotFound { crn: Crn },
}

/// Outcome of scanning one lecture block.
enum BlockScan {
    Found,
    /// Not in this block; resume the outer scan at this index.
    Missed { resume_at: usize },
}

/// Find the lecture in `ordered` whose block contains `subcourse`.
///
/// Scans for a lecture-type offering of the same subject and course number,
/// then walks the non-lecture offerings that follow it. A block that ends
/// without containing the subcourse's CRN is skipped entirely, and the
/// search continues after it.
pub fn resolve_lecture<'a>(
    subcourse: &RawCourse,
    ordered: &'a [RawCourse],
) -> Result<&'a RawCourse, ResolveError> {
    let mut i = 0;
    while i < ordered.len() {
        let candidate = &ordered[i];
        if !(candidate.kind.is_lecture_type() && candidate.same_course(subcourse)) {
            i += 1;
            continue;
        }

        match scan_block(subcourse, ordered, i) {
            BlockScan::Found => return Ok(candidate),
            BlockScan::Missed { resume_at } => i = resume_at,
        }
    }

    Err(ResolveError::NotFound { crn: subcourse.crn })
}

/// Walk the block opened by the lecture at `start`.
fn scan_block(subcourse: &RawCourse, ordered: &[RawCourse], start: usize) -> BlockScan {
    let lecture = &ordered[start];
    let mut j = start + 1;
    while j < ordered.len() {
        let entry = &ordered[j];
        if entry.kind.is_lecture_type() || !entry.same_course(lecture) {
            break;
        }
        if entry.crn == subcourse.crn {
            return BlockScan::Found;
        }
        j += 1;
    }
    BlockScan::Missed { resume_at: j }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_sync_core::ActivityKind;

    fn offering(crn: Crn, kind: ActivityKind, subject: &str, num: &str) -> RawCourse {
        RawCourse {
            subject: subject.to_string(),
            course_num: num.to_string(),
            crn,
            kind,
            section: String::new(),
            title: String::new(),
            units: String::new(),
            days: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            building: String::new(),
            room: String::new(),
            capacity: 0,
            enrolled: 0,
            instructor: None,
        }
    }

    #[test]
    fn discussion_after_its_lecture() {
        let ordered = vec![
            offering(100, ActivityKind::Lecture, "CS", "10"),
            offering(101, ActivityKind::Discussion, "CS", "10"),
            offering(102, ActivityKind::Lecture, "MATH", "5"),
        ];
        let found = resolve_lecture(&ordered[1], &ordered).unwrap();
        assert_eq!(found.crn, 100);
    }

    #[test]
    fn second_block_of_same_course() {
        let ordered = vec![
            offering(100, ActivityKind::Lecture, "CS", "10"),
            offering(101, ActivityKind::Discussion, "CS", "10"),
            offering(110, ActivityKind::Lecture, "CS", "10"),
            offering(111, ActivityKind::Discussion, "CS", "10"),
            offering(112, ActivityKind::Lab, "CS", "10"),
        ];
        assert_eq!(resolve_lecture(&ordered[4], &ordered).unwrap().crn, 110);
        assert_eq!(resolve_lecture(&ordered[1], &ordered).unwrap().crn, 100);
    }

    #[test]
    fn seminar_opens_a_block() {
        let ordered = vec![
            offering(200, ActivityKind::Seminar, "PHIL", "199"),
            offering(201, ActivityKind::Studio, "PHIL", "199"),
        ];
        assert_eq!(resolve_lecture(&ordered[1], &ordered).unwrap().crn, 200);
    }

    #[test]
    fn block_ends_at_other_course() {
        let ordered = vec![
            offering(100, ActivityKind::Lecture, "CS", "10"),
            offering(300, ActivityKind::Discussion, "CS", "11"),
        ];
        let err = resolve_lecture(&ordered[1], &ordered).unwrap_err();
        assert_eq!(err, ResolveError::NotFound { crn: 300 });
    }

    #[test]
    fn orphan_section_is_not_found() {
        let ordered = vec![
            offering(101, ActivityKind::Discussion, "CS", "10"),
            offering(100, ActivityKind::Lecture, "CS", "10"),
        ];
        assert!(resolve_lecture(&ordered[0], &ordered).is_err());
    }

    #[test]
    fn subcourse_absent_from_list() {
        let ordered = vec![offering(100, ActivityKind::Lecture, "CS", "10")];
        let stray = offering(999, ActivityKind::Lab, "CS", "10");
        assert_eq!(
            resolve_lecture(&stray, &ordered).unwrap_err(),
            ResolveError::NotFound { crn: 999 }
        );
    }

    #[test]
    fn exam_rows_do_not_break_block() {
        let ordered = vec![
            offering(100, ActivityKind::Lecture, "CS", "10"),
            offering(105, ActivityKind::FinalExam, "CS", "10"),
            offering(101, ActivityKind::Discussion, "CS", "10"),
        ];
        assert_eq!(resolve_lecture(&ordered[2], &ordered).unwrap().crn, 100);
    }
}

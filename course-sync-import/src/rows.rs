//! Project a scrape onto the rows of every synchronized table.

use std::collections::{BTreeMap, HashMap};

use course_sync_core::{
    CatalogEntry, CourseRow, Crn, ExamRow, InstructorRow, LectureRow, RawCourse, SubCourseRow,
    instructor_id, instructor_name,
};

use crate::resolve::resolve_lecture;

/// Fresh rows for one sync run, one vector per table.
#[derive(Debug, Default, Clone)]
pub struct TableRows {
    /// Deduplicated by id, ascending.
    pub instructors: Vec<InstructorRow>,
    pub courses: Vec<CourseRow>,
    pub lectures: Vec<LectureRow>,
    pub subcourses: Vec<SubCourseRow>,
    pub exams: Vec<ExamRow>,
    /// Subcourses stored without a parent lecture.
    pub unresolved: usize,
}

impl TableRows {
    pub fn total(&self) -> usize {
        self.instructors.len()
            + self.courses.len()
            + self.lectures.len()
            + self.subcourses.len()
            + self.exams.len()
    }
}

/// Build every table's rows from the ordered schedule.
///
/// `courses` must keep schedule order; the lecture resolver depends on it.
/// Descriptions come from `entries` by CRN. A course whose description
/// fetch failed still gets a course row, with no description; the course
/// sync keeps any description already stored for it.
///
/// Each subcourse is resolved by rescanning `courses`, so this is
/// O(subcourses × courses). Fine for one campus term.
pub fn build_rows(courses: &[RawCourse], entries: &[CatalogEntry]) -> TableRows {
    let descriptions: HashMap<Crn, &str> = entries
        .iter()
        .map(|e| (e.course.crn, e.description.as_str()))
        .collect();

    let mut instructors: BTreeMap<i64, InstructorRow> = BTreeMap::new();
    let mut rows = TableRows::default();

    for course in courses {
        let name = instructor_name(course);
        instructors
            .entry(instructor_id(name))
            .or_insert_with(|| InstructorRow::from_name(name));

        let description = descriptions.get(&course.crn).copied();
        rows.courses.push(CourseRow::from_raw(course, description));

        if course.kind.is_lecture_type() {
            rows.lectures.push(LectureRow::from_raw(course));
        } else if course.kind.is_subcourse() {
            let parent = match resolve_lecture(course, courses) {
                Ok(lecture) => Some(lecture.crn),
                Err(e) => {
                    log::debug!("{}: {}", course.label(), e);
                    rows.unresolved += 1;
                    None
                }
            };
            rows.subcourses.push(SubCourseRow::from_raw(course, parent));
        } else if course.kind.is_exam() {
            rows.exams.push(ExamRow::from_raw(course));
        }
    }

    rows.instructors = instructors.into_values().collect();

    if rows.unresolved > 0 {
        log::warn!(
            "{} of {} sections have no parent lecture",
            rows.unresolved,
            rows.subcourses.len()
        );
    }

    rows
}

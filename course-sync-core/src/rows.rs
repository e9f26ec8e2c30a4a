//! Persisted row projections of a scrape.
//!
//! Each row type maps one-to-one onto a table in the sync database. The
//! projections are pure: they never look anything up, so the same scrape
//! always yields the same rows.

use crate::types::{ActivityKind, Crn, RawCourse};

/// Parent CRN recorded for a subcourse whose lecture could not be found.
pub const UNRESOLVED_PARENT: Crn = 0;

/// Placeholder instructor name used by the schedule for unassigned sections.
pub const STAFF_NAME: &str = "Staff";

/// Reserved id for [`STAFF_NAME`].
pub const STAFF_ID: i64 = 1;

/// Derive the stable instructor id for a name.
///
/// `"Staff"` is always 1; any other name is the CRC-32 of its UTF-8 bytes,
/// so the same name yields the same id on every run.
pub fn instructor_id(name: &str) -> i64 {
    if name == STAFF_NAME {
        STAFF_ID
    } else {
        i64::from(crc32fast::hash(name.as_bytes()))
    }
}

/// Normalize the feed's instructor field; blank or missing means staff.
pub fn instructor_name(course: &RawCourse) -> &str {
    match course.instructor.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => STAFF_NAME,
    }
}

// ── Instructor ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorRow {
    pub id: i64,
    pub name: String,
}

impl InstructorRow {
    pub fn from_name(name: &str) -> Self {
        Self {
            id: instructor_id(name),
            name: name.to_string(),
        }
    }
}

// ── Course ──────────────────────────────────────────────────────────────────

/// One offering in the `course` table. Every other per-CRN table references it.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRow {
    pub crn: Crn,
    pub subject: String,
    pub course_num: String,
    pub kind: ActivityKind,
    pub title: String,
    pub units: String,
    pub description: Option<String>,
}

impl CourseRow {
    pub fn from_raw(course: &RawCourse, description: Option<&str>) -> Self {
        Self {
            crn: course.crn,
            subject: course.subject.clone(),
            course_num: course.course_num.clone(),
            kind: course.kind,
            title: course.title.clone(),
            units: course.units.clone(),
            description: description.map(str::to_string),
        }
    }
}

// ── Lecture ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureRow {
    pub crn: Crn,
    pub section: String,
    pub days: String,
    pub start_time: String,
    pub end_time: String,
    pub start_date: String,
    pub end_date: String,
    pub building: String,
    pub room: String,
    pub capacity: i64,
    pub enrolled: i64,
    pub instructor_id: i64,
}

impl LectureRow {
    pub fn from_raw(course: &RawCourse) -> Self {
        Self {
            crn: course.crn,
            section: course.section.clone(),
            days: course.days.clone(),
            start_time: course.start_time.clone(),
            end_time: course.end_time.clone(),
            start_date: course.start_date.clone(),
            end_date: course.end_date.clone(),
            building: course.building.clone(),
            room: course.room.clone(),
            capacity: course.capacity,
            enrolled: course.enrolled,
            instructor_id: instructor_id(instructor_name(course)),
        }
    }
}

// ── Sub-course ──────────────────────────────────────────────────────────────

/// A discussion, lab, studio or fieldwork section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCourseRow {
    pub crn: Crn,
    pub kind: ActivityKind,
    pub section: String,
    pub days: String,
    pub start_time: String,
    pub end_time: String,
    pub start_date: String,
    pub end_date: String,
    pub building: String,
    pub room: String,
    pub capacity: i64,
    pub enrolled: i64,
    pub instructor_id: i64,
    /// CRN of the owning lecture, or [`UNRESOLVED_PARENT`].
    pub parent_lecture_crn: Crn,
}

impl SubCourseRow {
    pub fn from_raw(course: &RawCourse, parent: Option<Crn>) -> Self {
        Self {
            crn: course.crn,
            kind: course.kind,
            section: course.section.clone(),
            days: course.days.clone(),
            start_time: course.start_time.clone(),
            end_time: course.end_time.clone(),
            start_date: course.start_date.clone(),
            end_date: course.end_date.clone(),
            building: course.building.clone(),
            room: course.room.clone(),
            capacity: course.capacity,
            enrolled: course.enrolled,
            instructor_id: instructor_id(instructor_name(course)),
            parent_lecture_crn: parent.unwrap_or(UNRESOLVED_PARENT),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.parent_lecture_crn != UNRESOLVED_PARENT
    }
}

// ── Exam ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamRow {
    pub crn: Crn,
    pub kind: ActivityKind,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub building: String,
    pub room: String,
}

impl ExamRow {
    pub fn from_raw(course: &RawCourse) -> Self {
        Self {
            crn: course.crn,
            kind: course.kind,
            date: course.start_date.clone(),
            start_time: course.start_time.clone(),
            end_time: course.end_time.clone(),
            building: course.building.clone(),
            room: course.room.clone(),
        }
    }
}

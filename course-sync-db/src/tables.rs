//! Static column maps for every synchronized table.
//!
//! Each row type declares its table, primary key and column order exactly
//! once. [`SyncRow::values`] must yield values in `TableSpec::columns` order;
//! the column lists must match the `CREATE TABLE` statements in `schema.rs`.

use course_sync_core::{CourseRow, ExamRow, InstructorRow, LectureRow, SubCourseRow};
use rusqlite::types::Value;

/// Shape of one synchronized table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    /// Integer primary-key column. Always the first entry of `columns`.
    pub key: &'static str,
    pub columns: &'static [&'static str],
    /// Columns where a staged NULL keeps the stored value instead of
    /// overwriting it.
    pub keep_on_null: &'static [&'static str],
}

impl TableSpec {
    pub fn staging_name(&self) -> String {
        format!("{}_staging", self.name)
    }

    /// Columns copied from staging on update: everything but the key.
    pub fn tracked_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().copied().filter(|c| *c != self.key)
    }

    pub fn keeps_on_null(&self, column: &str) -> bool {
        self.keep_on_null.contains(&column)
    }
}

/// A row that can be reconciled into its table.
pub trait SyncRow {
    const TABLE: TableSpec;

    fn key(&self) -> i64;

    fn values(&self) -> Vec<Value>;
}

pub const INSTRUCTOR: TableSpec = TableSpec {
    name: "instructor",
    key: "id",
    columns: &["id", "name"],
    keep_on_null: &[],
};

pub const COURSE: TableSpec = TableSpec {
    name: "course",
    key: "crn",
    columns: &[
        "crn",
        "subject",
        "course_num",
        "kind",
        "title",
        "units",
        "description",
    ],
    // A failed description fetch must not erase a stored description.
    keep_on_null: &["description"],
};

pub const LECTURES: TableSpec = TableSpec {
    name: "lectures",
    key: "crn",
    columns: &[
        "crn",
        "section",
        "days",
        "start_time",
        "end_time",
        "start_date",
        "end_date",
        "building",
        "room",
        "capacity",
        "enrolled",
        "instructor_id",
    ],
    keep_on_null: &[],
};

pub const LABS_DISCUSSIONS: TableSpec = TableSpec {
    name: "labs_discussions",
    key: "crn",
    columns: &[
        "crn",
        "kind",
        "section",
        "days",
        "start_time",
        "end_time",
        "start_date",
        "end_date",
        "building",
        "room",
        "capacity",
        "enrolled",
        "instructor_id",
        "parent_lecture_crn",
    ],
    keep_on_null: &[],
};

pub const EXAM: TableSpec = TableSpec {
    name: "exam",
    key: "crn",
    columns: &[
        "crn",
        "kind",
        "date",
        "start_time",
        "end_time",
        "building",
        "room",
    ],
    keep_on_null: &[],
};

/// Tables in the order they must be synchronized. Later tables reference
/// earlier ones by foreign key.
pub const SYNC_ORDER: [TableSpec; 5] = [INSTRUCTOR, COURSE, LECTURES, LABS_DISCUSSIONS, EXAM];

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

impl SyncRow for InstructorRow {
    const TABLE: TableSpec = INSTRUCTOR;

    fn key(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![Value::Integer(self.id), text(&self.name)]
    }
}

impl SyncRow for CourseRow {
    const TABLE: TableSpec = COURSE;

    fn key(&self) -> i64 {
        self.crn
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.crn),
            text(&self.subject),
            text(&self.course_num),
            text(self.kind.as_code()),
            text(&self.title),
            text(&self.units),
            self.description.as_deref().map_or(Value::Null, text),
        ]
    }
}

impl SyncRow for LectureRow {
    const TABLE: TableSpec = LECTURES;

    fn key(&self) -> i64 {
        self.crn
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.crn),
            text(&self.section),
            text(&self.days),
            text(&self.start_time),
            text(&self.end_time),
            text(&self.start_date),
            text(&self.end_date),
            text(&self.building),
            text(&self.room),
            Value::Integer(self.capacity),
            Value::Integer(self.enrolled),
            Value::Integer(self.instructor_id),
        ]
    }
}

impl SyncRow for SubCourseRow {
    const TABLE: TableSpec = LABS_DISCUSSIONS;

    fn key(&self) -> i64 {
        self.crn
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.crn),
            text(self.kind.as_code()),
            text(&self.section),
            text(&self.days),
            text(&self.start_time),
            text(&self.end_time),
            text(&self.start_date),
            text(&self.end_date),
            text(&self.building),
            text(&self.room),
            Value::Integer(self.capacity),
            Value::Integer(self.enrolled),
            Value::Integer(self.instructor_id),
            Value::Integer(self.parent_lecture_crn),
        ]
    }
}

impl SyncRow for ExamRow {
    const TABLE: TableSpec = EXAM;

    fn key(&self) -> i64 {
        self.crn
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.crn),
            text(self.kind.as_code()),
            text(&self.date),
            text(&self.start_time),
            text(&self.end_time),
            text(&self.building),
            text(&self.room),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_sync_core::ActivityKind;

    #[test]
    fn key_is_first_column() {
        for table in SYNC_ORDER {
            assert_eq!(table.columns[0], table.key, "{}", table.name);
            assert!(!table.tracked_columns().any(|c| c == table.key));
        }
    }

    #[test]
    fn keep_on_null_columns_are_tracked() {
        for table in SYNC_ORDER {
            for column in table.keep_on_null {
                assert!(table.tracked_columns().any(|c| c == *column), "{column}");
            }
        }
        assert!(COURSE.keeps_on_null("description"));
        assert!(!COURSE.keeps_on_null("title"));
    }

    #[test]
    fn value_count_matches_columns() {
        let exam = ExamRow {
            crn: 9,
            kind: ActivityKind::FinalExam,
            date: "2026-12-10".to_string(),
            start_time: "08:00".to_string(),
            end_time: "10:59".to_string(),
            building: "PETER".to_string(),
            room: "108".to_string(),
        };
        assert_eq!(exam.values().len(), EXAM.columns.len());

        let instructor = InstructorRow::from_name("Staff");
        assert_eq!(instructor.values().len(), INSTRUCTOR.columns.len());
        assert_eq!(instructor.key(), 1);
    }
}

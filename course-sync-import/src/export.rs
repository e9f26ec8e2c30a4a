//! CSV export of blueprints and catalog rows.

use std::io::Write;

use course_sync_core::{Blueprint, CourseRow};
use course_sync_db::{COURSE, SyncRow};
use rusqlite::types::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub const BLUEPRINT_HEADER: [&str; 6] =
    ["subject", "course_num", "title", "capacity", "enrolled", "crns"];

/// Write one record per blueprint. Member CRNs are joined with `;`.
/// Returns the number of records written.
pub fn write_blueprints_csv<W: Write>(
    writer: W,
    blueprints: &[Blueprint],
) -> Result<usize, ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(BLUEPRINT_HEADER)?;

    for bp in blueprints {
        let crns = bp
            .crns
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(";");
        let capacity = bp.capacity.to_string();
        let enrolled = bp.enrolled.to_string();
        wtr.write_record([
            bp.subject.as_str(),
            bp.course_num.as_str(),
            bp.title.as_str(),
            capacity.as_str(),
            enrolled.as_str(),
            crns.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(blueprints.len())
}

/// Write course rows with the same columns as the `course` table.
pub fn write_courses_csv<W: Write>(writer: W, rows: &[CourseRow]) -> Result<usize, ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(COURSE.columns)?;

    for row in rows {
        wtr.write_record(row.values().iter().map(field))?;
    }

    wtr.flush()?;
    Ok(rows.len())
}

fn field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

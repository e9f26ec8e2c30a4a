//! JSON loading for scraped schedule feeds.
//!
//! A feed is either a single `.json` file holding an array of courses, or a
//! directory of such files (one per subject, typically). Directory entries
//! are read in file-name order and concatenated, so the schedule order the
//! scraper produced is preserved.

use std::path::Path;

use thiserror::Error;

use crate::types::RawCourse;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Feed not found: {0}")]
    NotFound(String),
}

/// Load a schedule feed from a file or a directory of files.
pub fn load_feed(path: &Path) -> Result<Vec<RawCourse>, FeedError> {
    if !path.exists() {
        return Err(FeedError::NotFound(path.display().to_string()));
    }
    if path.is_dir() {
        load_feed_dir(path)
    } else {
        load_feed_file(path)
    }
}

/// Parse a feed from an in-memory JSON string.
pub fn parse_feed(json: &str) -> Result<Vec<RawCourse>, serde_json::Error> {
    serde_json::from_str(json)
}

fn load_feed_file(path: &Path) -> Result<Vec<RawCourse>, FeedError> {
    let contents = std::fs::read_to_string(path).map_err(|e| FeedError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_feed(&contents).map_err(|e| FeedError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

fn load_feed_dir(dir: &Path) -> Result<Vec<RawCourse>, FeedError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| FeedError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut courses = Vec::new();
    for entry in entries {
        courses.extend(load_feed_file(&entry.path())?);
    }
    Ok(courses)
}

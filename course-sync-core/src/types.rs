//! Data model types for scraped schedules.
//!
//! These types describe one scrape of the schedule of classes: raw course
//! offerings as they arrive from the feed, the enriched catalog entries
//! produced by the fetcher, and the per-course blueprints derived from them.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Course reference number: the unique identifier of one scheduled offering.
pub type Crn = i64;

// ── Activity Kind ───────────────────────────────────────────────────────────

/// What kind of meeting an offering is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ActivityKind {
    Lecture,
    Seminar,
    Discussion,
    Lab,
    Studio,
    Fieldwork,
    FinalExam,
    Midterm,
}

impl ActivityKind {
    /// Two-letter schedule code, as used in the feed and stored in the database.
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Lecture => "LE",
            Self::Seminar => "SE",
            Self::Discussion => "DI",
            Self::Lab => "LA",
            Self::Studio => "ST",
            Self::Fieldwork => "FW",
            Self::FinalExam => "FI",
            Self::Midterm => "MI",
        }
    }

    /// Parse a schedule code or full activity name, case-insensitively.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "le" | "lect" | "lecture" => Some(Self::Lecture),
            "se" | "sem" | "seminar" => Some(Self::Seminar),
            "di" | "disc" | "discussion" => Some(Self::Discussion),
            "la" | "lab" | "laboratory" => Some(Self::Lab),
            "st" | "studio" => Some(Self::Studio),
            "fw" | "fieldwork" => Some(Self::Fieldwork),
            "fi" | "final" | "final exam" => Some(Self::FinalExam),
            "mi" | "midterm" => Some(Self::Midterm),
            _ => None,
        }
    }

    /// Lectures and seminars own a block of sections.
    pub fn is_lecture_type(&self) -> bool {
        matches!(self, Self::Lecture | Self::Seminar)
    }

    /// Sections that hang off a parent lecture.
    pub fn is_subcourse(&self) -> bool {
        matches!(self, Self::Discussion | Self::Lab | Self::Studio | Self::Fieldwork)
    }

    pub fn is_exam(&self) -> bool {
        matches!(self, Self::FinalExam | Self::Midterm)
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl TryFrom<String> for ActivityKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_code(&value).ok_or_else(|| format!("unknown activity kind '{value}'"))
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        kind.as_code().to_string()
    }
}

// ── Raw Course ──────────────────────────────────────────────────────────────

/// One scheduled offering as scraped from the schedule of classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCourse {
    pub subject: String,
    pub course_num: String,
    pub crn: Crn,
    pub kind: ActivityKind,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub days: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub capacity: i64,
    #[serde(default)]
    pub enrolled: i64,
    #[serde(default)]
    pub instructor: Option<String>,
}

impl RawCourse {
    /// True when both offerings belong to the same subject and course number.
    pub fn same_course(&self, other: &RawCourse) -> bool {
        self.subject == other.subject && self.course_num == other.course_num
    }

    /// Human-readable label such as `CSE 100 (LE A00)`.
    pub fn label(&self) -> String {
        format!(
            "{} {} ({} {})",
            self.subject, self.course_num, self.kind, self.section
        )
    }
}

// ── Catalog Entry ───────────────────────────────────────────────────────────

/// A raw course enriched with its fetched catalog description.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub course: RawCourse,
    pub description: String,
}

impl CatalogEntry {
    pub fn new(course: RawCourse, description: String) -> Self {
        Self {
            course,
            description,
        }
    }
}

// ── Blueprint ───────────────────────────────────────────────────────────────

/// Aggregate over every offering that shares a subject and course number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    /// Subject as it appeared on the first offering in the group.
    pub subject: String,
    pub course_num: String,
    pub title: String,
    pub capacity: i64,
    pub enrolled: i64,
    pub crns: BTreeSet<Crn>,
}

impl Blueprint {
    /// Grouping key: lowercase subject plus course number.
    pub fn key(&self) -> (String, String) {
        blueprint_key(&self.subject, &self.course_num)
    }
}

/// Build the grouping key used for blueprints.
pub fn blueprint_key(subject: &str, course_num: &str) -> (String, String) {
    (subject.to_lowercase(), course_num.to_string())
}

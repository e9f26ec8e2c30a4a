//! Aggregate catalog entries into one blueprint per course.

use std::collections::{BTreeMap, BTreeSet};

use course_sync_core::{Blueprint, CatalogEntry, blueprint_key};

/// Titles at least this far apart are treated as genuinely different.
pub const TITLE_DISTANCE_THRESHOLD: usize = 18;

/// Groups with this many distinct titles or more skip the comparison.
pub const MAX_COMPARED_TITLES: usize = 6;

struct Group {
    subject: String,
    course_num: String,
    titles: BTreeSet<String>,
    capacity: i64,
    enrolled: i64,
    crns: BTreeSet<i64>,
}

/// Build blueprints for every (subject, course number) group, sorted by key.
pub fn compute_blueprints(entries: &[CatalogEntry]) -> Vec<Blueprint> {
    let mut groups: BTreeMap<(String, String), Group> = BTreeMap::new();

    for entry in entries {
        let course = &entry.course;
        let group = groups
            .entry(blueprint_key(&course.subject, &course.course_num))
            .or_insert_with(|| Group {
                subject: course.subject.clone(),
                course_num: course.course_num.clone(),
                titles: BTreeSet::new(),
                capacity: 0,
                enrolled: 0,
                crns: BTreeSet::new(),
            });
        group.titles.insert(course.title.clone());
        group.capacity += course.capacity;
        group.enrolled += course.enrolled;
        group.crns.insert(course.crn);
    }

    groups
        .into_values()
        .map(|group| Blueprint {
            title: choose_title(&group.titles),
            subject: group.subject,
            course_num: group.course_num,
            capacity: group.capacity,
            enrolled: group.enrolled,
            crns: group.crns,
        })
        .collect()
}

/// Pick a display title from a group's distinct titles.
///
/// Near-duplicate spellings collapse to the first title; clearly different
/// titles (e.g. a cross-listed course) are joined.
pub fn choose_title(titles: &BTreeSet<String>) -> String {
    let mut iter = titles.iter();
    let Some(first) = iter.next() else {
        return String::new();
    };

    if titles.len() >= MAX_COMPARED_TITLES {
        log::debug!(
            "{} distinct titles for '{}', keeping the first",
            titles.len(),
            first
        );
        return first.clone();
    }

    match iter.next() {
        Some(second) if strsim::levenshtein(first, second) >= TITLE_DISTANCE_THRESHOLD => {
            format!("{first}, {second}")
        }
        _ => first.clone(),
    }
}

use course_sync_core::{ActivityKind, FeedError, load_feed, parse_feed};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_json(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

const CSE_FEED: &str = r#"[
  {
    "subject": "CSE",
    "course_num": "100",
    "crn": 40100,
    "kind": "LE",
    "section": "A00",
    "title": "Advanced Data Structures",
    "units": "4",
    "days": "MWF",
    "start_time": "10:00",
    "end_time": "10:50",
    "building": "CENTR",
    "room": "115",
    "capacity": 200,
    "enrolled": 187,
    "instructor": "Ada Lovelace"
  },
  {
    "subject": "CSE",
    "course_num": "100",
    "crn": 40101,
    "kind": "discussion",
    "section": "A01"
  }
]"#;

#[test]
fn parse_feed_reads_courses() {
    let courses = parse_feed(CSE_FEED).unwrap();
    assert_eq!(courses.len(), 2);

    let lecture = &courses[0];
    assert_eq!(lecture.crn, 40100);
    assert_eq!(lecture.kind, ActivityKind::Lecture);
    assert_eq!(lecture.capacity, 200);
    assert_eq!(lecture.instructor.as_deref(), Some("Ada Lovelace"));

    let discussion = &courses[1];
    assert_eq!(discussion.kind, ActivityKind::Discussion);
    assert_eq!(discussion.title, "");
    assert_eq!(discussion.capacity, 0);
    assert!(discussion.instructor.is_none());
}

#[test]
fn parse_feed_rejects_unknown_kind() {
    let json = r#"[{"subject": "CSE", "course_num": "1", "crn": 1, "kind": "XX"}]"#;
    let err = parse_feed(json).unwrap_err();
    assert!(err.to_string().contains("unknown activity kind"));
}

#[test]
fn load_feed_from_file() {
    let tmp = TempDir::new().unwrap();
    write_json(tmp.path(), "cse.json", CSE_FEED);

    let courses = load_feed(&tmp.path().join("cse.json")).unwrap();
    assert_eq!(courses.len(), 2);
}

#[test]
fn load_feed_dir_preserves_file_order() {
    let tmp = TempDir::new().unwrap();
    write_json(
        tmp.path(),
        "b_math.json",
        r#"[{"subject": "MATH", "course_num": "20A", "crn": 2, "kind": "LE"}]"#,
    );
    write_json(tmp.path(), "a_cse.json", CSE_FEED);
    write_json(tmp.path(), "notes.txt", "not a feed");

    let courses = load_feed(tmp.path()).unwrap();
    let crns: Vec<i64> = courses.iter().map(|c| c.crn).collect();
    assert_eq!(crns, vec![40100, 40101, 2]);
}

#[test]
fn load_feed_missing_path() {
    let tmp = TempDir::new().unwrap();
    let result = load_feed(&tmp.path().join("nope.json"));
    assert!(matches!(result, Err(FeedError::NotFound(_))));
}

#[test]
fn load_feed_reports_parse_errors_with_path() {
    let tmp = TempDir::new().unwrap();
    write_json(tmp.path(), "broken.json", "[{");

    let err = load_feed(&tmp.path().join("broken.json")).unwrap_err();
    match err {
        FeedError::Parse { path, .. } => assert!(path.ends_with("broken.json")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

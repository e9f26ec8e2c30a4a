use std::collections::BTreeSet;

use course_sync_core::{ActivityKind, Blueprint, CourseRow};
use course_sync_import::{write_blueprints_csv, write_courses_csv};

#[test]
fn blueprints_to_csv() {
    let blueprints = vec![Blueprint {
        subject: "CSE".to_string(),
        course_num: "100".to_string(),
        title: "Advanced Data Structures, Algorithms".to_string(),
        capacity: 240,
        enrolled: 200,
        crns: BTreeSet::from([12, 11]),
    }];

    let mut out = Vec::new();
    let written = write_blueprints_csv(&mut out, &blueprints).unwrap();
    assert_eq!(written, 1);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "subject,course_num,title,capacity,enrolled,crns");
    // The comma in the title forces quoting
    assert_eq!(
        lines[1],
        "CSE,100,\"Advanced Data Structures, Algorithms\",240,200,11;12"
    );
}

#[test]
fn courses_to_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("courses.csv");
    let rows = vec![
        CourseRow {
            crn: 5,
            subject: "LING".to_string(),
            course_num: "7".to_string(),
            kind: ActivityKind::Lecture,
            title: "Languages".to_string(),
            units: "4".to_string(),
            description: Some("Sounds and words.".to_string()),
        },
        CourseRow {
            crn: 6,
            subject: "LING".to_string(),
            course_num: "7".to_string(),
            kind: ActivityKind::Discussion,
            title: "Languages".to_string(),
            units: "0".to_string(),
            description: None,
        },
    ];

    let file = std::fs::File::create(&path).unwrap();
    assert_eq!(write_courses_csv(file, &rows).unwrap(), 2);

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "crn,subject,course_num,kind,title,units,description",
            "5,LING,7,LE,Languages,4,Sounds and words.",
            "6,LING,7,DI,Languages,0,",
        ]
    );
}

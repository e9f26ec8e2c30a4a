use course_sync_core::{ActivityKind, CatalogEntry, RawCourse, STAFF_ID, instructor_id};
use course_sync_import::build_rows;

fn offering(crn: i64, kind: ActivityKind, subject: &str, num: &str, instructor: Option<&str>) -> RawCourse {
    RawCourse {
        subject: subject.to_string(),
        course_num: num.to_string(),
        crn,
        kind,
        section: "A00".to_string(),
        title: format!("{subject} {num}"),
        units: "4".to_string(),
        days: "MWF".to_string(),
        start_time: "09:00".to_string(),
        end_time: "09:50".to_string(),
        start_date: "2024-09-26".to_string(),
        end_date: "2024-12-06".to_string(),
        building: "CENTR".to_string(),
        room: "115".to_string(),
        capacity: 30,
        enrolled: 20,
        instructor: instructor.map(str::to_string),
    }
}

fn schedule() -> Vec<RawCourse> {
    vec![
        offering(100, ActivityKind::Lecture, "CSE", "8A", Some("Grace Hopper")),
        offering(101, ActivityKind::Discussion, "CSE", "8A", None),
        offering(102, ActivityKind::Lab, "CSE", "8A", Some("  ")),
        offering(103, ActivityKind::FinalExam, "CSE", "8A", Some("Grace Hopper")),
        offering(200, ActivityKind::Seminar, "HIST", "87", Some("Staff")),
        offering(300, ActivityKind::Discussion, "CHEM", "6A", None),
    ]
}

#[test]
fn rows_split_by_kind() {
    let rows = build_rows(&schedule(), &[]);
    assert_eq!(rows.courses.len(), 6);
    assert_eq!(
        rows.lectures.iter().map(|r| r.crn).collect::<Vec<_>>(),
        vec![100, 200]
    );
    assert_eq!(
        rows.subcourses.iter().map(|r| r.crn).collect::<Vec<_>>(),
        vec![101, 102, 300]
    );
    assert_eq!(rows.exams.len(), 1);
    assert_eq!(rows.exams[0].kind, ActivityKind::FinalExam);
    assert_eq!(rows.total(), 2 + 6 + 2 + 3 + 1);
}

#[test]
fn subcourses_point_at_their_lecture() {
    let rows = build_rows(&schedule(), &[]);
    let parents: Vec<(i64, i64)> = rows
        .subcourses
        .iter()
        .map(|r| (r.crn, r.parent_lecture_crn))
        .collect();
    assert_eq!(parents, vec![(101, 100), (102, 100), (300, 0)]);
    assert_eq!(rows.unresolved, 1);
}

#[test]
fn later_lecture_blocks_resolve_across_many_courses() {
    // Two lecture blocks per course; sections of the second block must skip
    // past the first.
    let mut courses = Vec::new();
    for n in 0..20 {
        let num = n.to_string();
        for block in 0..2 {
            let lecture = 1000 + n * 10 + block * 5;
            courses.push(offering(lecture, ActivityKind::Lecture, "PHYS", &num, None));
            courses.push(offering(lecture + 1, ActivityKind::Discussion, "PHYS", &num, None));
            courses.push(offering(lecture + 2, ActivityKind::Lab, "PHYS", &num, None));
        }
    }

    let rows = build_rows(&courses, &[]);
    assert_eq!(rows.subcourses.len(), 80);
    assert_eq!(rows.unresolved, 0);
    for sub in &rows.subcourses {
        let offset = (sub.crn - 1000) % 5;
        assert_eq!(sub.parent_lecture_crn, sub.crn - offset, "{}", sub.crn);
    }
}

#[test]
fn instructors_deduplicated_with_staff() {
    let rows = build_rows(&schedule(), &[]);
    assert_eq!(rows.instructors.len(), 2);

    let staff = rows.instructors.iter().find(|i| i.id == STAFF_ID).unwrap();
    assert_eq!(staff.name, "Staff");

    let hopper = instructor_id("Grace Hopper");
    assert!(rows.instructors.iter().any(|i| i.id == hopper));

    // Blank and missing names both map to staff
    let lab = rows.subcourses.iter().find(|r| r.crn == 102).unwrap();
    assert_eq!(lab.instructor_id, STAFF_ID);
    assert_eq!(rows.lectures[0].instructor_id, hopper);
}

#[test]
fn descriptions_attached_by_crn() {
    let courses = schedule();
    let entries = vec![CatalogEntry::new(
        courses[0].clone(),
        "Introduction to programming.".to_string(),
    )];

    let rows = build_rows(&courses, &entries);
    let with_description: Vec<i64> = rows
        .courses
        .iter()
        .filter(|r| r.description.is_some())
        .map(|r| r.crn)
        .collect();
    assert_eq!(with_description, vec![100]);
    assert_eq!(
        rows.courses[0].description.as_deref(),
        Some("Introduction to programming.")
    );
}

#[test]
fn empty_schedule() {
    let rows = build_rows(&[], &[]);
    assert_eq!(rows.total(), 0);
    assert_eq!(rows.unresolved, 0);
}

use course_sync_core::{ActivityKind, CatalogEntry, RawCourse, blueprint_key};
use course_sync_import::compute_blueprints;

fn entry(crn: i64, subject: &str, num: &str, title: &str, capacity: i64, enrolled: i64) -> CatalogEntry {
    let course = RawCourse {
        subject: subject.to_string(),
        course_num: num.to_string(),
        crn,
        kind: ActivityKind::Lecture,
        section: String::new(),
        title: title.to_string(),
        units: "4".to_string(),
        days: String::new(),
        start_time: String::new(),
        end_time: String::new(),
        start_date: String::new(),
        end_date: String::new(),
        building: String::new(),
        room: String::new(),
        capacity,
        enrolled,
        instructor: None,
    };
    CatalogEntry::new(course, String::new())
}

#[test]
fn groups_sum_capacity_and_enrollment() {
    let entries = vec![
        entry(1, "MATH", "20A", "Calculus I", 100, 90),
        entry(2, "MATH", "20A", "Calculus I", 50, 10),
        entry(3, "PHYS", "2A", "Mechanics", 200, 150),
    ];

    let blueprints = compute_blueprints(&entries);
    assert_eq!(blueprints.len(), 2);

    let math = blueprints
        .iter()
        .find(|b| b.key() == blueprint_key("MATH", "20A"))
        .unwrap();
    assert_eq!(math.title, "Calculus I");
    assert_eq!(math.capacity, 150);
    assert_eq!(math.enrolled, 100);
    assert_eq!(math.crns.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn subject_case_ignored_for_grouping() {
    let entries = vec![
        entry(1, "Math", "20A", "Calculus I", 10, 0),
        entry(2, "MATH", "20A", "Calculus I", 10, 0),
    ];
    let blueprints = compute_blueprints(&entries);
    assert_eq!(blueprints.len(), 1);
    assert_eq!(blueprints[0].subject, "Math");
    assert_eq!(blueprints[0].crns.len(), 2);
}

#[test]
fn cross_listed_titles_joined() {
    let entries = vec![
        entry(1, "CHEM", "40", "Organic Chemistry Laboratory", 10, 0),
        entry(2, "CHEM", "40", "Calculus I", 10, 0),
    ];
    let blueprints = compute_blueprints(&entries);
    assert_eq!(blueprints[0].title, "Calculus I, Organic Chemistry Laboratory");
}

#[test]
fn short_titles_never_reach_the_threshold() {
    let entries = vec![
        entry(1, "CHEM", "40", "Organic Chemistry", 10, 0),
        entry(2, "CHEM", "40", "Calculus I", 10, 0),
    ];
    let blueprints = compute_blueprints(&entries);
    assert_eq!(blueprints[0].title, "Calculus I");
}

#[test]
fn one_character_variants_keep_first_title() {
    let entries = vec![
        entry(1, "CSE", "11", "Intro to Java", 10, 0),
        entry(2, "CSE", "11", "Intro to Java!", 10, 0),
    ];
    let blueprints = compute_blueprints(&entries);
    assert_eq!(blueprints[0].title, "Intro to Java");
}

#[test]
fn every_crn_in_exactly_one_blueprint() {
    let entries: Vec<CatalogEntry> = (0..40)
        .map(|i| {
            let num = (i % 7).to_string();
            entry(i, "ECON", &num, "Micro", 5, 5)
        })
        .collect();

    let blueprints = compute_blueprints(&entries);
    assert_eq!(blueprints.len(), 7);
    let total: usize = blueprints.iter().map(|b| b.crns.len()).sum();
    assert_eq!(total, 40);
}

#[test]
fn output_sorted_by_key() {
    let entries = vec![
        entry(1, "ZOO", "1", "Animals", 1, 1),
        entry(2, "ANTH", "1", "People", 1, 1),
    ];
    let keys: Vec<_> = compute_blueprints(&entries).iter().map(|b| b.key()).collect();
    assert_eq!(keys, vec![blueprint_key("ANTH", "1"), blueprint_key("ZOO", "1")]);
}

#[test]
fn empty_input() {
    assert!(compute_blueprints(&[]).is_empty());
}

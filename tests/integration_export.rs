mod common;

use classrank::classrank_core::RecordError;
use classrank::modules::ExportService;

use common::{create_class, empty_state, enroll, faculty_session, register_faculty, set_mark};

#[test]
fn test_export_header_and_rows() {
    let mut state = empty_state();
    let alice = register_faculty(&mut state, "alice");
    let class_id = create_class(&mut state, &alice, "10A", &["Math", "Science"]);
    let low = enroll(&mut state, &alice, &class_id, "1", "Low, Lucy");
    let high = enroll(&mut state, &alice, &class_id, "2", "High Harry");
    set_mark(&mut state, &alice, &low, "Math", 10);
    set_mark(&mut state, &alice, &high, "Math", 90);
    set_mark(&mut state, &alice, &high, "Science", 5);

    let table = ExportService::export_class(state.snapshot(), &alice, class_id.as_str()).unwrap();

    assert_eq!(
        table.header,
        vec!["rank", "student_id", "student_name", "total", "Math", "Science"]
    );
    assert_eq!(
        table.rows[0],
        vec![
            "1".to_string(),
            high.id.to_string(),
            "High Harry".to_string(),
            "95".to_string(),
            "90".to_string(),
            "5".to_string(),
        ]
    );
    // unset marks export as 0
    assert_eq!(table.rows[1][5], "0");

    let csv = table.to_csv();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "rank,student_id,student_name,total,Math,Science");
    assert_eq!(lines[2], format!("2,{},\"Low, Lucy\",10,10,0", low.id));
}

#[test]
fn test_export_ties_follow_student_id() {
    let mut state = empty_state();
    let alice = register_faculty(&mut state, "alice");
    let class_id = create_class(&mut state, &alice, "10A", &["Math"]);
    let mut ids: Vec<String> = (1..=4)
        .map(|roll| {
            enroll(&mut state, &alice, &class_id, &roll.to_string(), "Twin")
                .id
                .to_string()
        })
        .collect();
    ids.sort();

    let table = ExportService::export_class(state.snapshot(), &alice, "10A").unwrap();
    let exported: Vec<String> = table.rows.iter().map(|row| row[1].clone()).collect();

    assert_eq!(exported, ids);
    assert!(table.rows.iter().all(|row| row[0] == "1"));
}

#[test]
fn test_export_missing_or_foreign_class() {
    let mut state = empty_state();
    let alice = register_faculty(&mut state, "alice");
    register_faculty(&mut state, "bob");
    let class_id = create_class(&mut state, &alice, "10A", &[]);

    assert!(matches!(
        ExportService::export_class(state.snapshot(), &alice, "class_1_NONE"),
        Err(RecordError::NotFound(_))
    ));
    assert!(matches!(
        ExportService::export_class(state.snapshot(), &faculty_session("bob"), class_id.as_str()),
        Err(RecordError::Forbidden(_))
    ));
}

#[test]
fn test_export_empty_class_has_header_only() {
    let mut state = empty_state();
    let alice = register_faculty(&mut state, "alice");
    let class_id = create_class(&mut state, &alice, "10A", &["Math"]);

    let csv = ExportService::export_class(state.snapshot(), &alice, class_id.as_str())
        .unwrap()
        .to_csv();
    assert_eq!(csv, "rank,student_id,student_name,total,Math\n");
}

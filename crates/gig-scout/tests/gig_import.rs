use gig_scout::workflows::intake::{normalize, try_normalize, GigImportError, GigImporter};
use gig_scout::workflows::matching::{Platform, ProjectType, SkipReason};
use serde_json::json;

#[test]
fn importer_reads_the_sample_export() {
    let data = include_bytes!("../sample_gigs.csv");
    let gigs = GigImporter::from_reader(&data[..]).expect("sample export imports");

    let airflow = gigs
        .iter()
        .find(|gig| gig.id.as_str() == "freelancer_301")
        .expect("airflow gig present");
    assert_eq!(airflow.platform, Platform::Freelancer);
    assert_eq!(airflow.project_type, ProjectType::Hourly);
    assert_eq!(airflow.skills_required, vec!["Python", "Airflow", "AWS"]);
    assert_eq!(airflow.hourly_rate, Some(55.0));
    assert!(airflow.posted_date.is_some());

    let retainer = gigs
        .iter()
        .find(|gig| gig.id.as_str() == "peopleperhour_501")
        .expect("retainer gig present");
    assert_eq!(retainer.platform, Platform::PeoplePerHour);
    assert_eq!(retainer.project_type, ProjectType::Retainer);
    assert!(retainer.posted_date.is_none());
    assert!(retainer.url.is_none());

    let ml = gigs
        .iter()
        .find(|gig| gig.id.as_str() == "freelancer_302")
        .expect("ml gig present");
    assert_eq!(
        ml.deadline,
        chrono::NaiveDate::from_ymd_opt(2025, 10, 15)
    );
}

#[test]
fn importer_rejects_a_non_utf8_header() {
    let bad: &[u8] = b"id,\xff\xfe\nx,y\n";
    let result = GigImporter::from_reader(bad);
    assert!(matches!(result, Err(GigImportError::Csv(_))));
}

#[test]
fn one_latin1_row_does_not_sink_the_export() {
    let export: &[u8] = b"id,platform,title,hourly_rate,project_type\n\
                          upwork_21,upwork,Rust CLI,70,hourly\n\
                          guru_22,guru,Caf\xe9 booking site,40,hourly\n\
                          fiverr_23,fiverr,Python scraper,45,hourly\n";

    let gigs = GigImporter::from_reader(export).expect("header is readable");
    assert_eq!(gigs.len(), 2);
    assert_eq!(gigs[0].id.as_str(), "upwork_21");
    assert_eq!(gigs[1].id.as_str(), "fiverr_23");

    let candidates = GigImporter::candidates_from_reader(export).expect("header is readable");
    assert_eq!(candidates.len(), 3);
    match &candidates[1] {
        Err(SkipReason::UnreadableRow { detail }) => assert!(detail.contains("utf-8")),
        other => panic!("expected an unreadable row, got {other:?}"),
    }
}

#[test]
fn normalize_never_fails_on_odd_payloads() {
    let payloads = vec![
        json!(null),
        json!([]),
        json!({}),
        json!({ "budget_max": { "nested": true }, "skills_required": 7, "client_rating": "n/a" }),
        json!({ "id": "x", "budget_min": -40, "client_reviews": 1e12 }),
    ];

    for payload in &payloads {
        let gig = normalize(payload, "upwork");
        assert!(gig.budget_max.is_none());
        assert!((0.0..=5.0).contains(&gig.client_rating));
    }

    let clamped = normalize(&payloads[4], "upwork");
    assert!(clamped.budget_min.is_none());
    assert_eq!(clamped.client_reviews, u32::MAX);
}

#[test]
fn try_normalize_flags_structural_problems_only() {
    assert_eq!(
        try_normalize(&json!("text"), "fiverr").map(|gig| gig.id),
        Err(SkipReason::NotAnObject)
    );
    assert!(try_normalize(&json!({ "id": "a", "skills_required": {"rust": 1} }), "fiverr").is_err());
    assert!(try_normalize(&json!({ "id": "a", "skills_required": null }), "fiverr").is_ok());
    assert!(try_normalize(&json!({ "id": "a", "budget_max": "oops" }), "fiverr").is_ok());
}

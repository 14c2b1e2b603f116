use super::common::*;
use crate::workflows::intake::try_normalize;
use crate::workflows::matching::domain::{Profile, RiskLevel, SkipReason};
use crate::workflows::matching::ranker::{reasoning, risk_level, suggested_approach};
use crate::workflows::matching::RecommendationRanker;
use serde_json::json;

fn ids(report: &crate::workflows::matching::RankingReport) -> Vec<&str> {
    report
        .recommendations
        .iter()
        .map(|recommendation| recommendation.gig_id.as_str())
        .collect()
}

#[test]
fn ranks_corpus_by_descending_score() {
    let ranker = RecommendationRanker::default();
    let report = ranker.rank(&python_profile(), &corpus(), 10);

    assert_eq!(report.evaluated, 4);
    assert!(report.skipped.is_empty());
    assert_eq!(
        ids(&report),
        vec!["freelancer_002", "upwork_001", "freelancer_001", "fiverr_001"]
    );

    let scores: Vec<f64> = report
        .recommendations
        .iter()
        .map(|recommendation| recommendation.recommendation_score())
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(scores[0], 0.798);

    let weakest = &report.recommendations[3];
    assert_eq!(weakest.risk_level, RiskLevel::High);
    assert!(weakest
        .reasoning
        .iter()
        .any(|reason| reason.starts_with("High competition")));
}

#[test]
fn truncates_to_top_n() {
    let ranker = RecommendationRanker::default();
    let report = ranker.rank(&python_profile(), &corpus(), 2);
    assert_eq!(report.evaluated, 4);
    assert_eq!(ids(&report), vec!["freelancer_002", "upwork_001"]);

    let empty = ranker.rank(&python_profile(), &corpus(), 0);
    assert!(empty.recommendations.is_empty());
}

#[test]
fn ranking_twice_yields_identical_order() {
    let ranker = RecommendationRanker::default();
    let first = ranker.rank(&python_profile(), &corpus(), 10);
    let second = ranker.rank(&python_profile(), &corpus(), 10);
    assert_eq!(first, second);
}

#[test]
fn ties_keep_input_order() {
    let twins = vec![
        hourly_gig("twin_b", 70.0, &["python"]),
        hourly_gig("twin_a", 70.0, &["python"]),
        hourly_gig("twin_c", 70.0, &["python"]),
    ];
    let report = RecommendationRanker::default().rank(&python_profile(), &twins, 10);
    assert_eq!(ids(&report), vec!["twin_b", "twin_a", "twin_c"]);
}

#[test]
fn missing_skills_are_defaulted_but_malformed_records_are_skipped() {
    let records = vec![
        json!({ "id": "ok_1", "title": "Django API", "skills_required": ["python", "django"], "budget_max": 90, "project_type": "hourly" }),
        json!({ "id": "ok_2", "title": "No skills listed", "budget_max": 70, "project_type": "hourly" }),
        json!({ "id": "bad_1", "title": "Broken", "skills_required": "python" }),
        json!(42),
    ];
    let candidates = records
        .iter()
        .map(|record| try_normalize(record, "freelancer"));

    let report = RecommendationRanker::default().rank_candidates(&python_profile(), candidates, 10);

    assert_eq!(report.evaluated, 4);
    assert_eq!(report.recommendations.len(), 2);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].index, 2);
    assert_eq!(report.skipped[1].index, 3);
    assert_eq!(report.skipped[1].reason, SkipReason::NotAnObject.to_string());

    let defaulted = report
        .recommendations
        .iter()
        .find(|recommendation| recommendation.gig_id.as_str() == "ok_2")
        .expect("record without skills still ranks");
    assert_eq!(defaulted.scores.skill_match, 0.5);
}

#[test]
fn scoring_failures_are_reported_with_the_gig_id() {
    let mut gigs = corpus();
    gigs[1].budget_min = Some(f64::INFINITY);

    let report = RecommendationRanker::default().rank(&python_profile(), &gigs, 10);
    assert_eq!(report.recommendations.len(), 3);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(
        report.skipped[0].gig_id.as_ref().map(|id| id.as_str()),
        Some("freelancer_001")
    );
}

#[test]
fn inverted_profile_ranges_are_repaired_before_scoring() {
    let mut inverted = python_profile();
    std::mem::swap(&mut inverted.rate_min, &mut inverted.rate_max);
    inverted.historical_success_rate = 90.0;

    let ranker = RecommendationRanker::default();
    assert_eq!(
        ranker.rank(&inverted, &corpus(), 10),
        ranker.rank(&python_profile(), &corpus(), 10)
    );
}

#[test]
fn risk_points_accumulate() {
    assert_eq!(risk_level(0.9, 3, 0.8), RiskLevel::Low);
    assert_eq!(risk_level(0.4, 3, 0.8), RiskLevel::Medium);
    assert_eq!(risk_level(0.9, 25, 0.2), RiskLevel::Medium);
    assert_eq!(risk_level(0.4, 25, 0.8), RiskLevel::High);
}

#[test]
fn approach_and_reasoning_follow_thresholds() {
    assert!(suggested_approach(0.8, 3).starts_with("Submit a strong proposal"));
    assert!(suggested_approach(0.8, 12).starts_with("Emphasize"));
    assert!(suggested_approach(0.4, 30).starts_with("Differentiate"));
    assert!(suggested_approach(0.4, 8).starts_with("This is competitive"));

    let bundle = RecommendationRanker::default()
        .engine()
        .try_score(
            &Profile::new(["python", "django", "react"], 50.0, 100.0),
            &django_gig(),
        )
        .expect("scores");
    let reasons = reasoning(&bundle);
    assert_eq!(reasons[0], "Excellent skill match (100%)");
    assert!(reasons.contains(&"Excellent budget alignment".to_string()));
    assert!(reasons.contains(&"High-quality client with good reviews".to_string()));
}

use super::common::*;
use crate::workflows::matching::domain::{Gig, Platform, ProjectType, SkipReason};
use crate::workflows::matching::scoring::{RecommendationWeights, ScoringEngine, ScoringPolicy};

fn skills(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-3
}

#[test]
fn scores_the_reference_django_listing() {
    let engine = ScoringEngine::default();
    let bundle = engine
        .try_score(&python_profile(), &django_gig())
        .expect("valid gig scores");

    assert!(close(bundle.skill_match, 2.0 / 3.0));
    assert!(close(bundle.rate_match, 0.92));
    assert!(close(bundle.client_quality, 0.9167));
    assert_eq!(bundle.competition_estimate, 8);
    assert!(close(bundle.win_probability, 0.6967));
    assert_eq!(bundle.optimal_bid, 2000.0);
    assert_eq!(bundle.recommendation_score, 0.792);
}

#[test]
fn scoring_is_reproducible() {
    let engine = ScoringEngine::default();
    let first = engine.try_score(&python_profile(), &django_gig());
    let second = engine.try_score(&python_profile(), &django_gig());
    assert_eq!(first, second);
}

#[test]
fn skill_match_is_bounded_and_neutral_without_requirements() {
    let engine = ScoringEngine::default();
    assert_eq!(engine.skill_match(&skills(&["rust"]), &[]), 0.5);
    assert_eq!(engine.skill_match(&[], &[]), 0.5);

    let cases = [
        (skills(&[]), skills(&["rust"])),
        (skills(&["RUST", " Go "]), skills(&["rust", "go"])),
        (
            skills(&["rust", "go", "sql", "aws", "gcp", "k8s"]),
            skills(&["rust"]),
        ),
        (skills(&["python"]), skills(&["rust", "go", "zig"])),
    ];
    for (offered, required) in cases {
        let score = engine.skill_match(&offered, &required);
        assert!((0.0..=1.0).contains(&score), "{offered:?} vs {required:?}: {score}");
    }
    assert_eq!(
        engine.skill_match(&skills(&["RUST", " Go "]), &skills(&["rust", "go"])),
        1.0
    );
}

#[test]
fn rate_match_handles_unknown_and_generous_budgets() {
    let engine = ScoringEngine::default();

    let unknown = Gig::new("g-unknown", Platform::Guru, "No budget");
    assert_eq!(engine.rate_match(50.0, 100.0, &unknown), 0.5);

    let mut zero = unknown.clone();
    zero.budget_max = Some(0.0);
    assert_eq!(engine.rate_match(50.0, 100.0, &zero), 0.5);

    let generous = hourly_gig("g-rich", 180.0, &["python"]);
    assert_eq!(engine.rate_match(50.0, 100.0, &generous), 1.0);

    let stingy = hourly_gig("g-poor", 25.0, &["python"]);
    assert!(close(engine.rate_match(50.0, 100.0, &stingy), 0.5));
}

#[test]
fn fixed_price_hours_follow_the_policy() {
    let engine = ScoringEngine::new(ScoringPolicy::default().with_fixed_price_hours(20.0));
    let mut gig = Gig::new("g-fixed", Platform::Upwork, "Short fixed job");
    gig.project_type = ProjectType::Fixed;
    gig.budget_max = Some(1200.0);

    // 1200 / 20 hours = 60/hr, inside 50..100
    assert!(close(engine.rate_match(50.0, 100.0, &gig), 0.84));
}

#[test]
fn client_quality_never_decreases_with_rating() {
    let engine = ScoringEngine::default();
    for reviews in [0, 4, 5, 12, 21, 51, 400] {
        let mut previous = engine.client_quality(0.0, reviews);
        for step in 1..=50 {
            let rating = f64::from(step) / 10.0;
            let quality = engine.client_quality(rating, reviews);
            assert!(quality >= previous, "rating {rating} reviews {reviews}");
            assert!((0.0..=1.0).contains(&quality));
            previous = quality;
        }
    }
}

#[test]
fn win_probability_is_clamped() {
    let engine = ScoringEngine::default();
    assert_eq!(engine.win_probability(1.0, 0, 1.0, 50.0), 0.95);
    assert_eq!(engine.win_probability(0.0, 100, 0.0, 0.0), 0.05);
}

#[test]
fn popular_gigs_attract_more_competition() {
    let engine = ScoringEngine::default();
    assert_eq!(engine.competition_estimate(10, 0.9, 0.9), 15);
    assert_eq!(engine.competition_estimate(10, 0.9, 0.7), 10);
    assert_eq!(engine.competition_estimate(7, 0.8, 0.8), 10);
}

#[test]
fn weights_sum_to_one_and_scores_stay_in_unit_range() {
    let weights = RecommendationWeights::default();
    assert!((weights.total() - 1.0).abs() < 1e-9);

    let engine = ScoringEngine::default();
    assert_eq!(engine.recommendation_score(1.0, 1.0, 1.0, 0.9, 0), 0.975);
    assert_eq!(engine.recommendation_score(0.0, 0.0, 0.0, 0.2, 500), 0.05);
}

#[test]
fn lower_win_probability_pushes_the_bid_up() {
    let engine = ScoringEngine::default();
    let profile = python_profile();
    let mut gig = hourly_gig("g-range", 100.0, &["python"]);
    gig.budget_min = Some(60.0);

    assert_eq!(engine.optimal_bid(&gig, 0.8, &profile), 72.0);
    assert_eq!(engine.optimal_bid(&gig, 0.6, &profile), 80.0);
    assert_eq!(engine.optimal_bid(&gig, 0.2, &profile), 88.0);
}

#[test]
fn cheap_fixed_bids_are_lifted_to_the_rate_floor() {
    let profile = python_profile();
    let mut gig = Gig::new("fixed-floor", Platform::Upwork, "Small fixed job");
    gig.project_type = ProjectType::Fixed;
    gig.budget_min = Some(0.0);
    gig.budget_max = Some(1000.0);

    // 700 spread over 40 hours is 17.50/hr, below the 50/hr floor.
    let engine = ScoringEngine::default();
    assert_eq!(engine.optimal_bid(&gig, 0.2, &profile), 2000.0);

    let shorter = ScoringEngine::new(ScoringPolicy::default().with_fixed_price_hours(20.0));
    assert_eq!(shorter.optimal_bid(&gig, 0.2, &profile), 1000.0);

    let tiny = ScoringEngine::new(ScoringPolicy::default().with_fixed_price_hours(10.0));
    assert_eq!(tiny.optimal_bid(&gig, 0.2, &profile), 700.0);
}

#[test]
fn untrustworthy_numbers_are_rejected() {
    let engine = ScoringEngine::default();
    let profile = python_profile();

    let mut nan_budget = django_gig();
    nan_budget.budget_max = Some(f64::NAN);
    assert_eq!(
        engine.try_score(&profile, &nan_budget),
        Err(SkipReason::NonFinite {
            field: "budget_max"
        })
    );

    let mut inverted = django_gig();
    inverted.budget_min = Some(5000.0);
    assert!(matches!(
        engine.try_score(&profile, &inverted),
        Err(SkipReason::InvertedBudget { .. })
    ));

    let anonymous = Gig::new("  ", Platform::Upwork, "No id");
    assert_eq!(
        engine.try_score(&profile, &anonymous),
        Err(SkipReason::MissingId)
    );
}

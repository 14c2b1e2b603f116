use gig_scout::workflows::intake::GigImporter;
use gig_scout::workflows::matching::{
    plan_bids, AutoBidPolicy, PricingAdvisor, PricingStrategy, Profile, ProposalDrafter,
    RecommendationRanker,
};

fn freelancer() -> Profile {
    let mut profile = Profile::new(["Python", "Django", "PostgreSQL", "AWS"], 50.0, 120.0)
        .with_track_record(6.0, 0.92);
    profile.name = "Sam Rivera".to_string();
    profile
}

fn sample_gigs() -> Vec<gig_scout::workflows::matching::Gig> {
    let data = include_bytes!("../sample_gigs.csv");
    GigImporter::from_reader(&data[..]).expect("sample export imports")
}

#[test]
fn ranks_an_imported_export_and_skips_rows_without_ids() {
    let gigs = sample_gigs();
    assert_eq!(gigs.len(), 8);

    let report = RecommendationRanker::default().rank(&freelancer(), &gigs, 5);

    assert_eq!(report.evaluated, 8);
    assert_eq!(report.recommendations.len(), 5);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 7);
    assert_eq!(report.skipped[0].reason, "gig has no identifier");

    let top = &report.recommendations[0];
    assert_eq!(top.gig_id.as_str(), "upwork_101");
    assert!(top.recommendation_score() > 0.9);
    assert!(top
        .reasoning
        .iter()
        .any(|reason| reason == "Excellent skill match (100%)"));
    assert!(report
        .recommendations
        .windows(2)
        .all(|pair| pair[0].recommendation_score() >= pair[1].recommendation_score()));
}

#[test]
fn every_recommendation_stays_in_documented_ranges() {
    let report = RecommendationRanker::default().rank(&freelancer(), &sample_gigs(), 10);

    for recommendation in &report.recommendations {
        let scores = &recommendation.scores;
        assert!((0.0..=1.0).contains(&scores.skill_match));
        assert!((0.0..=1.0).contains(&scores.rate_match));
        assert!((0.0..=1.0).contains(&scores.client_quality));
        assert!((0.05..=0.95).contains(&scores.win_probability));
        assert!((0.0..=1.0).contains(&scores.recommendation_score));
        assert!(scores.optimal_bid >= 50.0);
    }
}

#[test]
fn pricing_respects_budget_window_for_imported_gigs() {
    let advisor = PricingAdvisor::default();
    let profile = freelancer();

    for gig in sample_gigs().iter().filter(|gig| gig.known_budget_max().is_some()) {
        let quote = advisor.quote(gig, &profile);
        let ceiling = gig.budget_max.unwrap_or_default() * 1.1;
        assert!(
            quote.optimal_price <= ceiling.max(profile.rate_min) + 0.01,
            "{} priced at {}",
            gig.id,
            quote.optimal_price
        );
        assert!(quote.optimal_price >= gig.budget_floor().min(ceiling));
        assert!(quote.conservative_price < quote.optimal_price);
        assert!(quote.aggressive_price > quote.optimal_price);
    }

    let rust_gig = sample_gigs()
        .into_iter()
        .find(|gig| gig.id.as_str() == "guru_401")
        .expect("rust gig present");
    let quote = advisor.quote(&rust_gig, &profile);
    assert_eq!(quote.strategy, PricingStrategy::Premium);
    assert_eq!(quote.factors.skill_premium, 20.0);
}

#[test]
fn bid_planning_drafts_proposals_for_strong_matches() {
    let policy = AutoBidPolicy {
        enabled: true,
        ..AutoBidPolicy::default()
    };

    let bids = plan_bids(
        &RecommendationRanker::default(),
        &ProposalDrafter::template_only(),
        &freelancer(),
        &sample_gigs(),
        &policy,
        0,
    );

    let ids: Vec<&str> = bids.iter().map(|bid| bid.gig_id.as_str()).collect();
    assert_eq!(ids, vec!["upwork_101", "freelancer_302"]);
    assert_eq!(bids[0].bid_amount, 2600.0);
    assert!(bids[0].proposal.contains("Django REST backend for marketplace"));
    assert!(bids[0].proposal.contains("Python, Django, PostgreSQL"));
    assert!(bids[0].proposal.ends_with("Sam Rivera"));

    let exhausted = plan_bids(
        &RecommendationRanker::default(),
        &ProposalDrafter::template_only(),
        &freelancer(),
        &sample_gigs(),
        &policy,
        policy.max_bids_per_day,
    );
    assert!(exhausted.is_empty());
}

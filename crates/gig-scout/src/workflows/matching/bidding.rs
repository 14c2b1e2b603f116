use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{Gig, GigId, Platform, Profile};
use super::proposal::ProposalDrafter;
use super::ranker::RecommendationRanker;

/// Caps how many bids a single scan drafts, independent of the daily allowance.
const MAX_BIDS_PER_SCAN: usize = 5;
const SCAN_POOL: usize = 10;

/// Guard rails for automated bidding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoBidPolicy {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "AutoBidPolicy::default_min_match_score")]
    pub min_match_score: f64,
    #[serde(default = "AutoBidPolicy::default_max_bids_per_day")]
    pub max_bids_per_day: u32,
    #[serde(default = "AutoBidPolicy::default_min_budget")]
    pub min_budget: f64,
    #[serde(default = "AutoBidPolicy::default_max_budget")]
    pub max_budget: f64,
    #[serde(default)]
    pub preferred_platforms: Vec<Platform>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub auto_apply: bool,
}

impl AutoBidPolicy {
    fn default_min_match_score() -> f64 {
        0.7
    }

    fn default_max_bids_per_day() -> u32 {
        5
    }

    fn default_min_budget() -> f64 {
        500.0
    }

    fn default_max_budget() -> f64 {
        10_000.0
    }

    /// Budget, platform, and skill screen applied before any scoring.
    pub fn is_eligible(&self, gig: &Gig) -> bool {
        if let Some(budget_max) = gig.known_budget_max() {
            if budget_max < self.min_budget || budget_max > self.max_budget {
                return false;
            }
        }

        if !self.preferred_platforms.is_empty() && !self.preferred_platforms.contains(&gig.platform)
        {
            return false;
        }

        self.required_skills.is_empty()
            || self
                .required_skills
                .iter()
                .any(|skill| gig.requires_skill(skill))
    }
}

impl Default for AutoBidPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            min_match_score: Self::default_min_match_score(),
            max_bids_per_day: Self::default_max_bids_per_day(),
            min_budget: Self::default_min_budget(),
            max_budget: Self::default_max_budget(),
            preferred_platforms: Vec::new(),
            required_skills: Vec::new(),
            auto_apply: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    Draft,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidDraft {
    pub gig_id: GigId,
    pub gig_title: String,
    pub platform: Platform,
    pub bid_amount: f64,
    pub recommendation_score: f64,
    pub win_probability: f64,
    pub proposal: String,
    pub status: BidStatus,
}

/// Pick the gigs worth bidding on today. The caller owns the `bids_today` counter.
pub fn plan_bids(
    ranker: &RecommendationRanker,
    drafter: &ProposalDrafter,
    profile: &Profile,
    gigs: &[Gig],
    policy: &AutoBidPolicy,
    bids_today: u32,
) -> Vec<BidDraft> {
    if !policy.enabled {
        return Vec::new();
    }
    if bids_today >= policy.max_bids_per_day {
        info!(limit = policy.max_bids_per_day, "daily bid limit reached");
        return Vec::new();
    }

    let remaining = (policy.max_bids_per_day - bids_today) as usize;
    let eligible: Vec<Gig> = gigs
        .iter()
        .filter(|gig| policy.is_eligible(gig))
        .cloned()
        .collect();
    let report = ranker.rank(profile, &eligible, SCAN_POOL);
    let profile = profile.sanitized();

    let status = if policy.auto_apply {
        BidStatus::Submitted
    } else {
        BidStatus::Draft
    };

    report
        .recommendations
        .iter()
        .take(MAX_BIDS_PER_SCAN.min(remaining))
        .filter(|recommendation| recommendation.recommendation_score() >= policy.min_match_score)
        .filter_map(|recommendation| {
            let gig = eligible
                .iter()
                .find(|gig| gig.id == recommendation.gig_id)?;
            Some(BidDraft {
                gig_id: gig.id.clone(),
                gig_title: gig.title.clone(),
                platform: gig.platform.clone(),
                bid_amount: recommendation.suggested_bid(),
                recommendation_score: recommendation.recommendation_score(),
                win_probability: recommendation.scores.win_probability,
                proposal: drafter.draft(gig, &profile, recommendation),
                status,
            })
        })
        .collect()
}

mod config;
mod rules;

pub use config::{RecommendationWeights, ScoringPolicy};

use super::domain::{Gig, Profile, SkipReason};
use serde::{Deserialize, Serialize};

/// Per profile x gig sub-scores. Recomputed on every call, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBundle {
    pub skill_match: f64,
    pub rate_match: f64,
    pub client_quality: f64,
    pub competition_estimate: u32,
    pub win_probability: f64,
    pub recommendation_score: f64,
    pub optimal_bid: f64,
}

/// Stateless evaluator that applies a scoring policy to profile and gig pairs.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    policy: ScoringPolicy,
}

impl ScoringEngine {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Fraction of required skills the profile covers, plus a capped bonus for breadth.
    pub fn skill_match(&self, profile_skills: &[String], required_skills: &[String]) -> f64 {
        rules::skill_match(profile_skills, required_skills, &self.policy)
    }

    pub fn rate_match(&self, profile_rate_min: f64, profile_rate_max: f64, gig: &Gig) -> f64 {
        rules::rate_match(profile_rate_min, profile_rate_max, gig, &self.policy)
    }

    pub fn client_quality(&self, rating: f64, review_count: u32) -> f64 {
        rules::client_quality(rating, review_count)
    }

    pub fn competition_estimate(
        &self,
        proposals_count: u32,
        skill_match: f64,
        rate_match: f64,
    ) -> u32 {
        rules::competition_estimate(proposals_count, skill_match, rate_match, &self.policy)
    }

    pub fn win_probability(
        &self,
        skill_match: f64,
        competition_estimate: u32,
        success_rate: f64,
        years_experience: f64,
    ) -> f64 {
        rules::win_probability(skill_match, competition_estimate, success_rate, years_experience)
    }

    pub fn optimal_bid(&self, gig: &Gig, win_probability: f64, profile: &Profile) -> f64 {
        rules::optimal_bid(gig, win_probability, profile, &self.policy)
    }

    pub fn recommendation_score(
        &self,
        skill_match: f64,
        rate_match: f64,
        client_quality: f64,
        win_probability: f64,
        competition_estimate: u32,
    ) -> f64 {
        rules::recommendation_score(
            skill_match,
            rate_match,
            client_quality,
            win_probability,
            competition_estimate,
            &self.policy,
        )
    }

    /// Score one gig, rejecting records whose numbers cannot be trusted.
    ///
    /// The profile is used as given; callers that accept untrusted profiles should pass
    /// [`Profile::sanitized`] output.
    pub fn try_score(&self, profile: &Profile, gig: &Gig) -> Result<ScoreBundle, SkipReason> {
        validate_gig(gig)?;

        let skill_match = self.skill_match(&profile.skills, &gig.skills_required);
        let rate_match = self.rate_match(profile.rate_min, profile.rate_max, gig);
        let client_quality = self.client_quality(gig.client_rating, gig.client_reviews);
        let competition_estimate =
            self.competition_estimate(gig.proposals_count, skill_match, rate_match);
        let win_probability = self.win_probability(
            skill_match,
            competition_estimate,
            profile.historical_success_rate,
            profile.years_experience,
        );
        let optimal_bid = self.optimal_bid(gig, win_probability, profile);
        let recommendation_score = self.recommendation_score(
            skill_match,
            rate_match,
            client_quality,
            win_probability,
            competition_estimate,
        );

        Ok(ScoreBundle {
            skill_match,
            rate_match,
            client_quality,
            competition_estimate,
            win_probability,
            recommendation_score,
            optimal_bid,
        })
    }
}

fn validate_gig(gig: &Gig) -> Result<(), SkipReason> {
    if gig.id.0.trim().is_empty() {
        return Err(SkipReason::MissingId);
    }

    let numbers = [
        ("budget_min", gig.budget_min),
        ("budget_max", gig.budget_max),
        ("hourly_rate", gig.hourly_rate),
        ("client_rating", Some(gig.client_rating)),
    ];
    for (field, value) in numbers {
        if value.is_some_and(|number| !number.is_finite()) {
            return Err(SkipReason::NonFinite { field });
        }
    }

    if let (Some(min), Some(max)) = (gig.budget_min, gig.budget_max) {
        if max > 0.0 && min > max {
            return Err(SkipReason::InvertedBudget { min, max });
        }
    }

    Ok(())
}

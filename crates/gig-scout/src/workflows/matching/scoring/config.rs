use serde::{Deserialize, Serialize};

/// Linear weights blending the sub-scores into one recommendation score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationWeights {
    pub skill_match: f64,
    pub rate_match: f64,
    pub client_quality: f64,
    pub win_probability: f64,
    pub competition: f64,
}

impl RecommendationWeights {
    pub fn total(&self) -> f64 {
        self.skill_match
            + self.rate_match
            + self.client_quality
            + self.win_probability
            + self.competition
    }
}

impl Default for RecommendationWeights {
    fn default() -> Self {
        Self {
            skill_match: 0.25,
            rate_match: 0.20,
            client_quality: 0.20,
            win_probability: 0.25,
            competition: 0.10,
        }
    }
}

/// Tunable heuristics for the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Hours assumed when converting a fixed-price budget into an hourly rate.
    pub fixed_price_hours: f64,
    /// Returned whenever an input needed for a sub-score is unknown.
    pub neutral_score: f64,
    pub extra_skill_bonus_step: f64,
    pub extra_skill_bonus_cap: f64,
    /// Both skill and rate match must exceed this before a gig counts as popular.
    pub popular_gig_threshold: f64,
    pub popular_gig_multiplier: f64,
    /// Competition level at which the competition component bottoms out.
    pub competition_saturation: f64,
    pub weights: RecommendationWeights,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            fixed_price_hours: 40.0,
            neutral_score: 0.5,
            extra_skill_bonus_step: 0.05,
            extra_skill_bonus_cap: 0.2,
            popular_gig_threshold: 0.7,
            popular_gig_multiplier: 1.5,
            competition_saturation: 50.0,
            weights: RecommendationWeights::default(),
        }
    }
}

impl ScoringPolicy {
    pub fn with_fixed_price_hours(mut self, hours: f64) -> Self {
        if hours.is_finite() && hours > 0.0 {
            self.fixed_price_hours = hours;
        }
        self
    }
}

use serde::{Deserialize, Serialize};

use super::domain::{CompetitionLevel, Gig, Profile};
use crate::workflows::round_to;

/// Multipliers and bounds used by [`PricingAdvisor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Fewer proposals than this earns the low-competition premium.
    pub low_competition_below: u32,
    pub low_competition_multiplier: f64,
    /// More proposals than this applies the high-competition discount.
    pub high_competition_above: u32,
    pub high_competition_multiplier: f64,
    pub success_base: f64,
    pub success_slope: f64,
    /// Success rate a freelancer must exceed to price a quiet gig at a premium.
    pub premium_success_above: f64,
    /// Quotes beyond this multiple of the advertised maximum need a value pitch.
    pub value_overshoot_factor: f64,
    /// Ceiling on the quote relative to the advertised maximum.
    pub budget_ceiling_factor: f64,
    /// Width of the conservative and aggressive band around the optimum.
    pub band: f64,
    pub skill_premiums: Vec<(String, f64)>,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        let premiums: [(&str, f64); 11] = [
            ("ai", 1.3),
            ("ml", 1.3),
            ("machine learning", 1.3),
            ("blockchain", 1.25),
            ("solidity", 1.25),
            ("rust", 1.2),
            ("go", 1.15),
            ("react native", 1.15),
            ("flutter", 1.15),
            ("devops", 1.1),
            ("kubernetes", 1.15),
        ];

        Self {
            low_competition_below: 5,
            low_competition_multiplier: 1.15,
            high_competition_above: 20,
            high_competition_multiplier: 0.90,
            success_base: 0.95,
            success_slope: 0.15,
            premium_success_above: 0.8,
            value_overshoot_factor: 1.05,
            budget_ceiling_factor: 1.1,
            band: 0.1,
            skill_premiums: premiums
                .iter()
                .map(|(skill, factor)| (skill.to_string(), *factor))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingStrategy {
    Premium,
    Competitive,
    Value,
    Balanced,
}

impl PricingStrategy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Premium => "premium",
            Self::Competitive => "competitive",
            Self::Value => "value",
            Self::Balanced => "balanced",
        }
    }

    fn note(self, price: f64) -> String {
        match self {
            Self::Premium => format!(
                "Premium strategy: bid ${price:.2} - you're in a strong position with low competition"
            ),
            Self::Competitive => format!(
                "Competitive strategy: bid ${price:.2} to stand out, but emphasize value over price"
            ),
            Self::Value => format!(
                "Value strategy: bid ${price:.2} and justify the premium with an ROI demonstration"
            ),
            Self::Balanced => {
                format!("Balanced strategy: bid ${price:.2} - competitive yet profitable")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingConfidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingFactors {
    pub competition_level: CompetitionLevel,
    /// Percentage uplift from the strongest in-demand skill.
    pub skill_premium: f64,
    /// Percentage adjustment from the freelancer's success rate.
    pub success_rate_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub optimal_price: f64,
    pub conservative_price: f64,
    pub aggressive_price: f64,
    pub strategy: PricingStrategy,
    pub strategy_note: String,
    pub factors: PricingFactors,
    pub confidence: PricingConfidence,
}

/// Derives a bid price from the gig budget, competition, and skill premiums.
#[derive(Debug, Clone, Default)]
pub struct PricingAdvisor {
    policy: PricingPolicy,
}

impl PricingAdvisor {
    pub fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    pub fn quote(&self, gig: &Gig, profile: &Profile) -> PriceQuote {
        let profile = profile.sanitized();
        let policy = &self.policy;
        let budget_max = gig.known_budget_max();
        // An inverted range collapses to its ceiling.
        let budget_min = budget_max.map_or(gig.budget_floor(), |max| gig.budget_floor().min(max));
        let competition = gig.proposals_count;
        let success_rate = profile.historical_success_rate;

        let base_price = match budget_max {
            Some(max) => (budget_min + max) / 2.0,
            None => profile.rate_min,
        };

        let competition_level = self.competition_level(competition);
        let competition_multiplier = match competition_level {
            CompetitionLevel::Low => policy.low_competition_multiplier,
            CompetitionLevel::High => policy.high_competition_multiplier,
            CompetitionLevel::Medium | CompetitionLevel::Unknown => 1.0,
        };
        let success_multiplier = policy.success_base + policy.success_slope * success_rate;
        let skill_multiplier = self.skill_premium(&gig.skills_required);

        let mut optimal =
            base_price * competition_multiplier * success_multiplier * skill_multiplier;
        if let Some(max) = budget_max {
            optimal = optimal.min(max * policy.budget_ceiling_factor);
            optimal = optimal.max(budget_min);
        }
        optimal = optimal.max(profile.rate_min);

        let strategy = if competition < policy.low_competition_below
            && success_rate > policy.premium_success_above
        {
            PricingStrategy::Premium
        } else if competition > policy.high_competition_above {
            PricingStrategy::Competitive
        } else if budget_max.is_some_and(|max| optimal > max * policy.value_overshoot_factor) {
            PricingStrategy::Value
        } else {
            PricingStrategy::Balanced
        };

        let confidence = match (budget_max.is_some(), competition) {
            (true, count) if count < 15 => PricingConfidence::High,
            (true, _) => PricingConfidence::Medium,
            (false, count) if count < 25 => PricingConfidence::Medium,
            (false, _) => PricingConfidence::Low,
        };

        PriceQuote {
            optimal_price: round_to(optimal, 2),
            conservative_price: round_to(optimal * (1.0 - policy.band), 2),
            aggressive_price: round_to(optimal * (1.0 + policy.band), 2),
            strategy,
            strategy_note: strategy.note(optimal),
            factors: PricingFactors {
                competition_level,
                skill_premium: round_to((skill_multiplier - 1.0) * 100.0, 1),
                success_rate_factor: round_to((success_multiplier - 1.0) * 100.0, 1),
            },
            confidence,
        }
    }

    /// Highest premium among the required skills, or 1.0 when none are in demand.
    pub fn skill_premium(&self, skills: &[String]) -> f64 {
        skills
            .iter()
            .map(|skill| skill.trim().to_lowercase())
            .filter_map(|skill| {
                self.policy
                    .skill_premiums
                    .iter()
                    .find(|(hot, _)| *hot == skill)
                    .map(|(_, factor)| *factor)
            })
            .fold(1.0, f64::max)
    }

    fn competition_level(&self, proposals: u32) -> CompetitionLevel {
        if proposals < self.policy.low_competition_below {
            CompetitionLevel::Low
        } else if proposals > self.policy.high_competition_above {
            CompetitionLevel::High
        } else {
            CompetitionLevel::Medium
        }
    }
}

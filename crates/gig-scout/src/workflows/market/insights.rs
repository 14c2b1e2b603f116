use tracing::debug;

use super::views::{MarketInsight, RateTrend};
use crate::workflows::matching::domain::{CompetitionLevel, Gig, Platform};
use crate::workflows::round_to;

/// Share of the corpus is scaled by this before capping demand at 1.0.
const DEMAND_SCALE: f64 = 10.0;
const TOP_PLATFORM_COUNT: usize = 3;
const LOW_COMPETITION_BELOW: f64 = 10.0;
const MEDIUM_COMPETITION_BELOW: f64 = 20.0;
const HOT_DEMAND: f64 = 0.7;
const HOT_RATE: f64 = 60.0;
const SOLID_DEMAND: f64 = 0.5;

pub fn analyze_skill_demand(skill: &str, gigs: &[Gig], fixed_price_hours: f64) -> MarketInsight {
    let relevant: Vec<&Gig> = gigs.iter().filter(|gig| gig.requires_skill(skill)).collect();
    if relevant.is_empty() {
        debug!(skill, "no gigs require skill");
        return MarketInsight::unknown(skill);
    }

    let demand_score =
        (relevant.len() as f64 / gigs.len().max(1) as f64 * DEMAND_SCALE).min(1.0);

    let rates: Vec<f64> = relevant
        .iter()
        .filter_map(|gig| gig.effective_hourly_rate(fixed_price_hours))
        .collect();
    let average_rate = if rates.is_empty() {
        0.0
    } else {
        rates.iter().sum::<f64>() / rates.len() as f64
    };

    let average_proposals = relevant
        .iter()
        .map(|gig| gig.proposals_count as f64)
        .sum::<f64>()
        / relevant.len() as f64;
    let competition_level = if average_proposals < LOW_COMPETITION_BELOW {
        CompetitionLevel::Low
    } else if average_proposals < MEDIUM_COMPETITION_BELOW {
        CompetitionLevel::Medium
    } else {
        CompetitionLevel::High
    };

    let recommended_action = if demand_score > HOT_DEMAND && average_rate > HOT_RATE {
        format!("{skill} is in high demand! Consider specializing or increasing rates.")
    } else if demand_score > SOLID_DEMAND {
        format!("{skill} has solid demand. Good skill to maintain.")
    } else {
        format!("{skill} has lower demand. Consider diversifying.")
    };

    MarketInsight {
        skill: skill.to_string(),
        matching_gigs: relevant.len(),
        demand_score: round_to(demand_score, 3),
        average_rate: round_to(average_rate, 2),
        rate_trend: RateTrend::Stable,
        competition_level,
        top_platforms: top_platforms(&relevant),
        recommended_action,
    }
}

/// One insight per requested skill, in request order.
pub fn market_trends<S: AsRef<str>>(
    skills: &[S],
    gigs: &[Gig],
    fixed_price_hours: f64,
) -> Vec<MarketInsight> {
    skills
        .iter()
        .map(|skill| analyze_skill_demand(skill.as_ref(), gigs, fixed_price_hours))
        .collect()
}

/// Most frequent platforms; ties keep the order in which platforms were first seen.
fn top_platforms(gigs: &[&Gig]) -> Vec<Platform> {
    let mut counts: Vec<(Platform, usize)> = Vec::new();
    for gig in gigs {
        match counts.iter_mut().find(|(platform, _)| *platform == gig.platform) {
            Some((_, count)) => *count += 1,
            None => counts.push((gig.platform.clone(), 1)),
        }
    }

    counts.sort_by(|left, right| right.1.cmp(&left.1));
    counts
        .into_iter()
        .take(TOP_PLATFORM_COUNT)
        .map(|(platform, _)| platform)
        .collect()
}

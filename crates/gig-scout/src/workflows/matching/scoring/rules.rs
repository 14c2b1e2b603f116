use super::super::domain::{skill_set, Gig, Profile, ProjectType};
use super::config::ScoringPolicy;
use crate::workflows::round_to;

const CLIENT_RATING_PIVOT: f64 = 3.5;
const CLIENT_RATING_SPAN: f64 = 1.5;
/// Review-count adjustments applied on top of the rating-derived base.
const ESTABLISHED_CLIENT_REVIEWS: u32 = 50;
const ESTABLISHED_CLIENT_BONUS: f64 = 0.1;
const KNOWN_CLIENT_REVIEWS: u32 = 20;
const KNOWN_CLIENT_BONUS: f64 = 0.05;
const NEW_CLIENT_REVIEWS: u32 = 5;
const NEW_CLIENT_PENALTY: f64 = -0.1;

const IN_RANGE_RATE_FLOOR: f64 = 0.8;
const IN_RANGE_RATE_SPAN: f64 = 0.2;

/// `(exclusive upper bound on competition, bonus)`; anything beyond the last bound gets the tail.
const COMPETITION_TIERS: [(u32, f64); 3] = [(5, 0.3), (10, 0.2), (20, 0.1)];
const COMPETITION_TAIL_BONUS: f64 = 0.05;
const WIN_SKILL_WEIGHT: f64 = 0.4;
const WIN_SUCCESS_WEIGHT: f64 = 0.2;
const WIN_EXPERIENCE_CAP: f64 = 0.1;
const WIN_EXPERIENCE_DIVISOR: f64 = 100.0;
pub(crate) const WIN_PROBABILITY_FLOOR: f64 = 0.05;
pub(crate) const WIN_PROBABILITY_CEILING: f64 = 0.95;

/// `(win probability must exceed, fraction of the budget range to bid)`.
const BID_TIERS: [(f64, f64); 2] = [(0.7, 0.3), (0.5, 0.5)];
const BID_FALLBACK_FRACTION: f64 = 0.7;

pub(crate) fn skill_match(
    profile_skills: &[String],
    required_skills: &[String],
    policy: &ScoringPolicy,
) -> f64 {
    let required = skill_set(required_skills);
    if required.is_empty() {
        return policy.neutral_score;
    }

    let offered = skill_set(profile_skills);
    let matched = required.intersection(&offered).count();
    let extra = offered.difference(&required).count();

    let base = matched as f64 / required.len() as f64;
    let bonus = (extra as f64 * policy.extra_skill_bonus_step).min(policy.extra_skill_bonus_cap);

    (base + bonus).min(1.0)
}

pub(crate) fn rate_match(
    profile_rate_min: f64,
    profile_rate_max: f64,
    gig: &Gig,
    policy: &ScoringPolicy,
) -> f64 {
    let Some(effective) = gig.effective_hourly_rate(policy.fixed_price_hours) else {
        return policy.neutral_score;
    };

    if effective < profile_rate_min {
        return (effective / profile_rate_min).max(0.0);
    }
    if effective > profile_rate_max {
        return 1.0;
    }

    let span = profile_rate_max - profile_rate_min;
    if span <= f64::EPSILON {
        return 1.0;
    }

    IN_RANGE_RATE_FLOOR + IN_RANGE_RATE_SPAN * (effective - profile_rate_min) / span
}

pub(crate) fn client_quality(rating: f64, review_count: u32) -> f64 {
    let base = ((rating - CLIENT_RATING_PIVOT) / CLIENT_RATING_SPAN).clamp(0.0, 1.0);

    let adjustment = if review_count > ESTABLISHED_CLIENT_REVIEWS {
        ESTABLISHED_CLIENT_BONUS
    } else if review_count > KNOWN_CLIENT_REVIEWS {
        KNOWN_CLIENT_BONUS
    } else if review_count < NEW_CLIENT_REVIEWS {
        NEW_CLIENT_PENALTY
    } else {
        0.0
    };

    (base + adjustment).clamp(0.0, 1.0)
}

pub(crate) fn competition_estimate(
    proposals_count: u32,
    skill_match: f64,
    rate_match: f64,
    policy: &ScoringPolicy,
) -> u32 {
    let popular =
        skill_match > policy.popular_gig_threshold && rate_match > policy.popular_gig_threshold;
    if popular {
        (proposals_count as f64 * policy.popular_gig_multiplier) as u32
    } else {
        proposals_count
    }
}

pub(crate) fn competition_bonus(competition: u32) -> f64 {
    COMPETITION_TIERS
        .iter()
        .find(|(bound, _)| competition < *bound)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(COMPETITION_TAIL_BONUS)
}

pub(crate) fn win_probability(
    skill_match: f64,
    competition: u32,
    success_rate: f64,
    years_experience: f64,
) -> f64 {
    let experience = (years_experience / WIN_EXPERIENCE_DIVISOR).min(WIN_EXPERIENCE_CAP);
    let total = WIN_SKILL_WEIGHT * skill_match
        + competition_bonus(competition)
        + WIN_SUCCESS_WEIGHT * success_rate
        + experience;

    total.clamp(WIN_PROBABILITY_FLOOR, WIN_PROBABILITY_CEILING)
}

/// Position a bid inside the advertised range. Higher win probability bids lower in the range.
pub(crate) fn optimal_bid(
    gig: &Gig,
    win_probability: f64,
    profile: &Profile,
    policy: &ScoringPolicy,
) -> f64 {
    let Some(budget_max) = gig.known_budget_max() else {
        return round_to(profile.rate_min, 2);
    };
    let budget_min = gig.budget_floor();

    let fraction = BID_TIERS
        .iter()
        .find(|(threshold, _)| win_probability > *threshold)
        .map(|(_, fraction)| *fraction)
        .unwrap_or(BID_FALLBACK_FRACTION);
    let bid = budget_min + (budget_max - budget_min) * fraction;

    let fixed = gig.project_type == ProjectType::Fixed;
    let hourly_equivalent = if fixed {
        bid / policy.fixed_price_hours
    } else {
        bid
    };

    if hourly_equivalent < profile.rate_min {
        let floor = if fixed {
            profile.rate_min * policy.fixed_price_hours
        } else {
            profile.rate_min
        };
        return round_to(floor, 2);
    }

    round_to(bid, 2)
}

pub(crate) fn competition_component(competition: u32, policy: &ScoringPolicy) -> f64 {
    (1.0 - competition as f64 / policy.competition_saturation).max(0.0)
}

pub(crate) fn recommendation_score(
    skill_match: f64,
    rate_match: f64,
    client_quality: f64,
    win_probability: f64,
    competition: u32,
    policy: &ScoringPolicy,
) -> f64 {
    let weights = &policy.weights;
    let score = weights.skill_match * skill_match
        + weights.rate_match * rate_match
        + weights.client_quality * client_quality
        + weights.win_probability * win_probability
        + weights.competition * competition_component(competition, policy);

    round_to(score.clamp(0.0, 1.0), 3)
}

use serde::{Deserialize, Serialize};

use super::views::{ClientProfile, ClientVerdict};
use crate::workflows::round_to;

const MAX_RATING: f64 = 5.0;
const UNRATED_SCORE: f64 = 0.5;

const RATING_WEIGHT: f64 = 0.4;
const EXPERIENCE_WEIGHT: f64 = 0.3;
const SPEND_WEIGHT: f64 = 0.2;
const REVIEW_WEIGHT: f64 = 0.1;

/// `(strictly greater than, tier score)` step functions, highest bound first.
const EXPERIENCE_TIERS: [(u32, f64); 3] = [(50, 1.0), (20, 0.8), (5, 0.6)];
const EXPERIENCE_FLOOR: f64 = 0.4;
const SPEND_TIERS: [(f64, f64); 3] = [(50_000.0, 1.0), (10_000.0, 0.8), (1_000.0, 0.6)];
const SPEND_FLOOR: f64 = 0.4;
const REVIEW_TIERS: [(u32, f64); 2] = [(50, 1.0), (10, 0.7)];
const REVIEW_FLOOR: f64 = 0.5;
const PAYMENT_CONFIDENCE_TIERS: [(u32, f64); 2] = [(20, 1.0), (5, 0.8)];
const PAYMENT_CONFIDENCE_FLOOR: f64 = 0.6;
const SEASONED_REVIEWS: u32 = 20;
const THIN_HISTORY_DISCOUNT: f64 = 0.8;

/// Raw client history as reported by a platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientSignals {
    #[serde(default, alias = "id")]
    pub client_id: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub total_projects: u32,
}

impl ClientSignals {
    /// Usable rating in `0..=5`; zero and non-finite values count as unrated.
    fn rating(&self) -> Option<f64> {
        self.rating
            .filter(|rating| rating.is_finite() && *rating > 0.0)
            .map(|rating| rating.min(MAX_RATING))
    }

    fn rating_norm(&self) -> f64 {
        self.rating()
            .map(|rating| rating / MAX_RATING)
            .unwrap_or(UNRATED_SCORE)
    }
}

fn step<T: PartialOrd + Copy>(value: T, tiers: &[(T, f64)], floor: f64) -> f64 {
    tiers
        .iter()
        .find(|(bound, _)| value > *bound)
        .map(|(_, score)| *score)
        .unwrap_or(floor)
}

pub fn research_client(signals: &ClientSignals) -> ClientProfile {
    let rating_norm = signals.rating_norm();
    let spent = if signals.total_spent.is_finite() {
        signals.total_spent
    } else {
        0.0
    };

    let quality_score = RATING_WEIGHT * rating_norm
        + EXPERIENCE_WEIGHT * step(signals.total_projects, &EXPERIENCE_TIERS, EXPERIENCE_FLOOR)
        + SPEND_WEIGHT * step(spent, &SPEND_TIERS, SPEND_FLOOR)
        + REVIEW_WEIGHT * step(signals.reviews, &REVIEW_TIERS, REVIEW_FLOOR);
    let quality_score = round_to(quality_score, 3);

    let payment_confidence = step(
        signals.total_projects,
        &PAYMENT_CONFIDENCE_TIERS,
        PAYMENT_CONFIDENCE_FLOOR,
    );
    let communication_score = if signals.reviews > SEASONED_REVIEWS {
        rating_norm
    } else {
        rating_norm * THIN_HISTORY_DISCOUNT
    };

    let red_flags = red_flags(signals);
    let green_flags = green_flags(signals, spent);
    let verdict = verdict(quality_score, red_flags.len());

    ClientProfile {
        client_id: signals.client_id.clone(),
        quality_score,
        payment_reliability: round_to(rating_norm * payment_confidence, 3),
        communication_score: round_to(communication_score, 3),
        project_success_rate: round_to(rating_norm, 3),
        red_flags,
        green_flags,
        verdict,
        recommendation: verdict.summary().to_string(),
    }
}

fn red_flags(signals: &ClientSignals) -> Vec<String> {
    let mut flags = Vec::new();
    let rating = signals.rating();

    if rating.is_some_and(|rating| rating < 4.0) && signals.reviews > 5 {
        flags.push("Below-average rating with multiple reviews".to_string());
    }
    if signals.total_projects > 10 && signals.reviews < 3 {
        flags.push("Many projects but few reviews (possible disputes)".to_string());
    }
    if rating.is_some_and(|rating| rating < 3.5) {
        flags.push("Low client rating".to_string());
    }

    flags
}

fn green_flags(signals: &ClientSignals, spent: f64) -> Vec<String> {
    let mut flags = Vec::new();
    let rating = signals.rating();

    if rating.is_some_and(|rating| rating >= 4.7) && signals.reviews > 10 {
        flags.push("Excellent rating with proven track record".to_string());
    }
    if spent > 50_000.0 {
        flags.push("High-spending client".to_string());
    }
    if signals.total_projects > 50 {
        flags.push("Experienced client with many completed projects".to_string());
    }
    if rating.is_some_and(|rating| rating >= 4.5) {
        flags.push("High client satisfaction rate".to_string());
    }

    flags
}

fn verdict(quality_score: f64, red_flag_count: usize) -> ClientVerdict {
    if quality_score >= 0.8 && red_flag_count == 0 {
        ClientVerdict::HighlyRecommended
    } else if quality_score >= 0.6 && red_flag_count < 2 {
        ClientVerdict::ProceedWithCaution
    } else if quality_score < 0.4 || red_flag_count > 2 {
        ClientVerdict::HighRisk
    } else {
        ClientVerdict::Moderate
    }
}

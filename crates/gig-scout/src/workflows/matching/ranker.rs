use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{Gig, GigId, Platform, Profile, RiskLevel, SkipReason};
use super::scoring::{ScoreBundle, ScoringEngine};

const STRONG_SKILL_MATCH: f64 = 0.8;
const GOOD_SKILL_MATCH: f64 = 0.6;
const STRONG_RATE_MATCH: f64 = 0.8;
const WEAK_RATE_MATCH: f64 = 0.5;
const STRONG_CLIENT: f64 = 0.8;
const WEAK_CLIENT: f64 = 0.5;
const LOW_COMPETITION: u32 = 5;
const HIGH_COMPETITION: u32 = 20;
const HIGH_WIN_PROBABILITY: f64 = 0.7;
const LOW_WIN_PROBABILITY: f64 = 0.3;

const HIGH_RISK_POINTS: u8 = 4;
const MEDIUM_RISK_POINTS: u8 = 2;

/// A scored gig with the explanation shown to the freelancer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub gig_id: GigId,
    pub title: String,
    pub platform: Platform,
    #[serde(flatten)]
    pub scores: ScoreBundle,
    pub reasoning: Vec<String>,
    pub risk_level: RiskLevel,
    pub suggested_approach: String,
}

impl Recommendation {
    pub fn recommendation_score(&self) -> f64 {
        self.scores.recommendation_score
    }

    pub fn suggested_bid(&self) -> f64 {
        self.scores.optimal_bid
    }
}

/// A record that was left out of a batch and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedGig {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gig_id: Option<GigId>,
    pub reason: String,
}

/// Outcome of ranking a batch: the surviving top-N plus an audit of skipped records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    pub evaluated: usize,
    pub recommendations: Vec<Recommendation>,
    pub skipped: Vec<SkippedGig>,
}

/// Orders gigs for a profile. A bad record never aborts the batch.
#[derive(Debug, Clone, Default)]
pub struct RecommendationRanker {
    engine: ScoringEngine,
}

impl RecommendationRanker {
    pub fn new(engine: ScoringEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn recommend(&self, profile: &Profile, gig: &Gig) -> Result<Recommendation, SkipReason> {
        let scores = self.engine.try_score(profile, gig)?;
        debug!(
            gig_id = %gig.id,
            score = scores.recommendation_score,
            skill_match = scores.skill_match,
            win_probability = scores.win_probability,
            "scored gig"
        );

        Ok(Recommendation {
            gig_id: gig.id.clone(),
            title: gig.title.clone(),
            platform: gig.platform.clone(),
            reasoning: reasoning(&scores),
            risk_level: risk_level(
                scores.client_quality,
                scores.competition_estimate,
                scores.win_probability,
            ),
            suggested_approach: suggested_approach(
                scores.win_probability,
                scores.competition_estimate,
            )
            .to_string(),
            scores,
        })
    }

    pub fn rank(&self, profile: &Profile, gigs: &[Gig], top_n: usize) -> RankingReport {
        self.rank_candidates(profile, gigs.iter().cloned().map(Ok), top_n)
    }

    /// Rank a batch in which some records may already have failed normalization.
    pub fn rank_candidates<I>(&self, profile: &Profile, candidates: I, top_n: usize) -> RankingReport
    where
        I: IntoIterator<Item = Result<Gig, SkipReason>>,
    {
        let profile = profile.sanitized();
        let mut report = RankingReport::default();

        for (index, candidate) in candidates.into_iter().enumerate() {
            report.evaluated += 1;
            let gig = match candidate {
                Ok(gig) => gig,
                Err(reason) => {
                    record_skip(&mut report.skipped, index, None, &reason);
                    continue;
                }
            };

            match self.recommend(&profile, &gig) {
                Ok(recommendation) => report.recommendations.push(recommendation),
                Err(reason) => record_skip(&mut report.skipped, index, Some(gig.id), &reason),
            }
        }

        report.recommendations.sort_by(|left, right| {
            right
                .scores
                .recommendation_score
                .total_cmp(&left.scores.recommendation_score)
        });
        report.recommendations.truncate(top_n);

        info!(
            evaluated = report.evaluated,
            returned = report.recommendations.len(),
            skipped = report.skipped.len(),
            "ranked gig batch"
        );
        report
    }
}

fn record_skip(
    skipped: &mut Vec<SkippedGig>,
    index: usize,
    gig_id: Option<GigId>,
    reason: &SkipReason,
) {
    warn!(
        index,
        gig_id = gig_id.as_ref().map(GigId::as_str).unwrap_or("unknown"),
        %reason,
        "skipping gig"
    );
    skipped.push(SkippedGig {
        index,
        gig_id,
        reason: reason.to_string(),
    });
}

/// Threshold-based remarks explaining a score bundle.
pub fn reasoning(scores: &ScoreBundle) -> Vec<String> {
    let mut reasons = Vec::new();

    let skill_pct = scores.skill_match * 100.0;
    let skill_label = if scores.skill_match >= STRONG_SKILL_MATCH {
        "Excellent"
    } else if scores.skill_match >= GOOD_SKILL_MATCH {
        "Good"
    } else {
        "Moderate"
    };
    reasons.push(format!("{skill_label} skill match ({skill_pct:.0}%)"));

    if scores.rate_match >= STRONG_RATE_MATCH {
        reasons.push("Excellent budget alignment".to_string());
    } else if scores.rate_match < WEAK_RATE_MATCH {
        reasons.push("Budget below your target rate".to_string());
    }

    if scores.client_quality >= STRONG_CLIENT {
        reasons.push("High-quality client with good reviews".to_string());
    } else if scores.client_quality < WEAK_CLIENT {
        reasons.push("Limited client history or low ratings".to_string());
    }

    if scores.competition_estimate < LOW_COMPETITION {
        reasons.push("Low competition - great opportunity!".to_string());
    } else if scores.competition_estimate > HIGH_COMPETITION {
        reasons.push("High competition - may be challenging".to_string());
    }

    let win_pct = scores.win_probability * 100.0;
    if scores.win_probability >= HIGH_WIN_PROBABILITY {
        reasons.push(format!("High win probability ({win_pct:.0}%)"));
    } else if scores.win_probability < LOW_WIN_PROBABILITY {
        reasons.push(format!("Lower win probability ({win_pct:.0}%)"));
    }

    reasons
}

pub fn risk_level(client_quality: f64, competition: u32, win_probability: f64) -> RiskLevel {
    let mut points = 0u8;
    if client_quality < WEAK_CLIENT {
        points += 2;
    }
    if competition > HIGH_COMPETITION {
        points += 2;
    }
    if win_probability < LOW_WIN_PROBABILITY {
        points += 1;
    }

    if points >= HIGH_RISK_POINTS {
        RiskLevel::High
    } else if points >= MEDIUM_RISK_POINTS {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn suggested_approach(win_probability: f64, competition: u32) -> &'static str {
    if win_probability > HIGH_WIN_PROBABILITY && competition < 10 {
        "Submit a strong proposal highlighting your expertise. You have a great chance!"
    } else if win_probability > 0.5 {
        "Emphasize your unique value proposition and relevant experience."
    } else if competition > HIGH_COMPETITION {
        "Differentiate yourself with a unique approach or special offer. Consider a competitive rate."
    } else {
        "This is competitive. Focus on demonstrating clear ROI and past results."
    }
}

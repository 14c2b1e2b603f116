use serde::{Deserialize, Serialize};

use crate::workflows::matching::domain::{CompetitionLevel, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateTrend {
    Stable,
    Unknown,
}

/// Demand snapshot for one skill across a gig corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInsight {
    pub skill: String,
    pub matching_gigs: usize,
    pub demand_score: f64,
    pub average_rate: f64,
    pub rate_trend: RateTrend,
    pub competition_level: CompetitionLevel,
    pub top_platforms: Vec<Platform>,
    pub recommended_action: String,
}

impl MarketInsight {
    /// Sentinel returned when no gig in the corpus asks for the skill.
    pub fn unknown(skill: &str) -> Self {
        Self {
            skill: skill.to_string(),
            matching_gigs: 0,
            demand_score: 0.0,
            average_rate: 0.0,
            rate_trend: RateTrend::Unknown,
            competition_level: CompetitionLevel::Unknown,
            top_platforms: Vec::new(),
            recommended_action: format!("No recent data for {skill}"),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.competition_level == CompetitionLevel::Unknown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientVerdict {
    HighlyRecommended,
    ProceedWithCaution,
    Moderate,
    HighRisk,
}

impl ClientVerdict {
    pub const fn summary(self) -> &'static str {
        match self {
            Self::HighlyRecommended => "Highly recommended - excellent client, proceed with confidence",
            Self::ProceedWithCaution => "Proceed with caution - good client, but do your due diligence",
            Self::Moderate => "Moderate quality - standard precautions recommended",
            Self::HighRisk => "High risk - consider carefully before applying",
        }
    }
}

/// Trust assessment derived purely from a client's historical signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub quality_score: f64,
    pub payment_reliability: f64,
    pub communication_score: f64,
    pub project_success_rate: f64,
    pub red_flags: Vec<String>,
    pub green_flags: Vec<String>,
    pub verdict: ClientVerdict,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationPerformance {
    pub total_applications: usize,
    /// Percentage of applications that turned into work.
    pub success_rate: f64,
    pub status_breakdown: Vec<BreakdownEntry>,
    pub platform_breakdown: Vec<BreakdownEntry>,
    pub average_response_days: f64,
    pub response_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_platform: Option<String>,
    pub insights: Vec<String>,
}

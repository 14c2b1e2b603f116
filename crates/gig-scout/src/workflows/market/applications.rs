use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::views::{ApplicationPerformance, BreakdownEntry};
use crate::workflows::round_to;

const SUCCESS_STATUSES: [&str; 3] = ["accepted", "hired", "contract_signed"];
const LOW_SUCCESS_PCT: f64 = 10.0;
const HIGH_SUCCESS_PCT: f64 = 25.0;
const SLOW_RESPONSE_DAYS: f64 = 7.0;

/// One submitted application and what happened to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationOutcome {
    #[serde(default)]
    pub gig_id: Option<String>,
    #[serde(default = "ApplicationOutcome::default_platform")]
    pub platform: String,
    #[serde(default = "ApplicationOutcome::default_status")]
    pub status: String,
    #[serde(default)]
    pub applied_date: Option<NaiveDate>,
    #[serde(default)]
    pub response_date: Option<NaiveDate>,
}

impl ApplicationOutcome {
    fn default_platform() -> String {
        "unknown".to_string()
    }

    fn default_status() -> String {
        "pending".to_string()
    }

    pub fn is_success(&self) -> bool {
        let status = self.status.trim().to_ascii_lowercase();
        SUCCESS_STATUSES.contains(&status.as_str())
    }

    fn response_days(&self) -> Option<i64> {
        match (self.applied_date, self.response_date) {
            (Some(applied), Some(responded)) => Some((responded - applied).num_days()),
            _ => None,
        }
    }
}

fn tally<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<BreakdownEntry> {
    let mut entries: Vec<BreakdownEntry> = Vec::new();
    for label in labels {
        match entries.iter_mut().find(|entry| entry.label == label) {
            Some(entry) => entry.count += 1,
            None => entries.push(BreakdownEntry {
                label: label.to_string(),
                count: 1,
            }),
        }
    }
    entries
}

/// Summarize application outcomes. An empty history yields an empty report, not an error.
pub fn track_applications(applications: &[ApplicationOutcome]) -> ApplicationPerformance {
    let total = applications.len();
    if total == 0 {
        return ApplicationPerformance {
            total_applications: 0,
            success_rate: 0.0,
            status_breakdown: Vec::new(),
            platform_breakdown: Vec::new(),
            average_response_days: 0.0,
            response_rate: 0.0,
            best_platform: None,
            insights: vec!["No applications tracked yet".to_string()],
        };
    }

    let successes = applications.iter().filter(|app| app.is_success()).count();
    let success_rate = successes as f64 / total as f64 * 100.0;

    let response_days: Vec<i64> = applications
        .iter()
        .filter_map(ApplicationOutcome::response_days)
        .collect();
    let average_response_days = if response_days.is_empty() {
        0.0
    } else {
        response_days.iter().sum::<i64>() as f64 / response_days.len() as f64
    };

    let status_breakdown = tally(applications.iter().map(|app| app.status.as_str()));
    let platform_breakdown = tally(applications.iter().map(|app| app.platform.as_str()));

    // max_by_key keeps the last maximum, so walk in reverse to favour the first-seen platform.
    let best_platform = platform_breakdown
        .iter()
        .rev()
        .max_by_key(|entry| entry.count)
        .map(|entry| entry.label.clone());

    let mut insights = Vec::new();
    if success_rate < LOW_SUCCESS_PCT {
        insights.push(
            "Low success rate - consider improving proposal quality or targeting better-fit gigs"
                .to_string(),
        );
    } else if success_rate > HIGH_SUCCESS_PCT {
        insights.push("Excellent success rate! Consider applying to more premium gigs".to_string());
    }
    if average_response_days > SLOW_RESPONSE_DAYS {
        insights.push(
            "Slow client responses - may indicate low-quality clients or poor proposal targeting"
                .to_string(),
        );
    }
    if let Some(platform) = &best_platform {
        insights.push(format!("Most active on {platform} - consider focusing efforts here"));
    }

    ApplicationPerformance {
        total_applications: total,
        success_rate: round_to(success_rate, 1),
        status_breakdown,
        platform_breakdown,
        average_response_days: round_to(average_response_days, 1),
        response_rate: round_to(response_days.len() as f64 / total as f64 * 100.0, 1),
        best_platform,
        insights,
    }
}

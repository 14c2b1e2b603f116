use super::normalizer::{
    amount, clean_skills, collapse_whitespace, count, date, datetime, number, rating,
    skills_from, text, truncate_chars, DESCRIPTION_LIMIT,
};
use crate::workflows::matching::{Gig, Platform, ProjectType};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

static PROPOSAL_TIERS: OnceLock<HashMap<&'static str, u32>> = OnceLock::new();

const UPWORK_MARKERS: &[&str] = &[
    "node",
    "content",
    "contractTerms",
    "createdDateTime",
    "proposalsTier",
];
const FREELANCER_MARKERS: &[&str] = &["jobs", "bid_stats", "owner", "time_submitted", "seo_url"];

/// Map one JSON object onto a [`Gig`], picking the adapter from the platform tag and
/// the record's own shape.
pub(crate) fn map_record(record: &Value, platform_tag: &str) -> Gig {
    let platform = resolve_platform(record, platform_tag);

    let gig = match platform {
        Platform::Upwork if has_any(record, UPWORK_MARKERS) => {
            upwork_job(record.get("node").unwrap_or(record))
        }
        Platform::Freelancer if looks_like_freelancer(record) => freelancer_project(record),
        platform => canonical(record, platform),
    };

    tidy(gig)
}

pub(crate) fn proposals_for_tier(tier: &str) -> u32 {
    proposal_tiers()
        .get(tier.trim().to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or(0)
}

fn proposal_tiers() -> &'static HashMap<&'static str, u32> {
    PROPOSAL_TIERS.get_or_init(|| {
        const TIERS: &[(&str, u32)] = &[
            ("0 to 4", 2),
            ("less than 5", 2),
            ("5 to 9", 7),
            ("10 to 14", 12),
            ("15 to 19", 17),
            ("20 to 49", 30),
            ("50+", 50),
        ];
        TIERS.iter().copied().collect()
    })
}

fn resolve_platform(record: &Value, platform_tag: &str) -> Platform {
    if !platform_tag.trim().is_empty() {
        return Platform::parse(platform_tag);
    }
    record
        .get("platform")
        .and_then(Value::as_str)
        .filter(|tag| !tag.trim().is_empty())
        .map(Platform::parse)
        .unwrap_or_else(|| Platform::Other("unknown".to_string()))
}

fn has_any(record: &Value, markers: &[&str]) -> bool {
    markers.iter().any(|marker| record.get(*marker).is_some())
}

fn looks_like_freelancer(record: &Value) -> bool {
    has_any(record, FREELANCER_MARKERS) || record.get("budget").is_some_and(Value::is_object)
}

fn string_at(record: &Value, pointer: &str) -> Option<String> {
    record
        .pointer(pointer)
        .and_then(text)
        .filter(|value| !value.trim().is_empty())
}

fn prefixed_id(prefix: &str, raw: Option<&String>) -> String {
    raw.map(|id| format!("{prefix}_{}", id.trim()))
        .unwrap_or_default()
}

fn upwork_job(node: &Value) -> Gig {
    let raw_id = string_at(node, "/id");
    let mut gig = Gig::new(
        prefixed_id("upwork", raw_id.as_ref()),
        Platform::Upwork,
        string_at(node, "/title").unwrap_or_default(),
    );
    gig.description = string_at(node, "/description").unwrap_or_default();
    gig.skills_required = skills_from(node.pointer("/content/skills"), "prettyName");

    let hourly_min = amount(node.pointer("/contractTerms/hourlyBudgetMin"));
    let hourly_max = amount(node.pointer("/contractTerms/hourlyBudgetMax"));
    let fixed_budget = amount(node.pointer("/content/budget"))
        .or_else(|| amount(node.pointer("/content/budget/amount")));

    match (hourly_min, hourly_max, fixed_budget) {
        (Some(min), Some(max), _) => {
            gig.project_type = ProjectType::Hourly;
            gig.budget_min = Some(min);
            gig.budget_max = Some(max);
            gig.hourly_rate = Some((min + max) / 2.0);
        }
        (_, _, Some(budget)) => {
            gig.project_type = ProjectType::Fixed;
            gig.budget_min = Some(budget);
            gig.budget_max = Some(budget);
        }
        _ => gig.project_type = ProjectType::Unknown,
    }

    gig.client_rating = rating(node.pointer("/client/totalFeedback"));
    gig.client_reviews = count(node.pointer("/client/totalReviews"));
    gig.proposals_count = node
        .get("proposalsTier")
        .and_then(Value::as_str)
        .map(proposals_for_tier)
        .unwrap_or(0);
    gig.posted_date = datetime(node.get("createdDateTime"));
    gig.url = raw_id.map(|id| format!("https://www.upwork.com/jobs/~{id}"));
    gig
}

fn freelancer_project(project: &Value) -> Gig {
    let raw_id = string_at(project, "/id");
    let mut gig = Gig::new(
        prefixed_id("freelancer", raw_id.as_ref()),
        Platform::Freelancer,
        string_at(project, "/title").unwrap_or_default(),
    );
    gig.description = string_at(project, "/description")
        .or_else(|| string_at(project, "/preview_description"))
        .unwrap_or_default();

    let minimum = amount(project.pointer("/budget/minimum"));
    let maximum = amount(project.pointer("/budget/maximum"));
    gig.budget_min = minimum;
    gig.budget_max = maximum;
    gig.project_type = project
        .get("type")
        .and_then(Value::as_str)
        .map(ProjectType::parse)
        .unwrap_or_default();
    if gig.project_type == ProjectType::Hourly {
        gig.hourly_rate = match (minimum, maximum) {
            (Some(min), Some(max)) => Some((min + max) / 2.0),
            (Some(min), None) => Some(min),
            (None, max) => max,
        };
    }

    gig.skills_required = skills_from(project.get("jobs"), "name");
    gig.client_rating = rating(project.pointer("/owner/reputation/entire_history/overall"));
    gig.client_reviews = count(project.pointer("/owner/reputation/entire_history/reviews"));
    gig.proposals_count = count(project.pointer("/bid_stats/bid_count"));
    gig.posted_date = datetime(project.get("time_submitted"));

    let slug = string_at(project, "/seo_url").or(raw_id);
    gig.url = slug.map(|slug| format!("https://www.freelancer.com/projects/{slug}"));
    gig
}

fn canonical(record: &Value, platform: Platform) -> Gig {
    let mut gig = Gig::new(
        string_at(record, "/id").unwrap_or_default().trim(),
        platform,
        string_at(record, "/title").unwrap_or_default(),
    );
    gig.description = string_at(record, "/description").unwrap_or_default();
    gig.budget_min = number(record.get("budget_min")).filter(|value| *value >= 0.0);
    gig.budget_max = number(record.get("budget_max")).filter(|value| *value >= 0.0);
    gig.hourly_rate = amount(record.get("hourly_rate"));
    gig.project_type = record
        .get("project_type")
        .and_then(Value::as_str)
        .map(ProjectType::parse)
        .unwrap_or_default();
    gig.skills_required = skills_from(
        record.get("skills_required").or_else(|| record.get("skills")),
        "name",
    );
    gig.client_rating = rating(record.get("client_rating"));
    gig.client_reviews = count(record.get("client_reviews"));
    gig.proposals_count = count(
        record
            .get("proposals_count")
            .or_else(|| record.get("proposals")),
    );
    gig.posted_date = datetime(record.get("posted_date"));
    gig.deadline = date(record.get("deadline"));
    gig.url = string_at(record, "/url");
    gig
}

fn tidy(mut gig: Gig) -> Gig {
    gig.title = collapse_whitespace(&gig.title);
    gig.description = truncate_chars(&collapse_whitespace(&gig.description), DESCRIPTION_LIMIT);
    gig.skills_required = clean_skills(std::mem::take(&mut gig.skills_required));
    gig
}

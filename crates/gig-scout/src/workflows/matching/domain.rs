use std::collections::HashSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for normalized gigs (`upwork_123`, `freelancer_456`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GigId(pub String);

impl GigId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Marketplace a gig was sourced from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Upwork,
    Fiverr,
    Freelancer,
    PeoplePerHour,
    Toptal,
    Guru,
    Other(String),
}

impl Platform {
    pub fn parse(raw: &str) -> Self {
        let tag = raw.trim().to_ascii_lowercase();
        match tag.as_str() {
            "upwork" => Self::Upwork,
            "fiverr" => Self::Fiverr,
            "freelancer" | "freelancer.com" => Self::Freelancer,
            "peopleperhour" | "people_per_hour" | "people-per-hour" => Self::PeoplePerHour,
            "toptal" => Self::Toptal,
            "guru" => Self::Guru,
            _ => Self::Other(tag),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Upwork => "upwork",
            Self::Fiverr => "fiverr",
            Self::Freelancer => "freelancer",
            Self::PeoplePerHour => "peopleperhour",
            Self::Toptal => "toptal",
            Self::Guru => "guru",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Platform> for String {
    fn from(value: Platform) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Contract shape advertised by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ProjectType {
    Fixed,
    Hourly,
    Retainer,
    Contest,
    #[default]
    Unknown,
}

impl ProjectType {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fixed" | "fixed_price" | "fixed-price" | "fixedprice" => Self::Fixed,
            "hourly" => Self::Hourly,
            "retainer" => Self::Retainer,
            "contest" => Self::Contest,
            _ => Self::Unknown,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Hourly => "hourly",
            Self::Retainer => "retainer",
            Self::Contest => "contest",
            Self::Unknown => "unknown",
        }
    }
}

impl From<String> for ProjectType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

/// Canonical gig record shared by every platform adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gig {
    pub id: GigId,
    pub platform: Platform,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub budget_min: Option<f64>,
    #[serde(default)]
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub client_rating: f64,
    #[serde(default)]
    pub client_reviews: u32,
    #[serde(default)]
    pub proposals_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Gig {
    pub fn new(id: impl Into<String>, platform: Platform, title: impl Into<String>) -> Self {
        Self {
            id: GigId(id.into()),
            platform,
            title: title.into(),
            description: String::new(),
            budget_min: None,
            budget_max: None,
            hourly_rate: None,
            project_type: ProjectType::Unknown,
            skills_required: Vec::new(),
            client_rating: 0.0,
            client_reviews: 0,
            proposals_count: 0,
            posted_date: None,
            deadline: None,
            url: None,
        }
    }

    /// Upper budget bound, treating zero or negative values as "not advertised".
    pub fn known_budget_max(&self) -> Option<f64> {
        self.budget_max.filter(|value| *value > 0.0)
    }

    /// Lower budget bound, defaulting to zero when only a ceiling is advertised.
    pub fn budget_floor(&self) -> f64 {
        self.budget_min.unwrap_or(0.0).max(0.0)
    }

    /// Hourly-equivalent pay. Fixed-price ceilings are spread across `fixed_price_hours`.
    pub fn effective_hourly_rate(&self, fixed_price_hours: f64) -> Option<f64> {
        let budget_max = self.known_budget_max()?;
        if self.project_type == ProjectType::Fixed {
            Some(budget_max / fixed_price_hours)
        } else {
            Some(budget_max)
        }
    }

    pub fn requires_skill(&self, skill: &str) -> bool {
        let needle = skill.trim().to_lowercase();
        self.skills_required
            .iter()
            .any(|required| required.trim().to_lowercase() == needle)
    }
}

/// Freelancer attributes the engine scores against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "Profile::default_rate_min", alias = "hourly_rate_min")]
    pub rate_min: f64,
    #[serde(default = "Profile::default_rate_max", alias = "hourly_rate_max")]
    pub rate_max: f64,
    #[serde(default = "Profile::default_years")]
    pub years_experience: f64,
    #[serde(default = "Profile::default_success_rate", alias = "success_rate")]
    pub historical_success_rate: f64,
}

impl Profile {
    pub const DEFAULT_RATE_MIN: f64 = 25.0;
    pub const DEFAULT_RATE_MAX: f64 = 100.0;
    pub const DEFAULT_YEARS: f64 = 3.0;
    pub const DEFAULT_SUCCESS_RATE: f64 = 0.8;

    fn default_rate_min() -> f64 {
        Self::DEFAULT_RATE_MIN
    }

    fn default_rate_max() -> f64 {
        Self::DEFAULT_RATE_MAX
    }

    fn default_years() -> f64 {
        Self::DEFAULT_YEARS
    }

    fn default_success_rate() -> f64 {
        Self::DEFAULT_SUCCESS_RATE
    }

    pub fn new<I, S>(skills: I, rate_min: f64, rate_max: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: String::new(),
            skills: skills.into_iter().map(Into::into).collect(),
            rate_min,
            rate_max,
            years_experience: Self::DEFAULT_YEARS,
            historical_success_rate: Self::DEFAULT_SUCCESS_RATE,
        }
    }

    pub fn with_track_record(mut self, years_experience: f64, success_rate: f64) -> Self {
        self.years_experience = years_experience;
        self.historical_success_rate = success_rate;
        self
    }

    /// Copy with the documented input invariants restored.
    ///
    /// Non-finite numbers fall back to defaults, negative values are floored at zero, an
    /// inverted rate range is swapped, and a success rate above 1 is read as a percentage.
    pub fn sanitized(&self) -> Self {
        let finite_or = |value: f64, fallback: f64| {
            if value.is_finite() {
                value.max(0.0)
            } else {
                fallback
            }
        };

        let mut rate_min = finite_or(self.rate_min, Self::DEFAULT_RATE_MIN);
        let mut rate_max = finite_or(self.rate_max, Self::DEFAULT_RATE_MAX);
        if rate_min > rate_max {
            std::mem::swap(&mut rate_min, &mut rate_max);
        }

        let mut success = finite_or(self.historical_success_rate, Self::DEFAULT_SUCCESS_RATE);
        if success > 1.0 {
            success /= 100.0;
        }

        Self {
            name: self.name.trim().to_string(),
            skills: self.skills.clone(),
            rate_min,
            rate_max,
            years_experience: finite_or(self.years_experience, Self::DEFAULT_YEARS),
            historical_success_rate: success.clamp(0.0, 1.0),
        }
    }

    /// Lowercased, trimmed skill set used for case-insensitive comparisons.
    pub fn skill_set(&self) -> HashSet<String> {
        skill_set(&self.skills)
    }
}

pub(crate) fn skill_set(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}

/// Categorical risk attached to every recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Why a single record was left out of a batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkipReason {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    #[error("gig has no identifier")]
    MissingId,
    #[error("field `{field}` is not a finite number")]
    NonFinite { field: &'static str },
    #[error("budget_min {min} exceeds budget_max {max}")]
    InvertedBudget { min: f64, max: f64 },
    #[error("row could not be decoded: {detail}")]
    UnreadableRow { detail: String },
}

/// Coarse competition tier shared by pricing and market insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl CompetitionLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }
}

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

pub(crate) const DESCRIPTION_LIMIT: usize = 500;
const MAX_RATING: f64 = 5.0;

pub(crate) fn collapse_whitespace(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn truncate_chars(value: &str, limit: usize) -> String {
    match value.char_indices().nth(limit) {
        Some((byte_index, _)) => value[..byte_index].to_string(),
        None => value.to_string(),
    }
}

/// Trim skills, drop blanks, and drop case-insensitive repeats keeping the first spelling.
pub(crate) fn clean_skills<I>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    skills
        .into_iter()
        .map(|skill| collapse_whitespace(&skill))
        .filter(|skill| !skill.is_empty())
        .filter(|skill| seen.insert(skill.to_lowercase()))
        .collect()
}

pub(crate) fn split_skill_list(raw: &str) -> Vec<String> {
    let separator = [';', '|']
        .into_iter()
        .find(|separator| raw.contains(*separator))
        .unwrap_or(',');
    raw.split(separator).map(str::to_string).collect()
}

/// Skills from a JSON array of strings (or of objects carrying `key`), or a delimited string.
pub(crate) fn skills_from(value: Option<&Value>, key: &str) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(skill) => Some(skill.clone()),
                Value::Object(fields) => fields.get(key).and_then(text),
                _ => None,
            })
            .collect(),
        Some(Value::String(raw)) => split_skill_list(raw),
        _ => Vec::new(),
    }
}

pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Finite number from a JSON number or a numeric string.
pub(crate) fn number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().trim_start_matches('$').replace(',', "").parse().ok(),
        _ => None,
    };
    parsed.filter(|value: &f64| value.is_finite())
}

/// Budget-like number where zero or less means "not advertised".
pub(crate) fn amount(value: Option<&Value>) -> Option<f64> {
    number(value).filter(|value| *value > 0.0)
}

pub(crate) fn count(value: Option<&Value>) -> u32 {
    number(value)
        .filter(|value| *value > 0.0)
        .map(|value| value.min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}

pub(crate) fn rating(value: Option<&Value>) -> f64 {
    number(value)
        .map(|value| value.clamp(0.0, MAX_RATING))
        .unwrap_or(0.0)
}

pub(crate) fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    trimmed.parse::<i64>().ok().and_then(from_unix_seconds)
}

fn from_unix_seconds(seconds: i64) -> Option<NaiveDateTime> {
    if seconds <= 0 {
        return None;
    }
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc())
}

pub(crate) fn datetime(value: Option<&Value>) -> Option<NaiveDateTime> {
    match value? {
        Value::Number(number) => number.as_i64().and_then(from_unix_seconds),
        Value::String(raw) => parse_datetime(raw),
        _ => None,
    }
}

pub(crate) fn date(value: Option<&Value>) -> Option<NaiveDate> {
    datetime(value).map(|dt| dt.date())
}

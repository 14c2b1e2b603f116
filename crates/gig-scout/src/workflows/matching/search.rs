use serde::{Deserialize, Serialize};

use super::domain::{skill_set, Gig, GigId, Platform, ProjectType};
use crate::workflows::round_to;

const EXCERPT_CHARS: usize = 200;

/// Filters applied by [`search_gigs`]. Absent filters match everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub min_budget: Option<f64>,
    #[serde(default)]
    pub max_budget: Option<f64>,
    #[serde(default)]
    pub project_type: Option<ProjectType>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default = "SearchCriteria::default_limit")]
    pub limit: usize,
}

impl SearchCriteria {
    pub const DEFAULT_LIMIT: usize = 10;

    fn default_limit() -> usize {
        Self::DEFAULT_LIMIT
    }

    pub fn for_skills<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skills: skills.into_iter().map(Into::into).collect(),
            min_budget: None,
            max_budget: None,
            project_type: None,
            platforms: Vec::new(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    fn admits(&self, gig: &Gig) -> bool {
        if !self.platforms.is_empty() && !self.platforms.contains(&gig.platform) {
            return false;
        }
        if self
            .project_type
            .is_some_and(|wanted| wanted != gig.project_type)
        {
            return false;
        }
        if let Some(ceiling) = self.max_budget.filter(|value| *value > 0.0) {
            let upper = gig.known_budget_max().or(gig.hourly_rate);
            if upper.is_some_and(|value| value > ceiling) {
                return false;
            }
        }
        if let Some(floor) = self.min_budget.filter(|value| *value > 0.0) {
            let lower = gig.budget_min.filter(|value| *value > 0.0).or(gig.hourly_rate);
            if lower.is_some_and(|value| value < floor) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub gig_id: GigId,
    pub platform: Platform,
    pub title: String,
    pub excerpt: String,
    pub project_type: ProjectType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    pub match_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub proposals_count: u32,
    pub client_rating: f64,
}

/// Plain coverage of the required skills, without the breadth bonus used for ranking.
pub fn skill_coverage(skills: &[String], required: &[String]) -> f64 {
    let required = skill_set(required);
    if required.is_empty() {
        return 0.5;
    }
    let offered = skill_set(skills);
    required.intersection(&offered).count() as f64 / required.len() as f64
}

/// Filter a corpus and order it by skill coverage, keeping input order among ties.
pub fn search_gigs(gigs: &[Gig], criteria: &SearchCriteria) -> Vec<SearchHit> {
    let offered = skill_set(&criteria.skills);

    let mut scored: Vec<(f64, &Gig)> = gigs
        .iter()
        .filter(|gig| criteria.admits(gig))
        .map(|gig| (skill_coverage(&criteria.skills, &gig.skills_required), gig))
        .filter(|(score, _)| *score > 0.0)
        .collect();
    scored.sort_by(|left, right| right.0.total_cmp(&left.0));
    scored.truncate(criteria.limit);

    scored
        .into_iter()
        .map(|(score, gig)| {
            let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = gig
                .skills_required
                .iter()
                .cloned()
                .partition(|skill| offered.contains(&skill.trim().to_lowercase()));

            SearchHit {
                gig_id: gig.id.clone(),
                platform: gig.platform.clone(),
                title: gig.title.clone(),
                excerpt: excerpt(&gig.description),
                project_type: gig.project_type,
                budget_min: gig.budget_min,
                budget_max: gig.budget_max,
                hourly_rate: gig.hourly_rate,
                match_score: round_to(score, 3),
                matched_skills,
                missing_skills,
                proposals_count: gig.proposals_count,
                client_rating: gig.client_rating,
            }
        })
        .collect()
}

fn excerpt(description: &str) -> String {
    if description.chars().count() <= EXCERPT_CHARS {
        return description.to_string();
    }
    let mut cut: String = description.chars().take(EXCERPT_CHARS).collect();
    cut.push_str("...");
    cut
}

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{Gig, Profile};
use super::ranker::Recommendation;
use crate::workflows::round_to;

/// Prompt-in, text-out collaborator (LLM or otherwise). No network client ships here.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("text generator unavailable: {0}")]
    Unavailable(String),
    #[error("text generator returned an empty response")]
    Empty,
}

/// Builds proposal text, preferring the generator and falling back to a fixed template.
#[derive(Clone, Default)]
pub struct ProposalDrafter {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl ProposalDrafter {
    pub fn template_only() -> Self {
        Self { generator: None }
    }

    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    pub fn draft(&self, gig: &Gig, profile: &Profile, recommendation: &Recommendation) -> String {
        if let Some(generator) = &self.generator {
            let prompt = proposal_prompt(gig, profile, recommendation);
            match generator.generate(&prompt) {
                Ok(text) if !text.trim().is_empty() => return text.trim().to_string(),
                Ok(_) => warn!(gig_id = %gig.id, error = %GenerationError::Empty, "proposal generation failed"),
                Err(err) => warn!(gig_id = %gig.id, error = %err, "proposal generation failed"),
            }
        }

        template_proposal(gig, profile)
    }
}

fn display_name(profile: &Profile) -> &str {
    if profile.name.trim().is_empty() {
        "Freelancer"
    } else {
        profile.name.trim()
    }
}

pub fn proposal_prompt(gig: &Gig, profile: &Profile, recommendation: &Recommendation) -> String {
    format!(
        "Generate a compelling, professional freelance proposal for this job:\n\n\
         Job Title: {title}\n\
         Description: {description}\n\
         Budget: ${bid:.2}\n\
         Skills Required: {skills}\n\n\
         Freelancer:\n\
         Name: {name}\n\
         Experience: {years} years\n\
         Success Rate: {success:.0}%\n\n\
         Strategy: {approach}\n\n\
         Write 200-300 words that show understanding of the requirements, highlight relevant \
         experience, give a clear value proposition with timeline and deliverables, and end \
         with a call to action.",
        title = gig.title,
        description = gig.description,
        bid = recommendation.suggested_bid(),
        skills = gig.skills_required.join(", "),
        name = display_name(profile),
        years = profile.years_experience,
        success = profile.historical_success_rate * 100.0,
        approach = recommendation.suggested_approach,
    )
}

/// Deterministic proposal used whenever no generator output is available.
pub fn template_proposal(gig: &Gig, profile: &Profile) -> String {
    let lead_skills = gig
        .skills_required
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let lead_skills = if lead_skills.is_empty() {
        "this field".to_string()
    } else {
        lead_skills
    };

    format!(
        "Dear Hiring Manager,\n\n\
         I am excited to submit my proposal for \"{title}\".\n\n\
         With {years} years of experience in {lead_skills}, I am confident I can deliver \
         exceptional results for this project.\n\n\
         My approach:\n\
         - Thorough understanding of your requirements\n\
         - Clear communication throughout the project\n\
         - Timely delivery with quality assurance\n\
         - Post-project support\n\n\
         I have a {success:.0}% success rate and have completed similar projects with \
         excellent client satisfaction.\n\n\
         Looking forward to working with you!\n\n\
         Best regards,\n\
         {name}",
        title = gig.title,
        years = profile.years_experience,
        success = profile.historical_success_rate * 100.0,
        name = display_name(profile),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationStrategy {
    Direct,
    ValueFocused,
    Gradual,
}

impl NegotiationStrategy {
    pub const fn description(self) -> &'static str {
        match self {
            Self::Direct => "Direct approach - reasonable increase",
            Self::ValueFocused => "Value-focused approach - emphasize unique skills",
            Self::Gradual => "Gradual approach - suggest trial period or bonus structure",
        }
    }

    pub const fn success_outlook(self) -> &'static str {
        match self {
            Self::Direct => "High (70-80%)",
            Self::ValueFocused => "Medium (40-60%)",
            Self::Gradual => "Low (20-40%)",
        }
    }
}

/// Rate negotiation plan for moving a client from `current_rate` to `target_rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationPlan {
    pub current_rate: f64,
    pub target_rate: f64,
    pub rate_increase_percent: f64,
    pub strategy: NegotiationStrategy,
    pub success_outlook: String,
    pub alternatives: Vec<String>,
    pub justification_points: Vec<String>,
}

impl NegotiationPlan {
    const DIRECT_MAX_INCREASE: f64 = 20.0;
    const VALUE_MAX_INCREASE: f64 = 50.0;
    const TRIAL_HOURS: u32 = 10;

    pub fn new(current_rate: f64, target_rate: f64, justification_points: Vec<String>) -> Self {
        let increase = if current_rate > 0.0 {
            (target_rate - current_rate) / current_rate * 100.0
        } else {
            0.0
        };

        let strategy = if increase <= Self::DIRECT_MAX_INCREASE {
            NegotiationStrategy::Direct
        } else if increase <= Self::VALUE_MAX_INCREASE {
            NegotiationStrategy::ValueFocused
        } else {
            NegotiationStrategy::Gradual
        };

        let justification_points = if justification_points.is_empty() {
            vec![
                "Extensive experience in required technologies".to_string(),
                "Strong track record of successful project delivery".to_string(),
                "Additional value through code review and optimization".to_string(),
            ]
        } else {
            justification_points
        };

        let trial_rate = (current_rate + target_rate) / 2.0;
        Self {
            current_rate,
            target_rate,
            rate_increase_percent: round_to(increase, 1),
            strategy,
            success_outlook: strategy.success_outlook().to_string(),
            alternatives: vec![
                format!(
                    "Offer trial rate of ${trial_rate:.2}/hr for first {} hours",
                    Self::TRIAL_HOURS
                ),
                "Suggest performance bonus structure".to_string(),
                "Propose higher rate for rush deliveries or after-hours work".to_string(),
            ],
            justification_points,
        }
    }

    /// Prompt for a generator that writes the negotiation message itself.
    pub fn prompt(&self) -> String {
        let points = self
            .justification_points
            .iter()
            .map(|point| format!("- {point}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "Write a diplomatic rate negotiation message.\n\
             Current offered rate: ${:.2}/hr\n\
             Target rate: ${:.2}/hr\n\
             Increase requested: {:.1}%\n\
             Approach: {}\n\
             Justification:\n{points}\n\
             Keep it concise (150-300 words), appreciative, and open to alternatives.",
            self.current_rate,
            self.target_rate,
            self.rate_increase_percent,
            self.strategy.description(),
        )
    }
}

//! Profile-to-gig matching: scoring, ranking, pricing, and the service that exposes them.

pub mod bidding;
pub mod domain;
pub mod pricing;
pub mod proposal;
pub mod ranker;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod search;
pub mod service;

#[cfg(test)]
mod tests;

pub use bidding::{plan_bids, AutoBidPolicy, BidDraft, BidStatus};
pub use domain::{
    CompetitionLevel, Gig, GigId, Platform, Profile, ProjectType, RiskLevel, SkipReason,
};
pub use pricing::{
    PriceQuote, PricingAdvisor, PricingConfidence, PricingFactors, PricingPolicy, PricingStrategy,
};
pub use proposal::{
    GenerationError, NegotiationPlan, NegotiationStrategy, ProposalDrafter, TextGenerator,
};
pub use ranker::{RankingReport, Recommendation, RecommendationRanker, SkippedGig};
pub use repository::{GigRepository, RepositoryError};
pub use router::matching_router;
pub use scoring::{RecommendationWeights, ScoreBundle, ScoringEngine, ScoringPolicy};
pub use search::{search_gigs, SearchCriteria, SearchHit};
pub use service::{GigMatchService, MatchServiceError};

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use super::domain::{Gig, GigId, Profile};
use super::pricing::{PriceQuote, PricingAdvisor};
use super::ranker::{RankingReport, RecommendationRanker};
use super::repository::{GigRepository, RepositoryError};
use super::scoring::{ScoringEngine, ScoringPolicy};
use super::search::{search_gigs, SearchCriteria, SearchHit};
use crate::config::MatchingConfig;
use crate::workflows::intake::{try_normalize, GigImportError, GigImporter};
use crate::workflows::market::{
    market_trends, research_client, ClientProfile, ClientSignals, MarketInsight,
};

/// Service composing the gig repository with the ranker, pricing advisor, and analyzers.
pub struct GigMatchService<R> {
    repository: Arc<R>,
    ranker: Arc<RecommendationRanker>,
    pricing: Arc<PricingAdvisor>,
    top_n: usize,
}

impl<R> GigMatchService<R>
where
    R: GigRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: &MatchingConfig) -> Self {
        let policy = ScoringPolicy::default().with_fixed_price_hours(config.fixed_price_hours);
        Self::with_components(
            repository,
            RecommendationRanker::new(ScoringEngine::new(policy)),
            PricingAdvisor::default(),
            config.top_n,
        )
    }

    pub fn with_components(
        repository: Arc<R>,
        ranker: RecommendationRanker,
        pricing: PricingAdvisor,
        top_n: usize,
    ) -> Self {
        Self {
            repository,
            ranker: Arc::new(ranker),
            pricing: Arc::new(pricing),
            top_n: top_n.max(1),
        }
    }

    pub fn default_top_n(&self) -> usize {
        self.top_n
    }

    pub fn ranker(&self) -> &RecommendationRanker {
        &self.ranker
    }

    fn fixed_price_hours(&self) -> f64 {
        self.ranker.engine().policy().fixed_price_hours
    }

    /// Rank every stored gig for `profile`.
    pub fn recommend(
        &self,
        profile: &Profile,
        top_n: Option<usize>,
    ) -> Result<RankingReport, MatchServiceError> {
        let gigs = self.repository.list()?;
        Ok(self.rank_gigs(profile, &gigs, top_n))
    }

    pub fn rank_gigs(&self, profile: &Profile, gigs: &[Gig], top_n: Option<usize>) -> RankingReport {
        self.ranker
            .rank(profile, gigs, top_n.unwrap_or(self.top_n))
    }

    /// Rank caller-supplied raw records; malformed records land in `skipped`.
    pub fn rank_records(
        &self,
        profile: &Profile,
        records: &[Value],
        platform: &str,
        top_n: Option<usize>,
    ) -> RankingReport {
        let candidates = records
            .iter()
            .map(|record| try_normalize(record, platform));
        self.ranker
            .rank_candidates(profile, candidates, top_n.unwrap_or(self.top_n))
    }

    /// Rank gigs from an inline CSV export; undecodable rows land in `skipped`.
    pub fn rank_csv(
        &self,
        profile: &Profile,
        csv: &str,
        top_n: Option<usize>,
    ) -> Result<RankingReport, MatchServiceError> {
        let candidates = GigImporter::candidates_from_reader(csv.as_bytes())?;
        info!(rows = candidates.len(), "imported gig CSV export");
        Ok(self
            .ranker
            .rank_candidates(profile, candidates, top_n.unwrap_or(self.top_n)))
    }

    pub fn gig(&self, gig_id: &GigId) -> Result<Gig, MatchServiceError> {
        let gig = self
            .repository
            .fetch(gig_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(gig)
    }

    pub fn price(&self, gig_id: &GigId, profile: &Profile) -> Result<PriceQuote, MatchServiceError> {
        let gig = self.gig(gig_id)?;
        Ok(self.pricing.quote(&gig, profile))
    }

    pub fn search(&self, criteria: &SearchCriteria) -> Result<Vec<SearchHit>, MatchServiceError> {
        let gigs = self.repository.list()?;
        Ok(search_gigs(&gigs, criteria))
    }

    /// One insight per requested skill, in request order.
    pub fn market(&self, skills: &[String]) -> Result<Vec<MarketInsight>, MatchServiceError> {
        let gigs = self.repository.list()?;
        Ok(market_trends(skills, &gigs, self.fixed_price_hours()))
    }

    pub fn research_client(&self, signals: &ClientSignals) -> ClientProfile {
        research_client(signals)
    }
}

/// Error raised by the match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Import(#[from] GigImportError),
}

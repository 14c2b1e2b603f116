use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::{GigId, Profile};
use super::repository::{GigRepository, RepositoryError};
use super::search::SearchCriteria;
use super::service::{GigMatchService, MatchServiceError};
use crate::workflows::market::ClientSignals;

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendRequest {
    profile: Profile,
    #[serde(default)]
    top_n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchRequest {
    profile: Profile,
    #[serde(default)]
    top_n: Option<usize>,
    #[serde(default)]
    platform: String,
    #[serde(default)]
    records: Option<Vec<Value>>,
    #[serde(default)]
    gigs_csv: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PricingRequest {
    profile: Profile,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MarketRequest {
    skills: Vec<String>,
}

/// Router builder exposing recommendation, pricing, search, and analyzer endpoints.
pub fn matching_router<R>(service: Arc<GigMatchService<R>>) -> Router
where
    R: GigRepository + 'static,
{
    Router::new()
        .route("/api/v1/recommendations", post(recommend_handler::<R>))
        .route("/api/v1/recommendations/batch", post(batch_handler::<R>))
        .route("/api/v1/gigs/search", post(search_handler::<R>))
        .route("/api/v1/gigs/:gig_id", get(gig_handler::<R>))
        .route("/api/v1/gigs/:gig_id/pricing", post(pricing_handler::<R>))
        .route("/api/v1/market", post(market_handler::<R>))
        .route("/api/v1/clients/research", post(client_handler::<R>))
        .with_state(service)
}

pub(crate) async fn recommend_handler<R>(
    State(service): State<Arc<GigMatchService<R>>>,
    axum::Json(request): axum::Json<RecommendRequest>,
) -> Response
where
    R: GigRepository + 'static,
{
    match service.recommend(&request.profile, request.top_n) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn batch_handler<R>(
    State(service): State<Arc<GigMatchService<R>>>,
    axum::Json(request): axum::Json<BatchRequest>,
) -> Response
where
    R: GigRepository + 'static,
{
    let result = match (&request.records, &request.gigs_csv) {
        (Some(records), _) => Ok(service.rank_records(
            &request.profile,
            records,
            &request.platform,
            request.top_n,
        )),
        (None, Some(csv)) => service.rank_csv(&request.profile, csv, request.top_n),
        (None, None) => {
            let payload = json!({
                "error": "provide either `records` or `gigs_csv`",
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match result {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn gig_handler<R>(
    State(service): State<Arc<GigMatchService<R>>>,
    Path(gig_id): Path<String>,
) -> Response
where
    R: GigRepository + 'static,
{
    let id = GigId(gig_id);
    match service.gig(&id) {
        Ok(gig) => (StatusCode::OK, axum::Json(gig)).into_response(),
        Err(MatchServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn pricing_handler<R>(
    State(service): State<Arc<GigMatchService<R>>>,
    Path(gig_id): Path<String>,
    axum::Json(request): axum::Json<PricingRequest>,
) -> Response
where
    R: GigRepository + 'static,
{
    let id = GigId(gig_id);
    match service.price(&id, &request.profile) {
        Ok(quote) => (StatusCode::OK, axum::Json(quote)).into_response(),
        Err(MatchServiceError::Repository(RepositoryError::NotFound)) => not_found(&id),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn search_handler<R>(
    State(service): State<Arc<GigMatchService<R>>>,
    axum::Json(criteria): axum::Json<SearchCriteria>,
) -> Response
where
    R: GigRepository + 'static,
{
    match service.search(&criteria) {
        Ok(hits) => {
            let payload = json!({
                "total": hits.len(),
                "gigs": hits,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn market_handler<R>(
    State(service): State<Arc<GigMatchService<R>>>,
    axum::Json(request): axum::Json<MarketRequest>,
) -> Response
where
    R: GigRepository + 'static,
{
    match service.market(&request.skills) {
        Ok(insights) => (StatusCode::OK, axum::Json(insights)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn client_handler<R>(
    State(service): State<Arc<GigMatchService<R>>>,
    axum::Json(signals): axum::Json<ClientSignals>,
) -> Response
where
    R: GigRepository + 'static,
{
    let profile = service.research_client(&signals);
    (StatusCode::OK, axum::Json(profile)).into_response()
}

fn not_found(id: &GigId) -> Response {
    let payload = json!({
        "error": "gig not found",
        "gig_id": id.as_str(),
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn error_response(err: MatchServiceError) -> Response {
    let status = match &err {
        MatchServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        MatchServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        MatchServiceError::Import(_) => StatusCode::BAD_REQUEST,
    };
    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

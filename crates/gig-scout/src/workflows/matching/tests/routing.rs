use super::common::*;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::matching::GigMatchService;

fn post_json(uri: &str, body: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn profile_json() -> Value {
    serde_json::to_value(python_profile()).unwrap()
}

#[tokio::test]
async fn recommendations_route_returns_ranked_report() {
    let (service, _) = build_service();
    let router = matching_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/recommendations",
            &json!({ "profile": profile_json(), "top_n": 2 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let recommendations = payload["recommendations"].as_array().expect("array");
    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0]["gig_id"], "freelancer_002");
    assert_eq!(recommendations[0]["recommendation_score"], 0.798);
    assert_eq!(recommendations[0]["risk_level"], "low");
    assert_eq!(payload["evaluated"], 4);
}

#[tokio::test]
async fn recommendations_accept_profile_aliases_and_defaults() {
    let (service, _) = build_service();
    let router = matching_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/recommendations",
            &json!({ "profile": { "skills": ["python"], "hourly_rate_min": 40, "success_rate": 85 } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["recommendations"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn batch_route_reports_skipped_records() {
    let (service, _) = build_service();
    let router = matching_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/recommendations/batch",
            &json!({
                "profile": profile_json(),
                "platform": "upwork",
                "records": [
                    { "id": "0042", "title": "Django API", "content": { "budget": 2400, "skills": [{ "prettyName": "Python" }] } },
                    "garbage"
                ]
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["recommendations"][0]["gig_id"], "upwork_0042");
    assert_eq!(payload["skipped"][0]["index"], 1);
    assert_eq!(payload["skipped"][0]["reason"], "record is not a JSON object");
}

#[tokio::test]
async fn batch_route_requires_records_or_csv() {
    let (service, _) = build_service();
    let router = matching_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/recommendations/batch",
            &json!({ "profile": profile_json() }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn batch_route_ranks_inline_csv() {
    let (service, _) = build_service();
    let router = matching_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/recommendations/batch",
            &json!({
                "profile": profile_json(),
                "gigs_csv": "id,platform,title,budget_max,project_type,skills_required\ncsv_1,guru,ETL job,85,hourly,python\n"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["recommendations"][0]["platform"], "guru");
}

#[tokio::test]
async fn gig_route_returns_not_found_for_unknown_ids() {
    let (service, _) = build_service();
    let router = matching_router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/gigs/upwork_999")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["gig_id"], "upwork_999");
}

#[tokio::test]
async fn gig_route_returns_stored_gig() {
    let (service, _) = build_service();
    let router = matching_router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/gigs/upwork_001")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["project_type"], "fixed");
    assert_eq!(payload["platform"], "upwork");
}

#[tokio::test]
async fn pricing_route_quotes_stored_gig() {
    let (service, _) = build_service();
    let router = matching_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/gigs/upwork_001/pricing",
            &json!({ "profile": profile_json() }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(payload["optimal_price"].as_f64().is_some());
    assert!(payload.get("strategy_note").is_some());
}

#[tokio::test]
async fn search_route_lists_hits() {
    let (service, _) = build_service();
    let router = matching_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/gigs/search",
            &json!({ "skills": ["python"], "platforms": ["freelancer"], "limit": 1 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], 1);
    assert_eq!(payload["gigs"][0]["platform"], "freelancer");
}

#[tokio::test]
async fn market_and_client_routes_return_insights() {
    let (service, _) = build_service();
    let router = matching_router_with_service(service);

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/market",
            &json!({ "skills": ["django", "haskell"] }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload[0]["skill"], "django");
    assert_eq!(payload[1]["rate_trend"], "unknown");

    let response = router
        .oneshot(post_json(
            "/api/v1/clients/research",
            &json!({ "id": "c-1", "rating": 3.0, "reviews": 8 }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["client_id"], "c-1");
    assert!(!payload["red_flags"].as_array().expect("flags").is_empty());
}

#[tokio::test]
async fn gig_handler_maps_outages_to_service_unavailable() {
    let service = Arc::new(GigMatchService::new(
        Arc::new(UnavailableRepository),
        &matching_config(),
    ));

    let response = crate::workflows::matching::router::gig_handler::<UnavailableRepository>(
        State(service),
        Path("upwork_001".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

use crate::infra::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use decision_bridge::contract::{DecisionResponse, RequestContract, TrackingContext};
use decision_bridge::diff::{Comparison, LabeledOutput};
use decision_bridge::error::AppError;
use decision_bridge::render::RenderModel;
use decision_bridge::topics::{Outcome, TopicRecord};
use decision_bridge::DecisionBridge;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

type SharedBridge = Arc<DecisionBridge>;

#[derive(Debug, Serialize)]
pub(crate) struct TopicSummary {
    pub(crate) id: String,
    pub(crate) slug: String,
    pub(crate) question: String,
    pub(crate) context_line: String,
    pub(crate) eligible_outcomes: Vec<Outcome>,
}

impl From<&TopicRecord> for TopicSummary {
    fn from(record: &TopicRecord) -> Self {
        Self {
            id: record.id.clone(),
            slug: record.slug.clone(),
            question: record.question.clone(),
            context_line: record.context_line.clone(),
            eligible_outcomes: record.eligible_outcomes.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareRequest {
    pub(crate) a: LabeledOutput,
    pub(crate) b: LabeledOutput,
}

#[derive(Debug, Serialize)]
pub(crate) struct SitemapResponse {
    pub(crate) paths: Vec<String>,
}

pub(crate) fn topic_router(bridge: SharedBridge) -> Router {
    Router::new()
        .route("/api/v1/topics", get(list_topics))
        .route("/api/v1/topics/:slug", get(topic_detail))
        .route("/api/v1/topics/:slug/contract", post(contract_endpoint))
        .route("/api/v1/topics/:slug/render", post(render_endpoint))
        .route("/api/v1/topics/:slug/compare", post(compare_endpoint))
        .route("/api/v1/sitemap", get(sitemap_endpoint))
        .with_state(bridge)
}

pub(crate) fn with_topic_routes(bridge: SharedBridge) -> Router {
    topic_router(bridge)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn list_topics(State(bridge): State<SharedBridge>) -> Json<Vec<TopicSummary>> {
    Json(bridge.index().published().map(TopicSummary::from).collect())
}

async fn topic_detail(
    State(bridge): State<SharedBridge>,
    Path(slug): Path<String>,
) -> Result<Json<TopicRecord>, AppError> {
    Ok(Json(bridge.published_topic(&slug)?.clone()))
}

async fn contract_endpoint(
    State(bridge): State<SharedBridge>,
    Path(slug): Path<String>,
    tracking: Option<Json<TrackingContext>>,
) -> Result<Json<RequestContract>, AppError> {
    let tracking = tracking.map(|Json(tracking)| tracking).unwrap_or_default();
    Ok(Json(bridge.contract(&slug, tracking)?))
}

async fn render_endpoint(
    State(bridge): State<SharedBridge>,
    Path(slug): Path<String>,
    Json(response): Json<DecisionResponse>,
) -> Result<Json<RenderModel>, AppError> {
    Ok(Json(bridge.render(&slug, &response.output)?))
}

async fn compare_endpoint(
    State(bridge): State<SharedBridge>,
    Path(slug): Path<String>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<Comparison>, AppError> {
    Ok(Json(bridge.compare(&slug, &request.a, &request.b)?))
}

async fn sitemap_endpoint(State(bridge): State<SharedBridge>) -> Json<SitemapResponse> {
    Json(SitemapResponse {
        paths: bridge.sitemap(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    const JULY_SLUG: &str = "tanzania-safari-in-july";

    fn build_router() -> Router {
        let bridge = DecisionBridge::standard().expect("standard topics index");
        topic_router(Arc::new(bridge))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.expect("router dispatch");
        let status = response.status();
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload = serde_json::from_slice(&body).expect("json");
        (status, payload)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
            .expect("request")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    fn decision(outcome: &str, confidence: f64) -> Value {
        json!({
            "type": "decision",
            "outcome": outcome,
            "headline": "July works",
            "summary": "Dry season game viewing is at its best.",
            "assumptions": ["Travel in July"],
            "tradeoffs": { "gains": ["Great sightings"], "losses": ["Higher prices"] },
            "change_conditions": ["Budget drops"],
            "confidence": confidence
        })
    }

    #[tokio::test]
    async fn lists_only_published_topics() {
        let (status, payload) = send(build_router(), get_request("/api/v1/topics")).await;

        assert_eq!(status, StatusCode::OK);
        let topics = payload.as_array().expect("array");
        assert!(topics.iter().any(|topic| topic["slug"] == json!(JULY_SLUG)));
        assert!(topics
            .iter()
            .all(|topic| topic["id"] != json!("zm_walking_safari")));
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let (status, payload) =
            send(build_router(), get_request("/api/v1/topics/no-such-topic")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(payload["error"]
            .as_str()
            .is_some_and(|message| message.contains("no-such-topic")));
    }

    #[tokio::test]
    async fn contract_echoes_tracking_ids() {
        let (status, payload) = send(
            build_router(),
            post_json(
                &format!("/api/v1/topics/{JULY_SLUG}/contract"),
                json!({ "session_id": "sess-42" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["task"], json!("DECISION"));
        assert_eq!(payload["tracking"]["session_id"], json!("sess-42"));
        assert_eq!(payload["tracking"]["lead_id"], Value::Null);
        assert_eq!(payload["request"]["scope"]["slug"], json!(JULY_SLUG));
    }

    #[tokio::test]
    async fn contract_accepts_an_empty_body() {
        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/v1/topics/{JULY_SLUG}/contract"))
            .body(Body::empty())
            .expect("request");
        let (status, payload) = send(build_router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            payload["tracking"],
            json!({ "session_id": null, "traveler_id": null, "lead_id": null })
        );
    }

    #[tokio::test]
    async fn render_turns_refusals_into_recovery() {
        let (status, payload) = send(
            build_router(),
            post_json(
                &format!("/api/v1/topics/{JULY_SLUG}/render"),
                json!({ "output": { "type": "refusal", "reason": "inputs_conflict_unbounded" } }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["type"], json!("refusal"));
        let inputs = payload["recovery"]["missing_inputs"]
            .as_array()
            .expect("inputs");
        assert_eq!(inputs[0]["key"], json!("user_context.budget_band"));
        assert_eq!(inputs[1]["key"], json!("user_context.comfort_level"));
        assert!(inputs.len() >= 3);
    }

    #[tokio::test]
    async fn render_adds_fit_to_decisions() {
        let (status, payload) = send(
            build_router(),
            post_json(
                &format!("/api/v1/topics/{JULY_SLUG}/render"),
                json!({ "output": decision("book", 0.8) }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["type"], json!("decision"));
        assert_eq!(
            payload["fit"]["primary_condition"],
            json!("Travel in July")
        );
        assert!(payload["fit"]["not_ideal_for"]
            .as_array()
            .is_some_and(|items| (2..=4).contains(&items.len())));
    }

    #[tokio::test]
    async fn compare_reports_differences_or_skips() {
        let (status, payload) = send(
            build_router(),
            post_json(
                &format!("/api/v1/topics/{JULY_SLUG}/compare"),
                json!({
                    "a": { "label": "Now", "output": decision("book", 0.8) },
                    "b": { "label": "Later", "output": decision("wait", 0.6) }
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["status"], json!("compared"));
        assert_eq!(payload["has_differences"], json!(true));
        assert_eq!(payload["outcome"]["value_b"], json!("wait"));

        let (status, payload) = send(
            build_router(),
            post_json(
                &format!("/api/v1/topics/{JULY_SLUG}/compare"),
                json!({
                    "a": { "label": "Now", "output": decision("book", 0.8) },
                    "b": { "label": "Later", "output": { "type": "refusal", "reason": "Missing budget" } }
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["status"], json!("skipped"));
        assert_eq!(payload["refused"], json!(["Later"]));
    }

    #[tokio::test]
    async fn sitemap_lists_published_paths() {
        let (status, payload) = send(build_router(), get_request("/api/v1/sitemap")).await;

        assert_eq!(status, StatusCode::OK);
        let paths = payload["paths"].as_array().expect("paths");
        assert!(paths.contains(&json!(format!("/decisions/{JULY_SLUG}"))));
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }
}

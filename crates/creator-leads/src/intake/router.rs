use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::collaborators::{LeadStore, Notifier};
use super::domain::LeadKind;
use super::draft::coerce_number;
use super::service::LeadIntakeService;
use super::session::{SessionError, SubmitOutcome};

/// Router exposing form schemas, live tier lookups and lead submission.
pub fn lead_router<S, N>(service: Arc<LeadIntakeService<S, N>>) -> Router
where
    S: LeadStore + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/api/v1/leads/submit/:kind", post(submit_handler::<S, N>))
        .route("/api/v1/leads/forms/:kind", get(schema_handler::<S, N>))
        .route("/api/v1/budget-tier", get(tier_handler::<S, N>))
        .with_state(service)
}

fn unknown_kind(raw: &str) -> Response {
    let payload = json!({
        "error": format!("unknown lead kind `{raw}`"),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

pub(crate) async fn submit_handler<S, N>(
    State(service): State<Arc<LeadIntakeService<S, N>>>,
    Path(kind): Path<String>,
    Json(payload): Json<Value>,
) -> Response
where
    S: LeadStore + 'static,
    N: Notifier + 'static,
{
    let Some(lead_kind) = LeadKind::from_slug(&kind) else {
        return unknown_kind(&kind);
    };

    let session = service.open_form(lead_kind);
    if let Err(error) = session.load_json(&payload) {
        let status = match error {
            SessionError::Draft(_) => StatusCode::BAD_REQUEST,
            SessionError::InFlight | SessionError::AlreadySubmitted => StatusCode::CONFLICT,
        };
        let payload = json!({
            "error": error.to_string(),
        });
        return (status, Json(payload)).into_response();
    }

    match session.submit().await {
        SubmitOutcome::Submitted(success) => {
            (StatusCode::CREATED, Json(success.view())).into_response()
        }
        SubmitOutcome::Rejected(errors) => {
            let payload = json!({
                "errors": errors,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        SubmitOutcome::Failed { message } => {
            let payload = json!({
                "error": message,
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
        SubmitOutcome::AlreadyInFlight | SubmitOutcome::AlreadySubmitted => {
            let payload = json!({
                "error": "submission already handled",
            });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn schema_handler<S, N>(
    State(service): State<Arc<LeadIntakeService<S, N>>>,
    Path(kind): Path<String>,
) -> Response
where
    S: LeadStore + 'static,
    N: Notifier + 'static,
{
    match LeadKind::from_slug(&kind) {
        Some(lead_kind) => {
            let schema = service.schema(lead_kind);
            (StatusCode::OK, Json(schema.as_ref().clone())).into_response()
        }
        None => unknown_kind(&kind),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TierQuery {
    #[serde(default)]
    budget: String,
}

/// Budget arrives as raw input text; anything unparseable classifies as zero.
pub(crate) async fn tier_handler<S, N>(
    State(service): State<Arc<LeadIntakeService<S, N>>>,
    Query(query): Query<TierQuery>,
) -> Response
where
    S: LeadStore + 'static,
    N: Notifier + 'static,
{
    let budget = coerce_number(&query.budget);
    let placement = service.classify_budget(budget);
    (StatusCode::OK, Json(placement)).into_response()
}

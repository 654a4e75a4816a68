use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{OrganizationId, WorkOrderId};
use super::service::{DispatchService, DispatchServiceError};
use super::snapshot::DispatchSnapshotProvider;

/// Request body for a recommendation. The organization id travels with the
/// request because authentication lives outside this crate.
#[derive(Debug, Deserialize)]
pub struct DispatchRecommendationRequest {
    pub work_order_id: WorkOrderId,
    pub organization_id: OrganizationId,
}

/// Router builder exposing the dispatch recommendation endpoint.
pub fn dispatch_router<P>(service: Arc<DispatchService<P>>) -> Router
where
    P: DispatchSnapshotProvider + 'static,
{
    Router::new()
        .route(
            "/api/v1/dispatch/recommendations",
            post(recommend_handler::<P>),
        )
        .with_state(service)
}

pub(crate) async fn recommend_handler<P>(
    State(service): State<Arc<DispatchService<P>>>,
    axum::Json(request): axum::Json<DispatchRecommendationRequest>,
) -> Response
where
    P: DispatchSnapshotProvider + 'static,
{
    match service
        .recommend(request.work_order_id, request.organization_id)
        .await
    {
        Ok(recommendation) => (StatusCode::OK, axum::Json(recommendation)).into_response(),
        Err(error @ DispatchServiceError::WorkOrderNotFound(_)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error @ DispatchServiceError::NoCandidatesAvailable) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

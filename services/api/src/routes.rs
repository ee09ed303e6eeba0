use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use whose_turn_core::{SkillError, TurnSkill, TurnStore};
use whose_turn_types::RequestEnvelope;

/// Maps skill failures onto HTTP status codes. No response envelope is sent,
/// so the platform falls back to its generic error speech.
pub struct ApiError(SkillError);

impl From<SkillError> for ApiError {
    fn from(e: SkillError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SkillError::InvalidApplicationId { .. } => StatusCode::FORBIDDEN,
            SkillError::UnknownIntent(_) | SkillError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        tracing::error!("Request failed: {}", self.0);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Builds the application router around a shared skill.
///
/// *   `POST /`: the skill endpoint the voice platform calls.
/// *   `GET /health`: liveness plus a summary of the loaded configuration.
pub fn router<S>(skill: Arc<TurnSkill<S>>) -> Router
where
    S: TurnStore + 'static,
{
    Router::new()
        .route("/", post(skill_handler::<S>))
        .route("/health", get(health::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(skill)
}

async fn skill_handler<S>(
    State(skill): State<Arc<TurnSkill<S>>>,
    Json(envelope): Json<RequestEnvelope>,
) -> Result<Response, ApiError>
where
    S: TurnStore + 'static,
{
    match skill.handle(&envelope).await? {
        Some(response) => Ok(Json(response).into_response()),
        // SessionEndedRequest: the platform ignores any body.
        None => Ok(StatusCode::OK.into_response()),
    }
}

async fn health<S>(State(skill): State<Arc<TurnSkill<S>>>) -> Result<Json<serde_json::Value>, ApiError>
where
    S: TurnStore + 'static,
{
    let tracked_scopes = skill
        .store()
        .scope_count()
        .await
        .map_err(SkillError::Store)?;

    Ok(Json(json!({
        "status": "ok",
        "roster": skill.roster().names(),
        "scope": skill.scope(),
        "tracked_scopes": tracked_scopes,
    })))
}

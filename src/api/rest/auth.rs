use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::routing::post;
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::verify_password;
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/login", post(login))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub agent_id: Uuid,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let agent = state
        .store
        .find_agent_by_email(&payload.email)
        .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_string()))?;

    if !verify_password(&payload.password, &agent.password_hash) {
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    }

    let token = state.auth.issue(agent.id)?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer",
        agent_id: agent.id,
    }))
}

/// Agent identity taken from the `Authorization: Bearer` header. Handlers take
/// this instead of trusting an agent id in the request body.
pub struct AuthAgent(pub Uuid);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthAgent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("expected a bearer token".to_string()))?;

        let agent_id = state.auth.verify(token)?;
        Ok(AuthAgent(agent_id))
    }
}

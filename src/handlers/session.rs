use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, Claims};
use crate::config;
use crate::error::ApiError;
use crate::handlers::support;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /auth/login - exchange the configured service credential for a
/// bearer token
pub async fn login_post(
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let payload = support::reject_bad_json(payload)?;
    let username = support::require(&payload.username, "Login", "username")?;
    let password = payload.password.clone().unwrap_or_default();

    let security = &config::config().security;

    // An unset credential never authenticates; staging/production must
    // provide API_SERVICE_USER / API_SERVICE_PASSWORD via the environment.
    let authenticated = !security.service_password.is_empty()
        && username == security.service_user
        && password == security.service_password;

    if !authenticated {
        return Err(ApiError::unauthorized());
    }

    let token = generate_jwt(Claims::new(username.as_str()))
        .map_err(|e| ApiError::internal("create", "session", e))?;

    Ok(Json(json!({
        "token": token,
        "token_type": "Bearer",
        "expires_in": security.jwt_expiry_hours * 3600,
    })))
}

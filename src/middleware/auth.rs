use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::auth::Claims;
use crate::config;
use crate::error::ApiError;

/// Authenticated principal extracted from a bearer JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { username: claims.sub }
    }
}

/// Bearer-token verifier. A lookup, not an assertion: a missing header, a
/// malformed credential or an expired token all yield `None` so every route
/// can apply identical guard-then-proceed logic.
pub fn verify_bearer(headers: &HeaderMap) -> Option<AuthUser> {
    let token = extract_bearer_token(headers)?;
    let claims = validate_jwt(&token)?;
    Some(AuthUser::from(claims))
}

/// Authentication middleware applied to every /api route. Rejects with
/// 401 {"error":"Unauthorized"} before any other work happens; on success
/// the principal is injected as a request extension.
pub async fn require_auth(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let Some(principal) = verify_bearer(request.headers()) else {
        return Err(ApiError::unauthorized());
    };

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))?;

    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

/// Validate the token signature and expiry against the configured secret
fn validate_jwt(token: &str) -> Option<Claims> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return None;
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::generate_jwt;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(verify_bearer(&HeaderMap::new()).is_none());
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        assert!(verify_bearer(&headers_with("Basic dXNlcjpwYXNz")).is_none());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_bearer(&headers_with("Bearer not.a.jwt")).is_none());
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(verify_bearer(&headers_with("Bearer   ")).is_none());
    }

    #[test]
    fn valid_token_yields_principal() {
        let token = generate_jwt(Claims::new("admin")).unwrap();
        let principal = verify_bearer(&headers_with(&format!("Bearer {}", token)));
        assert_eq!(principal.unwrap().username, "admin");
    }

    #[test]
    fn expired_token_is_rejected() {
        use chrono::Utc;

        // Well past the default validation leeway
        let expired = Claims {
            sub: "admin".to_string(),
            exp: Utc::now().timestamp() - 3600,
            iat: Utc::now().timestamp() - 7200,
        };
        let token = generate_jwt(expired).unwrap();
        assert!(verify_bearer(&headers_with(&format!("Bearer {}", token))).is_none());
    }
}

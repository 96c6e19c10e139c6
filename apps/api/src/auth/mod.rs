//! API-key authentication for the protected /api surface.
//!
//! Keys arrive in the `x-api-key` header. Lookup joins `api_keys` to
//! `users`; a successful lookup touches `last_used_at` and injects the
//! user into request extensions for downstream handlers.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// The authenticated caller, available to protected handlers as an
/// `Extension<AuthedUser>`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthedUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

#[derive(Debug, FromRow)]
struct ApiKeyRow {
    key_id: Uuid,
    is_active: bool,
    user_id: Uuid,
    email: String,
    full_name: String,
}

async fn lookup_api_key(db: &PgPool, key: &str) -> Result<AuthedUser, AppError> {
    let row = sqlx::query_as::<_, ApiKeyRow>(
        "SELECT k.id AS key_id, k.is_active, u.id AS user_id, u.email, u.full_name \
         FROM api_keys k JOIN users u ON u.id = k.user_id \
         WHERE k.key = $1",
    )
    .bind(key)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::Unauthorized("Invalid API key".to_string()))?;

    if !row.is_active {
        return Err(AppError::Forbidden("API key is inactive".to_string()));
    }

    sqlx::query("UPDATE api_keys SET last_used_at = NOW() WHERE id = $1")
        .bind(row.key_id)
        .execute(db)
        .await?;

    Ok(AuthedUser {
        id: row.user_id,
        email: row.email,
        name: row.full_name,
    })
}

fn header_api_key(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::Unauthorized("API key is required".to_string()))
}

/// Middleware applied to every protected route.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = header_api_key(request.headers())?.to_owned();
    let user = lookup_api_key(&state.db, &key).await?;
    tracing::debug!(user = %user.email, "API key authenticated");
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// POST /api/auth/validate (public)
///
/// Lets the extension verify a key before storing it.
pub async fn handle_validate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    let key = header_api_key(&headers)?;
    let user = lookup_api_key(&state.db, key).await?;
    tracing::info!(user = %user.email, "API key validated");

    Ok(Json(json!({
        "success": true,
        "message": "API key is valid",
        "user": user
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        let err = header_api_key(&headers).unwrap_err();
        assert!(err.to_string().contains("API key is required"));
    }

    #[test]
    fn test_empty_header_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static(""));
        assert!(header_api_key(&headers).is_err());
    }

    #[test]
    fn test_present_header_is_returned() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("sk-test-123"));
        assert_eq!(header_api_key(&headers).unwrap(), "sk-test-123");
    }

    #[test]
    fn test_authed_user_serializes_with_name_field() {
        let user = AuthedUser {
            id: Uuid::nil(),
            email: "a@b.c".to_string(),
            name: "Ada".to_string(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["email"], "a@b.c");
    }
}

//! Axum route handlers for applied-job tracking.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::AuthedUser;
use crate::errors::AppError;
use crate::models::applied_job::AppliedJob;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddJobRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub applied_date: Option<DateTime<Utc>>,
    pub applied_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// GET /api/applied-jobs
pub async fn handle_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
) -> Result<Json<Value>, AppError> {
    let jobs = sqlx::query_as::<_, AppliedJob>(
        "SELECT * FROM applied_jobs WHERE user_id = $1 ORDER BY applied_date DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    tracing::debug!(user = %user.email, count = jobs.len(), "listed applied jobs");

    Ok(Json(json!({ "success": true, "appliedJobs": jobs })))
}

/// POST /api/applied-jobs
///
/// Re-posting a URL the user already tracked returns the existing row with
/// 200 instead of creating a duplicate.
pub async fn handle_add(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Json(request): Json<AddJobRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let title = request.title.as_deref().unwrap_or("").trim().to_owned();
    let url = request.url.as_deref().unwrap_or("").trim().to_owned();
    if title.is_empty() || url.is_empty() {
        return Err(AppError::Validation("Title and URL are required".to_string()));
    }

    let existing = sqlx::query_as::<_, AppliedJob>(
        "SELECT * FROM applied_jobs WHERE user_id = $1 AND url = $2",
    )
    .bind(user.id)
    .bind(&url)
    .fetch_optional(&state.db)
    .await?;

    if let Some(job) = existing {
        return Ok((
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Job already tracked",
                "appliedJob": job
            })),
        ));
    }

    let job = sqlx::query_as::<_, AppliedJob>(
        "INSERT INTO applied_jobs \
         (user_id, title, company, location, url, applied_date, applied_text, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, 'Applied') \
         RETURNING *",
    )
    .bind(user.id)
    .bind(&title)
    .bind(&request.company)
    .bind(&request.location)
    .bind(&url)
    .bind(request.applied_date.unwrap_or_else(Utc::now))
    .bind(&request.applied_text)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(user = %user.email, job = %job.id, "applied job created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "appliedJob": job })),
    ))
}

/// DELETE /api/applied-jobs/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM applied_jobs WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Applied job not found".to_string()));
    }

    tracing::info!(user = %user.email, job = %id, "applied job deleted");

    Ok(Json(json!({ "success": true, "message": "Applied job deleted" })))
}

/// PATCH /api/applied-jobs/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let status = match request.status.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_owned(),
        _ => return Err(AppError::Validation("Status is required".to_string())),
    };

    let job = sqlx::query_as::<_, AppliedJob>(
        "UPDATE applied_jobs SET status = $1 WHERE id = $2 AND user_id = $3 RETURNING *",
    )
    .bind(&status)
    .bind(id)
    .bind(user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Applied job not found".to_string()))?;

    tracing::info!(user = %user.email, job = %id, status = %status, "applied job status updated");

    Ok(Json(json!({ "success": true, "appliedJob": job })))
}

//! Contact submission endpoints.
//!
//! `POST /api/contact` is the intake pipeline: admission gate, form-kind
//! resolution, required-field validation, metadata stamping, spam scoring,
//! then the store call. Everything else is the admin workflow around the
//! stored records.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use intake_core::{
    FormKind, Reply, SubmissionForm, SubmissionPayload, SubmissionRecord, SubmissionStatus,
};
use serde::Deserialize;
use std::time::Instant;
use telemetry::metrics;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::extractors::{AdminContext, ClientIp, UserAgent};
use crate::gate::Admission;
use crate::response::{ApiError, DataResponse, ListResponse, SubmitResponse};
use crate::state::AppState;

/// POST /api/contact - Submission intake.
///
/// Rejected requests never reach validation; validation failures never
/// reach the classifier; the classifier always completes before the store
/// call, so a stored record always carries its score.
pub async fn submit_handler(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    UserAgent(user_agent): UserAgent,
    body: Bytes,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let start = Instant::now();

    metrics().submissions_received.inc();

    // Admission gate first: rejected requests cost nothing downstream.
    if let Admission::Rejected { retry_after_secs } = state.gate.admit(&client_ip) {
        metrics().rate_limited.inc();
        warn!(identity = %client_ip, retry_after_secs, "Submission rejected by admission gate");
        return Err(ApiError::rate_limited(retry_after_secs));
    }

    let payload: SubmissionPayload = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Failed to parse submission payload");
        ApiError::bad_request(e.to_string())
    })?;
    let submitted_at = payload.submitted_at;

    let form = SubmissionForm::from_payload(payload).map_err(|e| {
        metrics().validation_failures.inc();
        ApiError::from(e)
    })?;
    let form_kind = form.kind();

    // Stamp metadata and score. No partial writes: a record never reaches
    // the store unscored.
    let record = SubmissionRecord::intake(form, client_ip.clone(), user_agent, submitted_at);
    if record.is_spam {
        metrics().spam_flagged.inc();
    }

    let spam_score = record.spam_score;
    let is_spam = record.is_spam;
    let id = state.contacts.create(record).await?;

    metrics().submissions_stored.inc();
    let latency_ms = start.elapsed().as_millis() as u64;
    metrics().intake_latency_ms.observe(latency_ms);

    info!(
        %id,
        form_kind = form_kind.as_str(),
        spam_score,
        is_spam,
        latency_ms,
        "Stored new submission"
    );

    let message = match form_kind {
        FormKind::GeneralInquiry => "Message sent successfully!",
        FormKind::BusinessProfile => "Business details saved successfully!",
    };
    Ok((StatusCode::CREATED, Json(SubmitResponse::created(id, message))))
}

/// GET /api/contact - Admin listing with status/form-kind filters.
pub async fn list_handler(
    State(state): State<AppState>,
    _admin: AdminContext,
    Query(query): Query<store::ContactQuery>,
) -> Result<Json<ListResponse<SubmissionRecord>>, ApiError> {
    let page = state.contacts.list(query).await?;
    Ok(Json(page.into()))
}

/// GET /api/contact/stats - Aggregated statistics.
pub async fn stats_handler(
    State(state): State<AppState>,
    _admin: AdminContext,
) -> Result<Json<DataResponse<store::ContactStatistics>>, ApiError> {
    let stats = state.contacts.statistics().await?;
    Ok(Json(DataResponse::new(stats)))
}

/// GET /api/contact/:id - Single record.
pub async fn get_handler(
    State(state): State<AppState>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<SubmissionRecord>>, ApiError> {
    let record = state
        .contacts
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact not found"))?;
    Ok(Json(DataResponse::new(record)))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: SubmissionStatus,
}

/// PUT /api/contact/:id/status - Update workflow status.
pub async fn update_status_handler(
    State(state): State<AppState>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<DataResponse<SubmissionRecord>>, ApiError> {
    let update: StatusUpdate = serde_json::from_value(body)
        .map_err(|_| ApiError::bad_request("Invalid status"))?;

    let record = state
        .contacts
        .update_status(id, update.status)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact not found"))?;

    debug!(%id, status = ?update.status, "Updated contact status");
    Ok(Json(DataResponse::new(record)))
}

#[derive(Debug, Deserialize)]
pub struct ReplyPayload {
    pub message: Option<String>,
    pub from: Option<String>,
}

/// POST /api/contact/:id/reply - Append a reply.
pub async fn reply_handler(
    State(state): State<AppState>,
    _admin: AdminContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplyPayload>,
) -> Result<Json<DataResponse<SubmissionRecord>>, ApiError> {
    let mut missing = Vec::new();
    let message = match payload.message {
        Some(m) if !m.trim().is_empty() => m,
        _ => {
            missing.push("message".to_string());
            String::new()
        }
    };
    let from = match payload.from {
        Some(f) if !f.trim().is_empty() => f,
        _ => {
            missing.push("from".to_string());
            String::new()
        }
    };
    if !missing.is_empty() {
        return Err(ApiError::validation(missing));
    }

    let reply = Reply {
        message,
        from,
        timestamp: chrono::Utc::now(),
    };
    let record = state
        .contacts
        .add_reply(id, reply)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact not found"))?;

    info!(%id, "Reply added to contact");
    Ok(Json(DataResponse::new(record)))
}

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::submissions::SubmissionForm;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    Form, Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub id: Uuid,
}

fn is_form_encoded(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}

/// Decode the submission body as an HTML form post or JSON.
///
/// Anything that does not decode is a validation error, so clients always
/// get the `{error, code}` body.
async fn read_form(request: Request) -> Result<SubmissionForm> {
    if is_form_encoded(&request) {
        let Form(form) = Form::<SubmissionForm>::from_request(request, &())
            .await
            .map_err(|e| AppError::ValidationError(e.body_text()))?;
        return Ok(form);
    }

    let body = Bytes::from_request(request, &())
        .await
        .map_err(|e| AppError::ValidationError(e.body_text()))?;

    serde_json::from_slice(&body)
        .map_err(|e| AppError::ValidationError(format!("Invalid submission body: {}", e)))
}

/// POST /api/submissions - Record a tool suggestion.
///
/// # Flow
/// 1. Decode a JSON or form-encoded body
/// 2. Trim fields, require name and url (400 `missing` otherwise)
/// 3. Append to the submissions log
/// 4. Notify; notification failures do not affect the response
pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<SubmitResponse>)> {
    let submission = read_form(request).await?.into_submission()?;

    state.submissions.append(&submission).await?;
    state.notifier.notify(&submission).await;

    metrics::counter!("submissions_total").increment(1);

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            id: submission.id,
        }),
    ))
}

//! Axum route handlers for the Screening API.

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::debug;

use crate::errors::AppError;
use crate::screening::models::{ScreeningReport, UploadedResume};
use crate::screening::pipeline::screen_batch;
use crate::state::AppState;

/// Multipart field carrying the job description. Every other field with a
/// filename is treated as a resume upload.
pub const JD_FIELD: &str = "jd_text";

/// POST /api/v1/screen
///
/// Screens every uploaded resume against the job description and returns the
/// ranked table. Both a non-blank `jd_text` and at least one file are required.
pub async fn handle_screen(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningReport>, AppError> {
    let mut jd_text = String::new();
    let mut documents = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == JD_FIELD {
            jd_text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Unreadable jd_text field: {e}")))?;
            continue;
        }

        let Some(filename) = field.file_name().map(str::to_string) else {
            debug!(field = %name, "Ignoring multipart field without a filename");
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Unreadable upload '{filename}': {e}")))?;

        documents.push(UploadedResume { filename, bytes });
    }

    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    if documents.is_empty() {
        return Err(AppError::Validation(
            "at least one resume file is required".to_string(),
        ));
    }

    let report = screen_batch(documents, &jd_text, state.scorer.as_ref()).await;

    Ok(Json(report))
}

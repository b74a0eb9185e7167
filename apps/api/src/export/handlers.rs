use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::format;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TranscriptQuery {
    /// Append the resume summary block after the conversation.
    #[serde(default = "default_include_summary")]
    pub include_summary: bool,
}

fn default_include_summary() -> bool {
    true
}

/// GET /api/v1/transcript
///
/// Plain-text download of the interview transcript, with the resume summary
/// appended unless `include_summary=false`.
pub async fn handle_download_transcript(
    State(state): State<AppState>,
    Query(query): Query<TranscriptQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (turns, summary) = {
        let store = state.store.lock();
        let turns = store
            .interview
            .as_ref()
            .map(|session| session.conversation().to_vec())
            .unwrap_or_default();
        let summary = query
            .include_summary
            .then(|| store.resume_summary.clone())
            .flatten();
        (turns, summary)
    };

    if turns.is_empty() {
        return Err(AppError::NotFound(
            "No conversation available to download".to_string(),
        ));
    }

    let body = format::format_transcript(&turns, summary.as_ref());
    let filename = if summary.is_some() {
        "interview_transcript_with_resume_summary.txt"
    } else {
        "interview_transcript.txt"
    };
    Ok(plain_text_attachment(filename, body))
}

/// GET /api/v1/resume/summary
///
/// Plain-text download of the resume summary alone.
pub async fn handle_download_summary(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = state
        .store
        .lock()
        .resume_summary
        .clone()
        .ok_or_else(|| AppError::NotFound("No resume summary available".to_string()))?;

    let body = format::format_summary(&summary);
    Ok(plain_text_attachment("resume_summary.txt", body))
}

fn plain_text_attachment(filename: &str, body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
}

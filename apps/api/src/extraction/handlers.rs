use std::io::Write;

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::decode::{self, DatasetPreview, DocumentKind};
use crate::extraction::sections::{self, ResumeSummary};
use crate::state::AppState;

/// Response to a file upload. Resumes come back as an extracted summary;
/// spreadsheets come back as a dataset preview.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UploadResponse {
    Resume { summary: ResumeSummary },
    Dataset { preview: DatasetPreview },
}

/// POST /api/v1/resume
///
/// Accepts a single multipart file field. PDF and DOCX uploads are decoded to
/// text and run through section extraction; the resulting summary replaces
/// the stored one. XLSX uploads are previewed without touching the stored
/// summary.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart upload: {e}")))?
        .ok_or_else(|| AppError::Validation("Upload a file (PDF, DOCX, or XLSX)".to_string()))?;

    let filename = field
        .file_name()
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation("Uploaded field has no filename".to_string()))?;
    let kind = DocumentKind::from_filename(&filename)?;

    let data: Bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

    // The decoders are path-based, so spool the upload to disk first.
    let file = spool_to_temp(&data)?;

    match kind {
        DocumentKind::Pdf | DocumentKind::Docx => {
            let text = match kind {
                DocumentKind::Pdf => decode::extract_pdf_text(file.path())?,
                _ => decode::extract_docx_text(file.path())?,
            };
            let summary = sections::extract(&text);
            info!(
                "Processed resume '{}' ({})",
                filename,
                match &summary {
                    ResumeSummary::Found { sections } => format!("{} sections", sections.len()),
                    ResumeSummary::NotFound => "no structured data".to_string(),
                }
            );
            state.store.lock().resume_summary = Some(summary.clone());
            Ok(Json(UploadResponse::Resume { summary }))
        }
        DocumentKind::Xlsx => {
            let preview = decode::preview_dataset(file.path())?;
            info!(
                "Previewed dataset '{}' ({} rows, {} columns)",
                filename,
                preview.total_rows,
                preview.columns.len()
            );
            Ok(Json(UploadResponse::Dataset { preview }))
        }
    }
}

fn spool_to_temp(data: &[u8]) -> Result<NamedTempFile, AppError> {
    let mut file = NamedTempFile::new().map_err(|e| AppError::Internal(e.into()))?;
    file.write_all(data).map_err(|e| AppError::Internal(e.into()))?;
    Ok(file)
}

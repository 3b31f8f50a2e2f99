//! Axum route handlers for previewing and downloading a resume.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::layout::{render_pdf, PdfError};
use crate::models::resume::ResumeData;
use crate::render::{render_resume, TemplateChoice};
use crate::state::AppState;

const TEXT_FILENAME: &str = "resume.txt";
const PDF_FILENAME: &str = "resume.pdf";
const ACCEPTED_PHOTO_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// A finished record plus the layout to render it with.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub resume: ResumeData,
}

impl ExportRequest {
    fn render(&self) -> (TemplateChoice, String) {
        let template = TemplateChoice::from_name(self.template.as_deref());
        (template, render_resume(template, &self.resume))
    }
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub template: TemplateChoice,
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/preview
///
/// Renders the record without calling the LLM.
pub async fn handle_preview(Json(request): Json<ExportRequest>) -> Json<PreviewResponse> {
    let (template, content) = request.render();
    Json(PreviewResponse { template, content })
}

/// POST /api/v1/resumes/export/text
pub async fn handle_export_text(Json(request): Json<ExportRequest>) -> Response {
    let (template, content) = request.render();
    info!(%template, bytes = content.len(), "Exporting resume as text");
    attachment("text/plain; charset=utf-8", TEXT_FILENAME, content)
}

/// POST /api/v1/resumes/export/pdf
pub async fn handle_export_pdf(Json(request): Json<ExportRequest>) -> Result<Response, AppError> {
    let (template, content) = request.render();
    let pdf = build_pdf(content, None).await?;
    info!(%template, bytes = pdf.len(), "Exported resume as PDF");
    Ok(attachment("application/pdf", PDF_FILENAME, pdf))
}

/// POST /api/v1/resumes/export/pdf/upload
///
/// Multipart variant of the PDF export: a `resume` part holding the export
/// request as JSON, and an optional `photo` part (PNG or JPEG).
pub async fn handle_export_pdf_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut request: Option<ExportRequest> = None;
    let mut photo: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Unreadable 'resume' part", e))?;
                let parsed = serde_json::from_str::<ExportRequest>(&text).map_err(|e| {
                    AppError::UnprocessableEntity(format!("Invalid resume JSON: {e}"))
                })?;
                request = Some(parsed);
            }
            Some("photo") => {
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Unreadable 'photo' part", e))?;
                if data.is_empty() {
                    continue;
                }
                validate_photo(
                    content_type.as_deref(),
                    data.len(),
                    state.config.max_photo_bytes,
                )?;
                photo = Some(data);
            }
            other => debug!("Ignoring multipart field {other:?}"),
        }
    }

    let request = request.ok_or_else(|| {
        AppError::Validation("multipart body is missing the 'resume' part".to_string())
    })?;

    let (template, content) = request.render();
    let with_photo = photo.is_some();
    let pdf = build_pdf(content, photo).await?;
    info!(%template, with_photo, bytes = pdf.len(), "Exported resume as PDF");
    Ok(attachment("application/pdf", PDF_FILENAME, pdf))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Checks an uploaded photo's declared type and size.
fn validate_photo(content_type: Option<&str>, len: usize, max_bytes: usize) -> Result<(), AppError> {
    let content_type = content_type.unwrap_or("");
    if !ACCEPTED_PHOTO_TYPES.contains(&content_type) {
        return Err(AppError::Validation(format!(
            "photo must be PNG or JPEG, got '{content_type}'"
        )));
    }
    if len > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "photo is {len} bytes; the limit is {max_bytes}"
        )));
    }
    Ok(())
}

/// A body cut off by the request size limit is a 413; any other malformed part is a 400.
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    let message = format!("{context}: {}", e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}

/// Runs the CPU-bound PDF build off the async executor.
async fn build_pdf(content: String, photo: Option<Bytes>) -> Result<Vec<u8>, AppError> {
    tokio::task::spawn_blocking(move || render_pdf(&content, photo.as_deref()))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF render: {e}")))?
        .map_err(|e| match e {
            PdfError::Photo(msg) => AppError::UnprocessableEntity(msg),
            other => AppError::Pdf(other),
        })
}

fn attachment(content_type: &str, filename: &str, body: impl IntoResponse) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(template: &str) -> ExportRequest {
        ExportRequest {
            template: Some(template.to_string()),
            resume: ResumeData {
                name: Some("Katherine Johnson".to_string()),
                summary: Some("Trajectory analysis for crewed flight.".to_string()),
                ..Default::default()
            },
        }
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_preview_renders_template() {
        let Json(response) = handle_preview(Json(request("Professional"))).await;
        assert_eq!(response.template, TemplateChoice::Professional);
        assert!(response.content.starts_with("\n# Katherine Johnson\n"));
    }

    #[tokio::test]
    async fn test_export_text_is_a_download() {
        let response = handle_export_text(Json(request("Simple"))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume.txt\""
        );

        let body = String::from_utf8(body_bytes(response).await).unwrap();
        let (_, expected) = request("Simple").render();
        assert_eq!(body, expected);
    }

    #[tokio::test]
    async fn test_export_pdf_returns_pdf_download() {
        let response = handle_export_pdf(Json(request("Modern"))).await.unwrap();

        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume.pdf\""
        );
        assert!(body_bytes(response).await.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_bad_photo_is_unprocessable() {
        let err = build_pdf("# Name".to_string(), Some(Bytes::from_static(b"\x89PNG broken")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_validate_photo_accepts_png_and_jpeg() {
        assert!(validate_photo(Some("image/png"), 10, 100).is_ok());
        assert!(validate_photo(Some("image/jpeg"), 10, 100).is_ok());
        assert!(validate_photo(Some("image/jpg"), 100, 100).is_ok());
    }

    #[test]
    fn test_validate_photo_rejects_other_types() {
        let err = validate_photo(Some("image/gif"), 10, 100).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = validate_photo(None, 10, 100).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validate_photo_rejects_oversized() {
        let err = validate_photo(Some("image/png"), 101, 100).unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }

    #[test]
    fn test_export_request_defaults_when_fields_missing() {
        let request: ExportRequest = serde_json::from_str("{}").unwrap();
        let (template, content) = request.render();
        assert_eq!(template, TemplateChoice::Simple);
        assert!(content.starts_with("\nYour Name\n"));
    }
}

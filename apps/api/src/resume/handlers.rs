use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::{ContactInfo, ResumeProfile};
use crate::resume::{extract_pdf_text, parse_resume_text};

const FILE_FIELD: &str = "file";
const PDF_CONTENT_TYPE: &str = "application/pdf";

/// The `/match-jobs` input shape plus the contact details found in the document.
#[derive(Debug, Serialize)]
pub struct UploadResumeResponse {
    #[serde(flatten)]
    pub profile: ResumeProfile,
    pub contact: ContactInfo,
}

/// POST /upload_resume
pub async fn handle_upload_resume(
    mut multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or("unknown").to_string();
        if content_type != PDF_CONTENT_TYPE {
            return Err(AppError::Validation(format!(
                "Only PDF files are allowed. Received: {content_type}"
            )));
        }

        let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }

        info!("Parsing résumé {file_name} ({} bytes)", bytes.len());
        let text = extract_pdf_text(bytes.to_vec()).await?;
        let parsed = parse_resume_text(&text);

        // hand back normalized skills so the result can be posted to /match-jobs as is
        let technical_skills = parsed.profile.skill_set().into_iter().collect();

        return Ok(Json(UploadResumeResponse {
            profile: ResumeProfile {
                technical_skills,
                ..parsed.profile
            },
            contact: parsed.contact,
        }));
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}

use axum::{extract::Multipart, Json};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ParsedResume {
    pub text: String,
    pub filename: String,
}

/// POST /api/v1/parse-resume
///
/// Extracts plain text from an uploaded PDF resume.
pub async fn handle_parse_resume(mut multipart: Multipart) -> Result<Json<ParsedResume>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !is_pdf_name(&filename) {
            return Err(AppError::Validation(
                "Only PDF files are supported".to_string(),
            ));
        }

        let data = field.bytes().await?;
        let text = extract_pdf_text(data).await?;
        info!("Parsed resume {filename} ({} chars)", text.chars().count());

        return Ok(Json(ParsedResume { text, filename }));
    }

    Err(AppError::Validation("Missing file upload".to_string()))
}

fn is_pdf_name(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}

/// PDF parsing is CPU-bound and runs on the blocking pool.
async fn extract_pdf_text(data: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| AppError::PdfExtraction(e.to_string()))?
        .map_err(|e| AppError::PdfExtraction(e.to_string()))?;
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_name_is_case_insensitive() {
        assert!(is_pdf_name("resume.pdf"));
        assert!(is_pdf_name("Resume.PDF"));
        assert!(!is_pdf_name("resume.docx"));
        assert!(!is_pdf_name("pdf"));
        assert!(!is_pdf_name(""));
    }

    #[tokio::test]
    async fn test_garbage_bytes_fail_extraction() {
        let err = extract_pdf_text(Bytes::from_static(b"not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PdfExtraction(_)));
    }
}

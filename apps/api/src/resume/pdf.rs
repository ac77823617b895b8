use crate::resume::ResumeError;

/// Extracts the text layer of a PDF. Parsing is CPU-bound, so it runs on the blocking pool.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, ResumeError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| ResumeError::Extraction(e.to_string()))?
        .map_err(|e| ResumeError::Extraction(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(ResumeError::NoText);
    }
    Ok(text)
}

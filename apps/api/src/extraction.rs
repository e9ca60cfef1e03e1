//! Document text extraction. Failures here are fatal to the request: the
//! pipeline needs text to run at all.

use bytes::Bytes;
use tracing::{debug, instrument};

use crate::errors::AppError;

/// Returns true when the upload's filename marks it as a PDF.
pub fn is_pdf_filename(filename: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(".pdf")
}

/// Extracts best-effort plain text from PDF bytes.
///
/// The result may be empty (scanned documents) or carry extraction artifacts.
/// Parsing runs on the blocking pool since `pdf-extract` is synchronous.
#[instrument(skip(pdf), fields(bytes = pdf.len()))]
pub async fn extract_pdf_text(pdf: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| {
            // pdf-extract panics on some malformed documents.
            if e.is_panic() {
                AppError::DocumentProcessing("PDF parser panicked".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}"))
            }
        })?
        .map_err(|e| AppError::DocumentProcessing(format!("Failed to read PDF: {e}")))?;

    debug!(chars = text.chars().count(), "PDF text extracted");
    Ok(text)
}

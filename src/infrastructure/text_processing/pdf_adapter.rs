use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            source_url = %document.source_url,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Pdf {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let bytes = data.to_vec();
        let source_url = document.source_url.clone();

        // pdf-extract is synchronous; run it on a blocking thread with a
        // hard timeout.
        let raw = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {}", e)))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {}", e)))?;

        let sanitized = sanitize_extracted_text(&raw);
        if sanitized.is_empty() {
            return Err(FileLoaderError::NoTextFound(source_url));
        }

        tracing::info!(chars = sanitized.len(), "PDF text extraction complete");

        Ok(sanitized)
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{DocumentSource, DocumentSourceError, FetchedDocument};

pub struct HttpDocumentSource {
    client: Client,
    timeout: Duration,
}

impl HttpDocumentSource {
    pub fn new(timeout: Duration) -> Result<Self, DocumentSourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DocumentSourceError::FetchFailed(e.to_string()))?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, DocumentSourceError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DocumentSourceError::Timeout(self.timeout)
            } else {
                DocumentSourceError::FetchFailed(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(DocumentSourceError::FetchFailed(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let data = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                DocumentSourceError::Timeout(self.timeout)
            } else {
                DocumentSourceError::FetchFailed(e.to_string())
            }
        })?;

        tracing::debug!(bytes = data.len(), "Document downloaded");

        Ok(FetchedDocument {
            data: data.to_vec(),
            content_type,
        })
    }
}

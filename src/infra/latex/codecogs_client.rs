use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::Duration;

use crate::core::latex::{EquationRenderer, LatexError};

/// HTTP client for the CodeCogs equation API. It only ever GETs URLs built by
/// the core URL builder.
pub struct CodecogsClient {
    client: Client,
}

impl CodecogsClient {
    pub fn new(timeout: Duration) -> Result<Self, LatexError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("image/png,image/*"));
        headers.insert("User-Agent", HeaderValue::from_static("TexModBot/0.1"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| LatexError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl EquationRenderer for CodecogsClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LatexError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LatexError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LatexError::Fetch(format!(
                "equation API returned {}",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LatexError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_timeout() {
        assert!(CodecogsClient::new(Duration::from_secs(5)).is_ok());
    }
}

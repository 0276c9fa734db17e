use crate::domain::donation::DonationDetails;
use crate::domain::ports::ConfirmationClient;
use crate::error::{DonationError, Result};
use crate::interfaces::http::THANK_YOU_PATH;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const GENERIC_FAILURE: &str = "API call failed";

#[derive(Debug, Deserialize)]
struct SuccessBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Posts donation details to a running confirmation endpoint.
///
/// Carries no timeout of its own; the flow controller owns the deadline.
pub struct HttpConfirmationClient {
    client: Client,
    url: String,
}

impl HttpConfirmationClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}{}", base_url.trim_end_matches('/'), THANK_YOU_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ConfirmationClient for HttpConfirmationClient {
    async fn confirm(&self, details: &DonationDetails) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .json(details)
            .send()
            .await
            .map_err(|e| DonationError::TransportError(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| DonationError::TransportError(e.to_string()))?;

        if !status.is_success() {
            let reason = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Err(DonationError::Rejected(reason));
        }

        serde_json::from_slice::<SuccessBody>(&body)
            .map(|b| b.message)
            .map_err(|e| DonationError::TransportError(format!("malformed response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_endpoint_path() {
        let client = HttpConfirmationClient::new("http://127.0.0.1:8888/");
        assert_eq!(client.url(), "http://127.0.0.1:8888/api/sendThankYouEmail");
    }
}

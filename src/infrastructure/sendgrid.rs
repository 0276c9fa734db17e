use crate::domain::message::ThankYouEmail;
use crate::domain::ports::EmailSender;
use crate::error::{DonationError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;

/// Delivers email through the SendGrid v3 mail-send API.
pub struct SendGridSender {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl SendGridSender {
    pub fn new(api_base: &str, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                DonationError::ConfigurationError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/v3/mail/send", api_base.trim_end_matches('/')),
            api_key,
        })
    }
}

fn payload(email: &ThankYouEmail) -> Value {
    json!({
        "personalizations": [{ "to": [{ "email": email.to }] }],
        "from": { "email": email.from },
        "subject": email.subject,
        "content": [
            { "type": "text/plain", "value": email.text },
            { "type": "text/html", "value": email.html }
        ]
    })
}

#[async_trait]
impl EmailSender for SendGridSender {
    async fn send(&self, email: &ThankYouEmail) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload(email))
            .send()
            .await
            .map_err(|e| DonationError::DeliveryError(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DonationError::DeliveryError(format!(
                "SendGrid returned {}: {}",
                status, text
            )));
        }

        Ok(())
    }
}

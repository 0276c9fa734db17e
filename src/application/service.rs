use crate::config::ServiceConfig;
use crate::domain::donation::{Amount, DonationDetails};
use crate::domain::message::ThankYouEmail;
use crate::domain::ports::{EmailSenderBox, MessageGeneratorBox};
use crate::error::{DonationError, Result};
use crate::infrastructure::gemini::GeminiGenerator;
use crate::infrastructure::sendgrid::SendGridSender;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

pub const MISSING_DETAILS: &str = "Missing required donation details.";

/// Body of a thank-you request as it arrives over the wire.
///
/// Every field is optional so that absent and empty values are reported the
/// same way, as missing details.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ThankYouRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

impl ThankYouRequest {
    fn into_details(self) -> Result<DonationDetails> {
        let missing = || DonationError::ValidationError(MISSING_DETAILS.to_string());

        let name = self.name.filter(|n| !n.trim().is_empty()).ok_or_else(missing)?;
        let email = self.email.filter(|e| !e.trim().is_empty()).ok_or_else(missing)?;
        let amount = self
            .amount
            .and_then(|a| Amount::new(a).ok())
            .ok_or_else(missing)?;

        DonationDetails::new(name, email, amount)
    }
}

/// Generates a personalized thank-you and emails it to the donor.
///
/// Stateless between calls. Each call makes two sequential external requests,
/// generation then delivery; a delivery fault fails the whole call and the
/// generated text is discarded.
pub struct ConfirmationService {
    generator: MessageGeneratorBox,
    mailer: EmailSenderBox,
    sender_email: String,
}

impl ConfirmationService {
    pub fn new(
        generator: MessageGeneratorBox,
        mailer: EmailSenderBox,
        sender_email: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            mailer,
            sender_email: sender_email.into(),
        }
    }

    /// Wires the hosted generator and email adapters from configuration.
    ///
    /// Fails with a configuration error when any credential is absent.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let credentials = config.credentials()?;
        let generator = GeminiGenerator::new(&config.gemini_api_base, credentials.ai_api_key)?;
        let mailer = SendGridSender::new(&config.sendgrid_api_base, credentials.sendgrid_api_key)?;

        Ok(Self::new(
            Box::new(generator),
            Box::new(mailer),
            credentials.sender_email,
        ))
    }

    pub async fn send_thank_you(&self, request: ThankYouRequest) -> Result<String> {
        let details = request.into_details()?;
        info!(donor = details.name(), amount = %details.amount(), "generating thank-you message");

        let message = self
            .generator
            .generate(details.name(), details.amount())
            .await?;
        debug!(chars = message.len(), "thank-you message generated");

        let email = ThankYouEmail::new(details.email(), &self.sender_email, &message);
        self.mailer.send(&email).await?;
        info!(to = details.email(), "thank-you email sent");

        Ok(message)
    }
}

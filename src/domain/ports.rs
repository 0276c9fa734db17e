use super::donation::{Amount, DonationDetails};
use super::message::ThankYouEmail;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Produces the personalized thank-you text for a donor.
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    async fn generate(&self, donor_name: &str, amount: Amount) -> Result<String>;
}

/// Delivers a rendered thank-you email.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &ThankYouEmail) -> Result<()>;
}

/// Client-side transport for the confirmation request.
#[async_trait]
pub trait ConfirmationClient: Send + Sync {
    /// Returns the generated thank-you message.
    async fn confirm(&self, details: &DonationDetails) -> Result<String>;
}

pub type MessageGeneratorBox = Box<dyn MessageGenerator>;
pub type EmailSenderBox = Box<dyn EmailSender>;
pub type ConfirmationClientArc = Arc<dyn ConfirmationClient>;

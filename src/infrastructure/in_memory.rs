use crate::domain::donation::Amount;
use crate::domain::message::ThankYouEmail;
use crate::domain::ports::{EmailSender, MessageGenerator};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Writes the thank-you text locally from a fixed template, without any AI call.
///
/// Used by `serve --offline` and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateGenerator;

#[async_trait]
impl MessageGenerator for TemplateGenerator {
    async fn generate(&self, donor_name: &str, amount: Amount) -> Result<String> {
        Ok(format!(
            "Thank you so much, {donor_name}, for your generous gift. Your kindness reminds us why we do this work.\n\n\
             Your donation of \u{20b9}{amount} will make a real difference, helping us bring books, meals and \
             mentoring to families in the communities we serve."
        ))
    }
}

/// A thread-safe outbox that records emails instead of delivering them.
///
/// Uses `Arc<RwLock<Vec<ThankYouEmail>>>` so clones share one outbox.
#[derive(Default, Clone)]
pub struct OutboxSender {
    sent: Arc<RwLock<Vec<ThankYouEmail>>>,
}

impl OutboxSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<ThankYouEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl EmailSender for OutboxSender {
    async fn send(&self, email: &ThankYouEmail) -> Result<()> {
        info!(to = %email.to, subject = %email.subject, "email recorded in outbox");
        self.sent.write().await.push(email.clone());
        Ok(())
    }
}

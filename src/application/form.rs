use crate::domain::checkout::{CheckoutRequest, PaymentAcknowledgment, PaymentFailure};
use crate::domain::donation::{Amount, DonationDetails};
use crate::error::{DonationError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;
use tracing::{error, info};

pub const PRESET_AMOUNTS: [Decimal; 4] = [dec!(250), dec!(500), dec!(1000), dec!(2500)];
pub const DEFAULT_AMOUNT: Decimal = dec!(500);

/// The donation form: amount selection, donor identity and the inline error line.
#[derive(Debug, Clone, PartialEq)]
pub struct DonationForm {
    pub amount: Decimal,
    pub custom_amount: String,
    pub name: String,
    pub email: String,
    pub error: Option<String>,
}

impl Default for DonationForm {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT,
            custom_amount: String::new(),
            name: String::new(),
            email: String::new(),
            error: None,
        }
    }
}

impl DonationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_preset(&mut self, value: Decimal) {
        self.amount = value;
        self.custom_amount.clear();
    }

    /// Records the custom amount text. Only a positive number replaces the
    /// current amount; anything else keeps the previous selection.
    ///
    /// Only plain decimal text is accepted. Exponent forms such as `1e3` and
    /// text with trailing garbage such as `12abc` are ignored rather than
    /// truncated to their numeric prefix.
    pub fn set_custom_amount(&mut self, text: &str) {
        self.custom_amount = text.to_string();
        if let Ok(value) = Decimal::from_str(text.trim())
            && value > Decimal::ZERO
        {
            self.amount = value;
        }
    }

    pub fn is_preset_selected(&self, value: Decimal) -> bool {
        self.amount == value && self.custom_amount.is_empty()
    }

    fn details(&self) -> Result<DonationDetails> {
        let amount = Amount::new(self.amount)?;
        DonationDetails::new(self.name.clone(), self.email.clone(), amount)
    }

    /// Validates the form and builds the options the payment widget opens with.
    ///
    /// On failure the message is kept as the inline error and nothing is sent anywhere.
    pub fn submit(&mut self, key_id: &str) -> Result<CheckoutRequest> {
        match self
            .details()
            .and_then(|details| CheckoutRequest::for_details(key_id, &details))
        {
            Ok(request) => {
                self.error = None;
                Ok(request)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Called from the widget's success callback.
    pub fn payment_succeeded(&self, ack: &PaymentAcknowledgment) -> Result<DonationDetails> {
        // The acknowledgment is not checked against the processor.
        info!(payment_id = %ack.payment_id, "payment reported successful");
        self.details()
    }

    /// Called from the widget's failure callback.
    pub fn payment_failed(&mut self, failure: &PaymentFailure) -> DonationError {
        error!(reason = %failure.description, "payment failed");
        let message = format!("Payment failed: {}. Please try again.", failure.description);
        self.error = Some(message.clone());
        DonationError::ValidationError(message)
    }
}

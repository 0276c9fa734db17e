//! Types exchanged with the embedded payment widget.
//!
//! The widget itself is an external collaborator. This module only describes
//! the options it is opened with and the callbacks it reports back through.

use super::donation::{Amount, DonationDetails};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MERCHANT_NAME: &str = "Hope Foundation";
pub const CURRENCY: &str = "INR";
const DESCRIPTION: &str = "Donation Transaction";
const THEME_COLOR: &str = "#0D9488";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prefill {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub color: String,
}

/// Options handed to the checkout widget when the donor submits the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutRequest {
    pub key: String,
    /// Amount in minor currency units.
    pub amount: u64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub prefill: Prefill,
    pub theme: Theme,
    pub notes: BTreeMap<String, String>,
}

impl CheckoutRequest {
    pub fn new(key: impl Into<String>, name: &str, email: &str, amount: Amount) -> Result<Self> {
        let mut notes = BTreeMap::new();
        notes.insert(
            "Project".to_string(),
            "Social Good Donations Microsite".to_string(),
        );

        Ok(Self {
            key: key.into(),
            amount: amount.minor_units()?,
            currency: CURRENCY.to_string(),
            name: MERCHANT_NAME.to_string(),
            description: DESCRIPTION.to_string(),
            prefill: Prefill {
                name: name.to_string(),
                email: email.to_string(),
            },
            theme: Theme {
                color: THEME_COLOR.to_string(),
            },
            notes,
        })
    }

    pub fn for_details(key: impl Into<String>, details: &DonationDetails) -> Result<Self> {
        Self::new(key, details.name(), details.email(), details.amount())
    }
}

/// Payload of the widget's success callback.
///
/// Nothing in this crate verifies `signature` against the processor; the
/// acknowledgment is taken at face value before the confirmation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentAcknowledgment {
    pub payment_id: String,
    pub order_id: Option<String>,
    pub signature: Option<String>,
}

/// Payload of the widget's failure callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentFailure {
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_checkout_options_use_minor_units() {
        let details =
            DonationDetails::new("Asha", "asha@example.com", Amount::new(dec!(500)).unwrap())
                .unwrap();
        let request = CheckoutRequest::for_details("rzp_test_key", &details).unwrap();

        assert_eq!(request.amount, 50_000);
        assert_eq!(request.currency, "INR");
        assert_eq!(request.prefill.email, "asha@example.com");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["notes"]["Project"], "Social Good Donations Microsite");
        assert_eq!(json["theme"]["color"], "#0D9488");
    }
}

use crate::error::{DonationError, Result};
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

pub const INCOMPLETE_DETAILS: &str = "Please fill out all fields and select a valid amount.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

/// Returns true when `email` has the `local@domain.tld` shape the form accepts.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// A positive donation amount in major currency units (rupees).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(DonationError::ValidationError(INCOMPLETE_DETAILS.to_string()))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The amount in the smallest currency unit (paise), as the checkout widget expects.
    pub fn minor_units(&self) -> Result<u64> {
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|paise| paise.round().to_u64())
            .ok_or_else(|| DonationError::ValidationError(INCOMPLETE_DETAILS.to_string()))
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = DonationError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// The confirmation endpoint reads `amount` as a JSON number, not a string.
impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let normalized = self.0.normalize();
        if normalized.scale() == 0
            && let Some(whole) = normalized.to_u64()
        {
            return serializer.serialize_u64(whole);
        }
        match normalized.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => Err(serde::ser::Error::custom("amount out of range")),
        }
    }
}

/// The donor's identity and gift, captured once the payment widget reports success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonationDetails {
    name: String,
    email: String,
    amount: Amount,
}

impl DonationDetails {
    pub fn new(name: impl Into<String>, email: impl Into<String>, amount: Amount) -> Result<Self> {
        let name = name.into();
        let email = email.into();

        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(DonationError::ValidationError(INCOMPLETE_DETAILS.to_string()));
        }
        if !is_valid_email(&email) {
            return Err(DonationError::ValidationError(INVALID_EMAIL.to_string()));
        }

        Ok(Self {
            name,
            email,
            amount,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

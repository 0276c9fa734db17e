use thiserror::Error;

pub type Result<T> = std::result::Result<T, DonationError>;

#[derive(Error, Debug)]
pub enum DonationError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Message generation failed: {0}")]
    GenerationError(String),
    #[error("Email delivery failed: {0}")]
    DeliveryError(String),
    /// The confirmation endpoint answered with a failure status.
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    TransportError(String),
    #[error("A confirmation request is already in flight")]
    SubmissionInFlight,
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

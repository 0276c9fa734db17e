//! Domain values and the ports the application layer talks through.

pub mod checkout;
pub mod donation;
pub mod flow;
pub mod message;
pub mod ports;

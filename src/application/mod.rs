//! Application layer: the use cases on both sides of the confirmation request.
//!
//! `ConfirmationService` is the server-side handler logic, `FlowController`
//! the client-side orchestration around it, and `DonationForm` the input step
//! that precedes the payment widget.

pub mod flow;
pub mod form;
pub mod service;

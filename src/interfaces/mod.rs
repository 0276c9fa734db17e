pub mod http;
pub mod modal;

//! # Gateway Infrastructure
//! 
//! Outbound HTTP adapters for the mock gateway.

pub mod http;

pub use http::HttpNotificationSender;

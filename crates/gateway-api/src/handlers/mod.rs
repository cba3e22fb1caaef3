//! HTTP handlers

pub mod health;
pub mod notification;
pub mod page;
pub mod payment;
pub mod token;

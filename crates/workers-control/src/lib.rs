//! Accounting core of the workers control economy.
//!
//! The [`accounting`] module derives the payout factor from the plans active in a
//! gliding window and reconciles the public sector fund against the transfer
//! history. Configuration, telemetry and the application error type are shared
//! with the API service.

pub mod accounting;
pub mod config;
pub mod error;
pub mod telemetry;

//! Core domain + application logic for the temporary-mail Telegram bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and mail.tm live
//! behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod inbox;
pub mod logging;
pub mod mail;
pub mod messaging;
pub mod otp;
pub mod recovery;
pub mod store;
pub mod utils;

pub use errors::{Error, Result};

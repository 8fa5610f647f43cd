//! Chat-side abstractions (Telegram today).

pub mod port;
pub mod reply;

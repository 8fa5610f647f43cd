//! Mail provider abstraction (mail.tm today).

pub mod port;
pub mod types;

/// Core error type for the bot.
///
/// Adapter crates should map their specific errors into this type so the
/// command handlers can turn every failure into a short user-facing reply.
/// Recovery-token failures have their own type, [`crate::recovery::TokenError`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("mail provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("messaging error: {0}")]
    Messaging(String),
}

pub type Result<T> = std::result::Result<T, Error>;

use async_trait::async_trait;

use crate::{
    mail::types::{MailMessage, MessageSummary},
    Result,
};

/// Hexagonal port for the disposable-mailbox provider.
///
/// Every failure (transport, timeout, non-2xx, undecodable body) surfaces as
/// [`crate::Error::ProviderUnavailable`]. Implementations do not retry.
#[async_trait]
pub trait MailProvider: Send + Sync {
    /// Domains new mailboxes may be created under.
    async fn list_domains(&self) -> Result<Vec<String>>;

    async fn create_account(&self, address: &str, password: &str) -> Result<()>;

    /// Exchange mailbox credentials for a bearer token.
    async fn authenticate(&self, address: &str, password: &str) -> Result<String>;

    /// Inbox listing, newest first.
    async fn list_messages(&self, token: &str) -> Result<Vec<MessageSummary>>;

    async fn read_message(&self, token: &str, id: &str) -> Result<MailMessage>;

    async fn delete_message(&self, token: &str, id: &str) -> Result<()>;
}

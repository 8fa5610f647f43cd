//! Command handlers, written against the mail and messaging ports.
//!
//! Every handler catches its own failures and answers the user; nothing here
//! returns an error to the dispatcher.

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    config::Config,
    domain::{ChatId, MailSession, MessageRef, UserId},
    formatting::{created_reply, help_reply, recovered_reply, relay_reply},
    mail::port::MailProvider,
    messaging::{
        port::MessagingPort,
        reply::{deliver, Reply},
    },
    recovery,
    store::SessionStore,
    utils::random_credentials,
    Result,
};

pub const CREATING_NOTICE: &str = "⏳ Creating temporary email...";
pub const NO_DOMAINS: &str = "❌ No domains available. Try again later.";
pub const CREATE_FAILED: &str = "❌ An error occurred while creating email.";
pub const READ_FAILED: &str = "❌ Could not reach the mail provider. Try again later.";
pub const NO_ACTIVE_INBOX: &str = "No active inbox.\nUse /new or /repair <token>.";
pub const NO_NEW_EMAILS: &str = "No new emails.";
pub const REPAIR_USAGE: &str = "Usage: /repair <recovery_token>";
pub const INVALID_TOKEN: &str = "❌ Invalid recovery token.";
pub const UNKNOWN_COMMAND: &str = "Unknown command. Use /help to see what I can do.";

pub struct InboxService {
    cfg: Arc<Config>,
    store: Arc<SessionStore>,
    mail: Arc<dyn MailProvider>,
    messenger: Arc<dyn MessagingPort>,
}

impl InboxService {
    pub fn new(
        cfg: Arc<Config>,
        store: Arc<SessionStore>,
        mail: Arc<dyn MailProvider>,
        messenger: Arc<dyn MessagingPort>,
    ) -> Self {
        Self {
            cfg,
            store,
            mail,
            messenger,
        }
    }

    /// `/start`, `/help`.
    pub async fn help(&self, chat_id: ChatId) {
        self.reply(chat_id, &help_reply()).await;
    }

    /// Anything that is not one of the commands.
    pub async fn unknown(&self, chat_id: ChatId) {
        self.reply(chat_id, &Reply::text(UNKNOWN_COMMAND)).await;
    }

    /// `/new`: provision a mailbox, remember it, hand out its recovery token.
    pub async fn new_inbox(&self, chat_id: ChatId, user_id: UserId) {
        self.reply(chat_id, &Reply::text(CREATING_NOTICE)).await;

        match self.provision().await {
            Ok(Some(session)) => {
                let token = recovery::encode(&session);
                info!(user_id = user_id.0, address = %session.address, "inbox created");
                let reply = created_reply(&session.address, &token);
                self.store.put(user_id, session).await;
                self.reply(chat_id, &reply).await;
            }
            Ok(None) => {
                warn!(user_id = user_id.0, "provider offered no domains");
                self.reply(chat_id, &Reply::text(NO_DOMAINS)).await;
            }
            Err(e) => {
                warn!(user_id = user_id.0, error = %e, "inbox creation failed");
                self.reply(chat_id, &Reply::text(CREATE_FAILED)).await;
            }
        }
    }

    /// `/repair <token>`: restore a session from a recovery token.
    pub async fn repair(&self, chat_id: ChatId, user_id: UserId, arg: &str) {
        let Some(token) = arg.split_whitespace().next() else {
            self.reply(chat_id, &Reply::text(REPAIR_USAGE)).await;
            return;
        };

        match recovery::decode(token) {
            Ok(session) => {
                info!(user_id = user_id.0, address = %session.address, "inbox recovered");
                let reply = recovered_reply(&session.address);
                self.store.put(user_id, session).await;
                self.reply(chat_id, &reply).await;
            }
            Err(e) => {
                info!(user_id = user_id.0, reason = %e, "rejected recovery token");
                self.reply(chat_id, &Reply::text(INVALID_TOKEN)).await;
            }
        }
    }

    /// `/read`: relay the newest messages, deleting each one after it is sent.
    pub async fn read_inbox(&self, chat_id: ChatId, user_id: UserId) {
        let Some(session) = self.store.get(user_id).await else {
            self.reply(chat_id, &Reply::text(NO_ACTIVE_INBOX)).await;
            return;
        };
        let token = session.auth_token.as_str();

        let listing = match self.mail.list_messages(token).await {
            Ok(listing) => listing,
            Err(e) => {
                warn!(user_id = user_id.0, error = %e, "listing messages failed");
                self.reply(chat_id, &Reply::text(READ_FAILED)).await;
                return;
            }
        };

        if listing.is_empty() {
            self.reply(chat_id, &Reply::text(NO_NEW_EMAILS)).await;
            return;
        }

        for summary in listing.iter().take(self.cfg.read_batch_limit) {
            let msg = match self.mail.read_message(token, &summary.id).await {
                Ok(msg) => msg,
                Err(e) => {
                    warn!(user_id = user_id.0, message_id = %summary.id, error = %e, "skipping unreadable message");
                    continue;
                }
            };

            let relayed = self
                .reply(chat_id, &relay_reply(&msg, self.cfg.message_body_limit))
                .await;
            if relayed.is_none() {
                // Keep it on the provider; the next /read tries again.
                warn!(user_id = user_id.0, message_id = %summary.id, "relay failed, message kept");
                continue;
            }

            if let Err(e) = self.mail.delete_message(token, &summary.id).await {
                warn!(user_id = user_id.0, message_id = %summary.id, error = %e, "delete after relay failed");
            }
        }
    }

    async fn provision(&self) -> Result<Option<MailSession>> {
        let domains = self.mail.list_domains().await?;
        let Some((address, password)) = random_credentials(&domains) else {
            return Ok(None);
        };

        self.mail.create_account(&address, &password).await?;
        let auth_token = self.mail.authenticate(&address, &password).await?;

        Ok(Some(MailSession::new(address, password, auth_token)))
    }

    async fn reply(&self, chat_id: ChatId, reply: &Reply) -> Option<MessageRef> {
        deliver(self.messenger.as_ref(), chat_id, reply).await
    }
}

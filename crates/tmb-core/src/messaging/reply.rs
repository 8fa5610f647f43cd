use tracing::{error, warn};

use crate::{
    domain::{ChatId, MessageRef},
    formatting::escape_html,
    messaging::port::MessagingPort,
};

/// An outgoing message in two renderings: HTML for the normal path and plain
/// text for when the formatted send is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub html: String,
    pub plain: String,
}

impl Reply {
    pub fn new(html: impl Into<String>, plain: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            plain: plain.into(),
        }
    }

    /// A reply with no markup at all.
    pub fn text(text: impl Into<String>) -> Self {
        let plain = text.into();
        Self {
            html: escape_html(&plain),
            plain,
        }
    }
}

/// Send `reply` as HTML; on failure retry once with the plain rendering.
///
/// Returns `None` when both attempts failed. Failures are logged, never
/// propagated.
pub async fn deliver(
    messenger: &dyn MessagingPort,
    chat_id: ChatId,
    reply: &Reply,
) -> Option<MessageRef> {
    match messenger.send_html(chat_id, &reply.html).await {
        Ok(msg) => Some(msg),
        Err(e) => {
            warn!(chat_id = chat_id.0, error = %e, "formatted reply rejected, sending plain text");
            match messenger.send_text(chat_id, &reply.plain).await {
                Ok(msg) => Some(msg),
                Err(e) => {
                    error!(chat_id = chat_id.0, error = %e, "plain reply failed, dropping");
                    None
                }
            }
        }
    }
}

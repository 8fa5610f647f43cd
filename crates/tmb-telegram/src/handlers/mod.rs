//! Telegram update handlers.
//!
//! Each handler is a small adapter that pulls ids and text out of the
//! Telegram update and calls into the `tmb-core` inbox service.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use tmb_core::domain::ChatId;

use crate::router::AppState;
mod commands;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        // Stickers, photos, etc. have nothing to do with an inbox.
        return Ok(());
    };

    if text.starts_with('/') {
        return commands::handle_command(msg, state).await;
    }

    // In groups the bot sees ordinary chatter; only answer it in private.
    if msg.chat.is_private() {
        state.inbox.unknown(ChatId(msg.chat.id.0)).await;
    }
    Ok(())
}

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::info;

use tmb_core::domain::{ChatId, UserId};

use crate::router::AppState;

/// Bot commands understood by the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BotCommand {
    Help,
    New,
    Read,
    Repair,
}

impl BotCommand {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "start" | "help" => Some(Self::Help),
            "new" => Some(Self::New),
            "read" => Some(Self::Read),
            "repair" => Some(Self::Repair),
            _ => None,
        }
    }
}

/// A command split into its name, optional `@botname` and argument text.
#[derive(Debug, PartialEq, Eq)]
struct ParsedCommand {
    name: String,
    mention: Option<String>,
    arg: String,
}

fn parse_command(text: &str) -> ParsedCommand {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let arg = parts.next().unwrap_or("").trim().to_string();

    let mut head = first.trim_start_matches('/').splitn(2, '@');
    let name = head.next().unwrap_or("").to_lowercase();
    let mention = head.next().filter(|m| !m.is_empty()).map(str::to_string);

    ParsedCommand { name, mention, arg }
}

/// True when the command names a bot other than us. Without our own
/// username every command is taken as ours.
fn addressed_elsewhere(mention: Option<&str>, own: Option<&str>) -> bool {
    match (mention, own) {
        (Some(m), Some(own)) => !m.eq_ignore_ascii_case(own),
        _ => false,
    }
}

pub async fn handle_command(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let user_id = UserId(user.id.0 as i64);
    let chat_id = ChatId(msg.chat.id.0);

    let ParsedCommand { name, mention, arg } = parse_command(text);
    if addressed_elsewhere(mention.as_deref(), state.bot_username.as_deref()) {
        return Ok(());
    }
    let Some(command) = BotCommand::parse(&name) else {
        if msg.chat.is_private() {
            state.inbox.unknown(chat_id).await;
        }
        return Ok(());
    };

    // Arguments are never logged: for /repair they are the user's credentials.
    info!(user_id = user_id.0, command = ?command, "command");

    match command {
        BotCommand::Help => state.inbox.help(chat_id).await,
        BotCommand::New => state.inbox.new_inbox(chat_id, user_id).await,
        BotCommand::Read => state.inbox.read_inbox(chat_id, user_id).await,
        BotCommand::Repair => state.inbox.repair(chat_id, user_id, &arg).await,
    }

    Ok(())
}

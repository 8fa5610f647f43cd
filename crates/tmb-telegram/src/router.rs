use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tracing::{info, warn};

use tmb_core::{
    config::Config, inbox::InboxService, mail::port::MailProvider, messaging::port::MessagingPort,
    store::SessionStore,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub inbox: Arc<InboxService>,
    /// Our own `@username`, used to skip `/cmd@otherbot` in groups.
    pub bot_username: Option<String>,
}

/// Long-poll Telegram until Ctrl-C.
pub async fn run_polling(
    cfg: Arc<Config>,
    mail: Arc<dyn MailProvider>,
    store: Arc<SessionStore>,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    let bot_username = match bot.get_me().await {
        Ok(me) => {
            info!(username = %me.username(), "bot started");
            Some(me.username().to_string())
        }
        Err(e) => {
            warn!(error = %e, "get_me failed; continuing");
            None
        }
    };

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let inbox = Arc::new(InboxService::new(cfg, store, mail, messenger));
    let state = Arc::new(AppState {
        inbox,
        bot_username,
    });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("dispatcher stopped");
    Ok(())
}

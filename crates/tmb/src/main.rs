use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use tmb_core::{config::Config, store::SessionStore};
use tmb_mailtm::MailTmClient;

mod ping;

#[tokio::main]
async fn main() -> Result<(), tmb_core::Error> {
    tmb_core::logging::init("tmb")?;
    let cfg = Arc::new(Config::load()?);

    let mail = Arc::new(MailTmClient::new(
        cfg.mailtm_base_url.clone(),
        cfg.mailtm_timeout,
    )?);
    // Volatile by design: users restore inboxes with /repair after a restart.
    let store = Arc::new(SessionStore::new());

    let shutdown = CancellationToken::new();
    let ping = tokio::spawn(ping::serve(cfg.ping_port, shutdown.clone()));

    let polled = tmb_telegram::router::run_polling(cfg, mail, store).await;

    shutdown.cancel();
    match ping.await {
        Ok(Err(e)) => error!(error = %e, "ping server failed"),
        Err(e) => error!(error = %e, "ping server task panicked"),
        Ok(Ok(())) => {}
    }

    polled.map_err(|e| tmb_core::Error::Messaging(format!("telegram bot failed: {e}")))?;
    info!("bye");
    Ok(())
}

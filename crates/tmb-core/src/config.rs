use std::{env, time::Duration};

use crate::{errors::Error, formatting::TELEGRAM_TEXT_LIMIT, Result};

pub const DEFAULT_MAILTM_BASE_URL: &str = "https://api.mail.tm";

/// Typed configuration for the bot, read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    // Telegram
    pub telegram_bot_token: String,

    // Mail provider
    pub mailtm_base_url: String,
    pub mailtm_timeout: Duration,

    // Liveness
    pub ping_port: u16,

    // Inbox relay
    pub read_batch_limit: usize,
    pub message_body_limit: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        // A missing .env is fine; real deployments set the environment directly.
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = var("TELEGRAM_BOT_TOKEN")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
            })?;

        let mailtm_base_url = var("MAILTM_BASE_URL")
            .and_then(non_empty)
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_MAILTM_BASE_URL.to_string());
        let mailtm_timeout =
            Duration::from_secs(parse_num::<u64>(var("MAILTM_TIMEOUT_SECS")).unwrap_or(10).max(1));

        let ping_port = parse_num::<u16>(var("PING_PORT")).unwrap_or(8080);

        let read_batch_limit = parse_num::<usize>(var("READ_BATCH_LIMIT")).unwrap_or(5).max(1);
        // Anything past Telegram's own cap would be cut again when relaying.
        let message_body_limit = parse_num::<usize>(var("MESSAGE_BODY_LIMIT"))
            .unwrap_or(2000)
            .clamp(1, TELEGRAM_TEXT_LIMIT);

        Ok(Self {
            telegram_bot_token,
            mailtm_base_url,
            mailtm_timeout,
            ping_port,
            read_batch_limit,
            message_body_limit,
        })
    }
}

fn parse_num<T: std::str::FromStr>(v: Option<String>) -> Option<T> {
    v.and_then(|s| s.trim().parse::<T>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn cfg_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|k| map.get(k).cloned())
    }

    #[test]
    fn requires_bot_token() {
        assert!(matches!(cfg_from(&[]), Err(Error::Config(_))));
        assert!(matches!(
            cfg_from(&[("TELEGRAM_BOT_TOKEN", "   ")]),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn defaults() {
        let cfg = cfg_from(&[("TELEGRAM_BOT_TOKEN", "123:abc")]).unwrap();
        assert_eq!(cfg.telegram_bot_token, "123:abc");
        assert_eq!(cfg.mailtm_base_url, DEFAULT_MAILTM_BASE_URL);
        assert_eq!(cfg.mailtm_timeout, Duration::from_secs(10));
        assert_eq!(cfg.ping_port, 8080);
        assert_eq!(cfg.read_batch_limit, 5);
        assert_eq!(cfg.message_body_limit, 2000);
    }

    #[test]
    fn overrides_and_bad_numbers() {
        let cfg = cfg_from(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("MAILTM_BASE_URL", "http://127.0.0.1:9000/"),
            ("MAILTM_TIMEOUT_SECS", "3"),
            ("PING_PORT", "not-a-port"),
            ("READ_BATCH_LIMIT", " 2 "),
            ("MESSAGE_BODY_LIMIT", "0"),
        ])
        .unwrap();
        assert_eq!(cfg.mailtm_base_url, "http://127.0.0.1:9000");
        assert_eq!(cfg.mailtm_timeout, Duration::from_secs(3));
        assert_eq!(cfg.ping_port, 8080);
        assert_eq!(cfg.read_batch_limit, 2);
        assert_eq!(cfg.message_body_limit, 1);
    }

    #[test]
    fn body_limit_is_capped_at_telegram_limit() {
        let cfg = cfg_from(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("MESSAGE_BODY_LIMIT", "1000000"),
        ])
        .unwrap();
        assert_eq!(cfg.message_body_limit, TELEGRAM_TEXT_LIMIT);
    }
}

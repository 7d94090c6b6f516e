use std::{env, fmt, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_WEBHOOK_PATH: &str = "/api/gorboy-bot";
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(5000);

/// Typed process configuration.
///
/// Only the bot token is a secret, and even that is optional: without it the
/// webhook keeps answering 200 but never replies.
#[derive(Clone)]
pub struct Config {
    pub telegram_bot_token: Option<String>,
    pub bind_addr: String,
    pub webhook_path: String,
    pub cooldown_window: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telegram_bot_token: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            webhook_path: DEFAULT_WEBHOOK_PATH.to_string(),
            cooldown_window: DEFAULT_COOLDOWN,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "telegram_bot_token",
                &self.telegram_bot_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("bind_addr", &self.bind_addr)
            .field("webhook_path", &self.webhook_path)
            .field("cooldown_window", &self.cooldown_window)
            .finish()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").and_then(non_empty);
        let bind_addr = env_str("BIND_ADDR")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let webhook_path = env_str("WEBHOOK_PATH")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_WEBHOOK_PATH.to_string());
        if !webhook_path.starts_with('/') {
            return Err(Error::Config(format!(
                "WEBHOOK_PATH must start with '/': {webhook_path}"
            )));
        }

        let cooldown_window = env_u64("COOLDOWN_MS")
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_COOLDOWN);

        Ok(Self {
            telegram_bot_token,
            bind_addr,
            webhook_path,
            cooldown_window,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
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
    use super::*;

    #[test]
    fn dotenv_parsing_strips_quotes_and_comments() {
        let parsed = parse_dotenv(
            "# comment\nTELEGRAM_BOT_TOKEN=\"123:abc\"\n\nBIND_ADDR = '127.0.0.1:9000'\nbroken line\n=novalue\n",
        );
        assert_eq!(
            parsed,
            vec![
                ("TELEGRAM_BOT_TOKEN".to_string(), "123:abc".to_string()),
                ("BIND_ADDR".to_string(), "127.0.0.1:9000".to_string()),
            ]
        );
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = Config {
            telegram_bot_token: Some("123:secret".to_string()),
            ..Config::default()
        };
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("secret"));
        assert!(dbg.contains("[REDACTED]"));
    }

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert!(cfg.telegram_bot_token.is_none());
        assert_eq!(cfg.webhook_path, "/api/gorboy-bot");
        assert_eq!(cfg.cooldown_window, Duration::from_millis(5000));
    }
}

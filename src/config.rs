use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Переменная окружения, которой можно задать токен бота.
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Токен доступа к боту.
    pub bot_token: String,

    /// Базовый адрес API сервиса сообщений.
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_url: DEFAULT_API_URL.to_owned(),
        }
    }
}

/// Загружает конфигурацию.
pub fn load(path: PathBuf) -> anyhow::Result<Config> {
    let mut cfg: Config = confy::load_path(path)?;

    normalize(&mut cfg, env::var(TOKEN_ENV).ok());

    Ok(cfg)
}

pub fn normalize(cfg: &mut Config, env_token: Option<String>) {
    // Токен из окружения важнее токена из файла.
    if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
        cfg.bot_token = token;
    }

    cfg.bot_token = cfg.bot_token.trim().to_owned();
}

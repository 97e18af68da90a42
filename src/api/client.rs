use std::time::Duration;

use log::debug;
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use super::{
    models::{Response, SendMessageRequest, Update},
    Messenger,
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Клиент Telegram Bot API.
pub struct TelegramClient {
    client: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    /// Создаёт новый инстанс клиента.
    ///
    /// Токен не проверяется: с неверным токеном запросы просто завершатся ошибкой.
    pub fn new(base_url: &str, token: &str) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
        })
    }

    fn request<B: Serialize>(
        &self,
        http_method: Method,
        api_method: &str,
        payload: Option<&B>,
    ) -> Result<String, ApiError> {
        let url = self.build_url(api_method);
        let mut req_builder = self.client.request(http_method.clone(), &url);

        if let Some(b) = payload {
            req_builder = req_builder.json(b)
        }

        // Токен входит в URL, поэтому в лог пишем только метод.
        debug!("Запрос в АПИ: {} {}", http_method, api_method);
        let resp = req_builder.send()?;

        let status = resp.status();
        let body = resp.text()?;

        debug!("Тело ответа на {} ({}): {}", api_method, status, body);

        if !status.is_success() {
            return Err(ApiError::Status { status, body });
        }

        Ok(body)
    }

    fn decode<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
        let resp: Response<R> = serde_json::from_str(body)?;

        match resp {
            Response {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            Response { description, .. } => Err(ApiError::NotOk { description }),
        }
    }

    fn build_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }
}

impl Messenger for TelegramClient {
    fn get_updates(&self) -> Result<Vec<Update>, ApiError> {
        let body = self.request::<()>(Method::GET, "getUpdates", None)?;

        Self::decode(&body)
    }

    fn send_message(&self, chat_id: &str, text: &str) -> Result<(), ApiError> {
        let payload = SendMessageRequest { chat_id, text };

        self.request(Method::POST, "sendMessage", Some(&payload))?;

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("transport")]
    Transport(#[from] reqwest::Error),

    #[error("got {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("deserialize")]
    Decode(#[from] serde_json::Error),

    #[error("service replied not ok: {description:?}")]
    NotOk { description: Option<String> },
}

mod client;
mod models;

pub use client::{ApiError, TelegramClient};
pub use models::Update;
#[cfg(test)]
pub use models::{Chat, Message};

pub type Result<T> = std::result::Result<T, ApiError>;

/// Внешний сервис сообщений, через который приходят обновления и уходят заказы.
pub trait Messenger: Send + Sync {
    /// Запрашивает последние входящие обновления.
    fn get_updates(&self) -> Result<Vec<Update>>;

    /// Отправляет текстовое сообщение в указанный чат.
    fn send_message(&self, chat_id: &str, text: &str) -> Result<()>;
}

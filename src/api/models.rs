use serde::{Deserialize, Serialize};

/// Общая обёртка над ответами API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Response<T> {
    pub ok: bool,

    /// Отсутствует в ответах с `ok: false`.
    pub result: Option<T>,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: Option<i64>,

    /// Отсутствует у обновлений, которые не являются новым сообщением.
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    pub chat: Chat,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
}

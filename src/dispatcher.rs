use log::{debug, warn};

use crate::{
    api::{self, Messenger},
    model::DestinationState,
};

/// Отправляет заказ получателю. Делает ровно одну попытку.
///
/// Если получатель не определён, запрос всё равно уходит с пустым
/// идентификатором, а отказ сервиса возвращается как обычная ошибка доставки.
pub fn send(messenger: &dyn Messenger, destination: &DestinationState, text: &str) -> api::Result<()> {
    if !matches!(destination, DestinationState::Resolved(_)) {
        warn!("Отправляем заказ без получателя: {:?}", destination);
    }

    let chat_id = destination.identifier();

    debug!("Отправляем заказ в чат {:?}", chat_id);
    messenger.send_message(chat_id, text)
}

use std::{
    sync::{
        mpsc::{self, Receiver, TryRecvError},
        Arc,
    },
    thread,
};

use log::{debug, warn};

use crate::{
    api::Messenger,
    model::{DestinationState, ResolveFailure},
};

/// Определяет получателя заказа по последнему входящему сообщению.
///
/// Никогда не возвращает ошибку: любые сбои превращаются в
/// [`DestinationState::Failed`], а их причина уходит только в лог.
pub fn resolve_destination(messenger: &dyn Messenger) -> DestinationState {
    let updates = match messenger.get_updates() {
        Ok(updates) => updates,
        Err(e) => {
            warn!("Не удалось получить обновления: {}", e);
            return DestinationState::Failed(ResolveFailure::NoUpdates);
        }
    };

    let Some(latest) = updates.last() else {
        warn!("Сервис не вернул ни одного обновления");
        return DestinationState::Failed(ResolveFailure::NoUpdates);
    };

    match &latest.message {
        Some(message) => {
            debug!("Получатель заказа определён: {}", message.chat.id);
            DestinationState::Resolved(message.chat.id.to_string())
        }
        None => {
            warn!("В последнем обновлении {:?} нет сообщения", latest.update_id);
            DestinationState::Failed(ResolveFailure::NoChatId)
        }
    }
}

/// Фоновое определение получателя.
///
/// Запрос уходит один раз при создании и не отменяется. Как только состояние
/// стало конечным, оно больше не меняется.
pub struct Resolution {
    rx: Option<Receiver<DestinationState>>,
    state: DestinationState,
}

impl Resolution {
    /// Запускает определение получателя в отдельном потоке.
    pub fn start(messenger: Arc<dyn Messenger>) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let state = resolve_destination(messenger.as_ref());
            // Получатель мог уже исчезнуть вместе с формой.
            let _ = tx.send(state);
        });

        Self {
            rx: Some(rx),
            state: DestinationState::Unresolved,
        }
    }

    /// Возвращает текущее состояние, не дожидаясь ответа сервиса.
    pub fn state(&mut self) -> &DestinationState {
        let received = match &self.rx {
            Some(rx) => rx.try_recv(),
            None => return &self.state,
        };

        match received {
            Ok(state) => self.settle(state),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.settle_lost(),
        }

        &self.state
    }

    /// Дожидается конечного состояния.
    pub fn wait(&mut self) -> &DestinationState {
        let received = match &self.rx {
            Some(rx) => rx.recv(),
            None => return &self.state,
        };

        match received {
            Ok(state) => self.settle(state),
            Err(_) => self.settle_lost(),
        }

        &self.state
    }

    fn settle(&mut self, state: DestinationState) {
        debug!("Состояние получателя: {:?}", state);
        self.state = state;
        self.rx = None;
    }

    fn settle_lost(&mut self) {
        warn!("Поток определения получателя завершился без результата");
        self.settle(DestinationState::Failed(ResolveFailure::NoUpdates));
    }
}

use std::sync::Arc;

use log::{debug, error, info};

use crate::{
    api::Messenger,
    dispatcher, message,
    model::{DesignType, DestinationState, Field, FieldError, OrderDraft, ValidationErrors},
    notify::{NotificationKind, Notifier},
    resolver::Resolution,
    validation,
};

pub const MSG_FILL_REQUIRED: &str = "Пожалуйста, заполните все обязательные поля.";
pub const MSG_SENT: &str = "Ваш заказ успешно отправлен!";
pub const MSG_DELIVERY_FAILED: &str = "Произошла ошибка при отправке сообщения.";

/// Итог попытки отправить заказ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Не заполнены обязательные поля, сервис не вызывался.
    Invalid,
    /// Заказ доставлен.
    Sent,
    /// Сервис отказал или был недоступен. Можно отправить ещё раз.
    DeliveryFailed,
}

/// Форма заказа дизайна.
///
/// Владеет черновиком, ошибками валидации и состоянием получателя. Получатель
/// начинает определяться сразу при создании формы.
pub struct OrderForm {
    draft: OrderDraft,
    errors: ValidationErrors,
    selector_open: bool,
    messenger: Arc<dyn Messenger>,
    destination: Resolution,
}

impl OrderForm {
    /// Создаёт пустую форму и запускает определение получателя.
    pub fn new(messenger: Arc<dyn Messenger>) -> Self {
        let destination = Resolution::start(messenger.clone());

        Self {
            draft: OrderDraft::default(),
            errors: ValidationErrors::new(),
            selector_open: false,
            messenger,
            destination,
        }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Текст ошибки, который нужно показать рядом с полем.
    pub fn error_for(&self, field: Field) -> Option<&str> {
        field
            .error_key()
            .and_then(|k| self.errors.get(&k))
            .map(String::as_str)
    }

    /// Текущее состояние получателя, без ожидания.
    pub fn destination(&mut self) -> &DestinationState {
        self.destination.state()
    }

    /// Записывает новое значение поля и сразу снимает его ошибку, если она была.
    pub fn update(&mut self, field: Field, value: &str) -> Result<(), FieldError> {
        self.draft.set(field, value)?;
        self.clear_error(field);

        Ok(())
    }

    pub fn is_selector_open(&self) -> bool {
        self.selector_open
    }

    pub fn toggle_selector(&mut self) {
        self.selector_open = !self.selector_open;
    }

    /// Выбирает тип дизайна и закрывает список.
    pub fn select_design_type(&mut self, design_type: DesignType) {
        self.draft.design_type = Some(design_type);
        self.selector_open = false;
        self.clear_error(Field::DesignType);
    }

    /// Нужно ли показывать поле для своего типа дизайна.
    pub fn shows_custom_design_type(&self) -> bool {
        self.draft.design_type == Some(DesignType::Other)
    }

    /// Проверяет форму и, если всё заполнено, отправляет заказ.
    ///
    /// Перед отправкой дожидается пока определится получатель.
    pub fn submit(&mut self, notifier: &dyn Notifier) -> SubmitOutcome {
        self.errors = validation::validate(&self.draft);

        if !self.errors.is_empty() {
            debug!("Форма не прошла проверку: {:?}", self.errors);
            notifier.notify(NotificationKind::Error, MSG_FILL_REQUIRED);
            return SubmitOutcome::Invalid;
        }

        let text = message::compose(&self.draft);
        let destination = self.destination.wait();

        match dispatcher::send(self.messenger.as_ref(), destination, &text) {
            Ok(()) => {
                info!("Заказ отправлен");
                notifier.notify(NotificationKind::Success, MSG_SENT);
                SubmitOutcome::Sent
            }
            Err(e) => {
                error!("Не удалось отправить заказ: {}", e);
                notifier.notify(NotificationKind::Error, MSG_DELIVERY_FAILED);
                SubmitOutcome::DeliveryFailed
            }
        }
    }

    fn clear_error(&mut self, field: Field) {
        if let Some(key) = field.error_key() {
            if self.errors.remove(&key).is_some() {
                debug!("Снята ошибка {}", key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, sync::Mutex};

    use enum_iterator::all;

    use super::*;
    use crate::{
        api::{ApiError, Chat, Message, Update},
        model::{ErrorKey, ResolveFailure},
    };

    struct FakeMessenger {
        chat_id: Option<i64>,
        accept: bool,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl FakeMessenger {
        fn new(chat_id: Option<i64>, accept: bool) -> Arc<Self> {
            Arc::new(Self {
                chat_id,
                accept,
                sent: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Messenger for FakeMessenger {
        fn get_updates(&self) -> crate::api::Result<Vec<Update>> {
            Ok(self
                .chat_id
                .map(|id| Update {
                    update_id: Some(1),
                    message: Some(Message { chat: Chat { id } }),
                })
                .into_iter()
                .collect())
        }

        fn send_message(&self, chat_id: &str, text: &str) -> crate::api::Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((chat_id.to_owned(), text.to_owned()));

            if self.accept && !chat_id.is_empty() {
                Ok(())
            } else {
                Err(ApiError::NotOk {
                    description: Some("Bad Request: chat not found".into()),
                })
            }
        }
    }

    #[derive(Default)]
    struct RecordingNotifier(RefCell<Vec<(NotificationKind, String)>>);

    impl Notifier for RecordingNotifier {
        fn notify(&self, kind: NotificationKind, message: &str) {
            self.0.borrow_mut().push((kind, message.to_owned()));
        }
    }

    impl RecordingNotifier {
        fn take(&self) -> Vec<(NotificationKind, String)> {
            self.0.take()
        }
    }

    fn fill(form: &mut OrderForm) {
        form.select_design_type(DesignType::Logo);
        form.update(Field::DesignText, "X").unwrap();
        form.update(Field::Color, "red").unwrap();
        form.update(Field::DesignElements, "car").unwrap();
        form.update(Field::Width, "100").unwrap();
        form.update(Field::Height, "50").unwrap();
        form.update(Field::AdditionalInfo, "none").unwrap();
        form.update(Field::TelegramUsername, "@u").unwrap();
    }

    #[test]
    fn submit_filled_form() {
        let messenger = FakeMessenger::new(Some(42), true);
        let notifier = RecordingNotifier::default();
        let mut form = OrderForm::new(messenger.clone());

        fill(&mut form);
        assert!(validation::validate(form.draft()).is_empty());

        assert_eq!(form.submit(&notifier), SubmitOutcome::Sent);

        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "42");
        for part in ["Логотип", "100x50", "@u"] {
            assert!(sent[0].1.contains(part), "{} not in {}", part, sent[0].1);
        }

        assert_eq!(
            notifier.take(),
            vec![(NotificationKind::Success, MSG_SENT.to_owned())]
        );
        assert!(form.errors().is_empty());
    }

    #[test]
    fn submit_empty_form() {
        let messenger = FakeMessenger::new(Some(42), true);
        let notifier = RecordingNotifier::default();
        let mut form = OrderForm::new(messenger.clone());

        assert_eq!(form.submit(&notifier), SubmitOutcome::Invalid);

        assert_eq!(form.errors().len(), 7);
        assert!(messenger.sent().is_empty());
        assert_eq!(
            notifier.take(),
            vec![(NotificationKind::Error, MSG_FILL_REQUIRED.to_owned())]
        );
    }

    #[test]
    fn editing_clears_only_its_error() {
        let mut form = OrderForm::new(FakeMessenger::new(Some(42), true));
        form.submit(&RecordingNotifier::default());

        form.update(Field::Color, "blue").unwrap();

        assert_eq!(form.error_for(Field::Color), None);
        let keys: Vec<ErrorKey> = form.errors().keys().copied().collect();
        assert_eq!(keys.len(), 6);
        assert!(!keys.contains(&ErrorKey::Color));
    }

    #[test]
    fn editing_clears_error_without_revalidating() {
        let mut form = OrderForm::new(FakeMessenger::new(Some(42), true));
        form.submit(&RecordingNotifier::default());

        // Пустое значение всё равно снимает ошибку до следующей отправки.
        form.update(Field::DesignText, "").unwrap();
        assert_eq!(form.error_for(Field::DesignText), None);
    }

    #[test]
    fn editing_dimension_clears_size() {
        let mut form = OrderForm::new(FakeMessenger::new(Some(42), true));
        form.submit(&RecordingNotifier::default());
        assert!(form.error_for(Field::Width).is_some());

        form.update(Field::Height, "0").unwrap();

        assert_eq!(form.errors().get(&ErrorKey::Size), None);
        assert_eq!(form.errors().len(), 6);
    }

    #[test]
    fn optional_fields_never_touch_errors() {
        let mut form = OrderForm::new(FakeMessenger::new(Some(42), true));
        form.submit(&RecordingNotifier::default());

        form.update(Field::FileSize, "1 МБ").unwrap();
        form.update(Field::CustomDesignType, "Стикеры").unwrap();

        assert_eq!(form.errors().len(), 7);
    }

    #[test]
    fn malformed_value_keeps_state() {
        let mut form = OrderForm::new(FakeMessenger::new(Some(42), true));
        form.submit(&RecordingNotifier::default());

        assert!(form.update(Field::Width, "широко").is_err());

        assert_eq!(form.draft().width, 0);
        assert!(form.errors().contains_key(&ErrorKey::Size));
    }

    #[test]
    fn selecting_design_type() {
        let mut form = OrderForm::new(FakeMessenger::new(Some(42), true));
        form.submit(&RecordingNotifier::default());

        form.toggle_selector();
        assert!(form.is_selector_open());

        form.select_design_type(DesignType::Other);

        assert!(!form.is_selector_open());
        assert!(form.shows_custom_design_type());
        assert_eq!(form.error_for(Field::DesignType), None);

        form.select_design_type(DesignType::Banner);
        assert!(!form.shows_custom_design_type());
    }

    #[test]
    fn custom_design_type_is_sent_for_other() {
        let messenger = FakeMessenger::new(Some(42), true);
        let mut form = OrderForm::new(messenger.clone());

        fill(&mut form);
        form.select_design_type(DesignType::Other);
        form.update(Field::CustomDesignType, "Стикерпак").unwrap();

        assert_eq!(form.submit(&RecordingNotifier::default()), SubmitOutcome::Sent);

        let text = &messenger.sent()[0].1;
        assert!(text.contains("Тип дизайна: Стикерпак"));
        assert!(!text.contains("Другое"));
    }

    #[test]
    fn unresolved_destination_fails_delivery() {
        let messenger = FakeMessenger::new(None, true);
        let notifier = RecordingNotifier::default();
        let mut form = OrderForm::new(messenger.clone());

        fill(&mut form);

        assert_eq!(form.submit(&notifier), SubmitOutcome::DeliveryFailed);
        assert_eq!(
            form.destination(),
            &DestinationState::Failed(ResolveFailure::NoUpdates)
        );

        // Попытка всё равно была, с пустым идентификатором.
        assert_eq!(messenger.sent().len(), 1);
        assert_eq!(messenger.sent()[0].0, "");
        assert_eq!(
            notifier.take(),
            vec![(NotificationKind::Error, MSG_DELIVERY_FAILED.to_owned())]
        );
    }

    #[test]
    fn resubmit_after_delivery_failure() {
        let messenger = FakeMessenger::new(Some(42), false);
        let notifier = RecordingNotifier::default();
        let mut form = OrderForm::new(messenger.clone());

        fill(&mut form);

        assert_eq!(form.submit(&notifier), SubmitOutcome::DeliveryFailed);
        assert_eq!(form.submit(&notifier), SubmitOutcome::DeliveryFailed);

        // Каждая отправка делает ровно одну попытку.
        assert_eq!(messenger.sent().len(), 2);
        assert!(notifier
            .take()
            .iter()
            .all(|(kind, _)| *kind == NotificationKind::Error));
    }

    #[test]
    fn every_required_field_maps_to_error() {
        let mut form = OrderForm::new(FakeMessenger::new(Some(42), true));
        form.submit(&RecordingNotifier::default());

        let flagged: Vec<Field> = all::<Field>()
            .filter(|f| form.error_for(*f).is_some())
            .collect();

        assert_eq!(flagged.len(), 8);
        assert!(!flagged.contains(&Field::FileSize));
        assert!(!flagged.contains(&Field::CustomDesignType));
    }
}

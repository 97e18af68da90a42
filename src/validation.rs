use crate::model::{ErrorKey, OrderDraft, ValidationErrors};

pub const REQUIRED: &str = "Обязательное поле";

/// Проверяет черновик заказа.
///
/// Все правила проверяются независимо друг от друга, пустой результат означает
/// что заказ можно отправлять. Свой тип дизайна и размер файла не проверяются.
pub fn validate(draft: &OrderDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let mut require = |key: ErrorKey, ok: bool| {
        if !ok {
            errors.insert(key, REQUIRED.to_owned());
        }
    };

    require(ErrorKey::DesignType, draft.design_type.is_some());
    require(ErrorKey::DesignText, !draft.design_text.is_empty());
    require(ErrorKey::Color, !draft.color.is_empty());
    require(ErrorKey::DesignElements, !draft.design_elements.is_empty());
    // Ноль считается незаполненным размером.
    require(ErrorKey::Size, draft.width != 0 && draft.height != 0);
    require(ErrorKey::AdditionalInfo, !draft.additional_info.is_empty());
    require(ErrorKey::TelegramUsername, !draft.telegram_username.is_empty());

    errors
}

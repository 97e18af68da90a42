use crate::model::{DesignType, OrderDraft};

/// Подставляется вместо незаполненного размера файла.
pub const NOT_SPECIFIED: &str = "Не указано";

/// Собирает текст заказа, который уйдёт получателю.
pub fn compose(draft: &OrderDraft) -> String {
    let design_type = match draft.design_type {
        Some(DesignType::Other) => draft.custom_design_type.clone(),
        Some(t) => t.to_string(),
        None => String::new(),
    };

    let file_size = if draft.file_size.is_empty() {
        NOT_SPECIFIED
    } else {
        &draft.file_size
    };

    format!(
        "Новый заказ дизайна:\n\
         Тип дизайна: {}\n\
         Текст: {}\n\
         Цвет: {}\n\
         Элементы дизайна: {}\n\
         Размер: {}x{}\n\
         Размер файла: {}\n\
         Доп. информация: {}\n\
         Telegram: {}",
        design_type,
        draft.design_text,
        draft.color,
        draft.design_elements,
        draft.width,
        draft.height,
        file_size,
        draft.additional_info,
        draft.telegram_username,
    )
}

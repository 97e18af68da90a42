use std::{collections::BTreeMap, str::FromStr};

use enum_iterator::all;

/// Каталог типов дизайна, которые можно заказать.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    std::hash::Hash,
    derive_more::Display,
    enum_iterator::Sequence,
)]
pub enum DesignType {
    #[display(fmt = "Аватарка")]
    Avatar,
    #[display(fmt = "Форумное оформление темы")]
    ForumTheme,
    #[display(fmt = "Клип под музыку")]
    MusicClip,
    #[display(fmt = "промо-ролик")]
    PromoVideo,
    #[display(fmt = "Баннер")]
    Banner,
    #[display(fmt = "Логотип")]
    Logo,
    /// Свой вариант, название которого пользователь вводит сам.
    #[display(fmt = "Другое")]
    Other,
}

impl FromStr for DesignType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all::<DesignType>()
            .find(|t| t.to_string() == s)
            .ok_or_else(|| FieldError::UnknownDesignType(s.to_owned()))
    }
}

/// Все редактируемые поля формы заказа.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    std::hash::Hash,
    derive_more::Display,
    enum_iterator::Sequence,
)]
pub enum Field {
    #[display(fmt = "designType")]
    DesignType,
    #[display(fmt = "customDesignType")]
    CustomDesignType,
    #[display(fmt = "designText")]
    DesignText,
    #[display(fmt = "color")]
    Color,
    #[display(fmt = "designElements")]
    DesignElements,
    #[display(fmt = "width")]
    Width,
    #[display(fmt = "height")]
    Height,
    #[display(fmt = "fileSize")]
    FileSize,
    #[display(fmt = "additionalInfo")]
    AdditionalInfo,
    #[display(fmt = "telegramUsername")]
    TelegramUsername,
}

impl Field {
    /// Подпись поля, которую видит пользователь.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DesignType => "Выберите тип дизайна",
            Self::CustomDesignType => "Укажите свой вариант",
            Self::DesignText => "Текст для дизайна",
            Self::Color => "Цвет",
            Self::DesignElements => "Элементы дизайна (например, машина или персонаж)",
            Self::Width => "Ширина",
            Self::Height => "Высота",
            Self::FileSize => "Размер файла (необязательно)",
            Self::AdditionalInfo => "Дополнительная информация или советы",
            Self::TelegramUsername => "Имя пользователя в Telegram",
        }
    }

    /// Ключ ошибки валидации, который покрывает данное поле.
    /// Ширина и высота проверяются вместе и делят один ключ.
    pub fn error_key(&self) -> Option<ErrorKey> {
        match self {
            Self::DesignType => Some(ErrorKey::DesignType),
            Self::DesignText => Some(ErrorKey::DesignText),
            Self::Color => Some(ErrorKey::Color),
            Self::DesignElements => Some(ErrorKey::DesignElements),
            Self::Width | Self::Height => Some(ErrorKey::Size),
            Self::AdditionalInfo => Some(ErrorKey::AdditionalInfo),
            Self::TelegramUsername => Some(ErrorKey::TelegramUsername),
            Self::CustomDesignType | Self::FileSize => None,
        }
    }
}

/// Ключи, под которыми сообщаются ошибки валидации.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    std::hash::Hash,
    derive_more::Display,
    enum_iterator::Sequence,
)]
pub enum ErrorKey {
    #[display(fmt = "designType")]
    DesignType,
    #[display(fmt = "designText")]
    DesignText,
    #[display(fmt = "color")]
    Color,
    #[display(fmt = "designElements")]
    DesignElements,
    #[display(fmt = "size")]
    Size,
    #[display(fmt = "additionalInfo")]
    AdditionalInfo,
    #[display(fmt = "telegramUsername")]
    TelegramUsername,
}

impl ErrorKey {
    /// Поля, которые нужно исправить чтобы снять ошибку.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::DesignType => &[Field::DesignType],
            Self::DesignText => &[Field::DesignText],
            Self::Color => &[Field::Color],
            Self::DesignElements => &[Field::DesignElements],
            Self::Size => &[Field::Width, Field::Height],
            Self::AdditionalInfo => &[Field::AdditionalInfo],
            Self::TelegramUsername => &[Field::TelegramUsername],
        }
    }
}

/// Ошибки валидации по полям. Наличие ключа означает что поле не прошло проверку.
pub type ValidationErrors = BTreeMap<ErrorKey, String>;

/// Черновик заказа, который заполняет пользователь.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    /// Тип дизайна из каталога.
    pub design_type: Option<DesignType>,

    /// Свой тип дизайна. Учитывается только для [`DesignType::Other`].
    pub custom_design_type: String,

    pub design_text: String,
    pub color: String,
    pub design_elements: String,

    /// Ширина. Ноль означает что значение не задано.
    pub width: u32,

    /// Высота. Ноль означает что значение не задано.
    pub height: u32,

    pub file_size: String,
    pub additional_info: String,
    pub telegram_username: String,
}

impl OrderDraft {
    /// Записывает "сырое" значение в указанное поле.
    ///
    /// Размеры разбираются как неотрицательные целые, пустая строка даёт ноль.
    /// При ошибке разбора черновик не меняется.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), FieldError> {
        match field {
            Field::DesignType => {
                self.design_type = if value.is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
            Field::CustomDesignType => self.custom_design_type = value.to_owned(),
            Field::DesignText => self.design_text = value.to_owned(),
            Field::Color => self.color = value.to_owned(),
            Field::DesignElements => self.design_elements = value.to_owned(),
            Field::Width => self.width = parse_dimension(field, value)?,
            Field::Height => self.height = parse_dimension(field, value)?,
            Field::FileSize => self.file_size = value.to_owned(),
            Field::AdditionalInfo => self.additional_info = value.to_owned(),
            Field::TelegramUsername => self.telegram_username = value.to_owned(),
        }

        Ok(())
    }

    /// Возвращает текущее значение поля в виде строки.
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::DesignType => self
                .design_type
                .map(|t| t.to_string())
                .unwrap_or_default(),
            Field::CustomDesignType => self.custom_design_type.clone(),
            Field::DesignText => self.design_text.clone(),
            Field::Color => self.color.clone(),
            Field::DesignElements => self.design_elements.clone(),
            Field::Width => self.width.to_string(),
            Field::Height => self.height.to_string(),
            Field::FileSize => self.file_size.clone(),
            Field::AdditionalInfo => self.additional_info.clone(),
            Field::TelegramUsername => self.telegram_username.clone(),
        }
    }
}

fn parse_dimension(field: Field, value: &str) -> Result<u32, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }

    value.parse().map_err(|_| FieldError::NotANumber {
        field,
        value: value.to_owned(),
    })
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown design type \"{0}\"")]
    UnknownDesignType(String),

    #[error("{field} should be a non-negative integer, got \"{value}\"")]
    NotANumber { field: Field, value: String },
}

/// Причина, по которой не удалось определить получателя заказа.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ResolveFailure {
    /// Сервис не вернул ни одного сообщения или запрос не удался.
    #[display(fmt = "Сообщение не найдено")]
    NoUpdates,

    /// В последнем сообщении нет идентификатора чата.
    #[display(fmt = "Chat ID не найден")]
    NoChatId,
}

/// Состояние получателя заказа.
///
/// Начинается с [`DestinationState::Unresolved`] и один раз переходит в одно
/// из конечных состояний.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DestinationState {
    #[default]
    Unresolved,
    Resolved(String),
    Failed(ResolveFailure),
}

impl DestinationState {
    /// Проверяет что состояние больше не изменится.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    /// Идентификатор получателя, либо пустая строка если он не определён.
    pub fn identifier(&self) -> &str {
        match self {
            Self::Resolved(id) => id,
            _ => "",
        }
    }
}

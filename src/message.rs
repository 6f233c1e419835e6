use std::fmt;

pub type MessageId = i64;
pub type MessageParam = u64;

pub const NO_PARAM: MessageParam = 0;
pub const NO_STR: &str = "";

/// Тип сообщения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Signal,
    Common,
    String,
    Mixed,
}

/// Неизменяемое тегированное сообщение для межпоточной сигнализации.
///
/// Вариант полностью определяет, какие из полей значимы: `param` значим
/// только для `Common`/`Mixed`, `payload` только для `String`/`Mixed`.
/// Для остальных вариантов аксессоры возвращают заглушки ([`NO_PARAM`],
/// [`NO_STR`]). Ядро не интерпретирует `id`/`param`/`payload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggedMessage {
    Signal { id: MessageId },
    Common { id: MessageId, param: MessageParam },
    String { id: MessageId, payload: String },
    Mixed { id: MessageId, param: MessageParam, payload: String },
}

impl TaggedMessage {
    /// Signal: только идентификатор.
    pub fn signal(id: MessageId) -> Self {
        Self::Signal { id }
    }

    /// Common: идентификатор и числовой параметр.
    pub fn common(id: MessageId, param: MessageParam) -> Self {
        Self::Common { id, param }
    }

    /// String: идентификатор и строка.
    pub fn text(id: MessageId, payload: impl Into<String>) -> Self {
        Self::String { id, payload: payload.into() }
    }

    /// Mixed: идентификатор, параметр и строка.
    pub fn mixed(id: MessageId, param: MessageParam, payload: impl Into<String>) -> Self {
        Self::Mixed { id, param, payload: payload.into() }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Signal { .. } => MessageKind::Signal,
            Self::Common { .. } => MessageKind::Common,
            Self::String { .. } => MessageKind::String,
            Self::Mixed { .. } => MessageKind::Mixed,
        }
    }

    pub fn id(&self) -> MessageId {
        match self {
            Self::Signal { id }
            | Self::Common { id, .. }
            | Self::String { id, .. }
            | Self::Mixed { id, .. } => *id,
        }
    }

    pub fn param(&self) -> MessageParam {
        match self {
            Self::Common { param, .. } | Self::Mixed { param, .. } => *param,
            Self::Signal { .. } | Self::String { .. } => NO_PARAM,
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            Self::String { payload, .. } | Self::Mixed { payload, .. } => payload,
            Self::Signal { .. } | Self::Common { .. } => NO_STR,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Signal => "Signal",
            Self::Common => "Common",
            Self::String => "String",
            Self::Mixed => "Mixed",
        };
        f.write_str(name)
    }
}

use thiserror::Error;

/// Структурные ошибки очередей и пула.
///
/// Неудача захвата блокировки сюда не входит: `try_*` операции сообщают о
/// ней обычным `false`/`None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("queue is empty")]
    EmptyQueue,
    #[error("invalid argument: requested {requested}, available {available}")]
    InvalidArgument { requested: usize, available: usize },
}

/// Ошибки тела задачи, доставляемые через [`TaskHandle`](crate::handle::TaskHandle).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("task panicked: {0}")]
    Panic(String),
    #[error("result channel closed")]
    ChannelClosed,
    #[error("timed out waiting for task result")]
    Timeout,
}

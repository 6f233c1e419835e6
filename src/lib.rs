//! Многопоточная подложка чат-приложения: пул воркеров и FIFO-канал тегированных сообщений
//!
//! # Features
//! - Resizable пул воркеров на OS-потоках с graceful shutdown
//! - Отложенные задачи с одноразовым handle на результат
//! - Backpressure: при заполненной очереди задача выполняется на потоке отправителя
//! - Потокобезопасный FIFO-канал неизменяемых тегированных сообщений
//! - Блокирующие и неблокирующие операции доставки
//! - Захват паник тела задачи и счётчики для мониторинга

pub mod channel;
pub mod errors;
pub mod handle;
pub mod message;
pub mod model;
pub mod pool;
pub mod result;

pub use channel::Channel;
pub use message::TaggedMessage;
pub use pool::{Config, WorkerPool};

use super::{
    errors::TaskError,
    result::TaskResult,
};
use crossbeam::channel::{Receiver, RecvTimeoutError};
use std::time::Duration;

/// Отложенная единица работы: исполняется ровно один раз, воркером либо
/// синхронно на потоке отправителя при заполненной очереди.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Handle на результат задачи.
///
/// Одноразовый: результат наблюдается ровно один раз, методы ожидания
/// забирают `self`. Паника внутри тела задачи не покидает поток-исполнитель,
/// а приходит сюда как [`TaskError::Panic`].
pub struct TaskHandle<T> {
    receiver: Receiver<TaskResult<T>>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(receiver: Receiver<TaskResult<T>>) -> Self {
        Self { receiver }
    }

    /// Блокирующее ожидание результата. Дедлайна нет: если задача не
    /// завершается, ожидание не ограничено.
    pub fn wait(self) -> TaskResult<T> {
        self.receiver
            .recv()
            .unwrap_or(Err(TaskError::ChannelClosed))
    }

    /// Ожидание с таймаутом. По истечении возвращает [`TaskError::Timeout`];
    /// handle при этом потреблен, результат задачи теряется.
    pub fn wait_timeout(self, timeout: Duration) -> TaskResult<T> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(TaskError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(TaskError::ChannelClosed),
        }
    }

    /// Готов ли результат. Не потребляет handle.
    pub fn is_ready(&self) -> bool {
        !self.receiver.is_empty()
    }
}

use super::{
    errors::RelayError,
    message::TaggedMessage,
};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

/// Плоская FIFO-очередь сообщений без синхронизации.
///
/// Базовый буфер для [`Channel`]. Операции над пустой очередью возвращают
/// [`RelayError::EmptyQueue`].
#[derive(Debug, Default, Clone)]
pub struct MessageQueue {
    items: VecDeque<TaggedMessage>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self { items: VecDeque::new() }
    }

    pub fn push(&mut self, msg: TaggedMessage) {
        self.items.push_back(msg);
    }

    /// Убирает голову очереди, не возвращая её.
    pub fn pop(&mut self) -> Result<(), RelayError> {
        self.items
            .pop_front()
            .map(|_| ())
            .ok_or(RelayError::EmptyQueue)
    }

    /// Голова очереди без извлечения.
    pub fn front(&self) -> Result<&TaggedMessage, RelayError> {
        self.items.front().ok_or(RelayError::EmptyQueue)
    }

    /// Извлекает и возвращает голову очереди.
    pub fn get_front(&mut self) -> Result<TaggedMessage, RelayError> {
        self.items.pop_front().ok_or(RelayError::EmptyQueue)
    }

    /// Хвост очереди без извлечения.
    pub fn back(&self) -> Result<&TaggedMessage, RelayError> {
        self.items.back().ok_or(RelayError::EmptyQueue)
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Потокобезопасная FIFO-очередь сообщений.
///
/// Буфер и условная переменная охраняются одним мьютексом; блокировка
/// всегда отпускается до возврата значения вызывающему. Peek без
/// извлечения (`front()`) намеренно не экспонируется: ссылка устаревает
/// сразу после отпускания блокировки, вместо него [`Channel::get_front`]
/// и [`Channel::try_get_front`].
///
/// Блокирующие операции не имеют дедлайна. Ограниченное ожидание
/// собирается из `try_*` операций на стороне вызывающего.
#[derive(Debug, Default)]
pub struct Channel {
    inner: Mutex<MessageQueue>,
    cond: Condvar,
}

impl Channel {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MessageQueue::new()),
            cond: Condvar::new(),
        }
    }

    /// Добавляет сообщение в хвост и будит одного ожидающего потребителя.
    /// Не блокирует, ёмкость не ограничена.
    pub fn push(&self, msg: TaggedMessage) {
        let mut queue = self.inner.lock();
        queue.push(msg);
        drop(queue);
        self.cond.notify_one();
    }

    /// Неблокирующий push: при занятой блокировке сразу возвращает `false`,
    /// ничего не добавляя и не повторяя попытку.
    pub fn try_push(&self, msg: TaggedMessage) -> bool {
        match self.inner.try_lock() {
            Some(mut queue) => {
                queue.push(msg);
                drop(queue);
                self.cond.notify_one();
                true
            }
            None => false,
        }
    }

    /// Блокирующе ждёт непустую очередь и убирает голову, не возвращая её.
    pub fn pop(&self) {
        let mut queue = self.inner.lock();
        while queue.pop().is_err() {
            self.cond.wait(&mut queue);
        }
    }

    /// Неблокирующий pop: `false` покрывает и занятую блокировку, и пустую
    /// очередь.
    pub fn try_pop(&self) -> bool {
        match self.inner.try_lock() {
            Some(mut queue) => queue.pop().is_ok(),
            None => false,
        }
    }

    /// Блокирующе ждёт непустую очередь, извлекает и возвращает голову.
    /// В отличие от [`MessageQueue::get_front`] никогда не сигнализирует
    /// `EmptyQueue`.
    pub fn get_front(&self) -> TaggedMessage {
        let mut queue = self.inner.lock();
        loop {
            match queue.get_front() {
                Ok(msg) => return msg,
                Err(_) => self.cond.wait(&mut queue),
            }
        }
    }

    /// Неблокирующее извлечение головы: `None` покрывает и занятую
    /// блокировку, и пустую очередь.
    pub fn try_get_front(&self) -> Option<TaggedMessage> {
        let mut queue = self.inner.try_lock()?;
        queue.get_front().ok()
    }

    /// Снимок хвоста очереди.
    pub fn back(&self) -> Option<TaggedMessage> {
        self.inner.lock().back().ok().cloned()
    }

    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Забирает всё содержимое, оставляя канал пустым. Источник заблокирован
    /// на время переноса, конкурентный push/pop не может разорвать
    /// переносимое состояние.
    pub fn take_all(&self) -> MessageQueue {
        std::mem::take(&mut *self.inner.lock())
    }
}

impl Clone for Channel {
    /// Копия блокирует источник до завершения переноса содержимого.
    fn clone(&self) -> Self {
        let queue = self.inner.lock();
        Self {
            inner: Mutex::new(queue.clone()),
            cond: Condvar::new(),
        }
    }
}

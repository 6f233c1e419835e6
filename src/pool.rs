use super::{
    errors::{RelayError, TaskError},
    handle::{Task, TaskHandle},
    model::PoolMetrics,
    result::TaskResult,
};
use crossbeam::channel::bounded;
use parking_lot::{Condvar, Mutex};
use std::{
    any::Any,
    collections::VecDeque,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    thread,
};
use tracing::{debug, error, trace};

/// Конфигурация пула воркеров
#[derive(Debug, Clone)]
pub struct Config {
    pub workers: usize,
    pub max_tasks: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            max_tasks: None,
        }
    }
}

impl Config {
    pub fn cpu_bound() -> Self {
        let num_cpus = num_cpus::get();
        Self {
            workers: num_cpus,
            max_tasks: Some(num_cpus * 10),
        }
    }

    pub fn io_bound() -> Self {
        let num_cpus = num_cpus::get();
        Self {
            workers: num_cpus * 2,
            max_tasks: None,
        }
    }
}

/// Очередь отложенных задач: один мьютекс охраняет буфер и его условную
/// переменную.
struct TaskQueue {
    tasks: Mutex<VecDeque<Task>>,
    cond: Condvar,
}

impl TaskQueue {
    fn new() -> Self {
        Self {
            tasks: Mutex::new(VecDeque::new()),
            cond: Condvar::new(),
        }
    }

    fn len(&self) -> usize {
        self.tasks.lock().len()
    }
}

struct WorkerSlot {
    thread: thread::JoinHandle<()>,
    stop: Arc<AtomicBool>,
}

/// Пул воркеров на OS-потоках.
///
/// Очередь задач и её условная переменная охраняются одним мьютексом,
/// состав воркеров другим: структурный resize не конкурирует с
/// диспетчеризацией задач. Ни один воркер не переживает свой пул: Drop
/// выставляет все стоп-флаги, один раз будит всех ожидающих и джойнит
/// каждый поток.
pub struct WorkerPool {
    queue: Arc<TaskQueue>,
    workers: Mutex<Vec<WorkerSlot>>,
    num_workers: AtomicUsize,
    max_tasks: Option<usize>,
    total_submitted: AtomicUsize,
    completed_tasks: Arc<AtomicUsize>,
    failed_tasks: Arc<AtomicUsize>,
    inline_tasks: AtomicUsize,
}

impl WorkerPool {
    pub fn new(workers: usize, max_tasks: Option<usize>) -> Self {
        Self::with_config(Config { workers, max_tasks })
    }

    pub fn with_config(config: Config) -> Self {
        let pool = Self {
            queue: Arc::new(TaskQueue::new()),
            workers: Mutex::new(Vec::new()),
            num_workers: AtomicUsize::new(0),
            max_tasks: config.max_tasks,
            total_submitted: AtomicUsize::new(0),
            completed_tasks: Arc::new(AtomicUsize::new(0)),
            failed_tasks: Arc::new(AtomicUsize::new(0)),
            inline_tasks: AtomicUsize::new(0),
        };
        pool.add_workers(config.workers);
        pool
    }

    /// Ставит задачу в очередь и сразу возвращает handle на её результат.
    ///
    /// Если очередь уже содержит `max_tasks` задач, блокировка отпускается
    /// и задача выполняется синхронно на вызывающем потоке: память остаётся
    /// ограниченной ценой латентности отправителя. Handle валиден в обоих
    /// случаях. Паника тела задачи захватывается и приходит в handle как
    /// [`TaskError::Panic`].
    pub fn submit<F, T>(&self, func: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = bounded(1);
        let completed = self.completed_tasks.clone();
        let failed = self.failed_tasks.clone();
        self.total_submitted.fetch_add(1, Ordering::Relaxed);

        let task: Task = Box::new(move || {
            let result: TaskResult<T> = panic::catch_unwind(AssertUnwindSafe(func))
                .map_err(|payload| TaskError::Panic(panic_message(payload.as_ref())));
            if result.is_ok() {
                completed.fetch_add(1, Ordering::Relaxed);
            } else {
                failed.fetch_add(1, Ordering::Relaxed);
            }
            let _ = tx.send(result);
        });

        let mut tasks = self.queue.tasks.lock();
        if self.max_tasks.is_some_and(|limit| tasks.len() >= limit) {
            drop(tasks);
            self.inline_tasks.fetch_add(1, Ordering::Relaxed);
            trace!("task queue full, running task on the submitting thread");
            task();
            return TaskHandle::new(rx);
        }
        tasks.push_back(task);
        let depth = tasks.len();
        drop(tasks);
        // Будим одного воркера только пока глубина очереди не превышает
        // числа воркеров: при большей глубине воркеры либо заняты, либо
        // уже разбужены.
        if depth <= self.num_workers.load(Ordering::Relaxed) {
            self.queue.cond.notify_one();
        }
        TaskHandle::new(rx)
    }

    /// Запускает `count` новых воркеров. Каждый получает собственный
    /// стоп-флаг и завершается, лишь увидев пустую очередь при выставленном
    /// флаге.
    pub fn add_workers(&self, count: usize) {
        let mut workers = self.workers.lock();
        for _ in 0..count {
            let stop = Arc::new(AtomicBool::new(false));
            let queue = self.queue.clone();
            let flag = stop.clone();
            let thread = thread::spawn(move || worker_loop(queue, flag));
            workers.push(WorkerSlot { thread, stop });
        }
        self.num_workers.store(workers.len(), Ordering::Relaxed);
        debug!(added = count, total = workers.len(), "workers added");
    }

    /// Отсоединяет `count` воркеров и выставляет их стоп-флаги.
    ///
    /// `count`, не меньший текущего числа воркеров, отклоняется, состав
    /// пула не меняется. Задача, уже выполняемая снятым воркером,
    /// дорабатывает до конца на отсоединённом потоке.
    pub fn remove_workers(&self, count: usize) -> Result<(), RelayError> {
        let mut workers = self.workers.lock();
        if count >= workers.len() {
            return Err(RelayError::InvalidArgument {
                requested: count,
                available: workers.len(),
            });
        }
        let keep = workers.len() - count;
        for slot in workers.drain(keep..) {
            // JoinHandle дропается без join: поток отсоединяется
            slot.stop.store(true, Ordering::Release);
        }
        self.num_workers.store(workers.len(), Ordering::Relaxed);
        // Спящие снятые воркеры должны увидеть флаг сейчас, а не при
        // следующем push.
        self.queue.cond.notify_all();
        debug!(removed = count, total = workers.len(), "workers detached");
        Ok(())
    }

    /// Текущее число задач в очереди.
    pub fn task_count(&self) -> usize {
        self.queue.len()
    }

    /// Текущее число воркеров.
    pub fn worker_count(&self) -> usize {
        self.workers.lock().len()
    }

    #[inline]
    pub fn metrics(&self) -> PoolMetrics {
        PoolMetrics {
            workers: self.num_workers.load(Ordering::Relaxed),
            queued_tasks: self.queue.len(),
            total_submitted: self.total_submitted.load(Ordering::Relaxed),
            completed_tasks: self.completed_tasks.load(Ordering::Relaxed),
            failed_tasks: self.failed_tasks.load(Ordering::Relaxed),
            inline_tasks: self.inline_tasks.load(Ordering::Relaxed),
        }
    }
}

impl Drop for WorkerPool {
    /// Выставляет все стоп-флаги, один раз будит всех ожидающих и джойнит
    /// каждый воркер. Непустая очередь дорабатывается: воркер выходит,
    /// только увидев пустую очередь при выставленном флаге.
    fn drop(&mut self) {
        let workers = self.workers.get_mut();
        for slot in workers.iter() {
            slot.stop.store(true, Ordering::Release);
        }
        self.queue.cond.notify_all();
        for slot in workers.drain(..) {
            if slot.thread.join().is_err() {
                // тела задач завёрнуты в catch_unwind, штатно сюда не попасть
                error!("worker thread terminated with a panic");
            }
        }
        debug!("worker pool shut down");
    }
}

/// Цикл воркера: ждать, пока очередь пуста и стоп-флаг не выставлен; при
/// пустой очереди со стоп-флагом завершиться; иначе снять ровно одну
/// задачу, отпустить блокировку и выполнить её. Задача никогда не
/// исполняется под блокировкой очереди.
fn worker_loop(queue: Arc<TaskQueue>, stop: Arc<AtomicBool>) {
    trace!("worker started");
    loop {
        let task = {
            let mut tasks = queue.tasks.lock();
            queue
                .cond
                .wait_while(&mut tasks, |t| t.is_empty() && !stop.load(Ordering::Acquire));
            if tasks.is_empty() {
                break;
            }
            tasks.pop_front()
        };
        if let Some(task) = task {
            task();
        }
    }
    trace!("worker stopped");
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

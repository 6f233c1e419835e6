#[cfg(test)]
mod tests {
    use thread_relay::{
    channel::Channel,
    message::TaggedMessage,
    pool::{
        Config,
        WorkerPool,
        },
    };
    use std::{
        collections::HashSet,
        sync::{mpsc, Arc},
        thread,
        time::{Duration, Instant},
    };

    fn measure<F, T>(name: &str, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();
        println!("✓ {}: {:?}", name, elapsed);
        result
    }

    #[test]
    fn load_test_1_small_fast_tasks() {
        println!("\n=== LOAD TEST 1: 10k быстрых задач ===");
        let pool = WorkerPool::with_config(Config::io_bound());

        let results = measure("10k tasks", || {
            let handles: Vec<_> = (0..10_000).map(|x| pool.submit(move || x * 2)).collect();
            handles.into_iter().map(|h| h.wait()).collect::<Vec<_>>()
        });

        assert_eq!(results.len(), 10_000);
        assert!(results.iter().all(|r| r.is_ok()));

        let metrics = pool.metrics();
        println!("  Успешно: {}/{}", metrics.completed_tasks, results.len());
        assert_eq!(metrics.completed_tasks, 10_000);
        assert_eq!(metrics.failed_tasks, 0);
    }

    #[test]
    fn load_test_2_channel_no_loss() {
        println!("\n=== LOAD TEST 2: P производителей, C потребителей, без потерь ===");
        const PRODUCERS: usize = 4;
        const CONSUMERS: usize = 3;
        const PER_PRODUCER: usize = 2_500;
        const STOP_ID: i64 = -1;

        let channel = Arc::new(Channel::new());

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|p| {
                let channel = channel.clone();
                thread::spawn(move || {
                    for i in 0..PER_PRODUCER {
                        let id = (p * PER_PRODUCER + i) as i64;
                        let msg = TaggedMessage::common(id, p as u64);
                        // нечётные производители идут через try_push с откатом
                        if p % 2 == 0 {
                            channel.push(msg);
                        } else if !channel.try_push(msg.clone()) {
                            channel.push(msg);
                        }
                    }
                })
            })
            .collect();

        let (tx, rx) = mpsc::channel();
        let consumers: Vec<_> = (0..CONSUMERS)
            .map(|_| {
                let channel = channel.clone();
                let tx = tx.clone();
                thread::spawn(move || {
                    let mut seen = Vec::new();
                    loop {
                        let msg = channel.get_front();
                        if msg.id() == STOP_ID {
                            break;
                        }
                        seen.push(msg.id());
                    }
                    tx.send(seen).ok();
                })
            })
            .collect();
        drop(tx);

        measure("4x2500 сообщений", || {
            for handle in producers {
                handle.join().unwrap();
            }
            // сигнал завершения каждому потребителю
            for _ in 0..CONSUMERS {
                channel.push(TaggedMessage::signal(STOP_ID));
            }
            for handle in consumers {
                handle.join().unwrap();
            }
        });

        let mut delivered = HashSet::new();
        let mut total = 0usize;
        for seen in rx {
            total += seen.len();
            for id in seen {
                assert!(delivered.insert(id), "Сообщение {} доставлено дважды", id);
            }
        }
        assert_eq!(
            total,
            PRODUCERS * PER_PRODUCER,
            "Каждое отправленное сообщение доставлено ровно один раз"
        );
        assert!(channel.is_empty());
        println!("  ✓ {} сообщений, без потерь и дублей", total);
    }

    #[test]
    fn load_test_3_backpressure_saturation() {
        println!("\n=== LOAD TEST 3: Насыщение ограниченной очереди ===");
        let pool = Arc::new(WorkerPool::new(2, Some(16)));

        let submitters: Vec<_> = (0..4usize)
            .map(|s| {
                let pool = pool.clone();
                thread::spawn(move || {
                    let handles: Vec<_> = (0..1_000)
                        .map(|i| pool.submit(move || s * 10_000 + i))
                        .collect();
                    handles
                        .into_iter()
                        .enumerate()
                        .all(|(i, h)| h.wait() == Ok(s * 10_000 + i))
                })
            })
            .collect();

        for handle in submitters {
            assert!(handle.join().unwrap(), "Каждый handle отдаёт результат своей задачи");
        }

        let metrics = pool.metrics();
        println!("  Всего: {}, inline: {}", metrics.total_submitted, metrics.inline_tasks);
        assert_eq!(metrics.completed_tasks, 4_000);
        assert_eq!(metrics.queued_tasks, 0);
    }

    #[test]
    fn load_test_4_resize_under_load() {
        println!("\n=== LOAD TEST 4: Resize пула под нагрузкой ===");
        let pool = Arc::new(WorkerPool::new(2, None));

        let submitter = {
            let pool = pool.clone();
            thread::spawn(move || {
                let handles: Vec<_> = (0..2_000)
                    .map(|i| {
                        pool.submit(move || {
                            thread::sleep(Duration::from_micros(50));
                            i
                        })
                    })
                    .collect();
                handles.into_iter().enumerate().all(|(i, h)| h.wait() == Ok(i))
            })
        };

        pool.add_workers(4);
        thread::sleep(Duration::from_millis(5));
        pool.remove_workers(3).unwrap();
        assert_eq!(pool.worker_count(), 3);

        assert!(submitter.join().unwrap());

        let metrics = pool.metrics();
        println!("  Завершено: {}, воркеров: {}", metrics.completed_tasks, metrics.workers);
        assert_eq!(metrics.completed_tasks, 2_000);
    }
}

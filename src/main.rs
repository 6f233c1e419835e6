use thread_relay::pool::{Config, WorkerPool};
use tracing_subscriber::EnvFilter;
use std::time::Instant;


fn main(){
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let now = Instant::now();
    let pool = WorkerPool::with_config(Config::cpu_bound());
    let handles: Vec<_> = (0..1_000_000)
        .map(|i| pool.submit(move || i * 2))
        .collect();

    let mut completed = 0usize;
    for handle in handles {
        if handle.wait().is_ok() {
            completed += 1;
        }
    }

    let metrics = pool.metrics();
    drop(pool);
    println!("completed: {}/1000000", completed);
    println!("inline: {}", metrics.inline_tasks);
    println!("elapsed: {:?}", now.elapsed());
}

#[derive(Debug, Clone)]
pub struct PoolMetrics {
    pub workers: usize,
    pub queued_tasks: usize,
    pub total_submitted: usize,
    pub completed_tasks: usize,
    pub failed_tasks: usize,
    pub inline_tasks: usize,
}

impl PoolMetrics {
    pub fn queue_pressure(&self) -> f64 {
        self.queued_tasks as f64
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.completed_tasks + self.failed_tasks;
        if total == 0 {
            return 1.0;
        }
        self.completed_tasks as f64 / total as f64
    }

    pub fn inline_rate(&self) -> f64 {
        if self.total_submitted == 0 {
            return 0.0;
        }
        self.inline_tasks as f64 / self.total_submitted as f64
    }
}

//! Periodic environment ticks on a manually advanced clock.
//!
//! The scheduler owns no thread and reads no wall clock.  The owner feeds it
//! elapsed time with [`UpdateScheduler::advance`] and runs one environment
//! tick per returned firing, so the same sequence of `advance` calls always
//! fires the same ticks.

#[derive(Clone, Debug)]
pub struct UpdateScheduler {
    interval_ms: u64,
    elapsed_ms: u64,
    /// `None` while stopped.
    next_due_ms: Option<u64>,
}

impl UpdateScheduler {
    /// A stopped scheduler firing every `interval_ms` once started.
    /// A zero interval is treated as 1 ms.
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms: interval_ms.max(1), elapsed_ms: 0, next_due_ms: None }
    }

    /// Start firing.  Calling `start` on a running scheduler does not reset
    /// its phase.
    pub fn start(&mut self) {
        if self.next_due_ms.is_none() {
            self.next_due_ms = Some(self.elapsed_ms + self.interval_ms);
        }
    }

    /// Stop firing.  Safe to call at any time, any number of times.
    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Move the clock forward by `dt_ms` and return how many ticks fell due.
    /// Always `0` while stopped.
    pub fn advance(&mut self, dt_ms: u64) -> u64 {
        self.elapsed_ms += dt_ms;
        let Some(mut due) = self.next_due_ms else {
            return 0;
        };
        let mut fired = 0;
        while due <= self.elapsed_ms {
            fired += 1;
            due += self.interval_ms;
        }
        self.next_due_ms = Some(due);
        fired
    }
}

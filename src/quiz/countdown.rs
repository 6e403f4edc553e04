use std::time::{
    Duration,
    Instant,
};

/// Deadline for the optional per-record answer timer. Starting a new
/// countdown replaces the running one, so two can never overlap. The UI
/// loop polls `remaining` on its tick.
#[derive(Debug, Default)]
pub struct Countdown {
    deadline: Option<Instant>,
}

impl Countdown {
    pub fn start(&mut self, duration: Duration) {
        self.deadline = Some(Instant::now() + duration);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left, `None` when idle, zero once the deadline passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn expired(&self) -> bool {
        self.remaining().is_some_and(|remaining| remaining.is_zero())
    }
}

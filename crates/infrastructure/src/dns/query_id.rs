use dnslookup_application::ports::QueryIdSource;
use std::sync::Mutex;

/// Draws IDs from the process-wide `fastrand` generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct FastrandQueryIds;

impl QueryIdSource for FastrandQueryIds {
    fn next_id(&self) -> u16 {
        fastrand::u16(..)
    }
}

/// Deterministic sequence for tests and reproducible traces.
pub struct SeededQueryIds {
    rng: Mutex<fastrand::Rng>,
}

impl SeededQueryIds {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

impl QueryIdSource for SeededQueryIds {
    fn next_id(&self) -> u16 {
        match self.rng.lock() {
            Ok(mut rng) => rng.u16(..),
            Err(poisoned) => poisoned.into_inner().u16(..),
        }
    }
}

//! Login throttling
//!
//! A fixed window per key: the first attempt opens a 15 minute window, each
//! further attempt inside it counts against the limit, and a finished window
//! resets on the next attempt. The clock is injected so tests can step time
//! without sleeping.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const MAX_ATTEMPTS: u32 = 5;
pub const WINDOW: Duration = Duration::from_secs(15 * 60);

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct Attempt {
    count: u32,
    reset_at: Instant,
}

pub struct LoginThrottle {
    clock: Arc<dyn Clock>,
    attempts: Mutex<HashMap<String, Attempt>>,
    max_attempts: u32,
    window: Duration,
}

impl LoginThrottle {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            attempts: Mutex::new(HashMap::new()),
            max_attempts: MAX_ATTEMPTS,
            window: WINDOW,
        }
    }

    /// Record an attempt for `key`. Returns false when the key has exhausted
    /// its window.
    pub fn check(&self, key: &str) -> bool {
        let now = self.clock.now();
        let mut attempts = match self.attempts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        match attempts.get_mut(key) {
            Some(attempt) if now <= attempt.reset_at => {
                if attempt.count >= self.max_attempts {
                    return false;
                }
                attempt.count += 1;
                true
            }
            _ => {
                attempts.insert(
                    key.to_string(),
                    Attempt {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
                true
            }
        }
    }
}

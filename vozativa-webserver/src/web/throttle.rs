use std::{collections::HashMap, net::IpAddr};

use parking_lot::Mutex;
use time::Duration;

use vozativa_core::entities::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Allowed,
    Blocked,
}

#[derive(Debug)]
struct Window {
    started_at: Timestamp,
    attempts: u32,
}

/// Fixed window counter over login attempts per client address.
///
/// Every submitted login form counts as an attempt, whether the
/// credentials are valid or not. Once the limit is reached all
/// further attempts are blocked until the window has elapsed.
#[derive(Debug)]
pub struct LoginThrottle {
    max_attempts: u32,
    window: Duration,
    state: Mutex<HashMap<IpAddr, Window>>,
}

impl LoginThrottle {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            state: Mutex::new(HashMap::new()),
        }
    }

    pub fn register_attempt(&self, addr: IpAddr, now: Timestamp) -> Attempt {
        let mut state = self.state.lock();
        let window = state.entry(addr).or_insert(Window {
            started_at: now,
            attempts: 0,
        });
        let elapsed = window
            .started_at
            .checked_add(self.window)
            .map_or(true, |end| end <= now);
        if elapsed {
            window.started_at = now;
            window.attempts = 0;
        }
        if window.attempts >= self.max_attempts {
            return Attempt::Blocked;
        }
        window.attempts += 1;
        Attempt::Allowed
    }
}

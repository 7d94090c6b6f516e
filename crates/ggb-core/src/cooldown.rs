//! Per-(chat, user) reply cooldown.
//!
//! Gates are process-local: several instances behind a load balancer each keep
//! their own map and may each let one reply through.

use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use crate::domain::{ChatId, UserId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CooldownKey {
    pub chat_id: ChatId,
    pub user_id: UserId,
}

/// Rate-limiter seam used by the dispatcher.
///
/// `allow` must record `now` as the last reply time if and only if it returns
/// `true`, and the check-and-set must be atomic per key.
pub trait CooldownGate: Send + Sync {
    fn allow(&self, key: &CooldownKey, now: Instant) -> bool;
}

/// In-memory gate: one timestamp per key, never evicted.
#[derive(Debug)]
pub struct MemoryCooldown {
    window: Duration,
    last_reply: Mutex<HashMap<CooldownKey, Instant>>,
}

impl MemoryCooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_reply: Mutex::new(HashMap::new()),
        }
    }

    /// Number of keys seen so far.
    pub fn tracked_keys(&self) -> usize {
        self.last_reply
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl CooldownGate for MemoryCooldown {
    fn allow(&self, key: &CooldownKey, now: Instant) -> bool {
        let mut map = self.last_reply.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(last) = map.get(key) {
            if now.saturating_duration_since(*last) < self.window {
                return false;
            }
        }
        map.insert(*key, now);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn key(chat: i64, user: i64) -> CooldownKey {
        CooldownKey {
            chat_id: ChatId(chat),
            user_id: UserId(user),
        }
    }

    #[test]
    fn window_is_enforced() {
        let gate = MemoryCooldown::new(Duration::from_millis(5000));
        let t0 = Instant::now();
        let k = key(1, 42);

        assert!(gate.allow(&k, t0));
        assert!(!gate.allow(&k, t0 + Duration::from_millis(1)));
        assert!(!gate.allow(&k, t0 + Duration::from_millis(4999)));
        assert!(gate.allow(&k, t0 + Duration::from_millis(5000)));
    }

    #[test]
    fn denied_requests_do_not_extend_the_window() {
        let gate = MemoryCooldown::new(Duration::from_millis(5000));
        let t0 = Instant::now();
        let k = key(1, 42);

        assert!(gate.allow(&k, t0));
        assert!(!gate.allow(&k, t0 + Duration::from_millis(4000)));
        assert!(gate.allow(&k, t0 + Duration::from_millis(5001)));
    }

    #[test]
    fn keys_are_independent() {
        let gate = MemoryCooldown::new(Duration::from_millis(5000));
        let t0 = Instant::now();

        assert!(gate.allow(&key(1, 42), t0));
        assert!(gate.allow(&key(1, 43), t0));
        assert!(gate.allow(&key(2, 42), t0));
        assert!(!gate.allow(&key(1, 42), t0));
        assert_eq!(gate.tracked_keys(), 3);
    }

    #[test]
    fn concurrent_requests_let_exactly_one_through() {
        let gate = Arc::new(MemoryCooldown::new(Duration::from_secs(60)));
        let now = Instant::now();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let gate = gate.clone();
                std::thread::spawn(move || gate.allow(&key(7, 7), now))
            })
            .collect();

        let allowed = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(allowed, 1);
    }
}

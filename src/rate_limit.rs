use dashmap::DashMap;
use std::time::{Duration, Instant};

// Rate limit entry - tracks requests per client key
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start: Instant,
}

// Admission is ordinary control flow, not an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Rejected,
}

/// Fixed-window request counter keyed by client identifier.
///
/// Windows reset at discrete boundaries, so a client can burst up to twice
/// the limit across a boundary. State is O(1) per key.
pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            limit,
            window,
        }
    }

    pub fn admit(&self, key: &str) -> Admission {
        self.admit_at(key, Instant::now())
    }

    // The check-then-increment runs under the map's entry lock, so two
    // requests racing on the same key at the limit cannot both pass.
    pub fn admit_at(&self, key: &str, now: Instant) -> Admission {
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert(RateLimitEntry {
                count: 0,
                window_start: now,
            });

        // window expired? reset it
        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 1;
            entry.window_start = now;
            return Admission::Allowed;
        }

        // under the limit? count the request and let it through
        if entry.count < self.limit {
            entry.count += 1;
            return Admission::Allowed;
        }

        Admission::Rejected
    }

    // Drop entries whose window has already elapsed, bounding the map by
    // clients active in the last window rather than clients ever seen.
    pub fn evict_expired(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.duration_since(entry.window_start) < self.window);
        before.saturating_sub(self.entries.len())
    }

    pub fn tracked_keys(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(limit: u32, window_secs: u64) -> RateLimiter {
        RateLimiter::new(limit, Duration::from_secs(window_secs))
    }

    #[test]
    fn admits_up_to_limit_within_window() {
        let rl = limiter(20, 60);
        let t0 = Instant::now();

        for _ in 0..20 {
            assert_eq!(rl.admit_at("1.2.3.4", t0), Admission::Allowed);
        }
        assert_eq!(rl.admit_at("1.2.3.4", t0), Admission::Rejected);
    }

    #[test]
    fn keys_are_limited_independently() {
        let rl = limiter(1, 60);
        let t0 = Instant::now();

        assert_eq!(rl.admit_at("a", t0), Admission::Allowed);
        assert_eq!(rl.admit_at("a", t0), Admission::Rejected);
        assert_eq!(rl.admit_at("b", t0), Admission::Allowed);
    }

    #[test]
    fn window_elapse_resets_count_to_one() {
        let rl = limiter(2, 60);
        let t0 = Instant::now();

        assert_eq!(rl.admit_at("k", t0), Admission::Allowed);
        assert_eq!(rl.admit_at("k", t0), Admission::Allowed);
        assert_eq!(rl.admit_at("k", t0), Admission::Rejected);

        // a full window later the key starts over, prior count forgotten
        let t1 = t0 + Duration::from_secs(60);
        assert_eq!(rl.admit_at("k", t1), Admission::Allowed);
        assert_eq!(rl.admit_at("k", t1), Admission::Allowed);
        assert_eq!(rl.admit_at("k", t1), Admission::Rejected);
    }

    #[test]
    fn boundary_is_strict() {
        let rl = limiter(1, 60);
        let t0 = Instant::now();

        assert_eq!(rl.admit_at("k", t0), Admission::Allowed);
        // one tick before the boundary is still the old window
        assert_eq!(
            rl.admit_at("k", t0 + Duration::from_secs(59)),
            Admission::Rejected
        );
        assert_eq!(
            rl.admit_at("k", t0 + Duration::from_secs(60)),
            Admission::Allowed
        );
    }

    #[test]
    fn eviction_drops_only_expired_entries() {
        let rl = limiter(5, 60);
        let t0 = Instant::now();

        rl.admit_at("old", t0);
        rl.admit_at("fresh", t0 + Duration::from_secs(50));
        assert_eq!(rl.tracked_keys(), 2);

        let removed = rl.evict_expired(t0 + Duration::from_secs(70));
        assert_eq!(removed, 1);
        assert_eq!(rl.tracked_keys(), 1);

        // the surviving key keeps its in-window count
        for _ in 0..4 {
            assert_eq!(
                rl.admit_at("fresh", t0 + Duration::from_secs(70)),
                Admission::Allowed
            );
        }
        assert_eq!(
            rl.admit_at("fresh", t0 + Duration::from_secs(70)),
            Admission::Rejected
        );
    }
}

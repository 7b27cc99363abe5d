//! Live search statistics

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Thread-safe search statistics.
///
/// The attempt counter is an eventually-consistent sum: workers batch
/// their local counts and flush at iteration boundaries and on exit, so
/// mid-search reads are approximate but monotonically non-decreasing, and
/// the value at termination is exact.
#[derive(Debug)]
pub struct SearchStats {
    attempts: AtomicU64,
    start_time: Instant,
    running: AtomicBool,
    found: AtomicBool,
}

impl SearchStats {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            attempts: AtomicU64::new(0),
            start_time: Instant::now(),
            running: AtomicBool::new(true),
            found: AtomicBool::new(false),
        })
    }

    /// Add to the attempt count
    pub fn add_attempts(&self, count: u64) {
        self.attempts.fetch_add(count, Ordering::Relaxed);
    }

    /// Total attempts across all workers
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Attempts per second since the search started
    pub fn keys_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.attempts() as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Stop the search
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Mark as found and stop
    pub fn mark_found(&self) {
        self.found.store(true, Ordering::Relaxed);
        self.stop();
    }

    pub fn is_found(&self) -> bool {
        self.found.load(Ordering::Relaxed)
    }

    /// One-line progress summary for a live display
    pub fn format(&self, difficulty: f64) -> String {
        let attempts = self.attempts();
        let kps = self.keys_per_second();

        // Probability that at least one attempt so far has matched
        let prob = if difficulty > 0.0 && difficulty.is_finite() {
            1.0 - (-(attempts as f64) / difficulty).exp()
        } else {
            0.0
        };

        // Attempts left until 50% cumulative probability
        let eta_50 = if prob < 0.5 && kps > 0.0 {
            let needed = difficulty * std::f64::consts::LN_2 - attempts as f64;
            needed / kps
        } else {
            0.0
        };

        format!(
            "[{:.2} Mkey/s][Total {}][Prob {:.1}%][50% in {}]",
            kps / 1_000_000.0,
            format_count(attempts),
            prob * 100.0,
            format_duration(eta_50)
        )
    }
}

fn format_count(count: u64) -> String {
    if count >= 1_000_000_000_000 {
        format!("{:.2}T", count as f64 / 1e12)
    } else if count >= 1_000_000_000 {
        format!("{:.2}G", count as f64 / 1e9)
    } else if count >= 1_000_000 {
        format!("{:.2}M", count as f64 / 1e6)
    } else if count >= 1000 {
        format!("{:.2}K", count as f64 / 1e3)
    } else {
        format!("{}", count)
    }
}

fn format_duration(seconds: f64) -> String {
    if seconds <= 0.0 {
        return "now".to_string();
    }
    if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else if seconds < 60.0 {
        format!("{:.0}s", seconds)
    } else if seconds < 3600.0 {
        format!("{:.0}m", seconds / 60.0)
    } else if seconds < 86400.0 {
        format!("{:.1}h", seconds / 3600.0)
    } else if seconds < 86400.0 * 365.0 {
        format!("{:.1}d", seconds / 86400.0)
    } else {
        format!("{:.1}y", seconds / (86400.0 * 365.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_is_monotonic() {
        let stats = SearchStats::new();
        let mut last = stats.attempts();
        for _ in 0..10 {
            stats.add_attempts(3);
            let now = stats.attempts();
            assert!(now >= last);
            last = now;
        }
        assert_eq!(last, 30);
    }

    #[test]
    fn test_mark_found_stops() {
        let stats = SearchStats::new();
        assert!(stats.is_running());
        stats.mark_found();
        assert!(!stats.is_running());
        assert!(stats.is_found());
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1500), "1.50K");
        assert_eq!(format_count(2_000_000), "2.00M");
    }
}

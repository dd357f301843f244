//! Layout and redraw counters.

use std::time::{Duration, Instant};

/// Work done by the component tree since the counters were last taken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutMetrics {
    /// Components whose minimum box was recomputed.
    pub resized: usize,
    /// Resize requests answered from the cached minimum box.
    pub resize_cache_hits: usize,
    /// Components assigned a border box.
    pub reformatted: usize,
    /// Components painted.
    pub redrawn: usize,
    /// Children skipped during redraw because they were outside the clip.
    pub clipped: usize,
    /// Layout steps postponed because the component was busy handling an
    /// event.
    pub deferred: usize,
    /// Time spent in [`flush_layout`](crate::tree::ComponentTree::flush_layout).
    pub layout_time: Duration,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of resize requests served from cache (0.0 to 1.0).
    pub fn resize_cache_hit_rate(&self) -> f32 {
        let total = self.resized + self.resize_cache_hits;
        if total == 0 {
            0.0
        } else {
            self.resize_cache_hits as f32 / total as f32
        }
    }

    /// True if no layout work was done.
    pub fn is_paint_only(&self) -> bool {
        self.resized == 0 && self.reformatted == 0
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Layout: {:.2}ms | resized {} ({} cached) | reformatted {} | redrawn {} ({} clipped) | deferred {}",
            self.layout_time.as_secs_f64() * 1000.0,
            self.resized,
            self.resize_cache_hits,
            self.reformatted,
            self.redrawn,
            self.clipped,
            self.deferred,
        )
    }
}

/// Simple timer for measuring durations.
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_rate() {
        let mut metrics = LayoutMetrics::new();
        assert_eq!(metrics.resize_cache_hit_rate(), 0.0);

        metrics.resized = 1;
        metrics.resize_cache_hits = 3;
        assert_eq!(metrics.resize_cache_hit_rate(), 0.75);
    }

    #[test]
    fn test_paint_only() {
        let mut metrics = LayoutMetrics::new();
        metrics.redrawn = 4;
        assert!(metrics.is_paint_only());

        metrics.reformatted = 1;
        assert!(!metrics.is_paint_only());
    }

    #[test]
    fn test_summary_mentions_counts() {
        let metrics = LayoutMetrics {
            resized: 2,
            redrawn: 5,
            ..Default::default()
        };
        let summary = metrics.format_summary();
        assert!(summary.contains("resized 2"));
        assert!(summary.contains("redrawn 5"));
    }
}

use std::time::Duration;

/// Per-run counters owned by the probe loop: every dispatched attempt bumps
/// `sent`, only successful round-trips land in `durations`.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    sent: u32,
    durations: Vec<Duration>,
}

impl RunStats {
    pub fn new() -> Self {
        RunStats::default()
    }

    pub fn record_sent(&mut self) {
        self.sent += 1;
    }

    pub fn record_rtt(&mut self, rtt: Duration) {
        self.durations.push(rtt);
    }

    pub fn sent(&self) -> u32 {
        self.sent
    }

    pub fn received(&self) -> u32 {
        self.durations.len() as u32
    }

    /// Collapse the run into summary statistics, all in milliseconds.
    pub fn summary(&self) -> Summary {
        let millis: Vec<f64> = self.durations.iter().map(|d| in_milli(*d)).collect();
        let received = millis.len() as u32;

        let (min_ms, avg_ms, max_ms, stddev_ms) = if millis.is_empty() {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let min = millis.iter().copied().fold(f64::INFINITY, f64::min);
            let max = millis.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let avg = millis.iter().sum::<f64>() / millis.len() as f64;
            // population standard deviation (divide by N)
            let variance =
                millis.iter().map(|m| (m - avg).powi(2)).sum::<f64>() / millis.len() as f64;
            (min, avg, max, variance.sqrt())
        };

        let loss_percent = if self.sent > 0 {
            100.0 * f64::from(self.sent - received) / f64::from(self.sent)
        } else {
            0.0
        };

        Summary {
            sent: self.sent,
            received,
            loss_percent,
            min_ms,
            avg_ms,
            max_ms,
            stddev_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub sent: u32,
    pub received: u32,
    pub loss_percent: f64,
    pub min_ms: f64,
    pub avg_ms: f64,
    pub max_ms: f64,
    pub stddev_ms: f64,
}

fn in_milli(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

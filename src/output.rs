use chrono::Local;
use colored::Colorize;
use std::time::Duration;

use crate::stats::Summary;
use crate::target::{Attempt, Outcome, Target};

/// Latency column of a success line, padded like classic ping output.
fn rtt_field(duration: Duration) -> String {
    let ms = duration.as_secs_f64() * 1000.0;
    format!("{:<12}", format!("{:.3} ms", ms))
}

pub fn print_ping_start(target: &Target) {
    println!(
        "PING {}: {}:{} ({}), {}",
        target.scheme.as_str().to_uppercase(),
        target.host,
        target.port,
        target.path,
        target.method
    );
}

pub fn print_attempt(attempt: &Attempt, target: &Target, show_timestamp: bool) {
    let timestamp = if show_timestamp {
        format!("[{}] ", Local::now().format("%H:%M:%S%.3f"))
    } else {
        String::new()
    };

    match &attempt.outcome {
        Outcome::Success { bytes, status } => {
            println!(
                "{}{} bytes from {}: seq={:<3} time={} {}",
                timestamp,
                bytes,
                target.display_addr(),
                attempt.seq,
                rtt_field(attempt.duration).green(),
                status
            );
        }
        Outcome::Timeout => {
            println!("{}Request timeout for seq {}", timestamp, attempt.seq);
        }
    }
}

pub fn print_ping_summary(host: &str, summary: &Summary) {
    println!("\n--- {} httpping statistics ---", host);
    println!(
        "{} requests transmitted, {} responses received, {:.1}% lost",
        summary.sent, summary.received, summary.loss_percent
    );
    println!(
        "round-trip min/avg/max/stddev = {:.3}/{:.3}/{:.3}/{:.3} ms",
        summary.min_ms, summary.avg_ms, summary.max_ms, summary.stddev_ms
    );
}

pub fn json_summary(host: &str, summary: &Summary) -> String {
    format!(
        r#"{{
  "host": "{}",
  "requests_transmitted": {},
  "responses_received": {},
  "loss_percent": {:.1},
  "rtt_ms": {{
    "min": {:.3},
    "avg": {:.3},
    "max": {:.3},
    "stddev": {:.3}
  }}
}}"#,
        host,
        summary.sent,
        summary.received,
        summary.loss_percent,
        summary.min_ms,
        summary.avg_ms,
        summary.max_ms,
        summary.stddev_ms
    )
}

pub fn csv_summary(host: &str, summary: &Summary) -> String {
    format!(
        "host,requests_transmitted,responses_received,loss_percent,rtt_min_ms,rtt_avg_ms,rtt_max_ms,rtt_stddev_ms\n{},{},{},{:.1},{:.3},{:.3},{:.3},{:.3}",
        host,
        summary.sent,
        summary.received,
        summary.loss_percent,
        summary.min_ms,
        summary.avg_ms,
        summary.max_ms,
        summary.stddev_ms
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> Summary {
        Summary {
            sent: 3,
            received: 2,
            loss_percent: 100.0 / 3.0,
            min_ms: 10.0,
            avg_ms: 15.0,
            max_ms: 20.0,
            stddev_ms: 5.0,
        }
    }

    #[test]
    fn rtt_field_is_padded_to_twelve() {
        let field = rtt_field(Duration::from_micros(12_345));
        assert_eq!(field, "12.345 ms   ");
    }

    #[test]
    fn json_summary_carries_all_statistics() {
        let json = json_summary("example.com", &summary());
        assert!(json.contains(r#""host": "example.com""#));
        assert!(json.contains(r#""requests_transmitted": 3"#));
        assert!(json.contains(r#""responses_received": 2"#));
        assert!(json.contains(r#""loss_percent": 33.3"#));
        assert!(json.contains(r#""stddev": 5.000"#));
    }

    #[test]
    fn csv_summary_is_header_plus_one_row() {
        let csv = csv_summary("example.com", &summary());
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "host,requests_transmitted,responses_received,loss_percent,rtt_min_ms,rtt_avg_ms,rtt_max_ms,rtt_stddev_ms"
        );
        assert_eq!(
            lines.next().unwrap(),
            "example.com,3,2,33.3,10.000,15.000,20.000,5.000"
        );
        assert!(lines.next().is_none());
    }
}

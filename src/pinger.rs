use reqwest::{Client, Method};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

use crate::error::PingError;
use crate::interrupt::StopSignal;
use crate::stats::RunStats;
use crate::target::{Attempt, Outcome, Target};

/// What the transport reported for one request/response exchange.
enum Exchange {
    Response { bytes: u64, status: String },
    TimedOut,
    Failed(reqwest::Error),
    Interrupted,
}

#[derive(Debug)]
pub struct Pinger {
    client: Client,
    target: Target,
    method: Method,
    body: Option<Vec<u8>>,
    timeout: Duration,
    stop: StopSignal,
}

impl Pinger {
    pub fn new(
        target: Target,
        body: Option<Vec<u8>>,
        timeout: Duration,
        stop: StopSignal,
    ) -> Result<Self, PingError> {
        let method = Method::from_bytes(target.method.as_bytes())
            .map_err(|_| PingError::Request(format!("invalid method: {}", target.method)))?;

        let mut builder = Client::builder();
        if let Some(ip) = target.resolved {
            // pin requests to the address resolved once for this run; the
            // request URI keeps the hostname so SNI and Host stay correct
            builder = builder.resolve(&target.host, SocketAddr::new(ip, target.port));
        }
        let client = builder
            .build()
            .map_err(|e| PingError::Request(e.to_string()))?;

        Ok(Self {
            client,
            target,
            method,
            body,
            timeout,
            stop,
        })
    }

    /// Issue one request and classify the result. The wait is bounded by the
    /// per-attempt timeout and aborted outright by the stop signal.
    async fn exchange(&self) -> Exchange {
        let mut request = self.client.request(self.method.clone(), self.target.uri());
        if let Some(body) = &self.body {
            request = request.body(body.clone());
        }

        let round_trip = async move {
            let mut response = request.send().await?;
            let status = response.status().to_string();
            // drain the body so the full response is timed and counted
            let mut bytes = 0u64;
            while let Some(chunk) = response.chunk().await? {
                bytes += chunk.len() as u64;
            }
            Ok::<_, reqwest::Error>(Exchange::Response { bytes, status })
        };

        tokio::select! {
            result = time::timeout(self.timeout, round_trip) => match result {
                Ok(Ok(response)) => response,
                Ok(Err(e)) if e.is_timeout() => Exchange::TimedOut,
                Ok(Err(e)) => Exchange::Failed(e),
                Err(_) => Exchange::TimedOut,
            },
            () = self.stop.cancelled() => Exchange::Interrupted,
        }
    }

    /// Probe `count` times, `interval` apart, reporting each attempt on `tx`.
    /// Timeouts are recorded and skipped over; any other transport error ends
    /// the run.
    pub async fn run(
        &self,
        count: u32,
        interval: Duration,
        tx: mpsc::Sender<Attempt>,
    ) -> Result<RunStats, PingError> {
        let mut stats = RunStats::new();

        for seq in 0..count {
            if self.stop.is_stopping() {
                break;
            }

            stats.record_sent();
            let start = Instant::now();
            let exchange = self.exchange().await;
            let elapsed = start.elapsed();

            match exchange {
                Exchange::Response { bytes, status } => {
                    stats.record_rtt(elapsed);
                    let attempt = Attempt {
                        seq,
                        duration: elapsed,
                        outcome: Outcome::Success { bytes, status },
                    };
                    if tx.send(attempt).await.is_err() {
                        // receiver closed, nobody is reporting anymore
                        return Ok(stats);
                    }
                }
                Exchange::TimedOut => {
                    let attempt = Attempt {
                        seq,
                        duration: elapsed,
                        outcome: Outcome::Timeout,
                    };
                    if tx.send(attempt).await.is_err() {
                        return Ok(stats);
                    }
                    // the attempt already burned its interval budget
                    continue;
                }
                Exchange::Failed(e) => return Err(PingError::Transport(e)),
                Exchange::Interrupted => break,
            }

            // pace request starts `interval` apart, never sleeping past a stop
            if seq + 1 < count && !self.stop.is_stopping() {
                if let Some(wait) = interval.checked_sub(elapsed) {
                    tokio::select! {
                        () = time::sleep(wait) => {}
                        () = self.stop.cancelled() => {}
                    }
                }
            }
        }

        Ok(stats)
    }
}

/// Request body from `-d`: a literal string, or `@path` to read a file.
pub fn load_body(raw: &str) -> Result<Vec<u8>, PingError> {
    match raw.strip_prefix('@') {
        Some(path) => std::fs::read(path)
            .map_err(|e| PingError::Request(format!("cannot read body file {}: {}", path, e))),
        None => Ok(raw.as_bytes().to_vec()),
    }
}

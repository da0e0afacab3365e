mod cli;
mod error;
mod interrupt;
mod output;
mod pinger;
mod stats;
mod target;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use colored::Colorize;
use error::PingError;
use interrupt::StopSignal;
use output::{csv_summary, json_summary, print_attempt, print_ping_start, print_ping_summary};
use pinger::{load_body, Pinger};
use std::process;
use std::time::Duration;
use target::Target;
use tokio::sync::mpsc;

fn fail(err: PingError) -> ! {
    eprintln!("{}", format!("Error: {}", err).red());
    process::exit(err.exit_code());
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // First Ctrl-C requests a graceful stop, a second one exits at once
    let stop = StopSignal::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || {
        if handler_stop.request_stop() {
            process::exit(0);
        }
    })?;

    let target = match Target::parse(&cli.uri, &cli.method).and_then(Target::resolve) {
        Ok(target) => target,
        Err(e) => fail(e),
    };

    let body = match cli.body.as_deref().map(load_body).transpose() {
        Ok(body) => body,
        Err(e) => fail(e),
    };

    let pinger = match Pinger::new(
        target.clone(),
        body,
        Duration::from_millis(cli.timeout),
        stop.clone(),
    ) {
        Ok(pinger) => pinger,
        Err(e) => fail(e),
    };

    if !cli.quiet {
        print_ping_start(&target);
    }

    let (tx, mut rx) = mpsc::channel(100);
    let count = cli.count;
    let interval = Duration::from_millis(cli.interval);
    let probe = tokio::spawn(async move { pinger.run(count, interval, tx).await });

    while let Some(attempt) = rx.recv().await {
        if !cli.quiet {
            print_attempt(&attempt, &target, cli.timestamp);
        }
    }

    let stats = match probe.await? {
        Ok(stats) => stats,
        Err(e) => fail(e),
    };

    let summary = stats.summary();
    match cli.format.as_str() {
        "json" => println!("{}", json_summary(&target.host, &summary)),
        "csv" => println!("{}", csv_summary(&target.host, &summary)),
        _ => print_ping_summary(&target.host, &summary),
    }

    Ok(())
}

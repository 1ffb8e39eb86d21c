//! HTTP Load Generator - Main CLI Application

use clap::Parser;
use http_load_generator::{
    cli::Cli,
    config::load_config,
    error::{AppError, Result},
    logging, output, runner, ReqwestExecutor, PKG_NAME, VERSION,
};
use std::process;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = Cli::parse();

    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(true));
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    cli.validate().map_err(AppError::validation)?;
    logging::init(cli.verbose, cli.debug);

    let config = load_config(&cli)?;

    if config.debug {
        eprintln!("{} v{} (built {})", PKG_NAME, VERSION, env!("BUILD_TIME"));
        eprintln!("Configuration loaded:");
        eprintln!("  URL: {}", config.spec.url);
        eprintln!("  Method: {}", config.spec.method);
        eprintln!("  Requests: {}", config.requests);
        eprintln!("  Concurrency: {}", config.concurrency);
        eprintln!("  Timeout: {}s", config.timeout.as_secs());
        eprintln!();
    }

    let executor = Arc::new(ReqwestExecutor::new(config.timeout)?);

    // Ctrl-C raises the cancellation signal; workers stop taking new jobs
    // and the partial summary is still reported.
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing in-flight requests");
            let _ = cancel_tx.send(true);
        }
    });

    if config.verbose {
        info!(
            url = %config.spec.url,
            requests = config.requests,
            concurrency = config.concurrency,
            "starting load run"
        );
    }

    let started = Instant::now();
    let mut summary = runner::run(&config, executor, cancel_rx).await;
    summary.total_time = started.elapsed();

    if summary.total_requests < config.requests {
        warn!(
            collected = summary.total_requests,
            requested = config.requests,
            "run was cancelled before completion"
        );
    }

    let report = output::render(&summary, config.format, config.enable_color)?;
    println!("{}", report);

    Ok(())
}

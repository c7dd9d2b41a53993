use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transilien_watcher::config::{Config, DEFAULT_CONFIG_PATH};
use transilien_watcher::watcher;

#[derive(Parser)]
#[command(name = "transilien-watcher")]
#[command(about = "Show the next Transilien departures from a station", long_about = None)]
struct Args {
    /// Configuration file
    #[arg(long, short, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Run a single fetch/render cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so the console display owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut watcher = match watcher::build(&config) {
        Ok(watcher) => watcher,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.once {
        return match watcher.run_cycle().await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                error!(error = %e, "cycle failed");
                ExitCode::FAILURE
            }
        };
    }

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(shutdown.clone()));

    watcher.run(&shutdown).await;
    ExitCode::SUCCESS
}

/// Cancel `token` on Ctrl-C or, on Unix, SIGTERM.
async fn cancel_on_signal(token: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = signal_or_pending(tokio::signal::ctrl_c(), "Ctrl-C") => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                signal_or_pending(tokio::signal::ctrl_c(), "Ctrl-C").await;
            }
        }
    }

    #[cfg(not(unix))]
    signal_or_pending(tokio::signal::ctrl_c(), "Ctrl-C").await;

    info!("shutdown requested");
    token.cancel();
}

/// Wait for `signal`. A listener that fails never resolves, so a broken
/// handler cannot trigger a shutdown.
async fn signal_or_pending<F>(signal: F, name: &str)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!(error = %e, signal = name, "failed to listen for signal");
        std::future::pending::<()>().await;
    }
}

//! nearby binary entrypoint kept minimal. The full runtime lives in `app`.

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;

use nearby::{app, args, theme};

struct NearbyTimer;

impl tracing_subscriber::fmt::time::FormatTime for NearbyTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Install the file logger at `~/.config/nearby/logs/nearby.log`, falling back to stderr.
fn init_logging(level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let mut log_path = theme::logs_dir();
    log_path.push("nearby.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(NearbyTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(NearbyTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = args::Args::parse();
    init_logging(&cli.log_level());

    let mut settings = theme::settings();
    cli.apply_to_settings(&mut settings);
    tracing::info!(
        mode = settings.search_mode.as_config_key(),
        provider = settings.geolocation_provider.as_config_key(),
        "nearby starting"
    );

    if cli.print {
        let mut stdout = std::io::stdout();
        match args::print_search(&settings, cli.query.as_deref(), &mut stdout).await {
            Ok(true) => {}
            Ok(false) => std::process::exit(1),
            Err(err) => {
                tracing::error!(error = %err, "search failed");
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    if let Err(err) = app::run(settings, cli.query).await {
        tracing::error!(error = ?err, "Application error");
        eprintln!("error: {err}");
    }
    tracing::info!("nearby exited");
}

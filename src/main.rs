use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vitalwatch::{
    ConfigDispatcher, EngineState, HistoryStatus, HttpSensorClient, PollingEngine, Settings,
};

/// How long `export` waits for the initial fetches before writing what it has.
const EXPORT_WAIT: Duration = Duration::from_secs(30);

#[derive(Parser, Debug)]
#[command(name = "vitalwatch")]
#[command(about = "Live telemetry client for a health-sensor backend")]
struct Args {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Sensor backend address (overrides settings, e.g. "http://192.168.4.1")
    #[arg(short, long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the backend and print every state change until Ctrl-C (default)
    Watch,

    /// Send Wi-Fi credentials to the device
    Configure {
        /// Network name
        #[arg(long)]
        ssid: String,

        /// Network password
        #[arg(long)]
        password: String,
    },

    /// Write the state after the initial fetches to a JSON file and exit
    Export {
        /// Output path
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }

    init_logging(&settings.log_filter);

    let client = Arc::new(HttpSensorClient::new(&settings.base_url)?);

    match args.command.unwrap_or(Command::Watch) {
        Command::Watch => run_watch(client).await,
        Command::Configure { ssid, password } => run_configure(client, &ssid, &password).await,
        Command::Export { path } => run_export(client, &path).await,
    }
}

/// `RUST_LOG` wins over the configured filter.
fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run_watch(client: Arc<HttpSensorClient>) -> Result<()> {
    let handle = PollingEngine::new(client).start();
    let mut updates = handle.subscribe();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                println!("{}", status_line(&state));
            }
            result = &mut shutdown => {
                result?;
                info!("Shutting down");
                break;
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}

async fn run_configure(client: Arc<HttpSensorClient>, ssid: &str, password: &str) -> Result<()> {
    let outcome = ConfigDispatcher::new(client).configure(ssid, password).await;
    println!("{}", outcome);

    if !outcome.is_success() {
        bail!("device did not accept the configuration");
    }
    Ok(())
}

async fn run_export(client: Arc<HttpSensorClient>, path: &Path) -> Result<()> {
    use std::io::Write;

    let handle = PollingEngine::new(client).start();

    let initial = handle.wait_for(|s| {
        (s.current.is_some() || s.last_fetch_failed) && s.history_status != HistoryStatus::Pending
    });
    let state = match tokio::time::timeout(EXPORT_WAIT, initial).await {
        Ok(state) => state,
        Err(_) => {
            warn!("Initial fetches did not finish within {:?}", EXPORT_WAIT);
            handle.snapshot()
        }
    };
    handle.shutdown().await;

    let json = serde_json::to_string_pretty(&state)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;

    println!("Exported sensor state to: {}", path.display());
    Ok(())
}

/// One line per state change, e.g.
/// `[NORMAL] 72 bpm (avg 70.5) | body 36.7°C | room 22.1°C | humidity 40% | 2024-05-01T10:00:00Z | history 12`
fn status_line(state: &EngineState) -> String {
    let mut line = format!("[{}] ", state.alert.label());

    match &state.current {
        Some(r) => line.push_str(&format!(
            "{} bpm (avg {}) | body {}°C | room {}°C | humidity {}% | {}",
            r.heart_rate,
            r.heart_rate_average,
            r.body_temperature,
            r.ambient_temperature,
            r.humidity,
            r.captured_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        )),
        None => line.push_str("waiting for first reading"),
    }

    match state.history_status {
        HistoryStatus::Pending => line.push_str(" | history loading"),
        HistoryStatus::Loaded => line.push_str(&format!(" | history {}", state.history.len())),
        HistoryStatus::Failed => line.push_str(" | history unavailable"),
    }

    if state.last_fetch_failed {
        line.push_str(" | last poll failed");
    }

    line
}

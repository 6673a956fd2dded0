/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Live dashboard watcher or one-shot dashboard queries
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, startup flow, or shutdown handling
*/

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use supplychain_live_adapter::{
    dashboard_handlers, DashboardClient, DashboardRefresher, DashboardView, LiveExit,
    LiveRuntime, RecordId, SearchTarget,
};
use supplychain_live_dashboard::{run_instant_search, DashboardConfig, TerminalView};

#[derive(Parser, Debug)]
#[command(
    name = "supplychain-live-dashboard",
    version,
    about = "Supply-chain dashboard live update watcher"
)]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: PathBuf,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Write logs to a daily-rotated file in this directory instead of stderr
    #[arg(long = "log-dir", value_name = "DIR")]
    log_dir: Option<PathBuf>,
    #[arg(long = "dry-run")]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Follow live updates and refresh counters until interrupted (default)
    Watch,
    /// Run one instant-search query and print the response body
    Search {
        #[arg(long, value_name = "TARGET")]
        target: SearchTarget,
        #[arg(long, value_name = "TEXT")]
        query: String,
    },
    /// Read search-box text from stdin, one line per edit, and search as you type
    Filter {
        #[arg(long, value_name = "TARGET")]
        target: SearchTarget,
        #[arg(long = "debounce-ms", value_name = "MS", default_value_t = 300)]
        debounce_ms: u64,
    },
    /// Print the tracking timeline of one order
    Tracking {
        #[arg(long = "order", value_name = "ID")]
        order: String,
    },
    /// Print stock levels for active products
    Inventory,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let _log_guard = init_tracing(&args.log_level, args.log_dir.as_deref())?;

    info!(
        config_path = %args.config_path.display(),
        dry_run = args.dry_run,
        "starting supplychain-live-dashboard"
    );

    let config = load_config(&args.config_path)?;
    info!(
        live_url = %config.live.url,
        live_enabled = config.live.enabled,
        base_url = %config.http.base_url,
        refresh_interval_secs = config.refresh_interval_secs,
        "configuration loaded"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    match args.command.unwrap_or(Command::Watch) {
        Command::Watch => watch(config).await,
        Command::Search { target, query } => {
            let client = build_client(&config)?;
            let body = client
                .search(target, &query)
                .await
                .with_context(|| format!("search {target} for `{query}`"))?;
            TerminalView::new().render_search_results(target, &body);
            Ok(())
        }
        Command::Filter { target, debounce_ms } => {
            let shutdown = CancellationToken::new();
            setup_signal_handlers(shutdown.clone());
            let client = build_client(&config)?;
            let input = BufReader::new(tokio::io::stdin());
            let rendered = run_instant_search(
                &client,
                &TerminalView::new(),
                target,
                Duration::from_millis(debounce_ms),
                input,
                shutdown,
            )
            .await?;
            info!(%target, rendered, "instant search finished");
            Ok(())
        }
        Command::Tracking { order } => {
            let client = build_client(&config)?;
            let order_id = parse_record_id(&order);
            let tracking = client
                .order_tracking(&order_id)
                .await
                .with_context(|| format!("fetch tracking for order {order_id}"))?;
            TerminalView::new().print_tracking(&tracking);
            Ok(())
        }
        Command::Inventory => {
            let client = build_client(&config)?;
            let entries = client
                .inventory_status()
                .await
                .context("fetch inventory status")?;
            TerminalView::new().print_inventory(&entries);
            Ok(())
        }
    }
}

async fn watch(config: DashboardConfig) -> Result<()> {
    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    let view = Arc::new(TerminalView::new());
    let client = Arc::new(build_client(&config)?);

    let refresher = DashboardRefresher::new(
        client,
        view.clone(),
        config.refresh_interval(),
        shutdown.child_token(),
    );
    refresher.refresh_once().await;
    let refresh_task = tokio::spawn(refresher.run());

    let live_url = config.live_url()?;
    let runtime = LiveRuntime::new(config.live_config(), shutdown.child_token());
    let exit = runtime.run(live_url, dashboard_handlers(view)).await;
    info!(?exit, "live runtime stopped");

    match exit {
        LiveExit::Shutdown => {}
        LiveExit::Disabled | LiveExit::Exhausted if config.refresh_interval().is_zero() => {
            warn!("live updates stopped and auto-refresh is disabled; nothing left to do");
            shutdown.cancel();
        }
        LiveExit::Disabled | LiveExit::Exhausted => {
            info!("counters keep refreshing until shutdown");
            shutdown.cancelled().await;
        }
    }
    shutdown.cancel();

    let summary = refresh_task.await.context("join dashboard refresher")?;
    info!(
        refreshed = summary.refreshed,
        failed = summary.failed,
        "dashboard watcher stopped"
    );
    Ok(())
}

fn build_client(config: &DashboardConfig) -> Result<DashboardClient> {
    let base_url = config.base_url()?;
    DashboardClient::with_config(config.client_config(), base_url.as_str())
        .context("build dashboard client")
}

/// Integer ids stay numeric; anything else (UUIDs) is passed as text.
fn parse_record_id(raw: &str) -> RecordId {
    let raw = raw.trim();
    raw.parse::<i64>()
        .map(RecordId::Int)
        .unwrap_or_else(|_| RecordId::Text(raw.to_string()))
}

fn init_tracing(log_level: &str, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;

    let Some(dir) = log_dir else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!(err))
            .context("initialize tracing subscriber")?;
        return Ok(None);
    };

    let appender = tracing_appender::rolling::daily(dir, "supplychain-live-dashboard.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(Some(guard))
}

fn load_config(path: &Path) -> Result<DashboardConfig> {
    let path_str = path
        .to_str()
        .context("config path must be valid utf-8")?;
    let config = DashboardConfig::from_file(path_str).context("load config")?;
    config.validate().context("validate config")?;
    Ok(config)
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}

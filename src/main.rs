use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use netureon_console::models::{AppConfig, DeviceId, LoggingLevel};
use netureon_console::ui::config_form::{LOGGING_LEVEL_INPUT_ID, UNSAVED_CHANGES_ID};
use netureon_console::ui::device_delete::DeviceDeleteMessage;
use netureon_console::ui::{Console, Message, Runtime, pages};
use netureon_console::utils::{AutoConfirm, ConfirmPrompt, HttpDeviceApi, Settings, TerminalPrompt};

/// Command line front end for the Netureon web UI device and settings workflows
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Settings file (defaults to settings.toml in the user config directory)
    #[clap(long, global = true)]
    settings: Option<PathBuf>,

    /// Address of the Netureon web UI, overrides the settings file
    #[clap(long, global = true)]
    base_url: Option<String>,

    /// DEBUG, INFO, WARNING, ERROR or CRITICAL, overrides the settings file
    #[clap(long, global = true)]
    log_level: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Delete an unknown device by its hardware address
    Delete {
        /// MAC address exactly as listed on the unknown devices page
        mac: String,

        /// Do not ask for confirmation
        #[clap(short, long)]
        yes: bool,
    },
    /// Show the logging level the configuration page would display
    LoggingLevel {
        /// JSON file with the page configuration object
        #[clap(short, long)]
        config: Option<PathBuf>,

        /// Pick this level in the form afterwards
        #[clap(long)]
        set: Option<String>,
    },
}

fn init_tracing(settings: &Settings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.tracing_directive()));
    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match &settings.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "netureon-console.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .map_err(|e| anyhow!(e))?;

    if let Some(base_url) = &args.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(level) = &args.log_level {
        settings.log_level = LoggingLevel::from_name(level);
    }

    Ok(settings)
}

fn new_console(
    settings: &Settings,
    document: netureon_console::dom::Document,
    config: AppConfig,
    prompt: Box<dyn ConfirmPrompt>,
) -> Result<Console> {
    let api = HttpDeviceApi::new(&settings.base_url, settings.request_timeout())
        .context("Invalid Netureon web UI address")?;
    Ok(Console::new(document, config, Arc::new(api), prompt))
}

async fn delete_device(settings: &Settings, mac: String, yes: bool) -> Result<()> {
    let device = DeviceId::new(mac);
    let prompt: Box<dyn ConfirmPrompt> = if yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(TerminalPrompt)
    };

    let document = pages::unknown_devices_page(std::slice::from_ref(&device));
    let mut runtime = Runtime::new(new_console(settings, document, AppConfig::default(), prompt)?);

    info!("Deleting {} via {}", device, settings.base_url);
    runtime.dispatch(Message::PageReady);
    runtime.dispatch(DeviceDeleteMessage::DeleteRequested(device.clone()));

    while runtime.console().device_delete().has_pending_requests() {
        if !runtime.step().await {
            break;
        }
    }
    // Pick up the notification the response produced, but do not wait for
    // it to expire.
    runtime.drain_ready();

    let console = runtime.console();
    for notification in console.notifications().active() {
        println!("[{}] {}", notification.kind, notification.message);
    }

    match &console.device_delete().last_outcome {
        Some((_, outcome)) if outcome.is_deleted() => Ok(()),
        Some(_) => Err(anyhow!("Device {} was not deleted", device)),
        None => {
            println!("Cancelled");
            Ok(())
        }
    }
}

fn show_logging_level(
    settings: &Settings,
    config_path: Option<PathBuf>,
    set: Option<String>,
) -> Result<()> {
    let config: AppConfig = match config_path {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => AppConfig::default(),
    };

    let console = new_console(
        settings,
        pages::config_page(),
        config,
        Box::new(AutoConfirm(false)),
    )?;
    let mut runtime = Runtime::new(console);
    runtime.dispatch(Message::PageReady);

    if let Some(level) = set {
        let task = runtime.console_mut().select_logging_level(&level);
        runtime.schedule(task);
    }
    runtime.drain_ready();

    let document = runtime.console().document();
    let value = document
        .get_element_by_id(LOGGING_LEVEL_INPUT_ID)
        .and_then(|node| document.element(node))
        .and_then(|element| element.value.clone())
        .unwrap_or_default();
    let unsaved = document
        .get_element_by_id(UNSAVED_CHANGES_ID)
        .and_then(|node| document.element(node))
        .is_some_and(|element| element.display.is_visible());

    println!("Logging level: {}", value);
    if unsaved {
        println!("You have unsaved changes");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args)?;
    let _guard = init_tracing(&settings);

    match args.command {
        Command::Delete { mac, yes } => delete_device(&settings, mac, yes).await,
        Command::LoggingLevel { config, set } => show_logging_level(&settings, config, set),
    }
}

mod app;
mod event_handler;

use std::env;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use ratatui::{
    DefaultTerminal,
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute, terminal,
    },
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use toastify::{ConfigError, ToastConfig};

use app::App;

const MIN_WIDTH: u16 = 50;
const MIN_HEIGHT: u16 = 10;
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
const CONFIG_PATH: &str = "toastify.toml";
const BUNDLED_CONFIG: &str = include_str!("../toastify.toml");

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let config = load_config()?;

    let (width, height) = terminal::size()?;
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        bail!(
            "Terminal too small. Minimum size: {MIN_WIDTH}x{MIN_HEIGHT}. Current: {width}x{height}"
        );
    }

    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;
    let app_result = run(&mut terminal, config).await;
    if let Err(err) = execute!(io::stdout(), DisableMouseCapture) {
        warn!(%err, "failed to disable mouse capture");
    }
    ratatui::restore();
    app_result
}

async fn run(terminal: &mut DefaultTerminal, config: ToastConfig) -> Result<()> {
    let mut app = App::new(config);
    info!("toastify-demo started");

    loop {
        terminal.draw(|frame| app::view::render(frame, &mut app))?;
        if !event_handler::handle_events(&mut app, FRAME_INTERVAL).await? {
            break;
        }
    }
    Ok(())
}

/// Logs go to the file named by `TOASTIFY_LOG`; the terminal belongs to the UI.
fn init_logging() -> Result<()> {
    let Ok(path) = env::var("TOASTIFY_LOG") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("failed to create log file {path}"))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("toastify=debug,toastify_demo=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// The path given on the command line, else `./toastify.toml`, else the
/// bundled defaults.
fn load_config() -> Result<ToastConfig> {
    if let Some(path) = env::args().nth(1) {
        return ToastConfig::load(&path).with_context(|| format!("failed to load {path}"));
    }

    match ToastConfig::load(CONFIG_PATH) {
        Ok(config) => Ok(config),
        Err(ConfigError::Io { .. }) => {
            ToastConfig::from_toml_str(BUNDLED_CONFIG).context("bundled toastify.toml is invalid")
        }
        Err(err) => Err(err).with_context(|| format!("failed to load {CONFIG_PATH}")),
    }
}

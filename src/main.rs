use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use sentui::api::ApiClient;
use sentui::cache::CacheDb;
use sentui::config::{self, Config};
use sentui::model;
use sentui::services::{self, ApiRequest, ApiResponse};
use sentui::utils;

/// Review sentiment analysis terminal client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging (written to the log file in the temp dir)
    #[arg(short, long)]
    debug: bool,

    /// Enable vim keybindings (hjkl)
    #[arg(long)]
    vim: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Backend URL, overrides the config file
    #[arg(long, env = "SENTUI_BASE_URL")]
    base_url: Option<String>,
}

mod app;
mod handlers;
mod ui;

pub struct App {
    pub model: model::Model,

    client: ApiClient,
    cache: CacheDb,
    config: Config,
    api_tx: mpsc::UnboundedSender<ApiRequest>,
    api_rx: mpsc::UnboundedReceiver<ApiResponse>,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let client = ApiClient::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
        .context("Failed to build HTTP client")?;
        let cache = CacheDb::new()?;

        // Spawn API service worker
        let (api_tx, api_rx) = services::spawn_api_service(client.clone());

        let mut app = Self {
            model: model::Model::new(config.vim_mode),
            client,
            cache,
            config,
            api_tx,
            api_rx,
        };

        app.restore_session();
        Ok(app)
    }

    /// Queue a request for the background worker
    fn send(&self, request: ApiRequest) {
        if let Err(e) = self.api_tx.send(request) {
            tracing::error!("API worker is gone, dropping request: {}", e);
        }
    }

    /// Handle API responses from background worker
    /// Delegated to handlers::api module
    fn handle_api_response(&mut self, response: ApiResponse) {
        handlers::handle_api_response(self, response);
    }

    /// Handle keyboard input
    /// Delegated to handlers::keyboard module
    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        handlers::handle_key(self, key)
    }
}

#[cfg(test)]
impl App {
    /// App over an in-memory cache with no worker behind it
    ///
    /// Returns the receiving end of the request channel so tests can see
    /// what would have been sent.
    fn for_tests() -> (Self, mpsc::UnboundedReceiver<ApiRequest>) {
        let config = Config::from_yaml("base_url: http://localhost:8000\n").unwrap();
        let client = ApiClient::new(&config.base_url, Duration::from_secs(1)).unwrap();
        let (api_tx, requests) = mpsc::unbounded_channel();
        let (_response_tx, api_rx) = mpsc::unbounded_channel();

        let app = Self {
            model: model::Model::new(false),
            client,
            cache: CacheDb::in_memory().unwrap(),
            config,
            api_tx,
            api_rx,
        };
        (app, requests)
    }
}

fn init_logging(debug: bool) -> Result<()> {
    let log_path = utils::get_log_path();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.debug)?;
    tracing::debug!("Debug mode enabled");

    let config_path = config::resolve_config_path(args.config.as_deref())?;
    tracing::info!("Loading config from {}", config_path.display());

    let mut config = Config::load(&config_path)?;

    // Override config with CLI flags
    if args.vim {
        config.vim_mode = true;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("Exiting with error: {:#}", e);
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.ui.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        if app.model.ui.should_quit {
            break;
        }

        // Process API responses (non-blocking)
        while let Ok(response) = app.api_rx.try_recv() {
            app.handle_api_response(response);
        }

        // Poll with a timeout so responses keep flowing while idle
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }
    }

    Ok(())
}

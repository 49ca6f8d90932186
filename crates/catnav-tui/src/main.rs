//! catnav: a terminal catalog browser built with ratatui.
//!
//! This binary loads the configuration and catalog, initialises the
//! terminal, runs the main event loop, and restores the terminal on exit
//! or panic.

mod app;
mod icons;
mod input;
mod render;
mod scene;
mod ui;

use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use catnav_core::config::settings::LogConfig;
use catnav_core::{
    find_article, spawn_fetch, CatalogItem, CatalogService, Command, Config, CoreError,
    InMemoryCatalog, Keymap, Reply, StartupArticle, Theme,
};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{config_dir, App, Effect};
use crate::input::{handle_key, InputState};
use crate::render::render;

/// Result of the startup article lookup, sent back to the main loop.
enum StartupMessage {
    Found(CatalogItem),
    Failed(String),
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Logs to a file to avoid terminal interference.
fn init_tracing(log: &LogConfig) -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log.file)
        .with_context(|| format!("failed to open log file {}", log.file.display()))?;
    let level = log.level.parse().unwrap_or(tracing::Level::DEBUG);

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg_dir = config_dir();
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| cfg_dir.join("config.toml"));

    // A missing config file is normal; a broken one is reported once logging is up.
    let (config, config_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(CoreError::NotFound(_)) => (Config::default(), None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_tracing(&config.log)?;
    if let Some(e) = config_error {
        tracing::warn!(path = %config_path.display(), error = %e, "falling back to default config");
    }

    let catalog = InMemoryCatalog::load(&config.catalog.source)
        .with_context(|| format!("failed to load catalog {}", config.catalog.source.display()))?
        .with_latency(config.catalog.latency());
    tracing::info!(
        source = %config.catalog.source.display(),
        catalogs = ?catalog.catalog_ids(),
        "catalog loaded"
    );
    let service: Arc<dyn CatalogService> = Arc::new(catalog);

    let keymap = Keymap::load(&cfg_dir.join("keymap.toml")).unwrap_or_default();
    let theme = Theme::load(&cfg_dir.join("theme.toml")).unwrap_or_default();
    let app = App::new(&config, keymap, theme);

    install_panic_hook();

    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, app, service, &config).await;

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    service: Arc<dyn CatalogService>,
    config: &Config,
) -> anyhow::Result<()> {
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<Reply>();
    let (startup_tx, mut startup_rx) = mpsc::unbounded_channel::<StartupMessage>();
    let mut input_state = InputState::new();

    if let Some(startup) = config.startup.clone() {
        spawn_startup_lookup(Arc::clone(&service), startup, startup_tx);
    }

    let (app, effect) = app.dispatch(Command::Enter(config.catalog.initial_path()));
    let mut app = perform(app, effect, &service, &reply_tx);

    loop {
        // 1. Drain catalog replies
        while let Ok(reply) = reply_rx.try_recv() {
            let (next, follow_up) = app.apply_reply(reply);
            app = perform(next, follow_up.map(Effect::Fetch), &service, &reply_tx);
        }

        // 2. Drain the startup lookup
        while let Ok(msg) = startup_rx.try_recv() {
            app = match msg {
                StartupMessage::Found(item) => app.with_inserted(item),
                StartupMessage::Failed(err) => app.with_status(err),
            };
        }

        // 3. Render
        terminal.draw(|f| render(f, &app))?;

        if app.should_quit() {
            break;
        }

        // 4. Poll for crossterm events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let (action, new_input_state) =
                    handle_key(key, app.mode(), &input_state, app.keymap());
                input_state = new_input_state;

                let (next, effect) = app.handle_input(action);
                app = perform(next, effect, &service, &reply_tx);
            }
        }
    }

    Ok(())
}

/// Carries out the side effect of a transition.
fn perform(
    app: App,
    effect: Option<Effect>,
    service: &Arc<dyn CatalogService>,
    reply_tx: &mpsc::UnboundedSender<Reply>,
) -> App {
    match effect {
        None => app,
        Some(Effect::Fetch(request)) => {
            spawn_fetch(Arc::clone(service), request, reply_tx.clone());
            app
        }
        Some(Effect::OpenUrl(url)) => match open::that_detached(&url) {
            Ok(()) => app,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "failed to open data sheet");
                app.with_status(format!("Could not open {url}: {e}"))
            }
        },
    }
}

/// Looks up the configured startup article and reports it to the main loop.
fn spawn_startup_lookup(
    service: Arc<dyn CatalogService>,
    startup: StartupArticle,
    tx: mpsc::UnboundedSender<StartupMessage>,
) {
    tokio::spawn(async move {
        let found =
            find_article(service.as_ref(), &startup.catalog_id, &startup.article_number).await;
        let msg = match found {
            Ok(Some(item)) => match startup.variant_code {
                Some(code) => StartupMessage::Found(item.with_variant_code(code)),
                None => StartupMessage::Found(item),
            },
            Ok(None) => {
                tracing::warn!(
                    catalog = %startup.catalog_id,
                    article = %startup.article_number,
                    "startup article not found"
                );
                StartupMessage::Failed(format!(
                    "Article {} not found in {}",
                    startup.article_number, startup.catalog_id
                ))
            }
            Err(e) => {
                tracing::warn!(error = %e, "startup article lookup failed");
                StartupMessage::Failed(format!("Startup article lookup failed: {e}"))
            }
        };
        let _ = tx.send(msg);
    });
}

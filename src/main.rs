use anyhow::Result;

mod app;
mod chat;
mod client;
mod config;
mod error;
mod handler;
mod tui;
mod ui;
mod validate;

use app::App;
use client::FittingClient;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = Config::load().unwrap_or_else(|_| Config::new());
    let client = FittingClient::new(&config.api_url());

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();
    let mut app = App::new(client);

    let result = run(&mut terminal, &mut events, &mut app).await;

    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui, events: &mut tui::EventHandler, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }
    }
    Ok(())
}

/// Writes structured logs to a file when `RUST_LOG` is set; the terminal is
/// occupied by the UI, so nothing is ever logged to it.
fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        return;
    }
    let Ok(path) = Config::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = std::fs::File::options().create(true).append(true).open(&path) else {
        return;
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

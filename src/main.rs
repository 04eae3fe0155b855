//! Benefits TUI - terminal navigator for assistance programs
//!
//! Walks a user from a free-text description of their situation to
//! matched programs, a question-and-answer assistant and a single
//! section-by-section application.

mod app;
mod assistant;
mod config;
mod platform;
mod state;
mod storage;
mod ui;

use anyhow::Result;
use app::App;
use config::TuiConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use storage::LocalStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "benefits-tui.log";

#[tokio::main]
async fn main() -> Result<()> {
    let data_dir = TuiConfig::data_dir();
    init_logging(data_dir.as_deref());

    let config = TuiConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid config file, using defaults");
        TuiConfig::default()
    });
    let store = LocalStore::open_in(data_dir.as_deref())?;
    tracing::info!(
        path = ?store.path(),
        has_results = store.contains(storage::keys::AI_RESULTS),
        "storage opened"
    );
    let assistant = app::build_assistant(&config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(assistant, store);
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = ?err, "exiting after error");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file so output never lands on the alternate screen
fn init_logging(data_dir: Option<&Path>) {
    let file_layer = data_dir.and_then(|dir| {
        fs::create_dir_all(dir).ok()?;
        let file = File::options()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE))
            .ok()?;
        Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "benefits_tui=info".into()),
        )
        .with(file_layer)
        .init();
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Keep animating while remote work runs
        if let Some(work) = app.take_pending_work() {
            tokio::pin!(work);
            let mut frames = tokio::time::interval(Duration::from_millis(16));
            let mut deferred = Vec::new();
            let outcome = loop {
                tokio::select! {
                    outcome = &mut work => break outcome,
                    _ = frames.tick() => {
                        // Quit stays live; other keys wait for the result
                        while event::poll(Duration::ZERO)? {
                            if let Event::Key(key) = event::read()? {
                                if is_quit_key(&key) {
                                    return Ok(());
                                }
                                if key.kind == KeyEventKind::Press {
                                    deferred.push(key);
                                }
                            }
                        }
                        app.tick();
                        terminal.draw(|frame| ui::draw(frame, app))?;
                    }
                }
            };
            app.apply_outcome(outcome);
            for key in deferred {
                app.handle_key(key).await?;
            }
            continue;
        }

        // Faster polling while animating (16ms = ~60fps)
        let poll_duration = if app.is_animating() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if is_quit_key(&key) {
                    return Ok(());
                }
                app.handle_key(key).await?;
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Global quit: Ctrl+C
fn is_quit_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && key.code == KeyCode::Char('c')
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(is_quit_key(&key));
    }

    #[test]
    fn test_plain_c_and_release_do_not_quit() {
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));

        let mut release = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        release.kind = KeyEventKind::Release;
        assert!(!is_quit_key(&release));
    }
}

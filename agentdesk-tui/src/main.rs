//! agentdesk TUI entry point.

use agentdesk_client::{FileTokenStorage, HttpClient, Session};
use agentdesk_store::Store;
use agentdesk_tui::app::App;
use agentdesk_tui::commands::{self, Command, Settled};
use agentdesk_tui::config::TuiConfig;
use agentdesk_tui::error::TuiError;
use agentdesk_tui::events::TuiEvent;
use agentdesk_tui::logging;
use agentdesk_tui::persistence;
use agentdesk_tui::views::render_view;
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    logging::init(&config.log_path)?;
    tracing::info!(environment = %config.environment, "starting");

    let session = Session::load(FileTokenStorage::new(config.session_path.clone()));
    let (client_tx, mut client_rx) = mpsc::unbounded_channel();
    let http = HttpClient::new(&config.http_config()?, session, client_tx)?;
    let store = Store::new(http);

    let persisted = match persistence::load(&config.persistence_path) {
        Ok(state) => state,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable UI state");
            None
        }
    };
    let mut app = App::new(config, store.clone(), persisted);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    // Adapter events and slice changes join the UI loop.
    let forward = event_tx.clone();
    tokio::spawn(async move {
        while let Some(event) = client_rx.recv().await {
            if forward.send(TuiEvent::Client(event)).await.is_err() {
                break;
            }
        }
    });
    let forward = event_tx.clone();
    let mut changes = store.subscribe();
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(change) => {
                    if forward.send(TuiEvent::Store(change)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::trace!(skipped, "store change notifications lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    spawn_commands(&app, app.start(), &event_tx);

    let tick_rate = Duration::from_millis(app.config.refresh_interval_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                handle_event(&mut app, TuiEvent::Tick);
            }
            Some(event) = event_rx.recv() => {
                let commands = handle_event(&mut app, event);
                spawn_commands(&app, commands, &event_tx);
            }
        }

        if app.should_quit {
            break;
        }
    }

    if let Err(err) = persistence::save(&app.config.persistence_path, &app.persisted_state()) {
        tracing::warn!(error = %err, "failed to save UI state");
    }
    tracing::info!("exiting");

    Ok(())
}

fn handle_event(app: &mut App, event: TuiEvent) -> Vec<Command> {
    match event {
        TuiEvent::Input(key) => app.handle_key(key),
        TuiEvent::Client(event) => app.on_client_event(event),
        TuiEvent::Settled(settled) => app.on_settled(settled),
        TuiEvent::Tick => {
            app.prune_notifications();
            Vec::new()
        }
        // Redrawn on the next loop iteration.
        TuiEvent::Store(_) | TuiEvent::Resize { .. } => Vec::new(),
    }
}

fn spawn_commands(app: &App, commands: Vec<Command>, sender: &mpsc::Sender<TuiEvent>) {
    for command in commands {
        let store = app.store.clone();
        let cancel = app.cancel_token_for(&command);
        let sender = sender.clone();
        tokio::spawn(async move {
            let result = commands::run(&store, &command, cancel.as_ref()).await;
            if let Err(err) = &result {
                tracing::debug!(?command, error = %err, "command settled with error");
            }
            let _ = sender.send(TuiEvent::Settled(Settled { command, result })).await;
        });
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let forwarded = match evt {
                    CrosstermEvent::Key(key) => sender.blocking_send(TuiEvent::Input(key)),
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if forwarded.is_err() {
                    break;
                }
            }
        }
    });
}

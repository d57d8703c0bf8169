use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use resume_chat::app::{App, AppMessage};
use resume_chat::cli::{parse_args, run_cli_command, CliCommand, USAGE};
use resume_chat::client::ChatClient;
use resume_chat::config::{validate_url, ChatConfig, LOG_ENV};
use resume_chat::health_check::spawn_health_poller;
use resume_chat::logging::{default_log_path, init_logging, LogTarget};
use resume_chat::terminal::{install_panic_hook, ChatTerminal};
use resume_chat::ui;

/// UI tick, roughly 60 frames per second.
const TICK: Duration = Duration::from_millis(16);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = match parse_args(std::env::args()) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {}\n\n{}", err, USAGE);
            std::process::exit(2);
        }
    };

    let mut config = ChatConfig::from_env()?;
    if let Some(url) = &args.url {
        config = config.with_base_url(validate_url("--url", url)?);
    }

    if args.command != CliCommand::RunTui {
        // Keep one-shot output quiet unless asked otherwise
        let filter = match std::env::var_os(LOG_ENV) {
            Some(_) => config.log_filter.clone(),
            None => "warn".to_string(),
        };
        init_logging(&filter, LogTarget::Stderr)?;
        if let Some(result) = run_cli_command(&args, &config).await {
            return result;
        }
    }

    if let Some(path) = default_log_path() {
        init_logging(&config.log_filter, LogTarget::File(path))?;
    }
    info!(base_url = %config.base_url, "Starting chat screen");

    install_panic_hook();
    let mut terminal = ChatTerminal::new()?;

    let client = ChatClient::new(config.base_url.clone());
    let mut app = App::new(client.clone());
    let poller = spawn_health_poller(client, config.health_interval, app.message_tx.clone());

    let result = run_app(terminal.terminal(), &mut app).await;

    poller.abort();
    terminal.restore();
    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut events = EventStream::new();
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    while !app.should_quit {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK) => app.tick(),

            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                Some(Ok(Event::Mouse(mouse))) => app.handle_mouse(mouse),
                Some(Ok(Event::Resize(..))) => app.mark_dirty(),
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => app.quit(),
            },

            Some(message) = async {
                match message_rx.as_mut() {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => app.apply_message(message),
        }
    }

    info!("Chat screen closed");
    Ok(())
}

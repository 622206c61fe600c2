use tally::app::{App, AppMessage};
use tally::cli::{self, CliCommand, PromptError};
use tally::client::AgentClient;
use tally::config::ClientConfig;
use tally::{logging, ui};

use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// Loop tick; drives the spinner while waiting on the backend.
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let command = match cli::parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, cli::USAGE);
            std::process::exit(2);
        }
    };

    let (url, prompt) = match command {
        CliCommand::Version => {
            println!("{}", cli::version_string());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", cli::USAGE);
            return Ok(());
        }
        CliCommand::RunTui { url } => (url, None),
        CliCommand::Prompt { text, url } => (url, Some(text)),
    };

    color_eyre::install()?;

    let mut config = ClientConfig::from_env();
    if let Some(url) = url {
        config = config.with_base_url(url);
    }
    let log_path = logging::init(&config);
    info!("Starting tally {} against {}", cli::VERSION, config.base_url);

    let client = Arc::new(AgentClient::from_config(&config)?);
    let runtime = tokio::runtime::Runtime::new()?;

    if let Some(text) = prompt {
        return match runtime.block_on(cli::run_prompt(&client, &text)) {
            Ok(reply) => {
                println!("{}", reply);
                Ok(())
            }
            Err(PromptError::Rejected(e)) => {
                eprintln!("error: {}", e);
                std::process::exit(2);
            }
            Err(PromptError::Failed(message)) => {
                eprintln!("{}", message);
                if let Some(path) = log_path {
                    eprintln!("(details in {})", path.display());
                }
                std::process::exit(1);
            }
        };
    }

    // A panic must not leave the user's shell in raw mode.
    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(client);
    let result = runtime.block_on(async {
        app.spawn_health_check();
        run_app(&mut terminal, &mut app).await
    });

    restore_terminal(&mut terminal)?;
    info!("Exiting");

    result
}

/// Leave the alternate screen before the default panic report prints.
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen, Show);

        original_hook(panic_info);
    }));
}

fn restore_terminal<B: ratatui::backend::Backend + io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // select! needs the receiver by value, separate from the `&mut App` borrow
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        // Draw only when state changed or the spinner is turning
        if app.needs_redraw || app.is_animating() {
            let mut outputs = ui::RenderOutputs::default();
            terminal.draw(|f| outputs = ui::render(f, app))?;
            app.apply_render_outputs(outputs);
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK) => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    // Input stream closed
                    None => app.quit(),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

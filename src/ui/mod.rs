// Terminal UI: screens drawn with ratatui over crossterm

pub mod app;
pub mod render;
pub mod ring;

pub use app::{App, Control, FormField};

use crate::navigation::Clock;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// How long the loop waits for a key before redrawing (drives the splash)
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run_ui<C: Clock>(app: &mut App<C>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!("ui loop failed: {}", err);
    }

    Ok(res?)
}

fn run_app<B: ratatui::backend::Backend, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
) -> io::Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| render::ui(f, app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            // Windows reports releases too
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key) == Control::Quit {
                return Ok(());
            }
        }
    }
}

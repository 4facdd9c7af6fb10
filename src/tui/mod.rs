//! TUI Module - Terminal User Interface powered by ratatui
//!
//! Single-screen uploader: choose or drop a resume, analyze it, and watch
//! the score animate in. Drag-and-drop arrives as a bracketed paste.

mod app;
mod ui;

pub use app::{App, InputMode};

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::cli::TuiArgs;
use crate::config::Config;
use crate::service::AnalysisService;

/// Run the TUI application
pub async fn run_tui(
    args: TuiArgs,
    config: &Config,
    service: Arc<dyn AnalysisService>,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, service);
    if let Some(path) = args.file {
        app.choose_path(path);
    }

    let tick = config.animation.timing().tick;
    let result = tokio::task::block_in_place(|| run_event_loop(&mut terminal, &mut app, tick));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("TUI error: {}", e);
    }

    Ok(())
}

/// Main TUI event loop; ticks at the animation rate
fn run_event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::Paste(text) => app.on_paste(&text),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            app.on_tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

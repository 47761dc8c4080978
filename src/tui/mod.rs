// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod handlers;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::store::EventStore;
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};

pub fn run(store: &EventStore, config: &Config) -> Result<()> {
    // Panic Hook: give the terminal back before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        log::error!("PANIC: {}", info);
        default_hook(info);
    }));

    // --- 1. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- 2. STATE INIT ---
    let mut app_state = AppState::new(store, config);
    log::info!("TUI started with {} events", store.len());

    // --- 3. UI LOOP ---
    let result = event_loop(&mut terminal, &mut app_state);

    // --- 4. CLEANUP ---
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app_state: &mut AppState<'_>,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app_state))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },
                Event::Key(key) => {
                    // Filter out KeyRelease events to prevent double input on Windows
                    if key.kind == event::KeyEventKind::Release {
                        continue;
                    }
                    if handlers::handle_key_event(key, app_state) {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }
}

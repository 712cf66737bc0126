//! stat_tui - Interactive TUI for tuning entity stats

mod app;
mod tuner;
mod ui;

use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use stat_core::config::load_preset_or_default;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

/// Log to a file only; stderr would draw over the alternate screen
fn setup_logging() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", "stat_tui.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    guard
}

fn main() -> io::Result<()> {
    let _guard = setup_logging();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Optional preset path as the first argument
    let mut app = match std::env::args().nth(1) {
        Some(path) => App::with_preset(&load_preset_or_default(Path::new(&path))),
        None => App::new(),
    };
    tracing::info!(stats = app.registry.len(), "tuner started");

    // Main loop
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Tab, _) => app.next_tab(),
                    (KeyCode::BackTab, _) => app.prev_tab(),
                    (KeyCode::Char('1'), _) => app.set_tab(0),
                    (KeyCode::Char('2'), _) => app.set_tab(1),
                    (KeyCode::Char('3'), _) => app.set_tab(2),
                    (KeyCode::Char('4'), _) => app.set_tab(3),
                    (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.on_up(),
                    (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.on_down(),
                    (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.nudge(-1.0),
                    (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.nudge(1.0),
                    (KeyCode::Char('+'), _) => app.cycle_step(),
                    (KeyCode::Char('o'), _) => app.toggle_pin(),
                    (KeyCode::Char('p'), _) => app.add_buff(),
                    (KeyCode::Char('b'), _) => app.clear_buffs(),
                    (KeyCode::Char('c'), _) => app.clear_selected(),
                    (KeyCode::Char('x'), _) => app.reset_tuning(),
                    (KeyCode::Char('s'), _) => app.save(),
                    (KeyCode::Char('L'), _) => app.load(),
                    (KeyCode::Char('?'), _) => app.toggle_help(),
                    _ => {}
                }
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

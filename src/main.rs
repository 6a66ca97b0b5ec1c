use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use anyhow::Context;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use trace_runner::app::App;
use trace_runner::config::Config;
use trace_runner::event::{Event, EventHandler};
use trace_runner::input::{open_gesture_feed, InputHub, KeyboardInput};
use trace_runner::leaderboard::Leaderboard;
use trace_runner::ui;

/// Restores the terminal on every exit path, including errors.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    // The terminal belongs to the UI, so logs go to a file
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("TRACE_LOG", "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_logging(&config.log_path)?;
    log::info!("Trace Runner starting");

    let leaderboard = Leaderboard::load(&config.leaderboard_path, config.leaderboard_capacity);
    let mut inputs = InputHub::new();
    if let Some(feed) = &config.gesture_feed {
        let gesture = open_gesture_feed(feed)
            .with_context(|| format!("Failed to open gesture feed {}", feed.display()))?;
        inputs.add_source(Box::new(gesture));
    }

    // Setup terminal
    let mut guard = TerminalGuard {
        keyboard_enhanced: false,
    };
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    // Release events let a held flap key count on every tick
    if supports_keyboard_enhancement().unwrap_or(false) {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("Failed to enable key release events")?;
        guard.keyboard_enhanced = true;
        inputs.keyboard = KeyboardInput::with_key_release();
        log::info!("keyboard reports key releases; flap key tracks held state");
    } else {
        log::info!("keyboard reports presses only; flap key latches per press");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.clear()?;

    let event_handler = EventHandler::new(config.tick_rate_ms);
    let mut app = App::new(config, leaderboard, inputs);

    // Main loop
    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        match event_handler.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit() {
            break;
        }
    }

    log::info!("Trace Runner exiting");
    Ok(())
}

//! Veidt TUI
//!
//! Landing page for Veidt Health in the terminal.
//!
//! ## Layout
//!
//! - Top: brand header
//! - Left: hero text and the rotating image gallery
//! - Right: pricing cards for each plan
//! - Overlays: signup dialog, help, toasts (bottom-right)
//!
//! ## Keys
//!
//! - 1/2: Join Esencial / Pleno
//! - a, Enter: Join the default plan
//! - h/l, ←/→, [/]: Previous / next image
//! - p: Pause / resume the gallery
//! - x: Dismiss oldest notification
//! - ?: Help
//! - q: Quit
//!
//! ## Signup dialog
//!
//! - Tab/↓, Shift+Tab/↑: Move between fields
//! - Enter: Register
//! - Esc: Close

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;
use veidt_core::{Config, Plan, RecordStore, Store};

use app::App;

/// Run the TUI application
pub async fn run(config: Config) -> Result<()> {
    let store = Store::open(&config);

    // Initialize TUI logging (file-based, only if VEIDT_LOG is set)
    init_tui_logging(&config);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(&config);
    app.mount();

    let result = run_app(&mut terminal, &mut app, &store).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend, R: RecordStore>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &R,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Yield so toast and rotator timers can fire between frames
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Check for terminal events (non-blocking)
        if event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    handle_key(app, store, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Dispatch one key press
fn handle_key<R: RecordStore>(app: &mut App, store: &R, code: KeyCode, modifiers: KeyModifiers) {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // If help is showing, any key dismisses it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.signup.is_open() {
        handle_signup_key(app, store, code, modifiers);
    } else {
        handle_landing_key(app, code);
    }
}

fn handle_landing_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('1') => app.open_signup(Plan::Esencial),
        KeyCode::Char('2') => app.open_signup(Plan::Pleno),
        KeyCode::Char('a') | KeyCode::Enter => app.open_signup(Plan::default()),
        KeyCode::Char('h') | KeyCode::Char('[') | KeyCode::Left => app.prev_image(),
        KeyCode::Char('l') | KeyCode::Char(']') | KeyCode::Right => app.next_image(),
        KeyCode::Char('p') => app.toggle_rotation(),
        KeyCode::Char('x') => {
            app.dismiss_oldest_toast();
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        _ => {}
    }
}

fn handle_signup_key<R: RecordStore>(
    app: &mut App,
    store: &R,
    code: KeyCode,
    modifiers: KeyModifiers,
) {
    match code {
        KeyCode::Esc => {
            app.signup.on_escape();
        }
        KeyCode::Enter => app.submit_signup(store),
        _ => {
            let Some(dialog) = app.signup.content_mut() else {
                return;
            };
            match code {
                KeyCode::Tab | KeyCode::Down => dialog.next_field(),
                KeyCode::BackTab | KeyCode::Up => dialog.prev_field(),
                KeyCode::Backspace => dialog.backspace(),
                KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                    dialog.insert_char(c)
                }
                _ => {}
            }
        }
    }
}

/// Initialize logging for TUI mode
///
/// Only initializes if VEIDT_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log).
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var("VEIDT_LOG") else {
        return;
    };

    let log_path = config.log_path();

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "veidt_core={},veidt_cli={}",
        log_level, log_level
    ));

    // Initialize file-based logging (ignore error if already initialized)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use app::Field;
    use veidt_core::document::collections;

    fn press(app: &mut App, store: &Store<veidt_core::MemorySlot>, code: KeyCode) {
        handle_key(app, store, code, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, store: &Store<veidt_core::MemorySlot>, text: &str) {
        for c in text.chars() {
            press(app, store, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_plan_keys_open_signup() {
        let store = Store::in_memory();
        let mut app = App::new(&Config::default());

        press(&mut app, &store, KeyCode::Char('2'));
        assert_eq!(app.signup.content().unwrap().plan, Plan::Pleno);

        press(&mut app, &store, KeyCode::Esc);
        assert!(!app.signup.is_open());

        press(&mut app, &store, KeyCode::Char('a'));
        assert_eq!(app.signup.content().unwrap().plan, Plan::Esencial);
    }

    #[test]
    fn test_q_types_into_open_dialog() {
        let store = Store::in_memory();
        let mut app = App::new(&Config::default());

        press(&mut app, &store, KeyCode::Char('1'));
        type_text(&mut app, &store, "quique");
        assert!(!app.should_quit);
        assert_eq!(app.signup.content().unwrap().value(Field::Name), "quique");

        press(&mut app, &store, KeyCode::Esc);
        press(&mut app, &store, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let store = Store::in_memory();
        let mut app = App::new(&Config::default());

        press(&mut app, &store, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, &store, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_dialog() {
        let store = Store::in_memory();
        let mut app = App::new(&Config::default());

        press(&mut app, &store, KeyCode::Char('1'));
        handle_key(&mut app, &store, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
        assert_eq!(app.signup.content().unwrap().value(Field::Name), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_signup_by_keyboard() {
        let store = Store::in_memory();
        let mut app = App::new(&Config::default());

        press(&mut app, &store, KeyCode::Char('2'));
        type_text(&mut app, &store, "Lucía Díaz");
        press(&mut app, &store, KeyCode::Tab);
        type_text(&mut app, &store, "lucia@example.com");
        press(&mut app, &store, KeyCode::Tab);
        type_text(&mut app, &store, "pw");
        press(&mut app, &store, KeyCode::Enter);

        assert!(!app.signup.is_open());
        assert_eq!(app.toasts.snapshot()[0].description, "Your plan Pleno $2 is ready.");
        assert_eq!(store.load().collection_len(collections::MEMBERSHIPS), 2);
    }

    #[test]
    fn test_image_keys() {
        let store = Store::in_memory();
        let mut app = App::new(&Config::default());

        press(&mut app, &store, KeyCode::Char(']'));
        assert_eq!(app.rotator.index(), 1);
        press(&mut app, &store, KeyCode::Left);
        press(&mut app, &store, KeyCode::Left);
        assert_eq!(app.rotator.index(), app.rotator.len() - 1);
    }
}

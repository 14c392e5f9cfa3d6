pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use app::{InputMode, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Hold stderr while the TUI is active so warnings don't corrupt the display
    crate::stderr_buffer::hold();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Some(Event::Key(key)) => handle_key_event(&mut app, key),
            Some(Event::Tick) => app.update_flash(),
            None => break Ok(()),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    ratatui::restore();

    // Print held messages now that the terminal is restored
    for msg in crate::stderr_buffer::release() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
                KeyCode::Tab => app.next_view(),

                // Filters
                KeyCode::Char('d') => app.next_day(),
                KeyCode::Char('D') => app.previous_day(),
                KeyCode::Char('f') => app.next_bar_filter(),
                KeyCode::Char('F') => app.clear_bar_filter(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ if app.current_view == View::Route => handle_route_key(app, key),
                _ => {}
            }
        }
        InputMode::StopBreakdown => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('b') => app.dismiss_popup(),
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            _ => {}
        },
        InputMode::Help => {
            // Any key exits help
            app.dismiss_popup();
        }
    }
}

/// Planner controls, only live on the Route tab
fn handle_route_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char('l') | KeyCode::Right => {
            app.adjust_selected_rating(1)
        }
        KeyCode::Char('-') | KeyCode::Char('h') | KeyCode::Left => app.adjust_selected_rating(-1),
        KeyCode::Char('s') => app.cycle_style(),
        KeyCode::Char('n') => app.change_stops(1),
        KeyCode::Char('N') => app.change_stops(-1),
        KeyCode::Char('$') => app.toggle_budget_focus(),
        KeyCode::Char('r') => app.reroll(),
        KeyCode::Enter | KeyCode::Char('b') => app.show_stop_breakdown(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::specials::{Day, Special, SpecialsTable};

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn sample_app() -> App {
        let table = SpecialsTable::new(vec![
            Special::new("Alpha", Day::Friday, "$1 wells"),
            Special::new("Beta", Day::Friday, "Trivia night"),
        ]);
        App::new(table, &Config::default(), Day::Friday, Some(1), ThemeColors::dark())
    }

    #[test]
    fn test_route_keys_ignored_outside_route_view() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.request.num_stops, 3);
        press(&mut app, KeyCode::Char('$'));
        assert!(!app.request.budget_focus);
    }

    #[test]
    fn test_route_keys_in_route_view() {
        let mut app = sample_app();
        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.current_view, View::Route);
        press(&mut app, KeyCode::Char('N'));
        assert_eq!(app.request.num_stops, 2);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.ratings["Alpha"], 6);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::StopBreakdown);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, InputMode::Help);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = sample_app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}

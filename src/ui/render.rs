//! Frame composition.
//!
//! Picks what the frame shows from the catalog's load state, then lays out
//! header, category buttons, card grid and status bar.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame,
};

use super::{categories, grid, header, help, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 16;

pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    if area.width < 1 || area.height < 1 {
        return;
    }

    // A failed initial load replaces the whole screen
    if app.catalog.has_error() {
        let placeholder = Paragraph::new("Error").alignment(Alignment::Center);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .split(area);
        f.render_widget(placeholder, rows[1]);
        return;
    }

    if !app.catalog.is_loaded() {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    // Buttons may take at most half of what the header and status bar leave
    let spare = area.height.saturating_sub(header::HEADER_HEIGHT + 1);
    let categories_height = categories::height_for(app, area.width).min(spare / 2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header::HEADER_HEIGHT),
            Constraint::Length(categories_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    header::render(f, app, chunks[0]);
    categories::render(f, app, chunks[1]);
    grid::render(f, app, chunks[2]);
    status::render(f, app, chunks[3]);

    if app.show_help {
        app.help_scroll_offset = app.help_scroll_offset.min(help::max_scroll(app, area));
        help::render(f, app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppEvent, Focus};
    use crate::catalog::{Category, CategoryFilterMode, Entry};
    use crate::ui::events::handle_app_event;
    use crate::ui::test_support::app_with_mode;
    use ratatui::{backend::TestBackend, style::Color, Terminal};

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn loaded_app() -> App {
        let mut app = app_with_mode(CategoryFilterMode::Highlight);
        handle_app_event(
            &mut app,
            AppEvent::EntriesLoaded(Ok(vec![
                Entry::new("ivysaur", "https://pokeapi.co/api/v2/pokemon/2/"),
                Entry::new("bulbasaur", "https://pokeapi.co/api/v2/pokemon/1/"),
            ])),
        );
        handle_app_event(
            &mut app,
            AppEvent::CategoriesLoaded(Ok(vec![Category::new(
                "grass",
                "https://pokeapi.co/api/v2/type/12/",
            )])),
        );
        app
    }

    #[test]
    fn test_blank_while_loading() {
        let mut app = app_with_mode(CategoryFilterMode::Highlight);
        let screen = draw(&mut app, 80, 24);
        assert!(screen.chars().all(|c| c == ' ' || c == '\n'));
    }

    #[test]
    fn test_error_placeholder_replaces_everything() {
        let mut app = loaded_app();
        handle_app_event(&mut app, AppEvent::CategoriesLoaded(Err("HTTP 500".to_string())));
        let screen = draw(&mut app, 80, 24);
        assert!(screen.contains("Error"));
        assert!(!screen.contains(header::HEADING));
        assert!(!screen.contains("Bulbasaur"));
    }

    #[test]
    fn test_error_placeholder_is_unstyled() {
        let mut app = app_with_mode(CategoryFilterMode::Highlight);
        handle_app_event(&mut app, AppEvent::EntriesLoaded(Err("HTTP 500".to_string())));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        let buffer = terminal.backend().buffer();
        let (x, y) = (0..24u16)
            .flat_map(|y| (0..80u16).map(move |x| (x, y)))
            .find(|&(x, y)| buffer[(x, y)].symbol() == "E")
            .unwrap();
        for offset in 0..5 {
            let cell = &buffer[(x + offset, y)];
            assert_eq!(cell.fg, Color::Reset);
            assert_eq!(cell.bg, Color::Reset);
            assert!(cell.modifier.is_empty());
        }
    }

    #[test]
    fn test_error_placeholder_without_entries() {
        let mut app = app_with_mode(CategoryFilterMode::Highlight);
        handle_app_event(&mut app, AppEvent::CategoriesLoaded(Err("timeout".to_string())));
        assert!(draw(&mut app, 80, 24).contains("Error"));
    }

    #[test]
    fn test_loaded_screen_shows_heading_cards_and_count() {
        let mut app = loaded_app();
        let screen = draw(&mut app, 100, 30);
        assert!(screen.contains(header::HEADING));
        assert!(screen.contains("My Favourites (0)"));
        assert!(screen.contains("grass"));
        assert!(screen.contains("Bulbasaur"));
        assert!(screen.contains("Ivysaur"));
        assert_eq!(app.grid_columns, 3);
    }

    #[test]
    fn test_type_panel_title() {
        let mut app = loaded_app();
        let screen = draw(&mut app, 100, 30);
        assert!(screen.contains("Filter pokemons by selecting one or more pokemon types"));
    }

    #[test]
    fn test_type_cursor_stays_visible_in_short_panel() {
        let mut app = loaded_app();
        let types = [
            "normal", "fighting", "flying", "poison", "ground", "rock", "bug", "ghost", "steel",
            "fire", "water", "grass", "electric", "psychic", "ice", "dragon", "dark", "fairy",
            "stellar", "unknown", "shadow",
        ];
        let categories = types
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Category::new(*name, format!("https://pokeapi.co/api/v2/type/{}/", i + 1))
            })
            .collect();
        handle_app_event(&mut app, AppEvent::CategoriesLoaded(Ok(categories)));
        app.focus = Focus::Categories;
        app.category_cursor = types.len() - 1;

        // Six wrapped lines at this width, only three fit in the panel
        let screen = draw(&mut app, 40, 16);
        assert!(screen.contains("shadow"));
        assert!(screen.contains("stellar"));
        assert!(screen.contains("grass"));
        assert!(!screen.contains("fighting"));
    }

    #[test]
    fn test_too_small_message() {
        let mut app = loaded_app();
        let screen = draw(&mut app, 30, 8);
        assert!(screen.contains("Terminal too small"));
    }
}

//! Input handling for the TUI.
//!
//! Keys are resolved through the keybinding registry for the focused panel.
//! The search box takes printable characters before any binding applies.

use crate::app::{App, AppEvent, Focus, MAX_QUERY_LENGTH};
use crate::catalog::CategoryToggle;
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::card::CardProps;
use super::tasks::spawn_category_members;
use super::Action;

fn focus_to_context(focus: Focus) -> KbContext {
    match focus {
        Focus::Search => KbContext::Search,
        Focus::Categories => KbContext::Categories,
        Focus::Grid => KbContext::Grid,
    }
}

/// Terminals report `?` or `A` with SHIFT set; bindings are stored without it.
fn normalize(code: KeyCode, modifiers: KeyModifiers) -> KeyModifiers {
    match code {
        KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
        _ => modifiers,
    }
}

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    let modifiers = normalize(code, modifiers);

    if app.show_help {
        return handle_help_input(app, code);
    }

    // Until the catalog is usable the only live key is quit
    if app.catalog.has_error() || !app.catalog.is_loaded() {
        return match app
            .keybindings
            .action_for_key(code, modifiers, KbContext::Global)
        {
            Some(KbAction::Quit) => Action::Quit,
            _ => Action::Continue,
        };
    }

    if app.focus == Focus::Search && handle_search_typing(app, code, modifiers) {
        return Action::Continue;
    }

    let context = focus_to_context(app.focus);
    match app.keybindings.action_for_key(code, modifiers, context) {
        Some(action) => dispatch(app, action, event_tx),
        None => Action::Continue,
    }
}

/// Edit the query. Returns true when the key was consumed.
fn handle_search_typing(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char(c)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            if !app.push_query_char(c) {
                app.set_status(format!(
                    "Search is limited to {MAX_QUERY_LENGTH} characters"
                ));
            }
            true
        }
        KeyCode::Backspace => {
            app.pop_query_char();
            true
        }
        _ => false,
    }
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

fn dispatch(app: &mut App, action: KbAction, event_tx: &mpsc::Sender<AppEvent>) -> Action {
    match action {
        KbAction::Quit => return Action::Quit,
        KbAction::CycleFocus => app.cycle_focus(),
        KbAction::FocusSearch => app.focus = Focus::Search,
        KbAction::NavUp => app.nav_up(),
        KbAction::NavDown => app.nav_down(),
        KbAction::NavLeft => app.nav_left(),
        KbAction::NavRight => app.nav_right(),
        KbAction::ToggleFavourite => toggle_selected_favourite(app),
        KbAction::ToggleFavouritesFilter => app.toggle_favourites_filter(),
        KbAction::ToggleCategory => toggle_selected_category(app, event_tx),
        KbAction::ClearQuery => app.clear_query(),
        KbAction::Back => {
            app.focus = match app.focus {
                Focus::Search => Focus::Grid,
                Focus::Categories | Focus::Grid => Focus::Search,
            };
        }
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {name}"));
        }
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
    }
    Action::Continue
}

fn toggle_selected_favourite(app: &mut App) {
    let Some(entry) = app.selected_entry().cloned() else {
        return;
    };
    let props = CardProps::for_entry(&entry, &app.catalog);
    let was_favourite = props.is_favourite;
    props.toggle_favourite(&mut app.catalog);
    app.clamp_selections();

    tracing::debug!(entry = %entry.name, favourite = !was_favourite, "Favourite toggled");
    if was_favourite {
        app.set_status(format!("Removed {} from favourites", entry.name));
    } else {
        app.set_status(format!("Added {} to favourites", entry.name));
    }
}

fn toggle_selected_category(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let Some(name) = app.selected_category().map(|c| c.name.clone()) else {
        return;
    };
    if app.catalog.toggle_category_selection(&name) == CategoryToggle::Selected {
        spawn_category_members(&app.api, name.clone(), event_tx);
        app.set_status(format!("Loading '{name}' members..."));
    }
    app.clamp_selections();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{PokeApi, DEFAULT_TIMEOUT};
    use crate::catalog::{CatalogState, Category, CategoryFilterMode, Entry, Field};
    use crate::ui::events::handle_app_event;
    use crate::ui::test_support::app_with_mode;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn key(app: &mut App, code: KeyCode) -> Action {
        let (tx, _rx) = mpsc::channel(8);
        handle_input(app, code, KeyModifiers::NONE, &tx)
    }

    fn load(app: &mut App) {
        handle_app_event(
            app,
            AppEvent::EntriesLoaded(Ok(vec![
                Entry::new("bulbasaur", "https://pokeapi.co/api/v2/pokemon/1/"),
                Entry::new("ivysaur", "https://pokeapi.co/api/v2/pokemon/2/"),
                Entry::new("charmander", "https://pokeapi.co/api/v2/pokemon/4/"),
            ])),
        );
        handle_app_event(
            app,
            AppEvent::CategoriesLoaded(Ok(vec![
                Category::new("grass", "https://pokeapi.co/api/v2/type/12/"),
                Category::new("fire", "https://pokeapi.co/api/v2/type/10/"),
            ])),
        );
    }

    fn loaded_app() -> App {
        let mut app = app_with_mode(CategoryFilterMode::Highlight);
        load(&mut app);
        app
    }

    #[test]
    fn test_only_quit_before_load() {
        let mut app = app_with_mode(CategoryFilterMode::Highlight);
        assert!(matches!(key(&mut app, KeyCode::Tab), Action::Continue));
        assert_eq!(app.focus, Focus::Search);
        assert!(matches!(key(&mut app, KeyCode::Char('q')), Action::Quit));
    }

    #[test]
    fn test_only_quit_after_error() {
        let mut app = loaded_app();
        handle_app_event(&mut app, AppEvent::CategoriesLoaded(Err("boom".to_string())));
        assert!(matches!(key(&mut app, KeyCode::Char('f')), Action::Continue));
        assert!(!app.catalog.filters().is_on(Field::Favourite));
        assert!(matches!(key(&mut app, KeyCode::Char('q')), Action::Quit));
    }

    #[test]
    fn test_typing_filters_and_q_does_not_quit() {
        let mut app = loaded_app();
        for c in "ivyq".chars() {
            assert!(matches!(key(&mut app, KeyCode::Char(c)), Action::Continue));
        }
        assert_eq!(app.catalog.query(), "ivyq");
        key(&mut app, KeyCode::Backspace);
        assert_eq!(app.catalog.query(), "ivy");
        assert_eq!(app.catalog.entries().len(), 1);

        // Esc in the search box clears it
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.catalog.query(), "");
        assert_eq!(app.catalog.entries().len(), 3);
    }

    #[test]
    fn test_ctrl_c_quits_from_search() {
        let mut app = loaded_app();
        let (tx, _rx) = mpsc::channel(8);
        let action = handle_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL, &tx);
        assert!(matches!(action, Action::Quit));
    }

    #[test]
    fn test_query_length_cap_sets_status() {
        let mut app = loaded_app();
        for _ in 0..MAX_QUERY_LENGTH + 1 {
            key(&mut app, KeyCode::Char('a'));
        }
        assert_eq!(app.catalog.query().chars().count(), MAX_QUERY_LENGTH);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_enter_leaves_search_for_grid() {
        let mut app = loaded_app();
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::Grid);
        key(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::Search);
    }

    #[test]
    fn test_grid_enter_toggles_favourite() {
        let mut app = loaded_app();
        app.focus = Focus::Grid;
        key(&mut app, KeyCode::Right);
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.catalog.favourites(), ["ivysaur"]);

        key(&mut app, KeyCode::Char('f'));
        assert_eq!(app.catalog.entries().len(), 1);
        assert_eq!(app.selected_card, 0);

        key(&mut app, KeyCode::Enter);
        assert!(app.catalog.favourites().is_empty());
        assert!(app.catalog.entries().is_empty());

        key(&mut app, KeyCode::Char('f'));
        assert_eq!(app.catalog.entries().len(), 3);
    }

    #[test]
    fn test_shifted_question_mark_opens_help() {
        let mut app = loaded_app();
        app.focus = Focus::Grid;
        let (tx, _rx) = mpsc::channel(8);
        handle_input(&mut app, KeyCode::Char('?'), KeyModifiers::SHIFT, &tx);
        assert!(app.show_help);

        // Help captures keys until dismissed
        key(&mut app, KeyCode::Char('j'));
        assert_eq!(app.help_scroll_offset, 1);
        assert!(matches!(key(&mut app, KeyCode::Char('q')), Action::Continue));
        assert!(!app.show_help);
    }

    #[test]
    fn test_theme_cycle_sets_status() {
        let mut app = loaded_app();
        app.focus = Focus::Grid;
        key(&mut app, KeyCode::Char('t'));
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg, "Theme: Light");
    }

    #[tokio::test]
    async fn test_category_toggle_fetches_members() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/type/grass"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"name": "grass", "pokemon": [{"pokemon": {"name": "bulbasaur", "url": "u"}}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let api = PokeApi::new(reqwest::Client::new(), &server.uri(), DEFAULT_TIMEOUT).unwrap();
        let mut app = App::new(api, CatalogState::new(CategoryFilterMode::Restrict), 150);
        load(&mut app);
        app.focus = Focus::Categories;

        let (tx, mut rx) = mpsc::channel(8);
        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE, &tx);
        assert!(app.catalog.is_category_selected("grass"));

        let event = rx.recv().await.unwrap();
        handle_app_event(&mut app, event);
        let names: Vec<&str> = app.catalog.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["bulbasaur"]);

        // Deselecting does not fetch again
        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE, &tx);
        assert!(!app.catalog.is_category_selected("grass"));
        assert_eq!(app.catalog.entries().len(), 3);
    }
}

//! Application event handling.
//!
//! Applies background fetch completions to the catalog.

use crate::app::{App, AppEvent};

pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::EntriesLoaded(result) => {
            app.catalog.finish_entries_load(result);
            app.clamp_selections();
        }
        AppEvent::CategoriesLoaded(result) => {
            app.catalog.finish_categories_load(result);
            app.clamp_selections();
        }
        AppEvent::CategoryMembersLoaded { category, result } => match result {
            Ok(members) => {
                app.catalog.record_category_members(&category, members);
                app.clamp_selections();
            }
            Err(error) => {
                tracing::warn!(category = %category, error = %error, "Category member fetch failed");
                app.set_status(format!("Could not load '{category}' members: {error}"));
            }
        },
    }
    app.needs_redraw = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, CategoryFilterMode, Entry};
    use crate::ui::test_support::app_with_mode;

    #[test]
    fn test_entries_loaded_populates_view() {
        let mut app = app_with_mode(CategoryFilterMode::Highlight);
        handle_app_event(
            &mut app,
            AppEvent::EntriesLoaded(Ok(vec![
                Entry::new("ivysaur", "https://pokeapi.co/api/v2/pokemon/2/"),
                Entry::new("bulbasaur", "https://pokeapi.co/api/v2/pokemon/1/"),
            ])),
        );
        assert!(app.catalog.is_loaded());
        assert_eq!(app.selected_entry().map(|e| e.name.as_str()), Some("bulbasaur"));
    }

    #[test]
    fn test_category_load_failure_sets_error_flag() {
        let mut app = app_with_mode(CategoryFilterMode::Highlight);
        handle_app_event(&mut app, AppEvent::CategoriesLoaded(Err("boom".to_string())));
        assert!(app.catalog.has_error());
    }

    #[test]
    fn test_member_failure_only_sets_status() {
        let mut app = app_with_mode(CategoryFilterMode::Restrict);
        handle_app_event(
            &mut app,
            AppEvent::CategoriesLoaded(Ok(vec![Category::new("fire", "u")])),
        );
        handle_app_event(
            &mut app,
            AppEvent::CategoryMembersLoaded {
                category: "fire".to_string(),
                result: Err("Request timed out".to_string()),
            },
        );
        assert!(!app.catalog.has_error());
        assert!(app.catalog.category_members("fire").is_none());
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert!(msg.contains("fire"));
    }

    #[test]
    fn test_members_shrink_view_and_clamp_cursor() {
        let mut app = app_with_mode(CategoryFilterMode::Restrict);
        handle_app_event(
            &mut app,
            AppEvent::EntriesLoaded(Ok(vec![
                Entry::new("bulbasaur", "https://pokeapi.co/api/v2/pokemon/1/"),
                Entry::new("charmander", "https://pokeapi.co/api/v2/pokemon/4/"),
            ])),
        );
        app.selected_card = 1;
        app.catalog.toggle_category_selection("grass");
        handle_app_event(
            &mut app,
            AppEvent::CategoryMembersLoaded {
                category: "grass".to_string(),
                result: Ok(vec!["bulbasaur".to_string()]),
            },
        );
        assert_eq!(app.catalog.entries().len(), 1);
        assert_eq!(app.selected_card, 0);
    }
}

use crate::app::{App, Focus};
use crate::keybindings::Action;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Key hints for the focused panel, using the keys currently bound.
fn hints(app: &App) -> String {
    let key = |action: Action| app.keybindings.key_for(action).unwrap_or_default();
    let context_hint = match app.focus {
        Focus::Search => "type to search".to_string(),
        Focus::Categories => "[Enter] toggle type".to_string(),
        Focus::Grid => "[Enter] favourite".to_string(),
    };
    format!(
        "{context_hint} | [{}] focus [{}] favourites [{}] theme [{}] help [{}] quit",
        key(Action::CycleFocus),
        key(Action::ToggleFavouritesFilter),
        key(Action::CycleTheme),
        key(Action::ShowHelp),
        key(Action::Quit),
    )
}

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = match &app.status_message {
        Some((msg, _)) => Cow::Borrowed(msg.as_ref()),
        None => Cow::Owned(hints(app)),
    };

    f.render_widget(Paragraph::new(text).style(app.style("status_bar")), area);
}

//! Page header: heading, search box and the favourites toggle.

use crate::app::{App, Focus};
use crate::catalog::Field;
use crate::util::{display_width, truncate_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const HEADING: &str = "What Pokemon are you looking for?";
const PLACEHOLDER: &str = "Search by name";
const CLEAR_MARK: &str = " \u{2715}";

/// Rows the header needs: heading line plus a bordered input row.
pub const HEADER_HEIGHT: u16 = 4;

/// Label of the favourites button, e.g. "My Favourites (3)".
///
/// The count is the raw favourite list length, duplicates included.
pub fn favourites_label(app: &App) -> String {
    format!("My Favourites ({})", app.catalog.favourites().len())
}

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.height < HEADER_HEIGHT || area.width < 10 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(3)])
        .split(area);

    let heading = Paragraph::new(HEADING)
        .alignment(Alignment::Center)
        .style(app.style("heading"));
    f.render_widget(heading, rows[0]);

    let label = favourites_label(app);
    // Borders plus one space of padding each side
    let button_width = (display_width(&label) as u16 + 4).min(area.width / 2);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(button_width)])
        .split(rows[1]);

    render_search_box(f, app, cols[0]);
    render_favourites_button(f, app, cols[1], &label);
}

fn render_search_box(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Search;
    let border_style = if focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search ");
    let inner = block.inner(area);
    let width = usize::from(inner.width);

    let query = app.catalog.query();
    let line = if query.is_empty() {
        Line::from(Span::styled(PLACEHOLDER, app.style("search_placeholder")))
    } else {
        let room = width.saturating_sub(display_width(CLEAR_MARK));
        let text = tail_to_width(query, room);
        let pad = room.saturating_sub(display_width(text));
        Line::from(vec![
            Span::styled(text.to_string(), app.style("search_text")),
            Span::raw(" ".repeat(pad)),
            Span::styled(CLEAR_MARK, app.style("search_placeholder")),
        ])
    };
    f.render_widget(Paragraph::new(line).block(block), area);

    if focused && inner.width > 0 {
        let typed = display_width(tail_to_width(query, width.saturating_sub(1)));
        let x = inner.x + (typed as u16).min(inner.width.saturating_sub(1));
        f.set_cursor_position(Position::new(x, inner.y));
    }
}

/// Longest suffix of `s` that fits in `width` columns, so the end of a long
/// query stays visible while typing.
fn tail_to_width(s: &str, width: usize) -> &str {
    let mut start = s.len();
    let mut used = 0;
    for (idx, c) in s.char_indices().rev() {
        let w = display_width(c.encode_utf8(&mut [0; 4]));
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &s[start..]
}

fn render_favourites_button(f: &mut Frame, app: &App, area: Rect, label: &str) {
    let pressed = app.catalog.filters().is_on(Field::Favourite);
    let style = if pressed {
        app.style("favourites_toggle_active")
    } else {
        app.style("favourites_toggle")
    };
    let inner_width = usize::from(area.width.saturating_sub(2));
    let button = Paragraph::new(truncate_to_width(label, inner_width).into_owned())
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border")),
        );
    f.render_widget(button, area);
}

//! Responsive card grid.

use crate::app::{App, Focus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::card::{Card, CardProps, CardStyles, CARD_HEIGHT};

/// Column count for a given grid width: 1 below 60 columns, 2 below 100, else 3.
pub fn columns_for_width(width: u16) -> usize {
    match width {
        0..=59 => 1,
        60..=99 => 2,
        _ => 3,
    }
}

/// First row to draw so that `selected_row` is on screen.
pub(super) fn first_visible_row(selected_row: usize, visible_rows: usize) -> usize {
    selected_row.saturating_sub(visible_rows.saturating_sub(1))
}

/// Render the grid and record the column count used, for navigation.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let entries = app.catalog.entries();
    let border_style = if app.focus == Focus::Grid {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" Pok\u{e9}mon ({}) ", entries.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = columns_for_width(area.width);
    app.grid_columns = columns;

    let entries = app.catalog.entries();
    if entries.is_empty() {
        let msg = Paragraph::new("No Pok\u{e9}mon match")
            .alignment(Alignment::Center)
            .style(app.style("search_placeholder"));
        f.render_widget(msg, inner);
        return;
    }

    let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
    let selected_row = app.selected_card / columns;
    let top_row = first_visible_row(selected_row, visible_rows);
    let styles = CardStyles::from_app(app);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(inner);

    for (row_offset, row_area) in row_areas.iter().enumerate() {
        let row = top_row + row_offset;
        let start = row * columns;
        if start >= entries.len() {
            break;
        }
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            let index = start + col;
            let Some(entry) = entries.get(index) else {
                break;
            };
            let card = Card {
                props: CardProps::for_entry(entry, &app.catalog),
                selected: index == app.selected_card && app.focus == Focus::Grid,
                styles,
            };
            f.render_widget(card, *cell);
        }
    }
}

//! Category toggle buttons, wrapped across as many lines as needed.

use crate::app::{App, Focus};
use crate::catalog::Category;
use crate::theme::category_color;
use crate::util::{display_width, strip_control_chars};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::grid::first_visible_row;

/// Gap between neighbouring buttons.
const GAP: usize = 1;

const TITLE: &str = " Filter pokemons by selecting one or more pokemon types ";

fn button_label(category: &Category) -> String {
    format!(
        " {} {} ",
        category.kind().glyph(),
        strip_control_chars(&category.name)
    )
}

/// Split buttons of the given widths into lines no wider than `width`.
///
/// Returns, per line, the indices of the buttons on it. A button wider than
/// the line gets a line of its own.
pub fn wrap_buttons(widths: &[usize], width: usize) -> Vec<Vec<usize>> {
    let mut lines: Vec<Vec<usize>> = Vec::new();
    let mut used = 0;
    for (i, &w) in widths.iter().enumerate() {
        let current = lines.last_mut().filter(|_| used + GAP + w <= width);
        if let Some(line) = current {
            line.push(i);
            used += GAP + w;
        } else {
            lines.push(vec![i]);
            used = w;
        }
    }
    lines
}

/// Index of the wrapped line holding button `index`, or 0 if none does.
fn line_of(lines: &[Vec<usize>], index: usize) -> usize {
    lines
        .iter()
        .position(|line| line.contains(&index))
        .unwrap_or(0)
}

/// Rows needed to show every button at `width`, borders included.
pub fn height_for(app: &App, width: u16) -> u16 {
    let inner = usize::from(width.saturating_sub(2));
    let widths: Vec<usize> = app
        .catalog
        .categories()
        .iter()
        .map(|c| display_width(&button_label(c)))
        .collect();
    let lines = wrap_buttons(&widths, inner).len().max(1);
    u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2)
}

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let focused = app.focus == Focus::Categories;
    let border_style = if focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(TITLE);
    let inner = block.inner(area);

    let categories = app.catalog.categories();
    let labels: Vec<String> = categories.iter().map(button_label).collect();
    let widths: Vec<usize> = labels.iter().map(|l| display_width(l)).collect();

    let unselected = app.style("category_button");
    let selected = app.style("category_button_selected");
    let cursor = app.style("category_cursor");

    let wrapped = wrap_buttons(&widths, usize::from(inner.width));
    // Keep the cursor's line in view when the panel is shorter than the wrap
    let top = first_visible_row(
        line_of(&wrapped, app.category_cursor),
        usize::from(inner.height),
    );

    let lines: Vec<Line> = wrapped
        .into_iter()
        .map(|indices| {
            let mut spans = Vec::with_capacity(indices.len() * 2);
            for (n, i) in indices.into_iter().enumerate() {
                if n > 0 {
                    spans.push(Span::raw(" ".repeat(GAP)));
                }
                let category = &categories[i];
                let accent = category_color(category.kind());
                let mut style = if app.catalog.is_category_selected(&category.name) {
                    selected.bg(accent)
                } else {
                    unselected.fg(accent)
                };
                if focused && i == app.category_cursor {
                    style = style.patch(cursor).add_modifier(Modifier::BOLD);
                }
                spans.push(Span::styled(labels[i].clone(), style));
            }
            Line::from(spans)
        })
        .collect();

    let paragraph = if lines.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "Loading types...",
            app.style("search_placeholder"),
        )))
    } else {
        Paragraph::new(lines).scroll((u16::try_from(top).unwrap_or(u16::MAX), 0))
    };
    f.render_widget(paragraph.block(block), area);
}

//! Help overlay: a scrollable keybinding table.
//!
//! Bindings are grouped by context and reflect any overrides from the
//! config file.

use crate::app::App;
use crate::keybindings::Context;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

const CONTEXT_ORDER: [Context; 4] = [
    Context::Global,
    Context::Search,
    Context::Categories,
    Context::Grid,
];

/// Rows of the table body: a heading per context, its bindings, and a blank
/// separator between groups.
fn build_rows(app: &App) -> Vec<Row<'static>> {
    let bindings = app.keybindings.all_bindings();
    let mut rows: Vec<Row> = Vec::new();

    for ctx in CONTEXT_ORDER {
        let mut group = bindings.iter().filter(|(c, _, _)| *c == ctx).peekable();
        if group.peek().is_none() {
            continue;
        }

        rows.push(
            Row::new(vec![
                Line::from(Span::styled(
                    format!("-- {} --", ctx.label()),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ])
            .style(app.style("heading")),
        );
        for (_, key, description) in group {
            rows.push(Row::new(vec![
                Line::from(Span::styled(format!("  {key}"), app.style("help_key"))),
                Line::from(*description),
            ]));
        }
        rows.push(Row::new(vec![String::new(), String::new()]));
    }

    rows.pop();
    rows
}

/// Largest valid scroll offset for an overlay on a terminal of `area`.
pub fn max_scroll(app: &App, area: Rect) -> usize {
    let overlay = centered_rect(80, 80, area);
    let visible = usize::from(overlay.height.saturating_sub(3));
    build_rows(app).len().saturating_sub(visible)
}

/// Render the help overlay on top of the current view.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    let overlay = centered_rect(80, 80, area);
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let rows = build_rows(app);
    // Two border rows plus the header
    let visible_height = usize::from(overlay.height.saturating_sub(3));
    let max_scroll = rows.len().saturating_sub(visible_height);
    let scroll = app.help_scroll_offset.min(max_scroll);
    let visible: Vec<Row> = rows.into_iter().skip(scroll).take(visible_height).collect();

    let title = if max_scroll > 0 {
        format!(" Help ({}/{}) ", scroll + 1, max_scroll + 1)
    } else {
        " Help (? to close) ".to_string()
    };

    let table = Table::new(visible, [Constraint::Length(16), Constraint::Min(20)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::UNDERLINED),
                )
                .bottom_margin(1),
        );
    f.render_widget(table, overlay);

    if scroll < max_scroll {
        let hint = Line::from(Span::styled(
            " j/k to scroll, ? or Esc to close ",
            app.style("search_placeholder"),
        ));
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height.saturating_sub(1),
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(Paragraph::new(hint), hint_area);
    }
}

/// `percent` of `length`, computed wide so large terminals don't overflow.
fn scale(length: u16, percent: u16) -> u16 {
    let scaled = u32::from(length) * u32::from(percent.min(100)) / 100;
    u16::try_from(scaled).unwrap_or(length)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = scale(area.width, percent_x);
    let height = scale(area.height, percent_y);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

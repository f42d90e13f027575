//! Entry card widget.
//!
//! A card is built from [`CardProps`]: the entry, whether it is a
//! favourite, and the add/remove change bound to that entry.

use crate::app::App;
use crate::catalog::{CatalogState, Entry, FavouriteChange};
use crate::util::{capitalize, center_in, strip_control_chars};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Rows a card occupies, borders included.
pub const CARD_HEIGHT: u16 = 5;

const FAVOURITE_MARK: &str = "\u{2665} Favourite";
const NOT_FAVOURITE_MARK: &str = "\u{2661}";

/// Inputs for one card.
#[derive(Debug, Clone, Copy)]
pub struct CardProps<'a> {
    pub entry: &'a Entry,
    pub is_favourite: bool,
}

impl<'a> CardProps<'a> {
    pub fn for_entry(entry: &'a Entry, catalog: &CatalogState) -> Self {
        Self {
            entry,
            is_favourite: catalog.is_favourite(entry),
        }
    }

    /// Change that adds this entry to the favourites.
    pub fn on_add(&self) -> FavouriteChange {
        FavouriteChange::Add(self.entry.clone())
    }

    /// Change that removes this entry from the favourites.
    pub fn on_remove(&self) -> FavouriteChange {
        FavouriteChange::Remove(self.entry.clone())
    }

    /// The change the card's button triggers in its current state.
    pub fn toggle(&self) -> FavouriteChange {
        if self.is_favourite {
            self.on_remove()
        } else {
            self.on_add()
        }
    }

    /// Apply [`CardProps::toggle`] to the catalog.
    pub fn toggle_favourite(&self, catalog: &mut CatalogState) {
        catalog.apply_favourite_change(self.toggle());
    }
}

/// Styles a card draws with, resolved once per frame.
#[derive(Debug, Clone, Copy)]
pub struct CardStyles {
    pub name: Style,
    pub ordinal: Style,
    pub border: Style,
    pub border_selected: Style,
    pub favourite: Style,
    pub not_favourite: Style,
}

impl CardStyles {
    pub fn from_app(app: &App) -> Self {
        Self {
            name: app.style("card_name"),
            ordinal: app.style("card_ordinal"),
            border: app.style("card_border"),
            border_selected: app.style("card_border_selected"),
            favourite: app.style("card_favourite"),
            not_favourite: app.style("card_not_favourite"),
        }
    }
}

/// Renders one entry as a bordered box: ordinal, name, favourite marker.
pub struct Card<'a> {
    pub props: CardProps<'a>,
    pub selected: bool,
    pub styles: CardStyles,
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }

        let border = if self.selected {
            self.styles.border_selected
        } else {
            self.styles.border
        };
        let block = Block::default().borders(Borders::ALL).border_style(border);
        let inner_width = usize::from(block.inner(area).width);

        let ordinal = match self.props.entry.ordinal() {
            Some(n) => format!("#{n:03}"),
            None => "#???".to_string(),
        };
        let name = strip_control_chars(&self.props.entry.name);
        let (mark, mark_style) = if self.props.is_favourite {
            (FAVOURITE_MARK, self.styles.favourite)
        } else {
            (NOT_FAVOURITE_MARK, self.styles.not_favourite)
        };

        let lines = vec![
            Line::from(Span::styled(center_in(&ordinal, inner_width), self.styles.ordinal)),
            Line::from(Span::styled(
                center_in(&capitalize(&name), inner_width),
                self.styles.name,
            )),
            Line::from(Span::styled(center_in(mark, inner_width), mark_style)),
        ];

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryFilterMode;
    use ratatui::style::Color;

    fn bulbasaur() -> Entry {
        Entry::new("bulbasaur", "https://pokeapi.co/api/v2/pokemon/1/")
    }

    fn plain_styles() -> CardStyles {
        CardStyles {
            name: Style::default(),
            ordinal: Style::default(),
            border: Style::default(),
            border_selected: Style::default().fg(Color::Cyan),
            favourite: Style::default(),
            not_favourite: Style::default(),
        }
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_props_bind_to_entry() {
        let entry = bulbasaur();
        let props = CardProps {
            entry: &entry,
            is_favourite: false,
        };
        assert_eq!(props.on_add(), FavouriteChange::Add(entry.clone()));
        assert_eq!(props.on_remove(), FavouriteChange::Remove(entry.clone()));
        assert_eq!(props.toggle(), FavouriteChange::Add(entry.clone()));
    }

    #[test]
    fn test_toggle_favourite_round_trip() {
        let entry = bulbasaur();
        let mut catalog = CatalogState::new(CategoryFilterMode::Highlight);
        catalog.finish_entries_load(Ok(vec![entry.clone()]));

        CardProps::for_entry(&entry, &catalog).toggle_favourite(&mut catalog);
        assert!(catalog.is_favourite(&entry));

        let props = CardProps::for_entry(&entry, &catalog);
        assert!(props.is_favourite);
        props.toggle_favourite(&mut catalog);
        assert!(catalog.favourites().is_empty());
    }

    #[test]
    fn test_card_renders_ordinal_name_and_mark() {
        let entry = bulbasaur();
        let card = Card {
            props: CardProps {
                entry: &entry,
                is_favourite: true,
            },
            selected: true,
            styles: plain_styles(),
        };
        let area = Rect::new(0, 0, 20, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        card.render(area, &mut buf);

        assert!(row(&buf, 1).contains("#001"));
        assert!(row(&buf, 2).contains("Bulbasaur"));
        assert!(row(&buf, 3).contains("Favourite"));
        assert_eq!(buf[(0, 0)].fg, Color::Cyan);
    }

    #[test]
    fn test_card_without_ordinal() {
        let entry = Entry::new("missingno", "not-a-url");
        let card = Card {
            props: CardProps {
                entry: &entry,
                is_favourite: false,
            },
            selected: false,
            styles: plain_styles(),
        };
        let area = Rect::new(0, 0, 20, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        card.render(area, &mut buf);
        assert!(row(&buf, 1).contains("#???"));
        assert!(!row(&buf, 3).contains("Favourite"));
    }
}

//! Cats view - the spy cat roster.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::models::SpyCat;

/// Selection state for the cats list. Rows are derived from the store
/// every frame; only the cursor lives here.
#[derive(Debug, Default)]
pub struct CatsView {
    pub selected: usize,
}

impl CatsView {
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = len - 1;
    }

    /// Keep the cursor in bounds after a refresh shrank the list.
    pub fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Render the roster.
    pub fn render(&self, frame: &mut Frame, area: Rect, cats: &[SpyCat], loading: bool) {
        if loading {
            let msg = Paragraph::new("Loading spy cats...")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Spy Cats "));
            frame.render_widget(msg, area);
            return;
        }

        if cats.is_empty() {
            let empty = Paragraph::new("No spy cats - press n to hire one")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Spy Cats "));
            frame.render_widget(empty, area);
            return;
        }

        let name_width = area.width.saturating_sub(50) as usize;

        let items: Vec<ListItem> = cats
            .iter()
            .enumerate()
            .map(|(idx, cat)| {
                let marker = if idx == self.selected { ">" } else { " " };
                let name = truncate(&cat.name, name_width.max(8));

                let line = Line::from(vec![
                    Span::raw(format!(" {} ", marker)),
                    Span::styled(format!("#{:<4}", cat.id), Style::default().fg(Color::Blue)),
                    Span::raw(format!(" {:<width$}", name, width = name_width.max(8))),
                    Span::styled(
                        format!(" {:<18}", truncate(&cat.breed, 18)),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(format!(" {:>9}", cat.display_experience())),
                    Span::styled(
                        format!(" {:>12}", cat.display_salary()),
                        Style::default().fg(Color::Green),
                    ),
                ]);

                let style = if idx == self.selected {
                    Style::default().bg(Color::DarkGray)
                } else {
                    Style::default()
                };
                ListItem::new(line).style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Spy Cats  (n:hire e:salary d:dismiss) "),
        );
        frame.render_widget(list, area);
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let cut: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

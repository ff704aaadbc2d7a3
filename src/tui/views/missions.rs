//! Missions view - missions with their targets as an indented tree.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::models::{Mission, Target};
use crate::tui::state::Store;

/// One selectable row in the flattened mission list: either a mission
/// header or one of its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Mission(usize),
    Target { mission: usize, target: usize },
}

/// Flatten missions into selectable rows: each mission header followed by
/// its targets, in server order.
pub fn build_rows(missions: &[Mission]) -> Vec<Row> {
    let mut rows = Vec::new();
    for (m_idx, mission) in missions.iter().enumerate() {
        rows.push(Row::Mission(m_idx));
        for t_idx in 0..mission.targets.len() {
            rows.push(Row::Target {
                mission: m_idx,
                target: t_idx,
            });
        }
    }
    rows
}

/// Edit/complete affordances exist only while both the target and its
/// parent mission are incomplete.
pub fn target_editable(mission: &Mission, target: &Target) -> bool {
    !mission.complete && !target.complete
}

/// Selection state for the missions list.
#[derive(Debug, Default)]
pub struct MissionsView {
    pub selected: usize,
}

impl MissionsView {
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

    pub fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// The row currently under the cursor, if any.
    pub fn selected_row(&self, missions: &[Mission]) -> Option<Row> {
        build_rows(missions).get(self.selected).copied()
    }

    /// Render missions and their targets.
    pub fn render(&self, frame: &mut Frame, area: Rect, store: &Store) {
        let missions = &store.missions;
        if missions.is_empty() {
            let empty = Paragraph::new("No missions - press n to plan one")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Missions "));
            frame.render_widget(empty, area);
            return;
        }

        let rows = build_rows(missions);
        let items: Vec<ListItem> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let marker = if idx == self.selected { ">" } else { " " };
                let line = match *row {
                    Row::Mission(m_idx) => {
                        let mission = &missions[m_idx];
                        let (state_label, state_color) = if mission.complete {
                            ("COMPLETE", Color::Green)
                        } else {
                            ("ACTIVE", Color::Yellow)
                        };
                        let mut spans = vec![
                            Span::raw(format!(" {} ", marker)),
                            Span::styled(
                                format!("Mission #{}", mission.id),
                                Style::default().add_modifier(Modifier::BOLD),
                            ),
                            Span::raw("  "),
                            Span::styled(state_label, Style::default().fg(state_color)),
                            Span::raw("  "),
                            Span::styled(
                                store.assignment_label(mission.cat_id),
                                Style::default().fg(Color::Cyan),
                            ),
                        ];
                        if mission.is_unassigned() {
                            spans.push(Span::styled(
                                "  a:assign",
                                Style::default().fg(Color::DarkGray),
                            ));
                        }
                        spans.push(Span::styled(
                            "  d:delete",
                            Style::default().fg(Color::DarkGray),
                        ));
                        Line::from(spans)
                    }
                    Row::Target { mission: m_idx, target: t_idx } => {
                        let mission = &missions[m_idx];
                        let target = &mission.targets[t_idx];
                        let mut spans = vec![
                            Span::raw(format!(" {}   - ", marker)),
                            Span::raw(target.name.clone()),
                            Span::styled(
                                format!(" ({})", target.country),
                                Style::default().fg(Color::Cyan),
                            ),
                        ];
                        if !target.notes.is_empty() {
                            spans.push(Span::styled(
                                format!("  {}", target.notes),
                                Style::default().fg(Color::DarkGray),
                            ));
                        }
                        if target.complete {
                            spans.push(Span::styled(
                                "  [done]",
                                Style::default().fg(Color::Green),
                            ));
                        } else if target_editable(mission, target) {
                            spans.push(Span::styled(
                                "  e:notes c:complete",
                                Style::default().fg(Color::DarkGray),
                            ));
                        }
                        Line::from(spans)
                    }
                };

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
                .title(" Missions  (n:new) "),
        );
        frame.render_widget(list, area);
    }
}

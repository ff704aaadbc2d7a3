//! Modal overlays: creation forms, in-place edits, pickers, confirmation.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::models::SpyCat;
use crate::tui::forms::{
    AssignPicker, CatDraft, CatField, DeleteKind, MissionDraft, NotesEdit, PendingDelete,
    SalaryEdit, TargetField, MAX_TARGETS, MIN_TARGETS,
};

/// Center a box of the given size inside `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// One labelled form field. Focused fields get a marker and a cursor.
fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let marker = if focused { ">" } else { " " };
    let value_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let display = if focused {
        format!("{}_", value)
    } else {
        value.to_string()
    };
    Line::from(vec![
        Span::raw(format!(" {} ", marker)),
        Span::styled(
            format!("{:<12}", label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(display, value_style),
    ])
}

fn hint_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(Color::DarkGray),
    ))
}

fn render_box(frame: &mut Frame, rect: Rect, title: &str, lines: Vec<Line<'static>>) {
    frame.render_widget(Clear, rect);
    let body = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title)),
    );
    frame.render_widget(body, rect);
}

/// Cat-creation form. The breed field is a selector while the catalog is
/// non-empty and a free-text input otherwise.
pub fn render_cat_form(frame: &mut Frame, area: Rect, draft: &CatDraft, breeds: &[String]) {
    let breed_value = if breeds.is_empty() {
        draft.breed_text.clone()
    } else {
        let chosen = breeds
            .get(draft.breed_choice)
            .map(String::as_str)
            .unwrap_or("");
        format!("< {} >", chosen)
    };

    let mut lines = vec![
        field_line("Name", &draft.name, draft.focus == CatField::Name),
        field_line(
            "Experience",
            &draft.experience,
            draft.focus == CatField::Experience,
        ),
    ];
    if breeds.is_empty() {
        lines.push(field_line(
            "Breed",
            &breed_value,
            draft.focus == CatField::Breed,
        ));
    } else {
        // Selector: left/right cycles, typing is ignored.
        let focused = draft.focus == CatField::Breed;
        let marker = if focused { ">" } else { " " };
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::raw(format!(" {} ", marker)),
            Span::styled("Breed", Style::default().fg(Color::DarkGray)),
            Span::raw("        "),
            Span::styled(breed_value, style),
        ]));
    }
    lines.push(field_line("Salary", &draft.salary, draft.focus == CatField::Salary));
    lines.push(Line::from(""));
    if breeds.is_empty() {
        lines.push(hint_line("Tab:next field  Enter:hire  Esc:cancel"));
    } else {
        lines.push(hint_line(
            "Tab:next field  Left/Right:breed  Enter:hire  Esc:cancel",
        ));
    }

    let rect = centered_rect(56, lines.len() as u16 + 2, area);
    render_box(frame, rect, "Hire Spy Cat", lines);
}

/// Mission-creation form with 1-3 target sub-drafts.
pub fn render_mission_form(frame: &mut Frame, area: Rect, draft: &MissionDraft) {
    let mut lines = Vec::new();
    for (idx, target) in draft.targets.iter().enumerate() {
        let focused_target = idx == draft.focus_target;
        lines.push(Line::from(Span::styled(
            format!(" Target {}/{}", idx + 1, draft.targets.len()),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(field_line(
            "Name",
            &target.name,
            focused_target && draft.focus_field == TargetField::Name,
        ));
        lines.push(field_line(
            "Country",
            &target.country,
            focused_target && draft.focus_field == TargetField::Country,
        ));
        lines.push(field_line(
            "Notes",
            &target.notes,
            focused_target && draft.focus_field == TargetField::Notes,
        ));
        lines.push(Line::from(""));
    }

    let mut hints = vec!["Tab:next field".to_string()];
    if draft.targets.len() < MAX_TARGETS {
        hints.push("Ctrl-n:add target".to_string());
    }
    if draft.targets.len() > MIN_TARGETS {
        hints.push("Ctrl-d:drop target".to_string());
    }
    hints.push("Enter:create".to_string());
    hints.push("Esc:cancel".to_string());
    lines.push(hint_line(&hints.join("  ")));

    let rect = centered_rect(60, lines.len() as u16 + 2, area);
    render_box(frame, rect, "New Mission", lines);
}

/// In-place salary edit for one cat.
pub fn render_salary_edit(frame: &mut Frame, area: Rect, edit: &SalaryEdit, cat_name: &str) {
    let lines = vec![
        field_line("New salary", &edit.buffer, true),
        Line::from(""),
        hint_line("Enter:save  Esc:cancel"),
    ];
    let rect = centered_rect(44, lines.len() as u16 + 2, area);
    render_box(frame, rect, &format!("Salary - {}", cat_name), lines);
}

/// In-place notes edit for one target.
pub fn render_notes_edit(frame: &mut Frame, area: Rect, edit: &NotesEdit) {
    let lines = vec![
        field_line("Notes", &edit.buffer, true),
        Line::from(""),
        hint_line("Enter:save  Esc:cancel"),
    ];
    let rect = centered_rect(56, lines.len() as u16 + 2, area);
    render_box(frame, rect, "Target Notes", lines);
}

/// Cat picker for assigning an unassigned mission.
pub fn render_assign_picker(frame: &mut Frame, area: Rect, picker: &AssignPicker, cats: &[SpyCat]) {
    let mut lines = Vec::new();
    if cats.is_empty() {
        lines.push(Line::from(Span::styled(
            " No spy cats available",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for (idx, cat) in cats.iter().enumerate() {
            let marker = if idx == picker.choice { ">" } else { " " };
            let style = if idx == picker.choice {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::raw(format!(" {} ", marker)),
                Span::styled(format!("#{:<4} {}", cat.id, cat.name), style),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(hint_line("Up/Down:choose  Enter:assign  Esc:cancel"));

    let rect = centered_rect(44, (lines.len() as u16 + 2).min(area.height), area);
    render_box(frame, rect, "Assign Cat", lines);
}

/// Delete confirmation prompt. Nothing is sent until confirmed.
pub fn render_confirm(frame: &mut Frame, area: Rect, pending: &PendingDelete) {
    let what = match pending.kind {
        DeleteKind::Cat => "spy cat",
        DeleteKind::Mission => "mission",
    };
    let lines = vec![
        Line::from(format!(" Delete {} {}?", what, pending.label)),
        Line::from(""),
        hint_line("y:confirm  n/Esc:keep"),
    ];
    let rect = centered_rect(48, lines.len() as u16 + 2, area);
    render_box(frame, rect, "Confirm Delete", lines);
}

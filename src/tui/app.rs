//! TUI application - event loop, key routing, and the mutation dispatcher.
//!
//! Control flow per mutation: key event -> local validation -> exactly one
//! HTTP request -> on success clear status, close the form, and re-fetch
//! the owning collection in full; on failure set the status slot and leave
//! local collections untouched. The loop awaits each dispatched operation
//! before polling the next key event, so a mutation can never be submitted
//! twice concurrently.

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::api::ApiClient;
use crate::cli::Cli;
use crate::models::{CatCreate, MissionCreate, TargetUpdate};

use super::forms::{CatField, DeleteKind};
use super::state::{Mode, Owner, StatusLevel, Store, Tab};
use super::views::{
    CatsView, MissionsView, Row, build_rows, render_assign_picker, render_cat_form,
    render_confirm, render_mission_form, render_notes_edit, render_salary_edit, target_editable,
};

const CATS_LOAD_ERROR: &str = "Could not load spy cats - is the backend running?";
const MISSIONS_LOAD_ERROR: &str = "Could not load missions - is the backend running?";
const BREEDS_WARNING: &str = "Breed catalog unavailable - enter breed manually";
const NO_CATS_TO_ASSIGN: &str = "No spy cats available to assign";

/// One mutation, fully validated, ready for its single HTTP request.
#[derive(Debug)]
enum Op {
    CreateCat(CatCreate),
    UpdateSalary { cat_id: i64, salary: f64 },
    DeleteCat(i64),
    CreateMission(MissionCreate),
    UpdateTarget { target_id: i64, update: TargetUpdate },
    AssignCat { mission_id: i64, cat_id: i64 },
    DeleteMission(i64),
}

/// TUI application state.
pub struct TuiApp {
    store: Store,
    api: ApiClient,
    cats_view: CatsView,
    missions_view: MissionsView,
    /// Mutation scheduled by the last key event; drained (and awaited)
    /// before the next event is polled.
    pending: Option<Op>,
    should_quit: bool,
}

impl TuiApp {
    pub fn new(api: ApiClient) -> Self {
        Self {
            store: Store::new(),
            api,
            cats_view: CatsView::default(),
            missions_view: MissionsView::default(),
            pending: None,
            should_quit: false,
        }
    }

    /// Initial load. The loading indicator gates only on the cats fetch;
    /// missions load afterwards without it. Breeds are fetched first so a
    /// backend load error is never masked by the breed warning.
    async fn initial_load(&mut self) {
        match self.api.list_breeds().await {
            Ok(breeds) => self.store.set_breeds(breeds),
            Err(e) => {
                tracing::warn!(error = %e, "breed catalog fetch failed");
                self.store.set_warning(BREEDS_WARNING);
            }
        }

        match self.api.list_cats().await {
            Ok(cats) => self.store.replace_cats(cats),
            Err(e) => {
                tracing::warn!(error = %e, "initial cats fetch failed");
                self.store.set_error(CATS_LOAD_ERROR);
            }
        }
        self.store.loading = false;

        match self.api.list_missions().await {
            Ok(missions) => self.store.replace_missions(missions),
            Err(e) => {
                tracing::warn!(error = %e, "initial missions fetch failed");
                self.store.set_error(MISSIONS_LOAD_ERROR);
            }
        }
    }

    /// Re-read the cat collection from the backend and replace it.
    async fn refresh_cats(&mut self) {
        match self.api.list_cats().await {
            Ok(cats) => {
                self.store.replace_cats(cats);
                self.cats_view.clamp(self.store.cats.len());
            }
            Err(e) => {
                tracing::warn!(error = %e, "cats refresh failed");
                self.store.set_error(CATS_LOAD_ERROR);
                self.store.cats_stale = false;
            }
        }
    }

    /// Re-read the mission collection from the backend and replace it.
    async fn refresh_missions(&mut self) {
        match self.api.list_missions().await {
            Ok(missions) => {
                self.store.replace_missions(missions);
                self.missions_view
                    .clamp(build_rows(&self.store.missions).len());
            }
            Err(e) => {
                tracing::warn!(error = %e, "missions refresh failed");
                self.store.set_error(MISSIONS_LOAD_ERROR);
                self.store.missions_stale = false;
            }
        }
    }

    /// Perform one validated mutation: a single request, then the shared
    /// success/failure protocol.
    async fn dispatch(&mut self, op: Op) {
        let result = match &op {
            Op::CreateCat(payload) => self.api.create_cat(payload).await.map(|_| Owner::Cats),
            Op::UpdateSalary { cat_id, salary } => self
                .api
                .update_salary(*cat_id, *salary)
                .await
                .map(|_| Owner::Cats),
            Op::DeleteCat(id) => self.api.delete_cat(*id).await.map(|_| Owner::Cats),
            Op::CreateMission(payload) => self
                .api
                .create_mission(payload)
                .await
                .map(|_| Owner::Missions),
            Op::UpdateTarget { target_id, update } => self
                .api
                .update_target(*target_id, update)
                .await
                .map(|_| Owner::Missions),
            Op::AssignCat { mission_id, cat_id } => self
                .api
                .assign_cat(*mission_id, *cat_id)
                .await
                .map(|_| Owner::Missions),
            Op::DeleteMission(id) => self.api.delete_mission(*id).await.map(|_| Owner::Missions),
        };

        match result {
            Ok(owner) => self.store.mutation_succeeded(owner),
            Err(e) => self.store.mutation_failed(e.to_string()),
        }
    }

    /// Route a key event according to the current modal mode.
    fn handle_key(&mut self, key: KeyEvent) {
        match std::mem::take(&mut self.store.mode) {
            Mode::Browse => self.handle_browse_key(key),
            Mode::CatForm(draft) => self.handle_cat_form_key(key, draft),
            Mode::MissionForm(draft) => self.handle_mission_form_key(key, draft),
            Mode::SalaryEdit(edit) => self.handle_salary_edit_key(key, edit),
            Mode::NotesEdit(edit) => self.handle_notes_edit_key(key, edit),
            Mode::AssignPicker(picker) => self.handle_assign_picker_key(key, picker),
            Mode::ConfirmDelete(pending) => self.handle_confirm_key(key, pending),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.store.next_tab(),
            KeyCode::Char('1') => self.store.active_tab = Tab::Cats,
            KeyCode::Char('2') => self.store.active_tab = Tab::Missions,
            KeyCode::Char('r') => {
                self.store.cats_stale = true;
                self.store.missions_stale = true;
            }
            KeyCode::Char('j') | KeyCode::Down => match self.store.active_tab {
                Tab::Cats => self.cats_view.select_next(self.store.cats.len()),
                Tab::Missions => self
                    .missions_view
                    .select_next(build_rows(&self.store.missions).len()),
            },
            KeyCode::Char('k') | KeyCode::Up => match self.store.active_tab {
                Tab::Cats => self.cats_view.select_previous(),
                Tab::Missions => self.missions_view.select_previous(),
            },
            KeyCode::Char('g') | KeyCode::Home => match self.store.active_tab {
                Tab::Cats => self.cats_view.select_first(),
                Tab::Missions => self.missions_view.select_first(),
            },
            KeyCode::Char('G') | KeyCode::End => match self.store.active_tab {
                Tab::Cats => self.cats_view.select_last(self.store.cats.len()),
                Tab::Missions => self
                    .missions_view
                    .select_last(build_rows(&self.store.missions).len()),
            },
            KeyCode::Char('n') => match self.store.active_tab {
                Tab::Cats => self.store.open_cat_form(),
                Tab::Missions => self.store.open_mission_form(),
            },
            KeyCode::Char('e') => match self.store.active_tab {
                Tab::Cats => {
                    let cat = self.store.cats.get(self.cats_view.selected).cloned();
                    if let Some(cat) = cat {
                        self.store.open_salary_edit(&cat);
                    }
                }
                Tab::Missions => self.edit_selected_target_notes(),
            },
            KeyCode::Char('c') => {
                if self.store.active_tab == Tab::Missions {
                    self.complete_selected_target();
                }
            }
            KeyCode::Char('a') => {
                if self.store.active_tab == Tab::Missions {
                    self.assign_selected_mission();
                }
            }
            KeyCode::Char('d') => match self.store.active_tab {
                Tab::Cats => {
                    let picked = self
                        .store
                        .cats
                        .get(self.cats_view.selected)
                        .map(|c| (c.id, c.name.clone()));
                    if let Some((id, name)) = picked {
                        self.store
                            .request_delete(DeleteKind::Cat, id, format!("\"{}\"", name));
                    }
                }
                Tab::Missions => {
                    let picked = match self.missions_view.selected_row(&self.store.missions) {
                        Some(Row::Mission(m_idx)) => {
                            self.store.missions.get(m_idx).map(|m| m.id)
                        }
                        _ => None,
                    };
                    if let Some(id) = picked {
                        self.store
                            .request_delete(DeleteKind::Mission, id, format!("#{}", id));
                    }
                }
            },
            _ => {}
        }
    }

    /// Open the notes edit for the selected target row, if its affordance
    /// is active (both target and parent mission incomplete).
    fn edit_selected_target_notes(&mut self) {
        let picked = match self.missions_view.selected_row(&self.store.missions) {
            Some(Row::Target { mission, target }) => {
                let m = &self.store.missions[mission];
                let t = &m.targets[target];
                target_editable(m, t).then(|| (t.id, t.notes.clone()))
            }
            _ => None,
        };
        if let Some((target_id, notes)) = picked {
            self.store.open_notes_edit(target_id, &notes);
        }
    }

    /// Mark the selected target complete. No validation; the affordance
    /// only exists while target and mission are both incomplete.
    fn complete_selected_target(&mut self) {
        let picked = match self.missions_view.selected_row(&self.store.missions) {
            Some(Row::Target { mission, target }) => {
                let m = &self.store.missions[mission];
                let t = &m.targets[target];
                target_editable(m, t).then_some(t.id)
            }
            _ => None,
        };
        if let Some(target_id) = picked {
            self.pending = Some(Op::UpdateTarget {
                target_id,
                update: TargetUpdate {
                    notes: None,
                    complete: Some(true),
                },
            });
        }
    }

    /// Open the assignment picker for the selected mission row; only
    /// unassigned missions expose the affordance.
    fn assign_selected_mission(&mut self) {
        let picked = match self.missions_view.selected_row(&self.store.missions) {
            Some(Row::Mission(m_idx)) => {
                let m = &self.store.missions[m_idx];
                m.is_unassigned().then_some(m.id)
            }
            _ => None,
        };
        if let Some(mission_id) = picked {
            self.store.open_assign_picker(mission_id);
        }
    }

    fn handle_cat_form_key(&mut self, key: KeyEvent, mut draft: super::forms::CatDraft) {
        let breed_is_selector =
            !self.store.breeds.is_empty() && draft.focus == CatField::Breed;
        match key.code {
            KeyCode::Esc => return, // discard draft
            KeyCode::Enter => match draft.validate(&self.store.breeds) {
                Ok(payload) => self.pending = Some(Op::CreateCat(payload)),
                Err(msg) => self.store.set_error(msg),
            },
            KeyCode::Tab | KeyCode::Down => draft.focus_next(),
            KeyCode::BackTab | KeyCode::Up => draft.focus_prev(),
            KeyCode::Left if breed_is_selector => {
                draft.cycle_breed(&self.store.breeds, false);
            }
            KeyCode::Right if breed_is_selector => {
                draft.cycle_breed(&self.store.breeds, true);
            }
            KeyCode::Char(c) if !breed_is_selector => draft.field_mut().push(c),
            KeyCode::Backspace if !breed_is_selector => {
                draft.field_mut().pop();
            }
            _ => {}
        }
        self.store.mode = Mode::CatForm(draft);
    }

    fn handle_mission_form_key(&mut self, key: KeyEvent, mut draft: super::forms::MissionDraft) {
        match key.code {
            KeyCode::Esc => return, // discard draft
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                draft.add_target();
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                draft.remove_target();
            }
            KeyCode::Enter => match draft.validate() {
                Ok(payload) => self.pending = Some(Op::CreateMission(payload)),
                Err(msg) => self.store.set_error(msg),
            },
            KeyCode::Tab | KeyCode::Down => draft.focus_next(),
            KeyCode::BackTab | KeyCode::Up => draft.focus_prev(),
            KeyCode::Char(c) => draft.field_mut().push(c),
            KeyCode::Backspace => {
                draft.field_mut().pop();
            }
            _ => {}
        }
        self.store.mode = Mode::MissionForm(draft);
    }

    fn handle_salary_edit_key(&mut self, key: KeyEvent, mut edit: super::forms::SalaryEdit) {
        match key.code {
            KeyCode::Esc => return, // discard edit
            KeyCode::Enter => match edit.validate() {
                Ok(salary) => {
                    self.pending = Some(Op::UpdateSalary {
                        cat_id: edit.cat_id,
                        salary,
                    })
                }
                Err(msg) => self.store.set_error(msg),
            },
            KeyCode::Char(c) => edit.buffer.push(c),
            KeyCode::Backspace => {
                edit.buffer.pop();
            }
            _ => {}
        }
        self.store.mode = Mode::SalaryEdit(edit);
    }

    fn handle_notes_edit_key(&mut self, key: KeyEvent, mut edit: super::forms::NotesEdit) {
        match key.code {
            KeyCode::Esc => return, // discard edit
            KeyCode::Enter => {
                // Notes are accepted as-is; no client-side validation.
                self.pending = Some(Op::UpdateTarget {
                    target_id: edit.target_id,
                    update: TargetUpdate {
                        notes: Some(edit.buffer.clone()),
                        complete: None,
                    },
                });
            }
            KeyCode::Char(c) => edit.buffer.push(c),
            KeyCode::Backspace => {
                edit.buffer.pop();
            }
            _ => {}
        }
        self.store.mode = Mode::NotesEdit(edit);
    }

    fn handle_assign_picker_key(&mut self, key: KeyEvent, mut picker: super::forms::AssignPicker) {
        let cat_count = self.store.cats.len();
        match key.code {
            KeyCode::Esc => return, // discard picker
            KeyCode::Down | KeyCode::Char('j') => {
                if cat_count > 0 {
                    picker.choice = (picker.choice + 1) % cat_count;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if cat_count > 0 {
                    picker.choice = (picker.choice + cat_count - 1) % cat_count;
                }
            }
            KeyCode::Enter => match self.store.cats.get(picker.choice) {
                Some(cat) => {
                    self.pending = Some(Op::AssignCat {
                        mission_id: picker.mission_id,
                        cat_id: cat.id,
                    });
                }
                None => self.store.set_error(NO_CATS_TO_ASSIGN),
            },
            _ => {}
        }
        self.store.mode = Mode::AssignPicker(picker);
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, pending: super::forms::PendingDelete) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.pending = Some(match pending.kind {
                    DeleteKind::Cat => Op::DeleteCat(pending.id),
                    DeleteKind::Mission => Op::DeleteMission(pending.id),
                });
                // Dialog closes; mode stays Browse.
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                // Declined: no request is sent.
            }
            _ => self.store.mode = Mode::ConfirmDelete(pending),
        }
    }

    /// Render the whole frame from current state.
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title bar
                Constraint::Min(5),    // Main content
                Constraint::Length(3), // Status bar
            ])
            .split(frame.area());

        self.render_title_bar(frame, chunks[0]);

        match self.store.active_tab {
            Tab::Cats => {
                self.cats_view
                    .render(frame, chunks[1], &self.store.cats, self.store.loading)
            }
            Tab::Missions => self.missions_view.render(frame, chunks[1], &self.store),
        }

        self.render_status_bar(frame, chunks[2]);

        match &self.store.mode {
            Mode::Browse => {}
            Mode::CatForm(draft) => {
                render_cat_form(frame, chunks[1], draft, &self.store.breeds)
            }
            Mode::MissionForm(draft) => render_mission_form(frame, chunks[1], draft),
            Mode::SalaryEdit(edit) => {
                let name = self
                    .store
                    .cat_by_id(edit.cat_id)
                    .map(|c| c.name.as_str())
                    .unwrap_or("?");
                render_salary_edit(frame, chunks[1], edit, name);
            }
            Mode::NotesEdit(edit) => render_notes_edit(frame, chunks[1], edit),
            Mode::AssignPicker(picker) => {
                render_assign_picker(frame, chunks[1], picker, &self.store.cats)
            }
            Mode::ConfirmDelete(pending) => render_confirm(frame, chunks[1], pending),
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let cats_label = format!("[1] Spy Cats ({})", self.store.cats.len());
        let missions_label = format!("[2] Missions ({})", self.store.missions.len());

        let active_style = Style::default().add_modifier(Modifier::BOLD);
        let inactive_style = Style::default().fg(Color::DarkGray);
        let (cats_style, missions_style) = match self.store.active_tab {
            Tab::Cats => (active_style, inactive_style),
            Tab::Missions => (inactive_style, active_style),
        };

        let right = if self.store.loading {
            "Loading...".to_string()
        } else {
            String::new()
        };
        let used = cats_label.len() + missions_label.len() + right.len() + 7;
        let padding = area.width.saturating_sub(used as u16);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(format!(" {}", cats_label), cats_style),
            Span::raw(" | "),
            Span::styled(missions_label, missions_style),
            Span::raw(" ".repeat(padding as usize)),
            Span::styled(right, Style::default().fg(Color::Yellow)),
        ]))
        .block(Block::default().borders(Borders::ALL));

        frame.render_widget(title, area);
    }

    /// Bottom bar: the status slot when set, else the keybinding help.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let bar = match &self.store.status {
            Some(status) => {
                let color = match status.level {
                    StatusLevel::Error => Color::Red,
                    StatusLevel::Warning => Color::Yellow,
                };
                Paragraph::new(format!(" {}", status.text))
                    .style(Style::default().fg(color))
                    .block(Block::default().borders(Borders::ALL))
            }
            None => Paragraph::new(
                " Tab/1/2:Switch Tab  j/k:Navigate  n:New  e:Edit  d:Delete  r:Refresh  q:Quit",
            )
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL)),
        };
        frame.render_widget(bar, area);
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> crate::Result<()> {
        // Show the loading frame, then run the initial fetches.
        terminal.draw(|f| self.render(f))?;
        self.initial_load().await;

        loop {
            // Drain scheduled work before drawing: the pending mutation
            // first, then any re-fetch it marked.
            if let Some(op) = self.pending.take() {
                self.dispatch(op).await;
            }
            if self.store.cats_stale {
                self.refresh_cats().await;
            }
            if self.store.missions_stale {
                self.refresh_missions().await;
            }

            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }
}

/// Setup the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the console against the backend configured by `cli`.
///
/// # Errors
/// Returns an error if the terminal cannot be set up or restored. Backend
/// failures never end the process; they surface in the status slot.
pub async fn run(cli: &Cli) -> crate::Result<()> {
    let api = ApiClient::new(cli.base_url(), cli.breed_api.clone());
    let mut app = TuiApp::new(api);

    let mut terminal = setup_terminal()?;
    let result = app.event_loop(&mut terminal).await;
    restore_terminal()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DEFAULT_BREED_API;
    use crate::models::{Mission, SpyCat, Target};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_data() -> TuiApp {
        let api = ApiClient::new("http://localhost:8000", DEFAULT_BREED_API);
        let mut app = TuiApp::new(api);
        app.store.loading = false;
        app.store.replace_cats(vec![SpyCat {
            id: 1,
            name: "Tom".to_string(),
            years_of_experience: 5,
            breed: "Siamese".to_string(),
            salary: 50000.0,
        }]);
        app.store.replace_missions(vec![Mission {
            id: 7,
            cat_id: None,
            complete: false,
            targets: vec![Target {
                id: 70,
                mission_id: 7,
                name: "Jerry".to_string(),
                country: "US".to_string(),
                notes: String::new(),
                complete: false,
            }],
        }]);
        app
    }

    #[test]
    fn test_invalid_cat_draft_schedules_no_request() {
        let mut app = app_with_data();
        app.store.open_cat_form();
        // Empty draft: submit must set the status slot and schedule nothing.
        app.handle_key(key(KeyCode::Enter));
        assert!(app.pending.is_none());
        assert_eq!(app.store.status.as_ref().unwrap().text, "Name is required");
        assert!(matches!(app.store.mode, Mode::CatForm(_)));
    }

    #[test]
    fn test_valid_cat_draft_schedules_create() {
        let mut app = app_with_data();
        app.store.open_cat_form();
        for c in "Tom".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('5')));
        app.handle_key(key(KeyCode::Tab));
        for c in "Siamese".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Tab));
        for c in "50000".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        match app.pending {
            Some(Op::CreateCat(ref payload)) => {
                assert_eq!(payload.name, "Tom");
                assert_eq!(payload.years_of_experience, 5);
                assert_eq!(payload.breed, "Siamese");
                assert_eq!(payload.salary, 50000.0);
            }
            ref other => panic!("expected CreateCat, got {:?}", other),
        }
    }

    #[test]
    fn test_declined_confirmation_sends_nothing() {
        let mut app = app_with_data();
        app.handle_key(key(KeyCode::Char('d')));
        assert!(matches!(app.store.mode, Mode::ConfirmDelete(_)));

        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.pending.is_none());
        assert!(matches!(app.store.mode, Mode::Browse));
    }

    #[test]
    fn test_confirmed_delete_schedules_request() {
        let mut app = app_with_data();
        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Char('y')));
        assert!(matches!(app.pending, Some(Op::DeleteCat(1))));
    }

    #[test]
    fn test_assign_picker_schedules_assignment() {
        let mut app = app_with_data();
        app.store.active_tab = Tab::Missions;
        // Selected row 0 is the mission header; it is unassigned.
        app.handle_key(key(KeyCode::Char('a')));
        assert!(matches!(app.store.mode, Mode::AssignPicker(_)));

        app.handle_key(key(KeyCode::Enter));
        match app.pending {
            Some(Op::AssignCat {
                mission_id: 7,
                cat_id: 1,
            }) => {}
            ref other => panic!("expected AssignCat, got {:?}", other),
        }
    }

    #[test]
    fn test_assign_hidden_for_assigned_mission() {
        let mut app = app_with_data();
        app.store.missions[0].cat_id = Some(1);
        app.store.active_tab = Tab::Missions;
        app.handle_key(key(KeyCode::Char('a')));
        assert!(matches!(app.store.mode, Mode::Browse));
        assert!(app.pending.is_none());
    }

    #[test]
    fn test_complete_target_schedules_set_true_only() {
        let mut app = app_with_data();
        app.store.active_tab = Tab::Missions;
        app.handle_key(key(KeyCode::Char('j'))); // move onto the target row
        app.handle_key(key(KeyCode::Char('c')));
        match app.pending {
            Some(Op::UpdateTarget {
                target_id: 70,
                ref update,
            }) => {
                assert_eq!(update.complete, Some(true));
                assert_eq!(update.notes, None);
            }
            ref other => panic!("expected UpdateTarget, got {:?}", other),
        }
    }

    #[test]
    fn test_complete_target_noop_when_mission_complete() {
        let mut app = app_with_data();
        app.store.missions[0].complete = true;
        app.store.active_tab = Tab::Missions;
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Char('c')));
        assert!(app.pending.is_none());
    }

    #[test]
    fn test_salary_edit_rejects_negative() {
        let mut app = app_with_data();
        app.handle_key(key(KeyCode::Char('e')));
        assert!(matches!(app.store.mode, Mode::SalaryEdit(_)));

        // Prefilled "50000"; replace with "-1".
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Backspace));
        }
        app.handle_key(key(KeyCode::Char('-')));
        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Enter));

        assert!(app.pending.is_none());
        assert_eq!(
            app.store.status.as_ref().unwrap().text,
            "Salary must be a non-negative number"
        );
    }

    #[test]
    fn test_mission_form_target_bounds_are_noops() {
        let mut app = app_with_data();
        app.store.active_tab = Tab::Missions;
        app.handle_key(key(KeyCode::Char('n')));

        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        app.handle_key(ctrl('n'));
        app.handle_key(ctrl('n'));
        app.handle_key(ctrl('n')); // fourth target: no-op
        match &app.store.mode {
            Mode::MissionForm(draft) => assert_eq!(draft.targets.len(), 3),
            other => panic!("expected mission form, got {:?}", other),
        }

        app.handle_key(ctrl('d'));
        app.handle_key(ctrl('d'));
        app.handle_key(ctrl('d')); // last target: no-op
        match &app.store.mode {
            Mode::MissionForm(draft) => assert_eq!(draft.targets.len(), 1),
            other => panic!("expected mission form, got {:?}", other),
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_with_data();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}

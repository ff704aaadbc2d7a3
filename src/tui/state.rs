//! Local state store for the console.
//!
//! The store is the single place UI state lives: the two cached
//! collections, the breed reference list, the active tab, the modal mode
//! (at most one open form or in-place edit), and the status slot. Every
//! mutation is a named method; the render layer only reads.
//!
//! Consistency contract: collections are only ever replaced wholesale with
//! a fresh server response (write, then re-read the owning collection).
//! Nothing here patches a collection in place.

use crate::models::{Mission, SpyCat};

use super::forms::{
    AssignPicker, CatDraft, DeleteKind, MissionDraft, NotesEdit, PendingDelete, SalaryEdit,
};

/// Which collection a tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Cats,
    Missions,
}

/// Severity of the status slot. Errors block nothing but demand attention;
/// warnings mark a degraded feature (e.g. breed catalog unreachable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Warning,
    Error,
}

/// The single shared location for the most recent user-visible message.
/// Newest replaces previous; there is no accumulation.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

/// The current modal state. `Browse` is plain list navigation; every other
/// variant owns the draft it edits, so dropping the mode discards the
/// draft. Holding the edits inside a single enum is what guarantees "at
/// most one open edit per entity kind": opening a new one overwrites the
/// old, unsaved one.
#[derive(Debug, Clone, Default)]
pub enum Mode {
    #[default]
    Browse,
    CatForm(CatDraft),
    MissionForm(MissionDraft),
    SalaryEdit(SalaryEdit),
    NotesEdit(NotesEdit),
    AssignPicker(AssignPicker),
    ConfirmDelete(PendingDelete),
}

/// Which collection a successful mutation invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Cats,
    Missions,
}

/// Local state store; see module docs.
#[derive(Debug, Default)]
pub struct Store {
    pub cats: Vec<SpyCat>,
    pub missions: Vec<Mission>,
    /// Breed names from the reference service; empty list means the cat
    /// form falls back to free-text breed entry.
    pub breeds: Vec<String>,
    pub active_tab: Tab,
    pub status: Option<StatusMessage>,
    /// True only while the initial cats fetch is outstanding. The missions
    /// fetch deliberately does not gate this flag.
    pub loading: bool,
    pub mode: Mode,
    /// Set after a successful cat mutation; drained by the event loop
    /// with a full re-fetch.
    pub cats_stale: bool,
    /// Set after a successful mission/target/assignment mutation.
    pub missions_stale: bool,
}

impl Default for Tab {
    fn default() -> Self {
        Tab::Cats
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }

    /// Replace the cat collection with a fresh server response.
    pub fn replace_cats(&mut self, cats: Vec<SpyCat>) {
        self.cats = cats;
        self.cats_stale = false;
    }

    /// Replace the mission collection with a fresh server response.
    pub fn replace_missions(&mut self, missions: Vec<Mission>) {
        self.missions = missions;
        self.missions_stale = false;
    }

    pub fn set_breeds(&mut self, breeds: Vec<String>) {
        self.breeds = breeds;
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level: StatusLevel::Error,
            text: text.into(),
        });
    }

    pub fn set_warning(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level: StatusLevel::Warning,
            text: text.into(),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn next_tab(&mut self) {
        self.active_tab = match self.active_tab {
            Tab::Cats => Tab::Missions,
            Tab::Missions => Tab::Cats,
        };
    }

    pub fn open_cat_form(&mut self) {
        self.mode = Mode::CatForm(CatDraft::new());
    }

    pub fn open_mission_form(&mut self) {
        self.mode = Mode::MissionForm(MissionDraft::new());
    }

    /// Open the salary edit for one cat, prefilled with its current
    /// salary. Any other unsaved salary edit is discarded.
    pub fn open_salary_edit(&mut self, cat: &SpyCat) {
        self.mode = Mode::SalaryEdit(SalaryEdit {
            cat_id: cat.id,
            buffer: plain_number(cat.salary),
        });
    }

    /// Open the notes edit for one target, prefilled with its current
    /// notes. Any other unsaved notes edit is discarded.
    pub fn open_notes_edit(&mut self, target_id: i64, current_notes: &str) {
        self.mode = Mode::NotesEdit(NotesEdit {
            target_id,
            buffer: current_notes.to_string(),
        });
    }

    pub fn open_assign_picker(&mut self, mission_id: i64) {
        self.mode = Mode::AssignPicker(AssignPicker {
            mission_id,
            choice: 0,
        });
    }

    pub fn request_delete(&mut self, kind: DeleteKind, id: i64, label: impl Into<String>) {
        self.mode = Mode::ConfirmDelete(PendingDelete {
            kind,
            id,
            label: label.into(),
        });
    }

    /// Close whatever modal is open, discarding its draft.
    pub fn close_modal(&mut self) {
        self.mode = Mode::Browse;
    }

    /// Postcondition of every successful mutation: status cleared, modal
    /// closed (draft reset to its empty shape by being dropped), owning
    /// collection marked stale for a full re-fetch.
    pub fn mutation_succeeded(&mut self, owner: Owner) {
        self.clear_status();
        self.mode = Mode::Browse;
        match owner {
            Owner::Cats => self.cats_stale = true,
            Owner::Missions => self.missions_stale = true,
        }
    }

    /// Postcondition of every failed mutation: status set, collections and
    /// open form untouched so the user can correct and resubmit.
    pub fn mutation_failed(&mut self, message: impl Into<String>) {
        self.set_error(message);
    }

    /// Resolve a mission's assignment for display. `None` (unassigned) and
    /// an id with no match in the cached cat list are two different states
    /// and render as two different labels.
    pub fn assignment_label(&self, cat_id: Option<i64>) -> String {
        match cat_id {
            None => "(unassigned)".to_string(),
            Some(id) => match self.cats.iter().find(|c| c.id == id) {
                Some(cat) => cat.name.clone(),
                None => format!("(unknown cat #{})", id),
            },
        }
    }

    pub fn cat_by_id(&self, id: i64) -> Option<&SpyCat> {
        self.cats.iter().find(|c| c.id == id)
    }
}

/// Render a salary for a text buffer prefill: `50000`, not `$50,000`.
fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Target;

    fn cat(id: i64, name: &str) -> SpyCat {
        SpyCat {
            id,
            name: name.to_string(),
            years_of_experience: 5,
            breed: "Siamese".to_string(),
            salary: 50000.0,
        }
    }

    fn mission(id: i64, cat_id: Option<i64>) -> Mission {
        Mission {
            id,
            cat_id,
            complete: false,
            targets: vec![Target {
                id: id * 10,
                mission_id: id,
                name: "Jerry".to_string(),
                country: "US".to_string(),
                notes: String::new(),
                complete: false,
            }],
        }
    }

    #[test]
    fn test_status_slot_replaces_not_accumulates() {
        let mut store = Store::new();
        store.set_error("first");
        store.set_error("second");
        let status = store.status.as_ref().unwrap();
        assert_eq!(status.text, "second");
        assert_eq!(status.level, StatusLevel::Error);

        store.set_warning("degraded");
        let status = store.status.as_ref().unwrap();
        assert_eq!(status.level, StatusLevel::Warning);
        assert_eq!(status.text, "degraded");
    }

    #[test]
    fn test_replace_is_exact_no_stale_merge() {
        let mut store = Store::new();
        store.replace_cats(vec![cat(1, "Tom"), cat(2, "Felix")]);
        let fresh = vec![cat(2, "Felix")];
        store.replace_cats(fresh.clone());
        assert_eq!(store.cats, fresh);

        store.replace_missions(vec![mission(7, None)]);
        let fresh = vec![mission(7, Some(2)), mission(8, None)];
        store.replace_missions(fresh.clone());
        assert_eq!(store.missions, fresh);
    }

    #[test]
    fn test_mutation_succeeded_resets_everything() {
        let mut store = Store::new();
        store.open_cat_form();
        store.set_error("Name is required");

        store.mutation_succeeded(Owner::Cats);
        assert!(store.status.is_none());
        assert!(matches!(store.mode, Mode::Browse));
        assert!(store.cats_stale);
        assert!(!store.missions_stale);

        store.mutation_succeeded(Owner::Missions);
        assert!(store.missions_stale);
    }

    #[test]
    fn test_mutation_failed_keeps_form_open() {
        let mut store = Store::new();
        store.open_cat_form();
        store.mutation_failed("Invalid cat breed");
        assert!(matches!(store.mode, Mode::CatForm(_)));
        assert_eq!(store.status.as_ref().unwrap().text, "Invalid cat breed");
    }

    #[test]
    fn test_one_salary_edit_at_a_time() {
        let mut store = Store::new();
        let tom = cat(1, "Tom");
        let felix = cat(2, "Felix");
        store.replace_cats(vec![tom.clone(), felix.clone()]);

        store.open_salary_edit(&tom);
        store.open_salary_edit(&felix);
        match &store.mode {
            Mode::SalaryEdit(edit) => {
                assert_eq!(edit.cat_id, 2);
                assert_eq!(edit.buffer, "50000");
            }
            other => panic!("expected salary edit, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_label_three_states() {
        let mut store = Store::new();
        store.replace_cats(vec![cat(2, "Felix")]);

        assert_eq!(store.assignment_label(None), "(unassigned)");
        assert_eq!(store.assignment_label(Some(2)), "Felix");
        assert_eq!(store.assignment_label(Some(9)), "(unknown cat #9)");
    }

    #[test]
    fn test_new_store_is_loading_and_empty() {
        let store = Store::new();
        assert!(store.loading);
        assert!(store.cats.is_empty());
        assert!(store.missions.is_empty());
        assert!(store.breeds.is_empty());
        assert!(store.status.is_none());
        assert_eq!(store.active_tab, Tab::Cats);
    }
}

//! Form drafts - transient local state later converted into request payloads.
//!
//! Drafts are edited through plain text buffers; `validate` turns a draft
//! into an exact payload or a user-facing message. Validation never touches
//! the network: a draft that fails produces no payload at all.

use crate::models::{CatCreate, MissionCreate, TargetCreate};

/// A mission draft never holds fewer targets than this.
pub const MIN_TARGETS: usize = 1;
/// A mission draft never holds more targets than this.
pub const MAX_TARGETS: usize = 3;

/// Focusable fields of the cat-creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatField {
    Name,
    Experience,
    Breed,
    Salary,
}

/// Draft for creating a spy cat.
#[derive(Debug, Clone)]
pub struct CatDraft {
    pub name: String,
    pub experience: String,
    /// Free-text breed entry, used only when the breed catalog is empty.
    pub breed_text: String,
    /// Index into the breed catalog, used when it is non-empty.
    pub breed_choice: usize,
    pub salary: String,
    pub focus: CatField,
}

impl Default for CatDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl CatDraft {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            experience: String::new(),
            breed_text: String::new(),
            breed_choice: 0,
            salary: String::new(),
            focus: CatField::Name,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            CatField::Name => CatField::Experience,
            CatField::Experience => CatField::Breed,
            CatField::Breed => CatField::Salary,
            CatField::Salary => CatField::Name,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            CatField::Name => CatField::Salary,
            CatField::Experience => CatField::Name,
            CatField::Breed => CatField::Experience,
            CatField::Salary => CatField::Breed,
        };
    }

    /// Text buffer for the focused field. The breed buffer is only edited
    /// in free-text mode; with a catalog present the app cycles
    /// `breed_choice` instead.
    pub fn field_mut(&mut self) -> &mut String {
        match self.focus {
            CatField::Name => &mut self.name,
            CatField::Experience => &mut self.experience,
            CatField::Breed => &mut self.breed_text,
            CatField::Salary => &mut self.salary,
        }
    }

    /// Cycle the breed selection forward or backward through the catalog.
    pub fn cycle_breed(&mut self, breeds: &[String], forward: bool) {
        if breeds.is_empty() {
            return;
        }
        self.breed_choice = if forward {
            (self.breed_choice + 1) % breeds.len()
        } else {
            (self.breed_choice + breeds.len() - 1) % breeds.len()
        };
    }

    /// Convert the draft into a creation payload, or explain why not.
    pub fn validate(&self, breeds: &[String]) -> Result<CatCreate, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }

        let breed = if breeds.is_empty() {
            self.breed_text.trim().to_string()
        } else {
            breeds.get(self.breed_choice).cloned().unwrap_or_default()
        };
        if breed.is_empty() {
            return Err("Breed is required".to_string());
        }

        let years_of_experience = self
            .experience
            .trim()
            .parse::<u32>()
            .map_err(|_| "Years of experience must be a non-negative whole number".to_string())?;

        let salary = self
            .salary
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite() && *s >= 0.0)
            .ok_or_else(|| "Salary must be a non-negative number".to_string())?;

        Ok(CatCreate {
            name: name.to_string(),
            years_of_experience,
            breed,
            salary,
        })
    }
}

/// Focusable fields of one target sub-draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetField {
    Name,
    Country,
    Notes,
}

/// One target entry in a mission draft.
#[derive(Debug, Clone, Default)]
pub struct TargetDraft {
    pub name: String,
    pub country: String,
    pub notes: String,
}

/// Draft for creating a mission with its targets.
#[derive(Debug, Clone)]
pub struct MissionDraft {
    pub targets: Vec<TargetDraft>,
    pub focus_target: usize,
    pub focus_field: TargetField,
}

impl Default for MissionDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl MissionDraft {
    pub fn new() -> Self {
        Self {
            targets: vec![TargetDraft::default()],
            focus_target: 0,
            focus_field: TargetField::Name,
        }
    }

    /// Append an empty target and focus it. No-op at the upper bound.
    pub fn add_target(&mut self) {
        if self.targets.len() >= MAX_TARGETS {
            return;
        }
        self.targets.push(TargetDraft::default());
        self.focus_target = self.targets.len() - 1;
        self.focus_field = TargetField::Name;
    }

    /// Remove the focused target. No-op at the lower bound.
    pub fn remove_target(&mut self) {
        if self.targets.len() <= MIN_TARGETS {
            return;
        }
        self.targets.remove(self.focus_target);
        if self.focus_target >= self.targets.len() {
            self.focus_target = self.targets.len() - 1;
        }
        self.focus_field = TargetField::Name;
    }

    pub fn focus_next(&mut self) {
        match self.focus_field {
            TargetField::Name => self.focus_field = TargetField::Country,
            TargetField::Country => self.focus_field = TargetField::Notes,
            TargetField::Notes => {
                self.focus_target = (self.focus_target + 1) % self.targets.len();
                self.focus_field = TargetField::Name;
            }
        }
    }

    pub fn focus_prev(&mut self) {
        match self.focus_field {
            TargetField::Notes => self.focus_field = TargetField::Country,
            TargetField::Country => self.focus_field = TargetField::Name,
            TargetField::Name => {
                self.focus_target = (self.focus_target + self.targets.len() - 1) % self.targets.len();
                self.focus_field = TargetField::Notes;
            }
        }
    }

    /// Text buffer for the focused field.
    pub fn field_mut(&mut self) -> &mut String {
        let target = &mut self.targets[self.focus_target];
        match self.focus_field {
            TargetField::Name => &mut target.name,
            TargetField::Country => &mut target.country,
            TargetField::Notes => &mut target.notes,
        }
    }

    /// Convert the draft into a creation payload, or explain why not.
    /// The 1-3 bound holds by construction; only field contents can fail.
    pub fn validate(&self) -> Result<MissionCreate, String> {
        let mut targets = Vec::with_capacity(self.targets.len());
        for draft in &self.targets {
            let name = draft.name.trim();
            let country = draft.country.trim();
            if name.is_empty() || country.is_empty() {
                return Err("Every target needs a name and a country".to_string());
            }
            targets.push(TargetCreate {
                name: name.to_string(),
                country: country.to_string(),
                notes: draft.notes.clone(),
            });
        }
        Ok(MissionCreate { targets })
    }
}

/// In-place salary edit, keyed by the cat it belongs to. At most one of
/// these exists at a time; opening another replaces it.
#[derive(Debug, Clone)]
pub struct SalaryEdit {
    pub cat_id: i64,
    pub buffer: String,
}

impl SalaryEdit {
    pub fn validate(&self) -> Result<f64, String> {
        self.buffer
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite() && *s >= 0.0)
            .ok_or_else(|| "Salary must be a non-negative number".to_string())
    }
}

/// In-place target-notes edit, keyed by the target it belongs to. Notes
/// are accepted as-is; there is no client-side validation.
#[derive(Debug, Clone)]
pub struct NotesEdit {
    pub target_id: i64,
    pub buffer: String,
}

/// Agent-assignment picker for an unassigned mission.
#[derive(Debug, Clone)]
pub struct AssignPicker {
    pub mission_id: i64,
    pub choice: usize,
}

/// Which kind of record a pending delete refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteKind {
    Cat,
    Mission,
}

/// A delete waiting on interactive confirmation. Declining discards it
/// without any request being sent.
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub kind: DeleteKind,
    pub id: i64,
    pub label: String,
}

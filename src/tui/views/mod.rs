//! TUI views.
//!
//! Views are pure functions of the store plus a per-view selection offset;
//! they own no data of their own.

mod cats;
mod missions;
mod overlay;

pub use cats::CatsView;
pub use missions::{MissionsView, Row, build_rows, target_editable};
pub use overlay::{
    render_assign_picker, render_cat_form, render_confirm, render_mission_form, render_notes_edit,
    render_salary_edit,
};

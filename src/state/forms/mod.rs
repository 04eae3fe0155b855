//! Form domain layer
//!
//! Type-safe form handling for the application sections.

mod document;
mod field;
mod form_state;

pub use document::{AttachedFile, DocumentSlot, DocumentsForm};
pub use field::{FieldKind, FormField};
pub use form_state::{
    Form, IncomeInfo, IncomeInfoForm, PersonalInfo, PersonalInfoForm, EMPLOYMENT_OPTIONS,
};

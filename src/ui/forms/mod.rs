//! Form rendering module

mod field_renderer;

pub use field_renderer::{draw_document_slot, draw_field, FIELD_HEIGHT};

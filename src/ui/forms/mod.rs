//! Form rendering module
//!
//! - `field_renderer`: bordered input boxes shared by the wizard steps
//! - `entry_form`: the record entry overlay

mod entry_form;
mod field_renderer;

pub use entry_form::draw_entry_form;
pub use field_renderer::{draw_field, field_height, FieldView};

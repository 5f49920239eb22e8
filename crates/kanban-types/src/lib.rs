//! Shared types for the kanban card core: the wire models returned by the
//! store and the API, the color palette, and the input validation stage.

pub mod api;
pub mod models;
pub mod palette;
pub mod validate;

pub use palette::{Palette, PaletteEntry, PaletteError};
pub use validate::{FieldError, ValidationErrors};

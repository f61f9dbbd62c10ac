#![forbid(unsafe_code)]
//! Settings schema SSOT.
//!
//! ```compile_fail
//! use settings_tabs_model::FieldKind;
//!
//! fn exhaustive_match(k: FieldKind) -> &'static str {
//!     match k {
//!         FieldKind::Text => "t",
//!         FieldKind::Textarea => "ta",
//!         FieldKind::Checkbox => "c",
//!     }
//! }
//! ```

mod field;
mod registry;
mod schema;
mod values;

pub use field::{Choice, FieldDescriptor, FieldKind, SizeHint};
pub use registry::{slugify, SchemaError, SchemaRegistry};
pub use schema::{SectionModel, TabModel};
pub use values::{StoredValue, StoredValues};

pub const CRATE_NAME: &str = "settings-tabs-model";

#![forbid(unsafe_code)]
//! Pure rendering for the settings page.
//!
//! Every function here is a read of (descriptor, stored value) producing a
//! markup fragment. Nothing mutates the schema and nothing talks to the
//! host; storage lookups happen before these functions are called.

mod escape;
mod field;
mod page;
mod section;

pub use field::{field_name, render_field};
pub use page::{
    render_document, render_field_row, render_form_open, render_nav, render_page_heading,
    render_submit, render_updated_notice,
};
pub use section::{render_section_heading, render_section_intro};

pub const CRATE_NAME: &str = "settings-tabs-render";

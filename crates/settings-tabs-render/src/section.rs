use crate::escape::text;
use settings_tabs_model::SectionModel;

/// Section heading emitted before the intro and the field table.
#[must_use]
pub fn render_section_heading(section: &SectionModel) -> String {
    format!("<h2>{}</h2>", text(&section.title))
}

/// Intro markup shown under a section heading.
///
/// Dispatch by section id: `section_1` carries bespoke copy, everything
/// else falls back to a templated line interpolating the section title.
#[must_use]
pub fn render_section_intro(section: &SectionModel) -> String {
    match section.id.as_str() {
        "section_1" => "<p>This section rocks!</p>".to_string(),
        _ => format!("<p>Default instructions for {}</p>", text(&section.title)),
    }
}

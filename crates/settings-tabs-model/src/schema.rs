use crate::field::FieldDescriptor;
use serde::{Deserialize, Serialize};

/// Titled grouping of fields within a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionModel {
    pub id: String,
    pub title: String,
    pub fields: Vec<FieldDescriptor>,
}

impl SectionModel {
    #[must_use]
    pub fn new(id: &str, title: &str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            fields,
        }
    }

    /// Fields of the section with the given id; empty for an unknown id.
    #[must_use]
    pub fn field(&self, field_id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.id == field_id)
    }
}

/// Top-level navigational grouping on the settings page.
///
/// A tab either carries sections of fields (`has_fields`) or is a static
/// content tab with no form and no storage interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabModel {
    pub id: String,
    pub title: String,
    pub has_fields: bool,
    pub sections: Vec<SectionModel>,
}

impl TabModel {
    #[must_use]
    pub fn with_fields(id: &str, title: &str, sections: Vec<SectionModel>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            has_fields: true,
            sections,
        }
    }

    #[must_use]
    pub fn static_tab(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            has_fields: false,
            sections: Vec::new(),
        }
    }

    #[must_use]
    pub fn section(&self, section_id: &str) -> Option<&SectionModel> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// Ordered descriptors of every field on this tab, across sections.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }
}

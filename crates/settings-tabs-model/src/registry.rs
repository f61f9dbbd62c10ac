use crate::schema::{SectionModel, TabModel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Schema-authoring defect surfaced by [`SchemaRegistry::audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError(pub String);

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SchemaError {}

/// Derives the page slug from a display name: lowercased, spaces become
/// underscores.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// The full tabs -> sections -> fields tree plus the derived mapping from
/// each fields-bearing tab to its storage key.
///
/// Built once at startup, immutable thereafter, and passed by reference
/// into the page controller and renderers. Storage keys are
/// `<slug>_<tab_id>` and exist exactly for tabs with `has_fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRegistry {
    page_title: String,
    slug: String,
    tabs: Vec<TabModel>,
    storage_key_of: BTreeMap<String, String>,
}

impl SchemaRegistry {
    /// Pure and deterministic; called once. Panics when the tab list is
    /// empty, which is a schema-authoring error, not a runtime condition.
    #[must_use]
    pub fn build(page_title: &str, tabs: Vec<TabModel>) -> Self {
        assert!(!tabs.is_empty(), "schema must define at least one tab");
        let slug = slugify(page_title);
        let storage_key_of = tabs
            .iter()
            .filter(|tab| tab.has_fields)
            .map(|tab| (tab.id.clone(), format!("{slug}_{}", tab.id)))
            .collect();
        Self {
            page_title: page_title.to_string(),
            slug,
            tabs,
            storage_key_of,
        }
    }

    #[must_use]
    pub fn page_title(&self) -> &str {
        &self.page_title
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn tabs(&self) -> &[TabModel] {
        &self.tabs
    }

    #[must_use]
    pub fn tab(&self, tab_id: &str) -> Option<&TabModel> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    #[must_use]
    pub fn first_tab(&self) -> &TabModel {
        &self.tabs[0]
    }

    /// Active-tab selection: an absent or unrecognized request parameter
    /// falls back to the first tab in registry order.
    #[must_use]
    pub fn select_tab(&self, requested: Option<&str>) -> &TabModel {
        requested
            .and_then(|id| self.tab(id))
            .unwrap_or_else(|| self.first_tab())
    }

    /// Sections of the given tab; empty for unknown or static tabs.
    #[must_use]
    pub fn sections_for(&self, tab_id: &str) -> &[SectionModel] {
        self.tab(tab_id).map_or(&[], |t| t.sections.as_slice())
    }

    #[must_use]
    pub fn storage_key(&self, tab_id: &str) -> Option<&str> {
        self.storage_key_of.get(tab_id).map(String::as_str)
    }

    /// `(tab_id, storage_key)` pairs for every fields-bearing tab, in
    /// deterministic order.
    pub fn storage_keys(&self) -> impl Iterator<Item = (&str, &str)> {
        self.storage_key_of
            .iter()
            .map(|(id, key)| (id.as_str(), key.as_str()))
    }

    /// The tab persisted under `storage_key`, if any.
    #[must_use]
    pub fn tab_for_storage_key(&self, storage_key: &str) -> Option<&TabModel> {
        self.storage_key_of
            .iter()
            .find(|(_, key)| key.as_str() == storage_key)
            .and_then(|(tab_id, _)| self.tab(tab_id))
    }

    /// Audits schema-authoring invariants: unique tab ids, unique section
    /// ids per tab, unique field ids per section, non-empty choices for
    /// choices-bearing kinds, and sections only on fields-bearing tabs.
    pub fn audit(&self) -> Result<(), SchemaError> {
        let mut tab_ids = BTreeMap::new();
        for tab in &self.tabs {
            if tab_ids.insert(tab.id.as_str(), ()).is_some() {
                return Err(SchemaError(format!("duplicate tab id: {}", tab.id)));
            }
            if !tab.has_fields && !tab.sections.is_empty() {
                return Err(SchemaError(format!(
                    "static tab {} must not carry sections",
                    tab.id
                )));
            }
            let mut section_ids = BTreeMap::new();
            for section in &tab.sections {
                if section_ids.insert(section.id.as_str(), ()).is_some() {
                    return Err(SchemaError(format!(
                        "duplicate section id in tab {}: {}",
                        tab.id, section.id
                    )));
                }
                let mut field_ids = BTreeMap::new();
                for field in &section.fields {
                    if field_ids.insert(field.id.as_str(), ()).is_some() {
                        return Err(SchemaError(format!(
                            "duplicate field id in section {}: {}",
                            section.id, field.id
                        )));
                    }
                    if field.kind.takes_choices() && field.choices.is_empty() {
                        return Err(SchemaError(format!(
                            "field {} ({}) requires choices",
                            field.id, field.kind
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Choice, FieldDescriptor};

    fn registry() -> SchemaRegistry {
        SchemaRegistry::build(
            "My Settings Tabs",
            vec![
                TabModel::with_fields(
                    "default",
                    "Default Settings",
                    vec![SectionModel::new(
                        "section_1",
                        "Section 1",
                        vec![FieldDescriptor::text("name", "Text Box")],
                    )],
                ),
                TabModel::with_fields(
                    "other",
                    "Other Settings",
                    vec![SectionModel::new(
                        "section_4",
                        "Section 4",
                        vec![FieldDescriptor::radio(
                            "gender",
                            "Radio Button Set",
                            vec![Choice::new("m", "Male"), Choice::new("f", "Female")],
                        )],
                    )],
                ),
                TabModel::static_tab("instructions", "Instructions"),
            ],
        )
    }

    #[test]
    fn storage_keys_cover_exactly_the_fields_bearing_tabs() {
        let reg = registry();
        assert_eq!(reg.slug(), "my_settings_tabs");
        assert_eq!(reg.storage_key("default"), Some("my_settings_tabs_default"));
        assert_eq!(reg.storage_key("other"), Some("my_settings_tabs_other"));
        assert_eq!(reg.storage_key("instructions"), None);
        assert_eq!(reg.storage_keys().count(), 2);
    }

    #[test]
    fn storage_keys_are_stable_across_repeated_builds() {
        let first: Vec<(String, String)> = registry()
            .storage_keys()
            .map(|(id, key)| (id.to_string(), key.to_string()))
            .collect();
        let second: Vec<(String, String)> = registry()
            .storage_keys()
            .map(|(id, key)| (id.to_string(), key.to_string()))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_or_absent_tab_selects_the_first_tab() {
        let reg = registry();
        assert_eq!(reg.select_tab(None).id, "default");
        assert_eq!(reg.select_tab(Some("missing")).id, "default");
        assert_eq!(reg.select_tab(Some("other")).id, "other");
    }

    #[test]
    fn sections_for_unknown_tab_is_empty() {
        let reg = registry();
        assert!(reg.sections_for("nope").is_empty());
        assert!(reg.sections_for("instructions").is_empty());
        assert_eq!(reg.sections_for("default").len(), 1);
    }

    #[test]
    fn tab_for_storage_key_resolves_the_owner() {
        let reg = registry();
        let tab = reg
            .tab_for_storage_key("my_settings_tabs_other")
            .expect("owning tab");
        assert_eq!(tab.id, "other");
        assert!(reg.tab_for_storage_key("my_settings_tabs_nope").is_none());
    }

    #[test]
    fn audit_rejects_duplicate_field_ids_and_missing_choices() {
        let dup = SchemaRegistry::build(
            "Dup",
            vec![TabModel::with_fields(
                "t",
                "T",
                vec![SectionModel::new(
                    "s",
                    "S",
                    vec![
                        FieldDescriptor::text("name", "A"),
                        FieldDescriptor::text("name", "B"),
                    ],
                )],
            )],
        );
        assert!(dup.audit().is_err());

        let bare = SchemaRegistry::build(
            "Bare",
            vec![TabModel::with_fields(
                "t",
                "T",
                vec![SectionModel::new(
                    "s",
                    "S",
                    vec![FieldDescriptor::select("color", "Select", Vec::new())],
                )],
            )],
        );
        assert!(bare.audit().is_err());

        assert!(registry().audit().is_ok());
    }
}

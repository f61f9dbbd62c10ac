use crate::store::{OptionStore, StoreError};
use settings_tabs_model::{FieldDescriptor, SchemaRegistry, SectionModel, StoredValues};

/// Section intro callback the host invokes when emitting a section.
pub type IntroRenderFn = fn(&SectionModel) -> String;

/// Field render callback: (descriptor, storage key, stored values) -> markup.
pub type FieldRenderFn = fn(&FieldDescriptor, &str, &StoredValues) -> String;

#[derive(Debug, Clone)]
pub struct RegisteredPage {
    pub title: String,
    pub slug: String,
    pub required_capability: String,
}

pub struct RegisteredSection {
    pub section: SectionModel,
    pub page_key: String,
    pub intro: IntroRenderFn,
}

pub struct RegisteredField {
    pub descriptor: FieldDescriptor,
    pub page_key: String,
    pub section_id: String,
    pub render: FieldRenderFn,
}

/// Host-side registries the wiring step populates once at startup: the
/// settings page, the submission groups (one storage key per fields tab),
/// and the section/field associations with their render callbacks.
///
/// The page controller walks this, not the schema, when emitting output —
/// the schema stays a pure value and the render functions stay free of
/// registration side effects.
#[derive(Default)]
pub struct SettingsHost {
    page: Option<RegisteredPage>,
    settings: Vec<String>,
    sections: Vec<RegisteredSection>,
    fields: Vec<RegisteredField>,
}

impl SettingsHost {
    pub fn register_page(&mut self, title: &str, slug: &str, required_capability: &str) {
        self.page = Some(RegisteredPage {
            title: title.to_string(),
            slug: slug.to_string(),
            required_capability: required_capability.to_string(),
        });
    }

    pub fn register_setting(&mut self, option_key: &str) {
        if !self.is_registered_setting(option_key) {
            self.settings.push(option_key.to_string());
        }
    }

    pub fn register_section(&mut self, section: SectionModel, page_key: &str, intro: IntroRenderFn) {
        self.sections.push(RegisteredSection {
            section,
            page_key: page_key.to_string(),
            intro,
        });
    }

    pub fn register_field(
        &mut self,
        descriptor: FieldDescriptor,
        page_key: &str,
        section_id: &str,
        render: FieldRenderFn,
    ) {
        self.fields.push(RegisteredField {
            descriptor,
            page_key: page_key.to_string(),
            section_id: section_id.to_string(),
            render,
        });
    }

    #[must_use]
    pub fn page(&self) -> Option<&RegisteredPage> {
        self.page.as_ref()
    }

    /// Whether submissions may target this storage key.
    #[must_use]
    pub fn is_registered_setting(&self, option_key: &str) -> bool {
        self.settings.iter().any(|k| k == option_key)
    }

    pub fn sections_for_page<'a>(
        &'a self,
        page_key: &'a str,
    ) -> impl Iterator<Item = &'a RegisteredSection> {
        self.sections.iter().filter(move |s| s.page_key == page_key)
    }

    pub fn fields_in_section<'a>(
        &'a self,
        page_key: &'a str,
        section_id: &'a str,
    ) -> impl Iterator<Item = &'a RegisteredField> {
        self.fields
            .iter()
            .filter(move |f| f.page_key == page_key && f.section_id == section_id)
    }
}

/// Startup wiring: binds the pure render functions to the host's hook
/// points for every (section, field) pair of every fields-bearing tab,
/// passing the owning tab's storage key as opaque context.
#[must_use]
pub fn wire_settings(registry: &SchemaRegistry, required_capability: &str) -> SettingsHost {
    let mut host = SettingsHost::default();
    host.register_page(registry.page_title(), registry.slug(), required_capability);
    for (tab_id, key) in registry.storage_keys() {
        host.register_setting(key);
        for section in registry.sections_for(tab_id) {
            host.register_section(
                section.clone(),
                key,
                settings_tabs_render::render_section_intro,
            );
            for field in &section.fields {
                host.register_field(
                    field.clone(),
                    key,
                    &section.id,
                    settings_tabs_render::render_field,
                );
            }
        }
    }
    host
}

/// Startup step backing the registry invariant: every fields-bearing tab
/// has a store entry. Idempotent; a no-op for keys already present.
pub async fn ensure_options(
    registry: &SchemaRegistry,
    store: &dyn OptionStore,
) -> Result<(), StoreError> {
    for (_, key) in registry.storage_keys() {
        store.ensure(key).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::demo_schema;

    #[test]
    fn wiring_registers_every_section_and_field_with_its_storage_key() {
        let registry = demo_schema("My Settings Tabs");
        let host = wire_settings(&registry, "activate_plugins");

        let page = host.page().expect("page registered");
        assert_eq!(page.slug, "my_settings_tabs");
        assert_eq!(page.required_capability, "activate_plugins");

        assert!(host.is_registered_setting("my_settings_tabs_default"));
        assert!(host.is_registered_setting("my_settings_tabs_other"));
        assert!(!host.is_registered_setting("my_settings_tabs_instructions"));

        let default_sections: Vec<&str> = host
            .sections_for_page("my_settings_tabs_default")
            .map(|s| s.section.id.as_str())
            .collect();
        assert_eq!(default_sections, ["section_1", "section_2"]);

        let section_3_fields: Vec<&str> = host
            .fields_in_section("my_settings_tabs_other", "section_3")
            .map(|f| f.descriptor.id.as_str())
            .collect();
        assert_eq!(section_3_fields, ["subscribe", "roles"]);
    }

    #[tokio::test]
    async fn ensure_options_creates_an_entry_per_fields_tab_and_is_idempotent() {
        let registry = demo_schema("My Settings Tabs");
        let store = crate::store::MemoryStore::new();
        ensure_options(&registry, &store).await.expect("first run");
        ensure_options(&registry, &store).await.expect("second run");
        let values = store
            .get("my_settings_tabs_default")
            .await
            .expect("get entry");
        assert!(values.is_empty());
    }
}

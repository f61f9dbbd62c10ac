use settings_tabs_model::{FieldDescriptor, StoredValue, StoredValues};
use settings_tabs_render::field_name;

/// Decodes an urlencoded body into `(name, value)` pairs, preserving
/// document order. Order matters: the checkbox hidden/visible pair relies
/// on the later value winning.
#[must_use]
pub(crate) fn parse_pairs(body: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Maps posted pairs into the stored value mapping for one storage key,
/// restricted to the registered field set.
///
/// Scalar fields take the last posted value under `<key>[<id>]`; sequence
/// fields collect every value under `<key>[<id>][]` in order, and an
/// entirely-absent sequence field becomes the empty sequence rather than
/// "unchanged". Posted names outside the field set are dropped.
#[must_use]
pub(crate) fn map_submission<'a>(
    fields: impl Iterator<Item = &'a FieldDescriptor>,
    storage_key: &str,
    pairs: &[(String, String)],
) -> StoredValues {
    let mut out = StoredValues::new();
    for field in fields {
        let scalar_name = field_name(storage_key, &field.id);
        if field.kind.is_multi_value() {
            let array_name = format!("{scalar_name}[]");
            let members: Vec<String> = pairs
                .iter()
                .filter(|(name, _)| *name == array_name)
                .map(|(_, value)| value.clone())
                .collect();
            out.insert(field.id.clone(), StoredValue::many(members));
        } else if let Some((_, value)) = pairs.iter().rev().find(|(name, _)| *name == scalar_name) {
            out.insert(field.id.clone(), StoredValue::scalar(value));
        }
    }
    out
}

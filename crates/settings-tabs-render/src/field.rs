use crate::escape::{attr, text};
use settings_tabs_model::{FieldDescriptor, FieldKind, SizeHint, StoredValue, StoredValues};
use std::fmt::Write;

/// Form-field name binding a control to its slot in the stored mapping:
/// `<storage_key>[<field_id>]`.
#[must_use]
pub fn field_name(storage_key: &str, field_id: &str) -> String {
    format!("{storage_key}[{field_id}]")
}

fn checked(on: bool) -> &'static str {
    if on {
        " checked=\"checked\""
    } else {
        ""
    }
}

fn selected(on: bool) -> &'static str {
    if on {
        " selected=\"selected\""
    } else {
        ""
    }
}

fn inline_help(out: &mut String, help_text: Option<&str>) {
    if let Some(help) = help_text {
        let _ = write!(
            out,
            "<span style=\"font-style: italic; padding-left: 5px;\">{}</span>",
            text(help)
        );
    }
}

fn block_help(out: &mut String, help_text: Option<&str>) {
    if let Some(help) = help_text {
        let _ = write!(out, "<p style=\"font-style: italic;\">{}</p>", text(help));
    }
}

/// Renders one form control bound to its previously stored value.
///
/// Pure: never mutates the descriptor, never touches storage. A missing
/// stored value renders as an empty string (or nothing checked), and an
/// `Unknown` kind renders as no output at all, leaving sibling fields
/// unaffected.
#[must_use]
pub fn render_field(field: &FieldDescriptor, storage_key: &str, values: &StoredValues) -> String {
    let name = field_name(storage_key, &field.id);
    let scalar = values
        .get(&field.id)
        .and_then(StoredValue::as_scalar)
        .unwrap_or("");
    let mut out = String::new();

    match field.kind {
        FieldKind::Text => {
            let _ = write!(
                out,
                "<input type=\"text\" name=\"{}\" value=\"{}\"",
                attr(&name),
                attr(scalar)
            );
            if let SizeHint::Width(size) = field.size {
                let _ = write!(out, " size=\"{size}\"");
            }
            out.push_str(" />");
            inline_help(&mut out, field.help_text.as_deref());
        }

        FieldKind::Textarea => {
            let _ = write!(out, "<textarea name=\"{}\" id=\"{}\"", attr(&name), attr(&name));
            if let SizeHint::Area { rows, cols } = field.size {
                let _ = write!(out, " rows=\"{rows}\" cols=\"{cols}\"");
            }
            let _ = write!(out, ">{}</textarea>", text(scalar));
            block_help(&mut out, field.help_text.as_deref());
        }

        FieldKind::Checkbox => {
            // The hidden "0" input must precede the checkbox: an unchecked
            // box submits only the hidden value, a checked box submits both
            // and the last value ("1") wins.
            let label = field.label_text.as_deref().unwrap_or("");
            let _ = write!(
                out,
                "<label for=\"{name}\"><input type=\"hidden\" name=\"{name}\" value=\"0\" />\
<input type=\"checkbox\" name=\"{name}\" id=\"{name}\" value=\"1\"{checked} />\
<span>{label}</span></label>",
                name = attr(&name),
                checked = checked(scalar == "1"),
                label = text(label),
            );
        }

        FieldKind::CheckboxArray => {
            if field.choices.is_empty() {
                return out;
            }
            // Array-suffix name form; one checkbox per choice.
            let array_name = format!("{name}[]");
            block_help(&mut out, field.help_text.as_deref());
            out.push_str("<ul style=\"list-style-type: none;\">");
            for choice in &field.choices {
                let on = values
                    .get(&field.id)
                    .is_some_and(|v| v.contains(&choice.value));
                let _ = write!(
                    out,
                    "<li><label><input type=\"checkbox\" name=\"{}\" value=\"{}\"{} />\
<span>{}</span></label></li>",
                    attr(&array_name),
                    attr(&choice.value),
                    checked(on),
                    text(&choice.label),
                );
            }
            out.push_str("</ul>");
        }

        FieldKind::Radio => {
            if field.choices.is_empty() {
                return out;
            }
            block_help(&mut out, field.help_text.as_deref());
            out.push_str("<ul style=\"list-style-type: none;\">");
            for choice in &field.choices {
                let _ = write!(
                    out,
                    "<li><label><input type=\"radio\" name=\"{}\" value=\"{}\"{} />\
<span>{}</span></label></li>",
                    attr(&name),
                    attr(&choice.value),
                    checked(choice.value == scalar),
                    text(&choice.label),
                );
            }
            out.push_str("</ul>");
        }

        FieldKind::Select => {
            if field.choices.is_empty() {
                return out;
            }
            let _ = write!(out, "<select name=\"{}\" id=\"{}\">", attr(&name), attr(&name));
            for choice in &field.choices {
                let _ = write!(
                    out,
                    "<option value=\"{}\"{}>{}</option>",
                    attr(&choice.value),
                    selected(choice.value == scalar),
                    text(&choice.label),
                );
            }
            out.push_str("</select>");
            inline_help(&mut out, field.help_text.as_deref());
        }

        FieldKind::Unknown => {}
    }

    out
}

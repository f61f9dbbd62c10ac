use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Closed set of form-control kinds the renderer knows how to emit.
///
/// `Unknown` absorbs unrecognized tags when a schema arrives as data; the
/// renderer emits nothing for it and siblings are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Textarea,
    Checkbox,
    CheckboxArray,
    Radio,
    Select,
    Unknown,
}

impl FieldKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::CheckboxArray => "checkbox_array",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::Unknown => "unknown",
        }
    }

    /// Maps a snake_case tag to its kind; any unrecognized tag becomes
    /// `Unknown` rather than an error.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "checkbox" => Self::Checkbox,
            "checkbox_array" => Self::CheckboxArray,
            "radio" => Self::Radio,
            "select" => Self::Select,
            _ => Self::Unknown,
        }
    }

    /// Kinds that require a non-empty choice list.
    #[must_use]
    pub const fn takes_choices(self) -> bool {
        matches!(self, Self::CheckboxArray | Self::Radio | Self::Select)
    }

    /// Kinds whose stored value is a sequence rather than a scalar.
    #[must_use]
    pub const fn is_multi_value(self) -> bool {
        matches!(self, Self::CheckboxArray)
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// One selectable option of a choices-bearing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Type-specific sizing for the rendered control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeHint {
    #[default]
    None,
    /// `size` attribute of a text input.
    Width(u32),
    /// `rows`/`cols` of a textarea.
    Area { rows: u32, cols: u32 },
}

/// Static definition of one form control and its rendering parameters.
///
/// Constructed once per schema build and immutable thereafter. `id` must be
/// unique within the owning section; choices-bearing kinds must carry a
/// non-empty choice list. Both are compile-time schema-authoring concerns,
/// audited by [`crate::SchemaRegistry::audit`] rather than checked on the
/// render path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: String,
    pub title: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub size: SizeHint,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub help_text: Option<String>,
    #[serde(default)]
    pub label_text: Option<String>,
}

impl FieldDescriptor {
    fn new(id: &str, title: &str, kind: FieldKind) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            size: SizeHint::None,
            choices: Vec::new(),
            help_text: None,
            label_text: None,
        }
    }

    #[must_use]
    pub fn text(id: &str, title: &str) -> Self {
        Self::new(id, title, FieldKind::Text)
    }

    #[must_use]
    pub fn textarea(id: &str, title: &str, rows: u32, cols: u32) -> Self {
        let mut field = Self::new(id, title, FieldKind::Textarea);
        field.size = SizeHint::Area { rows, cols };
        field
    }

    #[must_use]
    pub fn checkbox(id: &str, title: &str, label_text: &str) -> Self {
        let mut field = Self::new(id, title, FieldKind::Checkbox);
        field.label_text = Some(label_text.to_string());
        field
    }

    #[must_use]
    pub fn checkbox_array(id: &str, title: &str, choices: Vec<Choice>) -> Self {
        let mut field = Self::new(id, title, FieldKind::CheckboxArray);
        field.choices = choices;
        field
    }

    #[must_use]
    pub fn radio(id: &str, title: &str, choices: Vec<Choice>) -> Self {
        let mut field = Self::new(id, title, FieldKind::Radio);
        field.choices = choices;
        field
    }

    #[must_use]
    pub fn select(id: &str, title: &str, choices: Vec<Choice>) -> Self {
        let mut field = Self::new(id, title, FieldKind::Select);
        field.choices = choices;
        field
    }

    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = SizeHint::Width(size);
        self
    }

    #[must_use]
    pub fn with_help(mut self, help_text: &str) -> Self {
        self.help_text = Some(help_text.to_string());
        self
    }
}

//! Field descriptors produced from record metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Presentation kind of a field.
///
/// The kind is a hint for the rendering layer and never depends on the
/// field's native type. Unknown kinds are kept verbatim in
/// [`FieldKind::Other`]; rejecting them is left to the renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    /// Single-line text input.
    #[default]
    Text,
    /// Numeric input.
    Number,
    /// Multi-line text input.
    Textarea,
    /// Single choice from a drop-down.
    Select,
    /// Multiple choices from a list.
    Multiselect,
    /// Single choice from a radio group.
    Radio,
    /// On/off toggle.
    Checkbox,
    /// Any kind outside the built-in set.
    Other(String),
}

impl FieldKind {
    /// Returns the kind as it appears in field metadata.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Multiselect => "multiselect",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Other(kind) => kind,
        }
    }

    /// Returns `true` for the built-in kinds.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Returns `true` for kinds that present a list of options.
    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Select | Self::Multiselect | Self::Radio)
    }
}

impl From<&str> for FieldKind {
    fn from(value: &str) -> Self {
        match value {
            "text" => Self::Text,
            "number" => Self::Number,
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "multiselect" => Self::Multiselect,
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<FieldKind> for String {
    fn from(value: FieldKind) -> Self {
        match value {
            FieldKind::Other(kind) => kind,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes one addressable field of a record.
///
/// Deserialization rejects an empty `name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DescriptorRepr")]
pub struct FieldDescriptor {
    pub(crate) name: String,
    pub(crate) label: String,
    pub(crate) kind: FieldKind,
    pub(crate) required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) default_value: Option<String>,
}

/// Wire form of [`FieldDescriptor`], checked before conversion.
#[derive(Deserialize)]
struct DescriptorRepr {
    name: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    kind: FieldKind,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    default_value: Option<String>,
}

impl TryFrom<DescriptorRepr> for FieldDescriptor {
    type Error = &'static str;

    fn try_from(repr: DescriptorRepr) -> Result<Self, Self::Error> {
        if repr.name.is_empty() {
            return Err("field name cannot be empty");
        }
        Ok(Self {
            name: repr.name,
            label: repr.label,
            kind: repr.kind,
            required: repr.required,
            options: repr.options,
            placeholder: repr.placeholder,
            default_value: repr.default_value,
        })
    }
}

impl FieldDescriptor {
    /// Creates a descriptor with default metadata for the supplied name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            kind: FieldKind::Text,
            required: false,
            options: Vec::new(),
            placeholder: None,
            default_value: None,
        }
    }

    /// External key used to address the field in submitted input.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable caption, empty when none was declared.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Presentation kind.
    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Whether the field is marked as required. The binder does not enforce this.
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Permitted choices, in declaration order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Placeholder hint.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Default value hint.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_is_kept_verbatim() {
        let kind = FieldKind::from("slider");
        assert_eq!(kind, FieldKind::Other("slider".into()));
        assert_eq!(kind.as_str(), "slider");
        assert!(!kind.is_known());
    }

    #[test]
    fn kind_serializes_as_plain_string() {
        let json = serde_json::to_string(&FieldKind::Multiselect).unwrap();
        assert_eq!(json, "\"multiselect\"");

        let kind: FieldKind = serde_json::from_str("\"color\"").unwrap();
        assert_eq!(kind, FieldKind::Other("color".into()));
    }

    #[test]
    fn descriptor_round_trips_through_json() {
        let descriptor = crate::parse_tag("Op", "type=radio,label=Operation,options=add|sub");
        let json = serde_json::to_string(&descriptor).unwrap();
        let parsed: FieldDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, descriptor);
    }

    #[test]
    fn descriptor_with_empty_name_is_rejected() {
        let err = serde_json::from_str::<FieldDescriptor>(r#"{"name":"","kind":"number"}"#)
            .expect_err("empty name should not deserialize");
        assert!(err.to_string().contains("field name cannot be empty"));

        let parsed: FieldDescriptor = serde_json::from_str(r#"{"name":"amount"}"#).unwrap();
        assert_eq!(parsed, FieldDescriptor::new("amount"));
    }

    #[test]
    fn descriptor_json_omits_empty_hints() {
        let value = serde_json::to_value(FieldDescriptor::new("amount")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "amount",
                "label": "",
                "kind": "text",
                "required": false,
            })
        );
    }
}

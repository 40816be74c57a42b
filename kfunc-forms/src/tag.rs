//! Parser for the `key=value,key=value` field metadata grammar.
//!
//! Entries are separated by `,` and split on their first `=`. There is no
//! escaping, so values cannot contain commas. Recognised keys are `name`,
//! `label`, `type`, `required`, `options`, `placeholder` and `default`.

use crate::descriptor::{FieldDescriptor, FieldKind};

const ENTRY_SEPARATOR: char = ',';
const OPTION_SEPARATOR: char = '|';

/// Parses field metadata into a descriptor named after `declared_name`.
///
/// Parsing never fails. Entries without `=` and unknown keys are skipped, so
/// malformed metadata degrades to defaults. `required` is only set by the
/// exact value `true`, and an empty `name` keeps the declared name.
#[must_use]
pub fn parse_tag(declared_name: &str, raw: &str) -> FieldDescriptor {
    let mut descriptor = FieldDescriptor::new(declared_name);

    for entry in raw.split(ENTRY_SEPARATOR) {
        let Some((key, value)) = entry.trim().split_once('=') else {
            continue;
        };

        match key {
            "name" if !value.is_empty() => descriptor.name = value.to_owned(),
            "label" => descriptor.label = value.to_owned(),
            "type" => descriptor.kind = FieldKind::from(value),
            "required" => descriptor.required = value == "true",
            "options" => {
                descriptor.options = if value.is_empty() {
                    Vec::new()
                } else {
                    value.split(OPTION_SEPARATOR).map(str::to_owned).collect()
                };
            }
            "placeholder" => descriptor.placeholder = Some(value.to_owned()),
            "default" => descriptor.default_value = Some(value.to_owned()),
            _ => {}
        }
    }

    descriptor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tag_yields_defaults() {
        let descriptor = parse_tag("Amount", "");
        assert_eq!(descriptor, FieldDescriptor::new("Amount"));
        assert_eq!(descriptor.kind(), &FieldKind::Text);
    }

    #[test]
    fn recognised_keys_update_their_attribute() {
        let descriptor = parse_tag(
            "Content",
            "name=content,type=textarea,label=Text,placeholder=Type here,default=hello,required=true",
        );

        assert_eq!(descriptor.name(), "content");
        assert_eq!(descriptor.kind(), &FieldKind::Textarea);
        assert_eq!(descriptor.label(), "Text");
        assert_eq!(descriptor.placeholder(), Some("Type here"));
        assert_eq!(descriptor.default_value(), Some("hello"));
        assert!(descriptor.required());
    }

    #[test]
    fn required_needs_the_literal_true() {
        for value in ["1", "yes", "TRUE", "True", ""] {
            let descriptor = parse_tag("A", &format!("required={value}"));
            assert!(!descriptor.required(), "`{value}` must not mark the field required");
        }
        assert!(parse_tag("A", "required=true").required());
    }

    #[test]
    fn options_split_on_pipe() {
        let descriptor = parse_tag("Op", "type=radio,options=a|b|c");
        assert_eq!(descriptor.options(), ["a", "b", "c"]);

        let descriptor = parse_tag("Op", "options=");
        assert!(descriptor.options().is_empty());
    }

    #[test]
    fn malformed_and_unknown_entries_are_ignored() {
        let descriptor = parse_tag("A", "label,colour=red,,type=number");
        assert_eq!(descriptor.label(), "");
        assert_eq!(descriptor.kind(), &FieldKind::Number);
    }

    #[test]
    fn only_the_first_equals_delimits() {
        let descriptor = parse_tag("A", "default=x=1,placeholder==");
        assert_eq!(descriptor.default_value(), Some("x=1"));
        assert_eq!(descriptor.placeholder(), Some("="));
    }

    #[test]
    fn entries_are_trimmed_before_splitting() {
        let descriptor = parse_tag("A", " type=number , label=Amount");
        assert_eq!(descriptor.kind(), &FieldKind::Number);
        assert_eq!(descriptor.label(), "Amount");
    }

    #[test]
    fn empty_name_keeps_declared_name() {
        assert_eq!(parse_tag("Amount", "name=").name(), "Amount");
    }

    #[test]
    fn later_entries_override_earlier_ones() {
        let descriptor = parse_tag("A", "label=first,label=second");
        assert_eq!(descriptor.label(), "second");
    }
}

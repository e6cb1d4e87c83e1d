//! Loosely typed request fields.
//!
//! A [`FieldInput`] accepts any JSON value, so a number or object sent where
//! text was expected reaches `Validate` and is reported against its field
//! instead of rejecting the whole body.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    NotText,
}

impl FieldInput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldInput::Text(text) => Some(text),
            FieldInput::NotText => None,
        }
    }
}

impl From<String> for FieldInput {
    fn from(text: String) -> Self {
        FieldInput::Text(text)
    }
}

impl From<&str> for FieldInput {
    fn from(text: &str) -> Self {
        FieldInput::Text(text.to_string())
    }
}

impl<'de> Deserialize<'de> for FieldInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Other(IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => FieldInput::Text(text),
            Raw::Other(_) => FieldInput::NotText,
        })
    }
}

/// The text of an optional field; `None` when it is absent, null or not a
/// string.
pub fn text(field: &Option<FieldInput>) -> Option<&str> {
    field.as_ref().and_then(FieldInput::as_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Payload {
        value: Option<FieldInput>,
    }

    fn parse(json: &str) -> Option<FieldInput> {
        serde_json::from_str::<Payload>(json).unwrap().value
    }

    #[test]
    fn test_strings_are_text() {
        assert_eq!(parse(r#"{"value":"abc"}"#), Some(FieldInput::Text("abc".into())));
    }

    #[test]
    fn test_other_values_are_kept_as_not_text() {
        for json in [
            r#"{"value":20250101}"#,
            r#"{"value":true}"#,
            r#"{"value":{"a":1}}"#,
            r#"{"value":["x"]}"#,
        ] {
            assert_eq!(parse(json), Some(FieldInput::NotText), "{}", json);
        }
    }

    #[test]
    fn test_null_and_missing_are_absent() {
        assert_eq!(parse(r#"{"value":null}"#), None);
        assert_eq!(parse("{}"), None);
    }
}

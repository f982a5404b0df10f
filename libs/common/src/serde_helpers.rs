//! Shared Serde helpers for request payloads
//!
//! Student payloads come from hand-written clients and spreadsheets, so the
//! flag and address fields accept a few loose spellings:
//! - `true` / `1` / `"yes"` → true
//! - `""` (empty string) → None for optional text

use serde::{Deserialize, Deserializer};

/// `#[serde(default = ...)]` helpers for envelope flags
pub fn bool_true() -> bool {
    true
}

pub fn bool_false() -> bool {
    false
}

/// Nationality flag and other booleans sent by loosely typed clients
///
/// Accepts JSON booleans, `0`/`1`, and the strings `true`/`false`,
/// `yes`/`no`, `international`/`domestic` (case-insensitive). A blank string
/// is `false`.
pub fn deserialize_bool_flexible<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Bool(bool),
        Number(i64),
        Text(String),
    }

    match Loose::deserialize(deserializer)? {
        Loose::Bool(b) => Ok(b),
        Loose::Number(0) => Ok(false),
        Loose::Number(1) => Ok(true),
        Loose::Number(n) => Err(D::Error::custom(format!("expected 0 or 1, got {}", n))),
        Loose::Text(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "international" => Ok(true),
            "" | "0" | "false" | "no" | "domestic" => Ok(false),
            _ => Err(D::Error::custom(format!(
                "'{}' is not a boolean (use true/false, 1/0, yes/no or international/domestic)",
                raw
            ))),
        },
    }
}

/// Optional text where blank strings collapse to `None`
pub fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Flags {
        #[serde(default, deserialize_with = "deserialize_bool_flexible")]
        flag: bool,
        #[serde(default, deserialize_with = "deserialize_optional_text")]
        note: Option<String>,
    }

    #[test]
    fn test_bool_flexible_accepts_loose_values() {
        for (raw, expected) in [
            (r#"{"flag": true}"#, true),
            (r#"{"flag": 0}"#, false),
            (r#"{"flag": 1}"#, true),
            (r#"{"flag": "Yes"}"#, true),
            (r#"{"flag": "no"}"#, false),
            (r#"{"flag": ""}"#, false),
            (r#"{"flag": "International"}"#, true),
            (r#"{"flag": "domestic"}"#, false),
        ] {
            let parsed: Flags = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed.flag, expected, "input: {}", raw);
        }
    }

    #[test]
    fn test_bool_flexible_rejects_garbage() {
        assert!(serde_json::from_str::<Flags>(r#"{"flag": 7}"#).is_err());
        assert!(serde_json::from_str::<Flags>(r#"{"flag": "maybe"}"#).is_err());
    }

    #[test]
    fn test_optional_text_blank_is_none() {
        let parsed: Flags = serde_json::from_str(r#"{"note": "   "}"#).unwrap();
        assert_eq!(parsed.note, None);

        let parsed: Flags = serde_json::from_str(r#"{"note": " Ottawa "}"#).unwrap();
        assert_eq!(parsed.note.as_deref(), Some("Ottawa"));

        let parsed: Flags = serde_json::from_str(r#"{"note": null}"#).unwrap();
        assert_eq!(parsed.note, None);
    }
}

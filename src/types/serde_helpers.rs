//! Serde helpers for Kraken's irregular field encodings.

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

use crate::types::DecimalString;
use crate::types::decimal::unexpected;

/// A limit that is either a decimal or `false` for "no limit".
///
/// ```rust
/// use serde::Deserialize;
/// use kraken_spot_rest::types::DecimalString;
/// use kraken_spot_rest::types::serde_helpers::maybe_decimal;
///
/// #[derive(Deserialize)]
/// struct Method {
///     #[serde(deserialize_with = "maybe_decimal::deserialize", default)]
///     limit: Option<DecimalString>,
/// }
///
/// let method: Method = serde_json::from_str(r#"{"limit":false}"#).unwrap();
/// assert!(method.limit.is_none());
///
/// let method: Method = serde_json::from_str(r#"{"limit":"100.0"}"#).unwrap();
/// assert_eq!(method.limit.unwrap().as_str(), "100.0");
/// ```
pub mod maybe_decimal {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DecimalString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null | Value::Bool(false) => Ok(None),
            Value::String(text) => Ok(Some(DecimalString::new(text))),
            Value::Number(number) => Ok(Some(DecimalString::new(number.to_string()))),
            other => Err(de::Error::invalid_type(unexpected(&other), &"a decimal or false")),
        }
    }
}

/// Kraken sends `""` where it means "absent".
pub mod empty_string_as_none {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = Option::<String>::deserialize(deserializer)?;
        Ok(text.filter(|text| !text.is_empty()))
    }
}

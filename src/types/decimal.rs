//! Opaque decimal strings.
//!
//! Kraken sends every price, volume and amount as a JSON string. The text is
//! kept exactly as received so that trailing zeros and precision survive a
//! decode/encode cycle; conversion to [`Decimal`] is explicit and fallible.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::Value;

/// A decimal value carried as its verbatim wire text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DecimalString(String);

impl DecimalString {
    /// Wrap wire text without validating it.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The verbatim text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into a [`Decimal`].
    ///
    /// Scientific notation (`"1e-8"`) is accepted as well as plain decimals.
    pub fn to_decimal(&self) -> Result<Decimal, rust_decimal::Error> {
        Decimal::from_str(&self.0).or_else(|_| Decimal::from_scientific(&self.0))
    }

    /// Consume and return the inner text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DecimalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DecimalString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DecimalString {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl From<String> for DecimalString {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<Decimal> for DecimalString {
    fn from(value: Decimal) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<&DecimalString> for Decimal {
    type Error = rust_decimal::Error;

    fn try_from(value: &DecimalString) -> Result<Self, Self::Error> {
        value.to_decimal()
    }
}

impl Serialize for DecimalString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DecimalString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A handful of fields (fees, leverage) are occasionally sent as bare
        // numbers; with arbitrary precision enabled their text is exact too.
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Self(text)),
            Value::Number(number) => Ok(Self(number.to_string())),
            other => Err(de::Error::invalid_type(unexpected(&other), &"a decimal string")),
        }
    }
}

pub(crate) fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Number(_) => de::Unexpected::Other("number"),
        Value::String(s) => de::Unexpected::Str(s),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
    }
}

//! Wire format for timestamps: `yyyy-MM-dd HH:mm:ss`, always UTC.
//!
//! Use with `#[serde(with = "crate::timestamp")]`, or
//! `crate::timestamp::option` for optional fields.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

/// `chrono` format string of the wire form
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp in the wire form; sub-second precision is dropped.
pub fn format(value: &DateTime<Utc>) -> String {
    value.format(FORMAT).to_string()
}

/// Parse the wire form as a UTC timestamp.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, FORMAT).map(|naive| naive.and_utc())
}

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(|e| {
        D::Error::custom(format_args!("expected `yyyy-MM-dd HH:mm:ss`, got `{raw}` ({e})"))
    })
}

/// Same format for `Option<DateTime<Utc>>`; `null` maps to `None`.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw).map(Some).map_err(|e| {
                D::Error::custom(format_args!("expected `yyyy-MM-dd HH:mm:ss`, got `{raw}` ({e})"))
            }),
            None => Ok(None),
        }
    }
}

//! Serde helpers for dataset timestamps.
//!
//! Records are emitted as `YYYY-MM-DDTHH:MM:SS`. Both the `T` and the space
//! separator are accepted on input, with optional fractional seconds.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

const EMIT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const ACCEPTED_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a timestamp in any accepted layout.
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw.trim(), format).ok())
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(EMIT_FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid timestamp '{raw}', expected YYYY-MM-DDTHH:MM:SS"
        ))
    })
}

pub mod option {
    use super::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| {
                super::parse(&raw).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "invalid timestamp '{raw}', expected YYYY-MM-DDTHH:MM:SS"
                    ))
                })
            })
            .transpose()
    }
}

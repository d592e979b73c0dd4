//! `HH:MM:SS` (de)serialization for time-of-day fields.

use time::{format_description::FormatItem, macros::format_description, Time};

pub const HMS: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");
const HM: &[FormatItem<'static>] = format_description!("[hour]:[minute]");

/// Accepts `HH:MM:SS` or `HH:MM`.
pub fn parse(s: &str) -> Result<Time, time::error::Parse> {
    Time::parse(s, HMS).or_else(|_| Time::parse(s, HM))
}

pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Time;

    pub fn serialize<S: Serializer>(value: &Option<Time>, ser: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => {
                let s = t.format(super::HMS).map_err(serde::ser::Error::custom)?;
                ser.serialize_some(&s)
            }
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Time>, D::Error> {
        match Option::<String>::deserialize(de)? {
            Some(s) => super::parse(&s).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

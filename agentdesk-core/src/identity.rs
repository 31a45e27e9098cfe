//! Identity types for console resources

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Server-issued opaque identifier.
///
/// The backend hands out either strings or integers depending on the
/// resource; both are normalised to their string form so that identifiers
/// compare uniformly. The client never mints one of these for a resource
/// that has not been created yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<i64> for ResourceId {
    fn from(raw: i64) -> Self {
        Self(raw.to_string())
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => ResourceId(text),
            Raw::Signed(n) => ResourceId(n.to_string()),
            Raw::Unsigned(n) => ResourceId(n.to_string()),
        })
    }
}

/// Lenient timestamp decoding.
///
/// Accepts RFC 3339 as well as the naive `YYYY-MM-DDTHH:MM:SS[.f]` form some
/// backend endpoints emit (interpreted as UTC). Missing or null values decode
/// to `None`.
pub mod lenient_timestamp {
    use super::*;
    use serde::de::Error as _;
    use serde::Serializer;

    pub fn serialize<S>(value: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_some(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => parse(&text).map(Some).map_err(D::Error::custom),
        }
    }

    pub fn parse(text: &str) -> Result<Timestamp, String> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
            return Ok(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
            .map(|naive| naive.and_utc())
            .map_err(|e| format!("invalid timestamp '{}': {}", text, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_id_accepts_numbers_and_strings() {
        let ids: Vec<ResourceId> = serde_json::from_str(r#"["t1", 42, 7]"#).unwrap();
        assert_eq!(ids, vec!["t1".into(), ResourceId::from(42), ResourceId::from(7)]);
        assert_eq!(serde_json::to_string(&ids[1]).unwrap(), "\"42\"");
    }

    #[test]
    fn naive_timestamps_are_read_as_utc() {
        let ts = lenient_timestamp::parse("2024-03-01T10:20:30.123").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T10:20:30.123+00:00");
        assert!(lenient_timestamp::parse("yesterday").is_err());
    }
}

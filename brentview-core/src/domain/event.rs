//! Curated world events.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A curated market event. Descriptive fields default to empty when the
/// server omits them or sends `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_date: NaiveDate,
    pub event_title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub event_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

/// A missing or `null` descriptive string reads as `""`.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_descriptive_fields_default_to_empty() {
        let ev: EventRecord =
            serde_json::from_str(r#"{"event_date":"2014-11-27","event_title":"OPEC holds output"}"#)
                .unwrap();
        assert_eq!(ev.event_title, "OPEC holds output");
        assert!(ev.event_type.is_empty());
        assert!(ev.region.is_empty());
        assert!(ev.notes.is_empty());
    }

    #[test]
    fn null_descriptive_fields_read_as_empty() {
        let ev: EventRecord = serde_json::from_str(
            r#"{"event_date":"2020-03-01","event_title":"X","event_type":"Policy","region":null,"notes":null}"#,
        )
        .unwrap();
        assert_eq!(ev.event_type, "Policy");
        assert!(ev.region.is_empty());
        assert!(ev.notes.is_empty());
    }

    #[test]
    fn event_date_is_required() {
        let res: Result<EventRecord, _> = serde_json::from_str(r#"{"event_title":"x"}"#);
        assert!(res.is_err());
    }
}

//! Record structure

use super::log_type::{Level, LogType};
use super::meta::Meta;
use serde::{Deserialize, Serialize};

/// Snapshot of one emission as delivered to a record sink.
///
/// `content` is rendered against the receiving target, so two targets with
/// different color or length settings see different content for the same `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LogType,
    pub level: Level,
    pub content: String,
    #[serde(default, skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl Record {
    pub fn new(id: u64, timestamp: i64, name: impl Into<String>, kind: LogType) -> Self {
        Self {
            id,
            timestamp,
            name: name.into(),
            kind,
            level: kind.rank(),
            content: String::new(),
            meta: Meta::new(),
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    pub fn to_json(&self) -> super::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json() {
        let record = Record::new(7, 1_000, "app:db", LogType::Warn)
            .with_content("slow query")
            .with_meta(Meta::new().with_field("shard", 3));

        let json: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["type"], "warn");
        assert_eq!(json["level"], 2);
        assert_eq!(json["content"], "slow query");
        assert_eq!(json["meta"]["shard"], 3);
    }

    #[test]
    fn test_empty_meta_skipped() {
        let record = Record::new(1, 0, "app", LogType::Info);
        let json = record.to_json().unwrap();
        assert!(!json.contains("meta"));
        let parsed: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}

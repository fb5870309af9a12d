//! Named records supplied by the persistence layer.

use serde::{Deserialize, Serialize};

/// Opaque record identifier assigned by the store.
pub type RecordId = String;

/// A stored record carrying a free-text exercise name.
///
/// `payload` is owned by the caller (weight, reps, timestamp, ...) and is
/// never interpreted here. Records are read-only from the engine's point of
/// view: renames are proposed through a [`crate::MergePlan`], not applied in
/// place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRecord<P = serde_json::Value> {
    pub id: RecordId,
    pub name: String,
    #[serde(default, bound(deserialize = "P: Deserialize<'de> + Default"))]
    pub payload: P,
}

impl<P: Default> NameRecord<P> {
    /// Create a record with an empty payload.
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            payload: P::default(),
        }
    }
}

impl<P> NameRecord<P> {
    /// Create a record with the given payload.
    pub fn with_payload(id: impl Into<RecordId>, name: impl Into<String>, payload: P) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            payload,
        }
    }

    /// Copy of this record carrying a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self
    where
        P: Clone,
    {
        Self {
            id: self.id.clone(),
            name: name.into(),
            payload: self.payload.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_defaults_when_missing() {
        let record: NameRecord = serde_json::from_str(r#"{"id": "r1", "name": "Squat"}"#).unwrap();
        assert_eq!(record.id, "r1");
        assert_eq!(record.name, "Squat");
        assert_eq!(record.payload, serde_json::Value::Null);
    }

    #[test]
    fn test_payload_roundtrip() {
        let record = NameRecord::with_payload("r2", "Deadlift", json!({"weight": 140, "reps": 5}));
        let json = serde_json::to_string(&record).unwrap();
        let back: NameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_renamed_keeps_id_and_payload() {
        let record = NameRecord::with_payload("r3", "Squats", 100u32);
        let renamed = record.renamed("Squat");
        assert_eq!(renamed.id, "r3");
        assert_eq!(renamed.name, "Squat");
        assert_eq!(renamed.payload, 100);
        assert_eq!(record.name, "Squats");
    }
}

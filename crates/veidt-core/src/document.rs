//! The persisted record document
//!
//! A `Document` is one JSON object whose top-level keys name collections.
//! Each collection is an ordered array of records. Records are kept as raw
//! JSON values so fields this crate does not know about survive a
//! load/save cycle untouched; the typed models are projections over them.
//!
//! ## Seed defaults
//!
//! When no valid document has been stored, the seed document is used: one
//! demo member, one in-network clinic, one membership, and four empty
//! collections reserved for later use.
//!
//! A stored document is merged over the seed at the collection level. A
//! collection present in storage replaces the seeded one wholesale; a
//! missing collection is filled from the seed.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::models::{Clinic, Membership, Plan, Role, User};
use crate::storage::{StorageError, StorageResult};

/// Slot key the document is persisted under
pub const STORAGE_KEY: &str = "veidt_db_v1";

/// Collection names
pub mod collections {
    pub const USERS: &str = "users";
    pub const CLINICS: &str = "clinics";
    pub const MEMBERSHIPS: &str = "memberships";
    pub const STUDIES: &str = "studies";
    pub const SUGGESTIONS: &str = "suggestions";
    pub const PLAN_PROPOSALS: &str = "planProposals";
    pub const SESSIONS: &str = "sessions";

    /// Every collection a document always carries, in seed order
    pub const ALL: [&str; 7] = [
        USERS,
        CLINICS,
        MEMBERSHIPS,
        STUDIES,
        SUGGESTIONS,
        PLAN_PROPOSALS,
        SESSIONS,
    ];
}

/// Identifier of the seeded demo member
pub const SEED_USER_ID: &str = "u_member_1";

/// Identifier of the seeded in-network clinic
pub const SEED_CLINIC_ID: &str = "c_vida_sana";

/// Identifier of the seeded membership
pub const SEED_MEMBERSHIP_ID: &str = "m_1";

/// The whole persisted state: named collections of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    entries: Map<String, Value>,
}

impl Document {
    /// Create a document with no collections at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the seed document
    ///
    /// Timestamps are taken now.
    pub fn seed() -> Self {
        let now = Utc::now();

        let user = User {
            id: SEED_USER_ID.to_string(),
            role: Role::Member,
            email: "miembro@veidt.health".to_string(),
            password: "demo123".to_string(),
            name: "Ana Pérez".to_string(),
            created_at: now,
        };

        let clinic = Clinic {
            id: SEED_CLINIC_ID.to_string(),
            name: "Clínica Vida Sana".to_string(),
            address: "Av. Principal 123".to_string(),
            phone: "+49 555 0101".to_string(),
            in_network: true,
        };

        let membership = Membership {
            id: SEED_MEMBERSHIP_ID.to_string(),
            user_id: user.id.clone(),
            plan: Plan::Pleno,
            discount_percent: Plan::Pleno.discount_percent(),
            active: true,
            clinic_id: clinic.id.clone(),
            beneficiaries: vec![user.name.clone()],
            created_at: now,
            expires_at: None,
        };

        let mut doc = Self::empty();
        for name in collections::ALL {
            doc.entries.insert(name.to_string(), Value::Array(Vec::new()));
        }
        doc.push(collections::USERS, json!(user));
        doc.push(collections::CLINICS, json!(clinic));
        doc.push(collections::MEMBERSHIPS, json!(membership));
        doc
    }

    /// Parse a stored document
    ///
    /// Fails with `StorageError::Corrupt` if the text is not JSON or its top
    /// level is not an object.
    pub fn from_json(raw: &str) -> StorageResult<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|e| StorageError::Corrupt {
            key: STORAGE_KEY.to_string(),
            details: e.to_string(),
        })?;

        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(StorageError::Corrupt {
                key: STORAGE_KEY.to_string(),
                details: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    /// Serialize for storage
    pub fn to_json(&self) -> StorageResult<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Lay this document over the seed defaults
    ///
    /// Top-level entries from `self` replace seeded entries of the same name
    /// as a whole; seeded collections missing from `self` are kept.
    pub fn merged_over_seed(self) -> Self {
        let mut merged = Self::seed();
        merged.entries.extend(self.entries);
        merged
    }

    /// Records of a collection, or `None` if it is absent or not an array
    pub fn collection(&self, name: &str) -> Option<&[Value]> {
        self.entries
            .get(name)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// Number of records in a collection (zero if absent)
    pub fn collection_len(&self, name: &str) -> usize {
        self.collection(name).map_or(0, <[Value]>::len)
    }

    /// Whether a top-level entry of this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Names of all top-level entries
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Append a record to a collection, creating the collection if absent
    pub fn push(&mut self, name: &str, record: Value) {
        let entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));

        if !entry.is_array() {
            warn!(
                collection = name,
                found = json_kind(entry),
                "collection entry is not an array, replacing it"
            );
            *entry = Value::Array(Vec::new());
        }

        if let Value::Array(records) = entry {
            records.push(record);
        }
    }

    /// Typed view of a collection
    ///
    /// Records that do not match `T` are skipped.
    pub fn records_as<T: DeserializeOwned>(&self, name: &str) -> Vec<T> {
        self.collection(name)
            .unwrap_or_default()
            .iter()
            .filter_map(|record| serde_json::from_value(record.clone()).ok())
            .collect()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_contents() {
        let doc = Document::seed();

        for name in collections::ALL {
            assert!(doc.contains(name), "missing collection {}", name);
        }
        assert_eq!(doc.names().count(), 7);
        assert_eq!(doc.collection_len(collections::USERS), 1);
        assert_eq!(doc.collection_len(collections::CLINICS), 1);
        assert_eq!(doc.collection_len(collections::MEMBERSHIPS), 1);
        assert_eq!(doc.collection_len(collections::STUDIES), 0);
        assert_eq!(doc.collection_len(collections::SUGGESTIONS), 0);
        assert_eq!(doc.collection_len(collections::PLAN_PROPOSALS), 0);
        assert_eq!(doc.collection_len(collections::SESSIONS), 0);

        let users: Vec<User> = doc.records_as(collections::USERS);
        assert_eq!(users[0].id, SEED_USER_ID);
        assert_eq!(users[0].email, "miembro@veidt.health");

        let memberships: Vec<Membership> = doc.records_as(collections::MEMBERSHIPS);
        assert_eq!(memberships[0].user_id, SEED_USER_ID);
        assert_eq!(memberships[0].clinic_id, SEED_CLINIC_ID);
        assert_eq!(memberships[0].discount_percent, 30);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = Document::from_json("{not json").unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));

        let err = Document::from_json("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_merge_replaces_whole_collections() {
        let stored = Document::from_json(
            r#"{"users": [{"id": "u_x", "email": "x@example.com", "nickname": "x"}]}"#,
        )
        .unwrap();

        let merged = stored.merged_over_seed();

        // Stored users replace seeded users, they are not appended to them
        let users = merged.collection(collections::USERS).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["id"], "u_x");
        // Unknown fields pass through
        assert_eq!(users[0]["nickname"], "x");

        // Missing collections come from the seed
        assert_eq!(merged.collection_len(collections::CLINICS), 1);
        assert_eq!(merged.collection_len(collections::MEMBERSHIPS), 1);
        assert!(merged.contains(collections::SESSIONS));
    }

    #[test]
    fn test_merge_keeps_unknown_top_level_entries() {
        let stored = Document::from_json(r#"{"schema": 2, "favorites": []}"#).unwrap();
        let merged = stored.merged_over_seed();

        assert!(merged.contains("schema"));
        assert!(merged.contains("favorites"));
        assert_eq!(merged.names().count(), 9);
    }

    #[test]
    fn test_push_creates_collection() {
        let mut doc = Document::empty();
        doc.push("studies", json!({"id": "s_1"}));
        doc.push("studies", json!({"id": "s_2"}));

        let studies = doc.collection("studies").unwrap();
        assert_eq!(studies.len(), 2);
        assert_eq!(studies[1]["id"], "s_2");
    }

    #[test]
    fn test_push_replaces_non_array_entry() {
        let mut doc = Document::from_json(r#"{"users": null}"#).unwrap();
        assert!(doc.collection(collections::USERS).is_none());

        doc.push(collections::USERS, json!({"id": "u_1"}));
        assert_eq!(doc.collection_len(collections::USERS), 1);
    }

    #[test]
    fn test_records_as_skips_mismatched_records() {
        let mut doc = Document::seed();
        doc.push(collections::CLINICS, json!({"id": "c_partial"}));

        let clinics: Vec<Clinic> = doc.records_as(collections::CLINICS);
        assert_eq!(clinics.len(), 1);
        assert_eq!(clinics[0].id, SEED_CLINIC_ID);
    }

    #[test]
    fn test_json_round_trip() {
        let mut doc = Document::seed();
        doc.push(collections::USERS, json!({"id": "u_2"}));

        let parsed = Document::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }
}

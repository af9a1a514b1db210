//! Data models for Veidt
//!
//! Defines the records kept in the document collections (User, Clinic,
//! Membership) and the fixed plan catalog. Field names serialize in
//! camelCase to stay compatible with documents written by the web front-end.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Generate a fresh record identifier with a short type prefix
///
/// e.g. `u_9f1c0b6c3d2e4f5a8b7c6d5e4f3a2b1c`
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// Role of a registered user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
}

/// A registered user
///
/// The password is kept as given. This is a demo store, not an
/// authentication system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub role: Role,
    pub email: String,
    pub password: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A clinic where memberships can be used
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Clinic {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Whether the clinic honors membership discounts
    pub in_network: bool,
}

/// A subscription linking a user to a plan and a clinic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: String,
    /// Owning user
    pub user_id: String,
    pub plan: Plan,
    /// Discount in percent, 0 to 100
    pub discount_percent: u8,
    pub active: bool,
    pub clinic_id: String,
    /// People covered by the membership, in the order they were added
    pub beneficiaries: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Membership {
    /// Create an active membership for a freshly registered user
    ///
    /// The user is the only beneficiary and the discount comes from the plan.
    pub fn new(user: &User, plan: Plan, clinic_id: impl Into<String>) -> Self {
        Self {
            id: new_id("m"),
            user_id: user.id.clone(),
            plan,
            discount_percent: plan.discount_percent(),
            active: true,
            clinic_id: clinic_id.into(),
            beneficiaries: vec![user.name.clone()],
            created_at: Utc::now(),
            expires_at: None,
        }
    }
}

/// Error returned when a string names no plan in the catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown plan '{0}'. Available plans: esencial, pleno")]
pub struct UnknownPlan(pub String);

/// The fixed membership catalog
///
/// Serialized by display name ("Esencial $1", "Pleno $2").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    /// Lowest tier, used when no plan was selected
    #[default]
    #[serde(rename = "Esencial $1")]
    Esencial,
    #[serde(rename = "Pleno $2")]
    Pleno,
}

impl Plan {
    /// All plans, cheapest first
    pub const ALL: [Plan; 2] = [Plan::Esencial, Plan::Pleno];

    /// Maximum number of beneficiaries on any plan
    pub const MAX_BENEFICIARIES: usize = 5;

    /// Display name, also the persisted value
    pub fn name(self) -> &'static str {
        match self {
            Plan::Esencial => "Esencial $1",
            Plan::Pleno => "Pleno $2",
        }
    }

    /// Short key accepted on the command line
    pub fn key(self) -> &'static str {
        match self {
            Plan::Esencial => "esencial",
            Plan::Pleno => "pleno",
        }
    }

    /// Monthly price in dollars
    pub fn monthly_price(self) -> u32 {
        match self {
            Plan::Esencial => 1,
            Plan::Pleno => 2,
        }
    }

    /// Discount on consultations and labs, in percent
    pub fn discount_percent(self) -> u8 {
        match self {
            Plan::Esencial => 15,
            Plan::Pleno => 30,
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            Plan::Esencial => "For checkups and basic consultations",
            Plan::Pleno => "More savings day to day",
        }
    }

    /// Feature bullets shown on the pricing card
    pub fn features(self) -> [String; 2] {
        [
            format!("Up to {} beneficiaries", Self::MAX_BENEFICIARIES),
            format!(
                "≈{}% off consultations and labs",
                self.discount_percent()
            ),
        ]
    }

    /// Whether the plan is highlighted as the most popular
    pub fn is_popular(self) -> bool {
        matches!(self, Plan::Pleno)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Plan {
    type Err = UnknownPlan;

    /// Parse a plan from its key or display name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Plan::ALL
            .into_iter()
            .find(|plan| {
                plan.key().eq_ignore_ascii_case(wanted) || plan.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownPlan(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_user() -> User {
        User {
            id: new_id("u"),
            role: Role::Member,
            email: "luis@example.com".to_string(),
            password: "secret".to_string(),
            name: "Luis Gómez".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_id_has_prefix_and_is_unique() {
        let a = new_id("u");
        let b = new_id("u");
        assert!(a.starts_with("u_"));
        assert_eq!(a.len(), 34);
        assert_ne!(a, b);
    }

    #[test]
    fn test_plan_catalog() {
        assert_eq!(Plan::Esencial.monthly_price(), 1);
        assert_eq!(Plan::Esencial.discount_percent(), 15);
        assert_eq!(Plan::Pleno.monthly_price(), 2);
        assert_eq!(Plan::Pleno.discount_percent(), 30);
        assert_eq!(Plan::default(), Plan::Esencial);
        assert!(Plan::Pleno.is_popular());
        assert!(!Plan::Esencial.is_popular());
        assert!(Plan::Pleno.features()[1].contains("30%"));
    }

    #[test]
    fn test_plan_from_str() {
        assert_eq!("esencial".parse::<Plan>().unwrap(), Plan::Esencial);
        assert_eq!("PLENO".parse::<Plan>().unwrap(), Plan::Pleno);
        assert_eq!("Pleno $2".parse::<Plan>().unwrap(), Plan::Pleno);
        assert_eq!(" esencial $1 ".parse::<Plan>().unwrap(), Plan::Esencial);

        let err = "premium".parse::<Plan>().unwrap_err();
        assert_eq!(err, UnknownPlan("premium".to_string()));
    }

    #[test]
    fn test_plan_serializes_as_display_name() {
        assert_eq!(serde_json::to_value(Plan::Pleno).unwrap(), json!("Pleno $2"));
        let plan: Plan = serde_json::from_value(json!("Esencial $1")).unwrap();
        assert_eq!(plan, Plan::Esencial);
    }

    #[test]
    fn test_user_uses_camel_case_fields() {
        let user = sample_user();
        let value = serde_json::to_value(&user).unwrap();

        assert_eq!(value["role"], json!("member"));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_membership_new() {
        let user = sample_user();
        let membership = Membership::new(&user, Plan::Pleno, "c_vida_sana");

        assert!(membership.id.starts_with("m_"));
        assert_eq!(membership.user_id, user.id);
        assert_eq!(membership.discount_percent, 30);
        assert!(membership.active);
        assert_eq!(membership.beneficiaries, vec!["Luis Gómez".to_string()]);
        assert!(membership.expires_at.is_none());

        let value = serde_json::to_value(&membership).unwrap();
        assert_eq!(value["expiresAt"], serde_json::Value::Null);
        assert_eq!(value["plan"], json!("Pleno $2"));
        assert_eq!(value["discountPercent"], json!(30));
    }

    #[test]
    fn test_membership_reads_front_end_record() {
        let record = json!({
            "id": "m_1",
            "userId": "u_member_1",
            "plan": "Pleno $2",
            "discountPercent": 30,
            "active": true,
            "clinicId": "c_vida_sana",
            "beneficiaries": ["Ana Pérez"],
            "createdAt": "2025-01-10T12:30:00.000Z",
            "expiresAt": null
        });

        let membership: Membership = serde_json::from_value(record).unwrap();
        assert_eq!(membership.plan, Plan::Pleno);
        assert_eq!(membership.user_id, "u_member_1");
    }
}

//! Signup workflow
//!
//! Registers a member and activates their membership in one step:
//!
//! 1. Trim the form's name and email
//! 2. Register the user (email must be unused)
//! 3. Create one active membership on the selected plan (lowest tier when
//!    none was selected), at the seeded in-network clinic, with the new
//!    member as the only beneficiary
//!
//! If registration fails nothing is written. The outcome converts into a
//! `Notice` for the toast queue.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::document::{collections, SEED_CLINIC_ID};
use crate::models::{Clinic, Membership, Plan, User};
use crate::session::{NewUser, RegistrationError, SessionService};
use crate::store::RecordStore;

/// Fields collected by the signup dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Registration payload with surrounding whitespace removed from name
    /// and email. The password is passed through as typed.
    pub fn to_new_user(&self) -> NewUser {
        NewUser::member(self.name.trim(), self.email.trim(), self.password.clone())
    }
}

/// A registered user together with their new membership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub user: User,
    pub membership: Membership,
}

/// Register a member and activate a membership for them
pub fn enroll<R: RecordStore>(
    store: &R,
    form: &SignupForm,
    plan: Option<Plan>,
) -> Result<Enrollment, RegistrationError> {
    let plan = plan.unwrap_or_default();

    let user = SessionService::new(store).register(form.to_new_user())?;

    // Memberships always belong to the seeded clinic, whatever else is stored
    match store.find_one_as::<Clinic, _>(collections::CLINICS, |c| c.id == SEED_CLINIC_ID) {
        Some(clinic) if clinic.in_network => {}
        Some(_) => warn!(clinic_id = SEED_CLINIC_ID, "seeded clinic is marked out of network"),
        None => warn!(clinic_id = SEED_CLINIC_ID, "seeded clinic missing from stored records"),
    }
    let clinic_id = SEED_CLINIC_ID.to_string();

    let membership = store.insert_as(
        collections::MEMBERSHIPS,
        Membership::new(&user, plan, clinic_id),
    )?;

    info!(
        user_id = %user.id,
        membership_id = %membership.id,
        plan = %plan,
        "membership activated"
    );

    Ok(Enrollment { user, membership })
}

/// Short user-facing message describing an outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn from_outcome(outcome: &Result<Enrollment, RegistrationError>) -> Self {
        match outcome {
            Ok(enrollment) => Self {
                title: "Membership activated!".to_string(),
                description: format!("Your plan {} is ready.", enrollment.membership.plan),
            },
            Err(e) => Self {
                title: "Registration error".to_string(),
                description: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::store::Store;
    use serde_json::json;

    fn form(email: &str) -> SignupForm {
        SignupForm::new("Marta Ruiz", email, "hunter2")
    }

    #[test]
    fn test_enroll_pleno() {
        let store = Store::in_memory();

        let enrollment = enroll(&store, &form("marta@example.com"), Some(Plan::Pleno)).unwrap();
        let membership = &enrollment.membership;

        assert_eq!(membership.plan, Plan::Pleno);
        assert_eq!(membership.discount_percent, 30);
        assert!(membership.active);
        assert_eq!(membership.beneficiaries, vec!["Marta Ruiz".to_string()]);
        assert_eq!(membership.user_id, enrollment.user.id);
        assert_eq!(membership.clinic_id, SEED_CLINIC_ID);
        assert!(membership.expires_at.is_none());

        let stored: Vec<Membership> = store.all_as(collections::MEMBERSHIPS);
        assert_eq!(stored.len(), 2);
        assert_eq!(stored.last(), Some(membership));
    }

    #[test]
    fn test_enroll_esencial_and_default_plan() {
        let store = Store::in_memory();

        let esencial = enroll(&store, &form("a@example.com"), Some(Plan::Esencial)).unwrap();
        assert_eq!(esencial.membership.discount_percent, 15);

        let default = enroll(&store, &form("b@example.com"), None).unwrap();
        assert_eq!(default.membership.plan, Plan::Esencial);
        assert_eq!(default.membership.discount_percent, 15);
    }

    #[test]
    fn test_enroll_trims_name_and_email() {
        let store = Store::in_memory();
        let form = SignupForm::new("  Marta Ruiz ", " marta@example.com  ", " pw ");

        let enrollment = enroll(&store, &form, None).unwrap();

        assert_eq!(enrollment.user.name, "Marta Ruiz");
        assert_eq!(enrollment.user.email, "marta@example.com");
        assert_eq!(enrollment.user.password, " pw ");
        assert_eq!(enrollment.membership.beneficiaries, vec!["Marta Ruiz".to_string()]);
    }

    #[test]
    fn test_duplicate_creates_no_membership() {
        let store = Store::in_memory();
        enroll(&store, &form("dup@example.com"), None).unwrap();

        let users_before = store.load().collection_len(collections::USERS);
        let memberships_before = store.load().collection_len(collections::MEMBERSHIPS);

        let err = enroll(&store, &form(" dup@example.com "), Some(Plan::Pleno)).unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateEmail { .. }));

        let doc = store.load();
        assert_eq!(doc.collection_len(collections::USERS), users_before);
        assert_eq!(doc.collection_len(collections::MEMBERSHIPS), memberships_before);
    }

    #[test]
    fn test_enroll_ignores_other_in_network_clinics() {
        let store = Store::in_memory();
        let mut doc = Document::empty();
        doc.push(
            collections::CLINICS,
            json!({"id": "c_other", "name": "Otra", "address": "Calle 2", "phone": "0", "inNetwork": true}),
        );
        let seed = Document::seed();
        for seeded in seed.collection(collections::CLINICS).unwrap() {
            doc.push(collections::CLINICS, seeded.clone());
        }
        store.save(&doc).unwrap();

        let enrollment = enroll(&store, &form("c@example.com"), None).unwrap();
        assert_eq!(enrollment.membership.clinic_id, SEED_CLINIC_ID);
    }

    #[test]
    fn test_enroll_keeps_seed_clinic_when_it_is_missing() {
        let store = Store::in_memory();
        let mut doc = Document::empty();
        doc.push(
            collections::CLINICS,
            json!({"id": "c_out", "name": "Fuera", "address": "Calle 3", "phone": "1", "inNetwork": false}),
        );
        store.save(&doc).unwrap();

        let enrollment = enroll(&store, &form("d@example.com"), None).unwrap();
        assert_eq!(enrollment.membership.clinic_id, SEED_CLINIC_ID);
    }

    #[test]
    fn test_notice_from_outcome() {
        let store = Store::in_memory();

        let ok = enroll(&store, &form("n@example.com"), Some(Plan::Pleno));
        let notice = Notice::from_outcome(&ok);
        assert_eq!(notice.title, "Membership activated!");
        assert_eq!(notice.description, "Your plan Pleno $2 is ready.");

        let err = enroll(&store, &form("n@example.com"), None);
        let notice = Notice::from_outcome(&err);
        assert_eq!(notice.title, "Registration error");
        assert!(notice.description.contains("already registered"));
    }
}

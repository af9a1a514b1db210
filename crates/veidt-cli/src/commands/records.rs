//! Record listing handlers

use anyhow::Result;

use veidt_core::document::collections;
use veidt_core::{Membership, RecordStore, SessionService, User};

use crate::output::Output;

/// List registered users, or only the one registered with `email`
pub fn users<R: RecordStore>(store: &R, email: Option<String>, output: &Output) -> Result<()> {
    let users: Vec<User> = match email {
        Some(email) => SessionService::new(store)
            .find_by_email(&email)
            .into_iter()
            .collect(),
        None => store.all_as(collections::USERS),
    };
    output.print_users(&users);
    Ok(())
}

/// List memberships, optionally only those owned by one user
pub fn memberships<R: RecordStore>(
    store: &R,
    user_id: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut memberships: Vec<Membership> = store.all_as(collections::MEMBERSHIPS);
    if let Some(ref id) = user_id {
        memberships.retain(|m| &m.user_id == id);
    }
    output.print_memberships(&memberships);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use veidt_core::{enroll, Plan, SignupForm, Store};

    #[test]
    fn test_listing_reads_typed_records() {
        let store = Store::in_memory();
        let form = SignupForm::new("Rosa", "rosa@example.com", "pw");
        let enrollment = enroll(&store, &form, Some(Plan::Pleno)).unwrap();
        let output = Output::new(OutputFormat::Quiet);

        users(&store, None, &output).unwrap();
        users(&store, Some("rosa@example.com".to_string()), &output).unwrap();
        users(&store, Some("nobody@example.com".to_string()), &output).unwrap();
        memberships(&store, Some(enrollment.user.id), &output).unwrap();
        memberships(&store, None, &output).unwrap();

        let all: Vec<Membership> = store.all_as(collections::MEMBERSHIPS);
        assert_eq!(all.len(), 2);
    }
}

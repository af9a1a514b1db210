//! Command handlers

pub mod config;
pub mod plans;
pub mod records;
pub mod register;
pub mod reset;
pub mod status;

use veidt_core::{RegistrationError, StorageError};

/// Follow-up advice for a failed command, if there is any
pub fn hint_for(err: &anyhow::Error) -> Option<String> {
    let storage = match err.downcast_ref::<RegistrationError>() {
        Some(RegistrationError::Storage(e)) => Some(e),
        Some(e) if e.is_user_correctable() => {
            return Some(
                "Correct the --name, --email or --password value and run the command again."
                    .to_string(),
            );
        }
        Some(_) => None,
        None => err.downcast_ref::<StorageError>(),
    }?;

    if storage.is_recoverable() {
        storage.recovery_suggestion().map(str::to_string)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::io;
    use std::path::PathBuf;

    fn disk_full() -> StorageError {
        StorageError::from_io(
            io::Error::new(io::ErrorKind::Other, "No space left on device"),
            PathBuf::from("/data/veidt_db_v1.json"),
        )
    }

    #[test]
    fn test_hint_for_correctable_registration() {
        let err = anyhow::Error::new(RegistrationError::DuplicateEmail {
            email: "a@example.com".to_string(),
        })
        .context("Registration failed");

        assert!(hint_for(&err).unwrap().contains("--email"));
    }

    #[test]
    fn test_hint_for_storage_failures() {
        let wrapped = anyhow::Error::new(RegistrationError::Storage(disk_full()));
        assert!(hint_for(&wrapped).unwrap().contains("disk space"));

        let direct: anyhow::Result<()> = Err(disk_full()).context("Failed to reset records");
        assert!(hint_for(&direct.unwrap_err()).unwrap().contains("disk space"));
    }

    #[test]
    fn test_no_hint_for_unrecoverable_errors() {
        let io_err = io::Error::new(io::ErrorKind::Other, "broken pipe");
        let err = anyhow::Error::new(StorageError::from_io(io_err, PathBuf::from("/x")));
        assert!(hint_for(&err).is_none());

        assert!(hint_for(&anyhow::anyhow!("Unknown configuration key")).is_none());
    }
}

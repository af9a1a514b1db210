//! Reset command handler

use anyhow::{bail, Context, Result};

use veidt_core::document::collections;
use veidt_core::{KeyValueSlot, Store};

use crate::output::Output;

/// Overwrite stored records with the seed defaults
pub fn reset<S: KeyValueSlot>(store: &Store<S>, yes: bool, output: &Output) -> Result<()> {
    if !yes {
        bail!("This replaces every stored record with the demo data. Re-run with --yes to confirm.");
    }

    let doc = store.reset().context("Failed to reset records")?;

    output.success(&format!(
        "Store reset: {} user(s), {} clinic(s), {} membership(s)",
        doc.collection_len(collections::USERS),
        doc.collection_len(collections::CLINICS),
        doc.collection_len(collections::MEMBERSHIPS)
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use serde_json::json;
    use veidt_core::RecordStore;

    #[test]
    fn test_reset_requires_confirmation() {
        let store = Store::in_memory();
        store
            .insert(collections::STUDIES, json!({"id": "s_1"}))
            .unwrap();

        let output = Output::new(OutputFormat::Quiet);
        assert!(reset(&store, false, &output).is_err());
        assert_eq!(store.load().collection_len(collections::STUDIES), 1);

        reset(&store, true, &output).unwrap();
        assert_eq!(store.load().collection_len(collections::STUDIES), 0);
    }
}

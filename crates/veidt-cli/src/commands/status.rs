//! Status command handler

use anyhow::Result;
use serde_json::{Map, Value};

use veidt_core::document::collections;
use veidt_core::{Config, FileSlot, KeyValueSlot, RecordStore, StorageError, Store};

use crate::output::{Output, OutputFormat};

/// Show storage location and collection counts
pub fn show(store: &Store<FileSlot>, config: &Config, output: &Output) -> Result<()> {
    let health = Health::check(store);
    let doc = store.load();
    let counts: Vec<(&str, usize)> = collections::ALL
        .iter()
        .map(|&name| (name, doc.collection_len(name)))
        .collect();

    match output.format {
        OutputFormat::Json => {
            let json_counts: Map<String, Value> = counts
                .iter()
                .map(|(name, count)| (name.to_string(), Value::from(*count)))
                .collect();
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "document": store.path(),
                    "persisted": store.is_persisted(),
                    "size": store.stored_size(),
                    "health": health.label(),
                    "problem": health.problem(),
                    "suggestion": health.suggestion(),
                    "counts": json_counts
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.path().display());
        }
        OutputFormat::Human => {
            println!("Veidt Status");
            println!("============");
            println!();
            println!("Storage:");
            println!("  Location: {}", store.path().display());
            match store.stored_size() {
                Some(size) => println!("  Size:     {}", human_size(size)),
                None => println!("  Size:     (not saved yet, showing demo data)"),
            }
            println!("  Health:   {}", health.label());
            if let Some(problem) = health.problem() {
                println!("  Problem:  {}", problem);
            }
            if let Some(suggestion) = health.suggestion() {
                println!("  Fix:      {}", suggestion);
            }
            println!();
            println!("Collections:");
            for (name, count) in &counts {
                println!("  {:<14} {}", name, count);
            }
        }
    }

    Ok(())
}

/// Whether the persisted document can be read back as-is
enum Health {
    /// Nothing saved yet
    Empty,
    Ok,
    /// Unreadable or corrupt; `load` is serving the seed defaults
    Broken(StorageError),
}

impl Health {
    fn check<S: KeyValueSlot>(store: &Store<S>) -> Self {
        match store.stored_document() {
            Ok(Some(_)) => Health::Ok,
            Ok(None) => Health::Empty,
            Err(e) => Health::Broken(e),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Health::Empty => "empty",
            Health::Ok => "ok",
            Health::Broken(_) => "broken",
        }
    }

    fn problem(&self) -> Option<String> {
        match self {
            Health::Broken(e) => Some(e.to_string()),
            _ => None,
        }
    }

    fn suggestion(&self) -> Option<&'static str> {
        match self {
            Health::Broken(e) => e.recovery_suggestion(),
            _ => None,
        }
    }
}

fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

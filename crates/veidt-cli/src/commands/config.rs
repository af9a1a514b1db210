//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use veidt_core::Config;

use crate::output::{Output, OutputFormat};

/// Keys accepted by `config set`
const VALID_KEYS: &str = "data_dir, log_file, toast_ttl_ms, rotator_interval_ms";

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "log_file": config.log_file,
                    "toast_ttl_ms": config.toast_ttl_ms,
                    "rotator_interval_ms": config.rotator_interval_ms
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:            {}", config.data_dir.display());
            println!(
                "  log_file:            {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!("  toast_ttl_ms:        {}", config.toast_ttl_ms);
            println!("  rotator_interval_ms: {}", config.rotator_interval_ms);
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply one key/value pair to a configuration
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        "toast_ttl_ms" => {
            config.toast_ttl_ms = value
                .parse()
                .context("Invalid value for toast_ttl_ms. Use a number of milliseconds.")?;
        }
        "rotator_interval_ms" => {
            config.rotator_interval_ms = value
                .parse()
                .context("Invalid value for rotator_interval_ms. Use a number of milliseconds.")?;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\nValid keys: {}",
                key,
                VALID_KEYS
            );
        }
    }
    config.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "data_dir", "/srv/veidt").unwrap();
        apply(&mut config, "log_file", "/tmp/veidt.log").unwrap();
        apply(&mut config, "toast_ttl_ms", "2500").unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/veidt"));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/veidt.log")));
        assert_eq!(config.toast_ttl_ms, 2500);

        apply(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_set_writes_config_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let data_dir = temp_dir.path().join("data");
        let output = Output::new(OutputFormat::Quiet);

        set(
            "data_dir".to_string(),
            data_dir.display().to_string(),
            Some(&config_path),
            &output,
        )
        .unwrap();
        set(
            "rotator_interval_ms".to_string(),
            "1200".to_string(),
            Some(&config_path),
            &output,
        )
        .unwrap();

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.data_dir, data_dir);
        assert_eq!(config.rotator_interval_ms, 1200);
    }

    #[test]
    fn test_apply_rejects_bad_input() {
        let mut config = Config::default();

        assert!(apply(&mut config, "rotator_interval_ms", "fast").is_err());
        assert!(apply(&mut config, "rotator_interval_ms", "0").is_err());
        let err = apply(&mut config, "sync_url", "x").unwrap_err();
        assert!(err.to_string().contains("Valid keys"));
    }
}

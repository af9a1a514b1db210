//! Veidt CLI
//!
//! Command-line interface for Veidt Health membership signup.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use veidt_core::{Config, SignupForm, Store};

mod commands;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "veidt")]
#[command(about = "Veidt Health - membership signup and local records")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this configuration file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Show the membership plans
    Plans,
    /// Register a member and activate a membership
    #[command(alias = "signup")]
    Register {
        /// Full name
        #[arg(short, long)]
        name: String,
        /// Email address (must not be registered yet)
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Plan key or name (esencial, pleno); defaults to esencial
        #[arg(long)]
        plan: Option<String>,
    },
    /// List registered users
    Users {
        /// Only the user registered with this exact email
        #[arg(short, long)]
        email: Option<String>,
    },
    /// List memberships
    Memberships {
        /// Only memberships owned by this user ID
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Show storage location and record counts
    Status,
    /// Replace all stored records with the demo data
    Reset {
        /// Skip the confirmation guard
        #[arg(long)]
        yes: bool,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file, toast_ttl_ms, rotator_interval_ms)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands work even when the current config is unusable
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config = Config::load_with_cli_override(config_path)?;

    // Handle TUI (default when no command given)
    let command = match cli.command {
        None | Some(Commands::Tui) => return tui::run(config).await,
        Some(command) => command,
    };

    init_cli_logging();

    let store = Store::open(&config);

    let result = match command {
        Commands::Tui | Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Plans => commands::plans::list(&output),
        Commands::Register {
            name,
            email,
            password,
            plan,
        } => {
            let form = SignupForm::new(name, email, password);
            commands::register::register(&store, form, plan, &output)
        }
        Commands::Users { email } => commands::records::users(&store, email, &output),
        Commands::Memberships { user } => commands::records::memberships(&store, user, &output),
        Commands::Status => commands::status::show(&store, &config, &output),
        Commands::Reset { yes } => commands::reset::reset(&store, yes, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        if let Some(hint) = commands::hint_for(&e) {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }

    Ok(())
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Initialize logging for one-shot commands
///
/// Logs to stderr. Level comes from VEIDT_LOG and defaults to warn.
fn init_cli_logging() {
    let log_level = std::env::var("VEIDT_LOG").unwrap_or_else(|_| "warn".to_string());
    let env_filter = EnvFilter::new(format!(
        "veidt_core={},veidt_cli={}",
        log_level, log_level
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde_json::{json, Value};
use veidt_core::{Enrollment, Membership, Plan, User};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print the plan catalog
    pub fn print_plans(&self, plans: &[Plan]) {
        match self.format {
            OutputFormat::Human => {
                for plan in plans {
                    let badge = if plan.is_popular() { "  [most popular]" } else { "" };
                    println!("{}  ${}/month{}", plan.name(), plan.monthly_price(), badge);
                    println!("  {}", plan.tagline());
                    for feature in plan.features() {
                        println!("  • {}", feature);
                    }
                    println!("  Estimated savings: {}%", plan.discount_percent());
                    println!();
                }
            }
            OutputFormat::Json => {
                let json_plans: Vec<_> = plans.iter().map(|p| plan_json(*p)).collect();
                print_json(&Value::Array(json_plans));
            }
            OutputFormat::Quiet => {
                for plan in plans {
                    println!("{}", plan.key());
                }
            }
        }
    }

    /// Print a new user and their membership
    pub fn print_enrollment(&self, enrollment: &Enrollment) {
        let user = &enrollment.user;
        let membership = &enrollment.membership;

        match self.format {
            OutputFormat::Human => {
                println!("User:        {} <{}>", user.name, user.email);
                println!("User ID:     {}", user.id);
                println!("Membership:  {}", membership.id);
                println!("Plan:        {}", membership.plan);
                println!("Discount:    {}%", membership.discount_percent);
                println!("Clinic:      {}", membership.clinic_id);
            }
            OutputFormat::Json => {
                print_json(&json!({
                    "user": user_json(user),
                    "membership": membership,
                }));
            }
            OutputFormat::Quiet => {
                println!("{}", user.id);
            }
        }
    }

    /// Print a list of users (passwords are never shown)
    pub fn print_users(&self, users: &[User]) {
        match self.format {
            OutputFormat::Human => {
                if users.is_empty() {
                    println!("No users found.");
                    return;
                }
                for user in users {
                    println!(
                        "{} | {} | {} | {}",
                        truncate(&user.id, 14),
                        truncate(&user.name, 24),
                        truncate(&user.email, 32),
                        user.created_at.format("%Y-%m-%d %H:%M")
                    );
                }
                println!("\n{} user(s)", users.len());
            }
            OutputFormat::Json => {
                let json_users: Vec<_> = users.iter().map(user_json).collect();
                print_json(&Value::Array(json_users));
            }
            OutputFormat::Quiet => {
                for user in users {
                    println!("{}", user.id);
                }
            }
        }
    }

    /// Print a list of memberships
    pub fn print_memberships(&self, memberships: &[Membership]) {
        match self.format {
            OutputFormat::Human => {
                if memberships.is_empty() {
                    println!("No memberships found.");
                    return;
                }
                for m in memberships {
                    let state = if m.active { "active" } else { "inactive" };
                    println!(
                        "{} | {} | {} | {}% | {} | {}",
                        truncate(&m.id, 14),
                        truncate(&m.user_id, 14),
                        m.plan,
                        m.discount_percent,
                        state,
                        m.beneficiaries.join(", ")
                    );
                }
                println!("\n{} membership(s)", memberships.len());
            }
            OutputFormat::Json => {
                print_json(&json!(memberships));
            }
            OutputFormat::Quiet => {
                for m in memberships {
                    println!("{}", m.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                print_json(&json!({"status": "success", "message": message}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json(value: &Value) {
    // Serializing a Value cannot fail
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    );
}

fn plan_json(plan: Plan) -> Value {
    json!({
        "key": plan.key(),
        "name": plan.name(),
        "monthly_price": plan.monthly_price(),
        "discount_percent": plan.discount_percent(),
        "tagline": plan.tagline(),
        "features": plan.features(),
        "popular": plan.is_popular(),
    })
}

fn user_json(user: &User) -> Value {
    json!({
        "id": user.id,
        "role": user.role,
        "email": user.email,
        "name": user.name,
        "createdAt": user.created_at,
    })
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

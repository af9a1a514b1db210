//! Register command handler

use anyhow::{Context, Result};

use veidt_core::{enroll, Enrollment, Plan, RecordStore, SignupForm};

use crate::output::Output;

/// Register a member and activate their membership
pub fn register<R: RecordStore>(
    store: &R,
    form: SignupForm,
    plan: Option<String>,
    output: &Output,
) -> Result<()> {
    let plan = plan
        .map(|p| p.parse::<Plan>())
        .transpose()
        .context("Invalid --plan")?;

    let enrollment = enroll(store, &form, plan).context("Registration failed")?;

    if let Some(line) = success_line(&enrollment, output) {
        output.success(&line);
    }
    output.print_enrollment(&enrollment);

    Ok(())
}

/// Summary printed above the enrollment
///
/// None in JSON mode, where stdout carries the enrollment document alone.
fn success_line(enrollment: &Enrollment, output: &Output) -> Option<String> {
    if output.is_json() {
        return None;
    }
    Some(format!(
        "Membership activated: plan {} ({}% off)",
        enrollment.membership.plan, enrollment.membership.discount_percent
    ))
}

//! Plan catalog command

use anyhow::Result;

use veidt_core::Plan;

use crate::output::Output;

/// Print every plan in the catalog
pub fn list(output: &Output) -> Result<()> {
    output.print_plans(&Plan::ALL);
    Ok(())
}

//! Integer pipeline evaluation.

use anyhow::{Context, Result};
use pipewise::{ExecMode, parse_specs, plan_specs};
use tracing::info;

use crate::style::colors::SemanticStyle;
use crate::style::print_labeled;

/// Options for `pipewise eval`.
pub struct EvalOptions {
    pub json: bool,
    pub explain: bool,
    pub mode: ExecMode,
}

/// Parse and plan `stages`, run them over `values`, and print the outcome.
pub fn run(stages: &[String], values: Vec<i64>, options: &EvalOptions) -> Result<()> {
    let specs = parse_specs(stages).context("Invalid stage spec")?;
    let plan = plan_specs(specs).context("Invalid stage order")?;

    if options.explain {
        print_labeled("plan", &plan.explain().code());
    }

    info!(plan = %plan.explain(), values = values.len(), "evaluating");
    let outcome = plan
        .execute(values, options.mode)
        .context("Pipeline evaluation failed")?;

    if options.json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        println!("{outcome}");
    }
    Ok(())
}

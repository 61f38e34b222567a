//! Demo runner.

use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use pipewise::ExecMode;
use tracing::debug;

use crate::demos::{self, DEMOS, Demo};

/// Runs the named demos in the given order, or every demo when `names` is empty.
///
/// All names are resolved before anything runs.
pub fn run(names: &[String], mode: ExecMode) -> Result<()> {
    let selected: Vec<&Demo> = if names.is_empty() {
        DEMOS.iter().collect()
    } else {
        names
            .iter()
            .map(|name| match demos::find(name) {
                Some(demo) => Ok(demo),
                None => bail!("unknown demo '{name}' (see `pipewise list`)"),
            })
            .collect::<Result<_>>()?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for demo in selected {
        debug!(demo = demo.name, ?mode, "running demo");
        (demo.run)(&mut out, mode).with_context(|| format!("demo '{}' failed", demo.name))?;
    }
    out.flush()?;
    Ok(())
}

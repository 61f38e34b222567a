//! Configuration commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use pipewise_config::{Layer, PipewiseConfig};

/// Print the effective configuration as TOML, preceded by one comment line
/// per merged file.
pub fn show(config: &PipewiseConfig, sources: &[(Layer, PathBuf)]) -> Result<()> {
    let rendered = config.to_toml().context("Failed to render configuration")?;
    for (layer, path) in sources {
        println!("# {layer}: {}", path.display());
    }
    print!("{rendered}");
    Ok(())
}

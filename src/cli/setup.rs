use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

/// Writes the example configuration to the default location.
pub fn setup() -> Result<PathBuf> {
    let path = AppConfig::default_config_path()?;
    setup_at_path(&path)?;
    println!("Created configuration at {}", path.display());
    Ok(path)
}

/// Writes the example configuration to `path`, refusing to overwrite.
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}

use crate::data::AppSettings;
use anyhow::{Result, bail};
use std::path::Path;

pub fn run(dir: &Path, force: bool) -> Result<()> {
    run_in_dir(dir, force)?;
    println!("Wrote default settings to {}", dir.join("config.yaml").display());
    Ok(())
}

/// Writes a default config.yaml into `dir`. An existing file is kept unless
/// `force` is set.
pub(crate) fn run_in_dir(dir: &Path, force: bool) -> Result<()> {
    if dir.join("config.yaml").exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            dir.join("config.yaml").display()
        );
    }
    AppSettings::default().save_to(dir)
}

use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the finance home directory, its data subdirectory and an initial `config.json`.
///
/// No snapshot files are written. The first `finance` command that changes anything writes them,
/// starting from the built-in categories and sample transactions.
///
/// # Arguments
/// - `finance_home` - The directory that will be the root of data directory, e.g. `$HOME/finance`
///
/// # Errors
/// - Returns an error if the directory has already been initialized.
/// - Returns an error if any file operations fail.
pub fn init(finance_home: &Path) -> Result<Out<()>> {
    let config = Config::create(finance_home)
        .context("Unable to create the finance home directory and config")?;
    Ok(format!(
        "Successfully created the finance directory at {}",
        config.root().display()
    )
    .into())
}

pub mod tasks;
pub mod test_assemblies;

use crate::config::Config;
use crate::errors::Result;
use crate::workdir;
use std::path::PathBuf;

/// Enter the solution root and load its config.
///
/// The configured solution is checked before the working directory changes,
/// so a missing solution never gets as far as the tool.
pub(crate) fn prepare() -> Result<(PathBuf, Config)> {
    let root = workdir::resolve_root()?;
    let config = Config::load(&root)?;
    config.ensure_solution(&root)?;

    let root = workdir::enter(&root)?;
    tracing::debug!(root = %root.display(), ?config, "solution root prepared");
    Ok((root, config))
}

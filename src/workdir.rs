// Solution root discovery and working directory setup

use crate::config::Config;
use crate::errors::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Locate the solution root.
///
/// Searches upward from the current directory first, then from the directory
/// of the running executable. The error reports the current-directory search.
pub fn resolve_root() -> Result<PathBuf> {
    let cwd = env::current_dir()?;
    let from_cwd = Config::find_root(&cwd);
    if from_cwd.is_ok() {
        return from_cwd;
    }

    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    if let Some(exe_dir) = exe_dir {
        if let Ok(root) = Config::find_root(&exe_dir) {
            tracing::debug!(root = %root.display(), "solution root found from executable location");
            return Ok(root);
        }
    }

    from_cwd
}

/// Make `root` the process working directory and announce it
pub fn enter(root: &Path) -> Result<PathBuf> {
    env::set_current_dir(root)?;
    let cwd = env::current_dir()?;
    println!("Current working directory is {}", cwd.display());
    Ok(cwd)
}

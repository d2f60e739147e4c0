use crate::errors::{Result, TaskError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".tack-tasks.yml";
pub const DEFAULT_SOLUTION: &str = "./Tack.sln";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Program used for every task
    pub dotnet: String,
    pub solution: String,
    pub configuration: String,
    /// MSBuild target that runs the tool inside a container
    pub smoke_test_target: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dotnet: "dotnet".to_string(),
            solution: DEFAULT_SOLUTION.to_string(),
            configuration: "Release".to_string(),
            smoke_test_target: "RunToolInDocker".to_string(),
        }
    }
}

impl Config {
    /// Load config from .tack-tasks.yml in the solution root
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            // No config file, return defaults
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = serde_yml::from_str(&content).map_err(|e| {
            TaskError::ConfigError(format!("Failed to parse {}: {}", CONFIG_FILE, e))
        })?;

        Ok(config)
    }

    /// Find the nearest directory at or above `start_path` holding either the
    /// default solution or a config file
    pub fn find_root(start_path: &Path) -> Result<PathBuf> {
        let mut current = start_path;

        loop {
            if current.join(DEFAULT_SOLUTION).is_file() || current.join(CONFIG_FILE).is_file() {
                return Ok(current.to_path_buf());
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => {
                    return Err(TaskError::RootNotFound {
                        start: start_path.to_path_buf(),
                    })
                }
            }
        }
    }

    /// Check that the configured solution exists under `root`
    pub fn ensure_solution(&self, root: &Path) -> Result<()> {
        if root.join(&self.solution).is_file() {
            return Ok(());
        }

        Err(TaskError::SolutionNotFound {
            solution: self.solution.clone(),
            root: root.to_path_buf(),
        })
    }

    /// Program to spawn, with relative paths such as `./tools/dotnet` anchored at `root`.
    /// Bare names are left for PATH lookup.
    pub fn program(&self, root: &Path) -> PathBuf {
        let program = Path::new(&self.dotnet);
        let has_separator = self.dotnet.contains('/') || self.dotnet.contains('\\');

        if has_separator && program.is_relative() {
            root.join(program)
        } else {
            program.to_path_buf()
        }
    }
}

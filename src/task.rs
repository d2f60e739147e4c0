use crate::config::Config;
use crate::process::ExternalCommand;
use std::path::Path;

/// The fixed solution tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Build,
    /// Runs the tests against an existing build, never rebuilding
    Test,
    /// Runs the tool in a container through an MSBuild target
    SmokeTestWindows,
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Build => "build",
            Task::Test => "test",
            Task::SmokeTestWindows => "smoke_test_windows",
        }
    }

    /// Argument list handed to the build tool
    pub fn args(&self, config: &Config) -> Vec<String> {
        match self {
            Task::Build => vec![
                "build".to_string(),
                config.solution.clone(),
                format!("--configuration={}", config.configuration),
            ],
            Task::Test => vec![
                "test".to_string(),
                config.solution.clone(),
                "--no-build".to_string(),
                format!("--configuration={}", config.configuration),
            ],
            Task::SmokeTestWindows => vec![
                "msbuild".to_string(),
                config.solution.clone(),
                format!("/t:{}", config.smoke_test_target),
                format!("/p:Configuration={}", config.configuration),
            ],
        }
    }

    pub fn command(&self, config: &Config, root: &Path) -> ExternalCommand {
        ExternalCommand::new(config.program(root)).args(self.args(config))
    }
}

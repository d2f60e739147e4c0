// Invocation of the `tack get-test-assemblies` tool
// The tool itself loads the solution and lists test assemblies; this side only
// assembles its command line.

use crate::config::Config;
use crate::errors::{Result, TaskError};
use crate::process::ExternalCommand;
use clap::ValueEnum;
use regex::Regex;
use std::fmt;
use std::path::Path;

/// How the tool picks target frameworks for multi-targeted projects
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "PascalCase")]
pub enum FrameworkSelector {
    All,
    Max,
    App,
    Regex,
    MaxNoWindows,
}

impl fmt::Display for FrameworkSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FrameworkSelector::All => "All",
            FrameworkSelector::Max => "Max",
            FrameworkSelector::App => "App",
            FrameworkSelector::Regex => "Regex",
            FrameworkSelector::MaxNoWindows => "MaxNoWindows",
        };
        f.write_str(name)
    }
}

/// Whether the tool replaces or extends an existing output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "PascalCase")]
pub enum FileMode {
    Overwrite,
    Append,
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileMode::Overwrite => f.write_str("Overwrite"),
            FileMode::Append => f.write_str("Append"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TackSettings {
    pub solution: String,
    pub outfile: String,
    /// Regex matched against target framework monikers
    pub framework: Option<String>,
    pub configuration: Option<String>,
    pub exclude_assemblies: Vec<String>,
    pub framework_selector: Option<FrameworkSelector>,
    pub get_published_output: bool,
    /// Only assemblies matching one of these patterns are listed
    pub include_assemblies: Vec<String>,
    /// Regex deciding which assemblies count as test assemblies
    pub test_regex: Option<String>,
    pub skip_existence_check: bool,
    pub file_mode: Option<FileMode>,
}

impl TackSettings {
    pub fn new(solution: impl Into<String>, outfile: impl Into<String>) -> Self {
        Self {
            solution: solution.into(),
            outfile: outfile.into(),
            ..Self::default()
        }
    }

    /// Reject framework and test patterns the tool would fail on
    pub fn validate(&self) -> Result<()> {
        for pattern in [&self.framework, &self.test_regex] {
            if let Some(pattern) = pattern.as_deref().filter(|p| !p.is_empty()) {
                check_pattern(pattern)?;
            }
        }
        Ok(())
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "tack".to_string(),
            "get-test-assemblies".to_string(),
            "--solution".to_string(),
            self.solution.clone(),
            "--outfile".to_string(),
            self.outfile.clone(),
        ];

        push_non_empty(&mut args, "--framework", self.framework.as_deref());
        push_non_empty(&mut args, "--configuration", self.configuration.as_deref());

        if !self.exclude_assemblies.is_empty() {
            args.push("--exclude-assemblies".to_string());
            args.push(self.exclude_assemblies.join(","));
        }

        if let Some(selector) = self.framework_selector {
            args.push("--framework-selector".to_string());
            args.push(selector.to_string());
        }

        if self.get_published_output {
            args.push("--get-published-output".to_string());
        }

        if !self.include_assemblies.is_empty() {
            args.push("--include-assemblies".to_string());
            args.push(self.include_assemblies.join(","));
        }

        push_non_empty(&mut args, "--test-regex", self.test_regex.as_deref());

        if self.skip_existence_check {
            args.push("--skip-existence-check".to_string());
        }

        if let Some(mode) = self.file_mode {
            args.push("--file-mode".to_string());
            args.push(mode.to_string());
        }

        args
    }

    pub fn command(&self, config: &Config, root: &Path) -> Result<ExternalCommand> {
        self.validate()?;
        Ok(ExternalCommand::new(config.program(root)).args(self.args()))
    }
}

/// Check a pattern written for the tool's .NET regex dialect.
///
/// Anything the `regex` crate compiles is accepted. .NET also allows lookaround,
/// backreferences and atomic groups, which `regex` refuses, so a pattern that
/// fails here is only rejected when its groups or classes do not balance.
pub fn check_pattern(pattern: &str) -> Result<()> {
    let Err(err) = Regex::new(pattern) else {
        return Ok(());
    };

    if let Some(reason) = unbalanced(pattern) {
        return Err(TaskError::InvalidPattern(pattern.to_string(), reason.to_string()));
    }

    tracing::debug!(pattern, error = %err, "pattern left to the tool's regex dialect");
    Ok(())
}

fn unbalanced(pattern: &str) -> Option<&'static str> {
    let mut depth = 0usize;
    let mut in_class = false;
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    return Some("trailing backslash");
                }
            }
            '[' if !in_class => {
                in_class = true;
                chars.next_if_eq(&'^');
                // A leading ']' is a literal member of the class
                chars.next_if_eq(&']');
            }
            ']' if in_class => in_class = false,
            '(' if !in_class => depth += 1,
            ')' if !in_class => {
                if depth == 0 {
                    return Some("unopened group");
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    if in_class {
        Some("unclosed character class")
    } else if depth > 0 {
        Some("unclosed group")
    } else {
        None
    }
}

fn push_non_empty(args: &mut Vec<String>, name: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        args.push(name.to_string());
        args.push(value.to_string());
    }
}

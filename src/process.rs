// External process invocation
// Every task ends in exactly one blocking call to an external tool

use crate::errors::{Result, TaskError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// A program and its fixed argument list.
///
/// Arguments are passed straight to the OS, never through a shell, so solution
/// names and patterns need no quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Run to completion in `dir` with inherited stdio.
    ///
    /// Output streams straight to the console, so a failure carries only the
    /// command line and the exit code.
    pub fn run(&self, dir: &Path) -> Result<()> {
        tracing::debug!(command = %self, dir = %dir.display(), "running external command");

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(dir)
            .status()
            .map_err(|source| TaskError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        tracing::debug!(command = %self, ?status, "external command finished");
        self.check(status)
    }

    fn check(&self, status: ExitStatus) -> Result<()> {
        if status.success() {
            return Ok(());
        }

        match status.code() {
            Some(code) => Err(TaskError::CommandFailed {
                command: self.to_string(),
                code,
            }),
            None => Err(TaskError::CommandTerminated(self.to_string())),
        }
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

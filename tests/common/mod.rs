/// Common test utilities for tack-tasks integration tests
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Stand-in for `dotnet`: logs each call, then behaves like the real tool
/// closely enough to exercise the tasks.
const FAKE_DOTNET: &str = r#"#!/bin/sh
here="$(cd "$(dirname "$0")" && pwd)"
echo "$*" >> "$here/dotnet-calls.log"
pwd -P > "$here/dotnet-cwd.txt"

if [ -n "$FAKE_EXIT_CODE" ]; then
    exit "$FAKE_EXIT_CODE"
fi

case "$1" in
    build)
        mkdir -p bin/Release
        echo "built" > bin/Release/Tack.dll
        ;;
    test)
        if [ ! -f bin/Release/Tack.dll ]; then
            echo "The test source file bin/Release/Tack.dll was not found." >&2
            exit 1
        fi
        ;;
    msbuild)
        if [ -z "$FAKE_DOCKER" ]; then
            echo "docker: command not found" >&2
            exit 127
        fi
        mkdir -p TestResults
        echo "passed" > TestResults/smoke.trx
        ;;
    tack)
        shift
        while [ $# -gt 0 ]; do
            if [ "$1" = "--outfile" ]; then
                echo "tests/Tack.Tests/bin/Release/net6.0/Tack.Tests.dll" > "$2"
            fi
            shift
        done
        ;;
esac
exit 0
"#;

/// A temporary solution tree wired to the fake `dotnet`
#[allow(dead_code)]
pub struct TestSolution {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestSolution {
    /// Create a solution root holding Tack.sln, the fake tool and a config pointing at it
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("tack");
        fs::create_dir(&root).expect("Failed to create solution directory");
        // The binary reports the resolved path, so compare against the same form
        let root = root.canonicalize().expect("Failed to canonicalize root");

        fs::write(root.join("Tack.sln"), "Microsoft Visual Studio Solution File\n")
            .expect("Failed to write solution");

        let tool = root.join("fake-dotnet");
        fs::write(&tool, FAKE_DOTNET).expect("Failed to write fake dotnet");
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake dotnet executable");

        fs::write(root.join(".tack-tasks.yml"), "dotnet: ./fake-dotnet\n")
            .expect("Failed to write config file");

        TestSolution { temp_dir, root }
    }

    /// Get the solution root
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Run tack-tasks from the solution root
    pub fn run(&self, args: &[&str]) -> CommandResult {
        self.run_in(&self.root, args, &[])
    }

    /// Run tack-tasks from the solution root with extra environment variables
    #[allow(dead_code)]
    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> CommandResult {
        self.run_in(&self.root, args, env)
    }

    /// Run tack-tasks from an arbitrary directory
    pub fn run_in(&self, dir: &Path, args: &[&str], env: &[(&str, &str)]) -> CommandResult {
        run_binary(Path::new(env!("CARGO_BIN_EXE_tack-tasks")), dir, args, env)
    }

    /// Copy the tack-tasks binary to `relative` under the root
    #[allow(dead_code)]
    pub fn install_binary(&self, relative: &str) -> PathBuf {
        let target = self.root.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).expect("Failed to create binary directory");
        }
        fs::copy(env!("CARGO_BIN_EXE_tack-tasks"), &target).expect("Failed to copy binary");
        target
    }

    /// Argument lines the fake tool has received, oldest first
    #[allow(dead_code)]
    pub fn dotnet_calls(&self) -> Vec<String> {
        fs::read_to_string(self.root.join("dotnet-calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Directory the fake tool last ran in
    #[allow(dead_code)]
    pub fn dotnet_cwd(&self) -> PathBuf {
        let cwd = fs::read_to_string(self.root.join("dotnet-cwd.txt"))
            .expect("fake dotnet never ran");
        PathBuf::from(cwd.trim())
    }

    /// Create a file under the root
    #[allow(dead_code)]
    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write file");
    }
}

/// Run a tack-tasks executable from `dir` with a clean fake-tool environment
#[allow(dead_code)]
pub fn run_binary(exe: &Path, dir: &Path, args: &[&str], env: &[(&str, &str)]) -> CommandResult {
    let mut command = Command::new(exe);
    command
        .args(args)
        .current_dir(dir)
        .env_remove("FAKE_EXIT_CODE")
        .env_remove("FAKE_DOCKER")
        .env_remove("RUST_LOG");
    for (key, value) in env {
        command.env(key, value);
    }

    let output = command.output().expect("Failed to execute tack-tasks");

    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
        exit_code: output.status.code(),
    }
}

/// Result of running a command
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub exit_code: Option<i32>,
}

impl CommandResult {
    /// Assert the command succeeded
    pub fn assert_success(&self) {
        if !self.success {
            panic!(
                "Command failed:\nstdout: {}\nstderr: {}\nexit code: {:?}",
                self.stdout, self.stderr, self.exit_code
            );
        }
    }

    /// Assert the command failed
    #[allow(dead_code)]
    pub fn assert_failure(&self) {
        if self.success {
            panic!(
                "Command succeeded when it should have failed:\nstdout: {}\nstderr: {}",
                self.stdout, self.stderr
            );
        }
    }

    /// Assert stdout contains text
    #[allow(dead_code)]
    pub fn assert_stdout_contains(&self, text: &str) {
        assert!(
            self.stdout.contains(text),
            "stdout does not contain '{}'\nstdout: {}",
            text,
            self.stdout
        );
    }

    /// Assert stderr contains text
    #[allow(dead_code)]
    pub fn assert_stderr_contains(&self, text: &str) {
        assert!(
            self.stderr.contains(text),
            "stderr does not contain '{}'\nstderr: {}",
            text,
            self.stderr
        );
    }

    /// The directory reported on the working-directory line
    #[allow(dead_code)]
    pub fn reported_cwd(&self) -> Option<PathBuf> {
        self.stdout
            .lines()
            .find_map(|line| line.strip_prefix("Current working directory is "))
            .map(PathBuf::from)
    }
}

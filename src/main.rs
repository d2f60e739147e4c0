use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;
use tack_tasks::cli;
use tack_tasks::errors::Result;
use tack_tasks::tack::{FileMode, FrameworkSelector, TackSettings};
use tack_tasks::task::Task;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tack-tasks")]
#[command(about = "Build, test and smoke-test the Tack solution", long_about = None)]
#[command(version)]
struct Cli {
    /// Log the resolved root and the exact command line
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the solution in Release configuration
    Build,
    /// Run the solution's tests against the existing build
    Test,
    /// Run the tool inside Docker through the solution's MSBuild target
    #[command(alias = "smoke_test_windows")]
    SmokeTestWindows,
    /// Write the list of test assemblies using the tack tool
    GetTestAssemblies {
        /// File the assembly list is written to
        #[arg(long)]
        outfile: String,
        /// Regex used to match target frameworks
        #[arg(long)]
        framework: Option<String>,
        /// Project build configuration (defaults to the configured one)
        #[arg(long)]
        configuration: Option<String>,
        /// Comma separated assembly name patterns to exclude
        #[arg(long, value_delimiter = ',')]
        exclude_assemblies: Vec<String>,
        /// How to pick target frameworks
        #[arg(long, value_enum)]
        framework_selector: Option<FrameworkSelector>,
        /// List published output instead of build output
        #[arg(long)]
        get_published_output: bool,
        /// Comma separated assembly name patterns to keep
        #[arg(long, value_delimiter = ',')]
        include_assemblies: Vec<String>,
        /// Regex deciding which assemblies are test assemblies
        #[arg(long)]
        test_regex: Option<String>,
        /// Do not check that the listed assemblies exist on disk
        #[arg(long)]
        skip_existence_check: bool,
        /// Overwrite or append to the output file
        #[arg(long, value_enum)]
        file_mode: Option<FileMode>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Build => cli::tasks::run(Task::Build),
        Commands::Test => cli::tasks::run(Task::Test),
        Commands::SmokeTestWindows => cli::tasks::run(Task::SmokeTestWindows),
        Commands::GetTestAssemblies {
            outfile,
            framework,
            configuration,
            exclude_assemblies,
            framework_selector,
            get_published_output,
            include_assemblies,
            test_regex,
            skip_existence_check,
            file_mode,
        } => cli::test_assemblies::run(TackSettings {
            solution: String::new(),
            outfile,
            framework,
            configuration,
            exclude_assemblies,
            framework_selector,
            get_published_output,
            include_assemblies,
            test_regex,
            skip_existence_check,
            file_mode,
        }),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::from(e.exit_code())
        }
    }
}

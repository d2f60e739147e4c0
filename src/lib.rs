// Task runner for the Tack solution: build, test, smoke test and test-assembly
// discovery, each a single call to the dotnet toolchain from the solution root

pub mod cli;
pub mod config;
pub mod errors;
pub mod process;
pub mod tack;
pub mod task;
pub mod workdir;

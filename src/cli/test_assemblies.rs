use crate::errors::Result;
use crate::tack::TackSettings;

/// Write the solution's test assembly list through the `tack` tool.
///
/// Solution and configuration default to the loaded config when not given.
pub fn run(mut settings: TackSettings) -> Result<()> {
    let (root, config) = super::prepare()?;

    if settings.solution.is_empty() {
        settings.solution = config.solution.clone();
    }
    if settings.configuration.is_none() {
        settings.configuration = Some(config.configuration.clone());
    }

    let command = settings.command(&config, &root)?;
    command.run(&root)
}

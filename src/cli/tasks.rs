use crate::errors::Result;
use crate::task::Task;

/// Run one of the fixed solution tasks from the solution root
pub fn run(task: Task) -> Result<()> {
    let (root, config) = super::prepare()?;
    let command = task.command(&config, &root);
    tracing::debug!(task = task.as_str(), %command, "starting task");
    command.run(&root)
}

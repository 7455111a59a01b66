use crate::command::{Command, CommandResult};
use crate::context::IdeContext;

/// Hands the current file to the assistant; progress shows up as log lines.
pub struct AuditCommand;

impl Command for AuditCommand {
    fn execute(&self, _args: &[String], ctx: &mut IdeContext) -> CommandResult {
        ctx.analyze();
        Ok(String::new())
    }

    fn usage(&self) -> &'static str {
        "audit - ask the assistant to review the open file"
    }
}

use crate::command::{Command, CommandResult};
use crate::context::IdeContext;

pub struct ClearCommand;

impl Command for ClearCommand {
    fn execute(&self, _args: &[String], ctx: &mut IdeContext) -> CommandResult {
        // the echo line goes too
        ctx.sessions.clear_active();
        Ok(String::new())
    }

    fn usage(&self) -> &'static str {
        "clear - clear the active terminal"
    }
}

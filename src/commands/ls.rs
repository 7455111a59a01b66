use crate::command::{Command, CommandResult};
use crate::context::IdeContext;
use crate::fixtures::LS_OUTPUT;

pub struct LsCommand;

impl Command for LsCommand {
    fn execute(&self, _args: &[String], _ctx: &mut IdeContext) -> CommandResult {
        Ok(LS_OUTPUT.to_string())
    }

    fn usage(&self) -> &'static str {
        "ls - list the workspace root"
    }
}

use crate::command::{Command, CommandResult};
use crate::context::IdeContext;
use crate::fixtures::WHOAMI;

pub struct WhoamiCommand;

impl Command for WhoamiCommand {
    fn execute(&self, _args: &[String], _ctx: &mut IdeContext) -> CommandResult {
        Ok(WHOAMI.to_string())
    }

    fn usage(&self) -> &'static str {
        "whoami - print the current agent identity"
    }
}

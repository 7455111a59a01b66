use crate::command::{Command, CommandResult};
use crate::context::IdeContext;
use crate::reducer::CompileStart;

pub struct SolcCommand;

impl Command for SolcCommand {
    fn execute(&self, _args: &[String], ctx: &mut IdeContext) -> CommandResult {
        match ctx.compile() {
            CompileStart::NotSolidity => Err("solc: no Solidity file selected".to_string()),
            CompileStart::Started | CompileStart::Busy => Ok(String::new()),
        }
    }

    fn usage(&self) -> &'static str {
        "solc - compile the open Solidity file"
    }
}

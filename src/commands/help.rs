use crate::command::{Command, CommandResult};
use crate::context::IdeContext;

/// help [COMMAND]
pub struct HelpCommand;

const HELP_TEXT: &str = "Available commands: help, clear, ls, npm test, npm deploy, audit, whoami, cat [file], theme [monokai|cyberpunk|github-dark], solc, history [-c], git [status|branch|checkout|add|reset|commit|push]";

impl Command for HelpCommand {
    fn execute(&self, args: &[String], ctx: &mut IdeContext) -> CommandResult {
        let Some(topic) = args.first().filter(|a| !a.is_empty()) else {
            return Ok(HELP_TEXT.to_string());
        };
        let topic = topic.to_lowercase();
        let registry = ctx
            .get_command_registry()
            .ok_or_else(|| "help: unable to access command registry".to_string())?;
        match registry.get(&topic) {
            Some(cmd) => Ok(format!("Usage: {}", cmd.usage())),
            None => Err(format!("help: no help topics match '{}'", topic)),
        }
    }

    fn usage(&self) -> &'static str {
        "help [command] - list commands or describe one"
    }
}

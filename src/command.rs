use crate::context::IdeContext;
use std::collections::HashMap;

pub type CommandResult = Result<String, String>;

pub trait Command {
    fn execute(&self, args: &[String], ctx: &mut IdeContext) -> CommandResult;

    /// One-line usage shown by `help <command>`.
    fn usage(&self) -> &'static str;
}

pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command + Send + Sync>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self { commands: HashMap::new() }
    }
    pub fn register_command(&mut self, name: &str, cmd: Box<dyn Command + Send + Sync>) {
        self.commands.insert(name.to_string(), cmd);
    }
    pub fn get(&self, name: &str) -> Option<&(dyn Command + Send + Sync)> {
        self.commands.get(name).map(|c| &**c)
    }
    pub fn get_command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }
    pub fn default_commands() -> Self {
        use crate::commands::*;
        let mut reg = Self::new();
        reg.register_command("clear", Box::new(clear::ClearCommand));
        reg.register_command("ls", Box::new(ls::LsCommand));
        reg.register_command("help", Box::new(help::HelpCommand));
        reg.register_command("whoami", Box::new(whoami::WhoamiCommand));
        reg.register_command("history", Box::new(history::HistoryCommand));
        reg.register_command("npm", Box::new(npm::NpmCommand));
        reg.register_command("audit", Box::new(audit::AuditCommand));
        reg.register_command("cat", Box::new(cat::CatCommand));
        reg.register_command("theme", Box::new(theme::ThemeCommand));
        reg.register_command("solc", Box::new(solc::SolcCommand));
        reg.register_command("git", Box::new(git::GitCommand));
        reg
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits on single spaces and looks the first word up case-insensitively.
/// Arguments keep their case; consecutive spaces yield empty arguments.
pub fn run_command(input: &str, ctx: &mut IdeContext, registry: &CommandRegistry) -> CommandResult {
    let mut parts = input.trim().split(' ');
    let cmd = parts.next().unwrap_or_default().to_lowercase();
    if cmd.is_empty() {
        return Ok(String::new());
    }
    let args: Vec<String> = parts.map(|s| s.to_string()).collect();

    match registry.get(&cmd) {
        Some(command) => command.execute(&args, ctx),
        None => Err(format!("Command not found: {}", cmd)),
    }
}

/// First argument, treating an empty token as absent.
pub fn operand(args: &[String], idx: usize) -> Option<&str> {
    args.get(idx).map(|s| s.as_str()).filter(|s| !s.is_empty())
}

pub fn missing(cmd: &str, what: &str) -> String {
    format!("{}: missing {} operand", cmd, what)
}

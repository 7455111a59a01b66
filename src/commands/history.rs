use crate::command::{Command, CommandResult};
use crate::context::IdeContext;

pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn execute(&self, args: &[String], ctx: &mut IdeContext) -> CommandResult {
        if args.is_empty() {
            // stored newest first, printed oldest first
            let entries: Vec<&String> = ctx.history.entries().collect();
            let out = entries
                .iter()
                .rev()
                .enumerate()
                .map(|(i, cmd)| format!("{:4}  {}", i + 1, cmd))
                .collect::<Vec<_>>()
                .join("\n");
            Ok(out)
        } else if args.len() == 1 && args[0] == "-c" {
            ctx.history.clear();
            Ok("History cleared".to_string())
        } else {
            Err("history: usage: history [-c]".to_string())
        }
    }

    fn usage(&self) -> &'static str {
        "history [-c] - list or clear submitted commands"
    }
}

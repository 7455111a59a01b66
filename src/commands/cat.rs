use crate::command::{missing, operand, Command, CommandResult};
use crate::context::IdeContext;

pub struct CatCommand;

impl Command for CatCommand {
    fn execute(&self, args: &[String], ctx: &mut IdeContext) -> CommandResult {
        let name = operand(args, 0).ok_or_else(|| missing("cat", "file"))?;
        if ctx.files.contains_name(name) {
            Ok(format!("Viewing content of {} (simulated)", name))
        } else {
            Err(format!("cat: {}: No such file or directory", name))
        }
    }

    fn usage(&self) -> &'static str {
        "cat <file> - check a project file exists"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdeConfig;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cat_known_and_unknown() {
        let mut ctx = IdeContext::new(IdeConfig::default());
        assert_eq!(
            CatCommand.execute(&args(&["README.md"]), &mut ctx),
            Ok("Viewing content of README.md (simulated)".to_string())
        );
        assert_eq!(
            CatCommand.execute(&args(&["nope.txt"]), &mut ctx),
            Err("cat: nope.txt: No such file or directory".to_string())
        );
    }

    #[test]
    fn test_cat_missing_operand() {
        let mut ctx = IdeContext::new(IdeConfig::default());
        assert_eq!(CatCommand.execute(&[], &mut ctx), Err("cat: missing file operand".to_string()));
        assert_eq!(CatCommand.execute(&args(&[""]), &mut ctx), Err("cat: missing file operand".to_string()));
    }
}

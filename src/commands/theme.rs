use crate::command::{missing, operand, Command, CommandResult};
use crate::context::IdeContext;
use crate::theme::TerminalTheme;

pub struct ThemeCommand;

impl Command for ThemeCommand {
    fn execute(&self, args: &[String], ctx: &mut IdeContext) -> CommandResult {
        let name = operand(args, 0).ok_or_else(|| missing("theme", "name"))?;
        let theme: TerminalTheme = name.parse()?;
        ctx.theme = theme;
        Ok(format!("Terminal theme switched to {}", theme))
    }

    fn usage(&self) -> &'static str {
        "theme <github-dark|cyberpunk|monokai> - switch terminal colors"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdeConfig;

    #[test]
    fn test_theme_switch() {
        let mut ctx = IdeContext::new(IdeConfig::default());
        let out = ThemeCommand.execute(&["cyberpunk".to_string()], &mut ctx);
        assert_eq!(out, Ok("Terminal theme switched to cyberpunk".to_string()));
        assert_eq!(ctx.theme, TerminalTheme::Cyberpunk);
    }

    #[test]
    fn test_theme_is_case_sensitive() {
        let mut ctx = IdeContext::new(IdeConfig::default());
        let out = ThemeCommand.execute(&["Monokai".to_string()], &mut ctx);
        assert_eq!(out, Err("Unknown theme: Monokai".to_string()));
        assert_eq!(ctx.theme, TerminalTheme::GithubDark);
        assert_eq!(ThemeCommand.execute(&[], &mut ctx), Err("theme: missing name operand".to_string()));
    }
}

// git front-end over the simulated source-control state
use crate::command::{missing, operand, Command, CommandResult};
use crate::context::IdeContext;
use crate::fixtures::BRANCHES;

pub struct GitCommand;

impl Command for GitCommand {
    fn execute(&self, args: &[String], ctx: &mut IdeContext) -> CommandResult {
        let sub = operand(args, 0).ok_or_else(|| missing("git", "command"))?;
        let rest = &args[1..];
        match sub {
            "status" => Ok(status(ctx)),
            "branch" => Ok(branch(ctx)),
            "checkout" => checkout(rest, ctx),
            "add" => add(rest, ctx),
            "reset" => reset(rest, ctx),
            "commit" => commit(rest, ctx),
            "push" => {
                ctx.push();
                Ok(String::new())
            }
            other => Err(format!("git: '{}' is not a git command.", other)),
        }
    }

    fn usage(&self) -> &'static str {
        "git <status|branch|checkout|add|reset|commit|push> [args]"
    }
}

fn status(ctx: &IdeContext) -> String {
    let name = |id: &String| ctx.files.name_of(id).unwrap_or(id.as_str()).to_string();
    let mut out = vec![format!("On branch {}", ctx.vcs.branch)];
    if ctx.vcs.staged().is_empty() && ctx.vcs.modified().is_empty() {
        out.push("nothing to commit, working tree clean".to_string());
        return out.join("\n");
    }
    if !ctx.vcs.staged().is_empty() {
        out.push("Changes to be committed:".to_string());
        out.extend(ctx.vcs.staged().iter().map(|id| format!("\tstaged:   {}", name(id))));
    }
    if !ctx.vcs.modified().is_empty() {
        out.push("Changes not staged for commit:".to_string());
        out.extend(ctx.vcs.modified().iter().map(|id| format!("\tmodified: {}", name(id))));
    }
    out.join("\n")
}

fn branch(ctx: &IdeContext) -> String {
    let mut names: Vec<&str> = BRANCHES.to_vec();
    if !names.contains(&ctx.vcs.branch.as_str()) {
        names.push(&ctx.vcs.branch);
    }
    names
        .iter()
        .map(|b| if *b == ctx.vcs.branch { format!("* {}", b) } else { format!("  {}", b) })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolves a file name to its id, files only.
fn file_id(ctx: &IdeContext, name: &str) -> Result<String, String> {
    ctx.files
        .find_file_by_name(name)
        .map(|n| n.id.clone())
        .ok_or_else(|| format!("error: pathspec '{}' did not match any file(s) known to git", name))
}

fn checkout(args: &[String], ctx: &mut IdeContext) -> CommandResult {
    if operand(args, 0) == Some("--") {
        let name = operand(args, 1).ok_or_else(|| missing("git checkout", "file"))?;
        let id = file_id(ctx, name)?;
        ctx.discard(&id);
        return Ok(String::new());
    }
    let target = operand(args, 0).ok_or_else(|| missing("git checkout", "branch"))?;
    if !BRANCHES.contains(&target) {
        return Err(format!("error: pathspec '{}' did not match any branch known to git", target));
    }
    if target == ctx.vcs.branch {
        return Ok(format!("Already on '{}'", target));
    }
    ctx.switch_branch(target);
    Ok(String::new())
}

fn add(args: &[String], ctx: &mut IdeContext) -> CommandResult {
    let name = operand(args, 0).ok_or_else(|| missing("git add", "file"))?;
    if name == "." || name == "-A" {
        let ids: Vec<String> = ctx.vcs.modified().iter().cloned().collect();
        for id in ids {
            ctx.vcs.stage(&id);
        }
        return Ok(String::new());
    }
    let id = file_id(ctx, name)?;
    // clean files have nothing to stage
    if ctx.vcs.is_modified(&id) {
        ctx.vcs.stage(&id);
    }
    Ok(String::new())
}

fn reset(args: &[String], ctx: &mut IdeContext) -> CommandResult {
    let name = operand(args, 0).ok_or_else(|| missing("git reset", "file"))?;
    let id = file_id(ctx, name)?;
    if ctx.vcs.is_staged(&id) {
        ctx.vcs.unstage(&id);
        Ok(format!("Unstaged changes after reset:\nM\t{}", name))
    } else {
        Ok(String::new())
    }
}

fn commit(args: &[String], ctx: &mut IdeContext) -> CommandResult {
    if operand(args, 0) != Some("-m") {
        return Err(missing("git commit", "-m <message>"));
    }
    let message = args[1..].join(" ");
    let message = message.trim().trim_matches(|c: char| c == '"' || c == '\'').trim();
    if message.is_empty() {
        return Err("Aborting commit due to empty commit message.".to_string());
    }
    if ctx.vcs.staged().is_empty() {
        return Err("nothing added to commit (use \"git add\" to stage changes)".to_string());
    }
    ctx.commit_draft = message.to_string();
    ctx.commit();
    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdeConfig;

    fn git(ctx: &mut IdeContext, line: &str) -> CommandResult {
        let args: Vec<String> = line.split(' ').map(|s| s.to_string()).collect();
        GitCommand.execute(&args, ctx)
    }

    fn last_log(ctx: &IdeContext) -> String {
        ctx.sessions.active().and_then(|s| s.logs.last().cloned()).unwrap_or_default()
    }

    #[test]
    fn test_status_lists_both_sets() {
        let mut ctx = IdeContext::new(IdeConfig::default());
        git(&mut ctx, "add Storage.sol").unwrap();
        let out = git(&mut ctx, "status").unwrap();
        assert_eq!(
            out,
            "On branch main\nChanges to be committed:\n\tstaged:   Storage.sol\nChanges not staged for commit:\n\tmodified: main.yml"
        );
    }

    #[test]
    fn test_status_clean_tree() {
        let mut ctx = IdeContext::new(IdeConfig::default());
        ctx.vcs.discard("2");
        ctx.vcs.discard("6");
        assert_eq!(git(&mut ctx, "status").unwrap(), "On branch main\nnothing to commit, working tree clean");
    }

    #[test]
    fn test_branch_marks_current() {
        let mut ctx = IdeContext::new(IdeConfig::default());
        assert_eq!(git(&mut ctx, "branch").unwrap(), "* main\n  develop\n  feature/ai-integration\n  fix/smart-audit");
    }

    #[test]
    fn test_checkout_branch_and_file() {
        let mut ctx = IdeContext::new(IdeConfig::default());
        git(&mut ctx, "checkout develop").unwrap();
        assert_eq!(ctx.vcs.branch, "develop");
        assert_eq!(last_log(&ctx), "Git: Switched to branch 'develop'");
        assert_eq!(git(&mut ctx, "checkout develop"), Ok("Already on 'develop'".to_string()));
        assert!(git(&mut ctx, "checkout nowhere").is_err());

        git(&mut ctx, "checkout -- main.yml").unwrap();
        assert!(!ctx.vcs.is_modified("6"));
        assert_eq!(last_log(&ctx), "Git: Discarded changes in main.yml");
        assert_eq!(git(&mut ctx, "checkout --"), Err("git checkout: missing file operand".to_string()));
    }

    #[test]
    fn test_checkout_feature_branches() {
        let mut ctx = IdeContext::new(IdeConfig::default());
        git(&mut ctx, "checkout feature/ai-integration").unwrap();
        assert_eq!(ctx.vcs.branch, "feature/ai-integration");
        assert_eq!(
            git(&mut ctx, "branch").unwrap(),
            "  main\n  develop\n* feature/ai-integration\n  fix/smart-audit"
        );
        git(&mut ctx, "checkout fix/smart-audit").unwrap();
        assert_eq!(last_log(&ctx), "Git: Switched to branch 'fix/smart-audit'");
    }

    #[test]
    fn test_add_reset_roundtrip() {
        let mut ctx = IdeContext::new(IdeConfig::default());
        git(&mut ctx, "add .").unwrap();
        assert!(ctx.vcs.modified().is_empty());
        assert_eq!(ctx.vcs.staged().len(), 2);
        git(&mut ctx, "reset main.yml").unwrap();
        assert!(ctx.vcs.is_modified("6"));
        assert!(ctx.vcs.is_disjoint());
        assert!(git(&mut ctx, "add contracts").is_err());
        assert_eq!(git(&mut ctx, "add"), Err("git add: missing file operand".to_string()));
    }

    #[test]
    fn test_commit_with_message() {
        let mut ctx = IdeContext::new(IdeConfig::default());
        assert!(git(&mut ctx, "commit -m \"early\"").is_err());
        git(&mut ctx, "add Storage.sol").unwrap();
        assert_eq!(
            git(&mut ctx, "commit"),
            Err("git commit: missing -m <message> operand".to_string())
        );
        git(&mut ctx, "commit -m \"fix storage\"").unwrap();
        assert!(ctx.vcs.staged().is_empty());
        assert_eq!(last_log(&ctx), "Git: Committed 1 file to main: \"fix storage\"");
    }

    #[test]
    fn test_unknown_subcommand() {
        let mut ctx = IdeContext::new(IdeConfig::default());
        assert_eq!(git(&mut ctx, "rebase"), Err("git: 'rebase' is not a git command.".to_string()));
        assert_eq!(GitCommand.execute(&[], &mut ctx), Err("git: missing command operand".to_string()));
    }

    #[test]
    fn test_push_twice_logs_once() {
        let mut ctx = IdeContext::new(IdeConfig::default());
        git(&mut ctx, "push").unwrap();
        git(&mut ctx, "push").unwrap();
        let pushes = ctx.sessions.active().unwrap().logs.iter().filter(|l| l.starts_with("Git: Pushing")).count();
        assert_eq!(pushes, 1);
    }
}

use crate::command::{Command, CommandResult};
use crate::context::IdeContext;

const DEPLOY_WORKFLOW: &str = "wf2";

pub struct NpmCommand;

impl Command for NpmCommand {
    fn execute(&self, args: &[String], ctx: &mut IdeContext) -> CommandResult {
        match args.first().map(String::as_str) {
            Some("test") => {
                ctx.start_test_run();
                Ok(String::new())
            }
            Some("deploy") => {
                // a run already in progress is left alone
                ctx.run_workflow(DEPLOY_WORKFLOW);
                Ok(String::new())
            }
            _ => Err("Command not found: npm".to_string()),
        }
    }

    fn usage(&self) -> &'static str {
        "npm <test|deploy> - run the test suite or the CD workflow"
    }
}

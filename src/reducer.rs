// every state transition of the simulated IDE lives here
use serde::Deserialize;
use std::sync::Arc;

use crate::ai::{AiReply, AiRequest, ChatMessage, ChatRole};
use crate::command::{self, CommandRegistry};
use crate::context::{CompileStatus, IdeContext};
use crate::fixtures;
use crate::project::{self, WorkflowStatus};
use crate::suggest::suggest;
use crate::theme::TerminalTheme;

const UNKNOWN_FILE: &str = "unknown_file";
const CHAT_FALLBACK: &str = "Sorry, I couldn't reach the assistant right now. Please try again.";

/// User-initiated transitions, as sent by the host page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    InputChanged { value: String },
    AcceptSuggestion,
    HistoryOlder,
    HistoryNewer,
    /// Runs whatever is in the input line.
    Submit,
    NewTerminal,
    CloseTerminal { id: String },
    SwitchTerminal { id: String },
    ClearTerminal,
    SelectFile { id: String },
    Stage { id: String },
    Unstage { id: String },
    Discard { id: String },
    SetCommitMessage { message: String },
    Commit,
    Push,
    SwitchBranch { name: String },
    Compile,
    RunWorkflow { id: String },
    AddTask { text: String },
    ToggleTask { id: String },
    DeleteTask { id: String },
    InstallPlugin { id: String },
    Analyze,
    RequestCompletion,
    AcceptCompletion,
    DismissCompletion,
    SendChat { message: String },
    SetTheme { theme: TerminalTheme },
}

/// Continuations parked on the timer queue. Each remembers the session that
/// was active when it was scheduled.
#[derive(Debug, Clone, PartialEq)]
pub enum Deferred {
    TestsFinished { session: String },
    CompileFinished { file_name: String, success: bool, session: String },
    PushFinished { session: String },
    WorkflowStep { workflow_id: String, session: String, line: String },
    WorkflowFinished { workflow_id: String },
}

/// What a compile request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileStart {
    Started,
    /// A compile is already in flight.
    Busy,
    NotSolidity,
}

impl IdeContext {
    pub fn apply(&mut self, action: Action) {
        log::debug!("apply {:?}", action);
        match action {
            Action::InputChanged { value } => self.input_changed(value),
            Action::AcceptSuggestion => self.accept_suggestion(),
            Action::HistoryOlder => self.history_older(),
            Action::HistoryNewer => self.history_newer(),
            Action::Submit => {
                let line = self.prompt.input.clone();
                self.submit(&line);
            }
            Action::NewTerminal => {
                self.sessions.create();
            }
            Action::CloseTerminal { id } => {
                self.sessions.close(&id);
            }
            Action::SwitchTerminal { id } => {
                self.sessions.switch(&id);
            }
            Action::ClearTerminal => self.sessions.clear_active(),
            Action::SelectFile { id } => self.select_file(&id),
            Action::Stage { id } => self.vcs.stage(&id),
            Action::Unstage { id } => self.vcs.unstage(&id),
            Action::Discard { id } => self.discard(&id),
            Action::SetCommitMessage { message } => self.commit_draft = message,
            Action::Commit => self.commit(),
            Action::Push => self.push(),
            Action::SwitchBranch { name } => self.switch_branch(&name),
            Action::Compile => {
                let outcome = self.compile();
                log::debug!("compile action: {:?}", outcome);
            }
            Action::RunWorkflow { id } => {
                self.run_workflow(&id);
            }
            Action::AddTask { text } => {
                project::add_task(&mut self.tasks, &text, chrono::Local::now().timestamp_millis());
            }
            Action::ToggleTask { id } => {
                project::toggle_task(&mut self.tasks, &id);
            }
            Action::DeleteTask { id } => {
                project::delete_task(&mut self.tasks, &id);
            }
            Action::InstallPlugin { id } => self.install_plugin(&id),
            Action::Analyze => self.analyze(),
            Action::RequestCompletion => self.request_completion(),
            Action::AcceptCompletion => self.accept_completion(),
            Action::DismissCompletion => self.assistant.completion = None,
            Action::SendChat { message } => self.send_chat(&message),
            Action::SetTheme { theme } => self.theme = theme,
        }
    }

    pub fn resume(&mut self, task: Deferred) {
        match task {
            Deferred::TestsFinished { session } => {
                self.log_to(&session, "✓ Storage.sol compiled");
                self.log_to(&session, "✓ Storage.sol tests passed");
                self.log_to(&session, "Tests completed successfully.");
            }
            Deferred::CompileFinished { file_name, success, session } => {
                self.is_compiling = false;
                if success {
                    self.last_compile_status = CompileStatus::Success;
                    self.log_to(&session, format!("Compiler: Success! ABI and Bytecode generated for {}.", file_name));
                } else {
                    self.last_compile_status = CompileStatus::Failed;
                    self.log_to(&session, "Compiler: FAILED. Syntax error on line 4.");
                }
            }
            Deferred::PushFinished { session } => {
                self.vcs.finish_push();
                self.log_to(&session, "Git: Push successful.");
            }
            Deferred::WorkflowStep { workflow_id, session, line } => {
                self.workflow_line(&workflow_id, &session, line);
            }
            Deferred::WorkflowFinished { workflow_id } => {
                if let Some(wf) = self.workflows.iter_mut().find(|w| w.id == workflow_id) {
                    wf.status = WorkflowStatus::Success;
                }
            }
        }
    }

    // ---- terminal input ----

    pub fn input_changed(&mut self, value: String) {
        self.prompt.suggestion = suggest(&value, fixtures::COMMANDS, self.file_names().as_slice());
        self.prompt.input = value;
    }

    pub fn accept_suggestion(&mut self) {
        if !self.prompt.suggestion.is_empty() {
            self.prompt.input = std::mem::take(&mut self.prompt.suggestion);
        }
    }

    pub fn history_older(&mut self) {
        if let Some(entry) = self.history.older() {
            self.prompt.input = entry;
        }
        self.prompt.suggestion.clear();
    }

    pub fn history_newer(&mut self) {
        self.prompt.input = self.history.newer();
        self.prompt.suggestion.clear();
    }

    /// Records, echoes and runs one command line. Blank lines do nothing.
    pub fn submit(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }
        self.history.record(line);
        let echo = format!("{} {}", self.config.prompt, line);
        self.log(echo);

        let registry = self
            .registry
            .clone()
            .unwrap_or_else(|| Arc::new(CommandRegistry::default_commands()));
        match command::run_command(line, self, &registry) {
            Ok(output) => {
                for out in output.lines() {
                    self.log(out);
                }
            }
            Err(e) => self.log(e),
        }

        self.prompt.input.clear();
        self.prompt.suggestion.clear();
    }

    // ---- files ----

    pub fn select_file(&mut self, id: &str) {
        if self.files.get(id).map_or(false, |n| n.is_file()) {
            self.current_file_id = Some(id.to_string());
        }
        self.assistant.completion = None;
    }

    // ---- version control ----

    pub fn discard(&mut self, id: &str) {
        self.vcs.discard(id);
        let name = self.files.name_of(id).unwrap_or(UNKNOWN_FILE).to_string();
        self.log(format!("Git: Discarded changes in {}", name));
    }

    /// Commits the staged set with the drafted message. Silently ignored when
    /// nothing is staged or the draft is blank.
    pub fn commit(&mut self) {
        let message = self.commit_draft.trim().to_string();
        if let Some(count) = self.vcs.commit(&message) {
            let noun = if count == 1 { "file" } else { "files" };
            self.log(format!("Git: Committed {} {} to {}: \"{}\"", count, noun, self.vcs.branch, message));
            self.commit_draft.clear();
        }
    }

    pub fn push(&mut self) {
        if !self.vcs.begin_push() {
            return;
        }
        self.log(format!("Git: Pushing to origin/{}...", self.vcs.branch));
        let session = self.active_session_id();
        self.schedule(self.config.delays.push_ms, Deferred::PushFinished { session });
    }

    pub fn switch_branch(&mut self, name: &str) {
        self.vcs.switch_branch(name);
        self.log(format!("Git: Switched to branch '{}'", name));
    }

    // ---- simulated pipelines ----

    pub fn start_test_run(&mut self) {
        self.log("Running tests...");
        let session = self.active_session_id();
        self.schedule(self.config.delays.test_run_ms, Deferred::TestsFinished { session });
    }

    /// Starts compiling the current Solidity file unless one is in flight.
    pub fn compile(&mut self) -> CompileStart {
        if self.is_compiling {
            return CompileStart::Busy;
        }
        let (file_name, success) = match self.current_file() {
            Some(file) if file.language.as_deref() == Some("solidity") => {
                let content = file.content.as_deref().unwrap_or_default();
                (file.name.clone(), !content.contains("Error"))
            }
            _ => return CompileStart::NotSolidity,
        };
        self.is_compiling = true;
        self.last_compile_status = CompileStatus::None;
        self.log(format!("Compiler: Starting compilation for {}...", file_name));
        let session = self.active_session_id();
        self.schedule(self.config.delays.compile_ms, Deferred::CompileFinished { file_name, success, session });
        CompileStart::Started
    }

    /// Returns false for unknown or already running workflows.
    pub fn run_workflow(&mut self, id: &str) -> bool {
        let lines = match self.workflows.iter_mut().find(|w| w.id == id) {
            Some(wf) if wf.status != WorkflowStatus::Running => {
                wf.status = WorkflowStatus::Running;
                wf.logs.clear();
                wf.step_lines()
            }
            _ => return false,
        };
        let session = self.active_session_id();
        let step_ms = self.config.delays.workflow_step_ms;
        let steps = lines.len() as u64;
        for (i, line) in lines.into_iter().enumerate() {
            if i == 0 {
                self.workflow_line(id, &session, line);
            } else {
                self.schedule(
                    step_ms * i as u64,
                    Deferred::WorkflowStep { workflow_id: id.to_string(), session: session.clone(), line },
                );
            }
        }
        self.schedule(step_ms * steps, Deferred::WorkflowFinished { workflow_id: id.to_string() });
        true
    }

    fn workflow_line(&mut self, workflow_id: &str, session: &str, line: String) {
        if let Some(wf) = self.workflows.iter_mut().find(|w| w.id == workflow_id) {
            wf.logs.push(line.clone());
        }
        self.log_to(session, line);
    }

    pub fn install_plugin(&mut self, id: &str) {
        if let Some(name) = project::install_plugin(&mut self.plugins, id) {
            self.log(format!("Plugin Engine: Installed {}", name));
        }
    }

    // ---- assistant ----

    /// Queues an audit of the current file; needs content and no audit in
    /// flight.
    pub fn analyze(&mut self) {
        if self.assistant.is_analyzing {
            return;
        }
        let request = match self.current_file() {
            Some(file) => match file.content.as_deref() {
                Some(code) if !code.is_empty() => AiRequest::Analyze {
                    file_name: file.name.clone(),
                    code: code.to_string(),
                    language: file.language.clone().unwrap_or_else(|| "text".to_string()),
                },
                _ => return,
            },
            None => return,
        };
        if let AiRequest::Analyze { file_name, .. } = &request {
            self.log(format!("AI: Analyzing {}...", file_name));
        }
        self.assistant.is_analyzing = true;
        self.outbox.push(request);
    }

    pub fn request_completion(&mut self) {
        if self.assistant.is_completing {
            return;
        }
        let request = match self.current_file() {
            Some(file) => match file.content.as_deref() {
                Some(code) if !code.is_empty() => AiRequest::Complete {
                    code: code.to_string(),
                    language: file.language.clone().unwrap_or_else(|| "text".to_string()),
                },
                _ => return,
            },
            None => return,
        };
        self.assistant.is_completing = true;
        self.assistant.completion = None;
        self.outbox.push(request);
    }

    pub fn accept_completion(&mut self) {
        let (Some(text), Some(id)) = (self.assistant.completion.take(), self.current_file_id.clone()) else {
            return;
        };
        if self.files.append_content(&id, &text) {
            self.vcs.mark_modified(&id);
        }
    }

    pub fn send_chat(&mut self, message: &str) {
        if message.trim().is_empty() || self.assistant.is_chatting {
            return;
        }
        self.assistant.transcript.push(ChatMessage { role: ChatRole::User, text: message.to_string() });
        let context = self.current_file().and_then(|f| f.content.clone()).unwrap_or_default();
        self.assistant.is_chatting = true;
        self.outbox.push(AiRequest::Chat { message: message.to_string(), context });
    }

    /// Applies a backend answer. Busy flags are cleared on every path.
    pub fn apply_reply(&mut self, reply: AiReply) {
        match reply {
            AiReply::Analysis { file_name, result } => {
                self.assistant.is_analyzing = false;
                match result {
                    Ok(analysis) => {
                        self.log(format!(
                            "AI: Analysis complete for {}. Found {} concerns.",
                            file_name,
                            analysis.issues.len()
                        ));
                        self.assistant.analysis = Some(analysis);
                    }
                    Err(e) => {
                        log::warn!("analysis of {} failed: {}", file_name, e);
                        self.log("AI Error: analysis failed.");
                    }
                }
            }
            AiReply::Completion(result) => {
                self.assistant.is_completing = false;
                match result {
                    Ok(text) => {
                        let text = text.trim();
                        self.assistant.completion = (!text.is_empty()).then(|| text.to_string());
                    }
                    Err(e) => {
                        log::warn!("completion failed: {}", e);
                        self.log("Autocomplete Error: completion interrupted.");
                    }
                }
            }
            AiReply::Chat(result) => {
                self.assistant.is_chatting = false;
                let text = result.unwrap_or_else(|e| {
                    log::warn!("chat failed: {}", e);
                    CHAT_FALLBACK.to_string()
                });
                self.assistant.transcript.push(ChatMessage { role: ChatRole::Assistant, text });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Analysis;
    use crate::config::IdeConfig;
    use crate::error::AiError;

    fn ctx() -> IdeContext {
        let mut ctx = IdeContext::new(IdeConfig::default());
        ctx.set_command_registry(Arc::new(CommandRegistry::default_commands()));
        ctx
    }

    fn active_logs(ctx: &IdeContext) -> Vec<String> {
        ctx.sessions.active().map(|s| s.logs.clone()).unwrap_or_default()
    }

    fn run_timers(ctx: &mut IdeContext) {
        while let Some(task) = ctx.timers.pop_next() {
            ctx.resume(task);
        }
    }

    #[test]
    fn test_action_json_shape() {
        let action: Action = serde_json::from_str(r#"{"type":"close_terminal","id":"term-2"}"#).unwrap();
        assert_eq!(action, Action::CloseTerminal { id: "term-2".to_string() });
        let action: Action = serde_json::from_str(r#"{"type":"set_theme","theme":"cyberpunk"}"#).unwrap();
        assert_eq!(action, Action::SetTheme { theme: TerminalTheme::Cyberpunk });
        let action: Action = serde_json::from_str(r#"{"type":"history_older"}"#).unwrap();
        assert_eq!(action, Action::HistoryOlder);
    }

    #[test]
    fn test_input_drives_suggestion() {
        let mut ctx = ctx();
        ctx.apply(Action::InputChanged { value: "th".to_string() });
        assert_eq!(ctx.prompt.suggestion, "theme monokai");
        assert_eq!(ctx.prompt.input, "th");
        ctx.apply(Action::AcceptSuggestion);
        assert_eq!(ctx.prompt.input, "theme monokai");
        assert_eq!(ctx.prompt.suggestion, "");
        ctx.apply(Action::AcceptSuggestion);
        assert_eq!(ctx.prompt.input, "theme monokai");
    }

    #[test]
    fn test_submit_ls() {
        let mut ctx = ctx();
        let before = active_logs(&ctx).len();
        ctx.apply(Action::InputChanged { value: "ls".to_string() });
        ctx.apply(Action::Submit);
        let logs = active_logs(&ctx);
        assert_eq!(logs.len(), before + 2);
        assert_eq!(logs[before], "soluf-th@dev:~$ ls");
        assert_eq!(logs[before + 1], "contracts/  .github/  README.md  package.json");
        assert_eq!(ctx.prompt.input, "");
        assert_eq!(ctx.prompt.suggestion, "");
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut ctx = ctx();
        let before = active_logs(&ctx);
        ctx.apply(Action::InputChanged { value: "   ".to_string() });
        ctx.apply(Action::Submit);
        assert_eq!(active_logs(&ctx), before);
        assert!(ctx.history.is_empty());
    }

    #[test]
    fn test_history_keys_clear_suggestion() {
        let mut ctx = ctx();
        ctx.submit("a");
        ctx.submit("b");
        ctx.apply(Action::InputChanged { value: "he".to_string() });
        assert_eq!(ctx.prompt.suggestion, "help");
        ctx.apply(Action::HistoryOlder);
        assert_eq!(ctx.prompt.input, "b");
        assert_eq!(ctx.prompt.suggestion, "");
        ctx.apply(Action::HistoryOlder);
        ctx.apply(Action::HistoryOlder);
        assert_eq!(ctx.prompt.input, "a");
        ctx.apply(Action::HistoryNewer);
        assert_eq!(ctx.prompt.input, "b");
        ctx.apply(Action::HistoryNewer);
        assert_eq!(ctx.prompt.input, "");
    }

    #[test]
    fn test_discard_logs_name_or_sentinel() {
        let mut ctx = ctx();
        ctx.apply(Action::Discard { id: "2".to_string() });
        assert!(!ctx.vcs.is_modified("2"));
        ctx.apply(Action::Discard { id: "404".to_string() });
        let logs = active_logs(&ctx);
        assert_eq!(logs[logs.len() - 2], "Git: Discarded changes in Storage.sol");
        assert_eq!(logs[logs.len() - 1], "Git: Discarded changes in unknown_file");
    }

    #[test]
    fn test_commit_guards_leave_draft() {
        let mut ctx = ctx();
        ctx.apply(Action::SetCommitMessage { message: "wip".to_string() });
        ctx.apply(Action::Commit);
        assert_eq!(ctx.commit_draft, "wip");

        ctx.apply(Action::Stage { id: "2".to_string() });
        ctx.apply(Action::SetCommitMessage { message: "  ".to_string() });
        let before = active_logs(&ctx).len();
        ctx.apply(Action::Commit);
        assert_eq!(ctx.commit_draft, "  ");
        assert!(ctx.vcs.is_staged("2"));
        assert_eq!(active_logs(&ctx).len(), before);
    }

    #[test]
    fn test_commit_clears_staged_and_draft() {
        let mut ctx = ctx();
        ctx.apply(Action::Stage { id: "2".to_string() });
        ctx.apply(Action::Stage { id: "6".to_string() });
        ctx.apply(Action::SetCommitMessage { message: "Add CI".to_string() });
        ctx.apply(Action::Commit);
        assert!(ctx.vcs.staged().is_empty());
        assert_eq!(ctx.commit_draft, "");
        assert_eq!(active_logs(&ctx).last().unwrap(), "Git: Committed 2 files to main: \"Add CI\"");
    }

    #[test]
    fn test_push_lifecycle_and_reentry() {
        let mut ctx = ctx();
        ctx.apply(Action::Push);
        assert!(ctx.vcs.is_pushing());
        let after_first = active_logs(&ctx);
        assert_eq!(after_first.last().unwrap(), "Git: Pushing to origin/main...");

        ctx.apply(Action::Push);
        assert_eq!(active_logs(&ctx), after_first);
        assert_eq!(ctx.timers.len(), 1);

        let fired = ctx.timers.advance_by(1999);
        assert!(fired.is_empty());
        for task in ctx.timers.advance_by(1) {
            ctx.resume(task);
        }
        assert!(!ctx.vcs.is_pushing());
        assert_eq!(active_logs(&ctx).last().unwrap(), "Git: Push successful.");
    }

    #[test]
    fn test_switch_branch_logs() {
        let mut ctx = ctx();
        ctx.apply(Action::SwitchBranch { name: "develop".to_string() });
        assert_eq!(ctx.vcs.branch, "develop");
        assert_eq!(active_logs(&ctx).last().unwrap(), "Git: Switched to branch 'develop'");
    }

    #[test]
    fn test_compile_success_and_single_flight() {
        let mut ctx = ctx();
        assert_eq!(ctx.compile(), CompileStart::Started);
        assert!(ctx.is_compiling);
        let before = active_logs(&ctx).len();
        assert_eq!(ctx.compile(), CompileStart::Busy);
        assert_eq!(ctx.timers.len(), 1);
        assert_eq!(active_logs(&ctx).len(), before);
        run_timers(&mut ctx);
        assert!(!ctx.is_compiling);
        assert_eq!(ctx.last_compile_status, CompileStatus::Success);
        assert_eq!(
            active_logs(&ctx).last().unwrap(),
            "Compiler: Success! ABI and Bytecode generated for Storage.sol."
        );
    }

    #[test]
    fn test_compile_failure_and_wrong_language() {
        let mut ctx = ctx();
        ctx.files.append_content("3", "// Error here");
        ctx.apply(Action::SelectFile { id: "3".to_string() });
        ctx.apply(Action::Compile);
        run_timers(&mut ctx);
        assert_eq!(ctx.last_compile_status, CompileStatus::Failed);

        ctx.apply(Action::SelectFile { id: "7".to_string() });
        let before = active_logs(&ctx).len();
        ctx.apply(Action::Compile);
        assert_eq!(active_logs(&ctx).len(), before);
        assert_eq!(ctx.compile(), CompileStart::NotSolidity);
        assert!(!ctx.is_compiling);
    }

    #[test]
    fn test_select_folder_keeps_current_file() {
        let mut ctx = ctx();
        ctx.assistant.completion = Some("x".to_string());
        ctx.apply(Action::SelectFile { id: "1".to_string() });
        assert_eq!(ctx.current_file_id.as_deref(), Some("2"));
        assert!(ctx.assistant.completion.is_none());
    }

    #[test]
    fn test_workflow_run_spacing() {
        let mut ctx = ctx();
        assert!(ctx.run_workflow("wf2"));
        assert!(!ctx.run_workflow("wf2"));
        assert!(!ctx.run_workflow("wf9"));
        assert_eq!(active_logs(&ctx).last().unwrap(), "[CD Deployment] Starting runner...");

        for task in ctx.timers.advance_by(800) {
            ctx.resume(task);
        }
        assert_eq!(active_logs(&ctx).last().unwrap(), "[CD Deployment] Checking out code...");
        for task in ctx.timers.advance_by(1600) {
            ctx.resume(task);
        }
        let wf = ctx.workflows.iter().find(|w| w.id == "wf2").unwrap();
        assert_eq!(wf.status, WorkflowStatus::Running);
        assert_eq!(wf.logs.len(), 4);
        for task in ctx.timers.advance_by(800) {
            ctx.resume(task);
        }
        let wf = ctx.workflows.iter().find(|w| w.id == "wf2").unwrap();
        assert_eq!(wf.status, WorkflowStatus::Success);
    }

    #[test]
    fn test_deferred_lines_follow_origin_session() {
        let mut ctx = ctx();
        ctx.submit("npm test");
        ctx.apply(Action::SwitchTerminal { id: "term-2".to_string() });
        run_timers(&mut ctx);
        let origin = ctx.sessions.get("term-1").unwrap();
        assert_eq!(origin.logs.last().unwrap(), "Tests completed successfully.");
        assert_eq!(ctx.sessions.get("term-2").unwrap().logs.len(), 2);
    }

    #[test]
    fn test_install_plugin_logs() {
        let mut ctx = ctx();
        ctx.apply(Action::InstallPlugin { id: "p3".to_string() });
        assert!(ctx.plugins[2].installed);
        assert_eq!(active_logs(&ctx).last().unwrap(), "Plugin Engine: Installed Hardhat Toolbox");
        let before = active_logs(&ctx).len();
        ctx.apply(Action::InstallPlugin { id: "zz".to_string() });
        assert_eq!(active_logs(&ctx).len(), before);
    }

    #[test]
    fn test_analyze_flow() {
        let mut ctx = ctx();
        ctx.apply(Action::Analyze);
        ctx.apply(Action::Analyze);
        assert_eq!(ctx.outbox.len(), 1);
        assert!(ctx.assistant.is_analyzing);
        assert_eq!(active_logs(&ctx).last().unwrap(), "AI: Analyzing Storage.sol...");

        let analysis = Analysis { summary: "ok".into(), issues: Vec::new(), optimization: String::new() };
        ctx.apply_reply(AiReply::Analysis { file_name: "Storage.sol".into(), result: Ok(analysis) });
        assert!(!ctx.assistant.is_analyzing);
        assert_eq!(active_logs(&ctx).last().unwrap(), "AI: Analysis complete for Storage.sol. Found 0 concerns.");

        ctx.apply_reply(AiReply::Analysis { file_name: "Storage.sol".into(), result: Err(AiError::Status(500)) });
        assert_eq!(active_logs(&ctx).last().unwrap(), "AI Error: analysis failed.");
        assert!(ctx.assistant.analysis.is_some());
    }

    #[test]
    fn test_completion_accept_appends_and_marks_modified() {
        let mut ctx = ctx();
        ctx.apply(Action::SelectFile { id: "3".to_string() });
        ctx.apply(Action::RequestCompletion);
        assert!(ctx.assistant.is_completing);
        ctx.apply_reply(AiReply::Completion(Ok("  function f() {}  \n".to_string())));
        assert!(!ctx.assistant.is_completing);
        assert_eq!(ctx.assistant.completion.as_deref(), Some("function f() {}"));

        ctx.apply(Action::AcceptCompletion);
        assert!(ctx.assistant.completion.is_none());
        assert!(ctx.files.get("3").unwrap().content.as_deref().unwrap().ends_with("\nfunction f() {}"));
        assert!(ctx.vcs.is_modified("3"));
    }

    #[test]
    fn test_completion_failure_logs() {
        let mut ctx = ctx();
        ctx.apply(Action::RequestCompletion);
        ctx.apply_reply(AiReply::Completion(Err(AiError::Transport("down".into()))));
        assert!(!ctx.assistant.is_completing);
        assert_eq!(active_logs(&ctx).last().unwrap(), "Autocomplete Error: completion interrupted.");
    }

    #[test]
    fn test_chat_failure_becomes_transcript_reply() {
        let mut ctx = ctx();
        ctx.apply(Action::SendChat { message: "   ".to_string() });
        assert!(ctx.outbox.is_empty());
        ctx.apply(Action::SendChat { message: "explain".to_string() });
        ctx.apply(Action::SendChat { message: "again".to_string() });
        assert_eq!(ctx.outbox.len(), 1);
        let before = active_logs(&ctx);
        ctx.apply_reply(AiReply::Chat(Err(AiError::Unavailable)));
        assert!(!ctx.assistant.is_chatting);
        assert_eq!(ctx.assistant.transcript.len(), 2);
        assert_eq!(ctx.assistant.transcript[1].role, ChatRole::Assistant);
        assert_eq!(ctx.assistant.transcript[1].text, CHAT_FALLBACK);
        assert_eq!(active_logs(&ctx), before);
    }
}

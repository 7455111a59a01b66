use serde::Serialize;
use std::rc::Rc;
use std::sync::Arc;

use crate::ai::{AiReply, AiRequest, AiService};
use crate::command::CommandRegistry;
use crate::config::IdeConfig;
use crate::context::{AssistantState, CompileStatus, IdeContext, PromptLine};
use crate::file_tree::{FileNode, SearchMatch};
use crate::highlight::{self, Span};
use crate::project::{Plugin, Task, WorkflowRun};
use crate::reducer::Action;
use crate::session::SessionManager;
use crate::theme::{Palette, TerminalTheme};
use crate::vcs::VcsState;

/// Read-only view handed to the host page after every change.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub now_ms: u64,
    pub files: &'a [FileNode],
    pub current_file_id: Option<&'a str>,
    pub sessions: &'a SessionManager,
    pub theme: TerminalTheme,
    pub palette: Palette,
    pub vcs: &'a VcsState,
    pub commit_draft: &'a str,
    pub tasks: &'a [Task],
    pub plugins: &'a [Plugin],
    pub workflows: &'a [WorkflowRun],
    pub is_compiling: bool,
    pub last_compile_status: CompileStatus,
    pub assistant: &'a AssistantState,
    pub prompt: &'a PromptLine,
    pub history: Vec<&'a String>,
    pub history_cursor: isize,
}

/// Owns the state and the assistant backend. Hosts feed it actions and
/// clock ticks and carry AI requests to completion.
pub struct Workbench {
    ctx: IdeContext,
    ai: Rc<dyn AiService>,
}

impl Workbench {
    pub fn new(config: IdeConfig, ai: Rc<dyn AiService>) -> Self {
        let mut ctx = IdeContext::new(config);
        ctx.set_command_registry(Arc::new(CommandRegistry::default_commands()));
        log::info!("workbench ready with {} files", ctx.files.len());
        Self { ctx, ai }
    }

    pub fn context(&self) -> &IdeContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut IdeContext {
        &mut self.ctx
    }

    pub fn ai(&self) -> Rc<dyn AiService> {
        Rc::clone(&self.ai)
    }

    pub fn dispatch(&mut self, action: Action) {
        self.ctx.apply(action);
    }

    pub fn submit(&mut self, line: &str) {
        self.ctx.submit(line);
    }

    /// Requests queued since the last call, oldest first.
    pub fn take_requests(&mut self) -> Vec<AiRequest> {
        std::mem::take(&mut self.ctx.outbox)
    }

    pub fn deliver(&mut self, reply: AiReply) {
        self.ctx.apply_reply(reply);
    }

    pub fn now(&self) -> u64 {
        self.ctx.timers.now()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.ctx.timers.next_due()
    }

    /// Fires every continuation due at or before `t`; returns how many ran.
    pub fn advance_to(&mut self, t: u64) -> usize {
        let fired = self.ctx.timers.advance_to(t);
        let count = fired.len();
        for task in fired {
            self.ctx.resume(task);
        }
        count
    }

    pub fn advance_by(&mut self, delta_ms: u64) -> usize {
        self.advance_to(self.now().saturating_add(delta_ms))
    }

    /// Resolves queued AI requests by blocking on each in turn.
    pub fn resolve_ai_blocking(&mut self) -> usize {
        let requests = self.take_requests();
        let count = requests.len();
        for request in requests {
            let reply = futures::executor::block_on(request.send(self.ai.as_ref()));
            self.deliver(reply);
        }
        count
    }

    /// Runs AI requests and fast-forwards the clock until nothing is pending.
    pub fn run_until_idle(&mut self) {
        loop {
            self.resolve_ai_blocking();
            match self.ctx.timers.pop_next() {
                Some(task) => self.ctx.resume(task),
                None if self.ctx.outbox.is_empty() => break,
                None => {}
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let ctx = &self.ctx;
        Snapshot {
            now_ms: ctx.timers.now(),
            files: ctx.files.roots(),
            current_file_id: ctx.current_file_id.as_deref(),
            sessions: &ctx.sessions,
            theme: ctx.theme,
            palette: ctx.theme.palette(),
            vcs: &ctx.vcs,
            commit_draft: &ctx.commit_draft,
            tasks: &ctx.tasks,
            plugins: &ctx.plugins,
            workflows: &ctx.workflows,
            is_compiling: ctx.is_compiling,
            last_compile_status: ctx.last_compile_status,
            assistant: &ctx.assistant,
            prompt: &ctx.prompt,
            history: ctx.history.entries().collect(),
            history_cursor: ctx.history.cursor(),
        }
    }

    pub fn highlight(&self, line: &str) -> Vec<Span> {
        highlight::highlight(line, &self.ctx.config.prompt, crate::fixtures::COMMANDS, self.ctx.file_names().as_slice())
    }

    pub fn search(&self, query: &str) -> Vec<SearchMatch> {
        self.ctx.files.search(query)
    }
}

use chrono::Local;
use serde::Serialize;
use std::sync::Arc;

use crate::ai::{AiRequest, Analysis, ChatMessage};
use crate::command::CommandRegistry;
use crate::config::IdeConfig;
use crate::file_tree::{FileNode, FileTree};
use crate::fixtures;
use crate::history::CommandHistory;
use crate::project::{Plugin, Task, WorkflowRun};
use crate::reducer::Deferred;
use crate::scheduler::TimerQueue;
use crate::session::SessionManager;
use crate::theme::TerminalTheme;
use crate::vcs::VcsState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompileStatus {
    #[default]
    None,
    Success,
    Failed,
}

/// Busy flags and results of the assistant call sites.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantState {
    pub is_analyzing: bool,
    pub is_completing: bool,
    pub is_chatting: bool,
    pub analysis: Option<Analysis>,
    pub completion: Option<String>,
    pub transcript: Vec<ChatMessage>,
}

/// The terminal's input line: typed text and its ghost-text hint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptLine {
    pub input: String,
    pub suggestion: String,
}

/// Everything the simulated IDE knows. Commands and reducer transitions get
/// `&mut IdeContext`; nothing else writes to it.
pub struct IdeContext {
    pub config: IdeConfig,
    pub files: FileTree,
    pub current_file_id: Option<String>,
    pub sessions: SessionManager,
    pub theme: TerminalTheme,
    pub vcs: VcsState,
    pub commit_draft: String,
    pub tasks: Vec<Task>,
    pub plugins: Vec<Plugin>,
    pub workflows: Vec<WorkflowRun>,
    pub is_compiling: bool,
    pub last_compile_status: CompileStatus,
    pub assistant: AssistantState,
    pub prompt: PromptLine,
    pub history: CommandHistory,
    pub timers: TimerQueue<Deferred>,
    pub outbox: Vec<AiRequest>,
    pub registry: Option<Arc<CommandRegistry>>, // for dispatch and help
}

impl IdeContext {
    /// Fresh state from the built-in project fixture.
    pub fn new(config: IdeConfig) -> Self {
        let files = FileTree::new(fixtures::initial_files()).unwrap_or_else(|e| {
            log::error!("bad fixture tree: {}", e);
            FileTree::default()
        });
        Self::new_with_files(config, files)
    }

    pub fn new_with_files(config: IdeConfig, files: FileTree) -> Self {
        let current_file_id = files.get(fixtures::DEFAULT_FILE_ID).map(|n| n.id.clone());
        let history = CommandHistory::new(config.history_limit);
        Self {
            files,
            current_file_id,
            sessions: SessionManager::new(fixtures::initial_sessions()),
            theme: TerminalTheme::default(),
            vcs: VcsState::new(fixtures::DEFAULT_BRANCH, fixtures::initial_modified()),
            commit_draft: String::new(),
            tasks: fixtures::initial_tasks(Local::now().timestamp_millis()),
            plugins: fixtures::initial_plugins(),
            workflows: fixtures::initial_workflows(),
            is_compiling: false,
            last_compile_status: CompileStatus::None,
            assistant: AssistantState::default(),
            prompt: PromptLine::default(),
            history,
            timers: TimerQueue::new(),
            outbox: Vec::new(),
            registry: None,
            config,
        }
    }

    pub fn set_command_registry(&mut self, registry: Arc<CommandRegistry>) {
        self.registry = Some(registry);
    }

    pub fn get_command_registry(&self) -> Option<&Arc<CommandRegistry>> {
        self.registry.as_ref()
    }

    pub fn current_file(&self) -> Option<&FileNode> {
        self.current_file_id.as_deref().and_then(|id| self.files.get(id))
    }

    /// Appends to the active session.
    pub fn log(&mut self, line: impl Into<String>) {
        self.sessions.append(None, line);
    }

    /// Appends to a specific session, dropping the line if it was closed.
    pub fn log_to(&mut self, session_id: &str, line: impl Into<String>) {
        if !self.sessions.append(Some(session_id), line) {
            log::debug!("dropped line for closed session {}", session_id);
        }
    }

    pub fn schedule(&mut self, delay_ms: u64, task: Deferred) {
        let due = self.timers.schedule(delay_ms, task);
        log::debug!("scheduled continuation due at {}ms", due);
    }

    pub fn active_session_id(&self) -> String {
        self.sessions.active_id().to_string()
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files.all_names()
    }
}

use chrono::Local;
use serde::Serialize;
use uuid::Uuid;

const DEFAULT_SESSION_NAME: &str = "bash";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminalSession {
    pub id: String,
    pub name: String,
    pub logs: Vec<String>,
}

impl TerminalSession {
    pub fn new(id: &str, name: &str, logs: Vec<String>) -> Self {
        Self { id: id.to_string(), name: name.to_string(), logs }
    }
}

/// Ordered terminal tabs plus the active one. Never empty.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionManager {
    sessions: Vec<TerminalSession>,
    active_id: String,
}

impl SessionManager {
    /// The first session starts active. An empty list gets one fresh session.
    pub fn new(sessions: Vec<TerminalSession>) -> Self {
        let mut mgr = Self { sessions, active_id: String::new() };
        match mgr.sessions.first() {
            Some(first) => mgr.active_id = first.id.clone(),
            None => {
                mgr.create();
            }
        }
        mgr
    }

    pub fn sessions(&self) -> &[TerminalSession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn get(&self, id: &str) -> Option<&TerminalSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn active(&self) -> Option<&TerminalSession> {
        self.get(&self.active_id)
    }

    /// Opens a new session and makes it active. Returns its id.
    pub fn create(&mut self) -> String {
        let id = format!("term-{}", Uuid::new_v4());
        let welcome = format!("Terminal created at {}", Local::now().format("%H:%M:%S"));
        self.sessions.push(TerminalSession::new(&id, DEFAULT_SESSION_NAME, vec![welcome]));
        self.active_id = id.clone();
        log::debug!("opened terminal session {}", id);
        id
    }

    /// Refused for the last remaining session or an unknown id.
    pub fn close(&mut self, id: &str) -> bool {
        if self.sessions.len() <= 1 {
            return false;
        }
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() == before {
            return false;
        }
        if self.active_id == id {
            if let Some(first) = self.sessions.first() {
                self.active_id = first.id.clone();
            }
        }
        log::debug!("closed terminal session {}", id);
        true
    }

    pub fn switch(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.active_id = id.to_string();
        true
    }

    /// Appends to `target`, or to the active session when `None`. Lines for a
    /// session that no longer exists are dropped.
    pub fn append(&mut self, target: Option<&str>, line: impl Into<String>) -> bool {
        let id = target.unwrap_or(self.active_id.as_str()).to_string();
        match self.sessions.iter_mut().find(|s| s.id == id) {
            Some(session) => {
                session.logs.push(line.into());
                true
            }
            None => false,
        }
    }

    pub fn clear_active(&mut self) {
        let id = self.active_id.clone();
        if let Some(session) = self.sessions.iter_mut().find(|s| s.id == id) {
            session.logs.clear();
        }
    }
}

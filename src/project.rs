// tasks, plugins and CI workflow records
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginCategory {
    Compiler,
    Debug,
    Theme,
    Library,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugin {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub installed: bool,
    pub category: PluginCategory,
}

impl Plugin {
    pub fn new(id: &str, name: &str, description: &str, version: &str, installed: bool, category: PluginCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            version: version.to_string(),
            installed,
            category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Idle,
    Running,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRun {
    pub id: String,
    pub workflow_name: String,
    pub status: WorkflowStatus,
    pub logs: Vec<String>,
}

impl WorkflowRun {
    /// Lines a run prints, one per step.
    pub fn step_lines(&self) -> Vec<String> {
        ["Starting runner...", "Checking out code...", "Deployment success!", "Job finished."]
            .iter()
            .map(|step| format!("[{}] {}", self.workflow_name, step))
            .collect()
    }
}

/// Prepends a task. Blank text is ignored.
pub fn add_task(tasks: &mut Vec<Task>, text: &str, now_ms: i64) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let id = format!("task-{}", Uuid::new_v4());
    tasks.insert(0, Task { id: id.clone(), text: text.to_string(), completed: false, created_at: now_ms });
    Some(id)
}

pub fn toggle_task(tasks: &mut [Task], id: &str) -> bool {
    match tasks.iter_mut().find(|t| t.id == id) {
        Some(task) => {
            task.completed = !task.completed;
            true
        }
        None => false,
    }
}

pub fn delete_task(tasks: &mut Vec<Task>, id: &str) -> bool {
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    tasks.len() != before
}

/// Returns the plugin's name when it was found.
pub fn install_plugin(plugins: &mut [Plugin], id: &str) -> Option<String> {
    let plugin = plugins.iter_mut().find(|p| p.id == id)?;
    plugin.installed = true;
    Some(plugin.name.clone())
}

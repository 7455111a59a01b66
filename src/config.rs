use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_PROMPT: &str = "soluf-th@dev:~$";
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings handed over by the host page as JSON. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdeConfig {
    pub prompt: String,
    pub history_limit: usize,
    pub delays: Delays,
    pub ai: AiConfig,
}

/// Simulated latencies, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delays {
    pub test_run_ms: u64,
    pub compile_ms: u64,
    pub push_ms: u64,
    pub workflow_step_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub endpoint: String,
}

impl Default for IdeConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            delays: Delays::default(),
            ai: AiConfig::default(),
        }
    }
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            test_run_ms: 1000,
            compile_ms: 2000,
            push_ms: 2000,
            workflow_step_ms: 800,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl IdeConfig {
    /// Blank input means "all defaults".
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn has_ai_key(&self) -> bool {
        self.ai.api_key.as_deref().map_or(false, |k| !k.trim().is_empty())
    }
}

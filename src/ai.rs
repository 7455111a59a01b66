use futures::future::{self, LocalBoxFuture};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AiError;

pub type AiFuture<T> = LocalBoxFuture<'static, Result<T, AiError>>;

/// Generative-language backend used by the assistant panel. Each call site
/// allows one request in flight, so responses need no correlation.
pub trait AiService {
    fn analyze(&self, code: &str, language: &str) -> AiFuture<Analysis>;
    fn complete(&self, code: &str, language: &str) -> AiFuture<String>;
    fn chat(&self, message: &str, context: &str) -> AiFuture<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
    #[serde(default, deserialize_with = "line_number")]
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub optimization: String,
}

// the schema says NUMBER, so 4 and 4.0 both show up
fn line_number<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
    let n = f64::deserialize(de)?;
    Ok(if n.is_finite() && n > 0.0 { n as u32 } else { 0 })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// What the controller asks the backend to do next.
#[derive(Debug, Clone, PartialEq)]
pub enum AiRequest {
    Analyze { file_name: String, code: String, language: String },
    Complete { code: String, language: String },
    Chat { message: String, context: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AiReply {
    Analysis { file_name: String, result: Result<Analysis, AiError> },
    Completion(Result<String, AiError>),
    Chat(Result<String, AiError>),
}

impl AiRequest {
    /// Runs the request against `service`, tagging the result with its call site.
    pub fn send(self, service: &dyn AiService) -> LocalBoxFuture<'static, AiReply> {
        use futures::FutureExt;
        match self {
            AiRequest::Analyze { file_name, code, language } => service
                .analyze(&code, &language)
                .map(move |result| AiReply::Analysis { file_name, result })
                .boxed_local(),
            AiRequest::Complete { code, language } => {
                service.complete(&code, &language).map(AiReply::Completion).boxed_local()
            }
            AiRequest::Chat { message, context } => {
                service.chat(&message, &context).map(AiReply::Chat).boxed_local()
            }
        }
    }
}

/// Backend stand-in when no API key is configured.
pub struct OfflineAi;

impl AiService for OfflineAi {
    fn analyze(&self, _code: &str, _language: &str) -> AiFuture<Analysis> {
        Box::pin(future::ready(Err(AiError::Unavailable)))
    }

    fn complete(&self, _code: &str, _language: &str) -> AiFuture<String> {
        Box::pin(future::ready(Err(AiError::Unavailable)))
    }

    fn chat(&self, _message: &str, _context: &str) -> AiFuture<String> {
        Box::pin(future::ready(Err(AiError::Unavailable)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_analysis_parses_loose_json() {
        let json = r#"{
            "summary": "Simple storage",
            "issues": [
                {"severity": "High", "message": "No access control", "line": 6},
                {"severity": "low", "message": "Missing events", "line": 5.0}
            ],
            "optimization": "Mark val immutable where possible"
        }"#;
        let analysis: Analysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.issues.len(), 2);
        assert_eq!(analysis.issues[0].severity, Severity::High);
        assert_eq!(analysis.issues[1].severity, Severity::Low);
        assert_eq!(analysis.issues[1].line, 5);
    }

    #[test]
    fn test_analysis_missing_issue_line_defaults() {
        let json = r#"{"summary": "s", "issues": [{"severity": "Medium", "message": "m"}]}"#;
        let analysis: Analysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.issues[0].line, 0);
        assert_eq!(analysis.optimization, "");
    }

    #[test]
    fn test_offline_always_unavailable() {
        let reply = block_on(AiRequest::Chat { message: "hi".into(), context: String::new() }.send(&OfflineAi));
        assert_eq!(reply, AiReply::Chat(Err(AiError::Unavailable)));
    }
}

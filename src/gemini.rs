// REST client for the generative-language API behind the assistant panel
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::OnceLock;

use crate::ai::{AiFuture, AiService, Analysis};
use crate::config::AiConfig;
use crate::error::AiError;

const ASSISTANT_PERSONA: &str = "You are Soluf-th AI, a senior developer assistant. You specialize in VS Code, GitHub Actions, and Solidity smart contracts. Keep answers concise and code-focused.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn text(text: String) -> Self {
        Self { role: None, parts: vec![Part { text }] }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

fn analysis_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "issues": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "severity": { "type": "STRING", "description": "Low, Medium, High" },
                        "message": { "type": "STRING" },
                        "line": { "type": "NUMBER" }
                    }
                }
            },
            "optimization": { "type": "STRING" }
        },
        "required": ["summary", "issues", "optimization"]
    })
}

pub fn analyze_request(code: &str, language: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content::text(format!(
            "Analyze the following {} code for errors, security vulnerabilities (especially if it's Solidity), and suggest optimizations:\n\n{}",
            language, code
        ))],
        generation_config: Some(GenerationConfig {
            temperature: Some(0.7),
            top_p: Some(0.95),
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(analysis_schema()),
            ..Default::default()
        }),
        system_instruction: None,
    }
}

pub fn complete_request(code: &str, language: &str) -> GenerateRequest {
    let prompt = format!(
        "You are a professional code completion engine for Soluf-th IDE.\n\
         Context: Language is {}.\n\
         Code so far:\n{}\n\n\
         TASK: Provide only the next logical code snippet to continue the file.\n\
         IMPORTANT:\n\
         - Return ONLY the code.\n\
         - No markdown formatting.\n\
         - No explanations.\n\
         - No triple backticks.",
        language, code
    );
    GenerateRequest {
        contents: vec![Content::text(prompt)],
        generation_config: Some(GenerationConfig {
            temperature: Some(0.2),
            max_output_tokens: Some(200),
            ..Default::default()
        }),
        system_instruction: None,
    }
}

pub fn chat_request(message: &str, context: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content::text(format!("Context: {}\n\nUser: {}", context, message))],
        generation_config: None,
        system_instruction: Some(Content::text(ASSISTANT_PERSONA.to_string())),
    }
}

/// Concatenated text of the first candidate.
pub fn response_text(body: &str) -> Result<String, AiError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text)
}

pub fn parse_analysis(text: &str) -> Result<Analysis, AiError> {
    Ok(serde_json::from_str(strip_code_fences(text).trim())?)
}

/// Removes a surrounding ```lang ... ``` block if the model added one anyway.
pub fn strip_code_fences(text: &str) -> String {
    static FENCE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    let fence = FENCE.get_or_init(|| Regex::new(r"(?s)^\s*```[\w+-]*[ \t]*\r?\n?(.*?)\r?\n?```\s*$"));
    match fence {
        Ok(re) => match re.captures(text) {
            Some(caps) => caps.get(1).map_or("", |m| m.as_str()).to_string(),
            None => text.to_string(),
        },
        Err(_) => text.to_string(),
    }
}

pub struct GeminiClient {
    config: AiConfig,
}

impl GeminiClient {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.config.endpoint.trim_end_matches('/'), self.config.model)
    }

    fn generate(&self, request: GenerateRequest) -> AiFuture<String> {
        let url = self.url();
        let key = self.config.api_key.clone().unwrap_or_default();
        Box::pin(async move {
            let body = serde_json::to_string(&request)?;
            let raw = post_json(&url, &key, &body).await?;
            response_text(&raw)
        })
    }
}

impl AiService for GeminiClient {
    fn analyze(&self, code: &str, language: &str) -> AiFuture<Analysis> {
        let reply = self.generate(analyze_request(code, language));
        Box::pin(async move { parse_analysis(&reply.await?) })
    }

    fn complete(&self, code: &str, language: &str) -> AiFuture<String> {
        let reply = self.generate(complete_request(code, language));
        Box::pin(async move { Ok(strip_code_fences(&reply.await?)) })
    }

    fn chat(&self, message: &str, context: &str) -> AiFuture<String> {
        self.generate(chat_request(message, context))
    }
}

#[cfg(target_arch = "wasm32")]
async fn post_json(url: &str, key: &str, body: &str) -> Result<String, AiError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

    let js_err = |e: JsValue| AiError::Transport(e.as_string().unwrap_or_else(|| format!("{:?}", e)));

    let headers = Headers::new().map_err(js_err)?;
    headers.set("Content-Type", "application/json").map_err(js_err)?;
    headers.set("x-goog-api-key", key).map_err(js_err)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_headers(&headers);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
    let window = web_sys::window().ok_or_else(|| AiError::Transport("no window object".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await.map_err(js_err)?;
    let resp: Response = resp_value.dyn_into().map_err(js_err)?;
    if !resp.ok() {
        log::warn!("generateContent answered {}", resp.status());
        return Err(AiError::Status(resp.status()));
    }
    let text = JsFuture::from(resp.text().map_err(js_err)?).await.map_err(js_err)?;
    text.as_string().ok_or_else(|| AiError::MalformedResponse("body is not text".to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
async fn post_json(_url: &str, _key: &str, _body: &str) -> Result<String, AiError> {
    Err(AiError::Transport("the AI client only works in the browser (WASM)".to_string()))
}

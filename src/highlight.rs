use serde::Serialize;

const TOOLS: &[&str] = &["npm", "hardhat", "git", "solc", "cat", "ls"];
const SUBCOMMANDS: &[&str] = &[
    "test", "deploy", "run", "install", "status", "branch", "add", "reset", "commit", "push", "checkout",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Prompt,
    Tool,
    Command,
    Unknown,
    Flag,
    Subcommand,
    FileName,
    Argument,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub kind: TokenKind,
    pub text: String,
}

impl Span {
    fn new(kind: TokenKind, text: &str) -> Self {
        Self { kind, text: text.to_string() }
    }
}

/// Splits an echoed command line into colored spans. Anything that is not a
/// prompt echo comes back as one plain span.
pub fn highlight<S: AsRef<str>>(line: &str, prompt: &str, commands: &[&str], file_names: &[S]) -> Vec<Span> {
    let body = match line.strip_prefix(prompt) {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => return vec![Span::new(TokenKind::Plain, line)],
    };

    let mut spans = vec![Span::new(TokenKind::Prompt, prompt)];
    for (i, word) in body.split(' ').enumerate() {
        let lower = word.to_lowercase();
        let kind = if i == 0 {
            if TOOLS.contains(&lower.as_str()) {
                TokenKind::Tool
            } else if commands.contains(&lower.as_str()) {
                TokenKind::Command
            } else {
                TokenKind::Unknown
            }
        } else if word.starts_with('-') {
            TokenKind::Flag
        } else if SUBCOMMANDS.contains(&lower.as_str()) {
            TokenKind::Subcommand
        } else if file_names.iter().any(|f| f.as_ref() == word) {
            TokenKind::FileName
        } else {
            TokenKind::Argument
        };
        spans.push(Span::new(kind, word));
    }
    spans
}

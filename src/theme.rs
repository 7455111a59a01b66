use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalTheme {
    #[default]
    GithubDark,
    Cyberpunk,
    Monokai,
}

/// Colors the host page paints the terminal with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub prompt: &'static str,
    pub workflow: &'static str,
}

impl TerminalTheme {
    pub const ALL: [TerminalTheme; 3] = [TerminalTheme::GithubDark, TerminalTheme::Cyberpunk, TerminalTheme::Monokai];

    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalTheme::GithubDark => "github-dark",
            TerminalTheme::Cyberpunk => "cyberpunk",
            TerminalTheme::Monokai => "monokai",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            TerminalTheme::GithubDark => Palette { background: "#0a0c10", text: "#9ca3af", prompt: "#22c55e", workflow: "#60a5fa" },
            TerminalTheme::Cyberpunk => Palette { background: "#1a1b26", text: "#bb9af7", prompt: "#f7768e", workflow: "#7aa2f7" },
            TerminalTheme::Monokai => Palette { background: "#272822", text: "#f8f8f2", prompt: "#a6e22e", workflow: "#66d9ef" },
        }
    }
}

impl FromStr for TerminalTheme {
    type Err = String;

    // exact, case-sensitive names only
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TerminalTheme::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown theme: {}", s))
    }
}

impl fmt::Display for TerminalTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

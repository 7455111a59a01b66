// startup data for the simulated project
use crate::file_tree::FileNode;
use crate::project::{Plugin, PluginCategory, Task, WorkflowRun, WorkflowStatus};
use crate::session::TerminalSession;

/// Command vocabulary for ghost-text suggestions, in priority order.
pub const COMMANDS: &[&str] = &[
    "help",
    "clear",
    "ls",
    "npm test",
    "npm deploy",
    "audit",
    "whoami",
    "theme monokai",
    "theme cyberpunk",
    "theme github-dark",
    "cat",
    "solc",
    "history",
    "git status",
    "git branch",
    "git push",
];

pub const LS_OUTPUT: &str = "contracts/  .github/  README.md  package.json";
pub const WHOAMI: &str = "soluf-th-developer-agent-01";
pub const BRANCHES: &[&str] = &["main", "develop", "feature/ai-integration", "fix/smart-audit"];

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_FILE_ID: &str = "2";
pub const DEFAULT_SESSION_ID: &str = "term-1";

const STORAGE_SOL: &str = "// SPDX-License-Identifier: MIT\npragma solidity ^0.8.0;\n\ncontract Storage {\n    uint256 public val;\n    function store(uint256 x) public {\n        val = x;\n    }\n}";
const TOKEN_SOL: &str = "contract Token { mapping(address=>uint) balances; }";
const MAIN_YML: &str = "name: CI\non: [push]\njobs:\n  build:\n    runs-on: ubuntu-latest\n    steps:\n      - uses: actions/checkout@v2\n      - name: Run Tests\n        run: npm test";
const DEPLOY_YML: &str = "name: CD\non: [manual]\njobs:\n  deploy:\n    runs-on: ubuntu-latest\n    steps:\n      - uses: actions/checkout@v2\n      - name: Deploy to Mainnet\n        run: hardhat deploy";
const README_MD: &str = "# Soluf-th Project\nDeveloper hub simulation.";

pub fn initial_files() -> Vec<FileNode> {
    vec![
        FileNode::folder(
            "1",
            "contracts",
            vec![
                FileNode::file("2", "Storage.sol", "solidity", STORAGE_SOL),
                FileNode::file("3", "Token.sol", "solidity", TOKEN_SOL),
            ],
        ),
        FileNode::folder(
            "4",
            ".github",
            vec![FileNode::folder(
                "5",
                "workflows",
                vec![
                    FileNode::file("6", "main.yml", "yaml", MAIN_YML),
                    FileNode::file("8", "deploy.yml", "yaml", DEPLOY_YML),
                ],
            )],
        ),
        FileNode::file("7", "README.md", "markdown", README_MD),
    ]
}

/// Files that start out with uncommitted edits.
pub fn initial_modified() -> Vec<&'static str> {
    vec!["2", "6"]
}

pub fn initial_sessions() -> Vec<TerminalSession> {
    vec![
        TerminalSession::new(
            DEFAULT_SESSION_ID,
            "bash",
            vec!["Welcome to Soluf-th Bash v5.1".to_string(), "Type \"help\" for available commands.".to_string()],
        ),
        TerminalSession::new(
            "term-2",
            "node",
            vec!["Welcome to Node.js v18.16.0.".to_string(), "Type \".help\" for more information.".to_string()],
        ),
    ]
}

pub fn initial_plugins() -> Vec<Plugin> {
    vec![
        Plugin::new("p1", "Solidity Compiler", "Advanced Solidity compiler for EVM 1.0/2.0.", "0.8.24", true, PluginCategory::Compiler),
        Plugin::new("p2", "Etherscan Verifier", "Automatically verify contracts on Etherscan.", "1.2.0", false, PluginCategory::Library),
        Plugin::new("p3", "Hardhat Toolbox", "Essential tools for Hardhat development.", "2.0.4", false, PluginCategory::Library),
        Plugin::new("p4", "OpenZeppelin Libs", "Standard secure smart contract libraries.", "5.0.0", true, PluginCategory::Library),
    ]
}

pub fn initial_workflows() -> Vec<WorkflowRun> {
    vec![
        WorkflowRun {
            id: "wf1".to_string(),
            workflow_name: "CI Pipeline".to_string(),
            status: WorkflowStatus::Success,
            logs: ["Build started", "npm install successful", "Tests passed", "Build finished"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
        WorkflowRun {
            id: "wf2".to_string(),
            workflow_name: "CD Deployment".to_string(),
            status: WorkflowStatus::Idle,
            logs: Vec::new(),
        },
    ]
}

pub fn initial_tasks(now_ms: i64) -> Vec<Task> {
    vec![
        Task { id: "t1".to_string(), text: "Optimize Solidity Storage".to_string(), completed: false, created_at: now_ms },
        Task { id: "t2".to_string(), text: "Update GitHub Actions config".to_string(), completed: true, created_at: now_ms - 100_000 },
        Task { id: "t3".to_string(), text: "Refactor AI response handling in the UI".to_string(), completed: false, created_at: now_ms },
    ]
}

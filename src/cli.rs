//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "runbook-audit",
    version,
    about = "Runbook documentation auditor",
    long_about = "runbook-audit — scans a tree of Markdown runbooks for interface, contract, invariant, verification, and risk mentions, then emits per-runbook cards, cross-file registries, and a red/yellow/green scorecard.\n\nConfiguration precedence: CLI > audit.toml > defaults.",
    after_help = "Examples:\n  runbook-audit audit --root docs/Runbooks\n  runbook-audit audit --root docs/Runbooks --output json\n  runbook-audit audit --out build/audit",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current runbook-audit version.")]
    Version,
    /// Audit runbook documentation
    #[command(
        about = "Run the documentation audit",
        long_about = "Walk the tree, scan every matching Markdown file, and write cards, registries, and reports under the output directory. Missing documentation never fails the run; it is surfaced as UNSPECIFIED placeholders and TODO entries.",
        after_help = "Examples:\n  runbook-audit audit\n  runbook-audit audit --root docs/Runbooks --output json"
    )]
    Audit {
        #[arg(long, help = "Directory tree to scan (default: current dir)")]
        root: Option<String>,
        #[arg(long, help = "Output directory for generated reports (default: <root>/_runbook_audit)")]
        out: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}

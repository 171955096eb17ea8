//! Configuration discovery and effective settings resolution.
//!
//! The auditor reads `audit.toml|yaml|yml` from the scan root (or closest
//! ancestor, stopping at `.git`) and merges it with CLI flags.
//! Defaults:
//! - `output_dir`: `_runbook_audit` (under the scan root)
//! - `output`: `human`
//! - `[patterns] runbooks|additional`: the built-in filename glob sets
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::discover::{ADDITIONAL_PATTERNS, RUNBOOK_PATTERNS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "_runbook_audit";

#[derive(Debug, Default, Deserialize, Clone)]
/// Filename glob overrides under `[patterns]`.
pub struct PatternsCfg {
    pub runbooks: Option<Vec<String>>,
    pub additional: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `audit.toml|yaml`.
pub struct AuditConfig {
    pub output_dir: Option<String>,
    pub output: Option<String>,
    #[serde(default)]
    pub patterns: Option<PatternsCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the audit command.
pub struct Effective {
    pub root: PathBuf,
    pub out_dir: PathBuf,
    pub output: String,
    pub runbook_patterns: Vec<String>,
    pub additional_patterns: Vec<String>,
    /// True when the patterns came from the built-in defaults.
    pub default_patterns: bool,
}

/// Walk upward from `start` until a config file or `.git` is found.
pub fn detect_config_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("audit.toml").exists()
            || cur.join("audit.yaml").exists()
            || cur.join("audit.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `AuditConfig` from `audit.toml` or `audit.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<AuditConfig> {
    let toml_path = root.join("audit.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: AuditConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["audit.yaml", "audit.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: AuditConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// The scan root is taken as given (`--root` or the current directory); only
/// config discovery walks upward.
pub fn resolve_effective(
    cli_root: Option<&str>,
    cli_out: Option<&str>,
    cli_output: Option<&str>,
) -> Effective {
    let root = PathBuf::from(cli_root.unwrap_or("."));
    let cfg_root = detect_config_root(&root);
    let cfg = load_config(&cfg_root).unwrap_or_default();

    let out_dir = match cli_out {
        Some(o) => PathBuf::from(o),
        None => root.join(cfg.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)),
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let patterns = cfg.patterns.unwrap_or_default();
    let default_patterns = patterns.runbooks.is_none() && patterns.additional.is_none();
    let runbook_patterns = patterns
        .runbooks
        .unwrap_or_else(|| RUNBOOK_PATTERNS.iter().map(|s| s.to_string()).collect());
    let additional_patterns = patterns
        .additional
        .unwrap_or_else(|| ADDITIONAL_PATTERNS.iter().map(|s| s.to_string()).collect());

    Effective {
        root,
        out_dir,
        output,
        runbook_patterns,
        additional_patterns,
        default_patterns,
    }
}

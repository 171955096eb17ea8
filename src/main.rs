//! Runbook audit CLI binary entry point.
//! Delegates to the library pipeline and prints results.

use clap::Parser;
use runbook_audit::cli::{Cli, Commands};
use runbook_audit::{config, output, pipeline, utils};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Audit {
            root,
            out,
            output: mode,
        } => {
            let eff =
                config::resolve_effective(root.as_deref(), out.as_deref(), mode.as_deref());
            // Friendly note when running on defaults only.
            if config::load_config(&config::detect_config_root(&eff.root)).is_none() {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No audit.toml found; using defaults."
                );
            }
            if eff.output != "json" && eff.default_patterns {
                eprintln!(
                    "{} {}",
                    utils::info_prefix(),
                    format!(
                        "Using default runbook patterns: [{}]",
                        eff.runbook_patterns.join(", ")
                    )
                );
            }
            match pipeline::run_audit(&eff) {
                Ok(outcome) => output::print_audit(&outcome, &eff.output),
                Err(e) => {
                    eprintln!(
                        "{} {}",
                        utils::error_prefix(),
                        format!("audit failed: {}", e)
                    );
                    std::process::exit(2);
                }
            }
        }
    }
}

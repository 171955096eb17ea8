//! Standalone smoke test comparing sentence segmenters on legal text.
//!
//! Determines whether the primary segmenter handles citation-heavy legal
//! prose well enough for ingestion, or whether the fallback (with its
//! accuracy trade-off) should be documented instead.

use owo_colors::OwoColorize;
use runbook_audit::tokenize::{
    run_fallback, run_primary, SegmenterReport, EXPECTED_CITATION_SENTENCES, EXPECTED_SENTENCES,
};
use runbook_audit::utils::colors_enabled;

fn banner(title: &str) {
    println!("{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
    println!();
}

fn ok_mark() -> String {
    if colors_enabled() {
        "✓".green().to_string()
    } else {
        "✓".to_string()
    }
}

fn warn_mark() -> String {
    if colors_enabled() {
        "⚠".yellow().to_string()
    } else {
        "⚠".to_string()
    }
}

fn print_sentences(report: &SegmenterReport) {
    println!("{} Parsed {} sentences", ok_mark(), report.sentences.len());
    println!();
    println!("Extracted sentences:");
    for (i, sent) in report.sentences.iter().enumerate() {
        println!("  {}. {}", i + 1, sent);
    }
    println!();
}

fn main() {
    banner("Sentence Tokenizer Verification");

    let primary = run_primary();

    println!("Test 1: Primary Segmentation ({})", primary.name);
    print_sentences(&primary);

    println!("Test 2: Accuracy Check");
    if primary.count_matches() {
        println!(
            "{} Correct sentence count: {} (expected {})",
            ok_mark(),
            primary.sentences.len(),
            EXPECTED_SENTENCES
        );
    } else {
        println!(
            "{} Sentence count mismatch: {} (expected {})",
            warn_mark(),
            primary.sentences.len(),
            EXPECTED_SENTENCES
        );
        println!("  This may indicate issues with citation handling");
    }
    println!();

    println!("Test 3: Citation Pattern Handling");
    if primary.citations_ok() {
        println!("{} Citations with abbreviations handled correctly", ok_mark());
        for (i, sent) in primary.citation_sentences.iter().enumerate() {
            println!("  Sentence {}: {}", i + 1, sent);
        }
    } else {
        println!(
            "{} Citation handling may have issues (got {} sentences, expected {})",
            warn_mark(),
            primary.citation_sentences.len(),
            EXPECTED_CITATION_SENTENCES
        );
    }
    println!();

    if !primary.production_ready() {
        println!("Testing fallback option...");
        println!();
        let fallback = run_fallback();
        banner(&format!("Fallback Comparison ({})", fallback.name));
        print_sentences(&fallback);
        println!("{} is available as fallback", fallback.name);
        println!("Trade-off: UAX #29 boundaries split after citation abbreviations");
        println!("For MVP, document the accuracy gap on legal text");
        println!();
    }

    banner("VERDICT");
    if primary.production_ready() {
        println!("{} {} is PRODUCTION READY", ok_mark(), primary.name);
        println!("  - Handles Texas legal citations correctly");
        println!("  - Recommended for use in the ingestion pipeline");
    } else {
        println!("{} {} shows some issues", warn_mark(), primary.name);
        println!("  Recommended action:");
        println!("  1. Test with more legal text samples");
        println!("  2. If issues persist, use the fallback segmenter");
        println!("  3. Document the accuracy trade-off on citation-heavy text");
    }
    println!();
    println!("{}", "=".repeat(60));
    println!("{} Sentence tokenization comparison complete", ok_mark());
    println!("{}", "=".repeat(60));
}

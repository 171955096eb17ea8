//! Sentence-segmenter comparison harness.
//!
//! Compares `icu_segmenter` (primary) against `unicode-segmentation`
//! (fallback) on a fixed legal-text sample whose sentence boundaries are
//! known. Legal prose is the hard case here: citation abbreviations like
//! `Tex. R. Civ. P. 215.` end in periods that do not end sentences.

use icu_segmenter::SentenceSegmenter;
use unicode_segmentation::UnicodeSegmentation;

/// Texas legal text with citation-heavy abbreviation patterns.
pub const SAMPLE_LEGAL_TEXT: &str = "
Plaintiff moves the Court to compel discovery responses. See Tex. R. Civ. P. 215.
Defendant has failed to respond to Interrogatories Nos. 1-10 within the required 30-day
deadline. Fed. R. Civ. P. 33(b)(2) requires timely responses. The Court in Smith v. Jones,
123 S.W.3d 456, 459 (Tex. App.\u{2014}Dallas 2003, no pet.), held that untimely responses may
be deemed waived. Defendant's conduct violates Tex. R. Civ. P. 193.2(a).
";

/// The sample reads as six sentences when citations are handled correctly.
pub const EXPECTED_SENTENCES: usize = 6;

pub const CITATION_TEST: &str = "See Tex. R. Civ. P. 215. This is the next sentence.";
pub const EXPECTED_CITATION_SENTENCES: usize = 2;

/// Split with the primary segmenter; trimmed, empty pieces dropped.
pub fn segment_primary(text: &str) -> Vec<String> {
    let segmenter = SentenceSegmenter::new();
    let breakpoints: Vec<usize> = segmenter.segment_str(text).collect();
    breakpoints
        .windows(2)
        .map(|w| text[w[0]..w[1]].trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split with the fallback segmenter (UAX #29 sentence boundaries).
pub fn segment_fallback(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug)]
/// One segmenter's results against the fixed checks.
pub struct SegmenterReport {
    pub name: &'static str,
    pub sentences: Vec<String>,
    pub citation_sentences: Vec<String>,
}

impl SegmenterReport {
    pub fn count_matches(&self) -> bool {
        self.sentences.len() == EXPECTED_SENTENCES
    }

    pub fn citations_ok(&self) -> bool {
        self.citation_sentences.len() == EXPECTED_CITATION_SENTENCES
    }

    /// Both the full-sample count and the citation split must hold.
    pub fn production_ready(&self) -> bool {
        self.count_matches() && self.citations_ok()
    }
}

pub fn run_primary() -> SegmenterReport {
    SegmenterReport {
        name: "icu_segmenter",
        sentences: segment_primary(SAMPLE_LEGAL_TEXT),
        citation_sentences: segment_primary(CITATION_TEST),
    }
}

pub fn run_fallback() -> SegmenterReport {
    SegmenterReport {
        name: "unicode-segmentation",
        sentences: segment_fallback(SAMPLE_LEGAL_TEXT),
        citation_sentences: segment_fallback(CITATION_TEST),
    }
}

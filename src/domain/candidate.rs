//! Candidate solution text and its structured split.

use crate::prompt::{DETAILED_SOLUTION_MARKER, SUMMARY_MARKER};

/// One solver output: the raw text plus the parts the loop needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Full response as returned by the solver
    pub raw: String,

    /// Self-assessment and method sketch (may be empty)
    pub summary: String,

    /// Detailed proof; `None` when the detailed-solution marker is missing
    pub body: Option<String>,
}

impl Candidate {
    /// Split a solver response on the detailed-solution heading.
    ///
    /// The body is everything after the first line mentioning the marker.
    /// The summary is what precedes it, minus the summary heading line.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();

        let Some((before, after)) = split_on_marker_line(&raw, DETAILED_SOLUTION_MARKER) else {
            return Self {
                summary: raw.trim().to_string(),
                body: None,
                raw,
            };
        };

        let summary = before
            .lines()
            .filter(|line| !is_heading_for(line, SUMMARY_MARKER))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();
        let body = after.trim();
        let body = (!body.is_empty()).then(|| body.to_string());

        Self { raw, summary, body }
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

fn split_on_marker_line<'a>(text: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.contains(marker) {
            return Some((&text[..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

// A heading is the marker wrapped in markdown hashes or stars; a bare word is content
fn is_heading_for(line: &str, marker: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.starts_with(['#', '*']) {
        return false;
    }
    let stripped = trimmed.trim_matches(|c: char| c == '#' || c == '*' || c.is_whitespace());
    stripped.eq_ignore_ascii_case(marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "### Summary ###\n\
        a. Verdict: complete solution, the answer is 2.\n\
        b. Method Sketch: induction.\n\
        \n\
        ### Detailed Solution ###\n\
        \n\
        Step 1. Base case holds.\n\
        Step 2. Inductive step.\n";

    #[test]
    fn test_parse_well_formed() {
        let candidate = Candidate::parse(WELL_FORMED);
        assert_eq!(
            candidate.summary,
            "a. Verdict: complete solution, the answer is 2.\nb. Method Sketch: induction."
        );
        assert_eq!(candidate.body(), Some("Step 1. Base case holds.\nStep 2. Inductive step."));
        assert_eq!(candidate.raw, WELL_FORMED);
    }

    #[test]
    fn test_parse_bold_heading() {
        let candidate = Candidate::parse("**Summary**\nshort\n**### Detailed Solution ###**\nproof");
        assert_eq!(candidate.summary, "short");
        assert_eq!(candidate.body(), Some("proof"));
    }

    #[test]
    fn test_parse_missing_marker() {
        let candidate = Candidate::parse("Here is my proof without any headings.");
        assert!(!candidate.has_body());
        assert_eq!(candidate.summary, "Here is my proof without any headings.");
    }

    #[test]
    fn test_parse_empty_body_is_missing() {
        let candidate = Candidate::parse("### Summary ###\nx\n### Detailed Solution ###\n   \n");
        assert!(candidate.body().is_none());
    }

    #[test]
    fn test_marker_on_last_line_without_newline() {
        let candidate = Candidate::parse("summary\n### Detailed Solution ###");
        assert!(candidate.body().is_none());
        assert_eq!(candidate.summary, "summary");
    }

    #[test]
    fn test_undecorated_summary_word_is_content() {
        let candidate = Candidate::parse("## Summary\nSummary\n### Detailed Solution ###\nproof");
        assert_eq!(candidate.summary, "Summary");
        assert_eq!(candidate.body(), Some("proof"));
    }

    #[test]
    fn test_first_marker_wins() {
        let candidate =
            Candidate::parse("### Detailed Solution ###\nSee the Detailed Solution below.\nDone.");
        assert_eq!(candidate.body(), Some("See the Detailed Solution below.\nDone."));
        assert!(candidate.summary.is_empty());
    }
}

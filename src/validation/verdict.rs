//! Verdict extraction from a free-form yes/no answer.
//!
//! The grader is asked for "yes" or "no" but rarely answers with exactly
//! one word. Extraction runs a fixed cascade, first match wins:
//!
//! 1. exact `yes` / `no`
//! 2. answer starts or ends with the word `yes` / `no`
//! 3. tally of positive vs negative keywords, strict majority wins
//! 4. `yes` appears as a word and `no` does not (or vice versa)
//! 5. otherwise invalid
//!
//! Extraction never fails. Ambiguity resolves to [`Verdict::Invalid`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Binary outcome of one verification pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => f.write_str("valid"),
            Verdict::Invalid => f.write_str("invalid"),
        }
    }
}

/// Which cascade step produced the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictRule {
    Exact,
    Boundary,
    KeywordTally,
    Containment,
    Default,
}

// Longer phrases are listed first so "solution is correct" counts once.
static POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:no (?:errors?|bugs?|issues?|problems?|flaws?|gaps?|mistakes?)|proof is (?:sound|complete|correct)|solution is (?:right|correct|valid)|correct|valid|accurate)\b",
    )
    .unwrap()
});

static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:incorrect|invalid|errors?|bugs?|flaws?|mistakes?|wrong|fail(?:s|ed|ure)?|gaps?|missing|unjustified)\b",
    )
    .unwrap()
});

static YES_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\byes\b").unwrap());
static NO_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bno\b").unwrap());

/// Reduce a grader's answer to a verdict.
pub fn extract_verdict(response: &str) -> Verdict {
    extract_verdict_with_rule(response).0
}

/// Same as [`extract_verdict`], also reporting which rule fired.
pub fn extract_verdict_with_rule(response: &str) -> (Verdict, VerdictRule) {
    let text = response.trim().to_lowercase();

    if text == "yes" {
        return (Verdict::Valid, VerdictRule::Exact);
    }
    if text == "no" {
        return (Verdict::Invalid, VerdictRule::Exact);
    }

    let edges = text.trim_matches(|c: char| !c.is_alphanumeric());
    if starts_with_word(edges, "yes") || ends_with_word(edges, "yes") {
        return (Verdict::Valid, VerdictRule::Boundary);
    }
    if starts_with_word(edges, "no") || ends_with_word(edges, "no") {
        return (Verdict::Invalid, VerdictRule::Boundary);
    }

    let (positive, negative) = keyword_tally(&text);
    if positive > negative {
        return (Verdict::Valid, VerdictRule::KeywordTally);
    }
    if negative > positive {
        return (Verdict::Invalid, VerdictRule::KeywordTally);
    }

    let has_yes = YES_WORD.is_match(&text);
    let has_no = NO_WORD.is_match(&text);
    match (has_yes, has_no) {
        (true, false) => (Verdict::Valid, VerdictRule::Containment),
        (false, true) => (Verdict::Invalid, VerdictRule::Containment),
        _ => (Verdict::Invalid, VerdictRule::Default),
    }
}

/// Count positive and negative signal occurrences in lowercased text.
///
/// Negative keywords are counted only outside positive matches, so
/// "no errors" is one positive hit rather than a positive and a negative.
pub fn keyword_tally(text: &str) -> (usize, usize) {
    let positive = POSITIVE.find_iter(text).count();
    let remainder = POSITIVE.replace_all(text, " ");
    let negative = NEGATIVE.find_iter(&remainder).count();
    (positive, negative)
}

fn starts_with_word(text: &str, word: &str) -> bool {
    text.strip_prefix(word)
        .is_some_and(|rest| rest.chars().next().is_none_or(|c| !c.is_alphanumeric()))
}

fn ends_with_word(text: &str, word: &str) -> bool {
    text.strip_suffix(word)
        .is_some_and(|rest| rest.chars().next_back().is_none_or(|c| !c.is_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(extract_verdict_with_rule("yes"), (Verdict::Valid, VerdictRule::Exact));
        assert_eq!(extract_verdict_with_rule("  No \n"), (Verdict::Invalid, VerdictRule::Exact));
        assert_eq!(extract_verdict_with_rule("Yes"), (Verdict::Valid, VerdictRule::Exact));
    }

    #[test]
    fn test_boundary_match() {
        assert_eq!(
            extract_verdict_with_rule("Yes, the solution is correct."),
            (Verdict::Valid, VerdictRule::Boundary)
        );
        assert_eq!(
            extract_verdict_with_rule("No, there are errors in the proof."),
            (Verdict::Invalid, VerdictRule::Boundary)
        );
        assert_eq!(
            extract_verdict_with_rule("After careful reading, my answer is: yes."),
            (Verdict::Valid, VerdictRule::Boundary)
        );
        assert_eq!(
            extract_verdict_with_rule("**No**"),
            (Verdict::Invalid, VerdictRule::Boundary)
        );
    }

    #[test]
    fn test_boundary_yes_wins_over_no_edge() {
        // Starts with "no", ends with "yes": yes is checked first
        assert_eq!(extract_verdict("No critical errors remain, so yes"), Verdict::Valid);
    }

    #[test]
    fn test_boundary_requires_whole_word() {
        // "Nothing" and "yesterday" are not answers
        let (_, rule) = extract_verdict_with_rule("Nothing is wrong here");
        assert_ne!(rule, VerdictRule::Boundary);
        let (_, rule) = extract_verdict_with_rule("yesterday's proof was valid");
        assert_ne!(rule, VerdictRule::Boundary);
    }

    #[test]
    fn test_keyword_analysis_positive() {
        assert_eq!(
            extract_verdict_with_rule("The solution is correct and valid. No errors found."),
            (Verdict::Valid, VerdictRule::KeywordTally)
        );
    }

    #[test]
    fn test_keyword_analysis_negative() {
        assert_eq!(
            extract_verdict_with_rule("The solution contains an error and has a gap in the reasoning."),
            (Verdict::Invalid, VerdictRule::KeywordTally)
        );
    }

    #[test]
    fn test_keyword_tally_counts_occurrences() {
        assert_eq!(keyword_tally("an error, another error, and a gap"), (0, 3));
        assert_eq!(keyword_tally("no errors and no gaps"), (2, 0));
        assert_eq!(keyword_tally("incorrect, not correct"), (1, 1));
        assert_eq!(keyword_tally("the solution is correct"), (1, 0));
    }

    #[test]
    fn test_keyword_tie_falls_through_to_containment() {
        // one positive ("correct"), one negative ("gap"), then a bare "yes"
        assert_eq!(
            extract_verdict_with_rule("I'd say yes: correct overall despite a gap here."),
            (Verdict::Valid, VerdictRule::Containment)
        );
        assert_eq!(
            extract_verdict_with_rule("The grader says no: correct steps but one gap remains."),
            (Verdict::Invalid, VerdictRule::Containment)
        );
    }

    #[test]
    fn test_final_verdict_line_has_no_special_rule() {
        // the findings outweigh the leading yes
        assert_eq!(
            extract_verdict_with_rule("Final verdict: yes\nThe solution has one flaw and one gap."),
            (Verdict::Invalid, VerdictRule::KeywordTally)
        );
    }

    #[test]
    fn test_default_invalid_when_nothing_matches() {
        assert_eq!(extract_verdict_with_rule(""), (Verdict::Invalid, VerdictRule::Default));
        assert_eq!(
            extract_verdict_with_rule("I cannot determine this."),
            (Verdict::Invalid, VerdictRule::Default)
        );
    }

    #[test]
    fn test_default_invalid_when_both_yes_and_no() {
        assert_eq!(
            extract_verdict_with_rule("Perhaps yes, perhaps no, hard to say."),
            (Verdict::Invalid, VerdictRule::Default)
        );
    }

    #[test]
    fn test_totality_on_odd_inputs() {
        for input in ["", "   ", "\n\n", "???", "yes no", "no yes", "ñ", "YES!!!", "n o"] {
            let verdict = extract_verdict(input);
            assert!(matches!(verdict, Verdict::Valid | Verdict::Invalid));
        }
    }

    #[test]
    fn test_verdict_display_and_serde() {
        assert_eq!(Verdict::Valid.to_string(), "valid");
        assert_eq!(serde_json::to_string(&Verdict::Invalid).unwrap(), "\"invalid\"");
        assert!(Verdict::Valid.is_valid());
        assert!(!Verdict::Invalid.is_valid());
    }
}

//! Token classifier: the lexical stage.
//!
//! Partitions comment/literal-stripped text into maximal runs (numbers,
//! identifier-shaped words, operator/punctuation) and tallies them by
//! category. Keywords and identifiers are deduplicated by exact text within
//! one run; numbers and symbols count per occurrence. A second, independent
//! sweep catches malformed tokens: digit runs glued to letter runs, and
//! literals the stripper left unterminated.
//!
//! The stage never fails: malformed input lands in the Error bucket.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::report::{LexicalSummary, TokenCategory, TokenTally};
use super::strip::StrippedSource;
use crate::profiles::Profile;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]+(\.[0-9]+)?\b").expect("INVARIANT: static pattern must compile"));
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").expect("INVARIANT: static pattern must compile"));
static SYMBOL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\+\-\*/=<>!&|%^~(){}\[\];,.:?]|<<|>>|<=|>=|==|!=|&&|\|\||\+\+|--|\+=|-=|\*=|/=|%=")
        .expect("INVARIANT: static pattern must compile")
});
static DIGITS_THEN_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+[A-Za-z]+").expect("INVARIANT: static pattern must compile"));

/// Tally the stripped source by token category.
#[tracing::instrument(skip_all, fields(text_len = stripped.text.len()))]
pub fn classify(stripped: &StrippedSource, profile: &Profile) -> LexicalSummary {
    let text = stripped.text.as_str();
    let mut tally = TokenTally::default();

    // Literals counted out by the stripper contribute to the Symbol bucket.
    tally.add(TokenCategory::Symbol, stripped.literals);

    tally.add(TokenCategory::Number, NUMBER.find_iter(text).count());
    tally.add(TokenCategory::Symbol, SYMBOL.find_iter(text).count());

    let mut seen_keywords: HashSet<&str> = HashSet::new();
    let mut seen_identifiers: HashSet<&str> = HashSet::new();
    for word in WORD.find_iter(text) {
        let word = word.as_str();
        if profile.matches_keyword(word) {
            if seen_keywords.insert(word) {
                tally.bump(TokenCategory::Keyword);
            }
        } else if seen_identifiers.insert(word) {
            tally.bump(TokenCategory::Identifier);
        }
    }

    // Independent error sweep.
    tally.add(TokenCategory::Error, DIGITS_THEN_LETTERS.find_iter(text).count());
    tally.add(TokenCategory::Error, stripped.unterminated);

    LexicalSummary::from(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::strip;
    use crate::profiles::{c_family, python_family};

    fn run(source: &str, profile: &Profile) -> LexicalSummary {
        classify(&strip::strip(source, profile), profile)
    }

    #[test]
    fn keywords_and_identifiers_deduplicate_by_text() {
        let result = run("int a; int b; int a;", c_family());
        // `int` once; `a` and `b` once each.
        assert_eq!(result.summary.keywords, 1);
        assert_eq!(result.summary.identifiers, 2);
        assert_eq!(result.summary.numbers, 0);
    }

    #[test]
    fn numbers_and_symbols_count_per_occurrence() {
        let result = run("a = 1 + 1;\nb = 2.5;", c_family());
        assert_eq!(result.summary.numbers, 3);
        // `=`, `+`, `;`, `=`, `.`, `;` — the symbol sweep is independent of
        // the number sweep, so the decimal point counts too.
        assert_eq!(result.summary.symbols, 6);
    }

    #[test]
    fn string_literals_count_as_symbols() {
        let result = run("string s = \"hi\";", c_family());
        // literal + `=` + `;`, plus the placeholder's two quote marks are
        // not symbol-alphabet characters.
        assert_eq!(result.summary.symbols, 3);
        assert_eq!(result.summary.errors, 0);
    }

    #[test]
    fn keyword_case_fallback_is_profile_defined() {
        let c = run("INT x;", c_family());
        assert_eq!(c.summary.keywords, 1);
        assert_eq!(c.summary.identifiers, 1);

        let py = run("WHILE = 1", python_family());
        // Not a Python keyword under exact-case matching.
        assert_eq!(py.summary.keywords, 0);
        assert_eq!(py.summary.identifiers, 1);
    }

    #[test]
    fn malformed_tokens_land_in_the_error_bucket() {
        let result = run("int 123abc = 5;\nstring s = \"open;", c_family());
        // digit-letter glue plus the unterminated string.
        assert_eq!(result.summary.errors, 2);
    }

    #[test]
    fn total_is_the_sum_of_buckets() {
        let result = run("int main() {\n    return 0;\n}", c_family());
        assert_eq!(result.total, result.summary.total());
        assert!(result.total > 0);
    }
}

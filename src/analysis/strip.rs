//! Comment and literal stripping shared by the pipeline.
//!
//! Downstream passes must not see raw literal bodies (a keyword inside a
//! string is not a keyword), so comments are removed and every terminated
//! string/char literal body is replaced with an empty placeholder of the
//! same kind. Replacements never introduce or remove newlines: block
//! comments are replaced by the newlines they contained, so line numbering
//! stays accurate for every later stage.
//!
//! An unterminated literal (no closing quote before end of line) is left in
//! place and reported via [`StrippedSource::unterminated`]; the token
//! classifier surfaces it as a lexical error.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::profiles::Profile;

static STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"\n]*""#).expect("INVARIANT: static pattern must compile"));
static CHAR_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'[^'\n]*'").expect("INVARIANT: static pattern must compile"));

/// Source text with comments removed and literal bodies blanked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedSource {
    pub text: String,
    /// Number of string/char literals that were blanked. Reported as part
    /// of the Symbol category by the token classifier.
    pub literals: usize,
    /// Number of quotes left unmatched after stripping.
    pub unterminated: usize,
}

/// Strip comments and literals from `source` per the profile's comment
/// syntax. Line count and line boundaries are preserved.
pub fn strip(source: &str, profile: &Profile) -> StrippedSource {
    let text = remove_comments(source, profile);

    let literals = STRING_LITERAL.find_iter(&text).count() + CHAR_LITERAL.find_iter(&text).count();
    let stripped = STRING_LITERAL.replace_all(&text, "\"\"");
    let stripped = CHAR_LITERAL.replace_all(&stripped, "''");

    // Quotes surviving outside the blanked placeholders have no closing
    // partner on their line.
    let residue = STRING_LITERAL.replace_all(&text, "");
    let residue = CHAR_LITERAL.replace_all(&residue, "");
    let unterminated = residue.chars().filter(|c| *c == '"' || *c == '\'').count();

    StrippedSource {
        text: stripped.into_owned(),
        literals,
        unterminated,
    }
}

fn remove_comments(source: &str, profile: &Profile) -> String {
    let text = match profile.comment.block_pattern() {
        Some(block) => block.replace_all(source, |caps: &regex::Captures<'_>| {
            "\n".repeat(caps[0].matches('\n').count())
        }),
        None => Cow::Borrowed(source),
    };
    profile.comment.line_pattern().replace_all(&text, "").into_owned()
}

/// Blank string-literal bodies in a single line, for passes that inspect
/// identifiers but must ignore quoted text.
pub(crate) fn blank_string_literals(line: &str) -> Cow<'_, str> {
    STRING_LITERAL.replace_all(line, "\"\"")
}

//! Language profiles for the analysis pipeline.
//!
//! A [`Profile`] bundles everything dialect-specific the three stages need:
//! keyword and builtin vocabulary, comment syntax, the statement-terminator
//! rule, and the pattern set for each recognized construct (directives,
//! entry point, declarations, control headers, functions).
//!
//! Profiles are immutable. Each one is built once behind a `LazyLock` and
//! handed out as a `&'static` reference, so concurrent analyses share them
//! without coordination.
//!
//! ## Notes
//!
//! - Lookup via [`get`] accepts canonical names and aliases,
//!   ASCII case-insensitive.
//! - The parsing strategy is deliberately a pattern set per construct, not a
//!   grammar: the accepted shapes below *are* the contract.

mod c_family;
mod python_family;

use regex::Regex;
use thiserror::Error;

pub use c_family::c_family;
pub use python_family::python_family;

/// Errors raised at the request boundary, before any stage runs.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("unknown profile '{0}' (known profiles: c-family, python-family)")]
    Unknown(String),
}

/// How keyword lookup treats letter case during lexical classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordCase {
    /// Exact match, then retry with the word lowercased.
    WithLowercaseFallback,
    /// Exact match only.
    Sensitive,
}

/// Comment syntax of a dialect, with the strip patterns precompiled.
#[derive(Debug)]
pub struct CommentSyntax {
    pub line: &'static str,
    line_re: Regex,
    block_re: Option<Regex>,
}

impl CommentSyntax {
    fn new(line: &'static str, block: Option<(&str, &str)>) -> Self {
        Self {
            line,
            line_re: re(&format!("{}.*", regex::escape(line))),
            block_re: block.map(|(open, close)| re(&format!("(?s){}.*?{}", regex::escape(open), regex::escape(close)))),
        }
    }

    pub fn line_pattern(&self) -> &Regex {
        &self.line_re
    }

    pub fn block_pattern(&self) -> Option<&Regex> {
        self.block_re.as_ref()
    }
}

/// A preprocessor/import-style directive and its accepted shapes.
#[derive(Debug)]
pub struct DirectiveRule {
    /// Line prefix that selects this rule.
    pub prefix: &'static str,
    pub shapes: Vec<Regex>,
    /// Finding text (without the line prefix).
    pub finding: &'static str,
}

/// The dialect's designated entry-point declaration.
#[derive(Debug)]
pub struct EntryPointRule {
    /// Name of the entry-point function, exempt from unused-variable checks.
    pub name: &'static str,
    /// Substring that marks a line as an entry-point declaration attempt.
    pub detect: &'static str,
    pub shapes: Vec<Regex>,
    pub malformed_finding: &'static str,
    pub missing_finding: &'static str,
}

/// Variable-declaration shapes validated by the syntax stage.
#[derive(Debug)]
pub struct DeclarationShapes {
    pub detect: Regex,
    pub shapes: Vec<Regex>,
    pub finding: &'static str,
}

/// Control-structure headers and their accepted shapes.
#[derive(Debug)]
pub struct ControlRule {
    pub detect: Regex,
    pub shapes: Vec<Regex>,
    pub finding: &'static str,
}

/// Statement-termination convention of a dialect.
#[derive(Debug)]
pub enum TerminatorRule {
    /// Statements require a trailing `;` unless exempt.
    Semicolon {
        exempt_prefixes: &'static [&'static str],
        exempt_suffixes: &'static [&'static str],
        exempt_contains: Regex,
        /// Matches lines that carry a statement (assignment, I/O call,
        /// return, increment/decrement).
        triggers: Regex,
        finding: &'static str,
    },
    /// Block-opening headers require a trailing `:`.
    BlockColon { header: Regex, finding: &'static str },
}

/// How the dialect declares variables, for the semantic stage.
#[derive(Debug)]
pub enum DeclarationGrammar {
    /// A primitive-type keyword followed by a comma-separated name list,
    /// each name optionally initialized (`int a = 1, b;`).
    Typed {
        detect: Regex,
        /// Captures: `ty` (the type keyword), `rest` (the name list).
        parse: Regex,
    },
    /// First assignment to a new identifier declares it; the declared type
    /// is inferred from the right-hand side.
    Inferred,
}

/// Function-declaration detection and parsing.
///
/// `parse` uses the named groups `name`, `params` and optionally `ret`;
/// a line that matches `detect` but not `parse` is counted but not
/// registered.
#[derive(Debug)]
pub struct FunctionRule {
    pub detect: Regex,
    pub parse: Regex,
}

/// Immutable bundle of rules defining one supported source-language dialect.
#[derive(Debug)]
pub struct Profile {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub builtins: &'static [&'static str],
    pub bool_literals: &'static [&'static str],
    pub keyword_case: KeywordCase,
    pub comment: CommentSyntax,
    pub directives: Vec<DirectiveRule>,
    pub entry_point: Option<EntryPointRule>,
    pub declaration_shapes: Option<DeclarationShapes>,
    pub control: ControlRule,
    pub terminator: TerminatorRule,
    /// Lines matching this pattern are exempt from the per-line
    /// parenthesis-balance heuristic.
    pub paren_exempt: Regex,
    pub declaration_grammar: DeclarationGrammar,
    pub functions: FunctionRule,
    /// Line prefixes the semantic stage skips entirely.
    pub semantic_skip_prefixes: &'static [&'static str],
}

impl Profile {
    /// Exact keyword/builtin membership, as the semantic stage uses it.
    pub fn is_reserved(&self, word: &str) -> bool {
        let hit = |table: &[&str]| table.iter().any(|w| *w == word);
        hit(self.keywords) || hit(self.builtins)
    }

    /// Keyword/builtin membership with the profile's case rule applied, as
    /// the lexical stage uses it.
    pub fn matches_keyword(&self, word: &str) -> bool {
        match self.keyword_case {
            KeywordCase::Sensitive => self.is_reserved(word),
            KeywordCase::WithLowercaseFallback => {
                self.is_reserved(word) || self.is_reserved(&word.to_ascii_lowercase())
            }
        }
    }

    /// Whether `value` is one of the profile's boolean literal spellings.
    pub fn is_bool_literal(&self, value: &str) -> bool {
        self.bool_literals.iter().any(|b| *b == value)
    }

    /// The entry-point function name, if the dialect designates one.
    pub fn entry_point_name(&self) -> Option<&'static str> {
        self.entry_point.as_ref().map(|e| e.name)
    }
}

/// Compile a static pattern.
pub(crate) fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("INVARIANT: static profile pattern must compile")
}

fn all() -> [&'static Profile; 2] {
    [c_family(), python_family()]
}

/// Resolve a profile by name or alias; `None` selects the default profile.
pub fn get(name: Option<&str>) -> Result<&'static Profile, ProfileError> {
    let Some(requested) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(default_profile());
    };
    all()
        .into_iter()
        .find(|p| {
            p.name.eq_ignore_ascii_case(requested) || p.aliases.iter().any(|a| a.eq_ignore_ascii_case(requested))
        })
        .ok_or_else(|| ProfileError::Unknown(requested.to_string()))
}

/// The profile used when a request does not specify one.
pub fn default_profile() -> &'static Profile {
    c_family()
}

/// Canonical names of the registered profiles.
pub fn names() -> impl Iterator<Item = &'static str> {
    all().into_iter().map(|p| p.name)
}

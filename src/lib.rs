#![forbid(unsafe_code)]
//! codescope — lexical, syntactic and semantic analysis of source text.
//!
//! codescope takes a block of source text and produces a structured report:
//! a token tally by category, a structural validity verdict with
//! line-addressed findings, and a symbol-tracking result (declared vs. used
//! variables, type compatibility of assignments). Analysis is parameterized
//! by a language [`profiles::Profile`] — a C-family and a Python-family
//! dialect ship built in — and is deliberately pattern-oriented: a fixed
//! set of accepted shapes per construct, not a grammar.
//!
//! ## Panic Policy
//!
//! Analysis never panics on input: malformed source text becomes findings
//! and error-category token counts, not failures. `unwrap()`/`expect()` are
//! reserved for tests and for true invariants (static patterns that must
//! compile), and the `cli` module enforces this with
//! `#![deny(clippy::unwrap_used)]`.

pub mod analysis;
pub mod cli;
pub mod profiles;

pub use analysis::{AnalysisReport, LexicalSummary, SemanticReport, SyntaxReport, analyze, analyze_request};
pub use profiles::{Profile, ProfileError};

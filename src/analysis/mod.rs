//! The three-stage analysis pipeline.
//!
//! One invocation strips comments/literals, then runs the token classifier,
//! the structure validator and the symbol tracker over the same input and
//! assembles a single [`AnalysisReport`]. The stages share nothing beyond
//! the input text and the profile: the syntax and semantic stages operate
//! independently, so a syntax error never suppresses semantic findings.
//!
//! Every invocation is a pure, synchronous computation over its own freshly
//! constructed state. Profiles are immutable, so any number of invocations
//! may run in parallel without coordination.

pub mod lexical;
pub mod report;
pub mod semantic;
pub mod strip;
pub mod syntax;

pub use report::{AnalysisReport, LexicalSummary, SemanticReport, SyntaxReport, TokenCategory, TokenTally};

use crate::profiles::{self, Profile, ProfileError};

/// Run the full pipeline for one input/profile pair.
///
/// Findings in the analyzed text are the product, not failures: this always
/// completes and returns a report, however malformed the input.
#[tracing::instrument(skip_all, fields(profile = profile.name, source_len = source.len()))]
pub fn analyze(source: &str, profile: &Profile) -> AnalysisReport {
    let stripped = strip::strip(source, profile);
    AnalysisReport {
        lexical_analysis: lexical::classify(&stripped, profile),
        syntax_analysis: syntax::validate(source, profile),
        semantic_analysis: semantic::track(source, profile),
    }
}

/// Request-boundary entry point: resolve the profile by name, then analyze.
///
/// An unrecognized profile name fails before any stage runs; `None` selects
/// the default profile.
pub fn analyze_request(source: &str, profile_name: Option<&str>) -> Result<AnalysisReport, ProfileError> {
    let profile = profiles::get(profile_name)?;
    Ok(analyze(source, profile))
}

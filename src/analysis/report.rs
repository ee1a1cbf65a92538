//! Report data model for one analysis run.
//!
//! The serialized shape is the boundary contract consumed by transport
//! layers: a record with `lexical_analysis`, `syntax_analysis` and
//! `semantic_analysis` fields. Reports round-trip through serde so callers
//! can persist or forward them unchanged.

use serde::{Deserialize, Serialize};

/// Category bucket for one lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Keyword,
    Identifier,
    Number,
    Symbol,
    Error,
}

impl TokenCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenCategory::Keyword => "keywords",
            TokenCategory::Identifier => "identifiers",
            TokenCategory::Number => "numbers",
            TokenCategory::Symbol => "symbols",
            TokenCategory::Error => "errors",
        }
    }
}

/// Per-category token counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTally {
    pub keywords: usize,
    pub identifiers: usize,
    pub numbers: usize,
    pub symbols: usize,
    pub errors: usize,
}

impl TokenTally {
    /// Add `count` occurrences to one category bucket.
    pub fn add(&mut self, category: TokenCategory, count: usize) {
        match category {
            TokenCategory::Keyword => self.keywords += count,
            TokenCategory::Identifier => self.identifiers += count,
            TokenCategory::Number => self.numbers += count,
            TokenCategory::Symbol => self.symbols += count,
            TokenCategory::Error => self.errors += count,
        }
    }

    pub fn bump(&mut self, category: TokenCategory) {
        self.add(category, 1);
    }

    /// Sum over all category buckets.
    pub fn total(&self) -> usize {
        self.keywords + self.identifiers + self.numbers + self.symbols + self.errors
    }
}

/// Result of the lexical stage: the tally plus its total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalSummary {
    pub summary: TokenTally,
    pub total: usize,
}

impl From<TokenTally> for LexicalSummary {
    fn from(summary: TokenTally) -> Self {
        Self {
            total: summary.total(),
            summary,
        }
    }
}

/// Result of the syntax stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl SyntaxReport {
    /// Build from an ordered finding list; validity means no findings.
    pub fn from_findings(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Result of the semantic stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticReport {
    pub variables_count: usize,
    pub functions_count: usize,
    pub errors: Vec<String>,
}

/// Aggregate report for one analysis run.
///
/// The syntax and semantic sections are derived independently from the same
/// input; neither suppresses or mutates the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub lexical_analysis: LexicalSummary,
    pub syntax_analysis: SyntaxReport,
    pub semantic_analysis: SemanticReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_total_is_sum_of_buckets() {
        let mut tally = TokenTally::default();
        tally.add(TokenCategory::Keyword, 3);
        tally.add(TokenCategory::Number, 2);
        tally.bump(TokenCategory::Error);
        assert_eq!(tally.total(), 6);

        let summary = LexicalSummary::from(tally);
        assert_eq!(summary.total, summary.summary.total());
    }

    #[test]
    fn syntax_validity_tracks_findings() {
        assert!(SyntaxReport::from_findings(vec![]).is_valid);
        assert!(!SyntaxReport::from_findings(vec!["line 1: missing semicolon".into()]).is_valid);
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = AnalysisReport {
            lexical_analysis: LexicalSummary::from(TokenTally::default()),
            syntax_analysis: SyntaxReport::from_findings(vec!["no entry-point function found".into()]),
            semantic_analysis: SemanticReport {
                variables_count: 2,
                functions_count: 1,
                errors: vec![],
            },
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"lexical_analysis\""));
        assert!(json.contains("\"variables_count\":2"));
        let back: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}

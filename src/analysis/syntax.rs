//! Structure validator: the syntax stage.
//!
//! Line-oriented shape checking against the profile's pattern sets:
//! directives, the entry-point declaration, variable declarations, control
//! headers and the statement-terminator rule, plus running delimiter
//! balance counters for `{}`, `()` and `[]`. The stage works on raw source
//! text; delimiters inside string literals count as written.
//!
//! Findings are ordered by line, then by check order within the line, with
//! whole-source findings (delimiter balance, missing entry point) last.

use super::report::SyntaxReport;
use crate::profiles::{Profile, TerminatorRule};

/// Validate the structural well-formedness of `source`.
#[tracing::instrument(skip_all, fields(profile = profile.name, source_len = source.len()))]
pub fn validate(source: &str, profile: &Profile) -> SyntaxReport {
    let mut findings: Vec<String> = Vec::new();
    let mut braces: isize = 0;
    let mut parens: isize = 0;
    let mut brackets: isize = 0;
    let mut entry_seen = false;

    for (idx, raw_line) in source.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(profile.comment.line) {
            continue;
        }
        let line_no = idx + 1;

        for rule in &profile.directives {
            if line.starts_with(rule.prefix) && !rule.shapes.iter().any(|s| s.is_match(line)) {
                findings.push(format!("line {line_no}: {}", rule.finding));
            }
        }

        if let Some(entry) = &profile.entry_point {
            if line.contains(entry.detect) {
                entry_seen = true;
                if !entry.shapes.iter().any(|s| s.is_match(line)) {
                    findings.push(format!("line {line_no}: {}", entry.malformed_finding));
                }
            }
        }

        // A line that declares a function is not a variable declaration,
        // even though it starts with a type keyword.
        if let Some(decl) = &profile.declaration_shapes {
            if decl.detect.is_match(line)
                && !profile.functions.detect.is_match(line)
                && !decl.shapes.iter().any(|s| s.is_match(line))
            {
                findings.push(format!("line {line_no}: {}", decl.finding));
            }
        }

        if profile.control.detect.is_match(line) && !profile.control.shapes.iter().any(|s| s.is_match(line)) {
            findings.push(format!("line {line_no}: {}", profile.control.finding));
        }

        check_terminator(line, line_no, profile, &mut findings);

        let open = line.matches('(').count();
        let close = line.matches(')').count();
        braces += line.matches('{').count() as isize - line.matches('}').count() as isize;
        parens += open as isize - close as isize;
        brackets += line.matches('[').count() as isize - line.matches(']').count() as isize;

        if open != close && !profile.paren_exempt.is_match(line) {
            findings.push(format!("line {line_no}: unbalanced parentheses"));
        }
    }

    if braces != 0 {
        findings.push("unbalanced braces in source".to_string());
    }
    if parens != 0 {
        findings.push("unbalanced parentheses in source".to_string());
    }
    if brackets != 0 {
        findings.push("unbalanced brackets in source".to_string());
    }
    if let Some(entry) = &profile.entry_point {
        if !entry_seen {
            findings.push(entry.missing_finding.to_string());
        }
    }

    SyntaxReport::from_findings(findings)
}

fn check_terminator(line: &str, line_no: usize, profile: &Profile, findings: &mut Vec<String>) {
    match &profile.terminator {
        TerminatorRule::Semicolon {
            exempt_prefixes,
            exempt_suffixes,
            exempt_contains,
            triggers,
            finding,
        } => {
            let exempt = exempt_prefixes.iter().any(|p| line.starts_with(p))
                || exempt_suffixes.iter().any(|s| line.ends_with(s))
                || exempt_contains.is_match(line);
            if exempt {
                return;
            }
            let is_statement = triggers.is_match(line)
                || profile
                    .declaration_shapes
                    .as_ref()
                    .is_some_and(|d| d.detect.is_match(line));
            if is_statement && !line.ends_with(';') {
                findings.push(format!("line {line_no}: {finding}"));
            }
        }
        TerminatorRule::BlockColon { header, finding } => {
            if header.is_match(line) && !line.ends_with(':') {
                findings.push(format!("line {line_no}: {finding}"));
            }
        }
    }
}

//! Command implementations for the codescope CLI.
//!
//! Each command resolves the profile, reads the source, runs the requested
//! stage(s) and prints the result. Findings in the analyzed text never fail
//! the process: the exit code reflects only request-boundary problems
//! (unreadable input, unknown profile).

use std::fs;
use std::io::Read;
use std::path::Path;

use super::{CliError, CliResult, ExitCode};
use crate::analysis::{self, AnalysisReport};
use crate::profiles::{self, Profile};

/// Analyze a file with the full pipeline and print the report.
pub fn analyze_file(path: &Path, profile_name: Option<&str>, json: bool) -> CliResult<ExitCode> {
    let profile = resolve_profile(profile_name)?;
    let source = read_source(path)?;
    let report = analysis::analyze(&source, profile);

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::failure(format!("failed to serialize report: {e}")))?;
        println!("{rendered}");
    } else {
        print_report(&report, profile);
    }
    Ok(ExitCode::SUCCESS)
}

/// Run the lexical stage only and print the tally.
pub fn lex_file(path: &Path, profile_name: Option<&str>) -> CliResult<ExitCode> {
    let profile = resolve_profile(profile_name)?;
    let source = read_source(path)?;
    let stripped = analysis::strip::strip(&source, profile);
    let summary = analysis::lexical::classify(&stripped, profile);
    print_lexical(&summary);
    Ok(ExitCode::SUCCESS)
}

/// Run the syntax stage only and print its findings.
pub fn syntax_file(path: &Path, profile_name: Option<&str>) -> CliResult<ExitCode> {
    let profile = resolve_profile(profile_name)?;
    let source = read_source(path)?;
    let report = analysis::syntax::validate(&source, profile);
    println!("syntax: {}", if report.is_valid { "valid" } else { "invalid" });
    for finding in &report.errors {
        println!("  {finding}");
    }
    Ok(ExitCode::SUCCESS)
}

/// Run the semantic stage only and print its findings.
pub fn semantic_file(path: &Path, profile_name: Option<&str>) -> CliResult<ExitCode> {
    let profile = resolve_profile(profile_name)?;
    let source = read_source(path)?;
    let report = analysis::semantic::track(&source, profile);
    println!(
        "semantic: {} variable(s), {} function(s)",
        report.variables_count, report.functions_count
    );
    for finding in &report.errors {
        println!("  {finding}");
    }
    Ok(ExitCode::SUCCESS)
}

/// List the registered profile names.
pub fn list_profiles() -> CliResult<ExitCode> {
    for name in profiles::names() {
        println!("{name}");
    }
    Ok(ExitCode::SUCCESS)
}

fn resolve_profile(name: Option<&str>) -> CliResult<&'static Profile> {
    profiles::get(name).map_err(|e| CliError::usage(e.to_string()))
}

/// Read source text from a file, or from stdin when the path is `-`.
fn read_source(path: &Path) -> CliResult<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| CliError::failure(format!("failed to read stdin: {e}")))?;
        return Ok(source);
    }
    fs::read_to_string(path).map_err(|e| CliError::failure(format!("failed to read {}: {e}", path.display())))
}

fn print_report(report: &AnalysisReport, profile: &Profile) {
    println!("profile: {}", profile.name);
    println!();
    print_lexical(&report.lexical_analysis);
    println!();

    let syntax = &report.syntax_analysis;
    println!("syntax: {}", if syntax.is_valid { "valid" } else { "invalid" });
    for finding in &syntax.errors {
        println!("  {finding}");
    }
    println!();

    let semantic = &report.semantic_analysis;
    println!(
        "semantic: {} variable(s), {} function(s)",
        semantic.variables_count, semantic.functions_count
    );
    for finding in &semantic.errors {
        println!("  {finding}");
    }
}

fn print_lexical(summary: &analysis::LexicalSummary) {
    println!("lexical token tally:");
    println!("  keywords:    {}", summary.summary.keywords);
    println!("  identifiers: {}", summary.summary.identifiers);
    println!("  numbers:     {}", summary.summary.numbers);
    println!("  symbols:     {}", summary.summary.symbols);
    println!("  errors:      {}", summary.summary.errors);
    println!("  total:       {}", summary.total);
}

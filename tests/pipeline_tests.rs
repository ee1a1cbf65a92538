//! End-to-end tests for the analysis pipeline.
//!
//! Each test pins a full-report scenario: the golden expectations here are
//! part of the contract, including finding order.

use codescope::analysis::analyze;
use codescope::analyze_request;
use codescope::profiles::{self, c_family, python_family};

/// Helper to collect semantic findings for a snippet.
fn semantic_errors(source: &str, profile: &codescope::Profile) -> Vec<String> {
    analyze(source, profile).semantic_analysis.errors
}

#[test]
fn well_formed_c_program_yields_a_clean_report() {
    let source = "#include <iostream>\nusing namespace std;\nint main() {\n    int count = 3;\n    cout << count;\n    return 0;\n}";
    let report = analyze(source, c_family());

    assert!(report.syntax_analysis.is_valid, "findings: {:?}", report.syntax_analysis.errors);
    assert!(report.semantic_analysis.errors.is_empty(), "findings: {:?}", report.semantic_analysis.errors);
    assert_eq!(report.semantic_analysis.variables_count, 1);
    assert_eq!(report.semantic_analysis.functions_count, 1);
    assert_eq!(report.lexical_analysis.total, report.lexical_analysis.summary.total());
}

#[test]
fn type_incompatibility_is_reported_for_the_offending_name_only() {
    let errors = semantic_errors("int a = 5;\nfloat b = \"x\";", c_family());
    assert_eq!(
        errors,
        vec!["line 2: type error: variable 'b' of type float cannot be initialized with a string value".to_string()]
    );

    let report = analyze("int a = 5;\nfloat b = \"x\";", c_family());
    assert_eq!(report.semantic_analysis.variables_count, 2);
}

#[test]
fn missing_entry_point_invalidates_the_syntax_result() {
    let report = analyze("int a = 5;\nint b = 6;", c_family());
    assert!(!report.syntax_analysis.is_valid);
    assert!(
        report
            .syntax_analysis
            .errors
            .contains(&"no entry-point function found".to_string())
    );
}

#[test]
fn comma_declarations_count_each_name() {
    let report = analyze("int a, b, c;", c_family());
    assert_eq!(report.semantic_analysis.variables_count, 3);
    assert_eq!(
        report.semantic_analysis.errors,
        vec![
            "variable 'a' declared but not used".to_string(),
            "variable 'b' declared but not used".to_string(),
            "variable 'c' declared but not used".to_string(),
        ]
    );
}

#[test]
fn redeclaration_is_reported_once_and_still_counted() {
    let report = analyze("int a;\nint a;", c_family());
    assert_eq!(report.semantic_analysis.variables_count, 2);
    let redeclarations: Vec<_> = report
        .semantic_analysis
        .errors
        .iter()
        .filter(|e| e.contains("already declared"))
        .collect();
    assert_eq!(redeclarations, vec!["line 2: variable 'a' already declared"]);
}

#[test]
fn names_used_only_on_the_right_hand_side_are_reported_once_each() {
    let errors = semantic_errors("int main() {\n    x = b + c;\n}", c_family());
    let count_for = |name: &str| {
        errors
            .iter()
            .filter(|e| *e == &format!("variable '{name}' used but not declared"))
            .count()
    };
    assert_eq!(count_for("b"), 1);
    assert_eq!(count_for("c"), 1);
}

#[test]
fn python_assignments_declare_without_findings() {
    let report = analyze("x = 5\ny = x + 1", python_family());
    assert!(report.semantic_analysis.errors.is_empty(), "findings: {:?}", report.semantic_analysis.errors);
    assert_eq!(report.semantic_analysis.variables_count, 2);
    assert!(report.syntax_analysis.is_valid);
}

#[test]
fn python_block_headers_and_imports_are_validated() {
    let source = "import os\ndef main_loop():\n    x = 1\n    while x\n        x = x - 1";
    let report = analyze(source, python_family());
    assert!(!report.syntax_analysis.is_valid);
    assert!(
        report
            .syntax_analysis
            .errors
            .contains(&"line 4: missing ':' after block header".to_string())
    );
}

#[test]
fn syntax_and_semantic_results_are_independent() {
    // Unbalanced braces invalidate the syntax result; the symbol table is
    // unaffected.
    let source = "int main() {\n    int a = 1;\n    int b = 2;";
    let report = analyze(source, c_family());
    assert!(!report.syntax_analysis.is_valid);
    assert!(report.semantic_analysis.errors.is_empty(), "findings: {:?}", report.semantic_analysis.errors);
    assert_eq!(report.semantic_analysis.variables_count, 2);
}

#[test]
fn reports_are_byte_identical_across_runs() {
    let source = "int main() {\n    int a = 5\n    b = \"oops;\n}";
    let first = serde_json::to_string(&analyze(source, c_family())).unwrap();
    let second = serde_json::to_string(&analyze(source, c_family())).unwrap();
    assert_eq!(first, second);
}

#[test]
fn serialized_report_uses_the_boundary_field_names() {
    let report = analyze_request("int main() {\n}", None).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("lexical_analysis").is_some());
    assert!(json["lexical_analysis"].get("summary").is_some());
    assert!(json["lexical_analysis"].get("total").is_some());
    assert!(json["syntax_analysis"].get("is_valid").is_some());
    assert!(json["syntax_analysis"].get("errors").is_some());
    assert!(json["semantic_analysis"].get("variables_count").is_some());
    assert!(json["semantic_analysis"].get("functions_count").is_some());
}

#[test]
fn unknown_profile_fails_at_the_boundary() {
    let err = analyze_request("int main() {\n}", Some("brainfuck")).unwrap_err();
    assert!(err.to_string().contains("unknown profile 'brainfuck'"));
}

#[test]
fn profile_lookup_accepts_aliases() {
    assert_eq!(profiles::get(Some("py")).unwrap().name, "python-family");
    assert_eq!(profiles::get(Some("C++")).unwrap().name, "c-family");
    assert_eq!(profiles::get(None).unwrap().name, "c-family");
}

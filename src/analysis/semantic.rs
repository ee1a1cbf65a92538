//! Symbol tracker: the semantic stage.
//!
//! Builds a per-run table of declared variables and functions line by line
//! and reports redeclaration, type-incompatible initialization and
//! re-assignment, use of undeclared names, and declared-but-unused names.
//! The table lives only for the duration of one call.
//!
//! The stage is single-pass and line-oriented: a name is checked against
//! what has been declared *so far* for the line-addressed findings, and
//! against the full table for the end-of-run findings.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::report::SemanticReport;
use super::strip::blank_string_literals;
use crate::profiles::{DeclarationGrammar, Profile};

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").expect("INVARIANT: static pattern must compile"));
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("INVARIANT: static pattern must compile"));
static FLOAT_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+$").expect("INVARIANT: static pattern must compile"));

/// One variable declaration in the per-run table.
#[derive(Debug, Clone)]
struct DeclaredSymbol {
    name: String,
    /// Declared type tag (profile type name, or the inferred value type for
    /// dialects that declare by assignment).
    ty: String,
    initializer: String,
    line: usize,
    initialized: bool,
    used: bool,
}

/// One function declaration, kept to exclude its name from undeclared-use
/// findings.
#[derive(Debug, Clone)]
struct DeclaredFunction {
    name: String,
    return_type: String,
    parameters: Vec<String>,
    line: usize,
}

/// Type inferred for an initializer or assigned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueType {
    Int,
    Float,
    Char,
    Bool,
    Str,
    /// Anything that is not a recognized literal; compatible only with
    /// itself.
    Identifier,
}

impl ValueType {
    fn name(self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Char => "char",
            ValueType::Bool => "bool",
            ValueType::Str => "string",
            ValueType::Identifier => "identifier",
        }
    }
}

fn infer_value_type(value: &str, profile: &Profile) -> ValueType {
    let value = value.trim();
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return ValueType::Str;
    }
    if value.starts_with('\'') && value.ends_with('\'') && value.chars().count() == 3 {
        return ValueType::Char;
    }
    if profile.is_bool_literal(value) {
        return ValueType::Bool;
    }
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return ValueType::Int;
    }
    if FLOAT_LITERAL.is_match(value) {
        return ValueType::Float;
    }
    ValueType::Identifier
}

/// The fixed compatibility table. Intentionally narrow: the only widening
/// is int into float/double.
fn is_compatible(declared: &str, value: ValueType) -> bool {
    match declared {
        "int" => value == ValueType::Int,
        "float" | "double" => matches!(value, ValueType::Int | ValueType::Float),
        "char" => value == ValueType::Char,
        "bool" => value == ValueType::Bool,
        "string" => value == ValueType::Str,
        other => other == value.name(),
    }
}

fn is_assignment(line: &str) -> bool {
    line.contains('=')
        && !line.contains("==")
        && !line.contains("!=")
        && !line.contains("<=")
        && !line.contains(">=")
}

/// Split an assignment into target name and value text. The target is the
/// last whitespace-separated field left of the first `=`, kept permissive
/// on purpose.
fn parse_assignment(line: &str) -> Option<(String, String)> {
    let (lhs, rhs) = line.split_once('=')?;
    let target = lhs.trim().split_whitespace().last()?.to_string();
    let value = rhs.trim().trim_end_matches(';').trim().to_string();
    Some((target, value))
}

struct Tracker<'p> {
    profile: &'p Profile,
    variables: usize,
    functions: usize,
    findings: Vec<String>,
    symbols: Vec<DeclaredSymbol>,
    declared_functions: Vec<DeclaredFunction>,
    /// Names recorded as used, in discovery order, duplicates included.
    used: Vec<String>,
}

/// Track declarations and uses across `source`.
#[tracing::instrument(skip_all, fields(profile = profile.name, source_len = source.len()))]
pub fn track(source: &str, profile: &Profile) -> SemanticReport {
    let mut tracker = Tracker {
        profile,
        variables: 0,
        functions: 0,
        findings: Vec::new(),
        symbols: Vec::new(),
        declared_functions: Vec::new(),
        used: Vec::new(),
    };

    for (idx, raw_line) in source.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || profile.semantic_skip_prefixes.iter().any(|p| line.starts_with(p)) {
            continue;
        }
        tracker.visit_line(line, idx + 1);
    }

    tracker.finish()
}

impl Tracker<'_> {
    fn visit_line(&mut self, line: &str, line_no: usize) {
        let profile = self.profile;
        // Names declared on this line; excluded from the used-name sweep so
        // a declaration does not count as its own use.
        let mut declared_here: Vec<String> = Vec::new();

        if profile.functions.detect.is_match(line) {
            self.functions += 1;
            // A declaration that matches the detect pattern but not the
            // parse pattern is counted but never registered.
            if let Some(caps) = profile.functions.parse.captures(line) {
                let function = DeclaredFunction {
                    name: caps["name"].to_string(),
                    return_type: caps
                        .name("ret")
                        .map(|m| m.as_str())
                        .unwrap_or("inferred")
                        .to_string(),
                    parameters: split_parameters(&caps["params"]),
                    line: line_no,
                };
                tracing::debug!(
                    name = %function.name,
                    return_type = %function.return_type,
                    parameters = function.parameters.len(),
                    line = function.line,
                    "registered function"
                );
                self.declared_functions.push(function);
            }
        } else {
            match &profile.declaration_grammar {
                DeclarationGrammar::Typed { detect, parse } => {
                    if detect.is_match(line) {
                        self.declare_typed(line, line_no, parse, &mut declared_here);
                    } else if is_assignment(line) {
                        self.check_reassignment(line, line_no);
                    }
                }
                DeclarationGrammar::Inferred => {
                    if is_assignment(line) {
                        self.declare_inferred(line, line_no, &mut declared_here);
                    }
                }
            }
        }

        self.record_used(line, &declared_here);
    }

    fn declare_typed(&mut self, line: &str, line_no: usize, parse: &Regex, declared_here: &mut Vec<String>) {
        let Some(caps) = parse.captures(line) else {
            self.variables += 1;
            return;
        };
        let ty = caps["ty"].to_string();
        let rest = caps["rest"].trim_end_matches(';').trim().to_string();

        let parts: Vec<&str> = rest.split(',').collect();
        // The count is taken per line, before the redeclaration check.
        self.variables += parts.len();

        for part in parts {
            let part = part.trim();
            let (name, initializer) = match part.split_once('=') {
                Some((name, value)) => (name.trim(), Some(value.trim())),
                None => (part, None),
            };
            if name.is_empty() {
                continue;
            }
            declared_here.push(name.to_string());

            if self.symbols.iter().any(|s| s.name == name) {
                self.findings
                    .push(format!("line {line_no}: variable '{name}' already declared"));
                continue;
            }

            if let Some(value) = initializer {
                let value_ty = infer_value_type(value, self.profile);
                if !is_compatible(&ty, value_ty) {
                    self.findings.push(format!(
                        "line {line_no}: type error: variable '{name}' of type {ty} cannot be initialized with a {} value",
                        value_ty.name()
                    ));
                }
            }

            self.register(DeclaredSymbol {
                name: name.to_string(),
                ty: ty.clone(),
                initializer: initializer.unwrap_or("").to_string(),
                line: line_no,
                initialized: initializer.is_some(),
                used: initializer.is_some(),
            });
        }
    }

    fn declare_inferred(&mut self, line: &str, line_no: usize, declared_here: &mut Vec<String>) {
        let Some((target, value)) = parse_assignment(line) else {
            return;
        };
        if !IDENTIFIER.is_match(&target) {
            return;
        }
        declared_here.push(target.clone());

        let value_ty = infer_value_type(&value, self.profile);
        if let Some(symbol) = self.symbols.iter().find(|s| s.name == target) {
            if !is_compatible(&symbol.ty, value_ty) {
                self.findings.push(format!(
                    "line {line_no}: type error: cannot assign {} to variable of type {}",
                    value_ty.name(),
                    symbol.ty
                ));
            }
        } else {
            self.variables += 1;
            self.register(DeclaredSymbol {
                name: target,
                ty: value_ty.name().to_string(),
                initializer: value,
                line: line_no,
                initialized: true,
                used: true,
            });
        }
    }

    fn check_reassignment(&mut self, line: &str, line_no: usize) {
        let Some((target, value)) = parse_assignment(line) else {
            return;
        };
        match self.symbols.iter().find(|s| s.name == target) {
            Some(symbol) => {
                let value_ty = infer_value_type(&value, self.profile);
                if !is_compatible(&symbol.ty, value_ty) {
                    self.findings.push(format!(
                        "line {line_no}: type error: cannot assign {} to variable of type {}",
                        value_ty.name(),
                        symbol.ty
                    ));
                }
            }
            None => {
                self.findings
                    .push(format!("line {line_no}: variable '{target}' used but not declared"));
            }
        }
    }

    fn register(&mut self, symbol: DeclaredSymbol) {
        tracing::debug!(
            name = %symbol.name,
            ty = %symbol.ty,
            initializer = %symbol.initializer,
            line = symbol.line,
            initialized = symbol.initialized,
            "registered variable"
        );
        self.symbols.push(symbol);
    }

    fn record_used(&mut self, line: &str, declared_here: &[String]) {
        let cleaned = blank_string_literals(line);
        for word in WORD.find_iter(&cleaned) {
            let word = word.as_str();
            if self.profile.is_reserved(word)
                || self.profile.entry_point_name() == Some(word)
                || self.declared_functions.iter().any(|f| f.name == word)
                || declared_here.iter().any(|d| d == word)
            {
                continue;
            }
            self.used.push(word.to_string());
        }
    }

    fn finish(self) -> SemanticReport {
        let Tracker {
            profile,
            variables,
            functions,
            mut findings,
            symbols,
            declared_functions,
            used,
        } = self;

        let mut reported: HashSet<&str> = HashSet::new();
        for name in &used {
            if !reported.insert(name.as_str()) {
                continue;
            }
            if symbols.iter().any(|s| s.name == *name) || declared_functions.iter().any(|f| f.name == *name) {
                continue;
            }
            findings.push(format!("variable '{name}' used but not declared"));
        }

        for symbol in &symbols {
            if symbol.used || used.iter().any(|u| *u == symbol.name) {
                continue;
            }
            if profile.entry_point_name() == Some(symbol.name.as_str()) {
                continue;
            }
            findings.push(format!("variable '{}' declared but not used", symbol.name));
        }

        SemanticReport {
            variables_count: variables,
            functions_count: functions,
            errors: findings,
        }
    }
}

fn split_parameters(params: &str) -> Vec<String> {
    let params = params.trim();
    if params.is_empty() {
        return Vec::new();
    }
    params.split(',').map(|p| p.trim().to_string()).collect()
}

//! The Python-family profile.
//!
//! No statement terminator; block-opening headers end in `:`. Variables are
//! declared by first assignment and typed by inference, and there is no
//! required entry-point declaration. Construct detection is word-bounded,
//! since nearly every line of this dialect is an assignment or a call.

use std::sync::LazyLock;

use codescope_vocab::python_family as vocab;

use super::{
    CommentSyntax, ControlRule, DeclarationGrammar, DirectiveRule, FunctionRule, KeywordCase, Profile,
    TerminatorRule, re,
};

const IDENT: &str = "[A-Za-z_][A-Za-z0-9_]*";
const MODULE_PATH: &str = "[A-Za-z_][A-Za-z0-9_.]*";

/// The Python-family profile instance.
pub fn python_family() -> &'static Profile {
    static PROFILE: LazyLock<Profile> = LazyLock::new(build);
    &PROFILE
}

fn build() -> Profile {
    let control_alt = vocab::CONTROL_KEYWORDS.join("|");
    let block_alt = vocab::BLOCK_KEYWORDS.join("|");

    Profile {
        name: "python-family",
        aliases: &["python", "py"],
        keywords: vocab::KEYWORDS,
        builtins: vocab::BUILTINS,
        bool_literals: vocab::BOOL_LITERALS,
        keyword_case: KeywordCase::Sensitive,
        comment: CommentSyntax::new("#", None),
        directives: vec![
            DirectiveRule {
                prefix: "import ",
                shapes: vec![re(&format!(
                    r"^import\s+{MODULE_PATH}(\s*,\s*{MODULE_PATH})*(\s+as\s+{IDENT})?\s*$"
                ))],
                finding: "malformed import directive",
            },
            DirectiveRule {
                prefix: "from ",
                shapes: vec![re(&format!(
                    r"^from\s+{MODULE_PATH}\s+import\s+(\*|{IDENT}(\s*,\s*{IDENT})*)(\s+as\s+{IDENT})?\s*$"
                ))],
                finding: "malformed import directive",
            },
        ],
        entry_point: None,
        declaration_shapes: None,
        control: ControlRule {
            detect: re(&format!(r"\b(?:{control_alt})\b")),
            shapes: vec![
                re(r"^\s*if\s+.+:\s*$"),
                re(r"^\s*elif\s+.+:\s*$"),
                re(r"^\s*else\s*:\s*$"),
                re(r"^\s*while\s+.+:\s*$"),
                re(&format!(r"^\s*for\s+{IDENT}(\s*,\s*{IDENT})*\s+in\s+.+:\s*$")),
            ],
            finding: "malformed control structure",
        },
        terminator: TerminatorRule::BlockColon {
            header: re(&format!(r"^\s*(?:{block_alt})\b")),
            finding: "missing ':' after block header",
        },
        paren_exempt: re(r"\b(?:if|elif|while|for|def)\b"),
        declaration_grammar: DeclarationGrammar::Inferred,
        functions: FunctionRule {
            detect: re(&format!(r"^\s*def\s+{IDENT}\s*\(")),
            parse: re(&format!(
                r"^\s*def\s+(?P<name>{IDENT})\s*\((?P<params>[^)]*)\)\s*(?:->\s*(?P<ret>{IDENT})\s*)?:\s*$"
            )),
        },
        semantic_skip_prefixes: &["#", "import ", "from "],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_shapes_require_the_colon() {
        let control = &python_family().control;
        for line in ["if x > 0:", "elif x < 0:", "else:", "while n:", "for i in range(10):"] {
            assert!(control.shapes.iter().any(|s| s.is_match(line)), "{line} should be accepted");
        }
        for line in ["if x > 0", "for i in:", "else x:"] {
            assert!(!control.shapes.iter().any(|s| s.is_match(line)), "{line} should be rejected");
        }
    }

    #[test]
    fn import_shapes_cover_both_directive_forms() {
        let directives = &python_family().directives;
        let accepted = |line: &str| {
            directives
                .iter()
                .any(|d| line.starts_with(d.prefix) && d.shapes.iter().any(|s| s.is_match(line)))
        };
        assert!(accepted("import os"));
        assert!(accepted("import os, sys"));
        assert!(accepted("from collections import OrderedDict"));
        assert!(accepted("from os import *"));
        assert!(!accepted("import"));
        assert!(!accepted("from os import"));
    }

    #[test]
    fn function_parse_handles_optional_return_annotation() {
        let parse = &python_family().functions.parse;
        let caps = parse.captures("def add(a, b) -> int:").unwrap();
        assert_eq!(&caps["name"], "add");
        assert_eq!(&caps["params"], "a, b");
        assert_eq!(caps.name("ret").map(|m| m.as_str()), Some("int"));

        let caps = parse.captures("def greet(name):").unwrap();
        assert!(caps.name("ret").is_none());
        assert!(parse.captures("def broken(a, b)").is_none());
    }
}

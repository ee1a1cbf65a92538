//! The C-family profile.
//!
//! Statements end in `;`, blocks use braces, declarations start with a
//! primitive-type keyword, and `int main(...)` is the required entry point.
//! Construct detection is substring-based where the shapes below allow it,
//! matching the observed tolerance of the dialect.

use std::sync::LazyLock;

use codescope_vocab::c_family as vocab;

use super::{
    CommentSyntax, ControlRule, DeclarationGrammar, DeclarationShapes, DirectiveRule, EntryPointRule, FunctionRule,
    KeywordCase, Profile, TerminatorRule, re,
};

const IDENT: &str = "[A-Za-z_][A-Za-z0-9_]*";

/// The C-family profile instance.
pub fn c_family() -> &'static Profile {
    static PROFILE: LazyLock<Profile> = LazyLock::new(build);
    &PROFILE
}

fn build() -> Profile {
    let decl_types = vocab::DECLARATION_TYPES.join("|");
    let return_types = vocab::RETURN_TYPES.join("|");
    let control_alt = vocab::CONTROL_KEYWORDS.join("|");
    let statement_triggers = format!(r"=|{}|return|\+\+|--", vocab::IO_PRIMITIVES.join("|"));

    Profile {
        name: "c-family",
        aliases: &["c", "cpp", "c++"],
        keywords: vocab::KEYWORDS,
        builtins: vocab::BUILTINS,
        bool_literals: vocab::BOOL_LITERALS,
        keyword_case: KeywordCase::WithLowercaseFallback,
        comment: CommentSyntax::new("//", Some(("/*", "*/"))),
        directives: vec![
            DirectiveRule {
                prefix: "#include",
                shapes: vec![re(r"^#include\s*<[^>]+>\s*$"), re(r#"^#include\s*"[^"]+"\s*$"#)],
                finding: "malformed include directive",
            },
            DirectiveRule {
                prefix: "using namespace",
                shapes: vec![re(&format!(r"^using\s+namespace\s+{IDENT}\s*;\s*$"))],
                finding: "malformed using-namespace directive",
            },
        ],
        entry_point: Some(EntryPointRule {
            name: vocab::ENTRY_POINT,
            detect: "int main",
            shapes: vec![
                re(r"int\s+main\s*\(\s*\)\s*\{?"),
                re(&format!(r"int\s+main\s*\(\s*int\s+{IDENT}\s*,\s*char\s*\*\s*{IDENT}\[\]\s*\)\s*\{{?")),
                re(&format!(r"int\s+main\s*\(\s*int\s+{IDENT}\s*,\s*char\s*\*\*\s*{IDENT}\s*\)\s*\{{?")),
            ],
            malformed_finding: "malformed entry-point declaration",
            missing_finding: "no entry-point function found",
        }),
        declaration_shapes: Some(DeclarationShapes {
            detect: re(&format!(r"^\s*(?:{decl_types})\s+{IDENT}")),
            shapes: vec![
                re(&format!(r"^\s*(?:{decl_types})\s+{IDENT}\s*;\s*$")),
                re(&format!(r"^\s*(?:{decl_types})\s+{IDENT}\s*=\s*[^;]+\s*;\s*$")),
                re(&format!(r"^\s*(?:{decl_types})\s+{IDENT}(\s*,\s*{IDENT})*\s*;\s*$")),
                re(&format!(
                    r"^\s*(?:{decl_types})\s+{IDENT}\s*=\s*[^,;]+(\s*,\s*{IDENT}\s*=\s*[^,;]+)*\s*;\s*$"
                )),
            ],
            finding: "malformed variable declaration",
        }),
        control: ControlRule {
            detect: re(&control_alt),
            shapes: vec![
                re(r"^\s*if\s*\(.+\)\s*\{?\s*$"),
                re(r"^\s*else\s*\{?\s*$"),
                re(r"^\s*else\s+if\s*\(.+\)\s*\{?\s*$"),
                re(r"^\s*while\s*\(.+\)\s*\{?\s*$"),
                re(r"^\s*for\s*\(.+\)\s*\{?\s*$"),
                re(r"^\s*switch\s*\(.+\)\s*\{?\s*$"),
                re(r"^\s*case\s+.+:\s*$"),
                re(r"^\s*default\s*:\s*$"),
            ],
            finding: "malformed control structure",
        },
        terminator: TerminatorRule::Semicolon {
            exempt_prefixes: &["#", "using namespace"],
            exempt_suffixes: &["{", "}"],
            exempt_contains: re(&control_alt),
            triggers: re(&statement_triggers),
            finding: "missing semicolon",
        },
        paren_exempt: re("if|while|for|main"),
        declaration_grammar: DeclarationGrammar::Typed {
            detect: re(&format!(r"^\s*(?:{decl_types})\s+{IDENT}")),
            parse: re(&format!(r"^\s*(?P<ty>{decl_types})\s+(?P<rest>.+?)\s*;?\s*$")),
        },
        functions: FunctionRule {
            detect: re(&format!(r"(?:{return_types})\s+{IDENT}\s*\([^)]*\)\s*\{{?")),
            parse: re(&format!(
                r"(?P<ret>{return_types})\s+(?P<name>{IDENT})\s*\((?P<params>[^)]*)\)"
            )),
        },
        semantic_skip_prefixes: &["//", "#", "using namespace"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_shapes_accept_the_four_forms() {
        let shapes = &c_family().declaration_shapes.as_ref().unwrap().shapes;
        for line in ["int a;", "int a = 5;", "int a, b, c;", "int a = 1, b = 2;"] {
            assert!(shapes.iter().any(|s| s.is_match(line)), "{line} should be accepted");
        }
        for line in ["int a", "int = 5;", "int a,, b;"] {
            assert!(!shapes.iter().any(|s| s.is_match(line)), "{line} should be rejected");
        }
    }

    #[test]
    fn entry_point_shapes_accept_the_three_main_forms() {
        let entry = c_family().entry_point.as_ref().unwrap();
        for line in ["int main() {", "int main(int argc, char* argv[]) {", "int main(int argc, char** argv)"] {
            assert!(entry.shapes.iter().any(|s| s.is_match(line)), "{line} should be accepted");
        }
        assert!(!entry.shapes.iter().any(|s| s.is_match("int main(void foo)")));
    }

    #[test]
    fn function_parse_captures_signature() {
        let caps = c_family().functions.parse.captures("int add(int a, int b) {").unwrap();
        assert_eq!(&caps["ret"], "int");
        assert_eq!(&caps["name"], "add");
        assert_eq!(&caps["params"], "int a, int b");
    }

    #[test]
    fn typed_grammar_detects_declarations() {
        let DeclarationGrammar::Typed { detect, .. } = &c_family().declaration_grammar else {
            panic!("c-family must use the typed declaration grammar");
        };
        assert!(detect.is_match("int a = 5;"));
        assert!(detect.is_match("  string name;"));
        assert!(!detect.is_match("a = 5;"));
    }
}

// Copyright (c) Meta Platforms, Inc. and affiliates.
// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A lossless, editable Concrete Syntax Tree for the `raise`, `return`,
//! `break` and `continue` family of statements, spelled with English or
//! Spanish keywords.
//!
//! # Overview
//!
//! - **Parsing**: Parse source into a CST with [`parse_module`], or
//!   [`parse_module_with_options`] to pick the accepted [`Dialect`].
//! - **Code Generation**: Regenerate source with [`Module::code`] or the
//!   [`Codegen`] trait. Parsing then regenerating reproduces the input exactly.
//! - **Editing**: Statement nodes are built through validating constructors,
//!   and [`Transformer`]s rebuild trees with the same checks.
//! - **Translation**: [`translate_module`] respells every statement in one
//!   [`Language`], keeping all formatting.
//!
//! # Quick Start
//!
//! ```
//! use tuglingo_cst::{parse_module, Codegen, CodegenState};
//!
//! let source = "aumenta ValueError(x) from  causa ; return\n";
//! let module = parse_module(source, None).expect("parse error");
//!
//! // Round-trip: convert back to source
//! let mut state = CodegenState::default();
//! module.codegen(&mut state);
//! assert_eq!(state.to_string(), source);
//! ```
//!
//! # Dialects
//!
//! ```
//! use tuglingo_cst::{parse_module_with_options, Dialect, ParseOptions, SmallStatement};
//!
//! // With only English keywords, `rompe` is an ordinary name.
//! let options = ParseOptions::new(Dialect::English);
//! let module = parse_module_with_options("rompe\n", options).expect("parse error");
//! assert!(matches!(module.body[0].body[0], SmallStatement::Expr(_)));
//! ```

use std::cmp::{max, min};

// ============================================================================
// Public modules and re-exports
// ============================================================================

mod codegen;
pub use codegen::{CodePosition, CodeRange, Codegen, CodegenState, SyntacticPosition};

mod error;
pub use error::{Side, ValidationError};

/// Keyword languages and parse/codegen configuration.
pub mod options;
pub use options::{CodegenOptions, Dialect, Language, ParseOptions, StatementKind};

/// Visitor and transformer infrastructure for CST traversal.
pub mod visitor;
pub use visitor::{
    translate_module, KeywordTranslator, Transform, TransformResult, Transformer, Translated,
    VisitResult, Visitor,
};
// Re-export walk functions for CST traversal
pub use visitor::{
    walk_arg, walk_attribute, walk_aumenta_stmt, walk_break_stmt, walk_call, walk_continua_stmt,
    walk_continue_stmt, walk_devuelve_stmt, walk_empty_line, walk_expr, walk_expression,
    walk_from_clause, walk_integer, walk_module, walk_name, walk_pass_stmt, walk_raise_stmt,
    walk_return_stmt, walk_rompe_stmt, walk_semicolon, walk_simple_statement_line,
    walk_simple_string, walk_simple_whitespace, walk_small_statement,
};

mod nodes;

// Re-export all node types for CST construction and traversal
pub use nodes::*;

mod parser;

// Re-export parser error types
pub use parser::{ParserError, Result};

// ============================================================================
// Parsing functions
// ============================================================================

/// Parses a module with the specified options.
///
/// This is the primary parsing API. For the default bilingual dialect, use
/// [`parse_module`] instead. A leading UTF-8 byte order mark is kept aside
/// in [`Module::has_bom`] and regenerated with the rest of the source.
///
/// # Errors
///
/// Returns [`ParserError::UnsupportedEncoding`] for an encoding other than
/// UTF-8, and [`ParserError::ParserError`] when the text is not a sequence of
/// simple statement lines.
///
/// # Example
///
/// ```
/// use tuglingo_cst::{parse_module_with_options, Dialect, ParseOptions};
///
/// let options = ParseOptions::new(Dialect::Spanish);
/// let module = parse_module_with_options("devuelve x\n", options).expect("parse error");
/// assert_eq!(module.code(), "devuelve x\n");
/// ```
pub fn parse_module_with_options(
    mut module_text: &str,
    options: ParseOptions,
) -> Result<'_, Module<'_>> {
    let encoding = parser::validate_encoding(options.encoding_str())?;
    // Strip UTF-8 BOM
    let has_bom = match module_text.strip_prefix('\u{feff}') {
        Some(stripped) => {
            module_text = stripped;
            true
        }
        None => false,
    };
    let items = parser::python::file(module_text, &options)
        .map_err(|err| ParserError::ParserError(err, module_text))?;
    let mut module = parser::build_module(items, module_text, encoding);
    module.has_bom = has_bom;
    tracing::debug!(
        dialect = %options.dialect,
        lines = module.body.len(),
        "parsed module"
    );
    Ok(module)
}

/// Parses a module accepting both English and Spanish keywords.
///
/// # Arguments
///
/// * `module_text` - The source code to parse.
/// * `encoding` - Optional encoding hint (e.g., `"utf-8"`).
///
/// # Example
///
/// ```
/// use tuglingo_cst::parse_module;
///
/// let module = parse_module("rompe; continue\n", None).expect("parse error");
/// assert_eq!(module.body[0].body.len(), 2);
/// ```
pub fn parse_module<'a>(module_text: &'a str, encoding: Option<&str>) -> Result<'a, Module<'a>> {
    let options = match encoding {
        Some(enc) => ParseOptions::default().with_encoding(enc),
        None => ParseOptions::default(),
    };
    parse_module_with_options(module_text, options)
}

/// Parses a single line of statements.
///
/// # Example
///
/// ```
/// use tuglingo_cst::parse_statement;
///
/// let line = parse_statement("raise E from c").expect("parse error");
/// assert_eq!(line.body.len(), 1);
/// ```
pub fn parse_statement(text: &str) -> Result<'_, SimpleStatementLine<'_>> {
    parser::python::statement_input(text, &ParseOptions::default())
        .map_err(|err| ParserError::ParserError(err, text))
}

/// Parses a single expression.
///
/// # Example
///
/// ```
/// use tuglingo_cst::{parse_expression, Expression};
///
/// let expr = parse_expression("errors.Fatal(1)").expect("parse error");
/// assert!(matches!(expr, Expression::Call(_)));
/// ```
pub fn parse_expression(text: &str) -> Result<'_, Expression<'_>> {
    parser::python::expression_input(text, &ParseOptions::default())
        .map_err(|err| ParserError::ParserError(err, text))
}

// ============================================================================
// Error formatting
// ============================================================================

/// Returns the byte offset of the beginning of line `n` (1-indexed).
fn bol_offset(source: &str, n: i32) -> usize {
    if n <= 1 {
        return 0;
    }
    source
        .match_indices('\n')
        .nth((n - 2) as usize)
        .map(|(index, _)| index + 1)
        .unwrap_or_else(|| source.len())
}

/// Formats a parser error into a human-readable string with source context.
///
/// # Arguments
///
/// * `err` - The parser error to format.
/// * `label` - A label for the error (e.g., file name).
///
/// # Example
///
/// ```
/// use tuglingo_cst::{parse_module, prettify_error};
///
/// let result = parse_module("raise x from\n", None);
/// if let Err(e) = result {
///     let formatted = prettify_error(e, "example.py");
///     assert!(formatted.contains("example.py"));
/// }
/// ```
pub fn prettify_error(err: ParserError<'_>, label: &str) -> std::string::String {
    match err {
        ParserError::ParserError(e, module_text) => {
            use annotate_snippets::{Level, Renderer, Snippet};

            let loc = e.location;
            let context = 1;
            let line_start = max(1, loc.line.checked_sub(context as usize).unwrap_or(1));
            let start_offset = bol_offset(module_text, loc.line as i32 - context);
            let end_offset = bol_offset(module_text, loc.line as i32 + context + 1);
            let source = &module_text[start_offset..end_offset];
            let start = loc.offset - start_offset;
            let end = min(start + 1, end_offset - start_offset + 1);
            Renderer::styled()
                .render(
                    Level::Error.title(label).snippet(
                        Snippet::source(source)
                            .line_start(line_start)
                            .fold(false)
                            .annotations(vec![Level::Error
                                .span(start..end)
                                .label(&format!("expected {} at {}", e.expected, loc))]),
                    ),
                )
                .to_string()
        }
        e => format!("Parse error for {}: {}", label, e),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_simple() {
        let module = parse_module("raise\n", None).expect("parse error");
        assert!(matches!(module.body[0].body[0], SmallStatement::Raise(_)));
    }

    #[test]
    fn test_single_statement_with_no_newline() {
        for src in &[
            "break",
            "continúa",
            "return x",
            "aumenta E from c",
            "pass;",
            "x # comment",
            "f(\\\n)",
        ] {
            let module = parse_module(src, None)
                .unwrap_or_else(|e| panic!("'{}' doesn't parse: {}", src, e));
            assert_eq!(module.code(), *src);
        }
    }

    #[test]
    fn test_rejected_sources() {
        for src in &["raise x from", "return pass", "break break", "f(a b)", "rompe(\n)"] {
            assert!(parse_module(src, None).is_err(), "'{}' should not parse", src);
        }
    }

    #[test]
    fn test_bom_round_trips() {
        let module = parse_module("\u{feff}break\n", None).expect("parse error");
        assert!(module.has_bom);
        assert_eq!(module.code(), "\u{feff}break\n");
        assert!(!parse_module("break\n", None).expect("parse error").has_bom);
    }

    #[test]
    fn test_unsupported_encoding() {
        assert_eq!(
            parse_module("break\n", Some("latin-1")).err(),
            Some(ParserError::UnsupportedEncoding("latin-1".to_string()))
        );
        let module = parse_module("break\n", Some("utf8")).expect("parse error");
        assert_eq!(module.encoding, "utf8");
    }

    #[test]
    fn bol_offset_first_line() {
        assert_eq!(0, bol_offset("hello", 1));
        assert_eq!(0, bol_offset("hello", 0));
        assert_eq!(0, bol_offset("hello\nhello", 1));
        assert_eq!(0, bol_offset("hello\nhello", 0));
    }

    #[test]
    fn bol_offset_second_line() {
        assert_eq!(5, bol_offset("hello", 2));
        assert_eq!(6, bol_offset("hello\nhello", 2));
        assert_eq!(6, bol_offset("hello\nhello\nhello", 2));
    }

    #[test]
    fn bol_offset_last_line() {
        assert_eq!(5, bol_offset("hello", 3));
        assert_eq!(11, bol_offset("hello\nhello", 3));
        assert_eq!(12, bol_offset("hello\nhello\nhello", 3));
    }

    #[test]
    fn test_parse_module_with_options() {
        let source = "break\nrompe\n";
        let english = parse_module_with_options(source, ParseOptions::new(Dialect::English))
            .expect("parse error");
        assert!(matches!(english.body[1].body[0], SmallStatement::Expr(_)));
        let spanish = parse_module_with_options(source, ParseOptions::new(Dialect::Spanish))
            .expect("parse error");
        assert!(matches!(spanish.body[0].body[0], SmallStatement::Expr(_)));
        assert!(matches!(spanish.body[1].body[0], SmallStatement::Rompe(_)));
    }

    #[test]
    fn test_parse_statement_and_expression() {
        let line = parse_statement("  # lead\ndevuelve (x)  # fin").expect("parse error");
        assert_eq!(line.leading_lines.len(), 1);
        assert!(matches!(line.body[0], SmallStatement::Devuelve(_)));
        assert!(parse_statement("break\nbreak").is_err());

        let expr = parse_expression("a.b").expect("parse error");
        assert!(matches!(expr, Expression::Attribute(_)));
        assert!(parse_expression("raise").is_err());
    }

    #[test]
    fn test_prettify_error() {
        let err = parse_module("break\nraise x from\npass\n", None).unwrap_err();
        let formatted = prettify_error(err, "bad.py");
        assert!(formatted.contains("bad.py"));
        assert!(formatted.contains("raise x from"));

        let err = parse_module("break\n", Some("ascii")).unwrap_err();
        assert_eq!(
            prettify_error(err, "bad.py"),
            "Parse error for bad.py: unsupported encoding: ascii (only utf-8 is supported)"
        );
    }
}

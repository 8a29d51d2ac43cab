// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Construction, validation and transformation through the public API.

use tuglingo_cst::{
    parse_module, Aumenta, Break, CodegenOptions, Continue, Devuelve, Expression, FromClause,
    MaybeSentinel, Module, Name, Raise, Return, Semicolon, Side, SimpleStatementLine,
    SimpleWhitespace, SmallStatement, Span, Transform, TransformResult, Transformer,
    ValidationError,
};

fn name(value: &str) -> Expression<'_> {
    Name::new(value).unwrap().into()
}

fn space(value: &str) -> MaybeSentinel<SimpleWhitespace<'_>> {
    MaybeSentinel::Value(SimpleWhitespace::new(value).unwrap())
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn cause_requires_exception() {
    let err = Raise::new(
        None,
        Some(FromClause::of(name("c"))),
        MaybeSentinel::Default,
        MaybeSentinel::Default,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Must have an 'exc' when specifying 'cause' on Raise.");

    let err = Aumenta::new(
        None,
        Some(FromClause::of(name("c"))),
        MaybeSentinel::Default,
        MaybeSentinel::Default,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingDependency {
            node: "Aumenta",
            required: "exc",
            dependent: "cause",
        }
    );
}

#[test]
fn empty_explicit_whitespace_is_checked() {
    let err = Return::new(Some(name("x")), space(""), MaybeSentinel::Default).unwrap_err();
    assert_eq!(err.to_string(), "Must have at least one space after 'return'.");

    let err = Raise::new(Some(name("E")), None, space(""), MaybeSentinel::Default).unwrap_err();
    assert_eq!(err.to_string(), "Must have at least one space after 'raise'.");

    let cause = FromClause::new(name("c"), space(""), SimpleWhitespace::new(" ").unwrap()).unwrap();
    let err = Raise::new(
        Some(name("E")),
        Some(cause),
        MaybeSentinel::Default,
        MaybeSentinel::Default,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingSpace {
            keyword: "from",
            side: Side::Before,
        }
    );
    assert_eq!(err.to_string(), "Must have at least one space before 'from'.");
}

#[test]
fn default_whitespace_is_never_checked() {
    // Default formatting never glues a keyword to its child.
    let node =
        Devuelve::new(Some(name("x")), MaybeSentinel::Default, MaybeSentinel::Default).unwrap();
    assert!(node.whitespace_after_devuelve().is_default());

    // Empty explicit whitespace is fine without a child to glue to.
    assert!(Return::new(None, space(""), MaybeSentinel::Default).is_ok());
}

#[test]
fn editing_revalidates() {
    let module = parse_module("return(x)\n", None).unwrap();
    let SmallStatement::Return(node) = module.body[0].body[0].clone() else {
        panic!("expected a return statement");
    };
    assert_eq!(
        node.with_value(Some(name("y"))).unwrap_err(),
        ValidationError::MissingSpace {
            keyword: "return",
            side: Side::After,
        }
    );
}

// =============================================================================
// Code generation
// =============================================================================

fn built_module() -> Module<'static> {
    let raise = Raise::new(
        Some(name("E")),
        Some(FromClause::of(name("c"))),
        MaybeSentinel::Default,
        MaybeSentinel::Default,
    )
    .unwrap();
    Module::new(vec![
        SimpleStatementLine::new(vec![raise.into(), Break::default().into()]),
        SimpleStatementLine::new(vec![Return::default().into()]),
    ])
}

#[test]
fn default_formatting_is_filled_in() {
    assert_eq!(built_module().code(), "raise E from c; break\nreturn\n");
}

#[test]
fn default_semicolon_follows_options() {
    let options = CodegenOptions::default().with_default_semicolon(";");
    assert_eq!(built_module().code_with_options(&options), "raise E from c;break\nreturn\n");

    let options = CodegenOptions::default().with_default_newline("\r\n");
    assert_eq!(built_module().code_with_options(&options), "raise E from c; break\r\nreturn\r\n");
}

#[test]
fn explicit_semicolons_are_kept() {
    let module = parse_module("break ;continue;\n", None).unwrap();
    let options = CodegenOptions::default().with_default_semicolon(" ; ");
    assert_eq!(module.code_with_options(&options), "break ;continue;\n");

    let explicit = Semicolon::new(
        SimpleWhitespace::new("").unwrap(),
        SimpleWhitespace::new("  ").unwrap(),
    );
    let line = SimpleStatementLine::new(vec![
        Continue::default().with_semicolon(MaybeSentinel::Value(explicit)).into(),
        Break::default().into(),
    ]);
    assert_eq!(Module::new(vec![line]).code(), "continue;  break\n");
}

#[test]
fn positions_cover_statements() {
    let module = parse_module("pass\nraise E from c ; rompe\n", None).unwrap();
    let (code, positions) = module.code_with_positions();
    let kinds: Vec<_> = positions.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        ["SimpleStatementLine", "Pass", "SimpleStatementLine", "Raise", "Rompe"]
    );
    assert_eq!(positions[3].span, Span::new(5, 19));
    assert_eq!(positions[3].span.slice(&code), Some("raise E from c"));
    assert_eq!(positions[4].span.slice(&code), Some("rompe"));
    assert_eq!(positions[4].range.start.line, 2);
    assert_eq!(positions[4].range.start.column, 17);
}

#[test]
fn positions_follow_cr_newlines() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/cr.py");
    let source = std::fs::read_to_string(path).unwrap();
    let module = parse_module(&source, None).unwrap();
    let (code, positions) = module.code_with_positions();
    assert_eq!(code, source);
    let rompe = positions.iter().find(|p| p.kind == "Rompe").unwrap();
    assert_eq!(rompe.range.start.line, 2);
    assert_eq!(rompe.range.start.column, 0);
    assert_eq!(rompe.span.slice(&code), Some("rompe"));

    let module = parse_module("break\rraise x\r\n  # c\rpass\r", None).unwrap();
    let (_, positions) = module.code_with_positions();
    let starts: Vec<_> = positions
        .iter()
        .map(|p| (p.kind, p.range.start.to_string()))
        .collect();
    assert_eq!(
        starts,
        [
            ("SimpleStatementLine", "1:0".to_string()),
            ("Break", "1:0".to_string()),
            ("SimpleStatementLine", "2:0".to_string()),
            ("Raise", "2:0".to_string()),
            ("SimpleStatementLine", "4:0".to_string()),
            ("Pass", "4:0".to_string()),
        ]
    );
}

// =============================================================================
// Transformation
// =============================================================================

struct ContinueToBreak;

impl<'a> Transformer<'a> for ContinueToBreak {
    fn transform_continue_stmt(
        &mut self,
        node: Continue<'a>,
    ) -> TransformResult<SmallStatement<'a>> {
        Ok(Transform::Keep(Break::new(node.into_semicolon()).into()))
    }
}

#[test]
fn replacing_a_statement_keeps_its_formatting() {
    let module = parse_module("continue  ;  x  # done\ncontinúa\n", None).unwrap();
    let module = module.visit(&mut ContinueToBreak).unwrap();
    assert_eq!(module.code(), "break  ;  x  # done\ncontinúa\n");
}

/// Turns every `break` into a `return`, with or without a value.
struct BreakToReturn {
    value: Option<&'static str>,
}

impl<'a> Transformer<'a> for BreakToReturn {
    fn transform_break_stmt(&mut self, node: Break<'a>) -> TransformResult<SmallStatement<'a>> {
        let value = self.value.map(Name::new).transpose()?.map(Expression::from);
        let replacement = Return::new(value, MaybeSentinel::Default, node.into_semicolon())?;
        Ok(Transform::Keep(replacement.into()))
    }
}

#[test]
fn replacement_fills_in_default_whitespace() {
    let module = parse_module("break; break\n", None).unwrap();
    let module = module.visit(&mut BreakToReturn { value: Some("x") }).unwrap();
    assert_eq!(module.code(), "return x; return x\n");

    let module = parse_module("break; break\n", None).unwrap();
    let module = module.visit(&mut BreakToReturn { value: None }).unwrap();
    assert_eq!(module.code(), "return; return\n");

    let module = parse_module("break\r\n", None).unwrap();
    let module = module.visit(&mut BreakToReturn { value: None }).unwrap();
    assert_eq!(module.code(), "return\r\n");
}

struct StripKeywordWhitespace;

impl<'a> Transformer<'a> for StripKeywordWhitespace {
    fn transform_raise_stmt(&mut self, node: Raise<'a>) -> TransformResult<SmallStatement<'a>> {
        let mut parts = node.into_parts();
        parts.whitespace_after_keyword = MaybeSentinel::Default;
        Ok(Transform::Keep(Raise::from_parts(parts)?.into()))
    }
}

#[test]
fn removed_formatting_falls_back_to_defaults() {
    let module = parse_module("raise\t\tE from c\n", None).unwrap();
    let module = module.visit(&mut StripKeywordWhitespace).unwrap();
    assert_eq!(module.code(), "raise E from c\n");
}

struct GlueRaise;

impl<'a> Transformer<'a> for GlueRaise {
    fn transform_raise_stmt(&mut self, node: Raise<'a>) -> TransformResult<SmallStatement<'a>> {
        let mut parts = node.into_parts();
        parts.whitespace_after_keyword = MaybeSentinel::Value(SimpleWhitespace::new("")?);
        Ok(Transform::Keep(Raise::from_parts(parts)?.into()))
    }
}

#[test]
fn invalid_transform_fails() {
    let module = parse_module("raise E\n", None).unwrap();
    assert_eq!(
        module.visit(&mut GlueRaise).unwrap_err(),
        ValidationError::MissingSpace {
            keyword: "raise",
            side: Side::After,
        }
    );

    let module = parse_module("raise (E)\n", None).unwrap();
    assert_eq!(module.visit(&mut GlueRaise).unwrap().code(), "raise(E)\n");
}

struct RemoveBreaks;

impl<'a> Transformer<'a> for RemoveBreaks {
    fn transform_small_statement(
        &mut self,
        node: SmallStatement<'a>,
    ) -> TransformResult<SmallStatement<'a>> {
        Ok(match node {
            SmallStatement::Break(_) | SmallStatement::Rompe(_) => Transform::Remove,
            other => Transform::Keep(other),
        })
    }
}

#[test]
fn removing_statements_from_a_line() {
    let module = parse_module("break; pass ;rompe\nrompe\n", None).unwrap();
    let module = module.visit(&mut RemoveBreaks).unwrap();
    // An emptied line still renders a statement.
    assert_eq!(module.code(), "pass ;\npass\n");
}

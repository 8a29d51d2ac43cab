// Copyright (c) Meta Platforms, Inc. and affiliates.
// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree

//! The grammar and the glue that turns its output into nodes.

mod errors;
mod grammar;

pub use errors::{ParserError, Result};
pub use grammar::python;

use memchr::memchr2;

use crate::error::Result as ValidationResult;
use crate::nodes::{
    Arg, Attribute, Aumenta, Break, Call, Comma, Continua, Continue, Devuelve, Dot, EmptyLine,
    Expression, FromClause, MaybeSentinel, Module, Name, Raise, RaiseParts, Return, ReturnParts,
    Rompe, Semicolon, SimpleStatementLine, SimpleWhitespace, SmallStatement, TrailingWhitespace,
};
use crate::options::{Language, StatementKind};

/// One physical line of a module, before empty lines are attached to the
/// statement that follows them.
pub enum LineItem<'a> {
    Empty(EmptyLine<'a>),
    Statement(Vec<SmallStatement<'a>>, TrailingWhitespace<'a>),
}

/// Something that follows an atom: `.attr` or `(args)`.
pub enum Trailer<'a> {
    Attribute(Dot<'a>, Name<'a>),
    Call {
        whitespace_after_func: SimpleWhitespace<'a>,
        whitespace_before_args: SimpleWhitespace<'a>,
        args: Vec<Arg<'a>>,
    },
}

impl<'a> Trailer<'a> {
    pub fn apply(self, value: Expression<'a>) -> ValidationResult<Expression<'a>> {
        Ok(match self {
            Trailer::Attribute(dot, attr) => Attribute::new(value, dot, attr)?.into(),
            Trailer::Call {
                whitespace_after_func,
                whitespace_before_args,
                args,
            } => Call::new(value, args)
                .with_whitespace_after_func(whitespace_after_func)
                .with_whitespace_before_args(whitespace_before_args)
                .into(),
        })
    }
}

/// What closes an argument: a comma, or the whitespace before `)`.
pub enum ArgTail<'a> {
    Comma(Comma<'a>),
    Whitespace(SimpleWhitespace<'a>),
}

pub fn make_arg<'a>(value: Expression<'a>, tail: ArgTail<'a>) -> Arg<'a> {
    match tail {
        ArgTail::Comma(comma) => Arg {
            value,
            comma: MaybeSentinel::Value(comma),
            whitespace_after_arg: SimpleWhitespace::default(),
        },
        ArgTail::Whitespace(whitespace_after_arg) => Arg {
            value,
            comma: MaybeSentinel::Default,
            whitespace_after_arg,
        },
    }
}

pub type ReturnTail<'a> = (SimpleWhitespace<'a>, Expression<'a>);
pub type RaiseTail<'a> = (SimpleWhitespace<'a>, Expression<'a>, Option<FromClause<'a>>);

pub fn keyword_statement<'a>(kind: StatementKind, language: Language) -> SmallStatement<'a> {
    match (kind, language) {
        (StatementKind::Continue, Language::English) => Continue::default().into(),
        (StatementKind::Continue, Language::Spanish) => Continua::default().into(),
        (_, Language::English) => Break::default().into(),
        (_, Language::Spanish) => Rompe::default().into(),
    }
}

pub fn return_statement<'a>(
    language: Language,
    tail: Option<ReturnTail<'a>>,
) -> ValidationResult<SmallStatement<'a>> {
    let parts = match tail {
        Some((whitespace, value)) => ReturnParts {
            value: Some(value),
            whitespace_after_keyword: MaybeSentinel::Value(whitespace),
            semicolon: MaybeSentinel::Default,
        },
        None => ReturnParts::default(),
    };
    Ok(match language {
        Language::English => Return::from_parts(parts)?.into(),
        Language::Spanish => Devuelve::from_parts(parts)?.into(),
    })
}

pub fn raise_statement<'a>(
    language: Language,
    tail: Option<RaiseTail<'a>>,
) -> ValidationResult<SmallStatement<'a>> {
    let parts = match tail {
        Some((whitespace, exc, cause)) => RaiseParts {
            exc: Some(exc),
            cause,
            whitespace_after_keyword: MaybeSentinel::Value(whitespace),
            semicolon: MaybeSentinel::Default,
        },
        None => RaiseParts::default(),
    };
    Ok(match language {
        Language::English => Raise::from_parts(parts)?.into(),
        Language::Spanish => Aumenta::from_parts(parts)?.into(),
    })
}

/// Gives every statement except possibly the last its explicit semicolon.
pub fn attach_semicolons<'a>(
    first: SmallStatement<'a>,
    rest: Vec<(Semicolon<'a>, SmallStatement<'a>)>,
    last: Option<Semicolon<'a>>,
) -> Vec<SmallStatement<'a>> {
    let mut body = Vec::with_capacity(rest.len() + 1);
    let mut current = first;
    for (semicolon, stmt) in rest {
        body.push(current.with_semicolon(MaybeSentinel::Value(semicolon)));
        current = stmt;
    }
    body.push(match last {
        Some(semicolon) => current.with_semicolon(MaybeSentinel::Value(semicolon)),
        None => current,
    });
    body
}

/// The first line ending in `text`, or `"\n"` if there is none.
pub fn detect_newline(text: &str) -> &'static str {
    let bytes = text.as_bytes();
    match memchr2(b'\r', b'\n', bytes) {
        Some(i) if bytes[i] == b'\r' => {
            if bytes.get(i + 1) == Some(&b'\n') {
                "\r\n"
            } else {
                "\r"
            }
        }
        _ => "\n",
    }
}

/// Accepts only UTF-8 and returns the canonical name to store on the module.
pub fn validate_encoding<'a>(encoding: Option<&str>) -> Result<'a, String> {
    match encoding {
        None => Ok("utf-8".to_string()),
        Some(enc) if enc.eq_ignore_ascii_case("utf-8") || enc.eq_ignore_ascii_case("utf8") => {
            Ok(enc.to_string())
        }
        Some(enc) => Err(ParserError::UnsupportedEncoding(enc.to_string())),
    }
}

/// Attaches each run of empty lines to the statement line that follows it.
/// Empty lines after the last statement become the module footer.
pub fn build_module<'a>(items: Vec<LineItem<'a>>, text: &'a str, encoding: String) -> Module<'a> {
    let mut body = Vec::new();
    let mut pending = Vec::new();
    for item in items {
        match item {
            LineItem::Empty(line) => pending.push(line),
            LineItem::Statement(statements, trailing_whitespace) => {
                body.push(SimpleStatementLine {
                    body: statements,
                    leading_lines: std::mem::take(&mut pending),
                    trailing_whitespace,
                });
            }
        }
    }
    Module {
        body,
        footer: pending,
        default_newline: detect_newline(text),
        encoding,
        has_bom: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_newline() {
        assert_eq!(detect_newline("break\r\nrompe\n"), "\r\n");
        assert_eq!(detect_newline("break\rrompe"), "\r");
        assert_eq!(detect_newline("break\n"), "\n");
        assert_eq!(detect_newline("break"), "\n");
    }

    #[test]
    fn test_validate_encoding() {
        assert_eq!(validate_encoding(None), Ok("utf-8".to_string()));
        assert_eq!(validate_encoding(Some("UTF-8")), Ok("UTF-8".to_string()));
        assert_eq!(
            validate_encoding(Some("latin-1")),
            Err(ParserError::UnsupportedEncoding("latin-1".to_string()))
        );
    }

    #[test]
    fn test_attach_semicolons() {
        let body = attach_semicolons(
            Break::default().into(),
            vec![(Semicolon::default(), Rompe::default().into())],
            None,
        );
        assert!(body[0].semicolon().as_value().is_some());
        assert!(body[1].semicolon().is_default());
    }
}

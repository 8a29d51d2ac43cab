// Copyright (c) Meta Platforms, Inc. and affiliates.
// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree

//! Whitespace, comment and newline nodes.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, ValidationError};
use crate::visitor::{visit_required, Transformer};
use crate::{Codegen, CodegenState};

static SIMPLE_WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A([ \f\t]|\\(\r\n?|\n))*\z").unwrap());
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A#[^\r\n]*\z").unwrap());

/// A run of spaces, tabs, form feeds and backslash line continuations.
///
/// The empty run is a valid value and is distinct from
/// [`MaybeSentinel::Default`](crate::MaybeSentinel::Default): it asks for no
/// whitespace at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SimpleWhitespace<'a>(&'a str);

impl<'a> SimpleWhitespace<'a> {
    pub fn new(value: &'a str) -> Result<Self> {
        if SIMPLE_WHITESPACE_RE.is_match(value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidWhitespace(value.to_string()))
        }
    }

    /// Built by the parser from text its grammar already matched.
    pub(crate) fn new_unchecked(value: &'a str) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &'a str {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
        self,
        _transformer: &mut T,
    ) -> Result<Self> {
        Ok(self)
    }
}

impl<'a> Codegen<'a> for SimpleWhitespace<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        state.add_token(self.0);
    }
}

/// A `#` comment, without its line ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Comment<'a>(&'a str);

impl<'a> Comment<'a> {
    pub fn new(value: &'a str) -> Result<Self> {
        if COMMENT_RE.is_match(value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidComment(value.to_string()))
        }
    }

    pub(crate) fn new_unchecked(value: &'a str) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &'a str {
        self.0
    }
}

impl<'a> Codegen<'a> for Comment<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        state.add_token(self.0);
    }
}

/// A line ending.
///
/// `value: None` renders the state's default newline. A fake newline stands
/// for the missing line ending of a file's last line and renders nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Newline<'a> {
    value: Option<&'a str>,
    fake: bool,
}

impl<'a> Newline<'a> {
    pub fn new(value: &'a str) -> Result<Self> {
        match value {
            "\n" | "\r\n" | "\r" => Ok(Self {
                value: Some(value),
                fake: false,
            }),
            _ => Err(ValidationError::InvalidNewline(value.to_string())),
        }
    }

    /// The absent line ending at end of input.
    pub fn fake() -> Self {
        Self {
            value: None,
            fake: true,
        }
    }

    pub fn value(&self) -> Option<&'a str> {
        self.value
    }

    pub fn is_fake(&self) -> bool {
        self.fake
    }
}

impl<'a> Codegen<'a> for Newline<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        if self.fake {
            return;
        }
        let value = self.value.unwrap_or(state.default_newline);
        state.add_token(value);
    }
}

/// Everything after the last statement on a line: whitespace, an optional
/// comment and the newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrailingWhitespace<'a> {
    pub whitespace: SimpleWhitespace<'a>,
    pub comment: Option<Comment<'a>>,
    pub newline: Newline<'a>,
}

impl<'a> Codegen<'a> for TrailingWhitespace<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.whitespace.codegen(state);
        self.comment.codegen(state);
        self.newline.codegen(state);
    }
}

/// A line holding nothing but whitespace and possibly a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EmptyLine<'a> {
    pub whitespace: SimpleWhitespace<'a>,
    pub comment: Option<Comment<'a>>,
    pub newline: Newline<'a>,
}

impl<'a> EmptyLine<'a> {
    pub fn new(comment: Option<Comment<'a>>) -> Self {
        Self {
            comment,
            ..Default::default()
        }
    }

    pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
        self,
        transformer: &mut T,
    ) -> Result<Self> {
        Ok(Self {
            whitespace: visit_required(self.whitespace, "EmptyLine", "whitespace", transformer)?,
            ..self
        })
    }
}

impl<'a> Codegen<'a> for EmptyLine<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.whitespace.codegen(state);
        self.comment.codegen(state);
        self.newline.codegen(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<'a>(node: &impl Codegen<'a>) -> String {
        let mut state = CodegenState::default();
        node.codegen(&mut state);
        state.to_string()
    }

    #[test]
    fn test_simple_whitespace_validation() {
        assert!(SimpleWhitespace::new("").is_ok());
        assert!(SimpleWhitespace::new(" \t\x0c").is_ok());
        assert!(SimpleWhitespace::new(" \\\n  ").is_ok());
        assert!(SimpleWhitespace::new("\\\r\n").is_ok());
        assert_eq!(
            SimpleWhitespace::new(" \n"),
            Err(ValidationError::InvalidWhitespace(" \n".to_string()))
        );
        assert!(SimpleWhitespace::new("x").is_err());
        assert!(SimpleWhitespace::new("").is_ok_and(|ws| ws.is_empty()));
    }

    #[test]
    fn test_comment_validation() {
        assert!(Comment::new("# hola").is_ok());
        assert!(Comment::new("#").is_ok());
        assert!(Comment::new("hola").is_err());
        assert!(Comment::new("# a\n# b").is_err());
    }

    #[test]
    fn test_newline_rendering() {
        assert!(Newline::new("\n\n").is_err());
        assert_eq!(render(&Newline::new("\r\n").unwrap()), "\r\n");
        assert_eq!(render(&Newline::default()), "\n");
        assert_eq!(render(&Newline::fake()), "");

        let mut state = CodegenState {
            default_newline: "\r",
            ..Default::default()
        };
        Newline::default().codegen(&mut state);
        assert_eq!(state.to_string(), "\r");
    }

    #[test]
    fn test_lines_render_in_order() {
        let line = EmptyLine {
            whitespace: SimpleWhitespace::new("  ").unwrap(),
            comment: Some(Comment::new("# nota").unwrap()),
            newline: Newline::default(),
        };
        assert_eq!(render(&line), "  # nota\n");

        let trailing = TrailingWhitespace {
            whitespace: SimpleWhitespace::new(" ").unwrap(),
            comment: None,
            newline: Newline::fake(),
        };
        assert_eq!(render(&trailing), " ");
        assert_eq!(render(&EmptyLine::new(None)), "\n");
    }
}

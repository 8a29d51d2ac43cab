// Copyright (c) Meta Platforms, Inc. and affiliates.
// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Code generation state shared by a single rendering pass.
//!
//! [`CodegenState`] accumulates output tokens, tracks the current line and
//! column, and optionally records the source position of every line and small
//! statement it renders. A state belongs to exactly one pass: create a fresh
//! one per render.

use crate::nodes::traits::Span;
use crate::options::CodegenOptions;
use memchr::memchr2_iter;
use serde::Serialize;
use std::fmt;

/// A node that can write itself into a [`CodegenState`].
///
/// Small statements render through an inherent `codegen` method that also
/// takes the `default_semicolon` flag, since whether they need a separator
/// depends on their position in the line.
pub trait Codegen<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>);
}

impl<'a, T: Codegen<'a>> Codegen<'a> for Option<T> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        if let Some(s) = &self {
            s.codegen(state);
        }
    }
}

impl<'a, T: Codegen<'a>> Codegen<'a> for Box<T> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.as_ref().codegen(state);
    }
}

/// A line/column location in generated output.
///
/// Lines are 1-based, columns are 0-based byte offsets from the start of the
/// line. `\n`, `\r\n` and a lone `\r` each end a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CodePosition {
    pub line: usize,
    pub column: usize,
}

impl CodePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for CodePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start (inclusive) and end (exclusive) of a rendered region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CodeRange {
    pub start: CodePosition,
    pub end: CodePosition,
}

/// Where one node ended up in the generated output.
///
/// `kind` is the node type name, e.g. `"Raise"` or `"SimpleStatementLine"`.
/// For small statements the recorded region starts at the keyword and stops
/// before the semicolon, which owns the whitespace around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntacticPosition {
    pub kind: &'static str,
    pub span: Span,
    pub range: CodeRange,
}

/// Output accumulator for one rendering pass.
#[derive(Debug)]
pub struct CodegenState<'a> {
    pub tokens: String,
    pub default_newline: &'a str,
    pub default_semicolon: &'a str,
    pub(crate) line: usize,
    pub(crate) column: usize,
    // The last emitted byte was `\r`; a leading `\n` completes that break.
    pub(crate) after_cr: bool,
    pub(crate) positions: Option<Vec<SyntacticPosition>>,
}

impl Default for CodegenState<'_> {
    fn default() -> Self {
        Self {
            tokens: String::new(),
            default_newline: "\n",
            default_semicolon: "; ",
            line: 1,
            column: 0,
            after_cr: false,
            positions: None,
        }
    }
}

impl<'a> CodegenState<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state that follows `options`, falling back to
    /// `module_newline` when the options do not override the newline.
    pub fn from_options(options: &'a CodegenOptions, module_newline: &'a str) -> Self {
        let state = Self {
            default_newline: options.default_newline.as_deref().unwrap_or(module_newline),
            default_semicolon: &options.default_semicolon,
            ..Self::default()
        };
        if options.track_positions {
            state.with_positions()
        } else {
            state
        }
    }

    /// Enables syntactic position recording.
    pub fn with_positions(mut self) -> Self {
        self.positions = Some(Vec::new());
        self
    }

    pub fn is_tracking_positions(&self) -> bool {
        self.positions.is_some()
    }

    pub fn add_token(&mut self, tok: &str) {
        self.tokens.push_str(tok);
        let bytes = tok.as_bytes();
        let mut line_start = None;
        for idx in memchr2_iter(b'\n', b'\r', bytes) {
            let after_cr = match idx.checked_sub(1) {
                Some(prev) => bytes[prev] == b'\r',
                None => self.after_cr,
            };
            if bytes[idx] == b'\r' || !after_cr {
                self.line += 1;
            }
            line_start = Some(idx + 1);
        }
        match line_start {
            Some(start) => self.column = bytes.len() - start,
            None => self.column += bytes.len(),
        }
        if let Some(&last) = bytes.last() {
            self.after_cr = last == b'\r';
        }
    }

    /// Current end of the output.
    pub fn position(&self) -> CodePosition {
        CodePosition::new(self.line, self.column)
    }

    /// Runs `f` and records the region it rendered as a position of `kind`.
    ///
    /// Positions are stored in document order: a parent's entry precedes the
    /// entries of everything rendered inside it.
    pub fn record_syntactic_position<F>(&mut self, kind: &'static str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let start_offset = self.tokens.len() as u64;
        let start = self.position();
        let slot = self.positions.as_mut().map(|positions| {
            positions.push(SyntacticPosition {
                kind,
                span: Span::new(start_offset, start_offset),
                range: CodeRange { start, end: start },
            });
            positions.len() - 1
        });

        f(self);

        let end_offset = self.tokens.len() as u64;
        let end = self.position();
        if let (Some(index), Some(positions)) = (slot, self.positions.as_mut()) {
            positions[index].span.end = end_offset;
            positions[index].range.end = end;
        }
    }

    /// Recorded positions; empty unless tracking is enabled.
    pub fn positions(&self) -> &[SyntacticPosition] {
        self.positions.as_deref().unwrap_or_default()
    }

    pub fn take_positions(&mut self) -> Vec<SyntacticPosition> {
        self.positions.as_mut().map(std::mem::take).unwrap_or_default()
    }
}

impl fmt::Display for CodegenState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_token_tracks_line_and_column() {
        let mut state = CodegenState::default();
        assert_eq!(state.position(), CodePosition::new(1, 0));
        state.add_token("raise");
        assert_eq!(state.position(), CodePosition::new(1, 5));
        state.add_token(" x\n\n");
        assert_eq!(state.position(), CodePosition::new(3, 0));
        state.add_token("  break");
        assert_eq!(state.position(), CodePosition::new(3, 7));
        assert_eq!(state.to_string(), "raise x\n\n  break");
    }

    #[test]
    fn test_add_token_counts_cr_and_crlf_breaks() {
        let mut state = CodegenState::default();
        state.add_token("break\r");
        assert_eq!(state.position(), CodePosition::new(2, 0));
        state.add_token("raise x\r\n");
        assert_eq!(state.position(), CodePosition::new(3, 0));

        // A CRLF split across tokens is still one break.
        state.add_token("pass\r");
        state.add_token("\n");
        assert_eq!(state.position(), CodePosition::new(4, 0));
        state.add_token("\r\r  x");
        assert_eq!(state.position(), CodePosition::new(6, 3));
    }

    #[test]
    fn test_record_without_tracking_is_noop() {
        let mut state = CodegenState::default();
        state.record_syntactic_position("Break", |state| state.add_token("break"));
        assert!(state.positions().is_empty());
        assert_eq!(state.to_string(), "break");
    }

    #[test]
    fn test_record_nested_positions_in_document_order() {
        let mut state = CodegenState::default().with_positions();
        state.add_token("\n");
        state.record_syntactic_position("SimpleStatementLine", |state| {
            state.record_syntactic_position("Break", |state| state.add_token("break"));
            state.add_token("; ");
            state.record_syntactic_position("Pass", |state| state.add_token("pass"));
        });

        let positions = state.take_positions();
        let kinds: Vec<_> = positions.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec!["SimpleStatementLine", "Break", "Pass"]);
        assert_eq!(positions[0].span, Span::new(1, 12));
        assert_eq!(positions[1].span, Span::new(1, 6));
        assert_eq!(positions[2].range.start, CodePosition::new(2, 7));
        assert_eq!(positions[2].range.end, CodePosition::new(2, 11));
    }

    #[test]
    fn test_from_options() {
        let options = CodegenOptions::default().with_default_semicolon(";").with_positions();
        let state = CodegenState::from_options(&options, "\r\n");
        assert_eq!(state.default_semicolon, ";");
        assert_eq!(state.default_newline, "\r\n");
        assert!(state.is_tracking_positions());

        let options = CodegenOptions::default().with_default_newline("\n");
        let state = CodegenState::from_options(&options, "\r\n");
        assert_eq!(state.default_newline, "\n");
        assert!(!state.is_tracking_positions());
    }
}

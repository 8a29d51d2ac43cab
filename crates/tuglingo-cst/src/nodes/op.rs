// Copyright (c) Meta Platforms, Inc. and affiliates.
// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree

//! Punctuation tokens and the whitespace they own.

use crate::error::Result;
use crate::visitor::{visit_required, Transformer};
use crate::{Codegen, CodegenState, SimpleWhitespace};

/// `;` between or after small statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Semicolon<'a> {
    pub whitespace_before: SimpleWhitespace<'a>,
    pub whitespace_after: SimpleWhitespace<'a>,
}

impl<'a> Semicolon<'a> {
    pub fn new(
        whitespace_before: SimpleWhitespace<'a>,
        whitespace_after: SimpleWhitespace<'a>,
    ) -> Self {
        Self {
            whitespace_before,
            whitespace_after,
        }
    }

    pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
        self,
        transformer: &mut T,
    ) -> Result<Self> {
        let whitespace_before = visit_required(
            self.whitespace_before,
            "Semicolon",
            "whitespace_before",
            transformer,
        )?;
        let whitespace_after = visit_required(
            self.whitespace_after,
            "Semicolon",
            "whitespace_after",
            transformer,
        )?;
        Ok(Self::new(whitespace_before, whitespace_after))
    }
}

impl<'a> Codegen<'a> for Semicolon<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.whitespace_before.codegen(state);
        state.add_token(";");
        self.whitespace_after.codegen(state);
    }
}

/// `,` between call arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Comma<'a> {
    pub whitespace_before: SimpleWhitespace<'a>,
    pub whitespace_after: SimpleWhitespace<'a>,
}

impl<'a> Codegen<'a> for Comma<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.whitespace_before.codegen(state);
        state.add_token(",");
        self.whitespace_after.codegen(state);
    }
}

/// `.` in an attribute access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dot<'a> {
    pub whitespace_before: SimpleWhitespace<'a>,
    pub whitespace_after: SimpleWhitespace<'a>,
}

impl<'a> Codegen<'a> for Dot<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.whitespace_before.codegen(state);
        state.add_token(".");
        self.whitespace_after.codegen(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LeftParen<'a> {
    pub whitespace_after: SimpleWhitespace<'a>,
}

impl<'a> Codegen<'a> for LeftParen<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        state.add_token("(");
        self.whitespace_after.codegen(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RightParen<'a> {
    pub whitespace_before: SimpleWhitespace<'a>,
}

impl<'a> Codegen<'a> for RightParen<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.whitespace_before.codegen(state);
        state.add_token(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_own_surrounding_whitespace() {
        let space = SimpleWhitespace::new(" ").unwrap();
        let mut state = CodegenState::default();
        Semicolon::new(space, space).codegen(&mut state);
        Comma::default().codegen(&mut state);
        Dot {
            whitespace_before: SimpleWhitespace::default(),
            whitespace_after: space,
        }
        .codegen(&mut state);
        LeftParen { whitespace_after: space }.codegen(&mut state);
        RightParen::default().codegen(&mut state);
        assert_eq!(state.to_string(), " ; ,. ( )");
    }
}

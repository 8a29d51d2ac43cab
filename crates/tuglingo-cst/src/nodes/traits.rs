// Copyright (c) Meta Platforms, Inc. and affiliates.
// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree

//! Core traits and types shared by CST nodes.
//!
//! # Formatting slots
//!
//! A formatting slot either holds an explicit value or [`MaybeSentinel::Default`],
//! meaning "let the renderer choose". The two are distinguished by variant, never
//! by comparing against an empty value: an explicit empty [`SimpleWhitespace`]
//! asks for no space at all and is checked for keyword adjacency, while
//! `Default` lets the renderer insert a separator when one is needed.
//!
//! Optional semantic children (an expression that may or may not be present)
//! are plain [`Option`]s.
//!
//! [`SimpleWhitespace`]: crate::SimpleWhitespace

use crate::{Codegen, CodegenState, LeftParen, RightParen};
use serde::{Deserialize, Serialize};

// ============================================================================
// Spans
// ============================================================================

/// Byte offsets into generated or parsed text.
///
/// Spans are half-open intervals: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u64,
    /// End byte offset (exclusive).
    pub end: u64,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: u64, end: u64) -> Self {
        assert!(
            start <= end,
            "Span start ({}) must be <= end ({})",
            start,
            end
        );
        Span { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span contains another span entirely.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Slice `text` by this span.
    ///
    /// Returns `None` when the span is out of bounds or not on a char boundary.
    pub fn slice<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.start as usize..self.end as usize)
    }
}

// ============================================================================
// Sentinel
// ============================================================================

/// A formatting slot: explicit value or renderer default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaybeSentinel<T> {
    /// No explicit formatting; the renderer supplies a context-appropriate one.
    #[default]
    Default,
    Value(T),
}

impl<T> MaybeSentinel<T> {
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Self::Default => None,
            Self::Value(v) => Some(v),
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Default => None,
            Self::Value(v) => Some(v),
        }
    }

    /// `None` becomes [`MaybeSentinel::Default`].
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Default, Self::Value)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> MaybeSentinel<U> {
        match self {
            Self::Default => MaybeSentinel::Default,
            Self::Value(v) => MaybeSentinel::Value(f(v)),
        }
    }
}

impl<T> From<T> for MaybeSentinel<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

// ============================================================================
// Parentheses
// ============================================================================

pub trait ParenthesizedNode<'a> {
    fn lpar(&self) -> &[LeftParen<'a>];
    fn rpar(&self) -> &[RightParen<'a>];

    fn parenthesize<F>(&self, state: &mut CodegenState<'a>, f: F)
    where
        F: FnOnce(&mut CodegenState<'a>),
    {
        for lpar in self.lpar() {
            lpar.codegen(state);
        }
        f(state);
        for rpar in self.rpar() {
            rpar.codegen(state);
        }
    }

    /// Wraps the node in one more pair of parentheses, outermost.
    fn with_parens(self, left: LeftParen<'a>, right: RightParen<'a>) -> Self;
}

impl<'a, T: ParenthesizedNode<'a>> ParenthesizedNode<'a> for Box<T> {
    fn lpar(&self) -> &[LeftParen<'a>] {
        self.as_ref().lpar()
    }
    fn rpar(&self) -> &[RightParen<'a>] {
        self.as_ref().rpar()
    }
    fn parenthesize<F>(&self, state: &mut CodegenState<'a>, f: F)
    where
        F: FnOnce(&mut CodegenState<'a>),
    {
        self.as_ref().parenthesize(state, f)
    }
    fn with_parens(self, left: LeftParen<'a>, right: RightParen<'a>) -> Self {
        Box::new((*self).with_parens(left, right))
    }
}

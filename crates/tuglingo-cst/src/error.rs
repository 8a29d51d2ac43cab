// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Validation errors for CST node construction.
//!
//! Every node with an invariant is built through a fallible constructor. A
//! failed construction produces a [`ValidationError`] and no node at all, so an
//! invalid node is never observable. The same error surfaces when a
//! [`Transformer`](crate::Transformer) rebuilds a node from children that no
//! longer fit together.

use std::fmt;
use thiserror::Error;

/// Side of a word operator on which whitespace is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Before,
    After,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// A rule violated while constructing or reconstructing a node.
///
/// Messages name the rule that failed so they can be shown to a user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A child was supplied that only makes sense together with another one.
    #[error("Must have an '{required}' when specifying '{dependent}' on {node}.")]
    MissingDependency {
        node: &'static str,
        required: &'static str,
        dependent: &'static str,
    },

    /// An explicit empty whitespace would glue a keyword to an expression.
    #[error("Must have at least one space {side} '{keyword}'.")]
    MissingSpace { keyword: &'static str, side: Side },

    #[error("Invalid whitespace {0:?}: only spaces, tabs, form feeds and line continuations are allowed.")]
    InvalidWhitespace(String),

    #[error("Invalid comment {0:?}: a comment starts with '#' and cannot span lines.")]
    InvalidComment(String),

    #[error("Invalid newline {0:?}: expected \"\\n\", \"\\r\\n\" or \"\\r\".")]
    InvalidNewline(String),

    #[error("Invalid name {0:?}.")]
    InvalidName(String),

    #[error("Invalid integer literal {0:?}.")]
    InvalidInteger(String),

    #[error("Invalid string literal {0:?}.")]
    InvalidString(String),

    #[error("The attribute name of an Attribute cannot be parenthesized.")]
    ParenthesizedAttributeName,

    /// A transformer removed a child from a slot that cannot be empty.
    #[error("Cannot remove required child '{field}' of {node}.")]
    RequiredChildRemoved {
        node: &'static str,
        field: &'static str,
    },

    /// A transformer flattened several nodes into a slot that holds one.
    #[error("Cannot flatten nodes into the single-child slot '{field}' of {node}.")]
    FlattenIntoSingleSlot {
        node: &'static str,
        field: &'static str,
    },
}

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;

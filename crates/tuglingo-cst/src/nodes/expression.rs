// Copyright (c) Meta Platforms, Inc. and affiliates.
// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree

//! The expression subset that statements carry.
//!
//! Statements only need two things from an expression: to render it, and to
//! know whether it can sit directly against a keyword with no whitespace in
//! between. Both are provided by [`ExpressionNode`].

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, Side, ValidationError};
use crate::nodes::traits::{MaybeSentinel, ParenthesizedNode};
use crate::visitor::{visit_required, visit_sentinel, visit_sequence, Transformer};
use crate::{Codegen, CodegenState, Comma, Dot, LeftParen, RightParen, SimpleWhitespace};

static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A[0-9](_?[0-9])*\z").unwrap());
static SIMPLE_STRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\A(?i:rb|br|[rbu])?("([^"\\\r\n]|\\.)*"|'([^'\\\r\n]|\\.)*')\z"#).unwrap()
});

/// Which side of a word operator an expression sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionPosition {
    /// The expression ends where the keyword begins, e.g. `x` in `x from`.
    Left,
    /// The expression begins where the keyword ends, e.g. `x` in `raise x`.
    Right,
}

/// Capability shared by every expression a statement can hold.
pub trait ExpressionNode<'a>: Codegen<'a> {
    /// Returns whether this expression can touch a keyword on `position`
    /// without the two fusing into a single token.
    fn safe_to_use_with_word_operator(&self, position: ExpressionPosition) -> bool;
}

fn parenthesized_is_safe(
    lpar: &[LeftParen<'_>],
    rpar: &[RightParen<'_>],
    position: ExpressionPosition,
) -> bool {
    match position {
        ExpressionPosition::Right => !lpar.is_empty(),
        ExpressionPosition::Left => !rpar.is_empty(),
    }
}

macro_rules! parenthesized_node {
    ($($name:ident),* $(,)?) => {$(
        impl<'a> ParenthesizedNode<'a> for $name<'a> {
            fn lpar(&self) -> &[LeftParen<'a>] {
                &self.lpar
            }
            fn rpar(&self) -> &[RightParen<'a>] {
                &self.rpar
            }
            fn with_parens(mut self, left: LeftParen<'a>, right: RightParen<'a>) -> Self {
                self.lpar.insert(0, left);
                self.rpar.push(right);
                self
            }
        }
    )*};
}

parenthesized_node!(Name, Integer, SimpleString, Attribute, Call);

// ============================================================================
// Name
// ============================================================================

/// An identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name<'a> {
    value: &'a str,
    lpar: Vec<LeftParen<'a>>,
    rpar: Vec<RightParen<'a>>,
}

impl<'a> Name<'a> {
    pub fn new(value: &'a str) -> Result<Self> {
        let mut chars = value.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c == '_' || c.is_alphabetic())
            && chars.all(|c| c == '_' || c.is_alphanumeric());
        if !valid {
            return Err(ValidationError::InvalidName(value.to_string()));
        }
        Ok(Self::new_unchecked(value))
    }

    pub(crate) fn new_unchecked(value: &'a str) -> Self {
        Self {
            value,
            lpar: Vec::new(),
            rpar: Vec::new(),
        }
    }

    pub fn value(&self) -> &'a str {
        self.value
    }
}

impl<'a> Codegen<'a> for Name<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.parenthesize(state, |state| state.add_token(self.value));
    }
}

impl<'a> ExpressionNode<'a> for Name<'a> {
    fn safe_to_use_with_word_operator(&self, position: ExpressionPosition) -> bool {
        parenthesized_is_safe(&self.lpar, &self.rpar, position)
    }
}

// ============================================================================
// Literals
// ============================================================================

/// A decimal integer literal, optionally with `_` digit separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Integer<'a> {
    value: &'a str,
    lpar: Vec<LeftParen<'a>>,
    rpar: Vec<RightParen<'a>>,
}

impl<'a> Integer<'a> {
    pub fn new(value: &'a str) -> Result<Self> {
        if !INTEGER_RE.is_match(value) {
            return Err(ValidationError::InvalidInteger(value.to_string()));
        }
        Ok(Self::new_unchecked(value))
    }

    pub(crate) fn new_unchecked(value: &'a str) -> Self {
        Self {
            value,
            lpar: Vec::new(),
            rpar: Vec::new(),
        }
    }

    pub fn value(&self) -> &'a str {
        self.value
    }
}

impl<'a> Codegen<'a> for Integer<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.parenthesize(state, |state| state.add_token(self.value));
    }
}

impl<'a> ExpressionNode<'a> for Integer<'a> {
    fn safe_to_use_with_word_operator(&self, position: ExpressionPosition) -> bool {
        match position {
            // Digits end the token, so `1from` still splits into two.
            ExpressionPosition::Left => true,
            ExpressionPosition::Right => parenthesized_is_safe(&self.lpar, &self.rpar, position),
        }
    }
}

/// A single-line string literal with an optional `r`, `b` or `u` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleString<'a> {
    value: &'a str,
    lpar: Vec<LeftParen<'a>>,
    rpar: Vec<RightParen<'a>>,
}

impl<'a> SimpleString<'a> {
    pub fn new(value: &'a str) -> Result<Self> {
        if !SIMPLE_STRING_RE.is_match(value) {
            return Err(ValidationError::InvalidString(value.to_string()));
        }
        Ok(Self::new_unchecked(value))
    }

    pub(crate) fn new_unchecked(value: &'a str) -> Self {
        Self {
            value,
            lpar: Vec::new(),
            rpar: Vec::new(),
        }
    }

    /// The literal including prefix and quotes.
    pub fn value(&self) -> &'a str {
        self.value
    }

    /// Everything before the opening quote.
    pub fn prefix(&self) -> &'a str {
        let end = self.value.find(['"', '\'']).unwrap_or(0);
        &self.value[..end]
    }
}

impl<'a> Codegen<'a> for SimpleString<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.parenthesize(state, |state| state.add_token(self.value));
    }
}

impl<'a> ExpressionNode<'a> for SimpleString<'a> {
    fn safe_to_use_with_word_operator(&self, position: ExpressionPosition) -> bool {
        match position {
            // Always ends with a quote.
            ExpressionPosition::Left => true,
            ExpressionPosition::Right => !self.lpar.is_empty() || self.prefix().is_empty(),
        }
    }
}

// ============================================================================
// Attribute and Call
// ============================================================================

/// `value.attr`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute<'a> {
    value: Box<Expression<'a>>,
    dot: Dot<'a>,
    attr: Name<'a>,
    lpar: Vec<LeftParen<'a>>,
    rpar: Vec<RightParen<'a>>,
}

impl<'a> Attribute<'a> {
    pub fn new(value: Expression<'a>, dot: Dot<'a>, attr: Name<'a>) -> Result<Self> {
        if !attr.lpar.is_empty() || !attr.rpar.is_empty() {
            return Err(ValidationError::ParenthesizedAttributeName);
        }
        Ok(Self {
            value: Box::new(value),
            dot,
            attr,
            lpar: Vec::new(),
            rpar: Vec::new(),
        })
    }

    pub fn value(&self) -> &Expression<'a> {
        &self.value
    }

    pub fn dot(&self) -> &Dot<'a> {
        &self.dot
    }

    pub fn attr(&self) -> &Name<'a> {
        &self.attr
    }

    pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
        self,
        transformer: &mut T,
    ) -> Result<Self> {
        let value = visit_required(*self.value, "Attribute", "value", transformer)?;
        let mut node = Self::new(value, self.dot, self.attr)?;
        node.lpar = self.lpar;
        node.rpar = self.rpar;
        Ok(node)
    }
}

impl<'a> Codegen<'a> for Attribute<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.parenthesize(state, |state| {
            self.value.codegen(state);
            self.dot.codegen(state);
            self.attr.codegen(state);
        });
    }
}

impl<'a> ExpressionNode<'a> for Attribute<'a> {
    fn safe_to_use_with_word_operator(&self, position: ExpressionPosition) -> bool {
        match position {
            ExpressionPosition::Right => {
                !self.lpar.is_empty() || self.value.safe_to_use_with_word_operator(position)
            }
            ExpressionPosition::Left => !self.rpar.is_empty(),
        }
    }
}

/// `func(args)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Call<'a> {
    func: Box<Expression<'a>>,
    args: Vec<Arg<'a>>,
    whitespace_after_func: SimpleWhitespace<'a>,
    whitespace_before_args: SimpleWhitespace<'a>,
    lpar: Vec<LeftParen<'a>>,
    rpar: Vec<RightParen<'a>>,
}

impl<'a> Call<'a> {
    pub fn new(func: Expression<'a>, args: Vec<Arg<'a>>) -> Self {
        Self {
            func: Box::new(func),
            args,
            whitespace_after_func: SimpleWhitespace::default(),
            whitespace_before_args: SimpleWhitespace::default(),
            lpar: Vec::new(),
            rpar: Vec::new(),
        }
    }

    /// Whitespace between the callee and `(`.
    #[must_use]
    pub fn with_whitespace_after_func(mut self, whitespace: SimpleWhitespace<'a>) -> Self {
        self.whitespace_after_func = whitespace;
        self
    }

    /// Whitespace between `(` and the first argument.
    #[must_use]
    pub fn with_whitespace_before_args(mut self, whitespace: SimpleWhitespace<'a>) -> Self {
        self.whitespace_before_args = whitespace;
        self
    }

    pub fn func(&self) -> &Expression<'a> {
        &self.func
    }

    pub fn args(&self) -> &[Arg<'a>] {
        &self.args
    }

    pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
        self,
        transformer: &mut T,
    ) -> Result<Self> {
        let func = visit_required(*self.func, "Call", "func", transformer)?;
        let args = visit_sequence(self.args, transformer)?;
        Ok(Self {
            func: Box::new(func),
            args,
            ..self
        })
    }
}

impl<'a> Codegen<'a> for Call<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.parenthesize(state, |state| {
            self.func.codegen(state);
            self.whitespace_after_func.codegen(state);
            state.add_token("(");
            self.whitespace_before_args.codegen(state);
            let len = self.args.len();
            for (i, arg) in self.args.iter().enumerate() {
                arg.codegen(state, i + 1 < len);
            }
            state.add_token(")");
        });
    }
}

impl<'a> ExpressionNode<'a> for Call<'a> {
    fn safe_to_use_with_word_operator(&self, position: ExpressionPosition) -> bool {
        match position {
            // Always ends with `)`.
            ExpressionPosition::Left => true,
            ExpressionPosition::Right => {
                !self.lpar.is_empty() || self.func.safe_to_use_with_word_operator(position)
            }
        }
    }
}

/// A positional call argument and the comma that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arg<'a> {
    pub value: Expression<'a>,
    pub comma: MaybeSentinel<Comma<'a>>,
    pub whitespace_after_arg: SimpleWhitespace<'a>,
}

impl<'a> Arg<'a> {
    pub fn new(value: Expression<'a>) -> Self {
        Self {
            value,
            comma: MaybeSentinel::Default,
            whitespace_after_arg: SimpleWhitespace::default(),
        }
    }

    /// A `Default` comma renders as `", "` when another argument follows.
    pub fn codegen(&self, state: &mut CodegenState<'a>, default_comma: bool) {
        self.value.codegen(state);
        match &self.comma {
            MaybeSentinel::Value(comma) => comma.codegen(state),
            MaybeSentinel::Default if default_comma => state.add_token(", "),
            MaybeSentinel::Default => {}
        }
        self.whitespace_after_arg.codegen(state);
    }

    pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
        self,
        transformer: &mut T,
    ) -> Result<Self> {
        Ok(Self {
            value: visit_required(self.value, "Arg", "value", transformer)?,
            ..self
        })
    }
}

// ============================================================================
// Expression
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression<'a> {
    Name(Name<'a>),
    Integer(Integer<'a>),
    SimpleString(SimpleString<'a>),
    Attribute(Attribute<'a>),
    Call(Call<'a>),
}

macro_rules! expression_dispatch {
    ($self:expr, $node:ident => $body:expr) => {
        match $self {
            Expression::Name($node) => $body,
            Expression::Integer($node) => $body,
            Expression::SimpleString($node) => $body,
            Expression::Attribute($node) => $body,
            Expression::Call($node) => $body,
        }
    };
}

impl<'a> Expression<'a> {
    pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
        self,
        transformer: &mut T,
    ) -> Result<Self> {
        Ok(match self {
            Self::Attribute(node) => Self::Attribute(node.visit_and_replace_children(transformer)?),
            Self::Call(node) => Self::Call(node.visit_and_replace_children(transformer)?),
            leaf => leaf,
        })
    }
}

impl<'a> Codegen<'a> for Expression<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        expression_dispatch!(self, node => node.codegen(state))
    }
}

impl<'a> ExpressionNode<'a> for Expression<'a> {
    fn safe_to_use_with_word_operator(&self, position: ExpressionPosition) -> bool {
        expression_dispatch!(self, node => node.safe_to_use_with_word_operator(position))
    }
}

impl<'a> ParenthesizedNode<'a> for Expression<'a> {
    fn lpar(&self) -> &[LeftParen<'a>] {
        expression_dispatch!(self, node => node.lpar())
    }
    fn rpar(&self) -> &[RightParen<'a>] {
        expression_dispatch!(self, node => node.rpar())
    }
    fn with_parens(self, left: LeftParen<'a>, right: RightParen<'a>) -> Self {
        match self {
            Self::Name(node) => Self::Name(node.with_parens(left, right)),
            Self::Integer(node) => Self::Integer(node.with_parens(left, right)),
            Self::SimpleString(node) => Self::SimpleString(node.with_parens(left, right)),
            Self::Attribute(node) => Self::Attribute(node.with_parens(left, right)),
            Self::Call(node) => Self::Call(node.with_parens(left, right)),
        }
    }
}

macro_rules! expression_from {
    ($($name:ident),* $(,)?) => {$(
        impl<'a> From<$name<'a>> for Expression<'a> {
            fn from(node: $name<'a>) -> Self {
                Self::$name(node)
            }
        }
    )*};
}

expression_from!(Name, Integer, SimpleString, Attribute, Call);

// ============================================================================
// FromClause
// ============================================================================

/// The `from <item>` tail of a raise-like statement.
///
/// `whitespace_before_from` is a formatting slot: when it is
/// [`MaybeSentinel::Default`] the owning statement decides what to render.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FromClause<'a> {
    item: Expression<'a>,
    whitespace_before_from: MaybeSentinel<SimpleWhitespace<'a>>,
    whitespace_after_from: SimpleWhitespace<'a>,
}

impl<'a> FromClause<'a> {
    pub fn new(
        item: Expression<'a>,
        whitespace_before_from: MaybeSentinel<SimpleWhitespace<'a>>,
        whitespace_after_from: SimpleWhitespace<'a>,
    ) -> Result<Self> {
        if whitespace_after_from.is_empty()
            && !item.safe_to_use_with_word_operator(ExpressionPosition::Right)
        {
            return Err(ValidationError::MissingSpace {
                keyword: "from",
                side: Side::After,
            });
        }
        Ok(Self {
            item,
            whitespace_before_from,
            whitespace_after_from,
        })
    }

    /// `from <item>` with default spacing: a single space after `from`.
    pub fn of(item: Expression<'a>) -> Self {
        Self {
            item,
            whitespace_before_from: MaybeSentinel::Default,
            whitespace_after_from: SimpleWhitespace::new_unchecked(" "),
        }
    }

    pub fn item(&self) -> &Expression<'a> {
        &self.item
    }

    pub fn whitespace_before_from(&self) -> &MaybeSentinel<SimpleWhitespace<'a>> {
        &self.whitespace_before_from
    }

    pub fn whitespace_after_from(&self) -> &SimpleWhitespace<'a> {
        &self.whitespace_after_from
    }

    /// Renders the clause; a `Default` leading slot renders as `default_space`.
    pub fn codegen(&self, state: &mut CodegenState<'a>, default_space: &'a str) {
        match &self.whitespace_before_from {
            MaybeSentinel::Value(whitespace) => whitespace.codegen(state),
            MaybeSentinel::Default => state.add_token(default_space),
        }
        state.add_token("from");
        self.whitespace_after_from.codegen(state);
        self.item.codegen(state);
    }

    pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
        self,
        transformer: &mut T,
    ) -> Result<Self> {
        let whitespace_before_from = visit_sentinel(
            self.whitespace_before_from,
            "FromClause",
            "whitespace_before_from",
            transformer,
        )?;
        let whitespace_after_from = visit_required(
            self.whitespace_after_from,
            "FromClause",
            "whitespace_after_from",
            transformer,
        )?;
        let item = visit_required(self.item, "FromClause", "item", transformer)?;
        Self::new(item, whitespace_before_from, whitespace_after_from)
    }
}

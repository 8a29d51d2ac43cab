// Copyright (c) Meta Platforms, Inc. and affiliates.
// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree

//! Simple statements and the lines that hold them.
//!
//! Each keyword statement exists once per [`Language`]: `Raise` and `Aumenta`
//! have the same shape and the same rules and differ only in their keyword.
//! Fields are private. Nodes with invariants are built through a fallible
//! `new`, and every edit that could break an invariant goes back through it.

use crate::error::{Result, Side, ValidationError};
use crate::nodes::expression::{Expression, ExpressionNode, ExpressionPosition, FromClause};
use crate::nodes::traits::MaybeSentinel;
use crate::options::{Language, StatementKind};
use crate::visitor::{visit_optional, visit_required, visit_sentinel, visit_sequence, Transformer};
use crate::{Codegen, CodegenState, EmptyLine, Semicolon, SimpleWhitespace, TrailingWhitespace};

fn codegen_semicolon<'a>(
    semicolon: &MaybeSentinel<Semicolon<'a>>,
    state: &mut CodegenState<'a>,
    default_semicolon: bool,
) {
    match semicolon {
        MaybeSentinel::Value(semicolon) => semicolon.codegen(state),
        MaybeSentinel::Default if default_semicolon => {
            let separator = state.default_semicolon;
            state.add_token(separator);
        }
        MaybeSentinel::Default => {}
    }
}

/// A `Default` slot renders one space, but only if something follows the keyword.
fn codegen_keyword_whitespace<'a>(
    whitespace: &MaybeSentinel<SimpleWhitespace<'a>>,
    has_child: bool,
    state: &mut CodegenState<'a>,
) {
    match whitespace {
        MaybeSentinel::Value(whitespace) => whitespace.codegen(state),
        MaybeSentinel::Default if has_child => state.add_token(" "),
        MaybeSentinel::Default => {}
    }
}

fn is_explicitly_empty(whitespace: &MaybeSentinel<SimpleWhitespace<'_>>) -> bool {
    whitespace.as_value().is_some_and(SimpleWhitespace::is_empty)
}

// ============================================================================
// Keyword-only statements
// ============================================================================

macro_rules! keyword_statement {
    ($($(#[$attr:meta])* $name:ident => $keyword:literal;)*) => {$(
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
        pub struct $name<'a> {
            semicolon: MaybeSentinel<Semicolon<'a>>,
        }

        impl<'a> $name<'a> {
            pub const KEYWORD: &'static str = $keyword;

            pub fn new(semicolon: MaybeSentinel<Semicolon<'a>>) -> Self {
                Self { semicolon }
            }

            pub fn semicolon(&self) -> &MaybeSentinel<Semicolon<'a>> {
                &self.semicolon
            }

            #[must_use]
            pub fn with_semicolon(self, semicolon: MaybeSentinel<Semicolon<'a>>) -> Self {
                Self { semicolon }
            }

            pub fn into_semicolon(self) -> MaybeSentinel<Semicolon<'a>> {
                self.semicolon
            }

            pub fn codegen(&self, state: &mut CodegenState<'a>, default_semicolon: bool) {
                state.record_syntactic_position(stringify!($name), |state| {
                    state.add_token(Self::KEYWORD);
                });
                codegen_semicolon(&self.semicolon, state, default_semicolon);
            }

            pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
                self,
                transformer: &mut T,
            ) -> Result<Self> {
                let semicolon =
                    visit_sentinel(self.semicolon, stringify!($name), "semicolon", transformer)?;
                Ok(Self::new(semicolon))
            }
        }
    )*};
}

keyword_statement! {
    /// `pass`
    Pass => "pass";
    /// `break`
    Break => "break";
    /// `continue`
    Continue => "continue";
    /// `rompe`, the Spanish [`Break`].
    Rompe => "rompe";
    /// `continúa`, the Spanish [`Continue`].
    Continua => "continúa";
}

// ============================================================================
// Return-like statements
// ============================================================================

/// The children and formatting slots of a return-like statement.
///
/// Shared by [`Return`] and [`Devuelve`] so one can be rebuilt as the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ReturnParts<'a> {
    pub value: Option<Expression<'a>>,
    pub whitespace_after_keyword: MaybeSentinel<SimpleWhitespace<'a>>,
    pub semicolon: MaybeSentinel<Semicolon<'a>>,
}

macro_rules! value_statement {
    ($($(#[$attr:meta])* $name:ident => $keyword:literal, $whitespace:ident;)*) => {$(
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
        pub struct $name<'a> {
            value: Option<Expression<'a>>,
            $whitespace: MaybeSentinel<SimpleWhitespace<'a>>,
            semicolon: MaybeSentinel<Semicolon<'a>>,
        }

        impl<'a> $name<'a> {
            pub const KEYWORD: &'static str = $keyword;

            /// Fails when an explicit empty whitespace would glue the keyword
            /// to a value that cannot touch it.
            pub fn new(
                value: Option<Expression<'a>>,
                $whitespace: MaybeSentinel<SimpleWhitespace<'a>>,
                semicolon: MaybeSentinel<Semicolon<'a>>,
            ) -> Result<Self> {
                let node = Self {
                    value,
                    $whitespace,
                    semicolon,
                };
                node.validate()?;
                Ok(node)
            }

            pub fn from_parts(parts: ReturnParts<'a>) -> Result<Self> {
                Self::new(parts.value, parts.whitespace_after_keyword, parts.semicolon)
            }

            pub fn into_parts(self) -> ReturnParts<'a> {
                ReturnParts {
                    value: self.value,
                    whitespace_after_keyword: self.$whitespace,
                    semicolon: self.semicolon,
                }
            }

            fn validate(&self) -> Result<()> {
                if let Some(value) = &self.value {
                    if is_explicitly_empty(&self.$whitespace)
                        && !value.safe_to_use_with_word_operator(ExpressionPosition::Right)
                    {
                        return Err(ValidationError::MissingSpace {
                            keyword: Self::KEYWORD,
                            side: Side::After,
                        });
                    }
                }
                Ok(())
            }

            pub fn value(&self) -> Option<&Expression<'a>> {
                self.value.as_ref()
            }

            pub fn $whitespace(&self) -> &MaybeSentinel<SimpleWhitespace<'a>> {
                &self.$whitespace
            }

            pub fn semicolon(&self) -> &MaybeSentinel<Semicolon<'a>> {
                &self.semicolon
            }

            pub fn with_value(self, value: Option<Expression<'a>>) -> Result<Self> {
                Self::new(value, self.$whitespace, self.semicolon)
            }

            #[must_use]
            pub fn with_semicolon(self, semicolon: MaybeSentinel<Semicolon<'a>>) -> Self {
                Self { semicolon, ..self }
            }

            pub fn codegen(&self, state: &mut CodegenState<'a>, default_semicolon: bool) {
                state.record_syntactic_position(stringify!($name), |state| {
                    state.add_token(Self::KEYWORD);
                    codegen_keyword_whitespace(&self.$whitespace, self.value.is_some(), state);
                    self.value.codegen(state);
                });
                codegen_semicolon(&self.semicolon, state, default_semicolon);
            }

            pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
                self,
                transformer: &mut T,
            ) -> Result<Self> {
                let node = stringify!($name);
                let $whitespace =
                    visit_sentinel(self.$whitespace, node, stringify!($whitespace), transformer)?;
                let value = visit_optional(self.value, node, "value", transformer)?;
                let semicolon = visit_sentinel(self.semicolon, node, "semicolon", transformer)?;
                Self::new(value, $whitespace, semicolon)
            }
        }
    )*};
}

value_statement! {
    /// `return [value]`
    ///
    /// ```
    /// use tuglingo_cst::{MaybeSentinel, Return, SimpleWhitespace};
    ///
    /// let value = tuglingo_cst::parse_expression("x").unwrap();
    /// let glued = Return::new(
    ///     Some(value),
    ///     MaybeSentinel::Value(SimpleWhitespace::new("").unwrap()),
    ///     MaybeSentinel::Default,
    /// );
    /// assert_eq!(
    ///     glued.unwrap_err().to_string(),
    ///     "Must have at least one space after 'return'."
    /// );
    /// ```
    Return => "return", whitespace_after_return;
    /// `devuelve [value]`, the Spanish [`Return`].
    Devuelve => "devuelve", whitespace_after_devuelve;
}

// ============================================================================
// Raise-like statements
// ============================================================================

/// The children and formatting slots of a raise-like statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RaiseParts<'a> {
    pub exc: Option<Expression<'a>>,
    pub cause: Option<FromClause<'a>>,
    pub whitespace_after_keyword: MaybeSentinel<SimpleWhitespace<'a>>,
    pub semicolon: MaybeSentinel<Semicolon<'a>>,
}

macro_rules! raise_statement {
    ($($(#[$attr:meta])* $name:ident => $keyword:literal, $whitespace:ident;)*) => {$(
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
        pub struct $name<'a> {
            exc: Option<Expression<'a>>,
            cause: Option<FromClause<'a>>,
            $whitespace: MaybeSentinel<SimpleWhitespace<'a>>,
            semicolon: MaybeSentinel<Semicolon<'a>>,
        }

        impl<'a> $name<'a> {
            pub const KEYWORD: &'static str = $keyword;

            pub fn new(
                exc: Option<Expression<'a>>,
                cause: Option<FromClause<'a>>,
                $whitespace: MaybeSentinel<SimpleWhitespace<'a>>,
                semicolon: MaybeSentinel<Semicolon<'a>>,
            ) -> Result<Self> {
                let node = Self {
                    exc,
                    cause,
                    $whitespace,
                    semicolon,
                };
                node.validate()?;
                Ok(node)
            }

            pub fn from_parts(parts: RaiseParts<'a>) -> Result<Self> {
                Self::new(parts.exc, parts.cause, parts.whitespace_after_keyword, parts.semicolon)
            }

            pub fn into_parts(self) -> RaiseParts<'a> {
                RaiseParts {
                    exc: self.exc,
                    cause: self.cause,
                    whitespace_after_keyword: self.$whitespace,
                    semicolon: self.semicolon,
                }
            }

            fn validate(&self) -> Result<()> {
                let Some(exc) = &self.exc else {
                    if self.cause.is_some() {
                        return Err(ValidationError::MissingDependency {
                            node: stringify!($name),
                            required: "exc",
                            dependent: "cause",
                        });
                    }
                    return Ok(());
                };
                if is_explicitly_empty(&self.$whitespace)
                    && !exc.safe_to_use_with_word_operator(ExpressionPosition::Right)
                {
                    return Err(ValidationError::MissingSpace {
                        keyword: Self::KEYWORD,
                        side: Side::After,
                    });
                }
                if let Some(cause) = &self.cause {
                    if is_explicitly_empty(cause.whitespace_before_from())
                        && !exc.safe_to_use_with_word_operator(ExpressionPosition::Left)
                    {
                        return Err(ValidationError::MissingSpace {
                            keyword: "from",
                            side: Side::Before,
                        });
                    }
                }
                Ok(())
            }

            pub fn exc(&self) -> Option<&Expression<'a>> {
                self.exc.as_ref()
            }

            pub fn cause(&self) -> Option<&FromClause<'a>> {
                self.cause.as_ref()
            }

            pub fn $whitespace(&self) -> &MaybeSentinel<SimpleWhitespace<'a>> {
                &self.$whitespace
            }

            pub fn semicolon(&self) -> &MaybeSentinel<Semicolon<'a>> {
                &self.semicolon
            }

            pub fn with_exc(self, exc: Option<Expression<'a>>) -> Result<Self> {
                Self::new(exc, self.cause, self.$whitespace, self.semicolon)
            }

            pub fn with_cause(self, cause: Option<FromClause<'a>>) -> Result<Self> {
                Self::new(self.exc, cause, self.$whitespace, self.semicolon)
            }

            #[must_use]
            pub fn with_semicolon(self, semicolon: MaybeSentinel<Semicolon<'a>>) -> Self {
                Self { semicolon, ..self }
            }

            pub fn codegen(&self, state: &mut CodegenState<'a>, default_semicolon: bool) {
                state.record_syntactic_position(stringify!($name), |state| {
                    state.add_token(Self::KEYWORD);
                    codegen_keyword_whitespace(&self.$whitespace, self.exc.is_some(), state);
                    self.exc.codegen(state);
                    if let Some(cause) = &self.cause {
                        cause.codegen(state, " ");
                    }
                });
                codegen_semicolon(&self.semicolon, state, default_semicolon);
            }

            pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
                self,
                transformer: &mut T,
            ) -> Result<Self> {
                let node = stringify!($name);
                let $whitespace =
                    visit_sentinel(self.$whitespace, node, stringify!($whitespace), transformer)?;
                let exc = visit_optional(self.exc, node, "exc", transformer)?;
                let cause = visit_optional(self.cause, node, "cause", transformer)?;
                let semicolon = visit_sentinel(self.semicolon, node, "semicolon", transformer)?;
                Self::new(exc, cause, $whitespace, semicolon)
            }
        }
    )*};
}

raise_statement! {
    /// `raise [exc [from cause]]`
    ///
    /// A cause without an exception is rejected:
    ///
    /// ```
    /// use tuglingo_cst::{FromClause, MaybeSentinel, Raise};
    ///
    /// let cause = FromClause::of(tuglingo_cst::parse_expression("e").unwrap());
    /// let err = Raise::new(None, Some(cause), MaybeSentinel::Default, MaybeSentinel::Default)
    ///     .unwrap_err();
    /// assert_eq!(err.to_string(), "Must have an 'exc' when specifying 'cause' on Raise.");
    /// ```
    Raise => "raise", whitespace_after_raise;
    /// `aumenta [exc [from cause]]`, the Spanish [`Raise`].
    Aumenta => "aumenta", whitespace_after_aumenta;
}

// ============================================================================
// Expression statements
// ============================================================================

/// An expression on its own, e.g. a call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expr<'a> {
    value: Expression<'a>,
    semicolon: MaybeSentinel<Semicolon<'a>>,
}

impl<'a> Expr<'a> {
    pub fn new(value: Expression<'a>) -> Self {
        Self {
            value,
            semicolon: MaybeSentinel::Default,
        }
    }

    pub fn value(&self) -> &Expression<'a> {
        &self.value
    }

    pub fn semicolon(&self) -> &MaybeSentinel<Semicolon<'a>> {
        &self.semicolon
    }

    #[must_use]
    pub fn with_semicolon(self, semicolon: MaybeSentinel<Semicolon<'a>>) -> Self {
        Self { semicolon, ..self }
    }

    pub fn codegen(&self, state: &mut CodegenState<'a>, default_semicolon: bool) {
        state.record_syntactic_position("Expr", |state| self.value.codegen(state));
        codegen_semicolon(&self.semicolon, state, default_semicolon);
    }

    pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
        self,
        transformer: &mut T,
    ) -> Result<Self> {
        let value = visit_required(self.value, "Expr", "value", transformer)?;
        let semicolon = visit_sentinel(self.semicolon, "Expr", "semicolon", transformer)?;
        Ok(Self { value, semicolon })
    }
}

// ============================================================================
// SmallStatement
// ============================================================================

/// Every statement that can share a line with others.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SmallStatement<'a> {
    Pass(Pass<'a>),
    Expr(Expr<'a>),
    Break(Break<'a>),
    Continue(Continue<'a>),
    Return(Return<'a>),
    Raise(Raise<'a>),
    Rompe(Rompe<'a>),
    Continua(Continua<'a>),
    Devuelve(Devuelve<'a>),
    Aumenta(Aumenta<'a>),
}

macro_rules! small_statement_dispatch {
    ($self:expr, $node:ident => $body:expr) => {
        match $self {
            SmallStatement::Pass($node) => $body,
            SmallStatement::Expr($node) => $body,
            SmallStatement::Break($node) => $body,
            SmallStatement::Continue($node) => $body,
            SmallStatement::Return($node) => $body,
            SmallStatement::Raise($node) => $body,
            SmallStatement::Rompe($node) => $body,
            SmallStatement::Continua($node) => $body,
            SmallStatement::Devuelve($node) => $body,
            SmallStatement::Aumenta($node) => $body,
        }
    };
}

impl<'a> SmallStatement<'a> {
    /// Renders the statement. With `default_semicolon`, a `Default` semicolon
    /// renders as the state's default separator.
    pub fn codegen(&self, state: &mut CodegenState<'a>, default_semicolon: bool) {
        small_statement_dispatch!(self, node => node.codegen(state, default_semicolon))
    }

    pub fn semicolon(&self) -> &MaybeSentinel<Semicolon<'a>> {
        small_statement_dispatch!(self, node => node.semicolon())
    }

    #[must_use]
    pub fn with_semicolon(self, semicolon: MaybeSentinel<Semicolon<'a>>) -> Self {
        small_statement_dispatch!(self, node => node.with_semicolon(semicolon).into())
    }

    /// The node type name, as used in recorded positions.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Pass(_) => "Pass",
            Self::Expr(_) => "Expr",
            Self::Break(_) => "Break",
            Self::Continue(_) => "Continue",
            Self::Return(_) => "Return",
            Self::Raise(_) => "Raise",
            Self::Rompe(_) => "Rompe",
            Self::Continua(_) => "Continua",
            Self::Devuelve(_) => "Devuelve",
            Self::Aumenta(_) => "Aumenta",
        }
    }

    /// The keyword language and statement shape, for language-specific
    /// statements.
    pub fn kind(&self) -> Option<(Language, StatementKind)> {
        match self {
            Self::Pass(_) | Self::Expr(_) => None,
            Self::Break(_) => Some((Language::English, StatementKind::Break)),
            Self::Continue(_) => Some((Language::English, StatementKind::Continue)),
            Self::Return(_) => Some((Language::English, StatementKind::Return)),
            Self::Raise(_) => Some((Language::English, StatementKind::Raise)),
            Self::Rompe(_) => Some((Language::Spanish, StatementKind::Break)),
            Self::Continua(_) => Some((Language::Spanish, StatementKind::Continue)),
            Self::Devuelve(_) => Some((Language::Spanish, StatementKind::Return)),
            Self::Aumenta(_) => Some((Language::Spanish, StatementKind::Raise)),
        }
    }

    pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
        self,
        transformer: &mut T,
    ) -> Result<Self> {
        Ok(small_statement_dispatch!(self, node => {
            node.visit_and_replace_children(transformer)?.into()
        }))
    }
}

macro_rules! small_statement_from {
    ($($name:ident),* $(,)?) => {$(
        impl<'a> From<$name<'a>> for SmallStatement<'a> {
            fn from(node: $name<'a>) -> Self {
                Self::$name(node)
            }
        }
    )*};
}

small_statement_from!(
    Pass, Expr, Break, Continue, Return, Raise, Rompe, Continua, Devuelve, Aumenta
);

// ============================================================================
// SimpleStatementLine
// ============================================================================

/// One or more small statements on a single line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SimpleStatementLine<'a> {
    /// Sequence of small statements. Every statement except the last renders
    /// a separator, explicit or default.
    pub body: Vec<SmallStatement<'a>>,

    /// Sequence of empty lines appearing before this simple statement line.
    pub leading_lines: Vec<EmptyLine<'a>>,

    /// Any optional trailing comment and the final newline.
    pub trailing_whitespace: TrailingWhitespace<'a>,
}

impl<'a> SimpleStatementLine<'a> {
    pub fn new(body: Vec<SmallStatement<'a>>) -> Self {
        Self {
            body,
            ..Default::default()
        }
    }

    pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
        self,
        transformer: &mut T,
    ) -> Result<Self> {
        let leading_lines = visit_sequence(self.leading_lines, transformer)?;
        let body = visit_sequence(self.body, transformer)?;
        Ok(Self {
            body,
            leading_lines,
            trailing_whitespace: self.trailing_whitespace,
        })
    }
}

impl<'a> Codegen<'a> for SimpleStatementLine<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        for line in &self.leading_lines {
            line.codegen(state);
        }
        state.record_syntactic_position("SimpleStatementLine", |state| {
            let last = self.body.len().saturating_sub(1);
            for (i, stmt) in self.body.iter().enumerate() {
                stmt.codegen(state, i < last);
            }
            if self.body.is_empty() {
                // A line needs at least one statement to parse again.
                state.add_token("pass");
            }
        });
        self.trailing_whitespace.codegen(state);
    }
}

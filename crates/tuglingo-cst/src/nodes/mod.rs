// Copyright (c) Meta Platforms, Inc. and affiliates.
// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree

pub(crate) mod traits;
pub use traits::{MaybeSentinel, ParenthesizedNode, Span};

mod whitespace;
pub use whitespace::{Comment, EmptyLine, Newline, SimpleWhitespace, TrailingWhitespace};

mod op;
pub use op::{Comma, Dot, LeftParen, RightParen, Semicolon};

mod expression;
pub use expression::{
    Arg, Attribute, Call, Expression, ExpressionNode, ExpressionPosition, FromClause, Integer,
    Name, SimpleString,
};

mod statement;
pub use statement::{
    Aumenta, Break, Continua, Continue, Devuelve, Expr, Pass, Raise, RaiseParts, Return,
    ReturnParts, Rompe, SimpleStatementLine, SmallStatement,
};

mod module;
pub use module::Module;

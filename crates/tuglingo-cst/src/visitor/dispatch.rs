// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walk functions for CST traversal.
//!
//! This module contains walk functions that traverse CST nodes and call visitor methods.
//! The traversal order follows LibCST's visitor pattern:
//!
//! - **Pre-order**: `visit_*` is called before descending into children
//! - **Post-order**: `leave_*` is called after all children have been visited
//! - **Source order**: Children are visited left-to-right, top-to-bottom
//!
//! # Control Flow
//!
//! - `VisitResult::Continue` - traverse into children
//! - `VisitResult::SkipChildren` - skip children but still call `leave_*`
//! - `VisitResult::Stop` - halt traversal immediately (no `leave_*` called)

use super::traits::{VisitResult, Visitor};
use crate::nodes::{
    // Module
    Module,
    // Lines
    EmptyLine, SimpleStatementLine, SmallStatement,
    // Statements
    Aumenta, Break, Continua, Continue, Devuelve, Expr, Pass, Raise, Return, Rompe,
    // Expressions
    Arg, Attribute, Call, Expression, FromClause, Integer, Name, SimpleString,
    // Formatting
    MaybeSentinel, Semicolon, SimpleWhitespace,
};

/// Returns early with `Stop` when a child walk stopped.
macro_rules! walk_child {
    ($walk:expr) => {
        if $walk == VisitResult::Stop {
            return VisitResult::Stop;
        }
    };
}

fn walk_sentinel_whitespace<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &MaybeSentinel<SimpleWhitespace<'a>>,
) -> VisitResult {
    match node {
        MaybeSentinel::Value(whitespace) => walk_simple_whitespace(visitor, whitespace),
        MaybeSentinel::Default => VisitResult::Continue,
    }
}

fn walk_sentinel_semicolon<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &MaybeSentinel<Semicolon<'a>>,
) -> VisitResult {
    match node {
        MaybeSentinel::Value(semicolon) => walk_semicolon(visitor, semicolon),
        MaybeSentinel::Default => VisitResult::Continue,
    }
}

// ============================================================================
// Module walk
// ============================================================================

/// Walk a [`Module`] node and its children.
///
/// Traversal order:
/// 1. `visit_module`
/// 2. Walk each line in `body`, then each line in `footer`
/// 3. `leave_module`
pub fn walk_module<'a, V: Visitor<'a>>(visitor: &mut V, node: &Module<'a>) -> VisitResult {
    let result = visitor.visit_module(node);
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for line in &node.body {
                walk_child!(walk_simple_statement_line(visitor, line));
            }
            for line in &node.footer {
                walk_child!(walk_empty_line(visitor, line));
            }
        }
    }
    visitor.leave_module(node);
    VisitResult::Continue
}

// ============================================================================
// Line walks
// ============================================================================

/// Walk a [`SimpleStatementLine`]: its leading lines, then its statements.
pub fn walk_simple_statement_line<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &SimpleStatementLine<'a>,
) -> VisitResult {
    let result = visitor.visit_simple_statement_line(node);
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            for line in &node.leading_lines {
                walk_child!(walk_empty_line(visitor, line));
            }
            for stmt in &node.body {
                walk_child!(walk_small_statement(visitor, stmt));
            }
        }
    }
    visitor.leave_simple_statement_line(node);
    VisitResult::Continue
}

pub fn walk_empty_line<'a, V: Visitor<'a>>(visitor: &mut V, node: &EmptyLine<'a>) -> VisitResult {
    let result = visitor.visit_empty_line(node);
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_child!(walk_simple_whitespace(visitor, &node.whitespace));
        }
    }
    visitor.leave_empty_line(node);
    VisitResult::Continue
}

/// Walk a [`SmallStatement`] node.
///
/// Dispatches to the walk for the concrete statement type.
pub fn walk_small_statement<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &SmallStatement<'a>,
) -> VisitResult {
    let result = visitor.visit_small_statement(node);
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let inner_result = match node {
                SmallStatement::Pass(s) => walk_pass_stmt(visitor, s),
                SmallStatement::Expr(s) => walk_expr(visitor, s),
                SmallStatement::Break(s) => walk_break_stmt(visitor, s),
                SmallStatement::Continue(s) => walk_continue_stmt(visitor, s),
                SmallStatement::Return(s) => walk_return_stmt(visitor, s),
                SmallStatement::Raise(s) => walk_raise_stmt(visitor, s),
                SmallStatement::Rompe(s) => walk_rompe_stmt(visitor, s),
                SmallStatement::Continua(s) => walk_continua_stmt(visitor, s),
                SmallStatement::Devuelve(s) => walk_devuelve_stmt(visitor, s),
                SmallStatement::Aumenta(s) => walk_aumenta_stmt(visitor, s),
            };
            walk_child!(inner_result);
        }
    }
    visitor.leave_small_statement(node);
    VisitResult::Continue
}

// ============================================================================
// Statement walks
// ============================================================================

macro_rules! walk_keyword_statement {
    ($($walk:ident, $visit:ident, $leave:ident: $node:ident;)*) => {$(
        #[doc = concat!("Walk a [`", stringify!($node), "`] node: its semicolon, if explicit.")]
        pub fn $walk<'a, V: Visitor<'a>>(visitor: &mut V, node: &$node<'a>) -> VisitResult {
            let result = visitor.$visit(node);
            match result {
                VisitResult::Stop => return VisitResult::Stop,
                VisitResult::SkipChildren => {}
                VisitResult::Continue => {
                    walk_child!(walk_sentinel_semicolon(visitor, node.semicolon()));
                }
            }
            visitor.$leave(node);
            VisitResult::Continue
        }
    )*};
}

walk_keyword_statement! {
    walk_pass_stmt, visit_pass_stmt, leave_pass_stmt: Pass;
    walk_break_stmt, visit_break_stmt, leave_break_stmt: Break;
    walk_continue_stmt, visit_continue_stmt, leave_continue_stmt: Continue;
    walk_rompe_stmt, visit_rompe_stmt, leave_rompe_stmt: Rompe;
    walk_continua_stmt, visit_continua_stmt, leave_continua_stmt: Continua;
}

macro_rules! walk_value_statement {
    ($($walk:ident, $visit:ident, $leave:ident: $node:ident, $whitespace:ident;)*) => {$(
        #[doc = concat!("Walk a [`", stringify!($node), "`] node.")]
        #[doc = ""]
        #[doc = "Children: keyword whitespace, value, semicolon."]
        pub fn $walk<'a, V: Visitor<'a>>(visitor: &mut V, node: &$node<'a>) -> VisitResult {
            let result = visitor.$visit(node);
            match result {
                VisitResult::Stop => return VisitResult::Stop,
                VisitResult::SkipChildren => {}
                VisitResult::Continue => {
                    walk_child!(walk_sentinel_whitespace(visitor, node.$whitespace()));
                    if let Some(value) = node.value() {
                        walk_child!(walk_expression(visitor, value));
                    }
                    walk_child!(walk_sentinel_semicolon(visitor, node.semicolon()));
                }
            }
            visitor.$leave(node);
            VisitResult::Continue
        }
    )*};
}

walk_value_statement! {
    walk_return_stmt, visit_return_stmt, leave_return_stmt: Return, whitespace_after_return;
    walk_devuelve_stmt, visit_devuelve_stmt, leave_devuelve_stmt:
        Devuelve, whitespace_after_devuelve;
}

macro_rules! walk_raise_statement {
    ($($walk:ident, $visit:ident, $leave:ident: $node:ident, $whitespace:ident;)*) => {$(
        #[doc = concat!("Walk a [`", stringify!($node), "`] node.")]
        #[doc = ""]
        #[doc = "Children: keyword whitespace, exception, cause, semicolon."]
        pub fn $walk<'a, V: Visitor<'a>>(visitor: &mut V, node: &$node<'a>) -> VisitResult {
            let result = visitor.$visit(node);
            match result {
                VisitResult::Stop => return VisitResult::Stop,
                VisitResult::SkipChildren => {}
                VisitResult::Continue => {
                    walk_child!(walk_sentinel_whitespace(visitor, node.$whitespace()));
                    if let Some(exc) = node.exc() {
                        walk_child!(walk_expression(visitor, exc));
                    }
                    if let Some(cause) = node.cause() {
                        walk_child!(walk_from_clause(visitor, cause));
                    }
                    walk_child!(walk_sentinel_semicolon(visitor, node.semicolon()));
                }
            }
            visitor.$leave(node);
            VisitResult::Continue
        }
    )*};
}

walk_raise_statement! {
    walk_raise_stmt, visit_raise_stmt, leave_raise_stmt: Raise, whitespace_after_raise;
    walk_aumenta_stmt, visit_aumenta_stmt, leave_aumenta_stmt: Aumenta, whitespace_after_aumenta;
}

pub fn walk_expr<'a, V: Visitor<'a>>(visitor: &mut V, node: &Expr<'a>) -> VisitResult {
    let result = visitor.visit_expr(node);
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_child!(walk_expression(visitor, node.value()));
            walk_child!(walk_sentinel_semicolon(visitor, node.semicolon()));
        }
    }
    visitor.leave_expr(node);
    VisitResult::Continue
}

// ============================================================================
// Expression walks
// ============================================================================

pub fn walk_from_clause<'a, V: Visitor<'a>>(visitor: &mut V, node: &FromClause<'a>) -> VisitResult {
    let result = visitor.visit_from_clause(node);
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_child!(walk_sentinel_whitespace(visitor, node.whitespace_before_from()));
            walk_child!(walk_simple_whitespace(visitor, node.whitespace_after_from()));
            walk_child!(walk_expression(visitor, node.item()));
        }
    }
    visitor.leave_from_clause(node);
    VisitResult::Continue
}

/// Walk an [`Expression`] node.
///
/// Dispatches to the walk for the concrete expression type.
pub fn walk_expression<'a, V: Visitor<'a>>(visitor: &mut V, node: &Expression<'a>) -> VisitResult {
    let result = visitor.visit_expression(node);
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            let inner_result = match node {
                Expression::Name(e) => walk_name(visitor, e),
                Expression::Integer(e) => walk_integer(visitor, e),
                Expression::SimpleString(e) => walk_simple_string(visitor, e),
                Expression::Attribute(e) => walk_attribute(visitor, e),
                Expression::Call(e) => walk_call(visitor, e),
            };
            walk_child!(inner_result);
        }
    }
    visitor.leave_expression(node);
    VisitResult::Continue
}

macro_rules! walk_leaf {
    ($($walk:ident, $visit:ident, $leave:ident: $node:ident;)*) => {$(
        #[doc = concat!("Walk a [`", stringify!($node), "`] leaf node.")]
        pub fn $walk<'a, V: Visitor<'a>>(visitor: &mut V, node: &$node<'a>) -> VisitResult {
            if visitor.$visit(node) == VisitResult::Stop {
                return VisitResult::Stop;
            }
            visitor.$leave(node);
            VisitResult::Continue
        }
    )*};
}

walk_leaf! {
    walk_name, visit_name, leave_name: Name;
    walk_integer, visit_integer, leave_integer: Integer;
    walk_simple_string, visit_simple_string, leave_simple_string: SimpleString;
    walk_simple_whitespace, visit_simple_whitespace, leave_simple_whitespace: SimpleWhitespace;
}

/// Walk an [`Attribute`]: the value, then the attribute name.
pub fn walk_attribute<'a, V: Visitor<'a>>(visitor: &mut V, node: &Attribute<'a>) -> VisitResult {
    let result = visitor.visit_attribute(node);
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_child!(walk_expression(visitor, node.value()));
            walk_child!(walk_name(visitor, node.attr()));
        }
    }
    visitor.leave_attribute(node);
    VisitResult::Continue
}

pub fn walk_call<'a, V: Visitor<'a>>(visitor: &mut V, node: &Call<'a>) -> VisitResult {
    let result = visitor.visit_call(node);
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_child!(walk_expression(visitor, node.func()));
            for arg in node.args() {
                walk_child!(walk_arg(visitor, arg));
            }
        }
    }
    visitor.leave_call(node);
    VisitResult::Continue
}

pub fn walk_arg<'a, V: Visitor<'a>>(visitor: &mut V, node: &Arg<'a>) -> VisitResult {
    let result = visitor.visit_arg(node);
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_child!(walk_expression(visitor, &node.value));
        }
    }
    visitor.leave_arg(node);
    VisitResult::Continue
}

// ============================================================================
// Formatting walks
// ============================================================================

pub fn walk_semicolon<'a, V: Visitor<'a>>(visitor: &mut V, node: &Semicolon<'a>) -> VisitResult {
    let result = visitor.visit_semicolon(node);
    match result {
        VisitResult::Stop => return VisitResult::Stop,
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            walk_child!(walk_simple_whitespace(visitor, &node.whitespace_before));
            walk_child!(walk_simple_whitespace(visitor, &node.whitespace_after));
        }
    }
    visitor.leave_semicolon(node);
    VisitResult::Continue
}

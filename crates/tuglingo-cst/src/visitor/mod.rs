// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor and transformer infrastructure for CST traversal.
//!
//! # Visitor Pattern
//!
//! The [`Visitor`] trait provides read-only traversal, driven by the `walk_*`
//! functions:
//!
//! - **Depth-first, pre-order** for `visit_*` methods
//! - **Post-order** for `leave_*` methods
//! - Children are visited in source order (left-to-right, top-to-bottom)
//!
//! # Transformer Pattern
//!
//! The [`Transformer`] trait rebuilds a tree. Every node has a
//! `visit_and_replace_children` method that feeds its children through the
//! transformer and constructs a fresh node from the results, running the
//! same validation as the node's constructor. Untouched subtrees are moved
//! into the new tree, not copied.
//!
//! ```
//! use tuglingo_cst::{
//!     parse_module, Expression, Integer, Transform, TransformResult, Transformer,
//! };
//!
//! struct Zero;
//!
//! impl<'a> Transformer<'a> for Zero {
//!     fn transform_expression(
//!         &mut self,
//!         node: Expression<'a>,
//!     ) -> TransformResult<Expression<'a>> {
//!         Ok(Transform::Keep(match node {
//!             Expression::Integer(_) => Integer::new("0")?.into(),
//!             other => other,
//!         }))
//!     }
//! }
//!
//! let module = parse_module("devuelve f(1, 2)\n", None).unwrap();
//! assert_eq!(module.visit(&mut Zero).unwrap().code(), "devuelve f(0, 0)\n");
//! ```

mod dispatch;
mod traits;
mod transform;
mod translate;

pub use dispatch::{
    walk_arg, walk_attribute, walk_aumenta_stmt, walk_break_stmt, walk_call, walk_continua_stmt,
    walk_continue_stmt, walk_devuelve_stmt, walk_empty_line, walk_expr, walk_expression,
    walk_from_clause, walk_integer, walk_module, walk_name, walk_pass_stmt, walk_raise_stmt,
    walk_return_stmt, walk_rompe_stmt, walk_semicolon, walk_simple_statement_line,
    walk_simple_string, walk_simple_whitespace, walk_small_statement,
};
pub use traits::{Transform, TransformResult, Transformer, VisitResult, Visitor};
pub use transform::{visit_optional, visit_required, visit_sentinel, visit_sequence, Transformable};
pub use translate::{translate_module, KeywordTranslator, Translated};

// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor and transformer trait definitions for CST traversal.

use crate::error::ValidationError;
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
    Semicolon, SimpleWhitespace,
};

/// Result of visiting a node - controls traversal behavior.
///
/// When a visitor method returns a `VisitResult`, it controls how the walker
/// proceeds with traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Continue traversal into children.
    ///
    /// After visiting children, `leave_*` will be called for this node.
    #[default]
    Continue,

    /// Skip children, continue with siblings.
    ///
    /// The walker will not descend into this node's children, but `leave_*`
    /// will still be called for this node.
    SkipChildren,

    /// Stop traversal entirely.
    ///
    /// No further `visit_*` or `leave_*` methods will be called. The walk
    /// function will return immediately.
    Stop,
}

/// What a transformer hook wants done with the node it was given.
///
/// The meaning of each variant depends on the slot the node sits in:
///
/// | Slot                        | `Remove`                | `Flatten`           |
/// |-----------------------------|-------------------------|---------------------|
/// | sequence (`Vec<T>`)         | drops the element       | splices the nodes in |
/// | optional (`Option<T>`)      | child becomes `None`    | error               |
/// | formatting (`MaybeSentinel`)| slot becomes `Default`  | error               |
/// | required                    | error                   | error               |
#[derive(Debug, Clone)]
pub enum Transform<T> {
    /// Keep the transformed node.
    Keep(T),
    /// Remove the node from its slot.
    Remove,
    /// Replace the node with multiple nodes.
    Flatten(Vec<T>),
}

impl<T> Transform<T> {
    /// Returns true if this is a `Keep` variant.
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep(_))
    }

    /// Returns true if this is a `Remove` variant.
    pub fn is_remove(&self) -> bool {
        matches!(self, Self::Remove)
    }

    /// Returns true if this is a `Flatten` variant.
    pub fn is_flatten(&self) -> bool {
        matches!(self, Self::Flatten(_))
    }

    /// Maps the inner value using the provided function.
    ///
    /// - For `Keep(t)`, applies `f` to `t` and returns `Keep(f(t))`
    /// - For `Remove`, returns `Remove`
    /// - For `Flatten(v)`, applies `f` to each element and returns `Flatten`
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Transform<U> {
        match self {
            Transform::Keep(t) => Transform::Keep(f(t)),
            Transform::Remove => Transform::Remove,
            Transform::Flatten(v) => Transform::Flatten(v.into_iter().map(f).collect()),
        }
    }
}

impl<T> From<T> for Transform<T> {
    fn from(value: T) -> Self {
        Transform::Keep(value)
    }
}

/// Return type of every fallible transformer hook.
///
/// Hooks that build new nodes through validating constructors can propagate
/// the constructor's error with `?`.
pub type TransformResult<T> = Result<Transform<T>, ValidationError>;

/// Macro to generate visitor trait method signatures.
///
/// This macro generates pairs of `visit_*` and `leave_*` methods with default
/// implementations that return `VisitResult::Continue` and do nothing, respectively.
macro_rules! visitor_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Visit a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called before descending into children. Return `VisitResult` to control traversal."]
                #[allow(unused_variables)]
                fn [<visit_ $base_name>](&mut self, node: &$node_type) -> VisitResult {
                    VisitResult::Continue
                }

                $(#[$meta])*
                #[doc = concat!("Leave a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called after all children have been visited. Called even if `SkipChildren` was returned."]
                #[allow(unused_variables)]
                fn [<leave_ $base_name>](&mut self, node: &$node_type) {}
            )*
        }
    };
}

/// Macro to generate transformer trait method signatures.
///
/// This macro generates `transform_*` methods with default implementations
/// that return the node unchanged.
macro_rules! transformer_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Transform a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called after its children were transformed. Return the modified node."]
                #[allow(unused_variables)]
                fn [<transform_ $base_name>](&mut self, node: $node_type) -> $node_type {
                    node
                }
            )*
        }
    };
}

/// Macro to generate transformer methods that return [`TransformResult`] for
/// nodes that sit in a slot of their parent.
macro_rules! transformer_list_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Transform a [`", stringify!($node_type), "`] node in its parent slot.")]
                #[doc = ""]
                #[doc = "Returns `Transform::Keep` by default. Can also return `Remove` or `Flatten`."]
                #[allow(unused_variables)]
                fn [<transform_ $base_name>](
                    &mut self,
                    node: $node_type,
                ) -> TransformResult<$node_type> {
                    Ok(Transform::Keep(node))
                }
            )*
        }
    };
}

/// Macro to generate per-statement transformer methods.
///
/// Each hook receives one concrete statement type and may return any
/// [`SmallStatement`], so a statement can be replaced by one of another kind.
macro_rules! transformer_statement_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Transform a [`", stringify!($node_type), "`] statement.")]
                #[doc = ""]
                #[doc = "Called before `transform_small_statement` for the same node."]
                #[allow(unused_variables)]
                fn [<transform_ $base_name>](
                    &mut self,
                    node: $node_type,
                ) -> TransformResult<SmallStatement<'a>> {
                    Ok(Transform::Keep(node.into()))
                }
            )*
        }
    };
}

/// Immutable visitor for CST traversal.
///
/// Implement this trait to traverse a CST without modifying it. Each node type
/// has a corresponding `visit_*` and `leave_*` method pair.
///
/// # Traversal Order
///
/// - `visit_*` is called in **pre-order** (before children)
/// - `leave_*` is called in **post-order** (after children)
/// - Children are visited in source order (left-to-right, top-to-bottom)
///
/// # Control Flow
///
/// - Return `VisitResult::Continue` to traverse into children
/// - Return `VisitResult::SkipChildren` to skip children (but `leave_*` still called)
/// - Return `VisitResult::Stop` to halt traversal immediately
///
/// # Example
///
/// ```
/// use tuglingo_cst::{parse_module, Name, VisitResult, Visitor};
///
/// struct NameCollector {
///     names: Vec<String>,
/// }
///
/// impl<'a> Visitor<'a> for NameCollector {
///     fn visit_name(&mut self, node: &Name<'a>) -> VisitResult {
///         self.names.push(node.value().to_string());
///         VisitResult::Continue
///     }
/// }
///
/// let module = parse_module("raise Error(x) from causa\n", None).unwrap();
/// let mut collector = NameCollector { names: Vec::new() };
/// module.walk(&mut collector);
/// assert_eq!(collector.names, vec!["Error", "x", "causa"]);
/// ```
pub trait Visitor<'a> {
    // Module
    visitor_methods! {
        module: Module<'a>,
    }

    // Lines
    visitor_methods! {
        simple_statement_line: SimpleStatementLine<'a>,
        empty_line: EmptyLine<'a>,
        small_statement: SmallStatement<'a>,
    }

    // Simple statements
    visitor_methods! {
        pass_stmt: Pass<'a>,
        expr: Expr<'a>,
        break_stmt: Break<'a>,
        continue_stmt: Continue<'a>,
        return_stmt: Return<'a>,
        raise_stmt: Raise<'a>,
        rompe_stmt: Rompe<'a>,
        continua_stmt: Continua<'a>,
        devuelve_stmt: Devuelve<'a>,
        aumenta_stmt: Aumenta<'a>,
    }

    // Expressions
    visitor_methods! {
        from_clause: FromClause<'a>,
        expression: Expression<'a>,
        name: Name<'a>,
        integer: Integer<'a>,
        simple_string: SimpleString<'a>,
        attribute: Attribute<'a>,
        call: Call<'a>,
        arg: Arg<'a>,
    }

    // Formatting
    visitor_methods! {
        semicolon: Semicolon<'a>,
        simple_whitespace: SimpleWhitespace<'a>,
    }
}

/// Rebuilding transformer for CST modification.
///
/// Drive a transformer with [`Module::visit`]. Hooks run in **post-order**:
/// a node's hook receives the node after all of its children were
/// transformed and the node was rebuilt (and validated) around them.
///
/// For a small statement, the hook for its concrete type
/// (`transform_break_stmt`, ...) runs first, then `transform_small_statement`
/// runs on whatever it returned.
///
/// # Example
///
/// ```
/// use tuglingo_cst::{parse_module, Break, Continue, Transform, TransformResult, Transformer};
/// use tuglingo_cst::SmallStatement;
///
/// struct ContinueToBreak;
///
/// impl<'a> Transformer<'a> for ContinueToBreak {
///     fn transform_continue_stmt(
///         &mut self,
///         node: Continue<'a>,
///     ) -> TransformResult<SmallStatement<'a>> {
///         Ok(Transform::Keep(Break::new(node.into_semicolon()).into()))
///     }
/// }
///
/// let module = parse_module("continue ;x\n", None).unwrap();
/// let module = module.visit(&mut ContinueToBreak).unwrap();
/// assert_eq!(module.code(), "break ;x\n");
/// ```
pub trait Transformer<'a> {
    transformer_methods! {
        module: Module<'a>,
    }

    transformer_list_methods! {
        simple_statement_line: SimpleStatementLine<'a>,
        empty_line: EmptyLine<'a>,
        small_statement: SmallStatement<'a>,
        from_clause: FromClause<'a>,
        expression: Expression<'a>,
        arg: Arg<'a>,
        semicolon: Semicolon<'a>,
        simple_whitespace: SimpleWhitespace<'a>,
    }

    transformer_statement_methods! {
        pass_stmt: Pass<'a>,
        expr: Expr<'a>,
        break_stmt: Break<'a>,
        continue_stmt: Continue<'a>,
        return_stmt: Return<'a>,
        raise_stmt: Raise<'a>,
        rompe_stmt: Rompe<'a>,
        continua_stmt: Continua<'a>,
        devuelve_stmt: Devuelve<'a>,
        aumenta_stmt: Aumenta<'a>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_helpers() {
        let keep: Transform<i32> = 3.into();
        assert!(keep.is_keep());
        assert!(Transform::<i32>::Remove.is_remove());
        let flat = Transform::Flatten(vec![1, 2]).map(|n| n * 10);
        assert!(flat.is_flatten());
        assert!(matches!(flat, Transform::Flatten(v) if v == vec![10, 20]));
        assert!(matches!(keep.map(|n| n + 1), Transform::Keep(4)));
    }

    #[test]
    fn test_visit_result_default() {
        assert_eq!(VisitResult::default(), VisitResult::Continue);
    }
}

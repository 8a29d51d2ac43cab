// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Slot helpers that drive a [`Transformer`] through a tree.
//!
//! Each node's `visit_and_replace_children` passes every child through one of
//! the `visit_*` helpers below, in source order, and then rebuilds itself from
//! the results with its validating constructor. The helper decides what a
//! [`Transform`] means for the kind of slot the child occupies.

use super::traits::{Transform, TransformResult, Transformer};
use crate::error::{Result, ValidationError};
use crate::nodes::{
    Arg, EmptyLine, Expression, FromClause, MaybeSentinel, Semicolon, SimpleStatementLine,
    SimpleWhitespace, SmallStatement,
};

/// A node that can be handed to a [`Transformer`] hook.
pub trait Transformable<'a>: Sized {
    /// Transforms this node's children, rebuilds it, then runs the
    /// transformer's hook for this node type.
    fn transform<T: Transformer<'a> + ?Sized>(self, transformer: &mut T) -> TransformResult<Self>;
}

macro_rules! transformable {
    ($($node:ident => $hook:ident),* $(,)?) => {$(
        impl<'a> Transformable<'a> for $node<'a> {
            fn transform<T: Transformer<'a> + ?Sized>(
                self,
                transformer: &mut T,
            ) -> TransformResult<Self> {
                let updated = self.visit_and_replace_children(transformer)?;
                transformer.$hook(updated)
            }
        }
    )*};
}

transformable! {
    SimpleStatementLine => transform_simple_statement_line,
    EmptyLine => transform_empty_line,
    FromClause => transform_from_clause,
    Expression => transform_expression,
    Arg => transform_arg,
    Semicolon => transform_semicolon,
    SimpleWhitespace => transform_simple_whitespace,
}

macro_rules! statement_hooks {
    ($stmt:expr, $transformer:ident, $($variant:ident => $hook:ident),* $(,)?) => {
        match $stmt {
            $(SmallStatement::$variant(node) => {
                let node = node.visit_and_replace_children($transformer)?;
                $transformer.$hook(node)?
            })*
        }
    };
}

impl<'a> Transformable<'a> for SmallStatement<'a> {
    fn transform<T: Transformer<'a> + ?Sized>(self, transformer: &mut T) -> TransformResult<Self> {
        let updated = statement_hooks!(self, transformer,
            Pass => transform_pass_stmt,
            Expr => transform_expr,
            Break => transform_break_stmt,
            Continue => transform_continue_stmt,
            Return => transform_return_stmt,
            Raise => transform_raise_stmt,
            Rompe => transform_rompe_stmt,
            Continua => transform_continua_stmt,
            Devuelve => transform_devuelve_stmt,
            Aumenta => transform_aumenta_stmt,
        );
        match updated {
            Transform::Keep(node) => transformer.transform_small_statement(node),
            Transform::Remove => Ok(Transform::Remove),
            Transform::Flatten(nodes) => {
                let mut flattened = Vec::with_capacity(nodes.len());
                for node in nodes {
                    match transformer.transform_small_statement(node)? {
                        Transform::Keep(node) => flattened.push(node),
                        Transform::Remove => {}
                        Transform::Flatten(more) => flattened.extend(more),
                    }
                }
                Ok(Transform::Flatten(flattened))
            }
        }
    }
}

/// Transforms a child that must stay present.
pub fn visit_required<'a, N, T>(
    child: N,
    node: &'static str,
    field: &'static str,
    transformer: &mut T,
) -> Result<N>
where
    N: Transformable<'a>,
    T: Transformer<'a> + ?Sized,
{
    match child.transform(transformer)? {
        Transform::Keep(child) => Ok(child),
        Transform::Remove => Err(ValidationError::RequiredChildRemoved { node, field }),
        Transform::Flatten(_) => Err(ValidationError::FlattenIntoSingleSlot { node, field }),
    }
}

/// Transforms an optional child; `Remove` leaves the slot empty.
pub fn visit_optional<'a, N, T>(
    child: Option<N>,
    node: &'static str,
    field: &'static str,
    transformer: &mut T,
) -> Result<Option<N>>
where
    N: Transformable<'a>,
    T: Transformer<'a> + ?Sized,
{
    let Some(child) = child else {
        return Ok(None);
    };
    match child.transform(transformer)? {
        Transform::Keep(child) => Ok(Some(child)),
        Transform::Remove => {
            tracing::trace!(node, field, "optional child removed");
            Ok(None)
        }
        Transform::Flatten(_) => Err(ValidationError::FlattenIntoSingleSlot { node, field }),
    }
}

/// Transforms a formatting slot; `Remove` resets it to [`MaybeSentinel::Default`].
pub fn visit_sentinel<'a, N, T>(
    child: MaybeSentinel<N>,
    node: &'static str,
    field: &'static str,
    transformer: &mut T,
) -> Result<MaybeSentinel<N>>
where
    N: Transformable<'a>,
    T: Transformer<'a> + ?Sized,
{
    let MaybeSentinel::Value(child) = child else {
        return Ok(MaybeSentinel::Default);
    };
    match child.transform(transformer)? {
        Transform::Keep(child) => Ok(MaybeSentinel::Value(child)),
        Transform::Remove => {
            tracing::trace!(node, field, "formatting slot reset to default");
            Ok(MaybeSentinel::Default)
        }
        Transform::Flatten(_) => Err(ValidationError::FlattenIntoSingleSlot { node, field }),
    }
}

/// Transforms every element of a sequence, dropping removed elements and
/// splicing in flattened ones.
pub fn visit_sequence<'a, N, T>(children: Vec<N>, transformer: &mut T) -> Result<Vec<N>>
where
    N: Transformable<'a>,
    T: Transformer<'a> + ?Sized,
{
    let mut result = Vec::with_capacity(children.len());
    for child in children {
        match child.transform(transformer)? {
            Transform::Keep(child) => result.push(child),
            Transform::Remove => {}
            Transform::Flatten(nodes) => result.extend(nodes),
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_module, Break, Continue, Name, Pass, Raise, Return, Side};

    /// Removes every semicolon.
    struct DropSemicolons;

    impl<'a> Transformer<'a> for DropSemicolons {
        fn transform_semicolon(&mut self, _node: Semicolon<'a>) -> TransformResult<Semicolon<'a>> {
            Ok(Transform::Remove)
        }
    }

    #[test]
    fn test_remove_in_sentinel_slot_becomes_default() {
        let module = parse_module("break ;pass;\n", None).unwrap();
        let module = module.visit(&mut DropSemicolons).unwrap();
        assert_eq!(module.code(), "break; pass\n");
    }

    /// Removes every expression.
    struct DropExpressions;

    impl<'a> Transformer<'a> for DropExpressions {
        fn transform_expression(
            &mut self,
            _node: Expression<'a>,
        ) -> TransformResult<Expression<'a>> {
            Ok(Transform::Remove)
        }
    }

    #[test]
    fn test_remove_in_optional_slot_becomes_absent() {
        let module = parse_module("return  x\n", None).unwrap();
        let module = module.visit(&mut DropExpressions).unwrap();
        assert_eq!(module.code(), "return  \n");
    }

    #[test]
    fn test_remove_in_required_slot_fails() {
        let module = parse_module("f(x)\n", None).unwrap();
        let err = module.visit(&mut DropExpressions).unwrap_err();
        assert_eq!(
            err,
            ValidationError::RequiredChildRemoved {
                node: "Call",
                field: "func",
            }
        );
    }

    #[test]
    fn test_removing_cause_item_fails() {
        let module = parse_module("raise x from y\n", None).unwrap();
        let err = module.visit(&mut DropExpressions).unwrap_err();
        assert_eq!(
            err,
            ValidationError::RequiredChildRemoved {
                node: "FromClause",
                field: "item",
            }
        );
    }

    /// Removes every name spelled `x`.
    struct DropX;

    impl<'a> Transformer<'a> for DropX {
        fn transform_expression(
            &mut self,
            node: Expression<'a>,
        ) -> TransformResult<Expression<'a>> {
            Ok(match node {
                Expression::Name(name) if name.value() == "x" => Transform::Remove,
                other => Transform::Keep(other),
            })
        }
    }

    #[test]
    fn test_removing_exc_with_cause_fails_validation() {
        let module = parse_module("raise x from y\n", None).unwrap();
        let err = module.visit(&mut DropX).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingDependency {
                node: "Raise",
                required: "exc",
                dependent: "cause",
            }
        );

        let module = parse_module("raise x\naumenta x from y\n", None).unwrap();
        let err = module.visit(&mut DropX).unwrap_err();
        assert!(matches!(err, ValidationError::MissingDependency { node: "Aumenta", .. }));

        let module = parse_module("raise x ; return x\n", None).unwrap();
        assert_eq!(module.visit(&mut DropX).unwrap().code(), "raise  ; return \n");
    }

    /// Removes only the exception of raise statements.
    struct DropExc;

    impl<'a> Transformer<'a> for DropExc {
        fn transform_raise_stmt(&mut self, node: Raise<'a>) -> TransformResult<SmallStatement<'a>> {
            Ok(Transform::Keep(node.with_exc(None)?.into()))
        }
    }

    #[test]
    fn test_hook_errors_propagate() {
        let module = parse_module("raise x from y\n", None).unwrap();
        let err = module.visit(&mut DropExc).unwrap_err();
        assert!(matches!(err, ValidationError::MissingDependency { node: "Raise", .. }));
    }

    /// Splits `break` into `pass; break` and deletes `continue`.
    struct Splitter;

    impl<'a> Transformer<'a> for Splitter {
        fn transform_break_stmt(&mut self, node: Break<'a>) -> TransformResult<SmallStatement<'a>> {
            Ok(Transform::Flatten(vec![Pass::default().into(), node.into()]))
        }

        fn transform_continue_stmt(
            &mut self,
            _node: Continue<'a>,
        ) -> TransformResult<SmallStatement<'a>> {
            Ok(Transform::Remove)
        }
    }

    #[test]
    fn test_flatten_and_remove_in_sequence() {
        let module = parse_module("continue; break\n", None).unwrap();
        let module = module.visit(&mut Splitter).unwrap();
        assert_eq!(module.code(), "pass; break\n");
    }

    /// Flattens a name into two expressions, which no single slot can hold.
    struct Duplicate;

    impl<'a> Transformer<'a> for Duplicate {
        fn transform_expression(
            &mut self,
            node: Expression<'a>,
        ) -> TransformResult<Expression<'a>> {
            Ok(Transform::Flatten(vec![node.clone(), node]))
        }
    }

    #[test]
    fn test_flatten_into_single_slot_fails() {
        let module = parse_module("return x\n", None).unwrap();
        let err = module.visit(&mut Duplicate).unwrap_err();
        assert_eq!(
            err,
            ValidationError::FlattenIntoSingleSlot {
                node: "Return",
                field: "value",
            }
        );
    }

    /// Strips the whitespace after every keyword down to nothing.
    struct Squash;

    impl<'a> Transformer<'a> for Squash {
        fn transform_return_stmt(
            &mut self,
            node: Return<'a>,
        ) -> TransformResult<SmallStatement<'a>> {
            let empty = MaybeSentinel::Value(SimpleWhitespace::new("")?);
            let value = node.value().cloned();
            Ok(Transform::Keep(Return::new(value, empty, *node.semicolon())?.into()))
        }
    }

    #[test]
    fn test_rebuilt_node_is_revalidated() {
        let module = parse_module("return (x)\n", None).unwrap();
        assert_eq!(module.visit(&mut Squash).unwrap().code(), "return(x)\n");

        let module = parse_module("return x\n", None).unwrap();
        let err = module.visit(&mut Squash).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingSpace {
                keyword: "return",
                side: Side::After,
            }
        );
    }

    /// Renames every name to `y`.
    struct Rename;

    impl<'a> Transformer<'a> for Rename {
        fn transform_expression(
            &mut self,
            node: Expression<'a>,
        ) -> TransformResult<Expression<'a>> {
            Ok(Transform::Keep(match node {
                Expression::Name(_) => Name::new("y")?.into(),
                other => other,
            }))
        }
    }

    #[test]
    fn test_children_are_transformed_before_parents() {
        let module = parse_module("aumenta a.b(c, d) from e\n", None).unwrap();
        let module = module.visit(&mut Rename).unwrap();
        assert_eq!(module.code(), "aumenta y.b(y, y) from y\n");
    }
}

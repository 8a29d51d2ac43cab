// Copyright (c) Meta Platforms, Inc. and affiliates.
// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree

use crate::error::Result;
use crate::visitor::{visit_sequence, walk_module, Transformer, Visitor};
use crate::{
    Codegen, CodegenOptions, CodegenState, EmptyLine, SimpleStatementLine, SyntacticPosition,
};

/// Root of a parsed source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Module<'a> {
    pub body: Vec<SimpleStatementLine<'a>>,
    /// Empty lines and comments after the last statement.
    pub footer: Vec<EmptyLine<'a>>,

    /// Newline rendered by nodes with no explicit one, detected from the
    /// first line ending in the source.
    pub default_newline: &'a str,
    pub encoding: String,
    /// The source began with a UTF-8 byte order mark, which is written back
    /// ahead of the first line.
    pub has_bom: bool,
}

impl<'a> Module<'a> {
    pub fn new(body: Vec<SimpleStatementLine<'a>>) -> Self {
        Self {
            body,
            footer: Vec::new(),
            default_newline: "\n",
            encoding: "utf-8".to_string(),
            has_bom: false,
        }
    }

    /// Regenerates the source text.
    ///
    /// For an unmodified tree this is exactly the text it was parsed from.
    pub fn code(&self) -> String {
        self.code_with_options(&CodegenOptions::default())
    }

    pub fn code_with_options(&self, options: &CodegenOptions) -> String {
        let mut state = CodegenState::from_options(options, self.default_newline);
        self.codegen(&mut state);
        state.tokens
    }

    /// Regenerates the source text together with the position of every line
    /// and small statement in it.
    pub fn code_with_positions(&self) -> (String, Vec<SyntacticPosition>) {
        let options = CodegenOptions::default().with_positions();
        let mut state = CodegenState::from_options(&options, self.default_newline);
        self.codegen(&mut state);
        let positions = state.take_positions();
        (state.tokens, positions)
    }

    /// Runs `transformer` over the whole tree and returns the rebuilt module.
    ///
    /// Every rebuilt node is validated again; the first failure aborts the
    /// transform.
    pub fn visit<T: Transformer<'a> + ?Sized>(self, transformer: &mut T) -> Result<Self> {
        let updated = self.visit_and_replace_children(transformer)?;
        Ok(transformer.transform_module(updated))
    }

    /// Walks the tree with a read-only visitor.
    pub fn walk<V: Visitor<'a>>(&self, visitor: &mut V) {
        walk_module(visitor, self);
    }

    pub fn visit_and_replace_children<T: Transformer<'a> + ?Sized>(
        self,
        transformer: &mut T,
    ) -> Result<Self> {
        let body = visit_sequence(self.body, transformer)?;
        let footer = visit_sequence(self.footer, transformer)?;
        Ok(Self {
            body,
            footer,
            ..self
        })
    }
}

impl<'a> Codegen<'a> for Module<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        if self.has_bom {
            state.add_token("\u{feff}");
        }
        for line in &self.body {
            line.codegen(state);
        }
        for line in &self.footer {
            line.codegen(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Break, Comment, Newline, Rompe};

    fn module<'a>() -> Module<'a> {
        let mut module = Module::new(vec![SimpleStatementLine::new(vec![
            Break::default().into(),
            Rompe::default().into(),
        ])]);
        module.footer.push(EmptyLine {
            comment: Some(Comment::new("# fin").unwrap()),
            newline: Newline::fake(),
            ..Default::default()
        });
        module
    }

    #[test]
    fn test_code_uses_defaults() {
        assert_eq!(module().code(), "break; rompe\n# fin");
    }

    #[test]
    fn test_code_with_options() {
        let options = CodegenOptions::default()
            .with_default_semicolon(" ;")
            .with_default_newline("\r\n");
        assert_eq!(module().code_with_options(&options), "break ;rompe\r\n# fin");

        let mut crlf = module();
        crlf.default_newline = "\r\n";
        assert_eq!(crlf.code(), "break; rompe\r\n# fin");
    }

    #[test]
    fn test_code_writes_byte_order_mark_first() {
        let mut bom = module();
        bom.has_bom = true;
        assert_eq!(bom.code(), "\u{feff}break; rompe\n# fin");
    }

    #[test]
    fn test_code_with_positions() {
        let (code, positions) = module().code_with_positions();
        assert_eq!(code, module().code());
        let kinds: Vec<_> = positions.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec!["SimpleStatementLine", "Break", "Rompe"]);
        assert_eq!(positions[2].span.slice(&code), Some("rompe"));
        assert_eq!(positions[0].span.slice(&code), Some("break; rompe"));
    }
}

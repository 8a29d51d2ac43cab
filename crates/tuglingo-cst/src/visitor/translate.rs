// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Keyword translation between [`Language`]s.
//!
//! [`KeywordTranslator`] rewrites every statement spelled in one language into
//! its counterpart in the other. Everything except the keyword is carried
//! over: the exception, cause or value, the whitespace after the keyword and
//! the semicolon. Statements already in the target language, `pass` and
//! expression statements are left alone.
//!
//! ```
//! use tuglingo_cst::{parse_module, translate_module, Language};
//!
//! let module = parse_module("raise Error(x)\nbreak;\n", None).unwrap();
//! let translated = translate_module(module, Language::Spanish).unwrap();
//! assert_eq!(translated.module.code(), "aumenta Error(x)\nrompe;\n");
//! assert_eq!(translated.statements, 2);
//! ```

use super::traits::{Transform, TransformResult, Transformer};
use crate::error::Result;
use crate::nodes::{
    Aumenta, Break, Continua, Continue, Devuelve, Module, Raise, Return, Rompe, SmallStatement,
};
use crate::options::Language;

/// A [`Transformer`] that respells statements in `target`.
#[derive(Debug, Clone)]
pub struct KeywordTranslator {
    target: Language,
    translated: usize,
}

impl KeywordTranslator {
    pub fn new(target: Language) -> Self {
        Self {
            target,
            translated: 0,
        }
    }

    pub fn target(&self) -> Language {
        self.target
    }

    /// Number of statements respelled so far.
    pub fn translated(&self) -> usize {
        self.translated
    }

    fn keep<'a>(
        &mut self,
        from: &'static str,
        node: SmallStatement<'a>,
    ) -> TransformResult<SmallStatement<'a>> {
        self.translated += 1;
        tracing::debug!(from, to = node.type_name(), "translated statement");
        Ok(Transform::Keep(node))
    }
}

impl<'a> Transformer<'a> for KeywordTranslator {
    fn transform_break_stmt(&mut self, node: Break<'a>) -> TransformResult<SmallStatement<'a>> {
        if self.target == Language::English {
            return Ok(Transform::Keep(node.into()));
        }
        self.keep("Break", Rompe::new(node.into_semicolon()).into())
    }

    fn transform_continue_stmt(
        &mut self,
        node: Continue<'a>,
    ) -> TransformResult<SmallStatement<'a>> {
        if self.target == Language::English {
            return Ok(Transform::Keep(node.into()));
        }
        self.keep("Continue", Continua::new(node.into_semicolon()).into())
    }

    fn transform_return_stmt(&mut self, node: Return<'a>) -> TransformResult<SmallStatement<'a>> {
        if self.target == Language::English {
            return Ok(Transform::Keep(node.into()));
        }
        self.keep("Return", Devuelve::from_parts(node.into_parts())?.into())
    }

    fn transform_raise_stmt(&mut self, node: Raise<'a>) -> TransformResult<SmallStatement<'a>> {
        if self.target == Language::English {
            return Ok(Transform::Keep(node.into()));
        }
        self.keep("Raise", Aumenta::from_parts(node.into_parts())?.into())
    }

    fn transform_rompe_stmt(&mut self, node: Rompe<'a>) -> TransformResult<SmallStatement<'a>> {
        if self.target == Language::Spanish {
            return Ok(Transform::Keep(node.into()));
        }
        self.keep("Rompe", Break::new(node.into_semicolon()).into())
    }

    fn transform_continua_stmt(
        &mut self,
        node: Continua<'a>,
    ) -> TransformResult<SmallStatement<'a>> {
        if self.target == Language::Spanish {
            return Ok(Transform::Keep(node.into()));
        }
        self.keep("Continua", Continue::new(node.into_semicolon()).into())
    }

    fn transform_devuelve_stmt(
        &mut self,
        node: Devuelve<'a>,
    ) -> TransformResult<SmallStatement<'a>> {
        if self.target == Language::Spanish {
            return Ok(Transform::Keep(node.into()));
        }
        self.keep("Devuelve", Return::from_parts(node.into_parts())?.into())
    }

    fn transform_aumenta_stmt(&mut self, node: Aumenta<'a>) -> TransformResult<SmallStatement<'a>> {
        if self.target == Language::Spanish {
            return Ok(Transform::Keep(node.into()));
        }
        self.keep("Aumenta", Raise::from_parts(node.into_parts())?.into())
    }
}

/// Result of [`translate_module`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translated<'a> {
    pub module: Module<'a>,
    /// How many statements changed language.
    pub statements: usize,
}

/// Respells every statement of `module` in `target`.
pub fn translate_module(module: Module<'_>, target: Language) -> Result<Translated<'_>> {
    let mut translator = KeywordTranslator::new(target);
    let module = module.visit(&mut translator)?;
    tracing::debug!(
        target_language = %target,
        statements = translator.translated(),
        "translated module"
    );
    Ok(Translated {
        module,
        statements: translator.translated(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_module;

    #[test]
    fn test_translate_to_spanish_keeps_formatting() {
        let source = "raise  E(x) from  c ;\nreturn\t(y)\ncontinue;break\n";
        let module = parse_module(source, None).unwrap();
        let translated = translate_module(module, Language::Spanish).unwrap();
        assert_eq!(
            translated.module.code(),
            "aumenta  E(x) from  c ;\ndevuelve\t(y)\ncontinúa;rompe\n"
        );
        assert_eq!(translated.statements, 4);
    }

    #[test]
    fn test_translate_to_english() {
        let module = parse_module("devuelve 1; pass\naumenta\nrompe # fin\n", None).unwrap();
        let translated = translate_module(module, Language::English).unwrap();
        assert_eq!(translated.module.code(), "return 1; pass\nraise\nbreak # fin\n");
        assert_eq!(translated.statements, 3);
    }

    #[test]
    fn test_translation_round_trips() {
        let source = "continúa\nreturn 'x'\n";
        let module = parse_module(source, None).unwrap();
        let english = translate_module(module.clone(), Language::English).unwrap();
        let spanish = translate_module(english.module, Language::Spanish).unwrap();
        assert_eq!(spanish.module.code(), "continúa\ndevuelve 'x'\n");
        assert_eq!(english.statements, 1);
        assert_eq!(spanish.statements, 2);
    }

    #[test]
    fn test_already_translated_is_untouched() {
        let module = parse_module("rompe\n", None).unwrap();
        let translated = translate_module(module.clone(), Language::Spanish).unwrap();
        assert_eq!(translated.module, module);
        assert_eq!(translated.statements, 0);

        let mut translator = KeywordTranslator::new(Language::Spanish);
        assert_eq!(translator.target(), Language::Spanish);
        let _ = module.visit(&mut translator).unwrap();
        assert_eq!(translator.translated(), 0);
    }
}

// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Keyword languages and configuration for parsing and code generation.
//!
//! This module provides [`Language`] and [`Dialect`], which decide which
//! statement keywords the parser recognises, together with the two option
//! structs threaded through the public API:
//!
//! - [`ParseOptions`]: dialect and encoding used by
//!   [`parse_module_with_options`](crate::parse_module_with_options).
//! - [`CodegenOptions`]: formatting policy used when regenerating source, such
//!   as the separator inserted between statements that share a line.
//!
//! Both option structs implement `serde::Deserialize` with field defaults, so
//! they can be read from a partial JSON (or any serde format) configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keywords reserved in every dialect.
const COMMON_KEYWORDS: &[&str] = &["pass", "from"];

const ENGLISH_KEYWORDS: &[&str] = &["raise", "return", "break", "continue"];

const SPANISH_KEYWORDS: &[&str] = &["aumenta", "devuelve", "rompe", "continúa"];

/// A keyword language for the statement family.
///
/// Each language spells `raise`, `return`, `break` and `continue` with its own
/// keyword. `pass` and the `from` clause are shared by both.
///
/// # Example
///
/// ```
/// use tuglingo_cst::{Language, StatementKind};
///
/// assert_eq!(Language::Spanish.keyword(StatementKind::Break), "rompe");
/// assert_eq!(Language::English.other(), Language::Spanish);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
}

/// The keyword-bearing statement shapes that exist in every [`Language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Raise,
    Return,
    Break,
    Continue,
}

impl Language {
    /// Both languages, English first.
    pub const ALL: [Language; 2] = [Language::English, Language::Spanish];

    /// Returns the keyword that spells `kind` in this language.
    #[must_use]
    pub fn keyword(self, kind: StatementKind) -> &'static str {
        match (self, kind) {
            (Self::English, StatementKind::Raise) => "raise",
            (Self::English, StatementKind::Return) => "return",
            (Self::English, StatementKind::Break) => "break",
            (Self::English, StatementKind::Continue) => "continue",
            (Self::Spanish, StatementKind::Raise) => "aumenta",
            (Self::Spanish, StatementKind::Return) => "devuelve",
            (Self::Spanish, StatementKind::Break) => "rompe",
            (Self::Spanish, StatementKind::Continue) => "continúa",
        }
    }

    /// Returns the statement keywords specific to this language.
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::English => ENGLISH_KEYWORDS,
            Self::Spanish => SPANISH_KEYWORDS,
        }
    }

    /// Returns the other language.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::English => Self::Spanish,
            Self::Spanish => Self::English,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "english"),
            Self::Spanish => write!(f, "spanish"),
        }
    }
}

/// The set of keyword languages the parser accepts.
///
/// Keywords of every accepted language are reserved: with
/// [`Dialect::Bilingual`] neither `rompe` nor `break` can be used as a name,
/// while with [`Dialect::English`] `rompe` parses as an ordinary name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    English,
    Spanish,
    /// Accept both keyword sets. This is the default, so that translated
    /// output can be parsed back without extra configuration.
    #[default]
    Bilingual,
}

impl Dialect {
    /// Returns whether statements spelled in `language` are recognised.
    #[must_use]
    pub fn accepts(self, language: Language) -> bool {
        match self {
            Self::Bilingual => true,
            Self::English => language == Language::English,
            Self::Spanish => language == Language::Spanish,
        }
    }

    /// Returns whether `word` is a keyword in this dialect.
    #[must_use]
    pub fn is_reserved(self, word: &str) -> bool {
        COMMON_KEYWORDS.contains(&word)
            || Language::ALL
                .iter()
                .any(|language| self.accepts(*language) && language.keywords().contains(&word))
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "english"),
            Self::Spanish => write!(f, "spanish"),
            Self::Bilingual => write!(f, "bilingual"),
        }
    }
}

/// Configuration options for parsing source code.
///
/// # Example
///
/// ```
/// use tuglingo_cst::{Dialect, ParseOptions};
///
/// // Default: both keyword languages, UTF-8
/// let options = ParseOptions::default();
/// assert_eq!(options.dialect, Dialect::Bilingual);
///
/// let options = ParseOptions::new(Dialect::Spanish).with_encoding("utf-8");
/// assert_eq!(options.encoding_str(), Some("utf-8"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Which keyword languages are recognised.
    pub dialect: Dialect,
    /// Optional encoding hint for the source.
    ///
    /// Only UTF-8 is supported; any other value is rejected by the parser. The
    /// value is kept on the resulting [`Module`](crate::Module).
    pub encoding: Option<String>,
}

impl ParseOptions {
    /// Creates parse options for a dialect.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            encoding: None,
        }
    }

    /// Sets the encoding hint.
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Returns the encoding hint as a string slice, if set.
    #[must_use]
    pub fn encoding_str(&self) -> Option<&str> {
        self.encoding.as_deref()
    }
}

/// Formatting policy for code generation.
///
/// The defaults reproduce the conventions of the parsed source: statements
/// sharing a line are separated by `"; "`, and newlines fall back to the
/// module's detected newline.
///
/// # Example
///
/// ```
/// use tuglingo_cst::CodegenOptions;
///
/// let options: CodegenOptions =
///     serde_json::from_str(r#"{ "default_semicolon": ";" }"#).unwrap();
/// assert_eq!(options.default_semicolon, ";");
/// assert!(!options.track_positions);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenOptions {
    /// Separator emitted after a statement with no explicit semicolon when
    /// another statement follows it on the same line.
    pub default_semicolon: String,
    /// Newline used by nodes without an explicit one. `None` uses the newline
    /// detected when the module was parsed.
    pub default_newline: Option<String>,
    /// Record syntactic positions of lines and statements while rendering.
    pub track_positions: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            default_semicolon: "; ".to_string(),
            default_newline: None,
            track_positions: false,
        }
    }
}

impl CodegenOptions {
    #[must_use]
    pub fn with_default_semicolon(mut self, separator: impl Into<String>) -> Self {
        self.default_semicolon = separator.into();
        self
    }

    #[must_use]
    pub fn with_default_newline(mut self, newline: impl Into<String>) -> Self {
        self.default_newline = Some(newline.into());
        self
    }

    #[must_use]
    pub fn with_positions(mut self) -> Self {
        self.track_positions = true;
        self
    }
}

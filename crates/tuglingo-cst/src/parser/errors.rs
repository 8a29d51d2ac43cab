// Copyright (c) Meta Platforms, Inc. and affiliates.
// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree

use thiserror::Error;

#[allow(clippy::enum_variant_names)]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParserError<'a> {
    #[error("parser error: {0}")]
    ParserError(peg::error::ParseError<peg::str::LineCol>, &'a str),
    #[error("unsupported encoding: {0} (only utf-8 is supported)")]
    UnsupportedEncoding(String),
}

pub type Result<'a, T> = std::result::Result<T, ParserError<'a>>;

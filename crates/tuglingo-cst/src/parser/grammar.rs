// Copyright (c) Meta Platforms, Inc. and affiliates.
// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree

//! PEG grammar for modules made of simple statement lines.
//!
//! The grammar works directly on the source text. Every whitespace run and
//! comment is captured into the node that owns it, so regenerating the tree
//! reproduces the input byte for byte.

use super::{
    attach_semicolons, keyword_statement, make_arg, raise_statement, return_statement, ArgTail,
    LineItem, RaiseTail, ReturnTail, Trailer,
};
use crate::nodes::{
    Arg, Comma, Comment, Dot, EmptyLine, Expr, Expression, FromClause, Integer, LeftParen,
    MaybeSentinel, Name, Newline, ParenthesizedNode, Pass, RightParen, Semicolon,
    SimpleStatementLine, SimpleString, SimpleWhitespace, SmallStatement, TrailingWhitespace,
};
use crate::options::{Language, ParseOptions, StatementKind};

peg::parser! {
    pub grammar python(options: &ParseOptions) for str {

        // Entry points

        pub rule file() -> Vec<LineItem<'input>>
            = items:line_item()* eof() { items }

        pub rule statement_input() -> SimpleStatementLine<'input>
            = leading_lines:empty_line()* body:small_statements()
              trailing_whitespace:trailing_whitespace() eof() {
                SimpleStatementLine { body, leading_lines, trailing_whitespace }
            }

        pub rule expression_input() -> Expression<'input>
            = e:expression() eof() { e }

        // Lines

        rule line_item() -> LineItem<'input>
            = line:empty_line() { LineItem::Empty(line) }
            / body:small_statements() trailing:trailing_whitespace() {
                LineItem::Statement(body, trailing)
            }

        rule empty_line() -> EmptyLine<'input>
            = whitespace:ws() comment:comment()? newline:newline() {
                EmptyLine { whitespace, comment, newline }
            }
            / whitespace:ws() comment:comment() &eof() {
                EmptyLine { whitespace, comment: Some(comment), newline: Newline::fake() }
            }
            / s:$(([' ' | '\t' | '\x0c'] / "\\" ("\r\n" / "\r" / "\n"))+) &eof() {
                EmptyLine {
                    whitespace: SimpleWhitespace::new_unchecked(s),
                    comment: None,
                    newline: Newline::fake(),
                }
            }

        rule trailing_whitespace() -> TrailingWhitespace<'input>
            = whitespace:ws() comment:comment()? newline:line_end() {
                TrailingWhitespace { whitespace, comment, newline }
            }

        rule line_end() -> Newline<'input>
            = newline()
            / eof() { Newline::fake() }

        rule newline() -> Newline<'input>
            = n:$("\r\n" / "\n" / "\r") {? Newline::new(n).map_err(|_| "newline") }

        rule eof() = quiet!{ ![_] } / expected!("end of input")

        rule ws() -> SimpleWhitespace<'input>
            = s:$(([' ' | '\t' | '\x0c'] / "\\" ("\r\n" / "\r" / "\n"))*) {
                SimpleWhitespace::new_unchecked(s)
            }

        rule comment() -> Comment<'input>
            = c:$("#" [^ '\r' | '\n']*) { Comment::new_unchecked(c) }

        // Statements

        rule small_statements() -> Vec<SmallStatement<'input>>
            = first:small_statement()
              rest:(sep:semicolon() stmt:small_statement() { (sep, stmt) })*
              last:semicolon()? {
                attach_semicolons(first, rest, last)
            }

        rule semicolon() -> Semicolon<'input>
            = before:ws() ";" after:ws() { Semicolon::new(before, after) }

        rule small_statement() -> SmallStatement<'input>
            = keyword("pass") { Pass::default().into() }
            / language:statement_keyword(StatementKind::Break) {
                keyword_statement(StatementKind::Break, language)
            }
            / language:statement_keyword(StatementKind::Continue) {
                keyword_statement(StatementKind::Continue, language)
            }
            / return_stmt()
            / raise_stmt()
            / value:expression() { Expr::new(value).into() }

        rule return_stmt() -> SmallStatement<'input>
            = language:statement_keyword(StatementKind::Return) tail:return_tail()? {?
                return_statement(language, tail).map_err(|_| "return statement")
            }

        rule return_tail() -> ReturnTail<'input>
            = whitespace:ws() value:expression() { (whitespace, value) }

        rule raise_stmt() -> SmallStatement<'input>
            = language:statement_keyword(StatementKind::Raise) tail:raise_tail()? {?
                raise_statement(language, tail).map_err(|_| "raise statement")
            }

        rule raise_tail() -> RaiseTail<'input>
            = whitespace:ws() exc:expression() cause:from_clause()? { (whitespace, exc, cause) }

        rule from_clause() -> FromClause<'input>
            = before:ws() keyword("from") after:ws() item:expression() {?
                FromClause::new(item, MaybeSentinel::Value(before), after)
                    .map_err(|_| "whitespace after 'from'")
            }

        // Keywords

        rule identifier() -> &'input str
            = quiet!{
                $([c if c == '_' || c.is_alphabetic()] [c if c == '_' || c.is_alphanumeric()]*)
            }
            / expected!("identifier")

        rule keyword(word: &'static str)
            = w:identifier() {? if w == word { Ok(()) } else { Err(word) } }

        // The language whose keyword for `kind` appears next, among the
        // languages the dialect accepts.
        rule statement_keyword(kind: StatementKind) -> Language
            = word:identifier() {?
                Language::ALL
                    .into_iter()
                    .find(|language| {
                        options.dialect.accepts(*language) && language.keyword(kind) == word
                    })
                    .ok_or("statement keyword")
            }

        // Expressions

        rule expression() -> Expression<'input>
            = head:atom() trailers:trailer()* {?
                trailers
                    .into_iter()
                    .try_fold(head, |value, trailer| trailer.apply(value))
                    .map_err(|_| "expression")
            }

        rule trailer() -> Trailer<'input>
            = dot:dot() attr:name() { Trailer::Attribute(dot, attr) }
            / whitespace_after_func:ws() "(" whitespace_before_args:ws() args:arg()* ")" {
                Trailer::Call { whitespace_after_func, whitespace_before_args, args }
            }

        rule arg() -> Arg<'input>
            = value:expression() tail:arg_tail() { make_arg(value, tail) }

        rule arg_tail() -> ArgTail<'input>
            = comma:comma() { ArgTail::Comma(comma) }
            / whitespace:ws() &")" { ArgTail::Whitespace(whitespace) }

        rule atom() -> Expression<'input>
            = lpar:lpar() value:expression() rpar:rpar() { value.with_parens(lpar, rpar) }
            / s:string() { s.into() }
            / i:integer() { i.into() }
            / n:name() { n.into() }

        rule name() -> Name<'input>
            = n:identifier() {?
                if options.dialect.is_reserved(n) {
                    Err("name")
                } else {
                    Ok(Name::new_unchecked(n))
                }
            }

        rule integer() -> Integer<'input>
            = i:$(['0'..='9'] ("_"? ['0'..='9'])*) { Integer::new_unchecked(i) }

        rule string() -> SimpleString<'input>
            = s:$(string_prefix()? (
                "\"" ([^ '"' | '\\' | '\r' | '\n'] / "\\" [^ '\n'])* "\""
              / "'" ([^ '\'' | '\\' | '\r' | '\n'] / "\\" [^ '\n'])* "'"
            )) { SimpleString::new_unchecked(s) }

        rule string_prefix()
            = ['r' | 'R'] ['b' | 'B']
            / ['b' | 'B'] ['r' | 'R']
            / ['r' | 'R' | 'b' | 'B' | 'u' | 'U']

        // Punctuation

        rule lpar() -> LeftParen<'input>
            = "(" whitespace_after:ws() { LeftParen { whitespace_after } }

        rule rpar() -> RightParen<'input>
            = whitespace_before:ws() ")" { RightParen { whitespace_before } }

        rule dot() -> Dot<'input>
            = whitespace_before:ws() "." whitespace_after:ws() {
                Dot { whitespace_before, whitespace_after }
            }

        rule comma() -> Comma<'input>
            = whitespace_before:ws() "," whitespace_after:ws() {
                Comma { whitespace_before, whitespace_after }
            }
    }
}

#[cfg(test)]
mod tests {
    use super::python;
    use crate::options::{Dialect, ParseOptions};
    use crate::nodes::SmallStatement;

    fn statement(source: &str, dialect: Dialect) -> Option<SmallStatement<'_>> {
        let options = ParseOptions::new(dialect);
        python::statement_input(source, &options)
            .ok()
            .and_then(|line| line.body.into_iter().next())
    }

    #[test]
    fn test_keywords_follow_dialect() {
        assert!(matches!(statement("rompe", Dialect::Bilingual), Some(SmallStatement::Rompe(_))));
        assert!(matches!(statement("rompe", Dialect::English), Some(SmallStatement::Expr(_))));
        assert!(matches!(statement("break", Dialect::Spanish), Some(SmallStatement::Expr(_))));
        assert!(matches!(
            statement("continúa", Dialect::Spanish),
            Some(SmallStatement::Continua(_))
        ));
        assert!(statement("break", Dialect::English).is_some());
    }

    #[test]
    fn test_keyword_prefix_is_a_name() {
        assert!(matches!(
            statement("breakfast", Dialect::Bilingual),
            Some(SmallStatement::Expr(_))
        ));
        assert!(matches!(statement("returned", Dialect::Bilingual), Some(SmallStatement::Expr(_))));
    }

    #[test]
    fn test_reserved_words_are_not_names() {
        assert!(statement("raise from", Dialect::Bilingual).is_none());
        assert!(statement("return pass", Dialect::Bilingual).is_none());
        assert!(statement("f(rompe)", Dialect::Bilingual).is_none());
        assert!(statement("f(rompe)", Dialect::English).is_some());
    }

    #[test]
    fn test_raise_needs_space_after_from() {
        assert!(statement("raise x from y", Dialect::Bilingual).is_some());
        assert!(statement("raise x from(y)", Dialect::Bilingual).is_some());
        assert!(statement("raise x fromy", Dialect::Bilingual).is_none());
        assert!(statement("raise from y", Dialect::Bilingual).is_none());
    }

    #[test]
    fn test_expression_input() {
        let options = ParseOptions::default();
        assert!(python::expression_input("a.b(c, 'd',)", &options).is_ok());
        assert!(python::expression_input("( x )", &options).is_ok());
        assert!(python::expression_input("f(a b)", &options).is_err());
        assert!(python::expression_input("x\n", &options).is_err());
    }
}

//! Expression grammar for variable and directive arguments
//!
//! Arguments are lexed with logos and parsed with chumsky into either a
//! literal or a dotted lookup path. A malformed argument is not a compile
//! error: it simply never resolves, and the directive that owns it reports
//! the failure at render time.

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;
use logos::Logos;

use crate::parser::ast::ExprKind;
use crate::value::Value;

/// Token produced by the expression lexer
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum ExprToken {
    #[token("true")]
    True,
    #[token("false")]
    False,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    #[regex(r"'([^'\\]|\\.)*'", |lex| unescape(lex.slice()))]
    Str(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[token(".")]
    Dot,
}

/// Strip the surrounding quotes and process backslash escapes
fn unescape(slice: &str) -> String {
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Canonical path segment for a numeric index like `items.0`
fn index_segment(n: f64) -> String {
    if n.fract() == 0.0 && n >= 0.0 {
        format!("{}", n as usize)
    } else {
        n.to_string()
    }
}

/// Parse a raw expression fragment
///
/// Returns `None` when the fragment is not a valid expression; callers
/// treat that the same as a name that fails to resolve.
pub fn parse_expression(input: &str) -> Option<ExprKind> {
    let len = input.len();

    let mut tokens = Vec::new();
    for (token, span) in ExprToken::lexer(input).spanned() {
        match token {
            Ok(token) => tokens.push((token, SimpleSpan::from(span))),
            Err(()) => return None,
        }
    }

    let token_stream = Stream::from_iter(tokens.into_iter())
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    expression_parser().parse(token_stream).into_result().ok()
}

fn expression_parser<'a, I>() -> impl Parser<'a, I, ExprKind, extra::Err<Rich<'a, ExprToken>>>
where
    I: ValueInput<'a, Token = ExprToken, Span = SimpleSpan>,
{
    let literal = select! {
        ExprToken::Str(s) => ExprKind::Literal(Value::String(s)),
        ExprToken::Number(n) => ExprKind::Literal(Value::Number(n)),
        ExprToken::True => ExprKind::Literal(Value::Bool(true)),
        ExprToken::False => ExprKind::Literal(Value::Bool(false)),
    };

    let segment = select! {
        ExprToken::Ident(name) => name,
        ExprToken::Number(n) => index_segment(n),
    };

    let path = segment
        .separated_by(just(ExprToken::Dot))
        .at_least(1)
        .collect::<Vec<_>>()
        .map(ExprKind::Path);

    choice((literal, path)).then_ignore(end())
}

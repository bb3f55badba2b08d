//! Template source tokenizer
//!
//! Splits raw template source into text, variable, directive, and comment
//! tokens according to the configured delimiters. Directive contents are
//! split further into whitespace-delimited components by a logos word lexer
//! that keeps quoted strings intact, so `import "My Macros.weft"` yields
//! exactly two components.

use logos::Logos;

use crate::error::TemplateError;
use crate::parser::ast::Spanned;
use crate::syntax::Syntax;

/// A lexed fragment of template source
///
/// Tag contents are stored trimmed, with the delimiters stripped.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Literal text copied through to the output
    Text(String),
    /// Contents of a variable tag
    Variable(String),
    /// Contents of a directive tag
    Block(String),
    /// Contents of a comment tag
    Comment(String),
}

impl Token {
    /// Raw contents of the token
    pub fn contents(&self) -> &str {
        match self {
            Token::Text(s) | Token::Variable(s) | Token::Block(s) | Token::Comment(s) => s,
        }
    }

    /// Split the contents into whitespace-delimited components
    ///
    /// Quoted strings count as a single component and keep their quotes.
    pub fn components(&self) -> Vec<String> {
        split_components(self.contents())
    }
}

/// Word-level lexer behind [`Token::components`]
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
enum Word {
    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,

    #[regex(r"'([^'\\]|\\.)*'")]
    SingleQuoted,

    #[regex(r#"[^ \t\n\r"']+"#)]
    Bare,
}

pub(crate) fn split_components(input: &str) -> Vec<String> {
    Word::lexer(input)
        .spanned()
        .filter_map(|(word, span)| word.ok().map(|_| input[span].to_string()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TagKind {
    Variable,
    Block,
    Comment,
}

impl TagKind {
    fn name(self) -> &'static str {
        match self {
            TagKind::Variable => "variable",
            TagKind::Block => "directive",
            TagKind::Comment => "comment",
        }
    }

    fn token(self, contents: String) -> Token {
        match self {
            TagKind::Variable => Token::Variable(contents),
            TagKind::Block => Token::Block(contents),
            TagKind::Comment => Token::Comment(contents),
        }
    }
}

/// Tokenize template source against the given delimiters
///
/// An opening delimiter without its closing partner is a syntax error whose
/// span runs from the opener to the end of the source.
pub fn tokenize(source: &str, syntax: &Syntax) -> Result<Vec<Spanned<Token>>, TemplateError> {
    let rules = [
        (
            syntax.block_start.as_str(),
            syntax.block_end.as_str(),
            TagKind::Block,
        ),
        (
            syntax.variable_start.as_str(),
            syntax.variable_end.as_str(),
            TagKind::Variable,
        ),
        (
            syntax.comment_start.as_str(),
            syntax.comment_end.as_str(),
            TagKind::Comment,
        ),
    ];

    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < source.len() {
        let next_tag = rules
            .iter()
            .filter_map(|&(start, end, kind)| {
                source[pos..]
                    .find(start)
                    .map(|offset| (pos + offset, start, end, kind))
            })
            .min_by_key(|&(at, _, _, _)| at);

        let Some((at, start, end, kind)) = next_tag else {
            tokens.push(Spanned::new(
                Token::Text(source[pos..].to_string()),
                pos..source.len(),
            ));
            break;
        };

        if at > pos {
            tokens.push(Spanned::new(Token::Text(source[pos..at].to_string()), pos..at));
        }

        let contents_start = at + start.len();
        let Some(offset) = source[contents_start..].find(end) else {
            return Err(TemplateError::syntax(
                format!("unclosed {} tag", kind.name()),
                at..source.len(),
            ));
        };

        let contents = source[contents_start..contents_start + offset].trim().to_string();
        let tag_end = contents_start + offset + end.len();
        tokens.push(Spanned::new(kind.token(contents), at..tag_end));
        pos = tag_end;
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source, &Syntax::default())
            .expect("Should tokenize")
            .into_iter()
            .map(|t| t.node)
            .collect()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(tokens("hello"), vec![Token::Text("hello".to_string())]);
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(tokens(""), vec![]);
    }

    #[test]
    fn test_mixed_tags() {
        assert_eq!(
            tokens("a {{ name }} b {% import \"m.weft\" %}{# note #}"),
            vec![
                Token::Text("a ".to_string()),
                Token::Variable("name".to_string()),
                Token::Text(" b ".to_string()),
                Token::Block("import \"m.weft\"".to_string()),
                Token::Comment("note".to_string()),
            ]
        );
    }

    #[test]
    fn test_contents_are_trimmed() {
        assert_eq!(
            tokens("{%   macro greet   %}"),
            vec![Token::Block("macro greet".to_string())]
        );
    }

    #[test]
    fn test_spans_cover_delimiters() {
        let spanned = tokenize("ab{{ x }}", &Syntax::default()).expect("Should tokenize");
        assert_eq!(spanned[0].span, 0..2);
        assert_eq!(spanned[1].span, 2..9);
    }

    #[test]
    fn test_unclosed_variable_tag() {
        let err = tokenize("text {{ name", &Syntax::default()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::syntax("unclosed variable tag", 5..12)
        );
    }

    #[test]
    fn test_unclosed_block_tag() {
        let err = tokenize("{% import", &Syntax::default()).unwrap_err();
        assert!(err.to_string().contains("unclosed directive tag"));
    }

    #[test]
    fn test_custom_delimiters() {
        let syntax = Syntax::new()
            .with_block_delimiters("<%", "%>")
            .with_variable_delimiters("<<", ">>");
        let spanned = tokenize("<% import x %><< y >>", &syntax).expect("Should tokenize");
        let kinds: Vec<_> = spanned.into_iter().map(|t| t.node).collect();
        assert_eq!(
            kinds,
            vec![
                Token::Block("import x".to_string()),
                Token::Variable("y".to_string()),
            ]
        );
    }

    #[test]
    fn test_components_plain_split() {
        let token = Token::Block("call greet world".to_string());
        assert_eq!(token.components(), vec!["call", "greet", "world"]);
    }

    #[test]
    fn test_components_keep_quotes() {
        let token = Token::Block("import \"Macros.weft\"".to_string());
        assert_eq!(token.components(), vec!["import", "\"Macros.weft\""]);
    }

    #[test]
    fn test_components_quoted_string_with_spaces() {
        let token = Token::Block("import \"My Macros.weft\"".to_string());
        assert_eq!(token.components(), vec!["import", "\"My Macros.weft\""]);
    }

    #[test]
    fn test_components_single_quotes() {
        let token = Token::Block("import 'm.weft'".to_string());
        assert_eq!(token.components(), vec!["import", "'m.weft'"]);
    }
}

//! BibTeX tokeniser
//!
//! Splits source text into alphanumeric runs and single-character symbols.
//! Whitespace and newlines are symbols too; the parser decides what to skip.

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::anychar,
    combinator::{map, recognize},
    IResult,
};

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of letters and digits
    Alphanumeric,
    /// Any other single character
    Symbol,
    /// Terminates every token stream
    EndOfInput,
}

/// A lexical unit with the 1-based line it started on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub line: u32,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind, line: u32) -> Self {
        Self {
            text: text.into(),
            kind,
            line,
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }

    pub fn is_alphanumeric(&self) -> bool {
        self.kind == TokenKind::Alphanumeric
    }

    /// True for a symbol token with exactly this text
    pub fn is_symbol(&self, text: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == text
    }

    pub fn is_whitespace(&self) -> bool {
        !self.is_end() && self.text.trim().is_empty()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.text)
    }
}

/// Letters and decimal digits; other numerals such as `²` are symbols
fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c.is_ascii_digit()
}

/// Next lexeme: a maximal alphanumeric run, or else one character
fn lexeme(input: &str) -> IResult<&str, (TokenKind, &str)> {
    alt((
        map(take_while1(is_word_char), |run| {
            (TokenKind::Alphanumeric, run)
        }),
        map(recognize(anychar), |sym| (TokenKind::Symbol, sym)),
    ))(input)
}

/// Split a text into tokens.
///
/// Never fails: the result always ends with exactly one `EndOfInput` token.
pub fn tokenise(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut line = 1u32;
    let mut remaining = text;

    while let Ok((rest, (kind, text))) = lexeme(remaining) {
        tokens.push(Token::new(text, kind, line));
        if kind == TokenKind::Symbol && text == "\n" {
            line += 1;
        }
        remaining = rest;
    }

    tokens.push(Token::new("", TokenKind::EndOfInput, line));
    tokens
}

//! BibTeX entry parser
//!
//! Recursive descent over the token stream produced by [`tokenise`]:
//! - `@type{id, key = value, ...}` entries
//! - bare identifier values (`year = 2024`)
//! - braced and quoted values with nested blocks
//! - `\` escape commands inside values
//! - `%` line comments between productions
//!
//! Each production takes the remaining token slice and hands back what it
//! did not consume. The first error aborts the whole parse.
//!
//! [`tokenise`]: crate::token::tokenise

use std::collections::BTreeMap;

use crate::block::{Block, Command, Content, Delimiter};
use crate::entry::{FieldValue, RawEntry};
use crate::error::{BibtexError, Result};
use crate::token::{Token, TokenKind};

/// Deepest block nesting accepted inside a field value
pub const MAX_BLOCK_DEPTH: usize = 256;

/// Stands in for the sentinel when a slice has run out
static END_OF_INPUT: Token = Token {
    text: String::new(),
    kind: TokenKind::EndOfInput,
    line: 0,
};

fn head(tokens: &[Token]) -> &Token {
    tokens.first().unwrap_or(&END_OF_INPUT)
}

fn advance(tokens: &[Token]) -> &[Token] {
    tokens.get(1..).unwrap_or_default()
}

/// Skip whitespace tokens and `%` comments running to the end of the line
pub fn skip_whitespace_and_comments(tokens: &[Token]) -> &[Token] {
    let mut tokens = tokens;
    loop {
        let token = head(tokens);
        if token.is_symbol("%") {
            tokens = advance(tokens);
            loop {
                let token = head(tokens);
                if token.is_end() {
                    return tokens;
                }
                tokens = advance(tokens);
                if token.is_symbol("\n") {
                    break;
                }
            }
        } else if token.is_whitespace() {
            tokens = advance(tokens);
        } else {
            return tokens;
        }
    }
}

/// Parse a sequence of tokens into raw BibTeX entries
pub fn parse_entries(tokens: &[Token]) -> Result<Vec<RawEntry>> {
    let mut entries = Vec::new();
    let mut remaining = tokens;

    loop {
        remaining = skip_whitespace_and_comments(remaining);
        if head(remaining).is_end() {
            return Ok(entries);
        }
        let (entry, rest) = parse_entry(remaining)?;
        entries.push(entry);
        remaining = rest;
    }
}

fn parse_entry(tokens: &[Token]) -> Result<(RawEntry, &[Token])> {
    let tokens = skip_whitespace_and_comments(tokens);
    let (entry_type, tokens) = parse_entry_type(tokens)?;

    let tokens = skip_whitespace_and_comments(tokens);
    let token = head(tokens);
    if !token.is_symbol("{") {
        return Err(BibtexError::syntax(token.line, "expected '{'"));
    }
    let (id, mut tokens) = parse_entry_id(advance(tokens))?;

    let mut fields = BTreeMap::new();
    loop {
        tokens = skip_whitespace_and_comments(tokens);
        if head(tokens).is_symbol("}") {
            tokens = advance(tokens);
            break;
        }
        let (key, value, more, rest) = parse_entry_field(tokens)?;
        // A repeated key overwrites the earlier value
        fields.insert(key, value);
        tokens = rest;
        if !more {
            break;
        }
    }

    Ok((
        RawEntry {
            entry_type,
            id: id.trim().to_string(),
            fields,
        },
        tokens,
    ))
}

fn parse_entry_type(tokens: &[Token]) -> Result<(String, &[Token])> {
    let token = head(tokens);
    if !token.is_symbol("@") {
        return Err(BibtexError::syntax(token.line, "expected '@'"));
    }
    let tokens = advance(tokens);
    let token = head(tokens);
    if !token.is_alphanumeric() {
        return Err(BibtexError::syntax(
            token.line,
            "expected alphanumeric identifier",
        ));
    }
    Ok((token.text.to_lowercase(), advance(tokens)))
}

/// Everything up to the first `,`, which is consumed as well
fn parse_entry_id(tokens: &[Token]) -> Result<(String, &[Token])> {
    let token = head(tokens);
    if token.is_symbol(",") {
        return Err(BibtexError::syntax(token.line, "unexpected ','"));
    }

    let mut id = String::new();
    let mut tokens = tokens;
    loop {
        let token = head(tokens);
        if token.is_end() {
            return Err(BibtexError::syntax(
                token.line,
                "unexpected end of input in entry id",
            ));
        }
        id.push_str(&token.text);
        tokens = advance(tokens);
        if head(tokens).is_symbol(",") {
            return Ok((id, advance(tokens)));
        }
    }
}

/// `key = value` followed by `,` or `}`; the flag tells whether more fields may follow
fn parse_entry_field(tokens: &[Token]) -> Result<(String, FieldValue, bool, &[Token])> {
    let tokens = skip_whitespace_and_comments(tokens);
    let token = head(tokens);
    if !token.is_alphanumeric() {
        return Err(BibtexError::syntax(
            token.line,
            "expected alphanumeric identifier",
        ));
    }
    let key = token.text.to_lowercase();

    let tokens = skip_whitespace_and_comments(advance(tokens));
    let token = head(tokens);
    if !token.is_symbol("=") {
        return Err(BibtexError::syntax(token.line, "expected '='"));
    }

    let tokens = skip_whitespace_and_comments(advance(tokens));
    let token = head(tokens);
    if token.is_end() {
        return Err(BibtexError::syntax(token.line, "unexpected end of input"));
    }
    let (value, tokens) = if token.is_alphanumeric() {
        (FieldValue::Text(token.text.clone()), advance(tokens))
    } else {
        let (block, rest) = parse_block(tokens)?;
        (FieldValue::Block(block), rest)
    };

    let tokens = skip_whitespace_and_comments(tokens);
    let token = head(tokens);
    if token.is_end() {
        return Err(BibtexError::syntax(token.line, "unexpected end of input"));
    }
    if !token.is_symbol(",") && !token.is_symbol("}") {
        return Err(BibtexError::syntax(token.line, "expected ',' or '}'"));
    }
    Ok((key, value, token.is_symbol(","), advance(tokens)))
}

/// Parse a `{...}` or `"..."` block. A block only closes on its own
/// delimiter, however deeply the other kind is nested inside it.
///
/// Nesting deeper than [`MAX_BLOCK_DEPTH`] is a syntax error.
pub fn parse_block(tokens: &[Token]) -> Result<(Block, &[Token])> {
    parse_nested_block(tokens, 1)
}

fn parse_nested_block(tokens: &[Token], depth: usize) -> Result<(Block, &[Token])> {
    let token = head(tokens);
    let delimiter = match token.kind {
        TokenKind::Symbol => Delimiter::from_opening(&token.text),
        _ => None,
    }
    .ok_or_else(|| BibtexError::syntax(token.line, "expected '{' or '\"'"))?;
    if depth > MAX_BLOCK_DEPTH {
        return Err(BibtexError::syntax(token.line, "blocks nested too deeply"));
    }
    let opened_on = token.line;

    let mut contents = Vec::new();
    let mut tokens = advance(tokens);
    loop {
        let token = head(tokens);
        if token.is_end() {
            return Err(BibtexError::syntax(
                opened_on,
                format!("unterminated block, expected '{}'", delimiter.closing()),
            ));
        }
        if token.is_symbol(delimiter.closing()) {
            return Ok((Block::new(delimiter, contents), advance(tokens)));
        }
        if token.is_symbol("{") || token.is_symbol("\"") {
            let (block, rest) = parse_nested_block(tokens, depth + 1)?;
            contents.push(Content::Block(block));
            tokens = rest;
            continue;
        }
        if token.is_symbol("\\") {
            tokens = advance(tokens);
            let name = head(tokens);
            if name.is_end() {
                return Err(BibtexError::syntax(
                    name.line,
                    "unexpected end of input after '\\'",
                ));
            }
            contents.push(Content::Command(Command::new(name.text.clone())));
        } else {
            contents.push(Content::Text(token.text.clone()));
        }
        tokens = advance(tokens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenise;

    fn parse(input: &str) -> Result<Vec<RawEntry>> {
        parse_entries(&tokenise(input))
    }

    fn block_field<'a>(entry: &'a RawEntry, key: &str) -> &'a Block {
        match entry.fields.get(key) {
            Some(FieldValue::Block(block)) => block,
            other => panic!("expected block for {}, got {:?}", key, other),
        }
    }

    #[test]
    fn test_parse_simple_entry() {
        let input = r#"
@Article{Smith2024,
    Author = {John Smith},
    title = "A Great Paper",
    year = 2024,
}
"#;
        let entries = parse(input).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.entry_type, "article");
        assert_eq!(entry.id, "Smith2024");
        assert_eq!(entry.fields.len(), 3);
        assert_eq!(block_field(entry, "author").to_string(), "{John Smith}");
        assert_eq!(block_field(entry, "title").delimiter, Delimiter::Quote);
        assert_eq!(
            entry.fields.get("year"),
            Some(&FieldValue::Text("2024".to_string()))
        );
    }

    #[test]
    fn test_parse_without_trailing_comma() {
        let entries = parse("@misc{k, note = {a}}").unwrap();
        assert_eq!(entries[0].fields.len(), 1);
    }

    #[test]
    fn test_parse_id_without_fields() {
        let entries = parse("@misc{k,}").unwrap();
        assert_eq!(entries[0].id, "k");
        assert!(entries[0].fields.is_empty());
    }

    #[test]
    fn test_entry_id_keeps_punctuation() {
        let entries = parse("@book{ doe:2020-a ,title={T}}").unwrap();
        assert_eq!(entries[0].id, "doe:2020-a");
    }

    #[test]
    fn test_parse_multiple_entries_and_comments() {
        let input = "% leading comment\n@article{a, title={First}}\n% between\n\n@book{b, title={Second}} % trailing";
        let entries = parse(input).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "a");
        assert_eq!(entries[1].entry_type, "book");
    }

    #[test]
    fn test_comment_between_fields() {
        let input = "@misc{k,\n  % a comment, with = signs\n  title = {T}\n}";
        let entries = parse(input).unwrap();
        assert_eq!(block_field(&entries[0], "title").to_string(), "{T}");
    }

    #[test]
    fn test_nested_blocks() {
        let entries = parse(r#"@misc{k, title = {A {B}ook "quoted" \'e}}"#).unwrap();
        let block = block_field(&entries[0], "title");
        assert_eq!(block.to_string(), r#"{A {B}ook "quoted" \'e}"#);
        assert!(matches!(block.contents[2], Content::Block(ref b) if b.delimiter == Delimiter::Brace));
        assert!(matches!(block.contents[5], Content::Block(ref b) if b.delimiter == Delimiter::Quote));
        assert_eq!(block.contents[7], Content::Command(Command::new("'")));
    }

    #[test]
    fn test_quote_block_closes_only_on_quote() {
        // The brace inside the quoted value is plain text
        let entries = parse(r#"@misc{k, title = "a } b"}"#).unwrap();
        assert_eq!(block_field(&entries[0], "title").to_string(), "\"a } b\"");
    }

    #[test]
    fn test_escaped_quote_inside_quote_block() {
        let entries = parse(r#"@misc{k, title = "M\"uller"}"#).unwrap();
        let block = block_field(&entries[0], "title");
        assert_eq!(block.contents[1], Content::Command(Command::new("\"")));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let entries = parse("@misc{k, note = {first}, note = {second}}").unwrap();
        assert_eq!(entries[0].fields.len(), 1);
        assert_eq!(block_field(&entries[0], "note").to_string(), "{second}");
    }

    #[test]
    fn test_missing_at() {
        let err = parse("article{k, title={T}}").unwrap_err();
        assert_eq!(err, BibtexError::syntax(1, "expected '@'"));
    }

    #[test]
    fn test_bad_entry_type() {
        let err = parse("@{k, title={T}}").unwrap_err();
        assert_eq!(err, BibtexError::syntax(1, "expected alphanumeric identifier"));
    }

    #[test]
    fn test_missing_opening_brace() {
        let err = parse("@article k, title={T}}").unwrap_err();
        assert_eq!(err, BibtexError::syntax(1, "expected '{'"));
    }

    #[test]
    fn test_leading_comma_in_id() {
        let err = parse("@article{, title={T}}").unwrap_err();
        assert_eq!(err, BibtexError::syntax(1, "unexpected ','"));
    }

    #[test]
    fn test_unterminated_id() {
        let err = parse("@article{k\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_bad_field_key() {
        let err = parse("@misc{k,\n  = {T}}").unwrap_err();
        assert_eq!(err, BibtexError::syntax(2, "expected alphanumeric identifier"));
    }

    #[test]
    fn test_missing_equals() {
        let err = parse("@misc{k, title {T}}").unwrap_err();
        assert_eq!(err, BibtexError::syntax(1, "expected '='"));
    }

    #[test]
    fn test_value_not_followed_by_separator() {
        let err = parse("@misc{k, title = {T} year = 2020}").unwrap_err();
        assert_eq!(err, BibtexError::syntax(1, "expected ',' or '}'"));
    }

    #[test]
    fn test_bad_value_start() {
        let err = parse("@misc{k, title = (T)}").unwrap_err();
        assert_eq!(err, BibtexError::syntax(1, "expected '{' or '\"'"));
    }

    #[test]
    fn test_unterminated_block_reports_opening_line() {
        let err = parse("@misc{k,\n  title = {never\n closed\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_nesting_depth_is_bounded() {
        let nested = |depth: usize| {
            format!(
                "@misc{{k, title = {}{}}}",
                "{".repeat(depth),
                "}".repeat(depth)
            )
        };
        assert!(parse(&nested(MAX_BLOCK_DEPTH)).is_ok());

        let err = parse(&nested(MAX_BLOCK_DEPTH + 1)).unwrap_err();
        assert_eq!(err, BibtexError::syntax(1, "blocks nested too deeply"));
    }

    #[test]
    fn test_escape_at_end_of_input() {
        let err = parse("@misc{k, title = {abc\\").unwrap_err();
        assert_eq!(err, BibtexError::syntax(1, "unexpected end of input after '\\'"));
    }

    #[test]
    fn test_truncated_stream_without_sentinel() {
        let mut tokens = tokenise("@misc{k, title = {abc");
        tokens.pop();
        assert!(matches!(
            parse_entries(&tokens),
            Err(BibtexError::Syntax { .. })
        ));
        assert_eq!(parse_entries(&[]).unwrap(), vec![]);
    }
}

//! Block tree for BibTeX field values
//!
//! A field value like `{Caf\'e {au} lait}` is kept as a tree of text,
//! escape commands and nested blocks until it is flattened into plain text.

use std::fmt;

use crate::diacritics;
use crate::error::Result;

/// Delimiter pair of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `{ ... }`
    Brace,
    /// `" ... "`
    Quote,
}

impl Delimiter {
    /// The delimiter opened by a token, if any
    pub fn from_opening(text: &str) -> Option<Self> {
        match text {
            "{" => Some(Self::Brace),
            "\"" => Some(Self::Quote),
            _ => None,
        }
    }

    pub fn opening(&self) -> &'static str {
        match self {
            Self::Brace => "{",
            Self::Quote => "\"",
        }
    }

    pub fn closing(&self) -> &'static str {
        match self {
            Self::Brace => "}",
            Self::Quote => "\"",
        }
    }
}

/// A TeX-style escape such as `\v` or `\'`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\{}", self.name)
    }
}

/// One element of a block's contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Command(Command),
    Block(Block),
    /// Content the renderers do not understand; shown as a `(?...?)` placeholder
    Other(String),
}

/// A balanced group of text, commands and nested blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub delimiter: Delimiter,
    pub contents: Vec<Content>,
}

impl Block {
    pub fn new(delimiter: Delimiter, contents: Vec<Content>) -> Self {
        Self {
            delimiter,
            contents,
        }
    }

    pub fn opening(&self) -> &'static str {
        self.delimiter.opening()
    }

    pub fn closing(&self) -> &'static str {
        self.delimiter.closing()
    }

    /// Flatten the block into plain text, decoding diacritic commands.
    ///
    /// A command takes the next content item as its argument. A whitespace
    /// argument leaves the command as written (`\\ `, `\c `); any other
    /// argument must be in the diacritic table.
    pub fn plain_text(&self) -> Result<String> {
        let mut out = String::new();
        let mut items = self.contents.iter();

        while let Some(item) = items.next() {
            match item {
                Content::Text(text) => out.push_str(text),
                Content::Block(block) => out.push_str(&block.plain_text()?),
                Content::Command(cmd) => {
                    let argument = match items.as_slice().first() {
                        Some(Content::Text(text)) => Some(text.clone()),
                        Some(Content::Block(block)) => Some(block.plain_text()?),
                        _ => None,
                    };
                    let Some(argument) = argument else {
                        out.push_str(&cmd.to_string());
                        continue;
                    };
                    if argument.trim().is_empty() {
                        out.push_str(&cmd.to_string());
                        out.push_str(&argument);
                    } else {
                        out.push(diacritics::decode(&cmd.name, &argument)?);
                    }
                    items.next();
                }
                Content::Other(raw) => out.push_str(&format!("(?{}?)", raw)),
            }
        }

        Ok(out)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opening())?;
        for item in &self.contents {
            match item {
                Content::Text(text) => f.write_str(text)?,
                Content::Command(cmd) => write!(f, "{}", cmd)?,
                Content::Block(block) => write!(f, "{}", block)?,
                Content::Other(raw) => write!(f, "(?{}?)", raw)?,
            }
        }
        f.write_str(self.closing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BibtexError;

    fn text(s: &str) -> Content {
        Content::Text(s.to_string())
    }

    fn cmd(name: &str) -> Content {
        Content::Command(Command::new(name))
    }

    fn brace(contents: Vec<Content>) -> Content {
        Content::Block(Block::new(Delimiter::Brace, contents))
    }

    #[test]
    fn test_display_round_trip_text() {
        let block = Block::new(
            Delimiter::Brace,
            vec![text("Caf"), cmd("'"), text("e"), text(" "), brace(vec![text("au")])],
        );
        assert_eq!(block.to_string(), "{Caf\\'e {au}}");

        let quoted = Block::new(Delimiter::Quote, vec![text("x")]);
        assert_eq!(quoted.to_string(), "\"x\"");
    }

    #[test]
    fn test_plain_text_decodes_text_argument() {
        let block = Block::new(Delimiter::Brace, vec![text("Caf"), cmd("'"), text("e")]);
        assert_eq!(block.plain_text().unwrap(), "Café");
    }

    #[test]
    fn test_plain_text_decodes_block_argument() {
        // Dvo\v{r}\'ak
        let block = Block::new(
            Delimiter::Brace,
            vec![
                text("Dvo"),
                cmd("v"),
                brace(vec![text("r")]),
                cmd("'"),
                text("ak"),
            ],
        );
        assert!(matches!(
            block.plain_text(),
            Err(BibtexError::UnknownCommand { command, argument }) if command == "'" && argument == "ak"
        ));

        let block = Block::new(
            Delimiter::Brace,
            vec![
                text("Dvo"),
                cmd("v"),
                brace(vec![text("r")]),
                cmd("'"),
                brace(vec![text("a")]),
                text("k"),
            ],
        );
        assert_eq!(block.plain_text().unwrap(), "Dvořák");
    }

    #[test]
    fn test_plain_text_dotless_i() {
        // Garc\'{\i}a
        let block = Block::new(
            Delimiter::Brace,
            vec![text("Garc"), cmd("'"), brace(vec![cmd("i")]), text("a")],
        );
        assert_eq!(block.plain_text().unwrap(), "García");
    }

    #[test]
    fn test_whitespace_argument_is_kept_literally() {
        let block = Block::new(
            Delimiter::Brace,
            vec![text("a"), cmd("\\"), text(" "), text("b")],
        );
        assert_eq!(block.plain_text().unwrap(), "a\\\\ b");
    }

    #[test]
    fn test_trailing_command_is_kept_literally() {
        let block = Block::new(Delimiter::Brace, vec![text("x"), cmd("LaTeX")]);
        assert_eq!(block.plain_text().unwrap(), "x\\LaTeX");
    }

    #[test]
    fn test_command_followed_by_command() {
        let block = Block::new(Delimiter::Brace, vec![cmd("'"), cmd("i")]);
        assert_eq!(block.plain_text().unwrap(), "\\'\\i");
    }

    #[test]
    fn test_other_content_renders_placeholder() {
        let block = Block::new(
            Delimiter::Brace,
            vec![text("a"), Content::Other("x".to_string())],
        );
        assert_eq!(block.plain_text().unwrap(), "a(?x?)");
        assert_eq!(block.to_string(), "{a(?x?)}");
    }

    #[test]
    fn test_nested_error_propagates() {
        let block = Block::new(
            Delimiter::Brace,
            vec![brace(vec![cmd("textbf"), brace(vec![text("bold")])])],
        );
        assert_eq!(
            block.plain_text(),
            Err(BibtexError::UnknownCommand {
                command: "textbf".to_string(),
                argument: "bold".to_string(),
            })
        );
    }
}

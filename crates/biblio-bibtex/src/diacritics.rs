//! TeX diacritic decoding
//!
//! Maps an accent command and its argument to a single Unicode character,
//! e.g. `\v{c}` to `č`. The argument is a single ASCII letter, or `\i` for
//! the dotless i.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::error::{BibtexError, Result};

lazy_static! {
    /// Command name -> argument -> decoded character
    static ref DIACRITICS: HashMap<&'static str, HashMap<&'static str, char>> = {
        let mut table: HashMap<&str, HashMap<&str, char>> = HashMap::new();
        for &(cmd, arg, c) in DIACRITIC_TABLE {
            table.entry(cmd).or_default().insert(arg, c);
        }
        table
    };
}

#[rustfmt::skip]
static DIACRITIC_TABLE: &[(&str, &str, char)] = &[
    // Caron
    ("v", "c", 'č'), ("v", "C", 'Č'),
    ("v", "d", 'ď'), ("v", "D", 'Ď'),
    ("v", "e", 'ě'), ("v", "E", 'Ě'),
    ("v", "l", 'ľ'), ("v", "L", 'Ľ'),
    ("v", "n", 'ň'), ("v", "N", 'Ň'),
    ("v", "r", 'ř'), ("v", "R", 'Ř'),
    ("v", "s", 'š'), ("v", "S", 'Š'),
    ("v", "t", 'ť'), ("v", "T", 'Ť'),
    ("v", "z", 'ž'), ("v", "Z", 'Ž'),

    // Ring
    ("r", "a", 'å'), ("r", "A", 'Å'),
    ("r", "u", 'ů'), ("r", "U", 'Ů'),

    // Cedilla
    ("c", "c", 'ç'), ("c", "C", 'Ç'),

    // Umlaut (diaeresis)
    ("\"", "a", 'ä'), ("\"", "A", 'Ä'),
    ("\"", "e", 'ë'), ("\"", "E", 'Ë'),
    ("\"", "\\i", 'ï'), ("\"", "I", 'Ï'),
    ("\"", "o", 'ö'), ("\"", "O", 'Ö'),
    ("\"", "u", 'ü'), ("\"", "U", 'Ü'),
    ("\"", "y", 'ÿ'), ("\"", "Y", 'Ÿ'),

    // Acute accent
    ("'", "a", 'á'), ("'", "A", 'Á'),
    ("'", "c", 'ć'), ("'", "C", 'Ć'),
    ("'", "e", 'é'), ("'", "E", 'É'),
    ("'", "\\i", 'í'), ("'", "I", 'Í'),
    ("'", "l", 'ĺ'), ("'", "L", 'Ĺ'),
    ("'", "n", 'ń'), ("'", "N", 'Ń'),
    ("'", "o", 'ó'), ("'", "O", 'Ó'),
    ("'", "r", 'ŕ'), ("'", "R", 'Ŕ'),
    ("'", "s", 'ś'), ("'", "S", 'Ś'),
    ("'", "u", 'ú'), ("'", "U", 'Ú'),
    ("'", "y", 'ý'), ("'", "Y", 'Ý'),
    ("'", "z", 'ź'), ("'", "Z", 'Ź'),

    // Grave accent
    ("`", "a", 'à'), ("`", "A", 'À'),
    ("`", "e", 'è'), ("`", "E", 'È'),
    ("`", "\\i", 'ì'), ("`", "I", 'Ì'),
    ("`", "o", 'ò'), ("`", "O", 'Ò'),
    ("`", "u", 'ù'), ("`", "U", 'Ù'),

    // Circumflex
    ("^", "a", 'â'), ("^", "A", 'Â'),
    ("^", "e", 'ê'), ("^", "E", 'Ê'),
    ("^", "\\i", 'î'), ("^", "I", 'Î'),
    ("^", "o", 'ô'), ("^", "O", 'Ô'),
    ("^", "u", 'û'), ("^", "U", 'Û'),

    // Tilde
    ("~", "a", 'ã'), ("~", "A", 'Ã'),
    ("~", "n", 'ñ'), ("~", "N", 'Ñ'),
    ("~", "o", 'õ'), ("~", "O", 'Õ'),

    // Double acute (Hungarian umlaut)
    ("H", "o", 'ő'), ("H", "O", 'Ő'),
    ("H", "u", 'ű'), ("H", "U", 'Ű'),
];

/// Look up the character produced by `\command{argument}`
pub fn lookup(command: &str, argument: &str) -> Option<char> {
    DIACRITICS
        .get(command)
        .and_then(|args| args.get(argument))
        .copied()
}

/// Decode `\command{argument}`, failing on pairs outside the table
pub fn decode(command: &str, argument: &str) -> Result<char> {
    lookup(command, argument).ok_or_else(|| BibtexError::UnknownCommand {
        command: command.to_string(),
        argument: argument.to_string(),
    })
}

/// Every `(command, argument, character)` triple the decoder knows
pub fn entries() -> impl Iterator<Item = (&'static str, &'static str, char)> {
    DIACRITIC_TABLE.iter().copied()
}

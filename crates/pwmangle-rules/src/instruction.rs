//! Instruction set for mutation rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule opcode.
///
/// The set is closed; any other leading character parses as `Unknown` and
/// executes as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // Whole-word
    Noop,             // :
    Lowercase,        // l
    Uppercase,        // u
    Capitalize,       // c
    InvertCapitalize, // C
    ToggleCase,       // t
    Reverse,          // r

    // Truncation
    DeleteFirst, // [
    DeleteLast,  // ]

    // Insertion
    Append,  // $X or +X
    Prepend, // ^X or -X

    // Positional
    ToggleAt,    // TN, N hex, zero-based
    DuplicateAt, // DN, N decimal, one-based

    Unknown(char),
}

/// How an opcode reads its argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgKind {
    None,
    Char,
    HexPosition,
    DecimalPosition,
}

impl Opcode {
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            ':' => Opcode::Noop,
            'l' => Opcode::Lowercase,
            'u' => Opcode::Uppercase,
            'c' => Opcode::Capitalize,
            'C' => Opcode::InvertCapitalize,
            't' => Opcode::ToggleCase,
            'r' => Opcode::Reverse,
            '[' => Opcode::DeleteFirst,
            ']' => Opcode::DeleteLast,
            '$' | '+' => Opcode::Append,
            '^' | '-' => Opcode::Prepend,
            'T' => Opcode::ToggleAt,
            'D' => Opcode::DuplicateAt,
            other => Opcode::Unknown(other),
        }
    }

    /// Canonical symbol for this opcode
    pub fn symbol(&self) -> char {
        match self {
            Opcode::Noop => ':',
            Opcode::Lowercase => 'l',
            Opcode::Uppercase => 'u',
            Opcode::Capitalize => 'c',
            Opcode::InvertCapitalize => 'C',
            Opcode::ToggleCase => 't',
            Opcode::Reverse => 'r',
            Opcode::DeleteFirst => '[',
            Opcode::DeleteLast => ']',
            Opcode::Append => '$',
            Opcode::Prepend => '^',
            Opcode::ToggleAt => 'T',
            Opcode::DuplicateAt => 'D',
            Opcode::Unknown(c) => *c,
        }
    }

    pub fn arg_kind(&self) -> ArgKind {
        match self {
            Opcode::Append | Opcode::Prepend => ArgKind::Char,
            Opcode::ToggleAt => ArgKind::HexPosition,
            Opcode::DuplicateAt => ArgKind::DecimalPosition,
            _ => ArgKind::None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Opcode::Unknown(_))
    }
}

/// A single instruction: opcode plus the raw text that followed it.
///
/// The symbol actually written is kept so `+X` and `-X` print back as written.
/// Serialized as its token text, so a deserialized opcode always matches its
/// symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Instruction {
    opcode: Opcode,
    symbol: char,
    arg: String,
}

impl Instruction {
    /// Parse one whitespace-free token. Returns `None` only for an empty token.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let symbol = chars.next()?;
        Some(Self {
            opcode: Opcode::from_symbol(symbol),
            symbol,
            arg: chars.as_str().to_string(),
        })
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Symbol as written in the rule text
    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn arg(&self) -> &str {
        &self.arg
    }

    /// First character of the argument, the only one any opcode consults
    pub fn arg_char(&self) -> Option<char> {
        self.arg.chars().next()
    }
}

impl TryFrom<String> for Instruction {
    type Error = String;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Instruction::from_token(&token).ok_or_else(|| "empty instruction token".to_string())
    }
}

impl From<Instruction> for String {
    fn from(inst: Instruction) -> Self {
        inst.to_string()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.symbol, self.arg)
    }
}

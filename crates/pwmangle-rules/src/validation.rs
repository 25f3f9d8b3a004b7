//! Static diagnostics for rule sets.
//!
//! Diagnostics never reject a rule. They point at instructions that will be
//! no-ops for every word, or that carry text the executor ignores.

use crate::instruction::{ArgKind, Instruction};
use crate::rule::{Rule, RuleSet};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Opcode outside the instruction set
    UnknownOpcode(char),
    /// Opcode needs an argument and has none
    MissingArgument,
    /// Position argument is not a digit in the expected radix
    InvalidPosition { radix: u32 },
    /// Position can never address a character (`D0`)
    UnreachablePosition,
    /// Characters after the ones the opcode reads
    IgnoredText(String),
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnknownOpcode(c) => write!(f, "unknown opcode '{c}' is a no-op"),
            DiagnosticKind::MissingArgument => {
                f.write_str("missing argument, instruction is a no-op")
            }
            DiagnosticKind::InvalidPosition { radix: 16 } => {
                f.write_str("position is not a hex digit, instruction is a no-op")
            }
            DiagnosticKind::InvalidPosition { .. } => {
                f.write_str("position is not a decimal digit, instruction is a no-op")
            }
            DiagnosticKind::UnreachablePosition => {
                f.write_str("position 0 is before the first character, instruction is a no-op")
            }
            DiagnosticKind::IgnoredText(text) => write!(f, "trailing text {text:?} is ignored"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Source line of the rule, when known
    pub line: Option<usize>,
    /// Index of the instruction within its rule
    pub index: usize,
    pub token: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        write!(f, "`{}`: {}", self.token, self.kind)
    }
}

/// Check a single instruction
pub fn check_instruction(inst: &Instruction) -> Option<DiagnosticKind> {
    let kind = inst.opcode().arg_kind();
    if !inst.opcode().is_known() {
        return Some(DiagnosticKind::UnknownOpcode(inst.symbol()));
    }

    let Some(first) = inst.arg_char() else {
        return (kind != ArgKind::None).then_some(DiagnosticKind::MissingArgument);
    };

    let rest = &inst.arg()[first.len_utf8()..];
    match kind {
        ArgKind::None => Some(DiagnosticKind::IgnoredText(inst.arg().to_string())),
        ArgKind::Char if !rest.is_empty() => Some(DiagnosticKind::IgnoredText(rest.to_string())),
        ArgKind::Char => None,
        ArgKind::HexPosition | ArgKind::DecimalPosition => {
            let radix = if kind == ArgKind::HexPosition { 16 } else { 10 };
            match first.to_digit(radix) {
                None => Some(DiagnosticKind::InvalidPosition { radix }),
                Some(0) if radix == 10 => Some(DiagnosticKind::UnreachablePosition),
                Some(_) if !rest.is_empty() => Some(DiagnosticKind::IgnoredText(rest.to_string())),
                Some(_) => None,
            }
        }
    }
}

/// Check every instruction of a rule
pub fn validate_rule(rule: &Rule) -> Vec<Diagnostic> {
    rule.iter()
        .enumerate()
        .filter_map(|(index, inst)| {
            check_instruction(inst).map(|kind| Diagnostic {
                line: rule.line(),
                index,
                token: inst.to_string(),
                kind,
            })
        })
        .collect()
}

/// Check every rule of a rule set, in order
pub fn validate_ruleset(rules: &RuleSet) -> Vec<Diagnostic> {
    rules.iter().flat_map(validate_rule).collect()
}

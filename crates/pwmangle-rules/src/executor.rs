//! Rule execution.
//!
//! Execution is fail-soft on purpose: an instruction with a missing or
//! invalid argument, a position outside the word, or an unknown opcode leaves
//! the word untouched and reports a `Skipped` outcome. Nothing here returns an
//! error, so a rule file of unknown quality can be applied to any word.

use crate::instruction::{Instruction, Opcode};
use crate::rule::Rule;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an instruction left the word unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    UnknownOpcode(char),
    MissingArgument,
    InvalidArgument(char),
    OutOfRange { position: usize, len: usize },
    EmptyWord,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownOpcode(c) => write!(f, "unknown opcode '{c}'"),
            SkipReason::MissingArgument => f.write_str("missing argument"),
            SkipReason::InvalidArgument(c) => write!(f, "invalid position '{c}'"),
            SkipReason::OutOfRange { position, len } => {
                write!(f, "position {position} out of range for length {len}")
            }
            SkipReason::EmptyWord => f.write_str("empty word"),
        }
    }
}

/// Result of executing one instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Applied,
    Skipped(SkipReason),
}

/// Mutation state for a single rule application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    chars: Vec<char>,
}

impl Word {
    pub fn new(word: &str) -> Self {
        Self {
            chars: word.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn into_string(self) -> String {
        self.chars.into_iter().collect()
    }

    /// Execute one instruction against the word
    pub fn execute(&mut self, inst: &Instruction) -> Outcome {
        match inst.opcode() {
            Opcode::Noop => Outcome::Applied,
            Opcode::Lowercase => {
                self.chars = self.chars.iter().flat_map(|c| c.to_lowercase()).collect();
                Outcome::Applied
            }
            Opcode::Uppercase => {
                self.chars = self.chars.iter().flat_map(|c| c.to_uppercase()).collect();
                Outcome::Applied
            }
            Opcode::Capitalize => {
                if self.is_empty() {
                    return Outcome::Skipped(SkipReason::EmptyWord);
                }
                self.chars = self.chars.iter().flat_map(|c| c.to_lowercase()).collect();
                self.replace_at(0, |c, out| out.extend(c.to_uppercase()));
                Outcome::Applied
            }
            Opcode::InvertCapitalize => {
                if self.is_empty() {
                    return Outcome::Skipped(SkipReason::EmptyWord);
                }
                self.chars = self.chars.iter().flat_map(|c| c.to_uppercase()).collect();
                self.replace_at(0, |c, out| out.extend(c.to_lowercase()));
                Outcome::Applied
            }
            Opcode::ToggleCase => {
                let mut out = Vec::with_capacity(self.chars.len());
                for &c in &self.chars {
                    push_toggled(c, &mut out);
                }
                self.chars = out;
                Outcome::Applied
            }
            Opcode::Reverse => {
                self.chars.reverse();
                Outcome::Applied
            }
            Opcode::DeleteFirst => {
                if self.is_empty() {
                    return Outcome::Skipped(SkipReason::EmptyWord);
                }
                self.chars.remove(0);
                Outcome::Applied
            }
            Opcode::DeleteLast => match self.chars.pop() {
                Some(_) => Outcome::Applied,
                None => Outcome::Skipped(SkipReason::EmptyWord),
            },
            Opcode::Append => match inst.arg_char() {
                Some(c) => {
                    self.chars.push(c);
                    Outcome::Applied
                }
                None => Outcome::Skipped(SkipReason::MissingArgument),
            },
            Opcode::Prepend => match inst.arg_char() {
                Some(c) => {
                    self.chars.insert(0, c);
                    Outcome::Applied
                }
                None => Outcome::Skipped(SkipReason::MissingArgument),
            },
            Opcode::ToggleAt => {
                let position = match position_arg(inst, 16) {
                    Ok(position) => position,
                    Err(reason) => return Outcome::Skipped(reason),
                };
                if position >= self.len() {
                    return Outcome::Skipped(SkipReason::OutOfRange {
                        position,
                        len: self.len(),
                    });
                }
                self.replace_at(position, push_toggled);
                Outcome::Applied
            }
            Opcode::DuplicateAt => {
                let nth = match position_arg(inst, 10) {
                    Ok(nth) => nth,
                    Err(reason) => return Outcome::Skipped(reason),
                };
                // One-based: D1 duplicates the first character
                let position = match nth.checked_sub(1) {
                    Some(position) if position < self.len() => position,
                    _ => {
                        return Outcome::Skipped(SkipReason::OutOfRange {
                            position: nth,
                            len: self.len(),
                        })
                    }
                };
                let c = self.chars[position];
                self.chars.insert(position + 1, c);
                Outcome::Applied
            }
            Opcode::Unknown(c) => Outcome::Skipped(SkipReason::UnknownOpcode(c)),
        }
    }

    /// Replace the char at `position` with whatever `f` pushes; callers check bounds
    fn replace_at(&mut self, position: usize, f: impl FnOnce(char, &mut Vec<char>)) {
        let mut replacement = Vec::with_capacity(1);
        f(self.chars[position], &mut replacement);
        self.chars.splice(position..=position, replacement);
    }
}

fn push_toggled(c: char, out: &mut Vec<char>) {
    if c.is_lowercase() {
        out.extend(c.to_uppercase());
    } else {
        out.extend(c.to_lowercase());
    }
}

/// Read the first argument character as a digit in `radix`
fn position_arg(inst: &Instruction, radix: u32) -> Result<usize, SkipReason> {
    let c = inst.arg_char().ok_or(SkipReason::MissingArgument)?;
    c.to_digit(radix)
        .map(|d| d as usize)
        .ok_or(SkipReason::InvalidArgument(c))
}

/// Apply a rule to a word. Total: never fails, may return the word unchanged.
pub fn apply(word: &str, rule: &Rule) -> String {
    let mut state = Word::new(word);
    for inst in rule {
        state.execute(inst);
    }
    state.into_string()
}

/// Apply a rule and report the outcome of every instruction
pub fn apply_traced(word: &str, rule: &Rule) -> (String, Vec<Outcome>) {
    let mut state = Word::new(word);
    let outcomes = rule.iter().map(|inst| state.execute(inst)).collect();
    (state.into_string(), outcomes)
}

impl Rule {
    pub fn apply(&self, word: &str) -> String {
        apply(word, self)
    }
}

//! Rules and rule sets.

use crate::instruction::Instruction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An ordered sequence of instructions, applied left to right
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    instructions: Vec<Instruction>,
    /// 1-based line in the rule file, if the rule came from one
    line: Option<usize>,
}

impl Rule {
    pub fn with_instructions(instructions: Vec<Instruction>) -> Self {
        Self {
            instructions,
            line: None,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, inst) in self.instructions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{inst}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Rule {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

/// Every rule loaded from one rule file, in file order.
///
/// Read-only once built; share it by reference or behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Count total instructions across all rules
    pub fn total_instructions(&self) -> usize {
        self.rules.iter().map(Rule::len).sum()
    }

    pub fn stats(&self) -> RuleSetStats {
        let mut opcode_counts = BTreeMap::new();
        for inst in self.rules.iter().flat_map(Rule::iter) {
            *opcode_counts.entry(inst.opcode().symbol().to_string()).or_insert(0) += 1;
        }
        RuleSetStats {
            rules: self.len(),
            instructions: self.total_instructions(),
            opcode_counts,
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// Summary counts for a rule set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetStats {
    pub rules: usize,
    pub instructions: usize,
    /// Instruction count per canonical opcode symbol
    pub opcode_counts: BTreeMap<String, usize>,
}

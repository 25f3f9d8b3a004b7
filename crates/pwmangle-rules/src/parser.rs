//! Rule text parsing.
//!
//! Parsing is purely syntactic and never fails: every whitespace-separated
//! token becomes an instruction whose opcode is its first character and whose
//! argument is the rest. Unknown opcodes and bad arguments are kept as data
//! and resolved by the executor.

use crate::instruction::Instruction;
use crate::rule::{Rule, RuleSet};

pub const COMMENT_MARKER: char = '#';

/// Returns true for lines that carry no rule: blank or `#` comments
pub fn is_ignored_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER)
}

/// Parse the text of one rule
pub fn parse_rule(text: &str) -> Rule {
    Rule::with_instructions(
        text.split_whitespace()
            .filter_map(Instruction::from_token)
            .collect(),
    )
}

/// Parse one rule-file line. Blank and comment lines yield `None`.
pub fn parse_line(line: &str, line_no: usize) -> Option<Rule> {
    if is_ignored_line(line) {
        return None;
    }
    Some(parse_rule(line).at_line(line_no))
}

impl RuleSet {
    /// Parse a whole rule file held in memory
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        text.lines()
            .enumerate()
            .filter_map(|(idx, line)| parse_line(line, idx + 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Opcode;

    #[test]
    fn test_parse_rule_tokens() {
        let rule = parse_rule("c  $1\t$2 $3");
        assert_eq!(rule.len(), 4);
        assert_eq!(rule.instructions()[0].opcode(), Opcode::Capitalize);
        assert_eq!(rule.instructions()[3].arg(), "3");
        assert_eq!(rule.to_string(), "c $1 $2 $3");
    }

    #[test]
    fn test_parse_unknown_opcode() {
        let rule = parse_rule("@ $X");
        assert_eq!(rule.len(), 2);
        assert_eq!(rule.instructions()[0].opcode(), Opcode::Unknown('@'));
        assert_eq!(rule.instructions()[1].opcode(), Opcode::Append);
    }

    #[test]
    fn test_parse_malformed_tokens() {
        // Missing and non-numeric arguments are still instructions
        let rule = parse_rule("$ Tz D");
        assert_eq!(rule.len(), 3);
        assert!(rule.instructions()[0].arg().is_empty());
        assert_eq!(rule.instructions()[1].arg(), "z");
    }

    #[test]
    fn test_ignored_lines() {
        assert!(is_ignored_line(""));
        assert!(is_ignored_line("   \t"));
        assert!(is_ignored_line("# comment"));
        assert!(is_ignored_line("   # indented comment"));
        assert!(!is_ignored_line(":"));
        assert!(!is_ignored_line("$#"));
    }

    #[test]
    fn test_parse_line_keeps_line_number() {
        assert!(parse_line("# best64", 1).is_none());
        let rule = parse_line("  u $!  ", 7).unwrap();
        assert_eq!(rule.line(), Some(7));
        assert_eq!(rule.to_string(), "u $!");
    }

    #[test]
    fn test_parse_rule_set() {
        let text = "\u{feff}# header\n:\n\nc $1\r\n  # note\nr\n";
        let rules = RuleSet::parse(text);
        assert_eq!(rules.len(), 3);
        assert_eq!(rules.get(0).unwrap().to_string(), ":");
        assert_eq!(rules.get(1).unwrap().to_string(), "c $1");
        assert_eq!(rules.get(1).unwrap().line(), Some(4));
        assert_eq!(rules.get(2).unwrap().to_string(), "r");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = "u\n$1 $2\n^a\n";
        assert_eq!(RuleSet::parse(text), RuleSet::parse(text));
    }
}

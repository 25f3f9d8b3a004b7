//! Rule-mutation interpreter.
//!
//! A rule file holds one rule per line. Each rule is a whitespace-separated
//! list of instructions, and each instruction is an opcode character followed
//! by an optional argument. The interpreter is built to be:
//! - Lenient: any line parses, bad instructions run as no-ops
//! - Ordered: rules keep file order, instructions run left to right
//! - Pure: applying a rule touches nothing but its own copy of the word
//! - Shareable: a loaded `RuleSet` is read-only and safe to share across threads

pub mod instruction;
pub mod rule;
pub mod parser;
pub mod loader;
pub mod executor;
pub mod validation;

pub use instruction::{ArgKind, Instruction, Opcode};
pub use rule::{Rule, RuleSet, RuleSetStats};
pub use parser::{parse_line, parse_rule};
pub use loader::load_ruleset;
pub use executor::{apply, apply_traced, Outcome, SkipReason, Word};
pub use validation::{validate_rule, validate_ruleset, Diagnostic, DiagnosticKind};

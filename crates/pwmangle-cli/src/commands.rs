//! Subcommand implementations.

use anyhow::{Context, Result};
use pwmangle_core::GuessConfig;
use pwmangle_guess::MutationDriver;
use pwmangle_rules::{apply, validate_ruleset, Diagnostic, RuleSet, RuleSetStats};
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Print the distinct non-empty results of every rule applied to each word
pub fn run_apply<W: Write>(rules: &RuleSet, words: &[String], out: &mut W) -> Result<()> {
    for word in words {
        let mut seen = HashSet::new();
        for rule in rules {
            let mutated = apply(word, rule);
            if !mutated.is_empty() && seen.insert(mutated.clone()) {
                writeln!(out, "{mutated}")?;
            }
        }
    }
    Ok(())
}

/// Command line limits take precedence over the configured ones.
///
/// The result is not validated here; `MutationDriver::new` rejects an
/// inverted window or a zero cap.
pub fn merge_guess(
    config: &GuessConfig,
    max_guesses: Option<usize>,
    min_len: Option<usize>,
    max_len: Option<usize>,
) -> GuessConfig {
    GuessConfig {
        max_guesses: max_guesses.unwrap_or(config.max_guesses),
        min_len: min_len.unwrap_or(config.min_len),
        max_len: max_len.unwrap_or(config.max_len),
        ..config.clone()
    }
}

/// Print the candidate list for the given seed words
pub fn run_guess<W: Write>(
    driver: &MutationDriver,
    words: Vec<String>,
    out: &mut W,
) -> Result<usize> {
    let candidates = driver.generate(words);
    for candidate in candidates.iter() {
        writeln!(out, "{candidate}")?;
    }
    Ok(candidates.len())
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub stats: RuleSetStats,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn new(rules: &RuleSet) -> Self {
        Self {
            stats: rules.stats(),
            diagnostics: validate_ruleset(rules),
        }
    }
}

/// Report statistics and diagnostics for a rule set. Never fails on content.
pub fn run_check<W: Write>(rules: &RuleSet, json: bool, out: &mut W) -> Result<CheckReport> {
    let report = CheckReport::new(rules);
    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(report);
    }

    writeln!(
        out,
        "{} rules, {} instructions, {} diagnostics",
        report.stats.rules,
        report.stats.instructions,
        report.diagnostics.len()
    )?;
    for (symbol, count) in &report.stats.opcode_counts {
        writeln!(out, "  {symbol}\t{count}")?;
    }
    for diagnostic in &report.diagnostics {
        writeln!(out, "{diagnostic}")?;
    }
    Ok(report)
}

/// Read seed words from a file, one per line, skipping blank lines
pub fn read_seed_file(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let seeds: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if seeds.is_empty() {
        warn!("Seed file {} has no words", path.display());
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_run_apply() {
        let rules = RuleSet::parse(":\nc\nu\nl\n[ [ [ [ [\n$1\n");
        let mut buf = Vec::new();
        run_apply(&rules, &["alice".to_string()], &mut buf).unwrap();
        assert_eq!(output(buf), "alice\nAlice\nALICE\nalice1\n");
    }

    #[test]
    fn test_run_guess() {
        let rules = Arc::new(RuleSet::parse("c $1\n$!\n"));
        let driver = MutationDriver::new(rules, GuessConfig::default()).unwrap();
        let mut buf = Vec::new();
        let words = vec!["alice".to_string(), "al".to_string()];
        let count = run_guess(&driver, words, &mut buf).unwrap();
        assert_eq!(count, 2);
        assert_eq!(output(buf), "Alice1\nalice!\n");
    }

    fn configured() -> GuessConfig {
        GuessConfig {
            max_guesses: 50,
            min_len: 6,
            max_len: 7,
            max_seeds: 3,
            min_seed_len: 4,
        }
    }

    #[test]
    fn test_merge_guess_flags_override_config() {
        let merged = merge_guess(&configured(), Some(5), None, Some(20));
        assert_eq!(merged.max_guesses, 5);
        assert_eq!(merged.min_len, 6);
        assert_eq!(merged.max_len, 20);
        assert_eq!(merged.max_seeds, 3);

        // The widened window lets the longer candidate through
        let rules = Arc::new(RuleSet::parse("c $1\n$1 $2 $3\n"));
        let narrow = MutationDriver::new(rules.clone(), configured()).unwrap();
        let wide = MutationDriver::new(rules, merged).unwrap();
        assert_eq!(narrow.generate(["alice"]).into_vec(), vec!["Alice1"]);
        assert_eq!(wide.generate(["alice"]).into_vec(), vec!["Alice1", "alice123"]);
    }

    #[test]
    fn test_merge_guess_falls_back_to_config() {
        assert_eq!(merge_guess(&configured(), None, None, None), configured());
    }

    #[test]
    fn test_merge_guess_inverted_window_rejected() {
        let merged = merge_guess(&configured(), None, Some(12), Some(8));
        assert_eq!((merged.min_len, merged.max_len), (12, 8));
        let result = MutationDriver::new(Arc::new(RuleSet::parse("$1\n")), merged);
        assert!(result.is_err());

        // A flag can invert the window on its own against the configured max_len
        let merged = merge_guess(&configured(), None, Some(12), None);
        assert!(MutationDriver::new(Arc::new(RuleSet::default()), merged).is_err());
    }

    #[test]
    fn test_run_check_text() {
        let rules = RuleSet::parse("c\n@ $1\n");
        let mut buf = Vec::new();
        let report = run_check(&rules, false, &mut buf).unwrap();
        assert_eq!(report.diagnostics.len(), 1);
        let text = output(buf);
        assert!(text.starts_with("2 rules, 3 instructions, 1 diagnostics\n"));
        assert!(text.contains("line 2: `@`"));
    }

    #[test]
    fn test_run_check_json() {
        let rules = RuleSet::parse("$\n");
        let mut buf = Vec::new();
        run_check(&rules, true, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["stats"]["rules"], 1);
        assert_eq!(value["diagnostics"][0]["kind"], "MissingArgument");
    }

    #[test]
    fn test_read_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seeds.txt");
        std::fs::write(&path, "alice\n\n  smith  \n").unwrap();
        assert_eq!(read_seed_file(&path).unwrap(), vec!["alice", "smith"]);
        assert!(read_seed_file(&dir.path().join("missing.txt")).is_err());
    }
}

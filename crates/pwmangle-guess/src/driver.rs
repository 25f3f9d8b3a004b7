//! Applies a rule set to seed words.

use crate::seeds::select_seeds;
use pwmangle_core::{CandidateList, GuessConfig, Result};
use pwmangle_rules::{apply, RuleSet};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Runs every rule against every selected seed.
///
/// The rule set is shared read-only; each rule application works on its own
/// word, so seeds are mutated in parallel.
pub struct MutationDriver {
    rules: Arc<RuleSet>,
    config: GuessConfig,
}

impl MutationDriver {
    pub fn new(rules: Arc<RuleSet>, config: GuessConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { rules, config })
    }

    /// All mutations of `seed`, in rule order, that are non-empty and differ from it
    pub fn mutate_seed(&self, seed: &str) -> Vec<String> {
        self.rules
            .iter()
            .map(|rule| apply(seed, rule))
            .filter(|mutated| !mutated.is_empty() && mutated != seed)
            .collect()
    }

    /// Generate the candidate list for one target's seed words.
    ///
    /// Output order is seed order, then rule order, with later duplicates and
    /// out-of-window lengths dropped.
    #[instrument(skip_all, fields(rules = self.rules.len()))]
    pub fn generate<I, S>(&self, words: I) -> CandidateList
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let seeds = select_seeds(words, &self.config);
        debug!("Selected {} seeds", seeds.len());

        let per_seed: Vec<Vec<String>> = seeds
            .par_iter()
            .map(|seed| self.mutate_seed(seed))
            .collect();

        let mut candidates = CandidateList::new(&self.config);
        for mutations in per_seed {
            candidates.extend(mutations);
            if candidates.is_full() {
                debug!("Candidate cap of {} reached", self.config.max_guesses);
                break;
            }
        }

        info!(
            seeds = seeds.len(),
            candidates = candidates.len(),
            "Generated candidates"
        );
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn driver(rules: &str, config: GuessConfig) -> MutationDriver {
        MutationDriver::new(Arc::new(RuleSet::parse(rules)), config).unwrap()
    }

    #[test]
    fn test_mutate_seed_drops_unchanged() {
        let d = driver(":\nc\nu\n$1 $2 $3\nl\n@\n", GuessConfig::default());
        assert_eq!(d.mutate_seed("alice"), vec!["Alice", "ALICE", "alice123"]);
    }

    #[test]
    fn test_mutate_seed_drops_empty() {
        let d = driver("[ [ [\n]\n", GuessConfig::default());
        assert_eq!(d.mutate_seed("abc"), vec!["ab"]);
    }

    #[test]
    fn test_generate_orders_and_dedups() {
        let d = driver("c $1\nu\n$1 T0\n$!\n", GuessConfig::default());
        let out = d.generate(["smith", "alice"]).into_vec();
        assert_eq!(out, vec!["Alice1", "alice!", "Smith1", "smith!"]);
    }

    #[test]
    fn test_generate_skips_short_seeds() {
        let d = driver("$1 $2 $3\n", GuessConfig::default());
        let out = d.generate(["bob", "alice"]).into_vec();
        assert_eq!(out, vec!["alice123"]);
    }

    #[test]
    fn test_generate_respects_cap() {
        let config = GuessConfig {
            max_guesses: 3,
            ..Default::default()
        };
        let d = driver("$1\n$2\n$3\n$4\n", config);
        let out = d.generate(["alice", "brenda"]);
        assert_eq!(out.len(), 3);
        assert!(out.is_full());
        assert_eq!(out.into_vec(), vec!["alice1", "alice2", "alice3"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GuessConfig {
            max_guesses: 0,
            ..Default::default()
        };
        assert!(MutationDriver::new(Arc::new(RuleSet::default()), config).is_err());
    }

    #[test]
    fn test_shared_rules_across_threads() {
        let rules = Arc::new(RuleSet::parse("c\nr\n$1\n"));
        let handles: Vec<_> = ["alice", "brenda", "carlos"]
            .into_iter()
            .map(|seed| {
                let d = MutationDriver::new(rules.clone(), GuessConfig::default()).unwrap();
                std::thread::spawn(move || d.mutate_seed(seed))
            })
            .collect();
        let results: Vec<Vec<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results[0], vec!["Alice", "ecila", "alice1"]);
        assert_eq!(results[2], vec!["Carlos", "solrac", "carlos1"]);
    }

    proptest! {
        #[test]
        fn prop_generate_is_deterministic(
            words in proptest::collection::vec("[a-z]{0,10}", 0..12)
        ) {
            let d = driver("c\nu\n$1 $2\nr\n^9\nT2\nD3\n", GuessConfig::default());
            let first = d.generate(words.clone()).into_vec();
            let second = d.generate(words).into_vec();
            prop_assert_eq!(first, second);
        }
    }
}

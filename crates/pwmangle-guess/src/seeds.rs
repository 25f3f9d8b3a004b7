//! Seed word selection.

use pwmangle_core::GuessConfig;
use std::collections::BTreeSet;

/// Pick the words that rules are applied to.
///
/// Duplicates are removed, the shortest `max_seeds` words are kept (ties in
/// lexical order), and words shorter than `min_seed_len` are then dropped.
pub fn select_seeds<I, S>(words: I, config: &GuessConfig) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let unique: BTreeSet<String> = words.into_iter().map(Into::into).collect();
    let mut seeds: Vec<String> = unique.into_iter().collect();
    seeds.sort_by_key(|w| w.chars().count());
    seeds.truncate(config.max_seeds);
    seeds.retain(|w| w.chars().count() >= config.min_seed_len);
    seeds
}

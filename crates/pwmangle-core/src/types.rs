//! Core type definitions shared across crates.

use crate::config::GuessConfig;
use serde::Serialize;
use std::collections::HashSet;

/// Ordered, deduplicated list of password candidates.
///
/// Insertion order is kept; a candidate already present, outside the length
/// window, or arriving after the cap is reached is dropped.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateList {
    config: GuessConfig,
    items: Vec<String>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl CandidateList {
    pub fn new(config: &GuessConfig) -> Self {
        Self {
            config: config.clone(),
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Offer a candidate. Returns true if it was kept.
    pub fn push(&mut self, candidate: impl Into<String>) -> bool {
        if self.is_full() {
            return false;
        }
        let candidate = candidate.into();
        if candidate.is_empty() || !self.config.accepts_len(candidate.chars().count()) {
            return false;
        }
        if !self.seen.insert(candidate.clone()) {
            return false;
        }
        self.items.push(candidate);
        true
    }

    pub fn extend<I, S>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for candidate in candidates {
            if self.is_full() {
                break;
            }
            self.push(candidate);
        }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.config.max_guesses
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

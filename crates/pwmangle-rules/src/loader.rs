//! Rule file loading.

use crate::rule::RuleSet;
use pwmangle_core::{Error, Result};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Load a rule file.
///
/// Fails only when the file cannot be read. Content never causes an error:
/// invalid UTF-8 is replaced and malformed instructions become no-ops.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_ruleset(path: impl AsRef<Path>) -> Result<RuleSet> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let rules = RuleSet::from_reader(file).map_err(|e| Error::io(path, e))?;
    info!("Loaded {} rules from {}", rules.len(), path.display());
    Ok(rules)
}

impl RuleSet {
    /// Read and parse a rule file from any byte source
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = String::from_utf8_lossy(&bytes);
        let total_lines = text.lines().count();
        let rules = RuleSet::parse(&text);
        debug!(
            total_lines,
            rules = rules.len(),
            ignored = total_lines - rules.len(),
            "Parsed rule text"
        );
        Ok(rules)
    }
}

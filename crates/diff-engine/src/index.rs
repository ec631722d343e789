use std::collections::BTreeMap;

use jarlint_archive::ArchiveWalker;
use jarlint_classfile::{read_class, ClassSummary, ReaderPolicy};
use tracing::warn;

use crate::error::EngineError;

/// Maps class name to its structural summary. A `BTreeMap` gives the
/// ascending key order the diff engine's traversal requires (spec §4.4,
/// §8 P2) for free, rather than sorting a `HashMap`'s keys at diff time.
pub type ClassIndex = BTreeMap<String, ClassSummary>;

/// Component C3: drives the archive walker and, for each surviving
/// class-file payload, the class summary reader, composing the two into one
/// archive's `ClassIndex` (spec §4.3).
pub fn build_index(bytes: &[u8], policy: ReaderPolicy) -> Result<(ClassIndex, Vec<String>), EngineError> {
    let mut walker = ArchiveWalker::open(bytes)?;
    let mut index = ClassIndex::new();
    let mut warnings = Vec::new();

    while let Some(entry) = walker.next_entry() {
        match read_class(&entry.payload, policy) {
            Ok(Some(summary)) => {
                if let Some(existing) = index.get(&summary.name) {
                    let msg = format!(
                        "duplicate class `{}` found in entry `{}` (keeping the first occurrence, `{}` was already indexed)",
                        summary.name, entry.name, existing.name
                    );
                    warn!("{msg}");
                    warnings.push(msg);
                } else {
                    index.insert(summary.name.clone(), summary);
                }
            }
            Ok(None) => {
                // Filtered out by visibility policy — not a warning.
            }
            Err(e) => {
                let msg = format!("skipped malformed class entry `{}`: {e}", entry.name);
                warn!("{msg}");
                warnings.push(msg);
            }
        }
    }

    for w in walker.warnings() {
        warnings.push(w.to_string());
    }

    if walker.class_named_entries_seen() == 0 {
        return Err(EngineError::NoClassFiles);
    }

    Ok((index, warnings))
}

use std::io::{Cursor, Read};

use tracing::warn;
use zip::ZipArchive;

use crate::error::{ArchiveError, EntryWarning};

pub const CLASS_FILE_MAGIC: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBE];
pub const CLASS_FILE_SUFFIX: &str = ".class";

/// One surviving compiled-class entry: its name within the archive (never
/// used as a filesystem path, spec §4.1) and its raw payload.
pub struct ClassEntry {
    pub name: String,
    pub payload: Vec<u8>,
}

/// Enumerates compiled-class entries within a ZIP-format archive. A single
/// pass: entries are consumed by [`ArchiveWalker::next_entry`] until the
/// archive is exhausted.
#[derive(Debug)]
pub struct ArchiveWalker {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    next_index: usize,
    warnings: Vec<EntryWarning>,
    class_named_entries_seen: usize,
}

impl ArchiveWalker {
    /// Opens the archive and validates its central directory. Does not by
    /// itself guarantee the archive contains class entries — that is
    /// checked once the caller has walked it (see `ClassIndexBuilder`,
    /// which raises `NoClassFiles` if the walk yields nothing).
    pub fn open(bytes: &[u8]) -> Result<Self, ArchiveError> {
        let cursor = Cursor::new(bytes.to_vec());
        let archive = ZipArchive::new(cursor).map_err(|e| ArchiveError::MalformedArchive(e.to_string()))?;
        Ok(Self { archive, next_index: 0, warnings: Vec::new(), class_named_entries_seen: 0 })
    }

    /// Warnings accumulated so far from skipped entries.
    pub fn warnings(&self) -> &[EntryWarning] {
        &self.warnings
    }

    /// Count of entries named `*.class` encountered so far, regardless of
    /// whether their payload survived the magic-byte check. Used by the
    /// caller to distinguish "archive has no class entries at all" from
    /// "every class entry happened to be malformed".
    pub fn class_named_entries_seen(&self) -> usize {
        self.class_named_entries_seen
    }

    /// Returns the next surviving class entry, or `None` once the archive is
    /// exhausted. Skipped entries (directories, non-`.class` names,
    /// zero-length payloads, bad magic, per-entry read failures) are
    /// recorded as warnings and silently passed over.
    pub fn next_entry(&mut self) -> Option<ClassEntry> {
        while self.next_index < self.archive.len() {
            let index = self.next_index;
            self.next_index += 1;

            let mut file = match self.archive.by_index(index) {
                Ok(f) => f,
                Err(e) => {
                    let warning = EntryWarning::ReadFailed {
                        name: format!("entry#{index}"),
                        reason: e.to_string(),
                    };
                    warn!("{warning}");
                    self.warnings.push(warning);
                    continue;
                }
            };

            let name = file.name().to_string();
            if file.is_dir() || !name.ends_with(CLASS_FILE_SUFFIX) {
                continue;
            }
            self.class_named_entries_seen += 1;

            let mut payload = Vec::new();
            let read_result = file.read_to_end(&mut payload);
            drop(file);
            if let Err(e) = read_result {
                let warning = EntryWarning::ReadFailed { name, reason: e.to_string() };
                warn!("{warning}");
                self.warnings.push(warning);
                continue;
            }

            if payload.is_empty() {
                let warning = EntryWarning::EmptyEntry { name };
                warn!("{warning}");
                self.warnings.push(warning);
                continue;
            }
            if payload.len() < 4 || payload[0..4] != CLASS_FILE_MAGIC {
                let warning = EntryWarning::BadMagic { name };
                warn!("{warning}");
                self.warnings.push(warning);
                continue;
            }

            return Some(ClassEntry { name, payload });
        }
        None
    }
}

impl Iterator for ArchiveWalker {
    type Item = ClassEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry()
    }
}

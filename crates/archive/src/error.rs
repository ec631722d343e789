use thiserror::Error;

/// Terminal failure opening an archive (spec §7). Whether the archive
/// contains any class files can only be known after walking it, so that
/// check lives with the caller (see `jarlint_diff_engine::build_index`) and
/// is surfaced as `EngineError::NoClassFiles`, not from here.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive is not a readable ZIP-format container: {0}")]
    MalformedArchive(String),
}

/// A condition on a single entry that is downgraded to a warning instead of
/// aborting the walk (spec §4.1 "Edge-case policies").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryWarning {
    EmptyEntry { name: String },
    BadMagic { name: String },
    ReadFailed { name: String, reason: String },
}

impl std::fmt::Display for EntryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryWarning::EmptyEntry { name } => write!(f, "skipped empty entry `{name}`"),
            EntryWarning::BadMagic { name } => {
                write!(f, "skipped entry `{name}`: does not start with the class-file magic")
            }
            EntryWarning::ReadFailed { name, reason } => {
                write!(f, "failed to read entry `{name}`: {reason}")
            }
        }
    }
}

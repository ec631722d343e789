//! ZIP-format archive walker.
//!
//! Opens a byte source presumed to be a ZIP archive and yields a lazy,
//! single-pass sequence of compiled-class entries. This is component C1 of
//! the comparison engine (spec §4.1).

pub mod error;
pub mod walker;

pub use error::{ArchiveError, EntryWarning};
pub use walker::{ArchiveWalker, ClassEntry, CLASS_FILE_MAGIC, CLASS_FILE_SUFFIX};

//! Binary-compatibility comparison engine.
//!
//! Consumes two compiled-class archives and produces an ordered list of
//! typed change records, each classified with a binary-compatibility impact
//! level. The engine is pure (inputs in, `ComparisonResult` out), has no
//! process-wide state, and never suspends — see the crate's single entry
//! point, [`compare`].

pub mod changes;
pub mod classify;
pub mod diff;
pub mod error;
pub mod index;
pub mod request;
pub mod result;

mod engine;

pub use changes::{ChangeKind, ChangeRecord, ImpactLevel};
pub use engine::compare;
pub use error::EngineError;
pub use index::ClassIndex;
pub use request::{ArchiveInput, ComparisonPolicy, ComparisonRequest};
pub use result::{ComparisonResult, ComparisonSummary, Status};

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::changes::{ChangeKind, ChangeRecord, ImpactLevel};
use crate::error::EngineError;

/// Top-level comparison outcome (spec §7 "User-visible behavior").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Success,
    Partial,
    Failed,
}

/// Summary aggregates derived from the change list (spec §4.6). These must
/// exactly match the record list (spec §8 P3) — computed once, in
/// [`ComparisonSummary::from_records`], and never constructed by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub total_changes: usize,
    pub breaking_changes: usize,
    pub class_changes: usize,
    pub method_changes: usize,
    pub field_changes: usize,
    pub changes_by_type: HashMap<ChangeKind, usize>,
    pub changes_by_impact: HashMap<ImpactLevel, usize>,
}

impl ComparisonSummary {
    pub fn from_records(records: &[ChangeRecord]) -> Self {
        let mut changes_by_type: HashMap<ChangeKind, usize> = HashMap::new();
        let mut changes_by_impact: HashMap<ImpactLevel, usize> = HashMap::new();
        let mut class_changes = 0;
        let mut method_changes = 0;
        let mut field_changes = 0;
        let mut breaking_changes = 0;

        for r in records {
            *changes_by_type.entry(r.kind).or_insert(0) += 1;
            *changes_by_impact.entry(r.compatibility_impact).or_insert(0) += 1;
            if r.kind.is_class_level() {
                class_changes += 1;
            } else if r.kind.is_method_level() {
                method_changes += 1;
            } else if r.kind.is_field_level() {
                field_changes += 1;
            }
            if r.compatibility_impact.is_breaking() {
                breaking_changes += 1;
            }
        }

        Self {
            total_changes: records.len(),
            breaking_changes,
            class_changes,
            method_changes,
            field_changes,
            changes_by_type,
            changes_by_impact,
        }
    }

    /// The `InternalInvariantViolation` guard from spec §7: aggregates must
    /// always match the record list they were derived from. This should be
    /// unreachable by construction, which is exactly why it must never be
    /// suppressed if it ever does trigger.
    pub fn check_consistency(&self, records: &[ChangeRecord]) -> Result<(), EngineError> {
        if self.total_changes != records.len() {
            return Err(EngineError::InternalInvariantViolation(format!(
                "totalChanges {} does not match record count {}",
                self.total_changes,
                records.len()
            )));
        }
        let expected_breaking = records.iter().filter(|r| r.compatibility_impact.is_breaking()).count();
        if self.breaking_changes != expected_breaking {
            return Err(EngineError::InternalInvariantViolation(format!(
                "breakingChanges {} does not match expected {}",
                self.breaking_changes, expected_breaking
            )));
        }
        Ok(())
    }
}

/// The full comparison outcome (spec §3 `ComparisonResult`, §6 wire shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub request_id: String,
    pub analysis_type: &'static str,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_ms: i64,
    pub status: Status,
    pub old_jar_name: String,
    pub new_jar_name: String,
    pub old_jar_class_count: usize,
    pub new_jar_class_count: usize,
    pub changes: Vec<ChangeRecord>,
    pub comparison_summary: ComparisonSummary,
    pub warnings: Vec<String>,
}

impl ComparisonResult {
    pub fn failed(
        request_id: String,
        old_jar_name: String,
        new_jar_name: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        diagnostic: String,
    ) -> Self {
        Self {
            request_id,
            analysis_type: "JAR_COMPARISON",
            start_time,
            end_time,
            duration_ms: (end_time - start_time).num_milliseconds(),
            status: Status::Failed,
            old_jar_name,
            new_jar_name,
            old_jar_class_count: 0,
            new_jar_class_count: 0,
            changes: Vec::new(),
            comparison_summary: ComparisonSummary::from_records(&[]),
            warnings: vec![diagnostic],
        }
    }
}

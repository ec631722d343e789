use tracing::{info, warn};
use uuid::Uuid;

use crate::diff::diff;
use crate::index::build_index;
use crate::request::ComparisonRequest;
use crate::result::{ComparisonResult, ComparisonSummary, Status};

/// The engine's single concrete entry point (spec §9: no `Analyzer<Request,
/// Result>` generic scaffolding needed). Never panics: validation failures
/// and the two terminal error kinds from spec §7 are converted into a
/// `ComparisonResult` with `status: Failed` rather than propagated as a Rust
/// error, matching "on failure the status is FAILED with a single
/// diagnostic string and no change list".
pub fn compare(request: ComparisonRequest) -> ComparisonResult {
    let start_time = chrono::Utc::now();
    let request_id = request.request_id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());

    if let Err(e) = request.validate() {
        warn!("comparison {request_id} rejected: {e}");
        let end_time = chrono::Utc::now();
        return ComparisonResult::failed(
            request_id,
            request.old.display_name,
            request.new.display_name,
            start_time,
            end_time,
            e.to_string(),
        );
    }

    let reader_policy = request.policy.into();

    let old_index = build_index(&request.old.bytes, reader_policy);
    let new_index = build_index(&request.new.bytes, reader_policy);

    let (old_index, new_index, mut warnings) = match (old_index, new_index) {
        (Ok((oi, mut ow)), Ok((ni, nw))) => {
            ow.extend(nw);
            (oi, ni, ow)
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!("comparison {request_id} failed: {e}");
            let end_time = chrono::Utc::now();
            return ComparisonResult::failed(
                request_id,
                request.old.display_name,
                request.new.display_name,
                start_time,
                end_time,
                e.to_string(),
            );
        }
    };

    let old_count = old_index.len();
    let new_count = new_index.len();

    let mut changes = diff(&old_index, &new_index, &request.policy);
    if !request.policy.detect_binary_compatibility {
        // Classification still runs inside `diff` (it is cheap and keeps the
        // function total); when the caller opted out, only the *reporting*
        // of the impact label is suppressed, by resetting it uniformly —
        // the change is still real and still reported.
        for change in &mut changes {
            change.compatibility_impact = crate::changes::ImpactLevel::None;
            change.reasons.clear();
        }
    }

    let summary = ComparisonSummary::from_records(&changes);
    if let Err(e) = summary.check_consistency(&changes) {
        warn!("comparison {request_id} hit an internal invariant violation: {e}");
        let end_time = chrono::Utc::now();
        return ComparisonResult::failed(
            request_id,
            request.old.display_name,
            request.new.display_name,
            start_time,
            end_time,
            e.to_string(),
        );
    }

    let status = if warnings.is_empty() { Status::Success } else { Status::Partial };
    warnings.dedup();

    let end_time = chrono::Utc::now();
    info!(
        "comparison {request_id} complete: {} classes old, {} classes new, {} changes, status {:?}",
        old_count,
        new_count,
        changes.len(),
        status
    );

    ComparisonResult {
        request_id,
        analysis_type: "JAR_COMPARISON",
        start_time,
        end_time,
        duration_ms: (end_time - start_time).num_milliseconds(),
        status,
        old_jar_name: request.old.display_name,
        new_jar_name: request.new.display_name,
        old_jar_class_count: old_count,
        new_jar_class_count: new_count,
        changes,
        comparison_summary: summary,
        warnings,
    }
}

//! Renders a `ComparisonResult` as either the wire-shaped JSON or a
//! human-readable table.

use colored::*;
use jarlint_diff_engine::{ComparisonResult, ImpactLevel, Status};

pub fn format_json(result: &ComparisonResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub fn format_text(result: &ComparisonResult) -> String {
    let mut out = String::new();

    let status_label = match result.status {
        Status::Success => "SUCCESS".green().bold(),
        Status::Partial => "PARTIAL".yellow().bold(),
        Status::Failed => "FAILED".red().bold(),
    };
    out.push_str(&format!(
        "{} {} -> {}  [{}]\n",
        "Comparison".bold(),
        result.old_jar_name,
        result.new_jar_name,
        status_label
    ));
    out.push_str(&format!(
        "{} classes old, {} classes new, {} ms\n\n",
        result.old_jar_class_count, result.new_jar_class_count, result.duration_ms
    ));

    if result.status == Status::Failed {
        for warning in &result.warnings {
            out.push_str(&format!("{} {}\n", "Error:".red().bold(), warning));
        }
        return out;
    }

    if result.changes.is_empty() {
        out.push_str(&format!("{}\n", "No changes detected.".green()));
    } else {
        for change in &result.changes {
            let impact = colorize_impact(change.compatibility_impact);
            let member = change.member_name.as_deref().unwrap_or("");
            out.push_str(&format!(
                "[{}] {} {} {}\n",
                impact,
                format!("{:?}", change.kind).to_uppercase(),
                change.class_name,
                member
            ));
            out.push_str(&format!("    {}\n", change.description));
            if let Some(old) = &change.old_signature {
                out.push_str(&format!("    old: {old}\n"));
            }
            if let Some(new) = &change.new_signature {
                out.push_str(&format!("    new: {new}\n"));
            }
        }
        out.push('\n');
    }

    let summary = &result.comparison_summary;
    out.push_str(&format!(
        "{}: {} total, {} breaking, {} class, {} method, {} field\n",
        "Summary".bold(),
        summary.total_changes,
        summary.breaking_changes,
        summary.class_changes,
        summary.method_changes,
        summary.field_changes
    ));

    if !result.warnings.is_empty() {
        out.push_str(&format!("\n{} ({}):\n", "Warnings".yellow().bold(), result.warnings.len()));
        for warning in &result.warnings {
            out.push_str(&format!("  - {warning}\n"));
        }
    }

    out
}

fn colorize_impact(impact: ImpactLevel) -> ColoredString {
    match impact {
        ImpactLevel::Breaking => "BREAKING".red().bold(),
        ImpactLevel::High => "HIGH".red(),
        ImpactLevel::Medium => "MEDIUM".yellow(),
        ImpactLevel::Low => "LOW".yellow(),
        ImpactLevel::None => "NONE".green(),
    }
}

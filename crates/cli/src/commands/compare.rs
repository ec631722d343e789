//! `compare` command implementation.

use anyhow::{Context, Result};

use jarlint_diff_engine::{ArchiveInput, ComparisonPolicy, ComparisonRequest};

use crate::cli::{Cli, Commands, OutputFormat};
use crate::{config, output};

pub fn run(cli: &Cli) -> Result<()> {
    let Commands::Compare { old, new, format, private, package_private, fields, annotations, no_compat } =
        &cli.command
    else {
        unreachable!("compare::run called with a non-Compare command")
    };

    let mut policy = ComparisonPolicy::default();
    config::load(cli.config.as_deref())?.apply_to(&mut policy);

    if let Some(v) = private {
        policy.include_private_members = *v;
    }
    if let Some(v) = package_private {
        policy.include_package_private_classes = *v;
    }
    if let Some(v) = fields {
        policy.analyze_field_changes = *v;
    }
    if let Some(v) = annotations {
        policy.analyze_annotations = *v;
    }
    if let Some(v) = no_compat {
        policy.detect_binary_compatibility = !v;
    }

    let old_input =
        ArchiveInput::from_path(old).with_context(|| format!("failed to read {}", old.display()))?;
    let new_input =
        ArchiveInput::from_path(new).with_context(|| format!("failed to read {}", new.display()))?;

    let request = ComparisonRequest::new(old_input, new_input, policy);
    let result = jarlint_diff_engine::compare(request);

    let rendered = match format {
        OutputFormat::Json => output::format_json(&result)?,
        OutputFormat::Text => output::format_text(&result),
    };
    println!("{rendered}");

    if result.status == jarlint_diff_engine::Status::Failed {
        std::process::exit(1);
    }
    Ok(())
}

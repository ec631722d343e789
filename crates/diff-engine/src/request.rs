use crate::error::EngineError;

/// The five policy flags named in spec §3 `ComparisonRequest`.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonPolicy {
    pub include_private_members: bool,
    pub include_package_private_classes: bool,
    pub analyze_field_changes: bool,
    pub analyze_annotations: bool,
    pub detect_binary_compatibility: bool,
}

impl Default for ComparisonPolicy {
    /// Public-surface-only, compatibility-classified comparison — the
    /// common case a caller reaches for first.
    fn default() -> Self {
        Self {
            include_private_members: false,
            include_package_private_classes: false,
            analyze_field_changes: true,
            analyze_annotations: true,
            detect_binary_compatibility: true,
        }
    }
}

impl From<ComparisonPolicy> for jarlint_classfile::ReaderPolicy {
    fn from(policy: ComparisonPolicy) -> Self {
        jarlint_classfile::ReaderPolicy {
            include_private_members: policy.include_private_members,
            include_package_private_classes: policy.include_package_private_classes,
            analyze_field_changes: policy.analyze_field_changes,
            analyze_annotations: policy.analyze_annotations,
        }
    }
}

/// One side of a comparison: the archive bytes plus a display name used in
/// the assembled result and in rendered signatures.
#[derive(Debug, Clone)]
pub struct ArchiveInput {
    pub display_name: String,
    pub bytes: Vec<u8>,
    /// An addressable identity for the resource this input came from (a file
    /// path, URL, or similar), when one exists. Two inputs sharing a
    /// resource identity is what spec §3's "distinct addressable resources"
    /// invariant actually guards against — comparing identical *content* is
    /// the well-defined, successful no-op case from spec §8 P1, so content
    /// equality is deliberately never checked here. See DESIGN.md Open
    /// Question #1.
    pub resource_id: Option<String>,
}

impl ArchiveInput {
    pub fn from_bytes(display_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { display_name: display_name.into(), bytes, resource_id: None }
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Ok(Self { display_name, bytes, resource_id: Some(path.to_string_lossy().into_owned()) })
    }
}

/// A single comparison request (spec §3 `ComparisonRequest`).
#[derive(Debug, Clone)]
pub struct ComparisonRequest {
    pub request_id: Option<String>,
    pub old: ArchiveInput,
    pub new: ArchiveInput,
    pub policy: ComparisonPolicy,
}

impl ComparisonRequest {
    pub fn new(old: ArchiveInput, new: ArchiveInput, policy: ComparisonPolicy) -> Self {
        Self { request_id: None, old, new, policy }
    }

    /// Validates the request before any comparison work starts (spec §7
    /// `InvalidRequest`, "surfaced immediately at validation").
    pub fn validate(&self) -> Result<(), EngineError> {
        if let (Some(a), Some(b)) = (&self.old.resource_id, &self.new.resource_id) {
            if a == b {
                return Err(EngineError::InvalidRequest(format!(
                    "old and new inputs both resolve to the same resource: {a}"
                )));
            }
        }
        Ok(())
    }
}

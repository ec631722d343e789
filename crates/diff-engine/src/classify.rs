//! Compatibility classifier (component C5, spec §4.5).
//!
//! A pure mapping from a change's kind and transition to an [`ImpactLevel`]
//! plus the fixed reason strings from the spec's rule table. Every function
//! here is total and side-effect free so the diff engine can call it inline
//! while constructing each `ChangeRecord`.

use jarlint_classfile::AccessFlags;

use crate::changes::ImpactLevel;

pub fn class_removed() -> (ImpactLevel, Vec<String>) {
    (ImpactLevel::Breaking, vec!["Class no longer exists in the new version".to_string()])
}

pub fn class_added() -> (ImpactLevel, Vec<String>) {
    (ImpactLevel::None, vec!["New class added".to_string()])
}

pub fn method_removed() -> (ImpactLevel, Vec<String>) {
    (
        ImpactLevel::Breaking,
        vec!["Method no longer exists".to_string(), "Calling code will fail at runtime".to_string()],
    )
}

pub fn method_added() -> (ImpactLevel, Vec<String>) {
    (ImpactLevel::None, vec!["New method available".to_string()])
}

pub fn field_removed() -> (ImpactLevel, Vec<String>) {
    (ImpactLevel::Breaking, vec!["Field no longer exists".to_string()])
}

pub fn field_added() -> (ImpactLevel, Vec<String>) {
    (ImpactLevel::None, vec!["New field available".to_string()])
}

pub fn field_type_changed() -> (ImpactLevel, Vec<String>) {
    (ImpactLevel::Breaking, vec!["Field type change breaks binary compatibility".to_string()])
}

pub fn annotation_changed() -> (ImpactLevel, Vec<String>) {
    (ImpactLevel::Low, vec!["Annotation set changed".to_string()])
}

/// Shared between `method_access_changed` and `field_access_changed` (spec
/// §4.5: "same rules as method_access_changed"). `old` and `new` must
/// already be known to differ — the diff loop only calls this when an
/// access-changed record is being emitted at all.
pub fn access_changed(old: AccessFlags, new: AccessFlags) -> (ImpactLevel, Vec<String>) {
    let old_rank = old.dominant_visibility().rank();
    let new_rank = new.dominant_visibility().rank();
    if new_rank < old_rank {
        (ImpactLevel::Breaking, vec!["Reduced visibility may break callers".to_string()])
    } else if new_rank > old_rank {
        (ImpactLevel::None, vec!["Widened visibility".to_string()])
    } else {
        (ImpactLevel::Low, vec!["Non-visibility flag change".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarlint_classfile::access_flags::{ACC_FINAL, ACC_PROTECTED, ACC_PUBLIC};

    #[test]
    fn narrowing_visibility_is_breaking() {
        let (impact, _) = access_changed(AccessFlags::new(ACC_PUBLIC), AccessFlags::new(ACC_PROTECTED));
        assert_eq!(impact, ImpactLevel::Breaking);
    }

    #[test]
    fn widening_visibility_is_none() {
        let (impact, _) = access_changed(AccessFlags::new(ACC_PROTECTED), AccessFlags::new(ACC_PUBLIC));
        assert_eq!(impact, ImpactLevel::None);
    }

    #[test]
    fn non_visibility_flag_change_is_low() {
        let (impact, _) =
            access_changed(AccessFlags::new(ACC_PUBLIC), AccessFlags::new(ACC_PUBLIC | ACC_FINAL));
        assert_eq!(impact, ImpactLevel::Low);
    }
}

use serde::{Deserialize, Serialize};

/// The closed change-kind enumeration (spec §4.4). Three method-level kinds
/// and two class/annotation-level kinds are enumerated but structurally
/// unreachable from the diff loop described below — see spec §9 Open
/// Questions 1-3 and DESIGN.md. They are kept so a consumer deserializing a
/// `ChangeRecord` from elsewhere never fails on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    ClassAdded,
    ClassRemoved,
    /// Reserved: no class-level attribute comparison beyond membership is
    /// performed, so this is never constructed (spec §9 Open Question 2).
    ClassModified,

    MethodAdded,
    MethodRemoved,
    MethodAccessChanged,
    /// Reserved: methods are keyed by (name, descriptor), so a signature
    /// change is observed as remove+add, never as this kind (spec §9 Open
    /// Question 1).
    MethodSignatureChanged,
    /// Reserved, same reason as `MethodSignatureChanged`.
    MethodReturnTypeChanged,
    /// Reserved, same reason as `MethodSignatureChanged`.
    MethodParameterChanged,

    FieldAdded,
    FieldRemoved,
    FieldTypeChanged,
    FieldAccessChanged,

    AnnotationAdded,
    AnnotationRemoved,
    /// Reserved: annotation values are never parsed, only presence/absence
    /// of the annotation type, so a "modified" annotation is unobservable
    /// (spec §9 Open Question 3).
    AnnotationModified,
}

impl ChangeKind {
    pub fn is_class_level(self) -> bool {
        matches!(self, ChangeKind::ClassAdded | ChangeKind::ClassRemoved | ChangeKind::ClassModified)
    }

    pub fn is_method_level(self) -> bool {
        matches!(
            self,
            ChangeKind::MethodAdded
                | ChangeKind::MethodRemoved
                | ChangeKind::MethodAccessChanged
                | ChangeKind::MethodSignatureChanged
                | ChangeKind::MethodReturnTypeChanged
                | ChangeKind::MethodParameterChanged
        )
    }

    pub fn is_field_level(self) -> bool {
        matches!(
            self,
            ChangeKind::FieldAdded
                | ChangeKind::FieldRemoved
                | ChangeKind::FieldTypeChanged
                | ChangeKind::FieldAccessChanged
        )
    }

    pub fn is_annotation_level(self) -> bool {
        matches!(self, ChangeKind::AnnotationAdded | ChangeKind::AnnotationRemoved | ChangeKind::AnnotationModified)
    }
}

/// The binary-compatibility impact label, ascending severity (spec §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactLevel {
    None,
    Low,
    Medium,
    High,
    Breaking,
}

impl ImpactLevel {
    /// A change "breaks" callers of the old archive when its impact is
    /// `High` or `Breaking` (spec §4.6 `breaking_changes`, GLOSSARY).
    pub fn is_breaking(self) -> bool {
        matches!(self, ImpactLevel::High | ImpactLevel::Breaking)
    }
}

/// One typed difference between the old and new archive (spec §3
/// `ChangeRecord`). For additions, `old_signature` is `None`; for removals,
/// `new_signature` is `None`; for modifications, both are `Some` and unequal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub class_name: String,
    pub member_name: Option<String>,
    pub old_signature: Option<String>,
    pub new_signature: Option<String>,
    pub description: String,
    pub compatibility_impact: ImpactLevel,
    pub reasons: Vec<String>,
}

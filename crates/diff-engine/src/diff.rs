use std::collections::{BTreeSet, HashMap};

use jarlint_classfile::{ClassSummary, FieldSummary, MethodKey, MethodSummary, Visibility};

use crate::changes::{ChangeKind, ChangeRecord, ImpactLevel};
use crate::classify;
use crate::index::ClassIndex;
use crate::request::ComparisonPolicy;

/// Component C4: produces the ordered list of `ChangeRecord`s for two class
/// indices (spec §4.4). Traversal order is fixed: the ascending sort of the
/// union of class names, then per-class members in old-then-new-only order,
/// then annotations lexicographically — this determinism is required
/// property P2 (spec §8).
pub fn diff(old: &ClassIndex, new: &ClassIndex, policy: &ComparisonPolicy) -> Vec<ChangeRecord> {
    let mut records = Vec::new();

    let mut all_names: BTreeSet<&String> = old.keys().collect();
    all_names.extend(new.keys());

    for name in all_names {
        match (old.get(name), new.get(name)) {
            (Some(old_class), None) => records.push(class_removed(old_class)),
            (None, Some(new_class)) => records.push(class_added(new_class)),
            (Some(old_class), Some(new_class)) => {
                diff_methods(old_class, new_class, &mut records);
                if policy.analyze_field_changes {
                    diff_fields(old_class, new_class, &mut records);
                }
                if policy.analyze_annotations {
                    diff_annotations(name, None, &old_class.annotation_types, &new_class.annotation_types, &mut records);
                }
            }
            (None, None) => unreachable!("name came from the union of both indices' keys"),
        }
    }

    records
}

fn record(
    kind: ChangeKind,
    class_name: &str,
    member_name: Option<String>,
    old_signature: Option<String>,
    new_signature: Option<String>,
    description: String,
    impact: ImpactLevel,
    reasons: Vec<String>,
) -> ChangeRecord {
    ChangeRecord {
        kind,
        class_name: class_name.to_string(),
        member_name,
        old_signature,
        new_signature,
        description,
        compatibility_impact: impact,
        reasons,
    }
}

fn class_removed(old_class: &ClassSummary) -> ChangeRecord {
    let (impact, reasons) = classify::class_removed();
    record(
        ChangeKind::ClassRemoved,
        &old_class.name,
        None,
        Some(old_class.extends_signature()),
        None,
        format!("Class `{}` no longer exists in the new archive", old_class.name),
        impact,
        reasons,
    )
}

fn class_added(new_class: &ClassSummary) -> ChangeRecord {
    let (impact, reasons) = classify::class_added();
    record(
        ChangeKind::ClassAdded,
        &new_class.name,
        None,
        None,
        Some(new_class.extends_signature()),
        format!("Class `{}` was added", new_class.name),
        impact,
        reasons,
    )
}

fn render_method_signature(vis: Visibility, name: &str, descriptor: &str) -> String {
    format!("{} {}{}", vis.keyword(), name, descriptor)
}

fn render_field_signature(vis: Visibility, descriptor: &str, name: &str) -> String {
    format!("{} {} {}", vis.keyword(), descriptor, name)
}

/// Builds the ordered key list for one class's members: all keys from `old`
/// in their original order, followed by any keys unique to `new` in their
/// original order (spec §4.4 "Ordering").
fn ordered_union_keys<K: Eq + std::hash::Hash + Clone>(
    old_keys: impl Iterator<Item = K>,
    new_keys: impl Iterator<Item = K>,
) -> Vec<K> {
    let mut seen = std::collections::HashSet::new();
    let mut ordered = Vec::new();
    for k in old_keys {
        if seen.insert(k.clone()) {
            ordered.push(k);
        }
    }
    for k in new_keys {
        if seen.insert(k.clone()) {
            ordered.push(k);
        }
    }
    ordered
}

fn diff_methods(old_class: &ClassSummary, new_class: &ClassSummary, out: &mut Vec<ChangeRecord>) {
    let old_by_key: HashMap<MethodKey, &MethodSummary> = old_class.methods.iter().map(|m| (m.key(), m)).collect();
    let new_by_key: HashMap<MethodKey, &MethodSummary> = new_class.methods.iter().map(|m| (m.key(), m)).collect();

    let keys = ordered_union_keys(
        old_class.methods.iter().map(|m| m.key()),
        new_class.methods.iter().map(|m| m.key()),
    );

    for key in keys {
        match (old_by_key.get(&key), new_by_key.get(&key)) {
            (Some(old_m), None) => {
                let (impact, reasons) = classify::method_removed();
                out.push(record(
                    ChangeKind::MethodRemoved,
                    &old_class.name,
                    Some(old_m.name.clone()),
                    Some(render_method_signature(old_m.access_flags.dominant_visibility(), &old_m.name, &old_m.descriptor)),
                    None,
                    format!("Method `{}{}` was removed from `{}`", old_m.name, old_m.descriptor, old_class.name),
                    impact,
                    reasons,
                ));
            }
            (None, Some(new_m)) => {
                let (impact, reasons) = classify::method_added();
                out.push(record(
                    ChangeKind::MethodAdded,
                    &new_class.name,
                    Some(new_m.name.clone()),
                    None,
                    Some(render_method_signature(new_m.access_flags.dominant_visibility(), &new_m.name, &new_m.descriptor)),
                    format!("Method `{}{}` was added to `{}`", new_m.name, new_m.descriptor, new_class.name),
                    impact,
                    reasons,
                ));
            }
            (Some(old_m), Some(new_m)) => {
                if old_m.access_flags != new_m.access_flags {
                    out.push(method_access_changed(old_class, old_m, new_m));
                }
            }
            (None, None) => unreachable!("key came from the union of both method maps"),
        }
        // Method-level annotation diff only applies when the method survives
        // in both versions; added/removed methods already carry their own
        // record.
        if let (Some(old_m), Some(new_m)) = (old_by_key.get(&key), new_by_key.get(&key)) {
            diff_annotations(&old_class.name, Some(old_m.name.clone()), &old_m.annotation_types, &new_m.annotation_types, out);
        }
    }
}

fn method_access_changed(class: &ClassSummary, old_m: &MethodSummary, new_m: &MethodSummary) -> ChangeRecord {
    let (impact, reasons) = classify::access_changed(old_m.access_flags, new_m.access_flags);
    record(
        ChangeKind::MethodAccessChanged,
        &class.name,
        Some(old_m.name.clone()),
        Some(old_m.access_flags.dominant_visibility().keyword().to_string()),
        Some(new_m.access_flags.dominant_visibility().keyword().to_string()),
        format!("Access of method `{}{}` changed in `{}`", old_m.name, old_m.descriptor, class.name),
        impact,
        reasons,
    )
}

fn diff_fields(old_class: &ClassSummary, new_class: &ClassSummary, out: &mut Vec<ChangeRecord>) {
    let old_by_name: HashMap<&str, &FieldSummary> = old_class.fields.iter().map(|f| (f.name.as_str(), f)).collect();
    let new_by_name: HashMap<&str, &FieldSummary> = new_class.fields.iter().map(|f| (f.name.as_str(), f)).collect();

    let names = ordered_union_keys(
        old_class.fields.iter().map(|f| f.name.clone()),
        new_class.fields.iter().map(|f| f.name.clone()),
    );

    for name in names {
        match (old_by_name.get(name.as_str()), new_by_name.get(name.as_str())) {
            (Some(old_f), None) => {
                let (impact, reasons) = classify::field_removed();
                out.push(record(
                    ChangeKind::FieldRemoved,
                    &old_class.name,
                    Some(old_f.name.clone()),
                    Some(render_field_signature(old_f.access_flags.dominant_visibility(), &old_f.descriptor, &old_f.name)),
                    None,
                    format!("Field `{}` was removed from `{}`", old_f.name, old_class.name),
                    impact,
                    reasons,
                ));
            }
            (None, Some(new_f)) => {
                let (impact, reasons) = classify::field_added();
                out.push(record(
                    ChangeKind::FieldAdded,
                    &new_class.name,
                    Some(new_f.name.clone()),
                    None,
                    Some(render_field_signature(new_f.access_flags.dominant_visibility(), &new_f.descriptor, &new_f.name)),
                    format!("Field `{}` was added to `{}`", new_f.name, new_class.name),
                    impact,
                    reasons,
                ));
            }
            (Some(old_f), Some(new_f)) => {
                if old_f.descriptor != new_f.descriptor {
                    let (impact, reasons) = classify::field_type_changed();
                    out.push(record(
                        ChangeKind::FieldTypeChanged,
                        &old_class.name,
                        Some(old_f.name.clone()),
                        Some(render_field_signature(old_f.access_flags.dominant_visibility(), &old_f.descriptor, &old_f.name)),
                        Some(render_field_signature(new_f.access_flags.dominant_visibility(), &new_f.descriptor, &new_f.name)),
                        format!("Field `{}` changed type in `{}`", old_f.name, old_class.name),
                        impact,
                        reasons,
                    ));
                }
                if old_f.access_flags != new_f.access_flags {
                    out.push(field_access_changed(old_class, old_f, new_f));
                }
                diff_annotations(&old_class.name, Some(old_f.name.clone()), &old_f.annotation_types, &new_f.annotation_types, out);
            }
            (None, None) => unreachable!("name came from the union of both field maps"),
        }
    }
}

fn field_access_changed(class: &ClassSummary, old_f: &FieldSummary, new_f: &FieldSummary) -> ChangeRecord {
    let (impact, reasons) = classify::access_changed(old_f.access_flags, new_f.access_flags);
    record(
        ChangeKind::FieldAccessChanged,
        &class.name,
        Some(old_f.name.clone()),
        Some(old_f.access_flags.dominant_visibility().keyword().to_string()),
        Some(new_f.access_flags.dominant_visibility().keyword().to_string()),
        format!("Access of field `{}` changed in `{}`", old_f.name, class.name),
        impact,
        reasons,
    )
}

fn diff_annotations(
    class_name: &str,
    member_name: Option<String>,
    old_types: &[String],
    new_types: &[String],
    out: &mut Vec<ChangeRecord>,
) {
    let old_set: BTreeSet<&String> = old_types.iter().collect();
    let new_set: BTreeSet<&String> = new_types.iter().collect();

    let scope = member_name.clone().unwrap_or_else(|| class_name.to_string());

    for removed in old_set.difference(&new_set) {
        let (impact, reasons) = classify::annotation_changed();
        out.push(record(
            ChangeKind::AnnotationRemoved,
            class_name,
            member_name.clone(),
            Some((*removed).clone()),
            None,
            format!("Annotation `@{removed}` removed from `{scope}`"),
            impact,
            reasons,
        ));
    }
    for added in new_set.difference(&old_set) {
        let (impact, reasons) = classify::annotation_changed();
        out.push(record(
            ChangeKind::AnnotationAdded,
            class_name,
            member_name.clone(),
            None,
            Some((*added).clone()),
            format!("Annotation `@{added}` added to `{scope}`"),
            impact,
            reasons,
        ));
    }
}

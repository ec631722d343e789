//! End-to-end tests driving the engine's single entry point, `compare`,
//! against archives built in-memory with the class-file testkit. Covers the
//! testable properties and concrete scenarios from the design notes.

use std::io::{Cursor, Write};

use jarlint_classfile::access_flags::{ACC_PROTECTED, ACC_PUBLIC};
use jarlint_classfile::testkit::ClassFileBuilder;
use jarlint_diff_engine::{ArchiveInput, ChangeKind, ComparisonPolicy, ComparisonRequest, ImpactLevel, Status};

fn zip_of(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut writer = zip::ZipWriter::new(Cursor::new(&mut buf));
        let options = zip::write::FileOptions::default();
        for (name, data) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }
    buf
}

fn request(old: Vec<u8>, new: Vec<u8>, policy: ComparisonPolicy) -> ComparisonRequest {
    ComparisonRequest::new(
        ArchiveInput::from_bytes("old.jar", old),
        ArchiveInput::from_bytes("new.jar", new),
        policy,
    )
}

#[test]
fn p1_self_comparison_is_empty() {
    let class = ClassFileBuilder::new("pkg/A")
        .public()
        .with_method("greet", "()V", ACC_PUBLIC)
        .with_field("count", "I", ACC_PUBLIC)
        .build();
    let archive = zip_of(&[("pkg/A.class", class)]);

    let result = jarlint_diff_engine::compare(request(archive.clone(), archive, ComparisonPolicy::default()));

    assert_eq!(result.status, Status::Success);
    assert!(result.changes.is_empty());
    assert_eq!(result.old_jar_class_count, result.new_jar_class_count);
}

#[test]
fn p2_determinism_across_repeated_runs() {
    let old = zip_of(&[
        ("pkg/Z.class", ClassFileBuilder::new("pkg/Z").public().build()),
        ("pkg/A.class", ClassFileBuilder::new("pkg/A").public().build()),
    ]);
    let new = zip_of(&[("pkg/M.class", ClassFileBuilder::new("pkg/M").public().build())]);

    let first = jarlint_diff_engine::compare(request(old.clone(), new.clone(), ComparisonPolicy::default()));
    let second = jarlint_diff_engine::compare(request(old, new, ComparisonPolicy::default()));

    let names_first: Vec<&str> = first.changes.iter().map(|c| c.class_name.as_str()).collect();
    let names_second: Vec<&str> = second.changes.iter().map(|c| c.class_name.as_str()).collect();
    assert_eq!(names_first, names_second);
    assert_eq!(names_first, vec!["pkg.A", "pkg.M", "pkg.Z"]);
}

#[test]
fn p3_aggregates_match_record_list() {
    let old = zip_of(&[(
        "pkg/A.class",
        ClassFileBuilder::new("pkg/A")
            .public()
            .with_method("greet", "()V", ACC_PUBLIC)
            .with_method("run", "()V", ACC_PROTECTED)
            .build(),
    )]);
    let new = zip_of(&[(
        "pkg/A.class",
        ClassFileBuilder::new("pkg/A").public().with_method("run", "()V", ACC_PUBLIC).build(),
    )]);

    let result = jarlint_diff_engine::compare(request(old, new, ComparisonPolicy::default()));
    let summary = &result.comparison_summary;

    assert_eq!(summary.total_changes, result.changes.len());
    let expected_breaking = result.changes.iter().filter(|c| c.compatibility_impact.is_breaking()).count();
    assert_eq!(summary.breaking_changes, expected_breaking);
    for (kind, count) in &summary.changes_by_type {
        assert_eq!(*count, result.changes.iter().filter(|c| c.kind == *kind).count());
    }
    for (impact, count) in &summary.changes_by_impact {
        assert_eq!(*count, result.changes.iter().filter(|c| c.compatibility_impact == *impact).count());
    }
}

#[test]
fn p4_swapping_archives_complements_additions_and_removals() {
    let old = zip_of(&[(
        "pkg/A.class",
        ClassFileBuilder::new("pkg/A").public().with_method("run", "()V", ACC_PUBLIC).build(),
    )]);
    let new = zip_of(&[(
        "pkg/A.class",
        ClassFileBuilder::new("pkg/A").public().with_method("run", "()V", ACC_PROTECTED).build(),
    )]);

    let forward = jarlint_diff_engine::compare(request(old.clone(), new.clone(), ComparisonPolicy::default()));
    let backward = jarlint_diff_engine::compare(request(new, old, ComparisonPolicy::default()));

    assert_eq!(forward.changes.len(), 1);
    assert_eq!(backward.changes.len(), 1);
    assert_eq!(forward.changes[0].kind, ChangeKind::MethodAccessChanged);
    assert_eq!(backward.changes[0].kind, ChangeKind::MethodAccessChanged);
    assert_eq!(forward.changes[0].compatibility_impact, ImpactLevel::Breaking);
    assert_eq!(backward.changes[0].compatibility_impact, ImpactLevel::None);
}

#[test]
fn p5_enabling_private_members_never_decreases_change_count() {
    let old = zip_of(&[(
        "pkg/A.class",
        ClassFileBuilder::new("pkg/A")
            .public()
            .with_method("secret", "()V", jarlint_classfile::access_flags::ACC_PRIVATE)
            .build(),
    )]);
    let new = zip_of(&[("pkg/A.class", ClassFileBuilder::new("pkg/A").public().build())]);

    let mut without_private = ComparisonPolicy::default();
    without_private.include_private_members = false;
    let mut with_private = ComparisonPolicy::default();
    with_private.include_private_members = true;

    let result_without = jarlint_diff_engine::compare(request(old.clone(), new.clone(), without_private));
    let result_with = jarlint_diff_engine::compare(request(old, new, with_private));

    assert!(result_with.changes.len() >= result_without.changes.len());
    assert!(result_without.changes.iter().all(|c| c.member_name.as_deref() != Some("secret")));
}

#[test]
fn p6_field_changes_absent_when_disabled() {
    let old = zip_of(&[(
        "pkg/A.class",
        ClassFileBuilder::new("pkg/A").public().with_field("count", "I", ACC_PUBLIC).build(),
    )]);
    let new = zip_of(&[("pkg/A.class", ClassFileBuilder::new("pkg/A").public().build())]);

    let mut policy = ComparisonPolicy::default();
    policy.analyze_field_changes = false;

    let result = jarlint_diff_engine::compare(request(old, new, policy));
    assert!(result.changes.iter().all(|c| !c.kind.is_field_level()));
}

#[test]
fn s1_method_removed_is_breaking() {
    let old = zip_of(&[(
        "pkg/A.class",
        ClassFileBuilder::new("pkg/A").public().with_method("greet", "()V", ACC_PUBLIC).build(),
    )]);
    let new = zip_of(&[("pkg/A.class", ClassFileBuilder::new("pkg/A").public().build())]);

    let result = jarlint_diff_engine::compare(request(old, new, ComparisonPolicy::default()));

    assert_eq!(result.changes.len(), 1);
    let change = &result.changes[0];
    assert_eq!(change.kind, ChangeKind::MethodRemoved);
    assert_eq!(change.class_name, "pkg.A");
    assert_eq!(change.member_name.as_deref(), Some("greet"));
    assert_eq!(change.old_signature.as_deref(), Some("public greet()V"));
    assert_eq!(change.new_signature, None);
    assert_eq!(change.compatibility_impact, ImpactLevel::Breaking);
    assert_eq!(result.comparison_summary.total_changes, 1);
    assert_eq!(result.comparison_summary.breaking_changes, 1);
    assert_eq!(result.comparison_summary.method_changes, 1);
}

#[test]
fn s2_method_visibility_widened_is_none() {
    let old = zip_of(&[(
        "pkg/A.class",
        ClassFileBuilder::new("pkg/A").public().with_method("run", "()V", ACC_PROTECTED).build(),
    )]);
    let new = zip_of(&[(
        "pkg/A.class",
        ClassFileBuilder::new("pkg/A").public().with_method("run", "()V", ACC_PUBLIC).build(),
    )]);

    let result = jarlint_diff_engine::compare(request(old, new, ComparisonPolicy::default()));

    assert_eq!(result.changes.len(), 1);
    let change = &result.changes[0];
    assert_eq!(change.kind, ChangeKind::MethodAccessChanged);
    assert_eq!(change.old_signature.as_deref(), Some("protected"));
    assert_eq!(change.new_signature.as_deref(), Some("public"));
    assert_eq!(change.compatibility_impact, ImpactLevel::None);
    assert_eq!(result.comparison_summary.breaking_changes, 0);
}

#[test]
fn s3_method_visibility_narrowed_is_breaking() {
    let old = zip_of(&[(
        "pkg/A.class",
        ClassFileBuilder::new("pkg/A").public().with_method("run", "()V", ACC_PUBLIC).build(),
    )]);
    let new = zip_of(&[(
        "pkg/A.class",
        ClassFileBuilder::new("pkg/A").public().with_method("run", "()V", ACC_PROTECTED).build(),
    )]);

    let result = jarlint_diff_engine::compare(request(old, new, ComparisonPolicy::default()));

    assert_eq!(result.changes.len(), 1);
    assert_eq!(result.changes[0].kind, ChangeKind::MethodAccessChanged);
    assert_eq!(result.changes[0].compatibility_impact, ImpactLevel::Breaking);
    assert_eq!(result.comparison_summary.breaking_changes, 1);
}

#[test]
fn s4_field_type_change_is_breaking() {
    let old = zip_of(&[(
        "pkg/A.class",
        ClassFileBuilder::new("pkg/A").public().with_field("count", "I", ACC_PUBLIC).build(),
    )]);
    let new = zip_of(&[(
        "pkg/A.class",
        ClassFileBuilder::new("pkg/A").public().with_field("count", "J", ACC_PUBLIC).build(),
    )]);

    let result = jarlint_diff_engine::compare(request(old, new, ComparisonPolicy::default()));

    assert_eq!(result.changes.len(), 1);
    let change = &result.changes[0];
    assert_eq!(change.kind, ChangeKind::FieldTypeChanged);
    assert_eq!(change.old_signature.as_deref(), Some("public I count"));
    assert_eq!(change.new_signature.as_deref(), Some("public J count"));
    assert_eq!(change.compatibility_impact, ImpactLevel::Breaking);
}

#[test]
fn s5_class_added_is_none_impact() {
    let old = zip_of(&[("pkg/A.class", ClassFileBuilder::new("pkg/A").public().build())]);
    let new = zip_of(&[
        ("pkg/A.class", ClassFileBuilder::new("pkg/A").public().build()),
        ("pkg/B.class", ClassFileBuilder::new("pkg/B").public().build()),
    ]);

    let result = jarlint_diff_engine::compare(request(old, new, ComparisonPolicy::default()));

    assert_eq!(result.changes.len(), 1);
    assert_eq!(result.changes[0].kind, ChangeKind::ClassAdded);
    assert_eq!(result.changes[0].class_name, "pkg.B");
    assert_eq!(result.changes[0].compatibility_impact, ImpactLevel::None);
    assert_eq!(result.comparison_summary.total_changes, 1);
}

#[test]
fn s6_self_compare_on_multi_class_archive() {
    let archive = zip_of(&[
        ("pkg/A.class", ClassFileBuilder::new("pkg/A").public().build()),
        ("pkg/B.class", ClassFileBuilder::new("pkg/B").public().build()),
        ("pkg/C.class", ClassFileBuilder::new("pkg/C").public().build()),
    ]);

    let result = jarlint_diff_engine::compare(request(archive.clone(), archive, ComparisonPolicy::default()));

    assert_eq!(result.comparison_summary.total_changes, 0);
    assert_eq!(result.status, Status::Success);
}

#[test]
fn malformed_archive_produces_failed_status() {
    let result = jarlint_diff_engine::compare(request(
        b"not a zip".to_vec(),
        zip_of(&[("pkg/A.class", ClassFileBuilder::new("pkg/A").public().build())]),
        ComparisonPolicy::default(),
    ));

    assert_eq!(result.status, Status::Failed);
    assert!(result.changes.is_empty());
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn empty_archive_produces_failed_status() {
    let result = jarlint_diff_engine::compare(request(
        zip_of(&[("README.txt", b"hello".to_vec())]),
        zip_of(&[("pkg/A.class", ClassFileBuilder::new("pkg/A").public().build())]),
        ComparisonPolicy::default(),
    ));

    assert_eq!(result.status, Status::Failed);
}

#[test]
fn invalid_request_rejects_identical_file_paths() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&zip_of(&[("pkg/A.class", ClassFileBuilder::new("pkg/A").public().build())])).unwrap();

    let old = ArchiveInput::from_path(file.path()).unwrap();
    let new = ArchiveInput::from_path(file.path()).unwrap();
    let result = jarlint_diff_engine::compare(ComparisonRequest::new(old, new, ComparisonPolicy::default()));

    assert_eq!(result.status, Status::Failed);
}

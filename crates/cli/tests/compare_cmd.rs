//! End-to-end tests driving the built `jarlint` binary against archives
//! written to temp files.

use std::io::{Cursor, Write};

use assert_cmd::Command;
use jarlint_classfile::testkit::ClassFileBuilder;
use predicates::prelude::*;
use tempfile::NamedTempFile;

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

fn archive_file(entries: &[(&str, Vec<u8>)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&zip_of(entries)).unwrap();
    file
}

#[test]
fn compare_reports_method_removal_as_breaking() {
    let old = archive_file(&[(
        "pkg/A.class",
        ClassFileBuilder::new("pkg/A")
            .public()
            .with_method("greet", "()V", jarlint_classfile::access_flags::ACC_PUBLIC)
            .build(),
    )]);
    let new = archive_file(&[("pkg/A.class", ClassFileBuilder::new("pkg/A").public().build())]);

    Command::cargo_bin("jarlint")
        .unwrap()
        .arg("compare")
        .arg(old.path())
        .arg(new.path())
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("METHOD_REMOVED"))
        .stdout(predicate::str::contains("BREAKING"));
}

#[test]
fn compare_self_comparison_succeeds_with_no_changes() {
    let class_bytes = ClassFileBuilder::new("pkg/A").public().build();
    let old = archive_file(&[("pkg/A.class", class_bytes.clone())]);
    let new = archive_file(&[("pkg/A.class", class_bytes)]);

    Command::cargo_bin("jarlint")
        .unwrap()
        .arg("compare")
        .arg(old.path())
        .arg(new.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes detected"));
}

#[test]
fn doctor_rejects_a_missing_path() {
    let archive = archive_file(&[("pkg/A.class", ClassFileBuilder::new("pkg/A").public().build())]);

    Command::cargo_bin("jarlint")
        .unwrap()
        .arg("doctor")
        .arg(archive.path())
        .arg("/no/such/file.jar")
        .assert()
        .failure()
        .stdout(predicate::str::contains("does not exist"));
}

#[test]
fn doctor_accepts_two_valid_archives() {
    let old = archive_file(&[("pkg/A.class", ClassFileBuilder::new("pkg/A").public().build())]);
    let new = archive_file(&[("pkg/A.class", ClassFileBuilder::new("pkg/A").public().build())]);

    Command::cargo_bin("jarlint")
        .unwrap()
        .arg("doctor")
        .arg(old.path())
        .arg(new.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

use crate::access_flags::AccessFlags;
use crate::attributes::{read_attributes, ParsedAttributes};
use crate::constant_pool::ConstantPool;
use crate::cursor::ClassFileCursor;
use crate::descriptor::{validate_field_descriptor, validate_method_descriptor};
use crate::error::ClassFileError;
use crate::summary::{ClassSummary, FieldSummary, MethodSummary};

const CLASS_MAGIC: u32 = 0xCAFEBABE;

/// Policy flags consulted while reading a class file (spec §4.2 "Visibility
/// filtering"). `detect_binary_compatibility` is consumed by the classifier,
/// not the reader, so it is not part of this struct.
#[derive(Debug, Clone, Copy)]
pub struct ReaderPolicy {
    pub include_private_members: bool,
    pub include_package_private_classes: bool,
    pub analyze_field_changes: bool,
    pub analyze_annotations: bool,
}

/// Parses one class-file payload into a `ClassSummary`, or `None` if the
/// class is filtered out entirely by visibility policy ("not of interest",
/// spec §4.2). Method bodies (the `Code` attribute) are never parsed.
pub fn read_class(bytes: &[u8], policy: ReaderPolicy) -> Result<Option<ClassSummary>, ClassFileError> {
    let mut cursor = ClassFileCursor::new(bytes);

    let magic = cursor.read_u32()?;
    if magic != CLASS_MAGIC {
        return Err(ClassFileError::BadMagic { found: magic });
    }
    cursor.skip(4)?; // minor_version, major_version — not needed for structural comparison

    let constant_pool_count = cursor.read_u16()?;
    let pool = ConstantPool::read(&mut cursor, constant_pool_count)?;

    let access_flags = AccessFlags::new(cursor.read_u16()?);
    let this_class_index = cursor.read_u16()?;
    let name = pool.get_class_name(this_class_index)?;
    let super_class_index = cursor.read_u16()?;
    let super_name = pool.get_optional_class_name(super_class_index)?;

    let interfaces = read_interfaces(&mut cursor, &pool)?;

    let is_visible = access_flags.is_public() || access_flags.is_protected();
    if !is_visible && !policy.include_package_private_classes {
        // Still need to walk past fields/methods/attributes to leave the
        // cursor in a valid state in case the caller inspects remaining
        // bytes, but since nothing downstream does, we can stop here.
        return Ok(None);
    }

    let fields = if policy.analyze_field_changes {
        read_fields(&mut cursor, &pool, policy)?
    } else {
        skip_fields(&mut cursor, &pool)?;
        Vec::new()
    };

    let methods = read_methods(&mut cursor, &pool, policy)?;

    let class_attrs = read_attributes(&mut cursor, &pool)?;
    let annotation_types = if policy.analyze_annotations {
        class_attrs.annotation_types
    } else {
        Vec::new()
    };

    let summary = ClassSummary {
        name,
        access_flags,
        super_name,
        interfaces,
        methods,
        fields,
        annotation_types,
    };
    summary.check_invariants()?;
    Ok(Some(summary))
}

fn read_interfaces(cursor: &mut ClassFileCursor, pool: &ConstantPool) -> Result<Vec<String>, ClassFileError> {
    let count = cursor.read_u16()?;
    let mut out = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let idx = cursor.read_u16()?;
        out.push(pool.get_class_name(idx)?);
    }
    Ok(out)
}

fn skip_fields(cursor: &mut ClassFileCursor, pool: &ConstantPool) -> Result<(), ClassFileError> {
    let count = cursor.read_u16()?;
    for _ in 0..count {
        cursor.skip(6)?; // access_flags, name_index, descriptor_index
        read_attributes(cursor, pool)?;
    }
    Ok(())
}

fn read_fields(
    cursor: &mut ClassFileCursor,
    pool: &ConstantPool,
    policy: ReaderPolicy,
) -> Result<Vec<FieldSummary>, ClassFileError> {
    let count = cursor.read_u16()?;
    let mut out = Vec::new();
    for _ in 0..count {
        let access_flags = AccessFlags::new(cursor.read_u16()?);
        let name = pool.get_utf8(cursor.read_u16()?)?.to_string();
        let descriptor = pool.get_utf8(cursor.read_u16()?)?.to_string();
        validate_field_descriptor(&descriptor)?;
        let attrs = read_attributes(cursor, pool)?;

        if access_flags.is_private() && !policy.include_private_members {
            continue;
        }

        let annotation_types = if policy.analyze_annotations { attrs.annotation_types } else { Vec::new() };
        out.push(FieldSummary {
            name,
            descriptor,
            access_flags,
            constant_value: attrs.constant_value,
            annotation_types,
        });
    }
    Ok(out)
}

fn read_methods(
    cursor: &mut ClassFileCursor,
    pool: &ConstantPool,
    policy: ReaderPolicy,
) -> Result<Vec<MethodSummary>, ClassFileError> {
    let count = cursor.read_u16()?;
    let mut out = Vec::new();
    for _ in 0..count {
        let access_flags = AccessFlags::new(cursor.read_u16()?);
        let name = pool.get_utf8(cursor.read_u16()?)?.to_string();
        let descriptor = pool.get_utf8(cursor.read_u16()?)?.to_string();
        validate_method_descriptor(&descriptor)?;
        let attrs: ParsedAttributes = read_attributes(cursor, pool)?;

        if access_flags.is_private() && !policy.include_private_members {
            continue;
        }

        let annotation_types = if policy.analyze_annotations { attrs.annotation_types } else { Vec::new() };
        out.push(MethodSummary {
            name,
            descriptor,
            access_flags,
            thrown_exceptions: attrs.exceptions,
            annotation_types,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::ClassFileBuilder;

    #[test]
    fn parses_minimal_public_class() {
        let bytes = ClassFileBuilder::new("pkg/A").public().build();
        let policy = ReaderPolicy {
            include_private_members: true,
            include_package_private_classes: true,
            analyze_field_changes: true,
            analyze_annotations: true,
        };
        let summary = read_class(&bytes, policy).unwrap().unwrap();
        assert_eq!(summary.name, "pkg.A");
        assert_eq!(summary.super_name.as_deref(), Some("java.lang.Object"));
    }

    #[test]
    fn package_private_class_filtered_without_policy_flag() {
        let bytes = ClassFileBuilder::new("pkg/Hidden").package_private().build();
        let policy = ReaderPolicy {
            include_private_members: true,
            include_package_private_classes: false,
            analyze_field_changes: true,
            analyze_annotations: true,
        };
        assert!(read_class(&bytes, policy).unwrap().is_none());
    }

    #[test]
    fn bad_magic_is_rejected() {
        let policy = ReaderPolicy {
            include_private_members: true,
            include_package_private_classes: true,
            analyze_field_changes: true,
            analyze_annotations: true,
        };
        let err = read_class(&[0, 0, 0, 0], policy).unwrap_err();
        assert!(matches!(err, ClassFileError::BadMagic { .. }));
    }

    #[test]
    fn private_method_excluded_unless_policy_allows() {
        let bytes = ClassFileBuilder::new("pkg/A")
            .public()
            .with_method("secret", "()V", crate::access_flags::ACC_PRIVATE)
            .with_method("greet", "()V", crate::access_flags::ACC_PUBLIC)
            .build();
        let exclude_private = ReaderPolicy {
            include_private_members: false,
            include_package_private_classes: true,
            analyze_field_changes: true,
            analyze_annotations: true,
        };
        let summary = read_class(&bytes, exclude_private).unwrap().unwrap();
        assert_eq!(summary.methods.len(), 1);
        assert_eq!(summary.methods[0].name, "greet");
    }

    #[test]
    fn fields_skipped_entirely_when_policy_disabled() {
        let bytes = ClassFileBuilder::new("pkg/A")
            .public()
            .with_field("count", "I", crate::access_flags::ACC_PUBLIC)
            .build();
        let policy = ReaderPolicy {
            include_private_members: true,
            include_package_private_classes: true,
            analyze_field_changes: false,
            analyze_annotations: true,
        };
        let summary = read_class(&bytes, policy).unwrap().unwrap();
        assert!(summary.fields.is_empty());
    }
}

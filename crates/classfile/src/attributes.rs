use crate::constant_pool::{to_canonical_name, ConstantPool, ConstantPoolEntry};
use crate::cursor::ClassFileCursor;
use crate::error::ClassFileError;

/// A constant field initializer, captured from a `ConstantValue` attribute.
/// Only the representations the format actually allows for constants are
/// carried; the raw bytes are never retained once resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Int(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    String(String),
}

/// The subset of class-file attributes this engine parses (spec §4.2). Every
/// other attribute is read for its declared length and discarded.
#[derive(Debug, Clone, Default)]
pub struct ParsedAttributes {
    pub constant_value: Option<ConstantValue>,
    pub exceptions: Vec<String>,
    pub annotation_types: Vec<String>,
}

/// Reads one attribute table (`attribute_info attributes[attributes_count]`)
/// and dispatches each entry by its resolved name.
pub fn read_attributes(
    cursor: &mut ClassFileCursor,
    pool: &ConstantPool,
) -> Result<ParsedAttributes, ClassFileError> {
    let count = cursor.read_u16()?;
    let mut parsed = ParsedAttributes::default();
    for _ in 0..count {
        let name_index = cursor.read_u16()?;
        let name = pool.get_utf8(name_index)?.to_string();
        let length = cursor.read_u32()? as usize;
        let body = cursor.read_bytes(length)?;
        let mut body_cursor = ClassFileCursor::new(body);
        match name.as_str() {
            "ConstantValue" => {
                let index = body_cursor.read_u16()?;
                parsed.constant_value = Some(resolve_constant_value(pool, index)?);
            }
            "Exceptions" => {
                let n = body_cursor.read_u16()?;
                for _ in 0..n {
                    let idx = body_cursor.read_u16()?;
                    parsed.exceptions.push(pool.get_class_name(idx)?);
                }
            }
            "RuntimeVisibleAnnotations" | "RuntimeInvisibleAnnotations" => {
                let n = body_cursor.read_u16()?;
                for _ in 0..n {
                    parsed.annotation_types.push(read_annotation_type(&mut body_cursor, pool)?);
                }
            }
            _ => {
                // Attribute body already fully consumed by `read_bytes` above.
            }
        }
    }
    Ok(parsed)
}

fn resolve_constant_value(pool: &ConstantPool, index: u16) -> Result<ConstantValue, ClassFileError> {
    match pool.get(index)? {
        ConstantPoolEntry::Integer(v) => Ok(ConstantValue::Int(*v)),
        ConstantPoolEntry::Float(v) => Ok(ConstantValue::Float(*v)),
        ConstantPoolEntry::Long(v) => Ok(ConstantValue::Long(*v)),
        ConstantPoolEntry::Double(v) => Ok(ConstantValue::Double(*v)),
        ConstantPoolEntry::String { string_index } => {
            Ok(ConstantValue::String(pool.get_utf8(*string_index)?.to_string()))
        }
        _ => Err(ClassFileError::NotUtf8Entry { index }),
    }
}

/// `annotation { u2 type_index; u2 num_element_value_pairs; element_value_pairs[] }`.
/// Only the annotation's type descriptor is of interest (spec §9 Open
/// Question 3: annotation values are never compared); the element-value
/// pairs are skipped by walking their tagged shape without retaining them.
fn read_annotation_type(cursor: &mut ClassFileCursor, pool: &ConstantPool) -> Result<String, ClassFileError> {
    let type_index = cursor.read_u16()?;
    let descriptor = pool.get_utf8(type_index)?;
    let type_name = to_canonical_name(descriptor.trim_start_matches('L').trim_end_matches(';'));
    let num_pairs = cursor.read_u16()?;
    for _ in 0..num_pairs {
        cursor.skip(2)?; // element_name_index
        skip_element_value(cursor)?;
    }
    Ok(type_name)
}

fn skip_element_value(cursor: &mut ClassFileCursor) -> Result<(), ClassFileError> {
    let tag = cursor.read_u8()?;
    match tag {
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' | b's' | b'c' => {
            cursor.skip(2)?;
        }
        b'e' => {
            cursor.skip(4)?; // type_name_index, const_name_index
        }
        b'@' => {
            cursor.skip(2)?; // nested annotation's type_index
            let num_pairs = cursor.read_u16()?;
            for _ in 0..num_pairs {
                cursor.skip(2)?;
                skip_element_value(cursor)?;
            }
        }
        b'[' => {
            let count = cursor.read_u16()?;
            for _ in 0..count {
                skip_element_value(cursor)?;
            }
        }
        other => {
            return Err(ClassFileError::UnknownConstantTag { tag: other, index: 0 });
        }
    }
    Ok(())
}

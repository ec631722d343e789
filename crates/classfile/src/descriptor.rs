//! Type-descriptor grammar validation.
//!
//! Descriptors are never decoded into a structured type here — they are
//! stored and rendered verbatim (spec §4.4 "Descriptor rendering"), which is
//! deliberately simpler than a full `FieldDescriptor`/`MethodDescriptor`
//! decoder. This module only checks that a descriptor is well-formed per the
//! class-file grammar (spec §3 MethodSummary invariant), so a garbled
//! descriptor surfaces as `MalformedClassFile` instead of silently
//! propagating into a diff.

use crate::error::ClassFileError;

/// Validates a field descriptor: one base type, one array of some depth, or
/// one `Lpkg/Name;` reference type.
pub fn validate_field_descriptor(descriptor: &str) -> Result<(), ClassFileError> {
    let mut chars = descriptor.chars().peekable();
    consume_field_type(&mut chars, descriptor)?;
    if chars.next().is_some() {
        return Err(malformed(descriptor, "trailing characters after field type"));
    }
    Ok(())
}

/// Validates a method descriptor: `(ParamType*)ReturnType`, where
/// `ReturnType` may additionally be `V` (void).
pub fn validate_method_descriptor(descriptor: &str) -> Result<(), ClassFileError> {
    let mut chars = descriptor.chars().peekable();
    if chars.next() != Some('(') {
        return Err(malformed(descriptor, "method descriptor must start with '('"));
    }
    loop {
        match chars.peek() {
            Some(')') => {
                chars.next();
                break;
            }
            Some(_) => consume_field_type(&mut chars, descriptor)?,
            None => return Err(malformed(descriptor, "unterminated parameter list")),
        }
    }
    match chars.peek() {
        Some('V') => {
            chars.next();
        }
        Some(_) => consume_field_type(&mut chars, descriptor)?,
        None => return Err(malformed(descriptor, "missing return type")),
    }
    if chars.next().is_some() {
        return Err(malformed(descriptor, "trailing characters after return type"));
    }
    Ok(())
}

fn consume_field_type(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    whole: &str,
) -> Result<(), ClassFileError> {
    let mut array_depth = 0usize;
    loop {
        match chars.next() {
            Some('[') => {
                array_depth += 1;
                if array_depth > 255 {
                    return Err(malformed(whole, "array depth exceeds 255"));
                }
                continue;
            }
            Some('L') => {
                let mut consumed_any = false;
                for c in chars.by_ref() {
                    if c == ';' {
                        return if consumed_any {
                            Ok(())
                        } else {
                            Err(malformed(whole, "empty reference type name"))
                        };
                    }
                    consumed_any = true;
                }
                return Err(malformed(whole, "unterminated reference type"));
            }
            Some('B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z') => return Ok(()),
            Some(other) => return Err(malformed(whole, descriptor_char_reason(other))),
            None => return Err(malformed(whole, "unexpected end of descriptor")),
        }
    }
}

fn descriptor_char_reason(c: char) -> &'static str {
    match c {
        ')' => "unexpected ')' in field type position",
        _ => "unrecognized descriptor character",
    }
}

fn malformed(descriptor: &str, reason: &'static str) -> ClassFileError {
    ClassFileError::MalformedDescriptor { descriptor: descriptor.to_string(), reason }
}

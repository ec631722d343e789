use std::collections::HashSet;

use crate::access_flags::AccessFlags;
use crate::attributes::ConstantValue;
use crate::error::ClassFileError;

/// A method's identity key within its class: (name, descriptor). Spec §3.
pub type MethodKey = (String, String);

#[derive(Debug, Clone, PartialEq)]
pub struct MethodSummary {
    pub name: String,
    pub descriptor: String,
    pub access_flags: AccessFlags,
    pub thrown_exceptions: Vec<String>,
    pub annotation_types: Vec<String>,
}

impl MethodSummary {
    pub fn key(&self) -> MethodKey {
        (self.name.clone(), self.descriptor.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSummary {
    pub name: String,
    pub descriptor: String,
    pub access_flags: AccessFlags,
    pub constant_value: Option<ConstantValue>,
    pub annotation_types: Vec<String>,
}

/// A structural summary of one compiled class, sufficient to diff it against
/// another version without ever interpreting method bodies (spec §3).
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSummary {
    pub name: String,
    pub access_flags: AccessFlags,
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
    pub methods: Vec<MethodSummary>,
    pub fields: Vec<FieldSummary>,
    pub annotation_types: Vec<String>,
}

impl ClassSummary {
    /// Enforces the §3 invariants: no two methods share a (name, descriptor)
    /// pair, no two fields share a name. Violating either means the class
    /// file itself is malformed (the format makes this impossible to
    /// produce from valid source, but a corrupted or hand-crafted class file
    /// can still claim it).
    pub fn check_invariants(&self) -> Result<(), ClassFileError> {
        let mut seen_methods = HashSet::new();
        for m in &self.methods {
            if !seen_methods.insert(m.key()) {
                return Err(ClassFileError::DuplicateMethod {
                    name: m.name.clone(),
                    descriptor: m.descriptor.clone(),
                });
            }
        }
        let mut seen_fields = HashSet::new();
        for f in &self.fields {
            if !seen_fields.insert(f.name.clone()) {
                return Err(ClassFileError::DuplicateField { name: f.name.clone() });
            }
        }
        Ok(())
    }

    /// Rendered as `<class-name> extends <super-name>` for class-level
    /// add/remove signatures (spec §4.4 "Descriptor rendering").
    pub fn extends_signature(&self) -> String {
        match &self.super_name {
            Some(super_name) => format!("{} extends {}", self.name, super_name),
            None => self.name.clone(),
        }
    }
}

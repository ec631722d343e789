//! Hand-rolled class-file byte builder for tests.
//!
//! There is no `javac` available to produce fixture `.class` files in this
//! workspace, so tests construct the exact byte layout described in spec §4.2
//! directly. Kept intentionally minimal: just enough constant-pool and
//! attribute shapes to exercise the reader and the diff engine.

use crate::access_flags::{ACC_PROTECTED, ACC_PUBLIC};

pub struct ClassFileBuilder {
    this_name: String,
    super_name: Option<String>,
    access_flags: u16,
    interfaces: Vec<String>,
    fields: Vec<MemberSpec>,
    methods: Vec<MemberSpec>,
    class_annotations: Vec<String>,
}

struct MemberSpec {
    name: String,
    descriptor: String,
    access_flags: u16,
    annotations: Vec<String>,
    thrown: Vec<String>,
    constant_value: Option<ConstSpec>,
}

enum ConstSpec {
    Int(i32),
}

impl ClassFileBuilder {
    pub fn new(internal_name: &str) -> Self {
        Self {
            this_name: internal_name.to_string(),
            super_name: Some("java/lang/Object".to_string()),
            access_flags: 0,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            class_annotations: Vec::new(),
        }
    }

    pub fn public(mut self) -> Self {
        self.access_flags |= ACC_PUBLIC;
        self
    }

    pub fn protected(mut self) -> Self {
        self.access_flags |= ACC_PROTECTED;
        self
    }

    pub fn package_private(self) -> Self {
        self
    }

    pub fn access_flags(mut self, flags: u16) -> Self {
        self.access_flags = flags;
        self
    }

    pub fn no_super(mut self) -> Self {
        self.super_name = None;
        self
    }

    pub fn with_interface(mut self, internal_name: &str) -> Self {
        self.interfaces.push(internal_name.to_string());
        self
    }

    pub fn with_method(mut self, name: &str, descriptor: &str, access_flags: u16) -> Self {
        self.methods.push(MemberSpec {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            access_flags,
            annotations: Vec::new(),
            thrown: Vec::new(),
            constant_value: None,
        });
        self
    }

    pub fn with_method_annotation(mut self, name: &str, descriptor: &str, access_flags: u16, annotation: &str) -> Self {
        self.methods.push(MemberSpec {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            access_flags,
            annotations: vec![annotation.to_string()],
            thrown: Vec::new(),
            constant_value: None,
        });
        self
    }

    pub fn with_field(mut self, name: &str, descriptor: &str, access_flags: u16) -> Self {
        self.fields.push(MemberSpec {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            access_flags,
            annotations: Vec::new(),
            thrown: Vec::new(),
            constant_value: None,
        });
        self
    }

    pub fn with_constant_field(mut self, name: &str, descriptor: &str, access_flags: u16, value: i32) -> Self {
        self.fields.push(MemberSpec {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            access_flags,
            annotations: Vec::new(),
            thrown: Vec::new(),
            constant_value: Some(ConstSpec::Int(value)),
        });
        self
    }

    pub fn with_class_annotation(mut self, annotation: &str) -> Self {
        self.class_annotations.push(annotation.to_string());
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut pool = PoolBuilder::new();
        let this_class = pool.class_ref(&self.this_name);
        let super_class = match &self.super_name {
            Some(n) => pool.class_ref(n),
            None => 0,
        };
        let interfaces: Vec<u16> = self.interfaces.iter().map(|i| pool.class_ref(i)).collect();

        let mut out = Vec::new();
        out.extend_from_slice(&0xCAFEBABEu32.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes()); // minor
        out.extend_from_slice(&61u16.to_be_bytes()); // major (Java 17)

        // Members are encoded before the pool is finalized, since encoding
        // them may add new pool entries (names, descriptors, annotations).
        let mut fields_bytes = Vec::new();
        fields_bytes.extend_from_slice(&(self.fields.len() as u16).to_be_bytes());
        for f in &self.fields {
            encode_member(&mut fields_bytes, &mut pool, f);
        }

        let mut methods_bytes = Vec::new();
        methods_bytes.extend_from_slice(&(self.methods.len() as u16).to_be_bytes());
        for m in &self.methods {
            encode_member(&mut methods_bytes, &mut pool, m);
        }

        let mut class_attrs = Vec::new();
        let annotation_attrs = encode_annotations_attribute(&mut pool, "RuntimeVisibleAnnotations", &self.class_annotations);
        class_attrs.extend_from_slice(&(annotation_attrs.is_some() as u16).to_be_bytes());
        if let Some(bytes) = annotation_attrs {
            class_attrs.extend_from_slice(&bytes);
        }

        out.extend_from_slice(&pool.count().to_be_bytes());
        out.extend_from_slice(&pool.bytes);

        out.extend_from_slice(&self.access_flags.to_be_bytes());
        out.extend_from_slice(&this_class.to_be_bytes());
        out.extend_from_slice(&super_class.to_be_bytes());

        out.extend_from_slice(&(interfaces.len() as u16).to_be_bytes());
        for i in interfaces {
            out.extend_from_slice(&i.to_be_bytes());
        }

        out.extend_from_slice(&fields_bytes);
        out.extend_from_slice(&methods_bytes);
        out.extend_from_slice(&class_attrs);

        out
    }
}

fn encode_member(out: &mut Vec<u8>, pool: &mut PoolBuilder, spec: &MemberSpec) {
    out.extend_from_slice(&spec.access_flags.to_be_bytes());
    out.extend_from_slice(&pool.utf8(&spec.name).to_be_bytes());
    out.extend_from_slice(&pool.utf8(&spec.descriptor).to_be_bytes());

    let mut attrs = Vec::new();
    let mut attr_count = 0u16;

    if let Some(ConstSpec::Int(v)) = &spec.constant_value {
        let name_idx = pool.utf8("ConstantValue");
        let value_idx = pool.integer(*v);
        attrs.extend_from_slice(&name_idx.to_be_bytes());
        attrs.extend_from_slice(&2u32.to_be_bytes());
        attrs.extend_from_slice(&value_idx.to_be_bytes());
        attr_count += 1;
    }

    if !spec.thrown.is_empty() {
        let name_idx = pool.utf8("Exceptions");
        let mut body = Vec::new();
        body.extend_from_slice(&(spec.thrown.len() as u16).to_be_bytes());
        for t in &spec.thrown {
            body.extend_from_slice(&pool.class_ref(t).to_be_bytes());
        }
        attrs.extend_from_slice(&name_idx.to_be_bytes());
        attrs.extend_from_slice(&(body.len() as u32).to_be_bytes());
        attrs.extend_from_slice(&body);
        attr_count += 1;
    }

    if let Some(body) = encode_annotations_attribute(pool, "RuntimeVisibleAnnotations", &spec.annotations) {
        attrs.extend_from_slice(&body);
        attr_count += 1;
    }

    out.extend_from_slice(&attr_count.to_be_bytes());
    out.extend_from_slice(&attrs);
}

/// Returns the full `attribute_info` bytes (name index + length + body) for
/// a `RuntimeVisibleAnnotations`-shaped attribute, or `None` if there are no
/// annotations to encode.
fn encode_annotations_attribute(pool: &mut PoolBuilder, attr_name: &str, annotations: &[String]) -> Option<Vec<u8>> {
    if annotations.is_empty() {
        return None;
    }
    let name_idx = pool.utf8(attr_name);
    let mut body = Vec::new();
    body.extend_from_slice(&(annotations.len() as u16).to_be_bytes());
    for a in annotations {
        let descriptor = format!("L{};", a.replace('.', "/"));
        body.extend_from_slice(&pool.utf8(&descriptor).to_be_bytes());
        body.extend_from_slice(&0u16.to_be_bytes()); // num_element_value_pairs
    }
    let mut out = Vec::new();
    out.extend_from_slice(&name_idx.to_be_bytes());
    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    out.extend_from_slice(&body);
    Some(out)
}

/// Accumulates constant-pool entries, deduplicating UTF-8 strings so
/// repeated names/descriptors don't bloat the pool.
struct PoolBuilder {
    bytes: Vec<u8>,
    next_index: u16,
    utf8_indices: std::collections::HashMap<String, u16>,
}

impl PoolBuilder {
    fn new() -> Self {
        Self { bytes: Vec::new(), next_index: 1, utf8_indices: std::collections::HashMap::new() }
    }

    fn count(&self) -> u16 {
        self.next_index
    }

    fn utf8(&mut self, s: &str) -> u16 {
        if let Some(idx) = self.utf8_indices.get(s) {
            return *idx;
        }
        let idx = self.next_index;
        self.bytes.push(1); // TAG_UTF8
        self.bytes.extend_from_slice(&(s.len() as u16).to_be_bytes());
        self.bytes.extend_from_slice(s.as_bytes());
        self.next_index += 1;
        self.utf8_indices.insert(s.to_string(), idx);
        idx
    }

    fn class_ref(&mut self, internal_name: &str) -> u16 {
        let name_idx = self.utf8(internal_name);
        let idx = self.next_index;
        self.bytes.push(7); // TAG_CLASS
        self.bytes.extend_from_slice(&name_idx.to_be_bytes());
        self.next_index += 1;
        idx
    }

    fn integer(&mut self, value: i32) -> u16 {
        let idx = self.next_index;
        self.bytes.push(3); // TAG_INTEGER
        self.bytes.extend_from_slice(&(value as u32).to_be_bytes());
        self.next_index += 1;
        idx
    }
}

//! In-memory records for the cimgui metadata.
//!
//! These records are built once by the loader and are read-only afterwards.
//! Member and argument order mirrors the native declaration order.

use std::collections::HashMap;

use serde::Serialize;

/// Mapping from a native type alias to its underlying type string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypedefMap {
    entries: HashMap<String, String>,
}

impl TypedefMap {
    /// Create an empty typedef map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alias.
    pub fn with_alias(mut self, alias: impl Into<String>, underlying: impl Into<String>) -> Self {
        self.entries.insert(alias.into(), underlying.into());
        self
    }

    /// Look up the underlying type of an alias.
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for TypedefMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        TypedefMap {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A native enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enum {
    /// Enum name (trailing `_` of the native name removed)
    pub name: String,

    /// Members in declaration order
    pub members: Vec<EnumMember>,
}

impl Enum {
    /// Create a new enum.
    pub fn new(name: impl Into<String>) -> Self {
        Enum {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Add a member.
    pub fn with_member(mut self, member: EnumMember) -> Self {
        self.members.push(member);
        self
    }
}

/// An enum member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
    /// Binding-facing constant name
    pub name: String,

    /// Integer value
    pub value: i64,

    /// Native member name
    pub original: String,
}

impl EnumMember {
    /// Create a new member.
    pub fn new(name: impl Into<String>, value: i64, original: impl Into<String>) -> Self {
        EnumMember {
            name: name.into(),
            value,
            original: original.into(),
        }
    }
}

/// A native structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Struct {
    /// Struct name
    pub name: String,

    /// Members in memory layout order
    pub members: Vec<StructMember>,
}

impl Struct {
    /// Create a new struct.
    pub fn new(name: impl Into<String>) -> Self {
        Struct {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Add a member.
    pub fn with_member(mut self, member: StructMember) -> Self {
        self.members.push(member);
        self
    }
}

/// A struct member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructMember {
    /// Member name (array brackets removed)
    pub name: String,

    /// Native type token
    pub ty: String,

    /// Element count for fixed-size array members
    pub size: Option<usize>,
}

impl StructMember {
    /// Create a scalar member.
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        StructMember {
            name: name.into(),
            ty: ty.into(),
            size: None,
        }
    }

    /// Create a fixed-size array member.
    pub fn array(name: impl Into<String>, ty: impl Into<String>, size: usize) -> Self {
        StructMember {
            size: Some(size),
            ..StructMember::new(name, ty)
        }
    }

    /// Whether this member is a fixed-size array.
    pub fn is_array(&self) -> bool {
        self.size.is_some()
    }
}

/// A native function signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    /// Native (linkage) name
    pub name: String,

    /// Argument type tokens in call order
    pub args: Vec<String>,

    /// Return type token
    pub ret: String,
}

impl Function {
    /// Create a new function with the given name and return type.
    pub fn new(name: impl Into<String>, ret: impl Into<String>) -> Self {
        Function {
            name: name.into(),
            args: Vec::new(),
            ret: ret.into(),
        }
    }

    /// Add an argument.
    pub fn with_arg(mut self, ty: impl Into<String>) -> Self {
        self.args.push(ty.into());
        self
    }
}

/// Everything loaded from the metadata documents.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub typedefs: TypedefMap,
    pub enums: Vec<Enum>,
    pub structs: Vec<Struct>,
    /// Public API functions (definitions.json)
    pub functions: Vec<Function>,
    /// Backend implementation functions (impl_definitions.json)
    pub impl_functions: Vec<Function>,
}

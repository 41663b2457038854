//! Classification of native type tokens into binding descriptors.
//!
//! A token is resolved in this order: variadic marker, pointer or array
//! syntax, qualifier stripping, primitive table, typedef chain, and finally
//! the `Im` prefix convention for composite (record) types. Enumerations are
//! passed as `int` and never by value. A token that matches none of these is
//! an unknown type.

use std::collections::HashSet;

use serde::Serialize;

use super::types::{Enum, TypedefMap};
use crate::error::{Error, Result};

/// Prefix shared by every composite type of the wrapped library.
pub const COMPOSITE_PREFIX: &str = "Im";

/// Upper bound on typedef indirections, guards against alias cycles.
const MAX_TYPEDEF_DEPTH: usize = 16;

/// Emission-ready form of a native type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeRef {
    /// Primitive FFI type tag (`int`, `float`, `void`, ...)
    Primitive(String),

    /// Any pointer, function pointer or decayed array argument
    Pointer,

    /// Record type passed by value
    Composite(String),

    /// C variadic arguments
    Varargs,
}

impl TypeRef {
    /// Check if this is a composite type.
    pub fn is_composite(&self) -> bool {
        matches!(self, TypeRef::Composite(_))
    }

    /// Descriptor used in generated Ruby FFI code.
    pub fn as_ffi(&self) -> String {
        match self {
            TypeRef::Primitive(tag) => format!(":{}", tag),
            TypeRef::Pointer => ":pointer".to_string(),
            TypeRef::Composite(name) => format!("{}.by_value", name),
            TypeRef::Varargs => ":varargs".to_string(),
        }
    }
}

/// Map a C primitive type name to its FFI tag.
fn primitive_tag(name: &str) -> Option<&'static str> {
    let tag = match name {
        "void" => "void",
        "bool" | "_Bool" => "bool",
        "char" | "signed char" => "char",
        "unsigned char" => "uchar",
        "short" | "short int" | "signed short" => "short",
        "unsigned short" | "unsigned short int" => "ushort",
        "int" | "signed int" | "signed" => "int",
        "unsigned int" | "unsigned" => "uint",
        "long" | "long int" | "signed long" => "long",
        "unsigned long" | "unsigned long int" => "ulong",
        "long long" | "long long int" | "signed long long" => "long_long",
        "unsigned long long" | "unsigned long long int" => "ulong_long",
        "float" => "float",
        "double" => "double",
        "size_t" => "size_t",
        "int8_t" => "int8",
        "uint8_t" => "uint8",
        "int16_t" => "int16",
        "uint16_t" => "uint16",
        "int32_t" => "int32",
        "uint32_t" => "uint32",
        "int64_t" => "int64",
        "uint64_t" => "uint64",
        "intptr_t" => "intptr_t",
        "uintptr_t" => "uintptr_t",
        _ => return None,
    };
    Some(tag)
}

/// Remove `const`, `struct` and `enum` qualifiers from a token.
fn strip_qualifiers(token: &str) -> &str {
    let mut s = token.trim();
    loop {
        let next = s
            .strip_prefix("const ")
            .or_else(|| s.strip_prefix("struct "))
            .or_else(|| s.strip_prefix("enum "))
            .or_else(|| s.strip_suffix(" const"))
            .map(str::trim);
        match next {
            Some(rest) => s = rest,
            None => return s,
        }
    }
}

fn is_pointer_syntax(token: &str) -> bool {
    token.ends_with('*') || token.ends_with(']') || token.contains("(*)")
}

/// `enum ImGuiKey` or `const enum ImGuiKey`.
fn has_enum_keyword(token: &str) -> bool {
    token.split_whitespace().any(|word| word == "enum")
}

fn enum_int() -> TypeRef {
    TypeRef::Primitive("int".to_string())
}

/// Resolves native type tokens against a typedef map.
#[derive(Debug, Clone)]
pub struct TypeResolver<'a> {
    typedefs: &'a TypedefMap,
    enums: HashSet<String>,
    allow_unknown: bool,
}

impl<'a> TypeResolver<'a> {
    /// Create a resolver that rejects unknown types.
    pub fn new(typedefs: &'a TypedefMap) -> Self {
        TypeResolver {
            typedefs,
            enums: HashSet::new(),
            allow_unknown: false,
        }
    }

    /// Treat the names of `enums` as integer types.
    pub fn with_enums(mut self, enums: &[Enum]) -> Self {
        self.enums.extend(enums.iter().map(|e| e.name.clone()));
        self
    }

    /// Pass unknown tokens through as primitive tags instead of failing.
    pub fn with_allow_unknown(mut self, allow: bool) -> Self {
        self.allow_unknown = allow;
        self
    }

    /// Resolve a token. `context` names the declaration using it and is only
    /// evaluated when reporting an unknown type.
    pub fn resolve(&self, token: &str, context: impl FnOnce() -> String) -> Result<TypeRef> {
        if let Some(resolved) = self.classify(token, 0) {
            return Ok(resolved);
        }

        let ty = strip_qualifiers(token).to_string();
        if self.allow_unknown {
            let context = context();
            tracing::warn!("passing through unknown type `{}` in {}", ty, context);
            return Ok(TypeRef::Primitive(ty));
        }

        Err(Error::UnknownType {
            ty,
            context: context(),
        })
    }

    fn classify(&self, token: &str, depth: usize) -> Option<TypeRef> {
        let token = token.trim();

        if token == "..." {
            return Some(TypeRef::Varargs);
        }
        if is_pointer_syntax(token) {
            return Some(TypeRef::Pointer);
        }

        let name = strip_qualifiers(token);
        if let Some(tag) = primitive_tag(name) {
            return Some(TypeRef::Primitive(tag.to_string()));
        }
        if name == "va_list" {
            return Some(TypeRef::Pointer);
        }
        if has_enum_keyword(token) || self.enums.contains(name) {
            return Some(enum_int());
        }

        if depth < MAX_TYPEDEF_DEPTH {
            if let Some(underlying) = self.typedefs.get(name) {
                // `typedef struct ImVec2 ImVec2` points back at itself.
                if strip_qualifiers(underlying) != name || has_enum_keyword(underlying) {
                    if let Some(resolved) = self.classify(underlying, depth + 1) {
                        return Some(resolved);
                    }
                }
            }
        }

        if name.starts_with(COMPOSITE_PREFIX) && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Some(TypeRef::Composite(name.to_string()));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typedefs() -> TypedefMap {
        TypedefMap::new()
            .with_alias("ImGuiID", "unsigned int")
            .with_alias("ImGuiDir", "int")
            .with_alias("ImTextureID", "void*")
            .with_alias("ImWchar", "ImWchar16")
            .with_alias("ImWchar16", "unsigned short")
            .with_alias("ImVec2", "struct ImVec2")
            .with_alias("ImGuiSizeCallback", "void(*)(ImGuiSizeCallbackData* data);")
            .with_alias("LoopA", "LoopB")
            .with_alias("LoopB", "LoopA")
    }

    fn resolve(token: &str) -> Result<TypeRef> {
        let typedefs = typedefs();
        TypeResolver::new(&typedefs).resolve(token, || "test".to_string())
    }

    #[test]
    fn test_primitives() {
        assert_eq!(resolve("void").unwrap(), TypeRef::Primitive("void".into()));
        assert_eq!(resolve("float").unwrap(), TypeRef::Primitive("float".into()));
        assert_eq!(
            resolve("unsigned int").unwrap(),
            TypeRef::Primitive("uint".into())
        );
        assert_eq!(resolve("const int").unwrap(), TypeRef::Primitive("int".into()));
    }

    #[test]
    fn test_pointers() {
        assert_eq!(resolve("const char*").unwrap(), TypeRef::Pointer);
        assert_eq!(resolve("ImVec2*").unwrap(), TypeRef::Pointer);
        assert_eq!(resolve("float[3]").unwrap(), TypeRef::Pointer);
        assert_eq!(resolve("ImTextureID").unwrap(), TypeRef::Pointer);
        assert_eq!(resolve("ImGuiSizeCallback").unwrap(), TypeRef::Pointer);
        assert_eq!(resolve("va_list").unwrap(), TypeRef::Pointer);
    }

    #[test]
    fn test_typedef_chain() {
        assert_eq!(resolve("ImGuiID").unwrap(), TypeRef::Primitive("uint".into()));
        assert_eq!(resolve("ImWchar").unwrap(), TypeRef::Primitive("ushort".into()));
        assert_eq!(resolve("ImGuiDir").unwrap(), TypeRef::Primitive("int".into()));
    }

    #[test]
    fn test_composites() {
        assert_eq!(
            resolve("ImVec2").unwrap(),
            TypeRef::Composite("ImVec2".into())
        );
        assert_eq!(
            resolve("const ImVec4").unwrap(),
            TypeRef::Composite("ImVec4".into())
        );
        assert_eq!(resolve("...").unwrap(), TypeRef::Varargs);
    }

    #[test]
    fn test_enums_resolve_to_int() {
        let typedefs = typedefs().with_alias("ImGuiMouseSource", "enum ImGuiMouseSource");
        let enums = vec![Enum::new("ImGuiKey"), Enum::new("ImGuiCol")];
        let resolver = TypeResolver::new(&typedefs).with_enums(&enums);
        let resolve = |token: &str| resolver.resolve(token, || "test".to_string()).unwrap();

        assert_eq!(resolve("ImGuiKey"), TypeRef::Primitive("int".into()));
        assert_eq!(resolve("const ImGuiCol"), TypeRef::Primitive("int".into()));
        assert_eq!(resolve("enum ImGuiNavLayer"), TypeRef::Primitive("int".into()));
        assert_eq!(resolve("ImGuiMouseSource"), TypeRef::Primitive("int".into()));
        assert_eq!(resolve("ImGuiKey*"), TypeRef::Pointer);
        assert_eq!(resolve("ImVec2"), TypeRef::Composite("ImVec2".into()));
    }

    #[test]
    fn test_unknown_type_is_error() {
        let err = resolve("Foo").unwrap_err();
        assert!(matches!(err, Error::UnknownType { ref ty, .. } if ty == "Foo"));

        // Alias cycles never resolve and fall through to the unknown path.
        assert!(resolve("LoopA").is_err());
    }

    #[test]
    fn test_unknown_type_passthrough() {
        let typedefs = typedefs();
        let resolver = TypeResolver::new(&typedefs).with_allow_unknown(true);
        let resolved = resolver.resolve("const Foo", || "test".to_string()).unwrap();
        assert_eq!(resolved, TypeRef::Primitive("Foo".into()));
    }

    #[test]
    fn test_as_ffi() {
        assert_eq!(TypeRef::Primitive("float".into()).as_ffi(), ":float");
        assert_eq!(TypeRef::Pointer.as_ffi(), ":pointer");
        assert_eq!(
            TypeRef::Composite("ImVec2".into()).as_ffi(),
            "ImVec2.by_value"
        );
        assert_eq!(TypeRef::Varargs.as_ffi(), ":varargs");
    }
}

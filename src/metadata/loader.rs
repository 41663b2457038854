//! Loader for the cimgui generator's JSON output.
//!
//! Reads `typedefs_dict.json`, `structs_and_enums.json`, `definitions.json`
//! and `impl_definitions.json` into [`TypedefMap`], [`Enum`], [`Struct`] and
//! [`Function`] records. Document key order is significant and is kept.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::types::{Enum, EnumMember, Function, Metadata, Struct, StructMember, TypedefMap};
use crate::error::{Error, Result};

/// `Colors[ImGuiCol_COUNT]` style array member names.
static ARRAY_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\s*\[([^\]]*)\]$").expect("valid regex"));

/// `1 << 5` style enum value expressions.
static SHIFT_EXPR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(?\s*(-?\d+)\s*<<\s*(\d+)\s*\)?$").expect("valid regex"));

/// Paths of the metadata documents.
#[derive(Debug, Clone, Copy)]
pub struct MetadataPaths<'a> {
    pub typedefs: &'a Path,
    pub structs_and_enums: &'a Path,
    pub definitions: &'a Path,
    pub impl_definitions: Option<&'a Path>,
}

/// Load every metadata document.
pub fn load_all(paths: MetadataPaths<'_>) -> Result<Metadata> {
    let typedefs = load_typedefs(paths.typedefs)?;
    let (enums, structs) = load_structs_and_enums(paths.structs_and_enums)?;
    let functions = load_functions(paths.definitions)?;
    let impl_functions = match paths.impl_definitions {
        Some(path) => load_functions(path)?,
        None => Vec::new(),
    };

    tracing::debug!(
        "loaded {} typedefs, {} enums, {} structs, {} functions, {} impl functions",
        typedefs.len(),
        enums.len(),
        structs.len(),
        functions.len(),
        impl_functions.len()
    );

    Ok(Metadata {
        typedefs,
        enums,
        structs,
        functions,
        impl_functions,
    })
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::ReadMetadata {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the typedef dictionary.
pub fn load_typedefs(path: &Path) -> Result<TypedefMap> {
    typedefs_from_str(&read(path)?, path)
}

/// Load the enums and structs from `structs_and_enums.json`, parsing the
/// document once.
pub fn load_structs_and_enums(path: &Path) -> Result<(Vec<Enum>, Vec<Struct>)> {
    let doc = parse_document(&read(path)?, path)?;
    Ok((enums_from_doc(&doc, path)?, structs_from_doc(&doc, path)?))
}

/// Load a function definition list.
pub fn load_functions(path: &Path) -> Result<Vec<Function>> {
    functions_from_str(&read(path)?, path)
}

/// Parse a typedef dictionary. `origin` is only used in error messages.
pub fn typedefs_from_str(content: &str, origin: &Path) -> Result<TypedefMap> {
    let raw: HashMap<String, String> =
        serde_json::from_str(content).map_err(|e| Error::parse(origin, e.to_string()))?;
    Ok(raw.into_iter().collect())
}

fn parse_document(content: &str, origin: &Path) -> Result<Map<String, Value>> {
    serde_json::from_str(content).map_err(|e| Error::parse(origin, e.to_string()))
}

/// Fetch a required object-valued section of a document.
fn section<'a>(doc: &'a Map<String, Value>, key: &str, origin: &Path) -> Result<&'a Map<String, Value>> {
    doc.get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| Error::parse(origin, format!("missing `{}` object", key)))
}

#[derive(Debug, Deserialize)]
struct RawEnumMember {
    name: String,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    calc_value: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawStructMember {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    size: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawArg {
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Debug, Deserialize)]
struct RawOverload {
    #[serde(default)]
    ov_cimguiname: Option<String>,
    #[serde(default)]
    cimguiname: Option<String>,
    #[serde(default, rename = "argsT")]
    args: Vec<RawArg>,
    #[serde(default)]
    ret: Option<String>,
    #[serde(default)]
    constructor: bool,
    #[serde(default)]
    stname: String,
}

/// Parse the `enums` section of `structs_and_enums.json`.
pub fn enums_from_str(content: &str, origin: &Path) -> Result<Vec<Enum>> {
    enums_from_doc(&parse_document(content, origin)?, origin)
}

fn enums_from_doc(doc: &Map<String, Value>, origin: &Path) -> Result<Vec<Enum>> {
    let mut known: HashMap<String, i64> = HashMap::new();
    let mut enums = Vec::new();

    for (native_name, members) in section(doc, "enums", origin)? {
        let members: Vec<RawEnumMember> = serde_json::from_value(members.clone())
            .map_err(|e| Error::parse(origin, format!("enum `{}`: {}", native_name, e)))?;

        let member_prefix = if native_name.ends_with('_') {
            native_name.clone()
        } else {
            format!("{}_", native_name)
        };

        let mut result = Enum::new(native_name.trim_end_matches('_'));
        for member in members {
            let value = member_value(&member, &known).ok_or_else(|| {
                Error::parse(
                    origin,
                    format!(
                        "enum `{}` member `{}` has no integer value",
                        native_name, member.name
                    ),
                )
            })?;
            known.insert(member.name.clone(), value);

            let name = constant_name(&member.name, &member_prefix);
            result.members.push(EnumMember::new(name, value, member.name));
        }
        enums.push(result);
    }

    Ok(enums)
}

/// Integer value of an enum member: `calc_value` when present, otherwise the
/// `value` field evaluated as a `|` combination of literals, shifts and
/// previously seen member names.
fn member_value(member: &RawEnumMember, known: &HashMap<String, i64>) -> Option<i64> {
    if let Some(value) = member.calc_value {
        return Some(value);
    }
    match member.value.as_ref()? {
        Value::Number(n) => n.as_i64(),
        Value::String(expr) => eval_enum_expr(expr, known),
        _ => None,
    }
}

fn eval_enum_expr(expr: &str, known: &HashMap<String, i64>) -> Option<i64> {
    expr.split('|')
        .map(|term| eval_enum_term(term.trim(), known))
        .try_fold(0i64, |acc, term| term.map(|v| acc | v))
}

fn eval_enum_term(term: &str, known: &HashMap<String, i64>) -> Option<i64> {
    if let Some(value) = known.get(term) {
        return Some(*value);
    }
    if let Some(caps) = SHIFT_EXPR.captures(term) {
        let base: i64 = caps[1].parse().ok()?;
        let shift: u32 = caps[2].parse().ok()?;
        return base.checked_shl(shift);
    }
    parse_int(term)
}

fn parse_int(s: &str) -> Option<i64> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let value = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse().ok()?
    };
    Some(if negative { -value } else { value })
}

/// Strip the enum prefix from a member name, keeping the native name when the
/// remainder is not a usable constant identifier (`ImGuiKey_0`).
fn constant_name(native: &str, prefix: &str) -> String {
    match native.strip_prefix(prefix) {
        Some(rest) if is_constant_ident(rest) => rest.to_string(),
        _ => native.to_string(),
    }
}

fn is_constant_ident(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse the `structs` section of `structs_and_enums.json`.
pub fn structs_from_str(content: &str, origin: &Path) -> Result<Vec<Struct>> {
    structs_from_doc(&parse_document(content, origin)?, origin)
}

fn structs_from_doc(doc: &Map<String, Value>, origin: &Path) -> Result<Vec<Struct>> {
    let mut structs = Vec::new();

    for (name, members) in section(doc, "structs", origin)? {
        let members: Vec<RawStructMember> = serde_json::from_value(members.clone())
            .map_err(|e| Error::parse(origin, format!("struct `{}`: {}", name, e)))?;

        let mut result = Struct::new(name.clone());
        for member in members {
            result.members.push(struct_member(name, member, origin)?);
        }
        structs.push(result);
    }

    Ok(structs)
}

fn struct_member(owner: &str, member: RawStructMember, origin: &Path) -> Result<StructMember> {
    let parsed = ARRAY_MEMBER
        .captures(&member.name)
        .map(|caps| (caps[1].to_string(), caps[2].trim().to_string()));
    let Some((name, extent)) = parsed else {
        return Ok(StructMember::new(member.name, member.ty));
    };

    let size = member
        .size
        .or_else(|| extent.parse().ok())
        .ok_or_else(|| {
            Error::parse(
                origin,
                format!(
                    "struct `{}` array member `{}` has no size",
                    owner, member.name
                ),
            )
        })?;

    Ok(StructMember::array(name, member.ty, size))
}

/// Parse a function definition list (`definitions.json` or
/// `impl_definitions.json`). Each overload becomes one [`Function`].
pub fn functions_from_str(content: &str, origin: &Path) -> Result<Vec<Function>> {
    let doc = parse_document(content, origin)?;
    let mut functions = Vec::new();

    for (key, overloads) in &doc {
        let overloads: Vec<RawOverload> = serde_json::from_value(overloads.clone())
            .map_err(|e| Error::parse(origin, format!("function `{}`: {}", key, e)))?;

        for overload in overloads {
            let name = overload
                .ov_cimguiname
                .or(overload.cimguiname)
                .unwrap_or_else(|| key.clone());

            let ret = match overload.ret {
                Some(ret) => ret,
                None if overload.constructor => format!("{}*", overload.stname),
                None => "void".to_string(),
            };

            functions.push(Function {
                name,
                args: overload.args.into_iter().map(|a| a.ty).collect(),
                ret,
            });
        }
    }

    Ok(functions)
}

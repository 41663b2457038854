//! Removal of metadata entries that should not be bound.
//!
//! Filtering is pure and order-preserving: the output is exactly the input
//! entries for which the policy holds, in their original order.

use crate::metadata::{Function, Struct};

/// Structs that are internal, unsafe to bind generically, or redundant.
pub const DEFAULT_OMIT_STRUCTS: &[&str] = &[
    "CustomRect",
    "GlyphRangesBuilder",
    "ImDrawChannel",
    "ImDrawCmd",
    "ImDrawData",
    "ImDrawList",
    "ImDrawVert",
    "ImFontGlyph",
    "ImGuiInputTextCallbackData",
    "ImGuiListClipper",
    "ImGuiOnceUponAFrame",
    "ImGuiPayload",
    "ImGuiSizeCallbackData",
    "ImGuiStorage",
    "ImGuiTextBuffer",
    "ImGuiTextFilter",
    "TextRange",
    "Pair",
];

/// Name prefixes of the end-user API.
pub const DEFAULT_FUNCTION_PREFIXES: &[&str] = &["ig", "ImFontAtlas_"];

/// Backend variants that have no binding support yet.
pub const DEFAULT_OMIT_BACKENDS: &[&str] = &["OpenGL3", "SDL2"];

/// Keep the entries satisfying `predicate`, preserving order.
pub fn retain<T>(items: Vec<T>, predicate: impl Fn(&T) -> bool) -> Vec<T> {
    items.into_iter().filter(|item| predicate(item)).collect()
}

/// Struct denylist.
#[derive(Debug, Clone, Default)]
pub struct StructFilter {
    omit: Vec<String>,
}

impl StructFilter {
    /// Create a filter omitting the given struct names.
    pub fn new(omit: Vec<String>) -> Self {
        StructFilter { omit }
    }

    /// Check if a struct should be bound.
    pub fn should_include(&self, s: &Struct) -> bool {
        !self.omit.iter().any(|name| *name == s.name)
    }

    pub fn apply(&self, structs: Vec<Struct>) -> Vec<Struct> {
        let before = structs.len();
        let kept = retain(structs, |s| self.should_include(s));
        tracing::debug!("struct filter kept {} of {}", kept.len(), before);
        kept
    }
}

/// Function prefix allowlist plus backend-marker denylist.
#[derive(Debug, Clone)]
pub struct FunctionFilter {
    /// Required name prefixes (empty = any)
    prefixes: Vec<String>,
    /// Substrings marking unsupported backends
    omit_markers: Vec<String>,
}

impl Default for FunctionFilter {
    fn default() -> Self {
        FunctionFilter::new()
    }
}

impl FunctionFilter {
    /// Create a filter that keeps every function.
    pub fn new() -> Self {
        FunctionFilter {
            prefixes: Vec::new(),
            omit_markers: Vec::new(),
        }
    }

    /// Only keep functions starting with one of these prefixes.
    pub fn with_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Drop functions whose name contains one of these markers.
    pub fn with_omit_markers(mut self, markers: Vec<String>) -> Self {
        self.omit_markers = markers;
        self
    }

    /// Check if a function should be bound.
    pub fn should_include(&self, f: &Function) -> bool {
        if self.omit_markers.iter().any(|m| f.name.contains(m.as_str())) {
            return false;
        }

        if self.prefixes.is_empty() {
            return true;
        }

        self.prefixes.iter().any(|p| f.name.starts_with(p.as_str()))
    }

    pub fn apply(&self, functions: Vec<Function>) -> Vec<Function> {
        let before = functions.len();
        let kept = retain(functions, |f| self.should_include(f));
        tracing::debug!("function filter kept {} of {}", kept.len(), before);
        kept
    }
}

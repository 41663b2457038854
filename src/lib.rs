//! imgui-ffigen - Ruby FFI bindings for Dear ImGui
//!
//! This crate reads the JSON metadata emitted by the cimgui generator
//! (typedefs, enums, structs and function signatures) and writes a Ruby
//! module declaring the enum constants, struct layouts and function
//! attachments of the ImGui C API.

pub mod emitter;
pub mod error;
pub mod filter;
pub mod metadata;
pub mod naming;
pub mod ops;
pub mod util;

/// Test utilities for imgui-ffigen unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides cimgui metadata fixtures written to temporary directories.
#[cfg(test)]
pub mod test_support;

pub use emitter::{Bindings, ModuleOptions, SourceWriter};
pub use error::{Error, Result};
pub use metadata::{Enum, EnumMember, Function, Metadata, Struct, StructMember, TypeRef, TypedefMap};
pub use naming::{NameMapper, NameRule};
pub use util::config::Config;

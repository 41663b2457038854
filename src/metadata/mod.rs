//! ImGui C API metadata.
//!
//! This module loads the JSON documents produced by the cimgui generator and
//! classifies their type tokens for binding generation.

pub mod loader;
pub mod resolve;
pub mod types;

pub use loader::{load_all, MetadataPaths};
pub use resolve::{TypeRef, TypeResolver};
pub use types::{Enum, EnumMember, Function, Metadata, Struct, StructMember, TypedefMap};

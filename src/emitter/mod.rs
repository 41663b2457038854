//! Ruby FFI source generation.
//!
//! Output is written in three sections, each complete before the next
//! begins: enum constants, struct layouts, then the library module with its
//! function bindings.

pub mod layout;
pub mod ruby;
pub mod writer;

use std::io::Write;

pub use layout::{dependency_order, FieldDesc, FunctionBinding, StructLayout};
pub use ruby::ModuleOptions;
pub use writer::SourceWriter;

use crate::error::Result;
use crate::metadata::{Enum, Function, Struct, TypeResolver};
use crate::naming::NameMapper;

/// Filtered metadata with every type resolved, ready to write.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    pub enums: Vec<Enum>,
    /// Struct layouts, dependencies first
    pub structs: Vec<StructLayout>,
    pub functions: Vec<FunctionBinding>,
}

impl Bindings {
    /// Resolve structs and functions. Fails on the first unknown type.
    pub fn resolve<'f>(
        enums: Vec<Enum>,
        structs: &[Struct],
        functions: impl IntoIterator<Item = &'f Function>,
        names: &NameMapper,
        resolver: &TypeResolver<'_>,
    ) -> Result<Self> {
        let layouts = structs
            .iter()
            .map(|s| StructLayout::resolve(s, resolver))
            .collect::<Result<Vec<_>>>()?;

        let functions = functions
            .into_iter()
            .map(|f| FunctionBinding::resolve(f, names, resolver))
            .collect::<Result<Vec<_>>>()?;

        Ok(Bindings {
            enums,
            structs: dependency_order(layouts),
            functions,
        })
    }
}

/// Write the complete binding file.
pub fn emit<W: Write>(
    out: &mut SourceWriter<W>,
    bindings: &Bindings,
    options: &ModuleOptions,
) -> Result<()> {
    ruby::write_prologue(out)?;

    for e in &bindings.enums {
        ruby::write_enum(out, e)?;
    }
    out.newline()?;

    for layout in &bindings.structs {
        ruby::write_struct(out, layout)?;
    }

    ruby::write_module(out, options, &bindings.functions)
}

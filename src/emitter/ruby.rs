//! Ruby FFI emission rules.
//!
//! Enums become constant modules, structs become `FFI::Struct` layouts, and
//! functions become `attach_function` declarations inside the library module.

use std::io::Write;

use super::layout::{FieldDesc, FunctionBinding, StructLayout};
use super::writer::SourceWriter;
use crate::error::Result;
use crate::metadata::Enum;

/// Settings for the generated library module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOptions {
    /// Name of the Ruby module holding the function bindings
    pub module_name: String,

    /// Default shared library path for `load_lib`
    pub default_lib: String,
}

impl Default for ModuleOptions {
    fn default() -> Self {
        ModuleOptions {
            module_name: "ImGui".to_string(),
            default_lib: "./imgui.dylib".to_string(),
        }
    }
}

const PROLOGUE: &str = "\
# imgui-ffigen : Ruby FFI bindings for Dear ImGui
#
# [NOTICE] This is an automatically generated file.

require 'ffi'
";

pub fn write_prologue<W: Write>(out: &mut SourceWriter<W>) -> Result<()> {
    out.block(PROLOGUE)?;
    out.newline()
}

/// `Name = value # original` for every member, inside a module named after
/// the enum.
pub fn write_enum<W: Write>(out: &mut SourceWriter<W>, e: &Enum) -> Result<()> {
    out.line(&format!("# {}", e.name))?;
    out.line(&format!("module {}", e.name))?;
    out.push_indent();
    for m in &e.members {
        out.line(&format!("{} = {} # {}", m.name, m.value, m.original))?;
    }
    out.pop_indent();
    out.line("end")?;
    out.newline()
}

fn field_descriptor(field: &FieldDesc) -> String {
    match field.size {
        Some(size) => format!("[{}, {}]", field.ty.as_ffi(), size),
        None => field.ty.as_ffi(),
    }
}

pub fn write_struct<W: Write>(out: &mut SourceWriter<W>, layout: &StructLayout) -> Result<()> {
    out.line(&format!("class {} < FFI::Struct", layout.name))?;
    out.push_indent();
    if !layout.fields.is_empty() {
        out.line("layout(")?;
        out.push_indent();
        let last = layout.fields.len() - 1;
        for (i, field) in layout.fields.iter().enumerate() {
            let tail = if i == last { "" } else { "," };
            out.line(&format!(":{}, {}{}", field.name, field_descriptor(field), tail))?;
        }
        out.pop_indent();
        out.line(")")?;
    }
    out.pop_indent();
    out.line("end")?;
    out.newline()
}

pub fn write_function<W: Write>(out: &mut SourceWriter<W>, binding: &FunctionBinding) -> Result<()> {
    let args: Vec<String> = binding.args.iter().map(|a| a.as_ffi()).collect();
    out.line(&format!(
        "attach_function :{}, :{}, [{}], {}",
        binding.name,
        binding.native,
        args.join(", "),
        binding.ret.as_ffi()
    ))
}

/// The library module: explicit import state, `load_lib` and
/// `import_symbols` holding every function binding.
pub fn write_module<W: Write>(
    out: &mut SourceWriter<W>,
    options: &ModuleOptions,
    functions: &[FunctionBinding],
) -> Result<()> {
    out.line(&format!("module {}", options.module_name))?;
    out.newline()?;
    out.push_indent();
    out.line("extend FFI::Library")?;
    out.newline()?;

    out.line("@import_done = false")?;
    out.newline()?;

    out.line(&format!(
        "def self.load_lib(libpath = '{}')",
        options.default_lib
    ))?;
    out.push_indent();
    out.line("ffi_lib_flags :now, :global")?;
    out.line("ffi_lib libpath")?;
    out.line("return if @import_done")?;
    out.line("import_symbols()")?;
    out.line("@import_done = true")?;
    out.pop_indent();
    out.line("end")?;
    out.newline()?;

    out.line("def self.import_symbols()")?;
    out.push_indent();
    for binding in functions {
        write_function(out, binding)?;
    }
    out.pop_indent();
    out.line("end # self.import_symbols")?;
    out.newline()?;

    out.pop_indent();
    out.line(&format!("end # module {}", options.module_name))
}

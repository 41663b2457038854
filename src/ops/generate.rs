//! Binding generation pipeline.
//!
//! Load the metadata, filter it, resolve every type, then write the Ruby
//! file in one pass. The output is staged next to the destination and only
//! replaces it once fully written and flushed.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::emitter::{self, Bindings, ModuleOptions, SourceWriter};
use crate::filter::{FunctionFilter, StructFilter};
use crate::metadata::{load_all, Metadata, MetadataPaths, TypeResolver};
use crate::naming::NameMapper;
use crate::util::config::Config;
use crate::util::fs;

/// Counts of what was generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub output: PathBuf,
    pub enums: usize,
    pub structs: usize,
    pub functions: usize,
}

/// Load every metadata document named by the config.
pub fn load_metadata(config: &Config) -> Result<Metadata> {
    let input = &config.input;
    let paths = MetadataPaths {
        typedefs: &input.typedefs,
        structs_and_enums: &input.structs_and_enums,
        definitions: &input.definitions,
        impl_definitions: input.impl_definitions.as_deref(),
    };
    load_all(paths).context("failed to load cimgui metadata")
}

/// Filter the metadata and resolve it into emission-ready bindings.
pub fn prepare(config: &Config, metadata: Metadata) -> Result<Bindings> {
    let struct_filter = StructFilter::new(config.filter.omit_structs.clone());
    let api_filter = FunctionFilter::new().with_prefixes(config.filter.function_prefixes.clone());
    let backend_filter =
        FunctionFilter::new().with_omit_markers(config.filter.omit_backends.clone());

    let structs = struct_filter.apply(metadata.structs);
    let functions = api_filter.apply(metadata.functions);
    let impl_functions = backend_filter.apply(metadata.impl_functions);

    let names = NameMapper::new(config.naming.rules.clone());
    let resolver = TypeResolver::new(&metadata.typedefs)
        .with_enums(&metadata.enums)
        .with_allow_unknown(config.types.allow_unknown);

    let bindings = Bindings::resolve(
        metadata.enums,
        &structs,
        functions.iter().chain(&impl_functions),
        &names,
        &resolver,
    )?;
    Ok(bindings)
}

fn module_options(config: &Config) -> ModuleOptions {
    ModuleOptions {
        module_name: config.output.module_name.clone(),
        default_lib: config.output.default_lib.clone(),
    }
}

/// Write the bindings for `config` to an arbitrary sink.
pub fn render<W: Write>(config: &Config, bindings: &Bindings, out: W) -> Result<W> {
    let mut writer = SourceWriter::new(out).with_label(&config.output.path);
    emitter::emit(&mut writer, bindings, &module_options(config))?;
    Ok(writer.finish()?)
}

/// Render the complete binding file in memory.
pub fn render_to_vec(config: &Config) -> Result<Vec<u8>> {
    let metadata = load_metadata(config)?;
    let bindings = prepare(config, metadata)?;
    render(config, &bindings, Vec::new())
}

/// Generate the binding file at `config.output.path`.
pub fn generate(config: &Config) -> Result<GenerateSummary> {
    let metadata = load_metadata(config)?;
    let bindings = prepare(config, metadata)?;

    let dest = &config.output.path;
    let staged = fs::staging_file(dest)?;
    let writer = render(config, &bindings, BufWriter::new(staged))?;
    let staged = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("failed to flush output: {}", dest.display()))?;
    fs::persist(staged, dest)?;

    tracing::info!(
        "wrote {} enums, {} structs, {} functions to {}",
        bindings.enums.len(),
        bindings.structs.len(),
        bindings.functions.len(),
        dest.display()
    );

    Ok(GenerateSummary {
        output: dest.clone(),
        enums: bindings.enums.len(),
        structs: bindings.structs.len(),
        functions: bindings.functions.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_support::MetadataFixture;

    const EXPECTED: &str = "\
# imgui-ffigen : Ruby FFI bindings for Dear ImGui
#
# [NOTICE] This is an automatically generated file.

require 'ffi'

# ImGuiDir
module ImGuiDir
  Left = 0 # ImGuiDir_Left
  Right = 1 # ImGuiDir_Right
end


class ImVec2 < FFI::Struct
  layout(
    :x, :float,
    :y, :float
  )
end

class ImGuiStyle < FFI::Struct
  layout(
    :Alpha, :float,
    :WindowPadding, ImVec2.by_value,
    :Tint, [:float, 3]
  )
end

module ImGui

  extend FFI::Library

  @import_done = false

  def self.load_lib(libpath = './imgui.dylib')
    ffi_lib_flags :now, :global
    ffi_lib libpath
    return if @import_done
    import_symbols()
    @import_done = true
  end

  def self.import_symbols()
    attach_function :Text, :igText, [:pointer, :varargs], :void
    attach_function :GetCursorPos, :igGetCursorPos, [], ImVec2.by_value
    attach_function :ImplOpenGL2_Init, :ImGui_ImplOpenGL2_Init, [], :bool
  end # self.import_symbols

end # module ImGui
";

    #[test]
    fn test_generate_writes_bindings() {
        let fixture = MetadataFixture::minimal().write();
        let config = fixture.config();

        let summary = generate(&config).unwrap();
        assert_eq!(
            summary,
            GenerateSummary {
                output: fixture.output_path(),
                enums: 1,
                structs: 2,
                functions: 3,
            }
        );

        let text = std::fs::read_to_string(fixture.output_path()).unwrap();
        assert_eq!(text, EXPECTED);
    }

    #[test]
    fn test_render_matches_generated_file() {
        let fixture = MetadataFixture::minimal().write();
        let config = fixture.config();

        generate(&config).unwrap();
        let on_disk = std::fs::read(fixture.output_path()).unwrap();
        assert_eq!(render_to_vec(&config).unwrap(), on_disk);
    }

    #[test]
    fn test_unknown_type_leaves_existing_output_untouched() {
        let mut metadata = MetadataFixture::minimal();
        metadata.definitions = r#"{"igMystery": [{"argsT": [{"name": "x", "type": "Mystery"}], "ret": "void"}]}"#.to_string();
        let fixture = metadata.write();
        let config = fixture.config();

        std::fs::create_dir_all(fixture.output_path().parent().unwrap()).unwrap();
        std::fs::write(fixture.output_path(), "previous").unwrap();

        let err = generate(&config).unwrap_err();
        let err = err.downcast_ref::<Error>().unwrap();
        assert!(matches!(err, Error::UnknownType { ty, .. } if ty == "Mystery"));

        assert_eq!(std::fs::read_to_string(fixture.output_path()).unwrap(), "previous");
        let leftovers = std::fs::read_dir(fixture.output_path().parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_allow_unknown_passes_token_through() {
        let mut metadata = MetadataFixture::minimal();
        metadata.definitions = r#"{"igMystery": [{"argsT": [{"name": "x", "type": "Mystery"}], "ret": "void"}]}"#.to_string();
        let fixture = metadata.write();
        let mut config = fixture.config();
        config.types.allow_unknown = true;

        generate(&config).unwrap();
        let text = std::fs::read_to_string(fixture.output_path()).unwrap();
        assert!(text.contains("attach_function :Mystery, :igMystery, [:Mystery], :void"));
    }

    #[test]
    fn test_enum_types_bind_as_int() {
        let mut metadata = MetadataFixture::minimal();
        metadata.typedefs = r#"{"ImGuiMouseSource": "enum ImGuiMouseSource"}"#.to_string();
        metadata.structs_and_enums = r#"{
    "enums": {
        "ImGuiKey": [{"calc_value": 512, "name": "ImGuiKey_Tab", "value": "512"}]
    },
    "structs": {
        "ImGuiKeyData": [
            {"name": "Key", "type": "ImGuiKey"},
            {"name": "Source", "type": "ImGuiMouseSource"}
        ]
    }
}"#
        .to_string();
        metadata.definitions = r#"{
    "igIsKeyDown": [{
        "argsT": [{"name": "key", "type": "ImGuiKey"}],
        "ov_cimguiname": "igIsKeyDown_Nil",
        "ret": "bool"
    }]
}"#
        .to_string();
        let fixture = metadata.write();

        generate(&fixture.config()).unwrap();
        let text = std::fs::read_to_string(fixture.output_path()).unwrap();
        assert!(text.contains("module ImGuiKey\n  Tab = 512 # ImGuiKey_Tab\nend\n"));
        assert!(text.contains("    :Key, :int,\n    :Source, :int\n"));
        assert!(text.contains("attach_function :IsKeyDown_Nil, :igIsKeyDown_Nil, [:int], :bool"));
        assert!(!text.contains(".by_value"));
    }

    #[test]
    fn test_malformed_metadata_writes_nothing() {
        let mut metadata = MetadataFixture::minimal();
        metadata.structs_and_enums = "{ \"enums\": [".to_string();
        let fixture = metadata.write();

        let err = generate(&fixture.config()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::MetadataParse { .. })
        ));
        assert!(!fixture.output_path().exists());
    }
}

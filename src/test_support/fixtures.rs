//! Metadata fixtures for common test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::util::config::Config;

/// The four cimgui documents as JSON text.
#[derive(Debug, Clone)]
pub struct MetadataFixture {
    pub typedefs: String,
    pub structs_and_enums: String,
    pub definitions: String,
    pub impl_definitions: String,
}

impl MetadataFixture {
    /// A small but complete API: one enum, three structs (one denylisted),
    /// three public functions (one outside the API prefixes) and two backend
    /// functions (one unsupported).
    pub fn minimal() -> Self {
        MetadataFixture {
            typedefs: r#"{
    "ImGuiID": "unsigned int",
    "ImGuiDir": "int",
    "ImTextureID": "void*",
    "ImVec2": "struct ImVec2"
}"#
            .to_string(),
            structs_and_enums: r#"{
    "enums": {
        "ImGuiDir_": [
            {"calc_value": 0, "name": "ImGuiDir_Left", "value": "0"},
            {"calc_value": 1, "name": "ImGuiDir_Right", "value": "1"}
        ]
    },
    "structs": {
        "ImGuiStyle": [
            {"name": "Alpha", "type": "float"},
            {"name": "WindowPadding", "type": "ImVec2"},
            {"name": "Tint[3]", "size": 3, "type": "float"}
        ],
        "ImDrawList": [
            {"name": "Flags", "type": "int"}
        ],
        "ImVec2": [
            {"name": "x", "type": "float"},
            {"name": "y", "type": "float"}
        ]
    }
}"#
            .to_string(),
            definitions: r#"{
    "igText": [{
        "argsT": [{"name": "fmt", "type": "const char*"}, {"name": "...", "type": "..."}],
        "cimguiname": "igText",
        "ov_cimguiname": "igText",
        "ret": "void"
    }],
    "igGetCursorPos": [{
        "argsT": [],
        "cimguiname": "igGetCursorPos",
        "ov_cimguiname": "igGetCursorPos",
        "ret": "ImVec2"
    }],
    "ImDrawList_AddLine": [{
        "argsT": [{"name": "self", "type": "ImDrawList*"}],
        "cimguiname": "ImDrawList_AddLine",
        "ret": "void"
    }]
}"#
            .to_string(),
            impl_definitions: r#"{
    "ImGui_ImplOpenGL2_Init": [{"argsT": [], "cimguiname": "ImGui_ImplOpenGL2_Init", "ret": "bool"}],
    "ImGui_ImplOpenGL3_Init": [{"argsT": [{"name": "glsl_version", "type": "const char*"}], "cimguiname": "ImGui_ImplOpenGL3_Init", "ret": "bool"}]
}"#
            .to_string(),
        }
    }

    /// Write the documents into a fresh temporary directory.
    pub fn write(self) -> WrittenFixture {
        let dir = TempDir::new().expect("create temp dir");
        let root = dir.path();
        write_file(root, "typedefs_dict.json", &self.typedefs);
        write_file(root, "structs_and_enums.json", &self.structs_and_enums);
        write_file(root, "definitions.json", &self.definitions);
        write_file(root, "impl_definitions.json", &self.impl_definitions);
        WrittenFixture { dir }
    }
}

fn write_file(root: &Path, name: &str, content: &str) {
    fs::write(root.join(name), content).expect("write fixture file");
}

/// Metadata documents on disk. The directory is removed on drop.
#[derive(Debug)]
pub struct WrittenFixture {
    dir: TempDir,
}

impl WrittenFixture {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Where generated output goes.
    pub fn output_path(&self) -> PathBuf {
        self.root().join("out").join("imgui.rb")
    }

    /// Default config with every path pointing into the fixture directory.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.input.typedefs = self.root().join("typedefs_dict.json");
        config.input.structs_and_enums = self.root().join("structs_and_enums.json");
        config.input.definitions = self.root().join("definitions.json");
        config.input.impl_definitions = Some(self.root().join("impl_definitions.json"));
        config.output.path = self.output_path();
        config
    }
}

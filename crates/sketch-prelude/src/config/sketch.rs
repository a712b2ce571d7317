use std::collections::HashMap;

use serde::Deserialize;
use toml::Value;

pub const DEFAULT_EXTENSIONS: &[&str] = &["ino", "pde"];

#[derive(Debug, Clone, PartialEq)]
pub struct SketchSettings {
    /// Recognized sketch file extensions, lowercase and without the dot.
    pub extensions: Vec<String>,
}

impl Default for SketchSettings {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_owned()).collect(),
        }
    }
}

impl SketchSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: SketchSettingsPatch,
    ) {
        if let Some(v) = patch.extensions {
            self.extensions = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        let mut extensions: Vec<String> = self
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        extensions.sort();
        extensions.dedup();
        if extensions.is_empty() {
            extensions = Self::default().extensions;
        }
        self.extensions = extensions;
    }

    pub fn is_sketch_extension(
        &self,
        extension: &str,
    ) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(extension))
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct SketchSettingsPatch {
    pub(crate) extensions: Option<Vec<String>>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}

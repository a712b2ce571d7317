use std::collections::HashMap;

use serde::Deserialize;
use toml::Value;

pub const DEFAULT_CLANG: &str = "clang";
pub const DEFAULT_LANGUAGE: &str = "c++";
pub const DEFAULT_STD: &str = "gnu++20";

/// How the Clang front end is invoked.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontendSettings {
    /// Clang executable, looked up on `PATH` when not absolute.
    pub clang: String,
    /// Value passed to `-x`.
    pub language: String,
    /// Value passed to `-std=`.
    pub std: String,
    /// Flags forwarded verbatim ahead of any command-line extras.
    pub extra_flags: Vec<String>,
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            clang: DEFAULT_CLANG.to_owned(),
            language: DEFAULT_LANGUAGE.to_owned(),
            std: DEFAULT_STD.to_owned(),
            extra_flags: Vec::new(),
        }
    }
}

impl FrontendSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: FrontendSettingsPatch,
    ) {
        if let Some(v) = patch.clang {
            self.clang = v;
        }
        if let Some(v) = patch.language {
            self.language = v;
        }
        if let Some(v) = patch.std {
            self.std = v;
        }
        if let Some(v) = patch.extra_flags {
            self.extra_flags = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        let defaults = Self::default();
        for (value, fallback) in [
            (&mut self.clang, defaults.clang),
            (&mut self.language, defaults.language),
            (&mut self.std, defaults.std),
        ] {
            let trimmed = value.trim();
            *value = if trimmed.is_empty() { fallback } else { trimmed.to_owned() };
        }
        self.extra_flags = self.extra_flags.iter().map(|f| f.trim().to_owned()).filter(|f| !f.is_empty()).collect();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FrontendSettingsPatch {
    pub(crate) clang: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) std: Option<String>,
    pub(crate) extra_flags: Option<Vec<String>>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}

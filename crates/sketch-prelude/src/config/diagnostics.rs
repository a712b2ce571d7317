use std::collections::HashMap;

use serde::Deserialize;
use toml::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiagnosticsSettings {
    /// Abort before emitting anything when Clang reports an error.
    pub strict: bool,
}

impl DiagnosticsSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: DiagnosticsSettingsPatch,
    ) {
        if let Some(v) = patch.strict {
            self.strict = v;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct DiagnosticsSettingsPatch {
    pub(crate) strict: Option<bool>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}

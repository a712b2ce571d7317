//! Layered configuration.
//!
//! Settings are split into one file per category. [`PreludeSettings`]
//! aggregates all categories; values are layered as defaults, then an
//! optional `sketch-prelude.toml`, then environment overrides, and finally
//! whatever the command line sets.

pub(crate) mod diagnostics;
pub(crate) mod frontend;
pub(crate) mod logging;
pub(crate) mod sketch;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use diagnostics::DiagnosticsSettings;
use diagnostics::DiagnosticsSettingsPatch;
pub use frontend::{DEFAULT_CLANG, DEFAULT_LANGUAGE, DEFAULT_STD, FrontendSettings};
use frontend::FrontendSettingsPatch;
use logging::LoggingSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
use serde::Deserialize;
pub use sketch::{DEFAULT_EXTENSIONS, SketchSettings};
use sketch::SketchSettingsPatch;
use toml::Value;
use tracing::debug;

use crate::error::{PreludeError, Result};

/// File picked up from the sketch directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "sketch-prelude.toml";
/// Overrides `frontend.clang`.
pub const CLANG_ENV: &str = "SKETCH_PRELUDE_CLANG";
/// When set, the composite source is appended to the output.
pub const DUMP_COMPOSITE_ENV: &str = "SKETCH_PRELUDE_DUMP_COMPOSITE";
/// `EnvFilter` directives that replace the configured log level.
pub const LOG_ENV: &str = "SKETCH_PRELUDE_LOG";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreludeSettings {
    pub frontend: FrontendSettings,
    pub sketch: SketchSettings,
    pub diagnostics: DiagnosticsSettings,
    pub logging: LoggingSettings,
}

impl PreludeSettings {
    /// Defaults overlaid with a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let patch: PreludeSettingsPatch = toml::from_str(text)?;
        let mut settings = Self::default();
        settings.apply_patch(patch);
        settings.normalize();
        Ok(settings)
    }

    /// Resolve settings for a run on `input`.
    ///
    /// An explicit config file must exist and parse; the implicit
    /// `sketch-prelude.toml` next to the input is only read when present.
    pub fn load(
        explicit: Option<&Path>,
        input: &Path,
    ) -> Result<Self> {
        let candidate = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => implicit_config_path(input).filter(|p| p.is_file()),
        };

        let mut settings = match candidate {
            Some(path) => {
                let text = std::fs::read_to_string(&path).map_err(|e| PreludeError::io(&path, e))?;
                let settings = Self::from_toml_str(&text).map_err(|source| PreludeError::Config {
                    path: path.clone(),
                    source,
                })?;
                debug!("loaded configuration from {}", path.display());
                settings
            },
            None => Self::default(),
        };

        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) {
        if let Some(clang) = lookup(CLANG_ENV) {
            self.frontend.clang = clang;
        }
        self.normalize();
    }

    fn apply_patch(
        &mut self,
        patch: PreludeSettingsPatch,
    ) {
        if let Some(p) = patch.frontend {
            self.frontend.apply_patch(p);
        }
        if let Some(p) = patch.sketch {
            self.sketch.apply_patch(p);
        }
        if let Some(p) = patch.diagnostics {
            self.diagnostics.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.frontend.normalize();
        self.sketch.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
struct PreludeSettingsPatch {
    frontend: Option<FrontendSettingsPatch>,
    sketch: Option<SketchSettingsPatch>,
    diagnostics: Option<DiagnosticsSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

/// `sketch-prelude.toml` in the sketch directory: the input itself when it
/// is a directory, otherwise its parent.
fn implicit_config_path(input: &Path) -> Option<PathBuf> {
    let dir = if input.is_dir() { input } else { input.parent()? };
    Some(dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
#[path = "../../tests/src/config_tests.rs"]
mod tests;

use std::path::PathBuf;

use thiserror::Error;

use crate::frontend::ClangDiagnostic;

/// Every way a prelude run can fail.
///
/// All variants are terminal: the binary prints the message to stderr and
/// exits without writing any declarations.
#[derive(Debug, Error)]
pub enum PreludeError {
    #[error("specified sketch does not exist: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown sketch format \"{extension}\"")]
    UnknownFormat { extension: String },

    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("no sketch files in specified directory {}", .0.display())]
    EmptySketch(PathBuf),

    #[error("invalid configuration file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to run {program}: {source}")]
    FrontEndUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse translation unit {unit}")]
    Parse { unit: String },

    #[error("malformed AST dump for {unit}: {source}")]
    AstJson {
        unit: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} error(s) reported while parsing {unit}", diagnostics.len())]
    Diagnostics {
        unit: String,
        diagnostics: Vec<ClangDiagnostic>,
    },

    #[error("failed to format output")]
    Format(#[from] std::fmt::Error),
}

impl PreludeError {
    pub(crate) fn io(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = PreludeError> = std::result::Result<T, E>;

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Deserialize;
use tracing::{debug, warn};

use super::{ClangCursor, ClangDiagnostic, Node, parse_diagnostics};
use crate::config::FrontendSettings;
use crate::error::{PreludeError, Result};

static NEXT_SCRATCH_ID: AtomicU64 = AtomicU64::new(1);

/// Source handed to the front end.
#[derive(Debug, Clone, Copy)]
pub enum TranslationUnit<'a> {
    /// One file on disk, parsed without following its includes.
    SingleFile(&'a Path),
    /// Synthetic source that only exists in memory; `name` becomes the
    /// file name Clang reports for it.
    Composite { name: &'a str, contents: &'a str },
}

impl TranslationUnit<'_> {
    fn describe(&self) -> String {
        match self {
            Self::SingleFile(path) => path.display().to_string(),
            Self::Composite {
                name,
                ..
            } => (*name).to_owned(),
        }
    }
}

/// A translation unit Clang managed to build an AST for.
pub struct ParsedUnit {
    pub root: Node,
    pub diagnostics: Vec<ClangDiagnostic>,
}

impl ParsedUnit {
    pub fn cursor(&self) -> ClangCursor<'_> {
        ClangCursor::new(&self.root)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ClangDiagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }
}

/// Runs `clang -Xclang -ast-dump=json` and deserializes the result.
pub struct ClangFrontEnd {
    settings: FrontendSettings,
}

impl ClangFrontEnd {
    pub fn new(settings: FrontendSettings) -> Self {
        Self {
            settings,
        }
    }

    pub fn settings(&self) -> &FrontendSettings {
        &self.settings
    }

    /// Parse `unit`, forwarding `extra_args` to Clang after the configured
    /// flags.
    ///
    /// A non-zero Clang exit is tolerated as long as an AST was dumped; the
    /// caller decides what to do with the collected diagnostics.
    pub fn parse(
        &self,
        unit: TranslationUnit<'_>,
        extra_args: &[String],
    ) -> Result<ParsedUnit> {
        let description = unit.describe();

        // Keep the scratch directory alive until Clang has exited.
        let scratch;
        let (source_path, single_file) = match unit {
            TranslationUnit::SingleFile(path) => (path.to_path_buf(), true),
            TranslationUnit::Composite {
                name,
                contents,
            } => {
                scratch = ScratchDir::create()?;
                let path = scratch.path().join(name);
                std::fs::write(&path, contents).map_err(|e| PreludeError::io(&path, e))?;
                (path, false)
            },
        };

        let args = self.command_args(&source_path, single_file, extra_args);
        debug!("AST dump: {} {}", self.settings.clang, args.join(" "));

        let output = Command::new(&self.settings.clang).args(&args).output().map_err(|source| {
            PreludeError::FrontEndUnavailable {
                program: self.settings.clang.clone(),
                source,
            }
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let diagnostics = parse_diagnostics(&stderr);
        if !output.status.success() {
            for diag in diagnostics.iter().filter(|d| d.is_error()) {
                warn!("[ast-dump] {diag}");
            }
            debug!("[ast-dump] exited with {} (partial AST may still be usable)", output.status);
        }

        if output.stdout.first() != Some(&b'{') {
            warn!("[ast-dump] produced no usable JSON for {description}");
            return Err(PreludeError::Parse {
                unit: description,
            });
        }
        debug!("[ast-dump] produced {} bytes of JSON for {description}", output.stdout.len());

        let root = deserialize_ast(&output.stdout).map_err(|source| PreludeError::AstJson {
            unit: description.clone(),
            source,
        })?;

        Ok(ParsedUnit {
            root,
            diagnostics,
        })
    }

    pub(crate) fn command_args(
        &self,
        source_path: &Path,
        single_file: bool,
        extra_args: &[String],
    ) -> Vec<String> {
        let mut args = vec![
            "-x".to_owned(),
            self.settings.language.clone(),
            format!("-std={}", self.settings.std),
            "-fsyntax-only".to_owned(),
            "-fno-color-diagnostics".to_owned(),
            "-Xclang".to_owned(),
            "-ast-dump=json".to_owned(),
        ];
        if single_file {
            args.push("-Xclang".to_owned());
            args.push("-single-file-parse".to_owned());
        }
        args.extend(self.settings.extra_flags.iter().cloned());
        args.extend(extra_args.iter().cloned());
        args.push(source_path.display().to_string());
        args
    }
}

/// Deserialize a JSON AST dump of any nesting depth.
///
/// Long `else if` chains and chained `operator+` nest far deeper than
/// serde_json's default recursion limit; the stack grows on demand instead.
pub fn deserialize_ast(json: &[u8]) -> serde_json::Result<Node> {
    let mut deserializer = serde_json::Deserializer::from_slice(json);
    deserializer.disable_recursion_limit();
    let root = Node::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(root)
}

/// Per-invocation temp directory, removed on drop.
struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    fn create() -> Result<Self> {
        let id = NEXT_SCRATCH_ID.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!("sketch-prelude-{}-{id}", std::process::id()));
        std::fs::create_dir_all(&path).map_err(|e| PreludeError::io(&path, e))?;
        Ok(Self {
            path,
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        // Best-effort cleanup of the temporary directory.
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[cfg(test)]
#[path = "../../tests/src/frontend/compiler_tests.rs"]
mod tests;

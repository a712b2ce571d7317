//! Ties the pieces together for one invocation: collect sources, parse,
//! synthesize, emit.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::PreludeSettings;
use crate::emit::{COMPOSITE_IDENTITY, emit_composite_dump, emit_prototypes};
use crate::error::{PreludeError, Result};
use crate::frontend::{ClangFrontEnd, ParsedUnit, TranslationUnit};
use crate::sketch::{COMPOSITE_NAME, Sketch};
use crate::synth::synthesize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Every recognized file in the sketch directory, parsed as one unit.
    #[default]
    Sketch,
    /// One file on its own, includes not followed, no file filter.
    SingleFile,
}

/// Everything one run needs besides settings.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub input: PathBuf,
    pub mode: Mode,
    /// Forwarded to Clang after the configured flags.
    pub extra_args: Vec<String>,
    /// Append the composite unit to the output (sketch mode only).
    pub dump_composite: bool,
}

/// Produce the complete prelude text, or nothing at all.
pub fn run(
    invocation: &Invocation,
    settings: &PreludeSettings,
) -> Result<String> {
    let frontend = ClangFrontEnd::new(settings.frontend.clone());
    match invocation.mode {
        Mode::SingleFile => run_single_file(&frontend, invocation, settings),
        Mode::Sketch => run_sketch(&frontend, invocation, settings),
    }
}

fn run_single_file(
    frontend: &ClangFrontEnd,
    invocation: &Invocation,
    settings: &PreludeSettings,
) -> Result<String> {
    let path = invocation.input.as_path();
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PreludeError::MissingInput(path.to_path_buf()),
        _ => PreludeError::io(path, e),
    })?;
    if !metadata.is_file() {
        return Err(PreludeError::NotAFile(path.to_path_buf()));
    }

    info!("parsing {}", path.display());
    let parsed = frontend.parse(TranslationUnit::SingleFile(path), &invocation.extra_args)?;
    check_diagnostics(&parsed, path.display().to_string(), settings.diagnostics.strict)?;

    let declarations = synthesize(&parsed.cursor(), None);
    let mut out = String::new();
    emit_prototypes(&mut out, &identity_of(path), &declarations)?;
    Ok(out)
}

fn run_sketch(
    frontend: &ClangFrontEnd,
    invocation: &Invocation,
    settings: &PreludeSettings,
) -> Result<String> {
    let sketch = Sketch::discover(&invocation.input, &settings.sketch)?;
    let composite = sketch.composite_source();
    debug!("composite unit:\n{composite}");

    info!("parsing sketch {} ({} file(s))", sketch.dir().display(), sketch.files().len());
    let unit = TranslationUnit::Composite {
        name: COMPOSITE_NAME,
        contents: &composite,
    };
    let parsed = frontend.parse(unit, &invocation.extra_args)?;
    check_diagnostics(&parsed, sketch.dir().display().to_string(), settings.diagnostics.strict)?;

    let declarations = synthesize(&parsed.cursor(), Some(sketch.files()));
    let mut out = String::new();
    emit_prototypes(&mut out, COMPOSITE_IDENTITY, &declarations)?;
    if invocation.dump_composite {
        emit_composite_dump(&mut out, &composite)?;
    }
    Ok(out)
}

fn check_diagnostics(
    parsed: &ParsedUnit,
    unit: String,
    strict: bool,
) -> Result<()> {
    if !strict {
        return Ok(());
    }
    let errors: Vec<_> = parsed.errors().cloned().collect();
    if errors.is_empty() {
        return Ok(());
    }
    Err(PreludeError::Diagnostics {
        unit,
        diagnostics: errors,
    })
}

fn identity_of(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

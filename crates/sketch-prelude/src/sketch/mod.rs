//! Sketch discovery: which files make up a sketch, and the composite unit
//! that lets Clang parse them all at once.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::SketchSettings;
use crate::error::{PreludeError, Result};

/// File name Clang sees for the composite unit.
pub const COMPOSITE_NAME: &str = "arduino-source.cxx";

/// The sorted set of files a sketch consists of.
///
/// Doubles as the membership filter deciding whether a definition belongs
/// to the sketch or to a header it pulls in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileFilter {
    files: Vec<String>,
}

impl FileFilter {
    pub fn new(files: impl IntoIterator<Item = String>) -> Self {
        let mut files: Vec<String> = files.into_iter().collect();
        files.sort();
        files.dedup();
        Self {
            files,
        }
    }

    pub fn contains(
        &self,
        file: &str,
    ) -> bool {
        self.files.binary_search_by(|f| f.as_str().cmp(file)).is_ok()
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A sketch directory and the recognized files in it.
#[derive(Debug, Clone)]
pub struct Sketch {
    dir: PathBuf,
    files: FileFilter,
}

impl Sketch {
    /// Resolve `path` to a sketch.
    ///
    /// A file with a recognized extension stands for its whole directory; a
    /// directory is scanned (not recursively) for recognized files.
    pub fn discover(
        path: &Path,
        settings: &SketchSettings,
    ) -> Result<Self> {
        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PreludeError::MissingInput(path.to_path_buf()));
            },
            Err(e) => return Err(PreludeError::io(path, e)),
        };

        let dir = if metadata.is_dir() {
            absolute(path)?
        } else {
            let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !settings.is_sketch_extension(extension) {
                return Err(PreludeError::UnknownFormat {
                    extension: extension.to_owned(),
                });
            }
            let file = absolute(path)?;
            match file.parent() {
                Some(parent) => parent.to_path_buf(),
                None => return Err(PreludeError::NotAFile(file)),
            }
        };

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&dir).to_path_buf();
                PreludeError::io(path, e.into())
            })?;
            if entry.file_type().is_dir() {
                continue;
            }
            let recognized = entry.path().extension().and_then(|e| e.to_str());
            if recognized.is_some_and(|e| settings.is_sketch_extension(e)) {
                files.push(generic_string(entry.path()));
            }
        }

        if files.is_empty() {
            return Err(PreludeError::EmptySketch(dir));
        }

        let files = FileFilter::new(files);
        debug!("sketch {} has {} file(s)", dir.display(), files.len());
        Ok(Self {
            dir,
            files,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &FileFilter {
        &self.files
    }

    /// One `#include "<path>"` line per sketch file, in sorted order.
    pub fn composite_source(&self) -> String {
        const DIRECTIVE_OVERHEAD: usize = "#include \"\"\n".len();
        let capacity = self.files.files().iter().map(|f| f.len() + DIRECTIVE_OVERHEAD).sum();
        let mut contents = String::with_capacity(capacity);
        for file in self.files.files() {
            contents.push_str("#include \"");
            contents.push_str(file);
            contents.push_str("\"\n");
        }
        contents
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| PreludeError::io(path, e))
}

/// Path text with `/` separators, the form Clang reports back in locations.
fn generic_string(path: &Path) -> String {
    let text = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' { text.into_owned() } else { text.replace(std::path::MAIN_SEPARATOR, "/") }
}

#[cfg(test)]
#[path = "../../tests/src/sketch_tests.rs"]
mod tests;

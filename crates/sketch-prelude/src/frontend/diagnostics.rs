use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static DIAGNOSTIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?):(\d+):(\d+):\s*(fatal error|error|warning|note|remark):\s*(.*)$")
        .expect("diagnostic regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Note,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    fn from_label(label: &str) -> Self {
        match label {
            "fatal error" => Self::Fatal,
            "error" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Note,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Fatal => "fatal error",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Note => "note",
        }
    }
}

/// A diagnostic line from Clang's stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClangDiagnostic {
    pub file: String,
    /// 1-based, as Clang prints it.
    pub line: u32,
    pub column: u32,
    pub severity: Severity,
    pub message: String,
}

impl ClangDiagnostic {
    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }
}

impl fmt::Display for ClangDiagnostic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}:{}: {}: {}", self.file, self.line, self.column, self.severity.label(), self.message)
    }
}

/// Parse Clang's stderr into diagnostics, skipping source excerpts, caret
/// lines and summary lines.
pub fn parse_diagnostics(output: &str) -> Vec<ClangDiagnostic> {
    output.lines().filter_map(parse_diagnostic_line).collect()
}

/// Attempt to parse a single line of compiler output.
///
/// Expected format: `filename:line:column: severity: message`
fn parse_diagnostic_line(line: &str) -> Option<ClangDiagnostic> {
    let caps = DIAGNOSTIC_RE.captures(line)?;

    let file = caps.get(1)?.as_str().to_owned();
    let line_num: u32 = caps.get(2)?.as_str().parse().ok()?;
    let column: u32 = caps.get(3)?.as_str().parse().ok()?;
    let severity = Severity::from_label(caps.get(4)?.as_str());
    let message = caps.get(5)?.as_str().to_owned();

    Some(ClangDiagnostic {
        file,
        line: line_num,
        column,
        severity,
        message,
    })
}

#[cfg(test)]
#[path = "../../tests/src/frontend/diagnostics_tests.rs"]
mod tests;

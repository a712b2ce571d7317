//! Forward-declaration text.

use std::fmt::{self, Write};

use crate::synth::Declarations;

/// Makes the Arduino core API visible to everything that follows.
pub const ENVIRONMENT_LINE: &str = "#include <Arduino.h>";
/// Logical file name used for the prelude of a whole sketch.
pub const COMPOSITE_IDENTITY: &str = "<arduino source>";

/// Write the prelude: environment line, a `#line` reset naming `identity`,
/// then a `#line` marker and a `;`-terminated prototype for every
/// signature with a definition. Signatures without one are skipped.
pub fn emit_prototypes<W: Write>(
    out: &mut W,
    identity: &str,
    declarations: &Declarations,
) -> fmt::Result {
    writeln!(out, "{ENVIRONMENT_LINE}")?;
    write_line_marker(out, 1, identity)?;
    for (signature, location) in declarations.defined() {
        write_line_marker(out, location.line, &location.file)?;
        writeln!(out, "{signature};")?;
    }
    Ok(())
}

/// Append the composite unit after a fresh position reset.
pub fn emit_composite_dump<W: Write>(
    out: &mut W,
    contents: &str,
) -> fmt::Result {
    write_line_marker(out, 1, COMPOSITE_IDENTITY)?;
    out.write_str(contents)
}

fn write_line_marker<W: Write>(
    out: &mut W,
    line: u32,
    file: &str,
) -> fmt::Result {
    writeln!(out, "#line {line} \"{}\"", escape_file_name(file))
}

/// `#line` file names are string literals: backslashes and quotes need
/// escaping.
fn escape_file_name(file: &str) -> std::borrow::Cow<'_, str> {
    if file.contains(['\\', '"']) {
        file.replace('\\', "\\\\").replace('"', "\\\"").into()
    } else {
        file.into()
    }
}

#[cfg(test)]
#[path = "../tests/src/emit_tests.rs"]
mod tests;

//! Parser front end: the cursor contract the synthesis engine walks, and the
//! Clang-backed implementation of it.
//!
//! The engine never sees Clang directly. It only needs a [`Cursor`] that can
//! report its kind, its presumed location, a terse signature for
//! function-like nodes, and its children; [`visit_children`] drives a
//! [`Visitor`] over any such tree in pre-order.

mod clang_nodes;
mod compiler;
mod cursor;
mod diagnostics;
mod signature;

use std::fmt;

pub use clang_nodes::{Clang, Node};
pub use compiler::{ClangFrontEnd, ParsedUnit, TranslationUnit};
pub use cursor::ClangCursor;
pub use diagnostics::{ClangDiagnostic, Severity, parse_diagnostics};

/// Node kinds the synthesis engine distinguishes.
///
/// Every declaration that is not a function, a template or a parameter
/// collapses into [`CursorKind::OtherDecl`]; everything else (statements,
/// expressions, attributes, comments) is [`CursorKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    FunctionDecl,
    FunctionTemplate,
    CompoundStmt,
    ParmDecl,
    TemplateTypeParameter,
    NonTypeTemplateParameter,
    TemplateTemplateParameter,
    OtherDecl,
    Other,
}

impl CursorKind {
    pub fn is_declaration(self) -> bool {
        !matches!(self, Self::CompoundStmt | Self::Other)
    }

    /// Parameters of the function or template currently being declared.
    pub fn is_parameter(self) -> bool {
        matches!(
            self,
            Self::ParmDecl
                | Self::TemplateTypeParameter
                | Self::NonTypeTemplateParameter
                | Self::TemplateTemplateParameter
        )
    }

    pub fn is_function_like(self) -> bool {
        matches!(self, Self::FunctionDecl | Self::FunctionTemplate)
    }
}

/// A presumed source position: the logical file and 1-based line after
/// `#line` markers have been applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl Location {
    pub fn new(
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A node handle in a parsed AST.
pub trait Cursor: Sized {
    fn kind(&self) -> CursorKind;

    fn location(&self) -> Option<Location>;

    /// Terse signature of a function-like node; `None` for everything else.
    fn signature(&self) -> Option<String>;

    fn children(&self) -> Vec<Self>;
}

/// What the traversal does after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildVisit {
    /// Skip the node's subtree and move on to its next sibling.
    Continue,
    /// Descend into the node's children.
    Recurse,
}

pub trait Visitor<C: Cursor> {
    fn visit(
        &mut self,
        cursor: &C,
    ) -> ChildVisit;
}

impl<C, F> Visitor<C> for F
where
    C: Cursor,
    F: FnMut(&C) -> ChildVisit,
{
    fn visit(
        &mut self,
        cursor: &C,
    ) -> ChildVisit {
        self(cursor)
    }
}

/// Visit every descendant of `parent` in pre-order, descending only where
/// the visitor asks to. `parent` itself is not visited.
pub fn visit_children<C, V>(
    parent: &C,
    visitor: &mut V,
) where
    C: Cursor,
    V: Visitor<C> + ?Sized,
{
    for child in parent.children() {
        if visitor.visit(&child) == ChildVisit::Recurse {
            visit_children(&child, visitor);
        }
    }
}

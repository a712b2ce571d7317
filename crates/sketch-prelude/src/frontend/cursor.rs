use super::{
    Cursor, CursorKind, Location,
    clang_nodes::{Clang, Node, presumed_location},
    signature::{function_signature, template_header},
};

/// [`Cursor`] over a deserialized Clang JSON AST.
///
/// The JSON dump nests a template's function under the
/// `FunctionTemplateDecl` and lists implicit instantiations beside it. This
/// adapter presents a template as one cursor whose children are its template
/// parameters followed by the templated function's own children, and hides
/// implicit nodes, so the tree has the same shape libclang's cursors have.
#[derive(Clone, Copy)]
pub struct ClangCursor<'a> {
    node: &'a Node,
}

impl<'a> ClangCursor<'a> {
    pub fn new(node: &'a Node) -> Self {
        Self {
            node,
        }
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// The `FunctionDecl` a template declares; later `FunctionDecl` siblings
    /// are its instantiations.
    fn templated_function(&self) -> Option<&'a Node> {
        self.node.inner.iter().find(|child| matches!(child.kind, Clang::FunctionDecl(_)))
    }

    fn visible(nodes: impl IntoIterator<Item = &'a Node>) -> impl Iterator<Item = ClangCursor<'a>> {
        nodes.into_iter().filter(|n| !n.kind.is_implicit()).map(ClangCursor::new)
    }
}

impl<'a> Cursor for ClangCursor<'a> {
    fn kind(&self) -> CursorKind {
        match &self.node.kind {
            Clang::FunctionDecl(_) => CursorKind::FunctionDecl,
            Clang::FunctionTemplateDecl(_) => CursorKind::FunctionTemplate,
            Clang::CompoundStmt {
                ..
            } => CursorKind::CompoundStmt,
            Clang::ParmVarDecl(_) => CursorKind::ParmDecl,
            Clang::TemplateTypeParmDecl(_) => CursorKind::TemplateTypeParameter,
            Clang::NonTypeTemplateParmDecl(_) => CursorKind::NonTypeTemplateParameter,
            Clang::TemplateTemplateParmDecl(_) => CursorKind::TemplateTemplateParameter,
            Clang::Other {
                ..
            } => CursorKind::Other,
            _ => CursorKind::OtherDecl,
        }
    }

    fn location(&self) -> Option<Location> {
        self.node.kind.loc().and_then(presumed_location)
    }

    fn signature(&self) -> Option<String> {
        match &self.node.kind {
            Clang::FunctionDecl(data) => function_signature(data, &self.node.inner),
            Clang::FunctionTemplateDecl(_) => {
                let function = self.templated_function()?;
                let Clang::FunctionDecl(data) = &function.kind else {
                    return None;
                };
                let header = template_header(&self.node.inner);
                let body = function_signature(data, &function.inner)?;
                Some(header + &body)
            },
            _ => None,
        }
    }

    fn children(&self) -> Vec<Self> {
        match &self.node.kind {
            Clang::FunctionTemplateDecl(_) => {
                let params = self.node.inner.iter().filter(|child| {
                    matches!(
                        child.kind,
                        Clang::TemplateTypeParmDecl(_)
                            | Clang::NonTypeTemplateParmDecl(_)
                            | Clang::TemplateTemplateParmDecl(_)
                    )
                });
                let mut children: Vec<Self> = Self::visible(params).collect();
                if let Some(function) = self.templated_function() {
                    children.extend(Self::visible(&function.inner));
                }
                children
            },
            _ => Self::visible(&self.node.inner).collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/frontend/cursor_tests.rs"]
mod tests;

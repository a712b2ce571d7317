//! Terse signature rendering for function-like nodes.
//!
//! The JSON dump has no pretty-printer, so the declaration text is rebuilt
//! from the pieces Clang does report: the function's `qualType`, its
//! storage/inline flags, and the names and types of its parameters. The
//! output follows Clang's terse declaration printing closely enough to be a
//! stable deduplication key and a valid forward declaration.

use super::clang_nodes::{Clang, FunctionData, Node, ParamData, TemplateTypeParamData};

/// Render `[static ][inline ][constexpr ]<ret> <name>(<params>)[ <suffix>]`.
pub(crate) fn function_signature<'a>(
    data: &FunctionData,
    children: impl IntoIterator<Item = &'a Node>,
) -> Option<String> {
    let name = data.name.as_deref().filter(|n| !n.is_empty())?;
    let (ret, suffix) = split_function_type(data.qual_type()?)?;

    let mut params: Vec<String> = children
        .into_iter()
        .filter_map(|child| match &child.kind {
            Clang::ParmVarDecl(p) => Some(render_param(p)),
            _ => None,
        })
        .collect();
    if data.variadic {
        params.push("...".to_owned());
    }

    let mut out = String::new();
    if let Some(storage) = data.storage_class.as_deref() {
        out.push_str(storage);
        out.push(' ');
    }
    if data.inline {
        out.push_str("inline ");
    }
    if data.constexpr {
        out.push_str("constexpr ");
    }
    out.push_str(&join_declarator(ret, name));
    out.push('(');
    out.push_str(&params.join(", "));
    out.push(')');
    if suffix.starts_with(')') {
        out.push_str(suffix);
    } else if !suffix.is_empty() {
        out.push(' ');
        out.push_str(suffix);
    }
    Some(out)
}

/// Render the `template <...> ` header for a function template's parameters.
pub(crate) fn template_header<'a>(params: impl IntoIterator<Item = &'a Node>) -> String {
    let rendered: Vec<String> = params.into_iter().filter_map(render_template_param).collect();
    format!("template <{}> ", rendered.join(", "))
}

fn render_template_param(node: &Node) -> Option<String> {
    match &node.kind {
        Clang::TemplateTypeParmDecl(p) => Some(render_type_template_param(p)),
        Clang::NonTypeTemplateParmDecl(p) => Some(render_param(p)),
        Clang::TemplateTemplateParmDecl(d) => {
            let header = template_header(&node.inner);
            Some(match d.name.as_deref().filter(|n| !n.is_empty()) {
                Some(name) => format!("{header}class {name}"),
                None => format!("{header}class"),
            })
        },
        _ => None,
    }
}

fn render_type_template_param(p: &TemplateTypeParamData) -> String {
    let mut out = p.tag_used.clone().unwrap_or_else(|| "typename".to_owned());
    if p.is_parameter_pack {
        out.push_str(" ...");
    }
    if let Some(name) = p.name.as_deref().filter(|n| !n.is_empty()) {
        if !p.is_parameter_pack {
            out.push(' ');
        }
        out.push_str(name);
    }
    out
}

fn render_param(p: &ParamData) -> String {
    let ty = p.qual_type().unwrap_or("int");
    match p.name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) if p.is_parameter_pack && ty.ends_with("...") => {
            format!("{} ...{name}", ty.trim_end_matches("...").trim_end())
        },
        Some(name) => join_declarator(ty, name),
        None => ty.to_owned(),
    }
}

/// Attach a declarator name to a type, the way C declarations spell it.
///
/// `int` + `x` -> `int x`, `char *` + `s` -> `char *s`, and
/// `void (*)(int)` + `cb` -> `void (*cb)(int)`.
pub(crate) fn join_declarator(
    ty: &str,
    name: &str,
) -> String {
    if let Some(split) = abstract_declarator(ty) {
        return format!("{}{name}{}", &ty[..split], &ty[split..]);
    }
    let ty = ty.trim_end();
    if ty.ends_with(['*', '&', '(']) {
        format!("{ty}{name}")
    } else {
        format!("{ty} {name}")
    }
}

/// Position where a name goes inside `(*)`, `(&)` or `(&&)`, ignoring any
/// that appear inside template arguments.
fn abstract_declarator(ty: &str) -> Option<usize> {
    let mut angle = 0usize;
    for (i, ch) in ty.char_indices() {
        match ch {
            '<' => angle += 1,
            '>' => angle = angle.saturating_sub(1),
            '(' if angle == 0 => {
                let rest = &ty[i..];
                if let Some(marker) = ["(*)", "(&)", "(&&)"].into_iter().find(|m| rest.starts_with(m)) {
                    return Some(i + marker.len() - 1);
                }
            },
            _ => {},
        }
    }
    None
}

/// Split a function `qualType` around its own parameter list.
///
/// The first part is everything the name goes after, the second whatever
/// follows the parameter list (`noexcept`, `-> T`, or the rest of a
/// declarator when the return type is a function pointer).
///
/// `"int *(int, char)"` -> `("int *", "")`,
/// `"void () noexcept"` -> `("void", "noexcept")`,
/// `"void (*(int))(char)"` -> `("void (*", ")(char)")`.
pub(crate) fn split_function_type(qual_type: &str) -> Option<(&str, &str)> {
    let (open, close) = parameter_list(qual_type, 0)?;
    let before = qual_type[..open].trim_end();
    if before.is_empty() {
        return None;
    }
    Some((before, qual_type[close + 1..].trim()))
}

/// Byte offsets (relative to `base`) of the parentheses enclosing a function
/// type's own parameters.
///
/// A group opening with a pointer or reference declarator is the return
/// type's declarator; the function's parameters sit inside it.
fn parameter_list(
    text: &str,
    base: usize,
) -> Option<(usize, usize)> {
    let (open, close) = next_group(text)?;
    let inner = &text[open + 1..close];
    if inner.trim_start().starts_with(['*', '&', '^'])
        && let Some(nested) = parameter_list(inner, base + open + 1)
    {
        return Some(nested);
    }
    Some((base + open, base + close))
}

/// The first parenthesized group outside template arguments that is not the
/// operand of a keyword such as `decltype(...)`.
fn next_group(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut angle = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => angle += 1,
            b'>' => angle = angle.saturating_sub(1),
            b'(' if angle == 0 => {
                let close = matching_paren(text, i)?;
                let keyword_operand = i > 0 && (bytes[i - 1].is_ascii_alphanumeric() || bytes[i - 1] == b'_');
                if !keyword_operand {
                    return Some((i, close));
                }
                i = close;
            },
            _ => {},
        }
        i += 1;
    }
    None
}

fn matching_paren(
    text: &str,
    open: usize,
) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in text[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            },
            _ => {},
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/src/frontend/signature_tests.rs"]
mod tests;

use clang_ast::{BareSourceLocation, SourceLocation, SourceRange};
use serde::Deserialize;

use super::Location;

pub type Node = clang_ast::Node<Clang>;

/// Typed representation of the Clang AST node kinds the prelude cares about.
///
/// Each variant corresponds to a Clang AST node `"kind"` value. Declarations
/// that only matter as "some other declaration" share [`DeclData`].
#[derive(Deserialize)]
pub enum Clang {
    // --- Function-like ---
    FunctionDecl(FunctionData),
    FunctionTemplateDecl(DeclData),

    // --- Parameters ---
    ParmVarDecl(ParamData),
    TemplateTypeParmDecl(TemplateTypeParamData),
    NonTypeTemplateParmDecl(ParamData),
    TemplateTemplateParmDecl(DeclData),

    // --- Bodies ---
    CompoundStmt {
        #[serde(default)]
        range: Option<SourceRange>,
    },

    // --- Other declarations ---
    AccessSpecDecl(DeclData),
    BindingDecl(DeclData),
    CXXConstructorDecl(DeclData),
    CXXConversionDecl(DeclData),
    CXXDestructorDecl(DeclData),
    CXXMethodDecl(DeclData),
    CXXRecordDecl(DeclData),
    ClassTemplateDecl(DeclData),
    ClassTemplatePartialSpecializationDecl(DeclData),
    ClassTemplateSpecializationDecl(DeclData),
    CXXDeductionGuideDecl(DeclData),
    ConceptDecl(DeclData),
    DecompositionDecl(DeclData),
    EmptyDecl(DeclData),
    EnumConstantDecl(DeclData),
    EnumDecl(DeclData),
    ExportDecl(DeclData),
    FieldDecl(DeclData),
    FileScopeAsmDecl(DeclData),
    FriendDecl(DeclData),
    ImportDecl(DeclData),
    IndirectFieldDecl(DeclData),
    LinkageSpecDecl(DeclData),
    NamespaceAliasDecl(DeclData),
    NamespaceDecl(DeclData),
    PragmaCommentDecl(DeclData),
    PragmaDetectMismatchDecl(DeclData),
    RecordDecl(DeclData),
    StaticAssertDecl(DeclData),
    TopLevelStmtDecl(DeclData),
    TypeAliasDecl(DeclData),
    TypeAliasTemplateDecl(DeclData),
    TypedefDecl(DeclData),
    UnresolvedUsingTypenameDecl(DeclData),
    UnresolvedUsingValueDecl(DeclData),
    UsingDecl(DeclData),
    UsingDirectiveDecl(DeclData),
    UsingEnumDecl(DeclData),
    UsingShadowDecl(DeclData),
    VarDecl(DeclData),
    VarTemplateDecl(DeclData),
    VarTemplatePartialSpecializationDecl(DeclData),
    VarTemplateSpecializationDecl(DeclData),

    // --- Catch-all ---
    // `loc` and `range` MUST be deserialized even for unrecognized kinds:
    // `clang-ast` tracks the current file across the stream, and a skipped
    // location would leave every later node with a stale or empty file.
    #[allow(dead_code)]
    Other {
        #[serde(default)]
        loc: Option<SourceLocation>,
        #[serde(default)]
        range: Option<SourceRange>,
    },
}

/// Common data for declaration nodes.
#[derive(Deserialize, Debug)]
pub struct DeclData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    #[serde(rename = "isImplicit")]
    pub is_implicit: Option<bool>,
}

/// `FunctionDecl` data.
///
/// `ty` carries Clang's `type.qualType`, e.g. `"int (int, char *)"`; the
/// return type and trailing qualifiers of the signature are taken from it.
#[derive(Deserialize, Debug)]
pub struct FunctionData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    #[serde(rename = "isImplicit")]
    pub is_implicit: Option<bool>,
    #[serde(rename = "type")]
    pub ty: Option<QualType>,
    #[serde(rename = "storageClass")]
    pub storage_class: Option<String>,
    #[serde(default)]
    pub inline: bool,
    #[serde(default)]
    pub constexpr: bool,
    #[serde(default)]
    pub variadic: bool,
}

/// `ParmVarDecl` and `NonTypeTemplateParmDecl` data.
#[derive(Deserialize, Debug)]
pub struct ParamData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    #[serde(rename = "isImplicit")]
    pub is_implicit: Option<bool>,
    #[serde(rename = "type")]
    pub ty: Option<QualType>,
    #[serde(rename = "isParameterPack", default)]
    pub is_parameter_pack: bool,
}

/// `TemplateTypeParmDecl` data.
#[derive(Deserialize, Debug)]
pub struct TemplateTypeParamData {
    pub name: Option<String>,
    pub loc: Option<SourceLocation>,
    pub range: Option<SourceRange>,
    #[serde(rename = "isImplicit")]
    pub is_implicit: Option<bool>,
    #[serde(rename = "tagUsed")]
    pub tag_used: Option<String>,
    #[serde(rename = "isParameterPack", default)]
    pub is_parameter_pack: bool,
}

/// Clang's qualified type representation.
#[derive(Deserialize, Debug)]
pub struct QualType {
    #[serde(rename = "qualType")]
    pub qual_type: Option<String>,
}

impl FunctionData {
    pub fn qual_type(&self) -> Option<&str> {
        self.ty.as_ref().and_then(|t| t.qual_type.as_deref())
    }
}

impl ParamData {
    pub fn qual_type(&self) -> Option<&str> {
        self.ty.as_ref().and_then(|t| t.qual_type.as_deref())
    }
}

impl Clang {
    pub fn is_implicit(&self) -> bool {
        let flag = match self {
            Self::FunctionDecl(d) => d.is_implicit,
            Self::ParmVarDecl(d) | Self::NonTypeTemplateParmDecl(d) => d.is_implicit,
            Self::TemplateTypeParmDecl(d) => d.is_implicit,
            Self::CompoundStmt {
                ..
            }
            | Self::Other {
                ..
            } => None,
            other => other.decl_data().and_then(|d| d.is_implicit),
        };
        flag.unwrap_or(false)
    }

    /// The shared payload of the "other declaration" variants.
    fn decl_data(&self) -> Option<&DeclData> {
        match self {
            Self::FunctionTemplateDecl(d)
            | Self::TemplateTemplateParmDecl(d)
            | Self::AccessSpecDecl(d)
            | Self::BindingDecl(d)
            | Self::CXXConstructorDecl(d)
            | Self::CXXConversionDecl(d)
            | Self::CXXDestructorDecl(d)
            | Self::CXXMethodDecl(d)
            | Self::CXXRecordDecl(d)
            | Self::ClassTemplateDecl(d)
            | Self::ClassTemplatePartialSpecializationDecl(d)
            | Self::ClassTemplateSpecializationDecl(d)
            | Self::CXXDeductionGuideDecl(d)
            | Self::ConceptDecl(d)
            | Self::DecompositionDecl(d)
            | Self::EmptyDecl(d)
            | Self::EnumConstantDecl(d)
            | Self::EnumDecl(d)
            | Self::ExportDecl(d)
            | Self::FieldDecl(d)
            | Self::FileScopeAsmDecl(d)
            | Self::FriendDecl(d)
            | Self::ImportDecl(d)
            | Self::IndirectFieldDecl(d)
            | Self::LinkageSpecDecl(d)
            | Self::NamespaceAliasDecl(d)
            | Self::NamespaceDecl(d)
            | Self::PragmaCommentDecl(d)
            | Self::PragmaDetectMismatchDecl(d)
            | Self::RecordDecl(d)
            | Self::StaticAssertDecl(d)
            | Self::TopLevelStmtDecl(d)
            | Self::TypeAliasDecl(d)
            | Self::TypeAliasTemplateDecl(d)
            | Self::TypedefDecl(d)
            | Self::UnresolvedUsingTypenameDecl(d)
            | Self::UnresolvedUsingValueDecl(d)
            | Self::UsingDecl(d)
            | Self::UsingDirectiveDecl(d)
            | Self::UsingEnumDecl(d)
            | Self::UsingShadowDecl(d)
            | Self::VarDecl(d)
            | Self::VarTemplateDecl(d)
            | Self::VarTemplatePartialSpecializationDecl(d)
            | Self::VarTemplateSpecializationDecl(d) => Some(d),
            _ => None,
        }
    }

    pub fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Self::FunctionDecl(d) => d.loc.as_ref(),
            Self::ParmVarDecl(d) | Self::NonTypeTemplateParmDecl(d) => d.loc.as_ref(),
            Self::TemplateTypeParmDecl(d) => d.loc.as_ref(),
            Self::CompoundStmt {
                range,
            } => range.as_ref().map(|r| &r.begin),
            Self::Other {
                loc,
                ..
            } => loc.as_ref(),
            other => other.decl_data().and_then(|d| d.loc.as_ref()),
        }
    }
}

/// Extract the best concrete source location from a [`SourceLocation`].
///
/// Prefers the expansion location (where a macro was invoked, the position
/// the user sees in their source file) over the spelling location.
pub fn resolve_loc(loc: &SourceLocation) -> Option<&BareSourceLocation> {
    loc.expansion_loc.as_ref().or(loc.spelling_loc.as_ref())
}

/// Resolve a location through any `#line` markers.
///
/// Returns `None` for locations Clang could not attribute to a file.
pub fn presumed_location(loc: &SourceLocation) -> Option<Location> {
    let bare = resolve_loc(loc)?;
    let file = bare.presumed_file.as_deref().unwrap_or(&*bare.file);
    let line = bare.presumed_line.unwrap_or(bare.line);
    if file.is_empty() || line == 0 {
        return None;
    }
    Some(Location::new(file, line as u32))
}

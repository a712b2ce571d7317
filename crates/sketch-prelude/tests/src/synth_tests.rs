use super::*;

/// In-memory cursor tree standing in for a parsed translation unit.
#[derive(Debug, Clone)]
struct Fake {
    kind: CursorKind,
    signature: Option<String>,
    location: Option<Location>,
    children: Vec<Fake>,
}

impl Cursor for Fake {
    fn kind(&self) -> CursorKind {
        self.kind
    }

    fn location(&self) -> Option<Location> {
        self.location.clone()
    }

    fn signature(&self) -> Option<String> {
        self.signature.clone()
    }

    fn children(&self) -> Vec<Self> {
        self.children.clone()
    }
}

fn node(
    kind: CursorKind,
    children: Vec<Fake>,
) -> Fake {
    Fake {
        kind,
        signature: None,
        location: None,
        children,
    }
}

fn tu(children: Vec<Fake>) -> Fake {
    node(CursorKind::OtherDecl, children)
}

fn function(
    signature: &str,
    file: &str,
    line: u32,
    children: Vec<Fake>,
) -> Fake {
    Fake {
        kind: CursorKind::FunctionDecl,
        signature: Some(signature.to_owned()),
        location: Some(Location::new(file, line)),
        children,
    }
}

fn template(
    signature: &str,
    file: &str,
    line: u32,
    children: Vec<Fake>,
) -> Fake {
    Fake {
        kind: CursorKind::FunctionTemplate,
        ..function(signature, file, line, children)
    }
}

fn body() -> Fake {
    node(CursorKind::CompoundStmt, vec![])
}

fn param() -> Fake {
    node(CursorKind::ParmDecl, vec![])
}

fn var() -> Fake {
    node(CursorKind::OtherDecl, vec![])
}

fn defined_at<'a>(
    decls: &'a Declarations,
    signature: &str,
) -> Option<&'a Location> {
    decls.get(signature).and_then(Option::as_ref)
}

#[test]
fn prototype_without_body_is_not_defined() {
    let root = tu(vec![
        function("void setup()", "/s/a.ino", 1, vec![]),
        function("void loop()", "/s/a.ino", 1, vec![body()]),
    ]);

    let decls = synthesize(&root, None);

    assert_eq!(decls.get("void setup()"), Some(&None));
    assert_eq!(defined_at(&decls, "void loop()"), Some(&Location::new("/s/a.ino", 1)));
    assert_eq!(decls.defined().count(), 1);
}

#[test]
fn definitions_across_files_keep_their_own_locations() {
    let filter = FileFilter::new(["/s/a.ino".to_owned(), "/s/b.ino".to_owned()]);
    let root = tu(vec![
        function("void foo()", "/s/a.ino", 1, vec![body()]),
        function("void bar()", "/s/b.ino", 3, vec![body()]),
    ]);

    let decls = synthesize(&root, Some(&filter));

    assert_eq!(defined_at(&decls, "void foo()"), Some(&Location::new("/s/a.ino", 1)));
    assert_eq!(defined_at(&decls, "void bar()"), Some(&Location::new("/s/b.ino", 3)));
}

#[test]
fn bodies_outside_the_filter_are_not_recorded() {
    let filter = FileFilter::new(["/s/a.ino".to_owned()]);
    let root = tu(vec![function("int helper(int x)", "/usr/include/helper.h", 10, vec![param(), body()])]);

    let decls = synthesize(&root, Some(&filter));

    assert_eq!(decls.get("int helper(int x)"), None);
    assert_eq!(decls.defined().count(), 0);
}

#[test]
fn parameters_do_not_resolve_the_pending_candidate() {
    let root = tu(vec![function("int add(int a, int b)", "/s/a.ino", 4, vec![param(), param(), body()])]);

    let decls = synthesize(&root, None);

    assert_eq!(defined_at(&decls, "int add(int a, int b)"), Some(&Location::new("/s/a.ino", 4)));
}

#[test]
fn templates_are_tracked_like_functions() {
    let signature = "template <typename T> T twice(T v)";
    let root = tu(vec![template(
        signature,
        "/s/a.ino",
        7,
        vec![node(CursorKind::TemplateTypeParameter, vec![]), param(), body()],
    )]);

    let decls = synthesize(&root, None);

    assert_eq!(defined_at(&decls, signature), Some(&Location::new("/s/a.ino", 7)));
}

#[test]
fn non_declaration_nodes_leave_the_candidate_pending() {
    let root = tu(vec![function("void tick()", "/s/a.ino", 2, vec![node(CursorKind::Other, vec![]), body()])]);

    let decls = synthesize(&root, None);

    assert!(defined_at(&decls, "void tick()").is_some());
}

#[test]
fn first_definition_wins() {
    let root = tu(vec![
        function("void blink()", "/s/a.ino", 1, vec![body()]),
        function("void blink()", "/s/b.ino", 9, vec![body()]),
    ]);

    let decls = synthesize(&root, None);

    assert_eq!(defined_at(&decls, "void blink()"), Some(&Location::new("/s/a.ino", 1)));
}

// Reproduces the reference behaviour: a bodiless redeclaration after the
// definition erases it.
#[test]
fn bodiless_redeclaration_erases_earlier_definition() {
    let root = tu(vec![
        function("void blink()", "/s/a.ino", 1, vec![body()]),
        function("void blink()", "/s/a.ino", 5, vec![]),
        var(),
    ]);

    let decls = synthesize(&root, None);

    assert_eq!(decls.get("void blink()"), Some(&None));
}

#[test]
fn prototype_seen_first_is_never_rearmed() {
    let root = tu(vec![
        function("void blink()", "/s/a.ino", 1, vec![]),
        var(),
        function("void blink()", "/s/a.ino", 3, vec![body()]),
    ]);

    let decls = synthesize(&root, None);

    assert_eq!(decls.get("void blink()"), Some(&None));
}

#[test]
fn nested_declarations_are_not_descended_into() {
    let class = node(CursorKind::OtherDecl, vec![function("void method()", "/s/a.ino", 2, vec![body()])]);
    let root = tu(vec![class]);

    let decls = synthesize(&root, None);

    assert!(decls.is_empty());
}

#[test]
fn candidate_pending_at_end_of_traversal_is_dropped() {
    let root = tu(vec![function("void last()", "/s/a.ino", 12, vec![param()])]);

    let decls = synthesize(&root, None);

    assert_eq!(decls.get("void last()"), None);
}

#[test]
fn body_without_location_records_nothing() {
    let mut f = function("void lost()", "", 0, vec![body()]);
    f.location = None;
    let root = tu(vec![f]);

    let decls = synthesize(&root, None);

    assert_eq!(decls.get("void lost()"), None);
}

#[test]
fn function_without_signature_is_skipped() {
    let mut unnamed = function("", "/s/a.ino", 3, vec![param(), body()]);
    unnamed.signature = None;
    let root = tu(vec![unnamed, function("void after()", "/s/a.ino", 6, vec![body()])]);

    let decls = synthesize(&root, None);

    assert_eq!(decls.len(), 1);
    assert_eq!(defined_at(&decls, "void after()"), Some(&Location::new("/s/a.ino", 6)));
}

#[test]
fn rerunning_yields_the_same_records() {
    let root = tu(vec![
        function("void setup()", "/s/a.ino", 1, vec![body()]),
        function("void loop()", "/s/a.ino", 4, vec![]),
        function("int read(int pin)", "/s/b.ino", 2, vec![param(), body()]),
    ]);

    assert_eq!(synthesize(&root, None), synthesize(&root, None));
}

#[test]
fn visit_children_accepts_closures_and_skips_the_root() {
    let root = tu(vec![function("void a()", "/s/a.ino", 1, vec![param(), body()]), var()]);
    let mut seen = Vec::new();

    visit_children(&root, &mut |c: &Fake| {
        seen.push(c.kind());
        ChildVisit::Recurse
    });

    assert_eq!(
        seen,
        vec![
            CursorKind::FunctionDecl,
            CursorKind::ParmDecl,
            CursorKind::CompoundStmt,
            CursorKind::OtherDecl,
        ]
    );
}

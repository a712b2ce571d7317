use super::*;
use std::fs;

fn sketch_dir(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    for file in files {
        fs::write(dir.path().join(file), "void f() {}\n").expect("write sketch file");
    }
    dir
}

fn abs(
    dir: &tempfile::TempDir,
    name: &str,
) -> String {
    std::path::absolute(dir.path().join(name)).unwrap().to_string_lossy().into_owned()
}

#[test]
fn directory_collects_recognized_files_sorted() {
    let dir = sketch_dir(&["b.ino", "a.ino", "c.pde", "notes.txt", "helper.h"]);

    let sketch = Sketch::discover(dir.path(), &SketchSettings::default()).unwrap();

    assert_eq!(sketch.files().files(), [abs(&dir, "a.ino"), abs(&dir, "b.ino"), abs(&dir, "c.pde")]);
}

#[test]
fn sketch_file_stands_for_its_directory() {
    let dir = sketch_dir(&["main.ino", "extra.ino"]);

    let sketch = Sketch::discover(&dir.path().join("main.ino"), &SketchSettings::default()).unwrap();

    assert_eq!(sketch.files().len(), 2);
    assert_eq!(sketch.dir(), std::path::absolute(dir.path()).unwrap());
}

#[test]
fn subdirectories_are_not_scanned() {
    let dir = sketch_dir(&["main.ino"]);
    fs::create_dir(dir.path().join("nested.ino")).unwrap();
    fs::create_dir(dir.path().join("lib")).unwrap();
    fs::write(dir.path().join("lib/other.ino"), "").unwrap();

    let sketch = Sketch::discover(dir.path(), &SketchSettings::default()).unwrap();

    assert_eq!(sketch.files().files(), [abs(&dir, "main.ino")]);
}

#[test]
fn extensions_match_case_insensitively() {
    let dir = sketch_dir(&["Main.INO"]);

    let sketch = Sketch::discover(dir.path(), &SketchSettings::default()).unwrap();

    assert_eq!(sketch.files().len(), 1);
}

#[test]
fn missing_path_is_rejected() {
    let dir = sketch_dir(&[]);
    let missing = dir.path().join("gone.ino");

    let err = Sketch::discover(&missing, &SketchSettings::default()).unwrap_err();

    assert!(matches!(err, PreludeError::MissingInput(p) if p == missing));
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = sketch_dir(&["main.ino", "main.cpp"]);

    let err = Sketch::discover(&dir.path().join("main.cpp"), &SketchSettings::default()).unwrap_err();

    assert!(matches!(err, PreludeError::UnknownFormat { extension } if extension == "cpp"));
}

#[test]
fn directory_without_sketch_files_is_rejected() {
    let dir = sketch_dir(&["README.md"]);

    let err = Sketch::discover(dir.path(), &SketchSettings::default()).unwrap_err();

    assert!(matches!(err, PreludeError::EmptySketch(_)));
}

#[test]
fn configured_extensions_replace_defaults() {
    let dir = sketch_dir(&["main.ino", "main.cxx"]);
    let settings = SketchSettings {
        extensions: vec!["cxx".to_owned()],
    };

    let sketch = Sketch::discover(dir.path(), &settings).unwrap();

    assert_eq!(sketch.files().files(), [abs(&dir, "main.cxx")]);
}

#[test]
fn composite_source_includes_every_file_in_order() {
    let dir = sketch_dir(&["b.ino", "a.ino"]);
    let sketch = Sketch::discover(dir.path(), &SketchSettings::default()).unwrap();

    let composite = sketch.composite_source();

    assert_eq!(
        composite,
        format!("#include \"{}\"\n#include \"{}\"\n", abs(&dir, "a.ino"), abs(&dir, "b.ino"))
    );
}

#[test]
fn file_filter_membership_is_exact() {
    let filter = FileFilter::new(["/s/b.ino".to_owned(), "/s/a.ino".to_owned(), "/s/a.ino".to_owned()]);

    assert_eq!(filter.len(), 2);
    assert!(filter.contains("/s/a.ino"));
    assert!(filter.contains("/s/b.ino"));
    assert!(!filter.contains("/s/a.in"));
    assert!(!filter.contains("/usr/include/Arduino.h"));
}

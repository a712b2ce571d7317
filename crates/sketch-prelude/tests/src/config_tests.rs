use super::*;

#[test]
fn defaults_match_the_arduino_toolchain() {
    let settings = PreludeSettings::default();

    assert_eq!(settings.frontend.clang, DEFAULT_CLANG);
    assert_eq!(settings.frontend.language, "c++");
    assert_eq!(settings.frontend.std, "gnu++20");
    assert_eq!(settings.sketch.extensions, ["ino", "pde"]);
    assert!(!settings.diagnostics.strict);
    assert_eq!(settings.logging.level, LogLevel::Warn);
}

#[test]
fn toml_patches_only_what_it_names() {
    let settings = PreludeSettings::from_toml_str(
        r#"
        [frontend]
        std = "gnu++17"
        extra-flags = ["-DARDUINO=10819", "  ", "-I/opt/cores/avr "]

        [diagnostics]
        strict = true
        "#,
    )
    .unwrap();

    assert_eq!(settings.frontend.clang, DEFAULT_CLANG);
    assert_eq!(settings.frontend.std, "gnu++17");
    assert_eq!(settings.frontend.extra_flags, ["-DARDUINO=10819", "-I/opt/cores/avr"]);
    assert!(settings.diagnostics.strict);
    assert_eq!(settings.sketch, SketchSettings::default());
}

#[test]
fn extensions_are_normalized() {
    let settings = PreludeSettings::from_toml_str(
        r#"
        [sketch]
        extensions = [".INO", "cpp", "", "ino"]
        "#,
    )
    .unwrap();

    assert_eq!(settings.sketch.extensions, ["cpp", "ino"]);
}

#[test]
fn unknown_keys_are_ignored() {
    let settings = PreludeSettings::from_toml_str(
        r#"
        editor = "vim"
        [logging]
        level = "debug"
        colour = true
        "#,
    )
    .unwrap();

    assert_eq!(settings.logging.level, LogLevel::Debug);
}

#[test]
fn malformed_toml_is_an_error() {
    assert!(PreludeSettings::from_toml_str("[frontend\nclang = ").is_err());
    assert!(PreludeSettings::from_toml_str("[logging]\nlevel = \"loud\"").is_err());
}

#[test]
fn environment_overrides_clang() {
    let mut settings = PreludeSettings::default();

    settings.apply_env(|key| (key == CLANG_ENV).then(|| "/opt/llvm/bin/clang".to_owned()));

    assert_eq!(settings.frontend.clang, "/opt/llvm/bin/clang");
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let mut settings = PreludeSettings::default();
    settings.apply_env(|_| Some("   ".to_owned()));

    assert_eq!(settings.frontend.clang, DEFAULT_CLANG);
}

#[test]
fn implicit_config_is_read_from_the_sketch_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("main.ino"), "").unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[diagnostics]\nstrict = true\n").unwrap();

    let from_dir = PreludeSettings::load(None, dir.path()).unwrap();
    let from_file = PreludeSettings::load(None, &dir.path().join("main.ino")).unwrap();

    assert!(from_dir.diagnostics.strict);
    assert!(from_file.diagnostics.strict);
}

#[test]
fn explicit_config_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = PreludeSettings::load(Some(&missing), dir.path()).unwrap_err();

    assert!(matches!(err, PreludeError::Io { path, .. } if path == missing));
}

#[test]
fn invalid_config_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[sketch]\nextensions = 3\n").unwrap();

    let err = PreludeSettings::load(None, dir.path()).unwrap_err();

    assert!(matches!(err, PreludeError::Config { path: p, .. } if p == path));
}

#[test]
fn log_level_builds_a_crate_scoped_directive() {
    assert_eq!(LogLevel::Trace.filter_directive(), "sketch_prelude=trace");
}

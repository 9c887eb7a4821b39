//! User files layered over the embedded defaults.

use smc_config::{Loader, PROJECT_FILE};
use std::fs;
use tempfile::tempdir;

#[test]
fn user_file_overrides_only_what_it_names() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("smc.toml");
    fs::write(
        &path,
        "[cpp]\nindent = 2\nheader_extension = \"hpp\"\n",
    )
    .unwrap();

    let config = Loader::new().with_file(&path).build().unwrap();
    assert_eq!(config.cpp.indent, 2);
    assert_eq!(config.cpp.header_extension, "hpp");
    assert_eq!(config.cpp.source_extension, "cpp");
    assert_eq!(config.generator.backend, "cpp");
}

#[test]
fn overrides_win_over_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("smc.toml");
    fs::write(&path, "[generator]\nbackend = \"json\"\n").unwrap();

    let config = Loader::new()
        .with_file(&path)
        .set_override("generator.backend", "dot")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.generator.backend, "dot");
}

#[test]
fn project_file_is_optional() {
    let dir = tempdir().unwrap();
    let config = Loader::new().with_project_dir(dir.path()).build().unwrap();
    assert_eq!(config.generator.backend, "cpp");
}

#[test]
fn explicit_file_wins_over_project_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(PROJECT_FILE),
        "[generator]\nbackend = \"json\"\ndebug = true\n",
    )
    .unwrap();
    let explicit = dir.path().join("release.toml");
    fs::write(&explicit, "[generator]\nbackend = \"dot\"\n").unwrap();

    let project_only = Loader::new().with_project_dir(dir.path()).build().unwrap();
    assert_eq!(project_only.generator.backend, "json");

    let config = Loader::new()
        .with_project_dir(dir.path())
        .with_file(&explicit)
        .build()
        .unwrap();
    assert_eq!(config.generator.backend, "dot");
    assert!(config.generator.debug);
}

#[test]
fn required_file_must_exist() {
    let dir = tempdir().unwrap();
    let result = Loader::new()
        .with_file(dir.path().join("absent.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn wrong_types_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("smc.toml");
    fs::write(&path, "[cpp]\nindent = \"wide\"\n").unwrap();

    assert!(Loader::new().with_file(&path).build().is_err());
}

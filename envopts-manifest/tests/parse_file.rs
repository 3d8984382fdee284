use std::{fs, path::PathBuf};

use envopts_manifest::{Error, MANIFEST_FILE_NAME, parse_file};
use tempfile::TempDir;

#[test]
fn test_paths_resolve_against_manifest_dir() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(MANIFEST_FILE_NAME);
    fs::write(
        &path,
        r#"
[defaults]
source = "src/config.rs"

[[target]]
type = "FooEnv"

[[target]]
type = "fooEnv"
option-type = "PrivOption"
output = "src/config/private_foo_env.rs"
"#,
    )
    .unwrap();

    let manifest = parse_file(&path).unwrap();
    let targets = manifest.targets();

    assert_eq!(targets[0].source, temp.path().join("src/config.rs"));
    assert_eq!(targets[0].output_path, None);
    assert_eq!(
        targets[1].output_path,
        Some(temp.path().join("src/config/private_foo_env.rs"))
    );
}

#[test]
fn test_missing_file() {
    let err = parse_file(PathBuf::from("/nonexistent/envopts.toml")).unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
}

#[test]
fn test_diagnostic_names_the_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(MANIFEST_FILE_NAME);
    fs::write(&path, "[[target]]\ntype = \"fn\"\n").unwrap();

    let err = parse_file(&path).unwrap_err();
    match *err {
        Error::ReservedKeyword { src, span, .. } => {
            assert!(src.name().ends_with(MANIFEST_FILE_NAME));
            assert_eq!(span.map(|s| s.offset()), Some(19));
        }
        other => panic!("unexpected error: {other}"),
    }
}

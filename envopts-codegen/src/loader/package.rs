//! Resolve a source location to exactly one module file.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Module roots tried, in order, when the location is a directory.
const ROOT_CANDIDATES: &[&str] = &["mod.rs", "lib.rs", "main.rs", "src/lib.rs", "src/main.rs"];

/// A module file plus how Rust names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFile {
    pub path: PathBuf,
    pub name: String,
    pub child_dir: PathBuf,
}

pub fn resolve(location: &Path) -> Result<ModuleFile> {
    let path = if location.is_dir() {
        let found: Vec<PathBuf> = ROOT_CANDIDATES
            .iter()
            .map(|candidate| location.join(candidate))
            .filter(|path| path.is_file())
            .collect();

        match found.as_slice() {
            [single] => single.clone(),
            [] => {
                return Err(resolution_error(
                    location,
                    format!("no module root found (looked for {})", ROOT_CANDIDATES.join(", ")),
                ));
            }
            many => {
                let names: Vec<String> = many
                    .iter()
                    .map(|p| p.strip_prefix(location).unwrap_or(p).display().to_string())
                    .collect();
                return Err(resolution_error(
                    location,
                    format!("{} module roots found ({})", many.len(), names.join(", ")),
                ));
            }
        }
    } else if location.is_file() {
        if location.extension().is_none_or(|ext| ext != "rs") {
            return Err(resolution_error(location, "not a Rust source file".to_string()));
        }
        location.to_path_buf()
    } else {
        return Err(resolution_error(location, "path does not exist".to_string()));
    };

    Ok(describe(path))
}

/// Derive module name and child directory from the file name.
fn describe(path: PathBuf) -> ModuleFile {
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (name, child_dir) = match stem.as_str() {
        "mod" => {
            let name = dir
                .canonicalize()
                .ok()
                .as_deref()
                .unwrap_or(dir.as_path())
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "self".to_string());
            (name, dir)
        }
        "lib" | "main" => ("crate".to_string(), dir),
        _ => (stem.clone(), dir.join(&stem)),
    };

    ModuleFile {
        path,
        name,
        child_dir,
    }
}

fn resolution_error(location: &Path, reason: String) -> Box<Error> {
    Box::new(Error::PackageResolution {
        location: location.to_path_buf(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_resolve_plain_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("config.rs");
        fs::write(&file, "").unwrap();

        let module = resolve(&file).unwrap();
        assert_eq!(module.name, "config");
        assert_eq!(module.child_dir, temp.path().join("config"));
    }

    #[test]
    fn test_resolve_mod_rs_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("settings");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("mod.rs"), "").unwrap();

        let module = resolve(&dir).unwrap();
        assert_eq!(module.path, dir.join("mod.rs"));
        assert_eq!(module.name, "settings");
        assert_eq!(module.child_dir, dir);
    }

    #[test]
    fn test_resolve_crate_root() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/lib.rs"), "").unwrap();

        let module = resolve(temp.path()).unwrap();
        assert_eq!(module.name, "crate");
        assert_eq!(module.child_dir, temp.path().join("src"));
    }

    #[test]
    fn test_resolve_rejects_ambiguous_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("lib.rs"), "").unwrap();
        fs::write(temp.path().join("main.rs"), "").unwrap();

        let err = resolve(temp.path()).unwrap_err();
        match *err {
            Error::PackageResolution { reason, .. } => {
                assert!(reason.contains("2 module roots"), "{reason}")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_rejects_empty_directory_and_missing_path() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            *resolve(temp.path()).unwrap_err(),
            Error::PackageResolution { .. }
        ));
        assert!(matches!(
            *resolve(&temp.path().join("nope.rs")).unwrap_err(),
            Error::PackageResolution { .. }
        ));
    }

    #[test]
    fn test_resolve_rejects_non_rust_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("config.toml");
        fs::write(&file, "").unwrap();

        assert!(matches!(
            *resolve(&file).unwrap_err(),
            Error::PackageResolution { .. }
        ));
    }
}

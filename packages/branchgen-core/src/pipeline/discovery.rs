//! Source discovery

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::DiscoveryConfig;
use crate::errors::Result;
use crate::features::parsing::SourceInput;
use crate::shared::models::Diagnostic;

/// Absolute source files under `root`, sorted by path
///
/// Hidden directories and directories named in `exclude_components` are not
/// entered. Components above `root` are never checked.
pub fn discover_sources(root: &Path, config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a directory", root.display()),
        )
        .into());
    }
    let root = root.canonicalize()?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e, config))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && has_extension(entry.path(), config) {
            files.push(entry.into_path());
        }
    }
    files.sort();

    debug!(root = %root.display(), files = files.len(), "Discovered sources");
    Ok(files)
}

/// Read every file; unreadable ones become parse diagnostics and are skipped
pub fn read_sources(paths: &[PathBuf]) -> (Vec<SourceInput>, Vec<Diagnostic>) {
    let mut inputs = Vec::with_capacity(paths.len());
    let mut diagnostics = Vec::new();
    for path in paths {
        let display = path.to_string_lossy().into_owned();
        match fs::read_to_string(path) {
            Ok(source) => inputs.push((display, source)),
            Err(e) => diagnostics.push(Diagnostic::parse_error(display, format!("unreadable: {}", e))),
        }
    }
    (inputs, diagnostics)
}

fn is_skipped_dir(entry: &DirEntry, config: &DiscoveryConfig) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || config.exclude_components.iter().any(|c| *c == name)
}

fn has_extension(path: &Path, config: &DiscoveryConfig) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| config.extensions.iter().any(|wanted| wanted == ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "fun f() {}\n").unwrap();
    }

    #[test]
    fn test_discovery_skips_test_and_hidden_dirs() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/main/kotlin/demo/B.kt");
        touch(dir.path(), "src/main/kotlin/demo/A.kt");
        touch(dir.path(), "src/main/kotlin/demo/notes.txt");
        touch(dir.path(), "src/test/kotlin/demo/ATest.kt");
        touch(dir.path(), ".gradle/cache/Gen.kt");

        let files = discover_sources(dir.path(), &DiscoveryConfig::default()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path().canonicalize().unwrap()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["src/main/kotlin/demo/A.kt", "src/main/kotlin/demo/B.kt"]);
    }

    #[test]
    fn test_root_named_like_excluded_component() {
        // EDGE CASE: the root itself is never filtered
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("test");
        touch(&root, "Main.kt");
        let files = discover_sources(&root, &DiscoveryConfig::default()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_relative_root_yields_absolute_paths() {
        let dir = tempfile::Builder::new().prefix("discovery").tempdir_in(".").unwrap();
        touch(dir.path(), "src/Main.kt");
        let relative = dir.path().strip_prefix(std::env::current_dir().unwrap()).unwrap();
        assert!(relative.is_relative());

        let files = discover_sources(relative, &DiscoveryConfig::default()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].is_absolute());
        assert!(files[0].ends_with("src/Main.kt"));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_sources(&dir.path().join("absent"), &DiscoveryConfig::default()).is_err());
    }

    #[test]
    fn test_unreadable_source_becomes_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "A.kt");
        let paths = vec![dir.path().join("A.kt"), dir.path().join("Gone.kt")];
        let (inputs, diagnostics) = read_sources(&paths);
        assert_eq!(inputs.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("unreadable"));
    }
}

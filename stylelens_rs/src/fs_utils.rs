//! Workspace discovery for the host binary.
//!
//! The analysis core never reads files; this module plays the host's part of
//! listing and reading component and stylesheet documents.

use std::fs;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::ReadError;
use crate::types::{ComponentDocument, Dialect, FileId, StylesheetDocument};

/// Directory names never descended into.
const SKIP_DIRS: &[&str] = &["node_modules", ".git"];

/// Documents found under one root, in walk order.
#[derive(Debug, Default)]
pub struct Workspace {
    pub components: Vec<ComponentDocument>,
    pub stylesheets: Vec<StylesheetDocument>,
}

impl Workspace {
    pub fn stylesheet_ids(&self) -> Vec<FileId> {
        self.stylesheets.iter().map(|s| s.file.clone()).collect()
    }
}

/// Config `ignore` globs matched against workspace-relative ids.
#[derive(Debug, Default)]
pub struct IgnoreSet {
    globs: Option<GlobSet>,
}

impl IgnoreSet {
    /// Blank and invalid patterns are dropped with a warning.
    pub fn new(patterns: &[String]) -> Self {
        let globs: Vec<Glob> = patterns
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .filter_map(|p| {
                Glob::new(p)
                    .inspect_err(|e| warn!(pattern = p, error = %e, "ignoring invalid glob"))
                    .ok()
            })
            .collect();
        if globs.is_empty() {
            return Self::default();
        }

        let mut builder = GlobSetBuilder::new();
        for glob in globs {
            builder.add(glob);
        }
        let globs = builder
            .build()
            .inspect_err(|e| warn!(error = %e, "ignore globs rejected"))
            .ok();
        Self { globs }
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_none()
    }

    pub fn is_ignored(&self, id: &FileId) -> bool {
        self.globs.as_ref().is_some_and(|set| set.is_match(id.as_str()))
    }
}

/// Workspace-relative id with `/` separators.
pub fn file_id(root: &Path, path: &Path) -> FileId {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    FileId::new(joined)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(&name))
}

fn is_stylesheet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("css"))
}

fn read_text(path: &Path) -> Result<String, ReadError> {
    fs::read_to_string(path).map_err(ReadError::from)
}

/// Walk `root` and read every component and stylesheet.
///
/// Files matching `ignore` (relative to `root`) are left out. Read failures
/// are carried in the documents, not returned.
pub fn discover(root: &Path, ignore: &[String]) -> Workspace {
    let ignore = IgnoreSet::new(ignore);
    let mut workspace = Workspace::default();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("walk error: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let id = file_id(root, path);
        if ignore.is_ignored(&id) {
            continue;
        }

        if let Some(dialect) = Dialect::from_path(path) {
            workspace.components.push(ComponentDocument {
                file: id,
                dialect,
                text: read_text(path),
            });
        } else if is_stylesheet(path) {
            workspace.stylesheets.push(StylesheetDocument {
                file: id,
                text: read_text(path),
            });
        }
    }

    debug!(
        root = %root.display(),
        components = workspace.components.len(),
        stylesheets = workspace.stylesheets.len(),
        "discovered documents"
    );
    workspace
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, body).expect("write");
    }

    #[test]
    fn test_discover_classifies_documents() {
        let temp = TempDir::new().expect("temp dir");
        let root = temp.path();
        write(root, "src/App.tsx", "export default () => null;");
        write(root, "src/Card.vue", "<template></template>");
        write(root, "src/Nav.svelte", "<nav></nav>");
        write(root, "src/index.css", ".a {}");
        write(root, "README.md", "# readme");

        let ws = discover(root, &[]);
        let ids: Vec<_> = ws.components.iter().map(|d| d.file.as_str()).collect();
        assert_eq!(ids, vec!["src/App.tsx", "src/Card.vue", "src/Nav.svelte"]);
        assert_eq!(ws.components[0].dialect, Dialect::Tsx);
        assert_eq!(ws.stylesheet_ids(), vec![FileId::from("src/index.css")]);
    }

    #[test]
    fn test_discover_skips_node_modules_and_ignores() {
        let temp = TempDir::new().expect("temp dir");
        let root = temp.path();
        write(root, "node_modules/pkg/Button.jsx", "<b />");
        write(root, "dist/bundle.css", ".x {}");
        write(root, "src/Ok.jsx", "<b />");

        let ws = discover(root, &["dist/**".to_string()]);
        assert_eq!(ws.components.len(), 1);
        assert_eq!(ws.components[0].file, FileId::from("src/Ok.jsx"));
        assert!(ws.stylesheets.is_empty());
    }

    #[test]
    fn test_ignore_set_drops_blank_and_invalid_patterns() {
        assert!(IgnoreSet::new(&[]).is_empty());
        assert!(IgnoreSet::new(&["  ".to_string()]).is_empty());

        let ignore = IgnoreSet::new(&["[".to_string(), " legacy/** ".to_string()]);
        assert!(!ignore.is_empty());
        assert!(ignore.is_ignored(&FileId::from("legacy/Old.vue")));
        assert!(!ignore.is_ignored(&FileId::from("src/legacy.vue")));
    }

    #[test]
    fn test_file_id_is_relative() {
        let root = Path::new("/work/app");
        assert_eq!(
            file_id(root, Path::new("/work/app/src/a.vue")),
            FileId::from("src/a.vue")
        );
    }
}

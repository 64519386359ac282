use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::Path;

use anyhow::bail;
use tracing::debug;
use walkdir::WalkDir;

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::kind::SourceKind;

use super::{Notebook, Recipe, Section};

/// File extension of recipe description files.
const DESCRIPTION_EXTENSION: &str = "txt";

impl Notebook {
    /// Walks `root` once, grouping every recognized file into sections of
    /// recipes keyed by base name.
    ///
    /// Hidden directories are pruned at every depth and hidden files are
    /// ignored. Entries are sorted by file name during the walk, so conflict
    /// resolution and output do not depend on filesystem iteration order.
    /// Unreadable files are recorded skips; a missing or unreadable root is
    /// the one fatal failure.
    pub fn collect(root: impl AsRef<Path>, diagnostics: &mut Diagnostics) -> Result<Notebook> {
        let root = root.as_ref();

        if !root.is_dir() {
            bail!(
                "source directory does not exist or is not a directory: {}",
                root.display()
            );
        }

        debug!(root = %root.display(), "collecting recipes");

        let mut sections: BTreeMap<String, BTreeMap<String, Recipe>> = BTreeMap::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    let path = error.path().unwrap_or(root).to_path_buf();
                    diagnostics.skip(&path, &error);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
                continue;
            };
            let Some(extension) = path.extension().and_then(OsStr::to_str) else {
                continue;
            };

            let kind = SourceKind::from_extension(extension);
            if kind.is_none() && extension != DESCRIPTION_EXTENSION {
                continue;
            }

            let recipes = sections.entry(section_key(root, path)).or_default();
            let recipe = recipes
                .entry(stem.to_string())
                .or_insert_with(|| Recipe::new(stem));

            match kind {
                Some(kind) => recipe.add_code(path, kind, diagnostics),
                None => recipe.add_description(path, diagnostics),
            }
        }

        let sections = sections
            .into_iter()
            .map(|(key, recipes)| {
                let mut recipes: Vec<_> = recipes.into_values().collect();
                recipes.sort_by(|left, right| left.name.cmp(&right.name));

                (key, Section { recipes })
            })
            .collect();

        Ok(Notebook { sections })
    }
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_str().map(|name| name.starts_with('.')).unwrap_or(false)
}

/// Derives the section key for a file: the slash-joined path of its directory
/// relative to the walk root. Files directly under the root key as `""`.
fn section_key(root: &Path, path: &Path) -> String {
    let parent = path.parent().unwrap_or(root);
    let relative = parent.strip_prefix(root).unwrap_or(parent);

    let components: Vec<_> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect();

    components.join("/")
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn section_key_is_relative_to_the_root() {
        let root = PathBuf::from("/notebook");

        assert_eq!("", section_key(&root, &root.join("hello.java")));
        assert_eq!(
            "sorting",
            section_key(&root, &root.join("sorting/bubble.cpp"))
        );
        assert_eq!(
            "graphs/flows",
            section_key(&root, &root.join("graphs/flows/dinic.cpp"))
        );
    }

    #[test]
    fn hidden_names_are_detected() {
        assert!(is_hidden(OsStr::new(".git")));
        assert!(is_hidden(OsStr::new(".hidden.cpp")));
        assert!(!is_hidden(OsStr::new("sorting")));
    }
}

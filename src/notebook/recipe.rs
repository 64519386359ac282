use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::diagnostics::Diagnostics;
use crate::extract;
use crate::kind::SourceKind;

/// A single highlighted code listing inside a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// The language the listing is written in.
    pub kind: SourceKind,
    /// The extracted, display-ready source text.
    pub source: String,
}

/// One entry in the notebook: a named algorithm plus an optional description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Stable identifier derived from the base file name, used as the anchor
    /// target for cross-references. Unique within a section, since recipes are
    /// keyed by base name alone.
    pub id: String,
    /// Human title; the base file name until a description file overrides it.
    pub name: String,
    /// Short annotation (usually a big-O note) from the description file.
    pub complexity: Option<String>,
    /// Code listings, at most one per source kind, in the order encountered.
    pub blocks: Vec<CodeBlock>,
    /// Markdown description following the two header lines, or empty.
    pub description: String,
}

impl Recipe {
    pub fn new(id: impl Into<String>) -> Recipe {
        let id = id.into();

        Recipe {
            name: id.clone(),
            id,
            complexity: None,
            blocks: Vec::new(),
            description: String::new(),
        }
    }

    /// Loads the algorithm source at `path`, extracts the displayable body,
    /// and adds it to the recipe.
    ///
    /// An unreadable file is a recorded skip, leaving the recipe without that
    /// listing. A second file of a kind the recipe already carries keeps the
    /// first listing and records a warning.
    pub fn add_code(&mut self, path: &Path, kind: SourceKind, diagnostics: &mut Diagnostics) {
        debug!(path = %path.display(), "gathering source");

        if self.blocks.iter().any(|block| block.kind == kind) {
            diagnostics.warn(
                path,
                format_args!("recipe `{}` already has {kind} code; keeping the first", self.id),
            );
            return;
        }

        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(error) => {
                diagnostics.skip(path, error);
                return;
            }
        };

        let source = extract::extract_solution(&source);
        self.blocks.push(CodeBlock { kind, source });
    }

    /// Loads the display name, complexity tag, and description from the
    /// description file at `path`.
    ///
    /// A missing file is not an error; descriptions are optional and the
    /// defaults stay. A file that exists but cannot be read is a warning, also
    /// keeping the defaults.
    pub fn add_description(&mut self, path: &Path, diagnostics: &mut Diagnostics) {
        debug!(path = %path.display(), "reading description");

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return,
            Err(error) => {
                diagnostics.warn(path, error);
                return;
            }
        };

        self.apply_description(&contents);
    }

    fn apply_description(&mut self, contents: &str) {
        let mut lines = contents.lines();

        if let Some(name) = lines.next() {
            let name = name.trim();
            if !name.is_empty() {
                self.name = name.to_string();
            }
        }

        if let Some(complexity) = lines.next() {
            let complexity = complexity.trim();
            if !complexity.is_empty() {
                self.complexity = Some(complexity.to_string());
            }
        }

        self.description = lines.collect::<Vec<_>>().join("\n").trim().to_string();
    }
}

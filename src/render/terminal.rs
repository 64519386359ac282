use std::io::Write;

use crate::error::Result;
use crate::notebook::Recipe;

use super::{Highlighter, RenderContext, Renderer};

/// Width used to right-align complexity tags when none is configured.
const DEFAULT_COLUMNS: usize = 80;

/// Renders the notebook as ANSI-colored text for a fixed-width terminal: a
/// numbered outline of sections and recipes, then every recipe's title, tag,
/// description, and highlighted code.
pub struct TerminalRenderer {
    highlighter: Highlighter,
    columns: usize,
}

impl TerminalRenderer {
    pub fn new(highlighter: Highlighter, columns: Option<u32>) -> TerminalRenderer {
        TerminalRenderer {
            highlighter,
            columns: columns.map(|columns| columns as usize).unwrap_or(DEFAULT_COLUMNS),
        }
    }

    fn write_outline(&self, ctx: &RenderContext<'_>, output: &mut dyn Write) -> Result<()> {
        for (section_number, (key, section)) in ctx.notebook.sections.iter().enumerate() {
            writeln!(output, "{}. {}", section_number + 1, key)?;

            for (recipe_number, recipe) in section.recipes.iter().enumerate() {
                writeln!(output, "  {}. {}", recipe_number + 1, recipe.name)?;
            }
        }

        Ok(())
    }

    fn write_recipe(&self, recipe: &Recipe, output: &mut dyn Write) -> Result<()> {
        match recipe.complexity {
            Some(ref complexity) => {
                let used = recipe.name.chars().count() + complexity.chars().count() + 2;
                let padding = self.columns.saturating_sub(used);

                write!(output, "\n\n{}{}{complexity}", recipe.name, " ".repeat(padding))?;
            }
            None => write!(output, "\n\n{}", recipe.name)?,
        }

        if !recipe.description.is_empty() {
            write!(output, "\n\n{}", recipe.description)?;
        }

        let blocks: Vec<_> = recipe
            .blocks
            .iter()
            .map(|block| self.highlighter.terminal(block.kind, &block.source))
            .collect();

        write!(output, "\n\n{}", blocks.join("\n"))?;

        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn name(&self) -> &str {
        "terminal"
    }

    fn render(&self, ctx: &RenderContext<'_>, output: &mut dyn Write) -> Result<()> {
        self.write_outline(ctx, output)?;

        for (key, section) in &ctx.notebook.sections {
            if !key.is_empty() {
                write!(output, "\n\n\n{key}")?;
            }

            for recipe in &section.recipes {
                self.write_recipe(recipe, output)?;
            }
        }

        writeln!(output)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::kind::SourceKind;
    use crate::notebook::{CodeBlock, Notebook, Section};

    fn render_to_string(notebook: &Notebook, columns: Option<u32>) -> String {
        let renderer = TerminalRenderer::new(Highlighter::new(), columns);
        let config = Config::default();
        let ctx = RenderContext {
            notebook,
            config: &config,
        };
        let mut output = Vec::new();

        renderer
            .render(&ctx, &mut output)
            .expect("rendering failed");

        String::from_utf8(output).expect("output was not utf-8")
    }

    fn sample_notebook() -> Notebook {
        let mut notebook = Notebook::default();

        let bubble = Recipe {
            id: String::from("bubble"),
            name: String::from("Bubble Sort"),
            complexity: Some(String::from("O(n^2)")),
            blocks: vec![CodeBlock {
                kind: SourceKind::Cpp,
                source: String::from("void sort(){}"),
            }],
            description: String::from("A simple sort."),
        };
        let dijkstra = Recipe::new("dijkstra");

        notebook.sections.insert(
            String::from("sorting"),
            Section {
                recipes: vec![bubble],
            },
        );
        notebook.sections.insert(
            String::from("graphs"),
            Section {
                recipes: vec![dijkstra],
            },
        );

        notebook
    }

    #[test]
    fn outline_numbers_sections_and_recipes() {
        let output = render_to_string(&sample_notebook(), None);

        assert!(output.starts_with("1. graphs\n  1. dijkstra\n2. sorting\n  1. Bubble Sort\n"));
    }

    #[test]
    fn complexity_tag_is_right_aligned_to_the_column_width() {
        let output = render_to_string(&sample_notebook(), Some(40));

        let line = output
            .lines()
            .find(|line| line.starts_with("Bubble Sort") && line.ends_with("O(n^2)"))
            .expect("recipe header line not found");

        assert_eq!(38, line.chars().count());
    }

    #[test]
    fn recipe_without_code_or_description_renders_its_name() {
        let output = render_to_string(&sample_notebook(), None);

        assert!(output.contains("\n\ndijkstra\n\n"));
    }

    #[test]
    fn code_is_highlighted_with_ansi_escapes() {
        let output = render_to_string(&sample_notebook(), None);

        assert!(output.contains("\x1b["));
        assert!(output.contains("void"));
    }
}

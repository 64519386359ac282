use std::io::Write;

use pulldown_cmark::{escape::escape_html, html, Options, Parser};

use crate::error::Result;
use crate::notebook::Recipe;

use super::{Highlighter, RenderContext, Renderer};

/// Styles shared by every generated document, ahead of the token stylesheet
/// and any caller-supplied extras.
const BASE_STYLES: &str = "html { font-family: arial, sans-serif; }
pre.code { font-family: monospace; }
h3 { margin-bottom: 0; }
.complexity { float: right; font-weight: normal; font-style: italic; }
.description { color: gray; font-style: italic; }
";

/// Renders the notebook as a single self-contained HTML document: inline
/// styles, a linked table of contents, and one heading/article per section and
/// recipe.
pub struct HtmlRenderer {
    highlighter: Highlighter,
    /// Extra stylesheet content appended to the built-in styles.
    extra_css: Option<String>,
    /// Fixed text-column width hint, in characters.
    columns: Option<u32>,
}

impl HtmlRenderer {
    pub fn new(
        highlighter: Highlighter,
        extra_css: Option<String>,
        columns: Option<u32>,
    ) -> HtmlRenderer {
        HtmlRenderer {
            highlighter,
            extra_css,
            columns,
        }
    }

    fn write_styles(&self, output: &mut dyn Write) -> Result<()> {
        writeln!(output, "<style>")?;
        output.write_all(BASE_STYLES.as_bytes())?;

        if let Some(columns) = self.columns {
            writeln!(output, "body {{ max-width: {columns}ch; }}")?;
        }

        output.write_all(self.highlighter.stylesheet()?.as_bytes())?;

        if let Some(ref extra) = self.extra_css {
            writeln!(output, "{extra}")?;
        }

        writeln!(output, "</style>")?;

        Ok(())
    }

    fn write_toc(&self, ctx: &RenderContext<'_>, output: &mut dyn Write) -> Result<()> {
        writeln!(output, "<h2>Table of Contents</h2>")?;
        writeln!(output, "<ol id=\"toc\">")?;

        for (key, section) in &ctx.notebook.sections {
            writeln!(output, "<li>{}", escaped(key)?)?;
            writeln!(output, "<ol>")?;

            for recipe in &section.recipes {
                writeln!(
                    output,
                    "<li><a href=\"#{}\">{}</a></li>",
                    anchor(key, &recipe.id),
                    escaped(&recipe.name)?
                )?;
            }

            writeln!(output, "</ol>")?;
            writeln!(output, "</li>")?;
        }

        writeln!(output, "</ol>")?;

        Ok(())
    }

    fn write_recipe(
        &self,
        section: &str,
        recipe: &Recipe,
        output: &mut dyn Write,
    ) -> Result<()> {
        write!(
            output,
            "<h3 id=\"{}\">{}",
            anchor(section, &recipe.id),
            escaped(&recipe.name)?
        )?;

        if let Some(ref complexity) = recipe.complexity {
            write!(
                output,
                "<span class=\"complexity\">{}</span>",
                escaped(complexity)?
            )?;
        }

        writeln!(output, "</h3>")?;

        if !recipe.description.is_empty() {
            writeln!(
                output,
                "<div class=\"description\">{}</div>",
                markdown_to_html(&recipe.description)
            )?;
        }

        for block in &recipe.blocks {
            output.write_all(self.highlighter.html(block.kind, &block.source)?.as_bytes())?;
        }

        Ok(())
    }
}

impl Renderer for HtmlRenderer {
    fn name(&self) -> &str {
        "html"
    }

    fn render(&self, ctx: &RenderContext<'_>, output: &mut dyn Write) -> Result<()> {
        let title = escaped(&ctx.config.notebook.title)?;

        writeln!(output, "<!doctype html>")?;
        writeln!(output, "<html>")?;
        writeln!(output, "<head>")?;
        writeln!(output, "<meta charset=\"utf-8\">")?;
        writeln!(output, "<title>{title}</title>")?;
        self.write_styles(output)?;
        writeln!(output, "</head>")?;
        writeln!(output, "<body>")?;
        writeln!(output, "<h1>{title}</h1>")?;

        if let Some(ref description) = ctx.config.notebook.description {
            writeln!(output, "<p class=\"subtitle\">{}</p>", escaped(description)?)?;
        }

        self.write_toc(ctx, output)?;

        for (key, section) in &ctx.notebook.sections {
            writeln!(output, "<h2>{}</h2>", escaped(key)?)?;

            for recipe in &section.recipes {
                self.write_recipe(key, recipe, output)?;
            }
        }

        writeln!(output, "</body>")?;
        writeln!(output, "</html>")?;

        Ok(())
    }
}

/// Converts a markdown description body to HTML. Escaping of the body happens
/// here and only here; the result must not be escaped again.
fn markdown_to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(source, options);
    let mut output = String::new();
    html::push_html(&mut output, parser);

    output
}

/// HTML-escapes literal text (titles, section names, complexity tags) exactly
/// once.
fn escaped(text: &str) -> Result<String> {
    let mut escaped = String::new();
    escape_html(&mut escaped, text)?;

    Ok(escaped)
}

/// Builds a document-unique anchor for a recipe. Recipe ids only have to be
/// unique within their section, so anchors are namespaced by the section key.
fn anchor(section: &str, id: &str) -> String {
    if section.is_empty() {
        slug(id)
    } else {
        format!("{}--{}", slug(section), slug(id))
    }
}

fn slug(text: &str) -> String {
    text.chars()
        .map(|character| {
            if character.is_ascii_alphanumeric() {
                character.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::kind::SourceKind;
    use crate::notebook::{CodeBlock, Notebook, Section};

    fn render_to_string(notebook: &Notebook, config: &Config) -> String {
        let renderer = HtmlRenderer::new(Highlighter::new(), None, None);
        let ctx = RenderContext { notebook, config };
        let mut output = Vec::new();

        renderer
            .render(&ctx, &mut output)
            .expect("rendering failed");

        String::from_utf8(output).expect("output was not utf-8")
    }

    fn sample_notebook() -> Notebook {
        let mut notebook = Notebook::default();
        let recipe = Recipe {
            id: String::from("bubble"),
            name: String::from("Bubble Sort"),
            complexity: Some(String::from("O(n^2)")),
            blocks: vec![CodeBlock {
                kind: SourceKind::Cpp,
                source: String::from("void sort(){}"),
            }],
            description: String::from("A *simple* sort."),
        };

        notebook.sections.insert(
            String::from("sorting"),
            Section {
                recipes: vec![recipe],
            },
        );

        notebook
    }

    #[test]
    fn links_the_table_of_contents_to_recipe_anchors() {
        let output = render_to_string(&sample_notebook(), &Config::default());

        assert!(output.contains("<a href=\"#sorting--bubble\">Bubble Sort</a>"));
        assert!(output.contains("<h3 id=\"sorting--bubble\">Bubble Sort"));
    }

    #[test]
    fn renders_descriptions_as_markdown() {
        let output = render_to_string(&sample_notebook(), &Config::default());

        assert!(output.contains("<em>simple</em>"));
        assert!(output.contains("<span class=\"complexity\">O(n^2)</span>"));
    }

    #[test]
    fn escapes_literal_text_exactly_once() {
        let mut config = Config::default();
        config.notebook.title = String::from("Algorithms <& Friends>");

        let output = render_to_string(&sample_notebook(), &config);

        assert!(output.contains("<title>Algorithms &lt;&amp; Friends&gt;</title>"));
        assert!(!output.contains("&amp;lt;"));
    }

    #[test]
    fn emits_the_token_stylesheet_once() {
        let output = render_to_string(&sample_notebook(), &Config::default());

        assert_eq!(1, output.matches("<style>").count());
        assert!(output.contains(".keyword"));
    }

    #[test]
    fn recipe_without_code_still_renders_its_metadata() {
        let mut notebook = Notebook::default();
        let mut recipe = Recipe::new("dijkstra");
        recipe.name = String::from("Dijkstra");

        notebook.sections.insert(
            String::from("graphs"),
            Section {
                recipes: vec![recipe],
            },
        );

        let output = render_to_string(&notebook, &Config::default());

        assert!(output.contains("<a href=\"#graphs--dijkstra\">Dijkstra</a>"));
        assert!(output.contains("<h3 id=\"graphs--dijkstra\">Dijkstra</h3>"));
        assert!(!output.contains("<pre class=\"code\">"));
    }

    #[test]
    fn root_section_recipes_use_bare_anchors() {
        let mut notebook = Notebook::default();
        notebook.sections.insert(
            String::new(),
            Section {
                recipes: vec![Recipe::new("hello")],
            },
        );

        let output = render_to_string(&notebook, &Config::default());

        assert!(output.contains("<a href=\"#hello\">hello</a>"));
    }
}

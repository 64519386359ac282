use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

use crate::error::Result;
use crate::kind::SourceKind;

/// Theme backing the shared HTML stylesheet.
const HTML_THEME: &str = "InspiredGitHub";

/// Theme used for ANSI terminal output.
const TERMINAL_THEME: &str = "base16-ocean.dark";

/// Class style applied to generated HTML token spans.
const CLASS_STYLE: ClassStyle = ClassStyle::Spaced;

/// The syntax-highlighting collaborator shared by both renderers.
///
/// Owns the grammar and theme sets, loaded once per run. Lookup goes through
/// the [`SourceKind`] table; a grammar miss falls back to plain text rather
/// than failing the render.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Highlighter {
    pub fn new() -> Highlighter {
        Highlighter {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    fn syntax(&self, kind: SourceKind) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_name(kind.syntax_name())
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    /// Highlights one code listing for the terminal as 24-bit ANSI text.
    pub fn terminal(&self, kind: SourceKind, source: &str) -> String {
        let Some(theme) = self.theme_set.themes.get(TERMINAL_THEME) else {
            return source.to_string();
        };

        let syntax = self.syntax(kind);
        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut output = String::new();

        for line in LinesWithEndings::from(source) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(regions) => output.push_str(&as_24_bit_terminal_escaped(&regions, false)),
                Err(_) => output.push_str(line),
            }
        }

        output.push_str("\x1b[0m");
        output
    }

    /// Highlights one code listing as classed HTML spans wrapped in a `<pre>`
    /// block. Token colors come from the shared stylesheet, emitted once per
    /// document by [`Highlighter::stylesheet`].
    pub fn html(&self, kind: SourceKind, source: &str) -> Result<String> {
        let syntax = self.syntax(kind);
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);

        for line in LinesWithEndings::from(source) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(format!("<pre class=\"code\">{}</pre>\n", generator.finalize()))
    }

    /// The stylesheet for the HTML token classes.
    pub fn stylesheet(&self) -> Result<String> {
        let Some(theme) = self.theme_set.themes.get(HTML_THEME) else {
            return Ok(String::new());
        };

        let css = css_for_theme_with_class_style(theme, CLASS_STYLE)?;

        Ok(css)
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn terminal_output_carries_ansi_escapes_and_a_reset() {
        let highlighter = Highlighter::new();

        let output = highlighter.terminal(SourceKind::Cpp, "int main() { return 0; }");

        assert!(output.contains("\x1b["));
        assert!(output.ends_with("\x1b[0m"));
    }

    #[test]
    fn html_output_wraps_classed_spans_in_a_pre_block() {
        let highlighter = Highlighter::new();

        let output = highlighter
            .html(SourceKind::Java, "class A {}")
            .expect("highlighting failed");

        assert!(output.starts_with("<pre class=\"code\">"));
        assert!(output.contains("<span class="));
        assert!(output.trim_end().ends_with("</pre>"));
    }

    #[test]
    fn stylesheet_defines_token_classes() {
        let highlighter = Highlighter::new();

        let stylesheet = highlighter.stylesheet().expect("stylesheet failed");

        assert!(stylesheet.contains(".keyword"));
    }
}

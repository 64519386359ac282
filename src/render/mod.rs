//! Rendering of a collected notebook into its output formats.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

mod highlight;
mod html;
mod terminal;

pub use highlight::*;
pub use html::*;
pub use terminal::*;

use crate::{config::Config, error::Result, notebook::Notebook};

/// Everything a renderer needs to produce output: the collected notebook and
/// the effective configuration for the run.
pub struct RenderContext<'a> {
    pub notebook: &'a Notebook,
    pub config: &'a Config,
}

/// Renders a collected notebook to a stream in one output format.
///
/// Renderers stream their writes and must not assume the output is buffered in
/// full. They consume the notebook read-only; no component upstream of a
/// renderer depends on the output format.
pub trait Renderer {
    fn name(&self) -> &str;

    fn render(&self, ctx: &RenderContext<'_>, output: &mut dyn Write) -> Result<()>;
}

/// The output formats a notebook can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Terminal,
}

impl FromStr for OutputFormat {
    type Err = crate::error::Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        match source {
            "html" => Ok(OutputFormat::Html),
            "terminal" | "term" => Ok(OutputFormat::Terminal),
            other => Err(UnknownFormatError(other.to_string()).into()),
        }
    }
}

/// Raised when a format name is not one of the supported outputs, whether it
/// was given explicitly or inferred from an output file extension.
#[derive(Debug)]
pub struct UnknownFormatError(pub String);

impl fmt::Display for UnknownFormatError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "unknown format: {}", self.0)
    }
}

impl std::error::Error for UnknownFormatError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_supported_formats() {
        assert_eq!(OutputFormat::Html, "html".parse().expect("should parse"));
        assert_eq!(
            OutputFormat::Terminal,
            "terminal".parse().expect("should parse")
        );
        assert_eq!(OutputFormat::Terminal, "term".parse().expect("should parse"));
    }

    #[test]
    fn rejects_unknown_formats_by_name() {
        let error = "pdf".parse::<OutputFormat>().expect_err("should not parse");

        assert!(error.is::<UnknownFormatError>());
        assert!(error.to_string().contains("pdf"));
    }
}

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codebook::config::{Config, CONFIG_FILE};
use codebook::diagnostics::Diagnostics;
use codebook::error::Result;
use codebook::notebook::Notebook;
use codebook::render::{
    Highlighter, HtmlRenderer, OutputFormat, RenderContext, Renderer, TerminalRenderer,
    UnknownFormatError,
};

fn main() -> ExitCode {
    let mut command = cli();
    let matches = command.get_matches_mut();

    init_tracing(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");

            if error.is::<UnknownFormatError>() {
                eprintln!("{}", command.render_usage());
            }

            ExitCode::FAILURE
        }
    }
}

fn cli() -> Command {
    Command::new("cbook")
        .about("Generate a browsable notebook from a tree of algorithm source files")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("source_dir")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Root directory of the algorithm sources"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(value_parser!(PathBuf))
                .help("File for the generated output (default: standard output)"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .help("Force the output format ('html' or 'terminal')"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Output progress information"),
        )
        .arg(
            Arg::new("stylesheet")
                .long("stylesheet")
                .value_parser(value_parser!(PathBuf))
                .help("Extra stylesheet appended to the HTML output"),
        )
        .arg(
            Arg::new("columns")
                .long("columns")
                .value_parser(value_parser!(u32))
                .help("Fixed text-column width for the rendered notebook"),
        )
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn run(matches: &ArgMatches) -> Result<()> {
    let source_dir = matches
        .get_one::<PathBuf>("source_dir")
        .expect("source_dir is a required argument");

    let config = load_config(source_dir)?;
    let format = resolve_format(matches)?;

    let mut diagnostics = Diagnostics::new();
    let notebook = Notebook::collect(source_dir, &mut diagnostics)?;
    diagnostics.summarize();

    let html_config = config.html()?;
    let columns = matches.get_one::<u32>("columns").copied().or(html_config.columns);
    let highlighter = Highlighter::new();

    let renderer: Box<dyn Renderer> = match format {
        OutputFormat::Html => {
            let stylesheet = matches
                .get_one::<PathBuf>("stylesheet")
                .cloned()
                .or_else(|| html_config.stylesheet.as_ref().map(|path| source_dir.join(path)));
            let extra_css = stylesheet
                .map(|path| {
                    fs::read_to_string(&path).with_context(|| {
                        format!("failed to read stylesheet: {}", path.display())
                    })
                })
                .transpose()?;

            Box::new(HtmlRenderer::new(highlighter, extra_css, columns))
        }
        OutputFormat::Terminal => Box::new(TerminalRenderer::new(highlighter, columns)),
    };

    info!(renderer = renderer.name(), "rendering notebook");

    let ctx = RenderContext {
        notebook: &notebook,
        config: &config,
    };

    match matches.get_one::<PathBuf>("output") {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file: {}", path.display()))?;
            let mut writer = io::BufWriter::new(file);

            renderer.render(&ctx, &mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();

            renderer.render(&ctx, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn load_config(source_dir: &Path) -> Result<Config> {
    let config_location = source_dir.join(CONFIG_FILE);

    if config_location.exists() {
        Config::load(config_location)
    } else {
        Ok(Config::default())
    }
}

/// Resolves the output format: an explicit `--format` wins, then the output
/// file's extension, then terminal when writing to standard output.
fn resolve_format(matches: &ArgMatches) -> Result<OutputFormat> {
    if let Some(format) = matches.get_one::<String>("format") {
        return format.parse();
    }

    match matches.get_one::<PathBuf>("output") {
        Some(path) => {
            let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

            extension.parse()
        }
        None => Ok(OutputFormat::Terminal),
    }
}

//! `jsontree` command line: parses a JSON document and prints its tokens,
//! its node tree, or the materialized value. Errors are rendered as source
//! diagnostics.

use std::io::Read;
use std::ops::Range;
use std::path::PathBuf;

use anyhow::{bail, Context};
use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use clap::Parser as ClapParser;
use jsontree::{parse_tokens, to_value, tokenize_with_limits, Limits, ParseError};
use tracing::*;

mod logging;

#[derive(Debug, ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to a JSON file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Print the token sequence instead of the value.
    #[arg(long, conflicts_with = "tree")]
    tokens: bool,

    /// Print the node tree instead of the value.
    #[arg(long)]
    tree: bool,

    /// Reject unterminated strings.
    #[arg(long, conflicts_with = "lenient")]
    strict: bool,

    /// Use the lenient preset (see `Limits::lenient`).
    #[arg(long)]
    lenient: bool,
}

impl Args {
    fn limits(&self) -> Limits {
        if self.strict {
            Limits::strict()
        } else if self.lenient {
            Limits::lenient()
        } else {
            Limits::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let cli = Args::parse();

    debug!(input = ?cli.input);

    let (path, text) = match &cli.input {
        Some(input) => {
            let text = match std::fs::read_to_string(input) {
                Ok(text) => text,
                Err(e) => {
                    error!(path = ?input, "failed to read input");
                    return Err(e)
                        .with_context(|| format!("failed to read file `{}`", input.display()));
                }
            };
            (input.display().to_string(), text)
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            ("<stdin>".to_string(), text)
        }
    };

    let limits = cli.limits();
    let result = tokenize_with_limits(&text, &limits).and_then(|tokens| {
        if cli.tokens {
            for token in &tokens {
                println!(
                    "{:<12} {:>9}  {:?}",
                    token.kind().to_string(),
                    token.span().to_string(),
                    token.lexeme()
                );
            }
            return Ok(());
        }
        let root = parse_tokens(&tokens, &limits)?;
        if cli.tree {
            print!("{}", root.tree());
        } else {
            println!("{:#?}", to_value(&root)?);
        }
        Ok(())
    });

    if let Err(e) = result {
        report(&path, &text, &e)?;
        bail!("failed to parse `{path}`");
    }

    Ok(())
}

type DiagnosticReport<'a> = Report<'a, (&'a String, Range<usize>)>;

/// Prints `error` as an annotated source snippet on stderr.
fn report(path: &String, text: &str, error: &ParseError) -> anyhow::Result<()> {
    diagnostic(path, text, error, Config::default()).eprint((path, Source::from(text)))?;
    Ok(())
}

/// Builds the report for `error`, labelled at its span within `text`.
fn diagnostic<'a>(
    path: &'a String,
    text: &str,
    error: &ParseError,
    config: Config,
) -> DiagnosticReport<'a> {
    let range = clamp(error.span.range(), text.chars().count());
    Report::build(ReportKind::Error, path, range.start)
        .with_config(config)
        .with_message(error.to_string())
        .with_label(
            Label::new((path, range))
                .with_message(error.message.clone())
                .with_color(Color::Red),
        )
        .finish()
}

/// Keeps a span inside the source; the end-of-input span sits one past it.
fn clamp(range: Range<usize>, len: usize) -> Range<usize> {
    let start = range.start.min(len);
    start..range.end.min(len).max(start)
}

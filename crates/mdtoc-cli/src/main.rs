//! mdtoc - Extract headings and tables of contents from Markdown
//!
//! Usage:
//!   mdtoc [OPTIONS] <COMMAND>
//!
//! Commands:
//!   headings  List headings with their anchor ids
//!   toc       Print the nested table of contents
//!   fix       Re-indent code blocks embedded in list items
//!   slug      Show the anchor id a heading text would get
//!   stats     Show document statistics

mod error;
mod render;
mod stats;

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use mdtoc_core::heading::text_and_anchor;
use mdtoc_core::Outline;

use crate::error::{CliError, Result};
use crate::stats::DocumentStats;

/// Path that stands for standard input or output.
const STDIO: &str = "-";

#[derive(Parser, Debug)]
#[command(name = "mdtoc")]
#[command(version, about = "Extract headings and tables of contents from Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    mdtoc headings README.md          List headings and anchor ids
    mdtoc toc -f html README.md       Render a collapsible TOC fragment
    mdtoc fix -o fixed.md notes.md    Re-indent list code blocks
    cat doc.md | mdtoc toc -          Read from standard input")]
struct Cli {
    /// Log what the extractor and fixer do
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List headings with their anchor ids
    Headings {
        /// Markdown file, or - for stdin
        #[arg(value_name = "FILE")]
        file: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print the nested table of contents
    Toc {
        /// Markdown file, or - for stdin
        #[arg(value_name = "FILE")]
        file: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Shorthand for --format json
        #[arg(short, long, conflicts_with = "format")]
        json: bool,
    },

    /// Re-indent code blocks embedded in list items
    Fix {
        /// Markdown file, or - for stdin
        #[arg(value_name = "FILE")]
        file: String,

        /// Write the result here instead of stdout
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<String>,
    },

    /// Show the anchor id a heading text would get, honouring {#id} markers
    Slug {
        /// Heading texts
        #[arg(value_name = "TEXT", required = true)]
        texts: Vec<String>,
    },

    /// Show document statistics
    Stats {
        /// Markdown file, or - for stdin
        #[arg(value_name = "FILE")]
        file: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
    Html,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Headings { file, json } => cmd_headings(&file, json),
        Command::Toc { file, format, json } => {
            cmd_toc(&file, if json { Format::Json } else { format })
        }
        Command::Fix { file, output } => cmd_fix(&file, output.as_deref()),
        Command::Slug { texts } => {
            for text in &texts {
                println!("{}", heading_anchor(text));
            }
            Ok(())
        }
        Command::Stats { file, json } => cmd_stats(&file, json),
    }
}

fn read_input(path: &str) -> Result<Vec<u8>> {
    let result = if path == STDIO {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf).map(|_| buf)
    } else {
        fs::read(path)
    };

    let input = result.map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })?;
    info!("read {} bytes from {}", input.len(), display_path(path));
    Ok(input)
}

fn display_path(path: &str) -> &str {
    if path == STDIO {
        "<stdin>"
    } else {
        path
    }
}

/// The anchor a standalone heading text would get in a fresh document.
///
/// A trailing `{#id}` marker wins over the slugged text.
fn heading_anchor(text: &str) -> String {
    text_and_anchor(text).1
}

// =============================================================================
// Commands
// =============================================================================

fn cmd_headings(path: &str, json: bool) -> Result<()> {
    let input = read_input(path)?;
    let outline = Outline::from_markdown(&input);

    if json {
        println!("{}", render::headings_json(outline.headings())?);
    } else {
        print!("{}", render::headings_text(outline.headings()));
    }
    Ok(())
}

fn cmd_toc(path: &str, format: Format) -> Result<()> {
    let input = read_input(path)?;
    let outline = Outline::from_markdown(&input);
    debug!("rendering {} TOC entries as {:?}", outline.toc().len(), format);

    match format {
        Format::Text => print!("{}", render::toc_text(outline.toc())),
        Format::Json => println!("{}", render::toc_json(outline.toc())?),
        Format::Html => print!("{}", render::toc_html(outline.toc())),
    }
    Ok(())
}

fn cmd_fix(path: &str, output: Option<&str>) -> Result<()> {
    let input = read_input(path)?;
    let outline = Outline::from_markdown(&input);
    if !outline.was_fixed() {
        info!("no list code blocks needed re-indenting");
    }

    match output {
        Some(out) if out != STDIO => fs::write(out, outline.content()).map_err(|source| {
            CliError::Write {
                path: out.to_string(),
                source,
            }
        }),
        _ => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(outline.content())
                .and_then(|()| stdout.flush())
                .map_err(|source| CliError::Write {
                    path: "<stdout>".to_string(),
                    source,
                })
        }
    }
}

fn cmd_stats(path: &str, json: bool) -> Result<()> {
    let input = read_input(path)?;
    let stats = DocumentStats::from_outline(&Outline::from_markdown(&input));

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        stats.print();
    }
    Ok(())
}

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use canvass_core::{ExtractConfig, Extractor, Page};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use url::Url;

mod echo;
use echo::{format_size, print_banner, print_error, print_extraction_details, print_info, print_step, print_success};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for extracted documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Extract and validate course content from a saved LMS page
#[derive(Parser, Debug)]
#[command(name = "canvass")]
#[command(author = "Canvass Contributors")]
#[command(version = VERSION)]
#[command(about = "Extract course content from saved LMS pages", long_about = None)]
struct Args {
    /// Local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Original page URL, used to tag the content type and course
    #[arg(long, value_name = "URL")]
    source_url: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Minimum acceptable body length in characters
    #[arg(long, default_value = "50", value_name = "NUM")]
    min_chars: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("canvass_core=debug")))
            .with_writer(io::stderr)
            .init();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let (html, size) = if args.input == "-" {
        if args.verbose {
            print_step(1, 3, "Reading from stdin");
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        let len = buffer.len();
        (buffer, len)
    } else {
        if args.verbose {
            print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
        }
        let content =
            fs::read_to_string(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?;
        let len = content.len();
        (content, len)
    };

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), format_size(size).bright_white());
        eprintln!();
    }

    let source_url = args
        .source_url
        .as_deref()
        .map(Url::parse)
        .transpose()
        .context("Invalid --source-url")?;

    if args.verbose {
        print_step(2, 3, "Extracting content");
    }

    let page = Page::parse(&html).context("Failed to parse HTML")?;

    let config = ExtractConfig::builder().min_chars(args.min_chars).build();
    let extractor = Extractor::with_config(config);

    let document = extractor.extract(&page, source_url.as_ref());

    if args.verbose {
        print_extraction_details(&document);
    }

    if args.verbose {
        print_step(3, 3, "Validating content");
    }

    let verdict = extractor.validate(&document.body);
    if !verdict.is_acceptable {
        let reason = verdict.failed_pattern.as_deref().unwrap_or("no educational signal");
        print_error(&format!(
            "No significant content found ({reason}); retry after the page finishes loading"
        ));
        std::process::exit(1);
    }

    let output = match args.format {
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&document.title);
            out.push_str("\n\n");
            out.push_str(&document.body);
            out.push('\n');
            out
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "document": document,
                "verdict": verdict,
            });
            let mut out = serde_json::to_string_pretty(&value).context("Failed to serialize document")?;
            out.push('\n');
            out
        }
    };

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}

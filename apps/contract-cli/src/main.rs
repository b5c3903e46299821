//! Contract analysis CLI
//!
//! Reads a draft from a file or stdin and prints the engine's view of it.
//! Logs go to stderr so stdout stays machine-readable.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use contract_engine::{Engine, EngineConfig, ParseResult};
use shared_types::{Issue, SectionId, Severity};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "contract-cli")]
#[command(version, about = "Section, defined-term and issue analysis for contract drafts")]
struct Args {
    /// TOML file overriding the engine vocabularies
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the full parse result
    Analyze {
        /// Input file, or `-` for stdin
        input: String,

        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Print the headings-only outline
    Outline {
        /// Input file, or `-` for stdin
        input: String,
    },

    /// Print detected issues as JSON
    Issues {
        /// Input file, or `-` for stdin
        input: String,

        /// Drop issues below this severity (low, medium, high)
        #[arg(long, value_parser = parse_severity)]
        min_severity: Option<Severity>,
    },

    /// Replace one section's text and print the new document
    Edit {
        /// Input file, or `-` for stdin
        input: String,

        /// Section id from a previous `analyze`
        #[arg(long)]
        section: String,

        /// File holding the replacement text, or `-` for stdin
        #[arg(long)]
        content: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

fn parse_severity(value: &str) -> std::result::Result<Severity, String> {
    Severity::parse(value).ok_or_else(|| format!("unknown severity: {}", value))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let engine = Engine::with_config(load_config(args.config.as_deref())?);
    let output = run(&engine, args.command)?;
    println!("{}", output);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    EngineConfig::from_toml_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read input file: {}", input))
    }
}

fn run(engine: &Engine, command: Command) -> Result<String> {
    match command {
        Command::Analyze { input, format } => {
            let result = engine.parse(&read_input(&input)?);
            render_analysis(&result, format)
        }
        Command::Outline { input } => {
            let result = engine.parse(&read_input(&input)?);
            Ok(result.outline().to_text())
        }
        Command::Issues {
            input,
            min_severity,
        } => {
            let result = engine.parse(&read_input(&input)?);
            let issues = filter_issues(&result.issues, min_severity);
            serde_json::to_string_pretty(&issues).context("Failed to encode issues")
        }
        Command::Edit {
            input,
            section,
            content,
        } => {
            if input == "-" && content == "-" {
                bail!("Only one of the document and the replacement can come from stdin");
            }
            let result = engine.parse(&read_input(&input)?);
            let replacement = read_input(&content)?;
            contract_engine::serialize(
                &result.tree,
                &SectionId::from(section),
                replacement.trim_end_matches('\n'),
            )
            .context("Failed to apply edit; re-run `analyze` for current section ids")
        }
    }
}

fn render_analysis(result: &ParseResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).context("Failed to encode parse result")
        }
        OutputFormat::Text => Ok(result.to_text()),
    }
}

fn filter_issues(issues: &[Issue], min_severity: Option<Severity>) -> Vec<&Issue> {
    issues
        .iter()
        .filter(|issue| min_severity.map_or(true, |min| issue.severity >= min))
        .collect()
}

mod commands;

use std::path::PathBuf;
use std::process;

use aralia_core::{FileError, TranslateOptions};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use commands::check::cmd_check;
use commands::translate::{cmd_translate, Destination};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Aralia fault-tree translator.
#[derive(Parser)]
#[command(
    name = "aralia",
    version,
    about = "Translate Aralia fault-tree descriptions to Open-PSA MEF XML"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log every pass at debug level on stderr (overrides RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate Aralia files to MEF XML
    Translate {
        /// Aralia fault-tree files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Allow more than one top gate
        #[arg(long)]
        multi_top: bool,
        /// Directory for the generated <stem>.xml files (default: current directory)
        #[arg(long, conflicts_with = "stdout")]
        out_dir: Option<PathBuf>,
        /// Write the XML to stdout instead of files
        #[arg(long)]
        stdout: bool,
        /// Probability given to events that are referenced but never declared
        #[arg(long, value_parser = parse_probability)]
        default_probability: Option<f64>,
    },

    /// Validate Aralia files and print a summary of each tree
    Check {
        /// Aralia fault-tree files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Allow more than one top gate
        #[arg(long)]
        multi_top: bool,
    },
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("probability must be within [0, 1], got {}", p))
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ok = match cli.command {
        Commands::Translate {
            files,
            multi_top,
            out_dir,
            stdout,
            default_probability,
        } => {
            let destination = if stdout {
                Destination::Stdout
            } else {
                Destination::Dir(out_dir.unwrap_or_default())
            };
            cmd_translate(
                &files,
                &TranslateOptions { multi_top },
                &destination,
                default_probability,
                cli.output,
                cli.quiet,
            )
        }
        Commands::Check { files, multi_top } => cmd_check(
            &files,
            &TranslateOptions { multi_top },
            cli.output,
            cli.quiet,
        ),
    };

    if !ok {
        process::exit(1);
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Translation failures keep their location in both formats. JSON errors are
/// printed even with `--quiet` so scripted callers always get them.
pub(crate) fn report_file_error(e: &FileError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&e.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", e));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("{}", e);
            }
        }
    }
}

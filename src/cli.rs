//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

/// Parsed command-line options. Path options override the loaded config.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub reference: Option<PathBuf>,
    /// Process the existing backlog and exit without watching.
    pub once: bool,
    pub help: bool,
}

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a message describing the first invalid argument.
pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

/// Parses options from `args`, excluding the program name.
///
/// # Errors
///
/// Returns a message for unknown arguments, missing values and repeated
/// options.
pub fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                set_once(&mut opts.config, path, "--config")?;
            }
            "--input" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --input (expected a folder path)")?;
                set_once(&mut opts.input, path, "--input")?;
            }
            "--output" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --output (expected a folder path)")?;
                set_once(&mut opts.output, path, "--output")?;
            }
            "--reference" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --reference (expected an XML file path)",
                )?;
                set_once(&mut opts.reference, path, "--reference")?;
            }
            "--once" => opts.once = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(opts)
}

fn set_once(slot: &mut Option<PathBuf>, value: &str, flag: &str) -> Result<(), String> {
    if slot.replace(PathBuf::from(value)).is_some() {
        return Err(format!("{flag} provided more than once"));
    }
    Ok(())
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("generation-report: values, emissions and heat rates for generation reports");
    eprintln!();
    eprintln!("Usage: generation-report [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>      Load settings from a TOML file (default: appsettings.toml)");
    eprintln!("  --input <dir>        Folder watched for generation reports");
    eprintln!("  --output <dir>       Folder for GenerationOutput files");
    eprintln!("  --reference <path>   Reference factors XML file");
    eprintln!("  --once               Process existing reports and exit");
    eprintln!("  --help               Show this help message");
}

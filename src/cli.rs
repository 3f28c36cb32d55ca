//! Command-line interface implementation for gt.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// Command-line arguments structure for gt.
#[derive(Parser, Debug)]
#[command(author, version, about = "gt: render Go text templates against JSON data", long_about = None)]
pub struct Args {
    /// Path to the template file
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Path to the JSON data file. Data is read from stdin when omitted and
    /// stdin is not a terminal.
    #[arg(value_name = "DATA")]
    pub data: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Prints the help text to stdout.
pub fn print_help() {
    Args::command().help_template(HELP_TEMPLATE).print_help().unwrap();
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

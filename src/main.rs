//! gt's main application entry point.
//! Parses the command line, acquires the template and data buffers, renders
//! and writes the result to stdout.

use std::io::Write;

use gt::{
    cli::{get_args, print_help, Args},
    error::{default_error_handler, Result},
    input::{read_file, DataSource},
    renderer::{GoTemplateRenderer, TemplateRenderer},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Picks the data source; an interactive stdin without a data file prints
///    the help text and exits with status 1
/// 2. Reads the template and data buffers
/// 3. Renders and writes the output verbatim to stdout
fn run(args: Args) -> Result<()> {
    let source = DataSource::from_args(args.data);
    if source == DataSource::Terminal {
        print_help();
        std::process::exit(1);
    }

    let template = read_file(&args.template)?;
    let data = source.load()?;

    let engine = GoTemplateRenderer::default();
    let output = engine.render(&template, data.as_deref())?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

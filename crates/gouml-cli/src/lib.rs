//! CLI logic for the gouml class-diagram generator.
//!
//! This module contains the core CLI logic: loading configuration, running
//! the gouml pipeline over a source directory, and writing the diagram.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use gouml::{DiagramBuilder, GoumlError};

/// Run the gouml CLI application
///
/// This function processes the input directory through the gouml pipeline
/// and writes the resulting PlantUML text to the output file, or to stdout
/// when no output file is given.
///
/// # Errors
///
/// Returns `GoumlError` for:
/// - Configuration loading errors
/// - Directory traversal and file I/O errors
/// - Parsing errors
pub fn run(args: &Args) -> Result<(), GoumlError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing sources"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.recursive {
        app_config.source_mut().set_recursive(true);
    }

    let builder = DiagramBuilder::new(app_config);
    let model = builder.parse_dir(&args.input)?;
    let diagram = builder.render(&model);

    match &args.output {
        Some(output) => {
            fs::write(output, &diagram)?;
            info!(output_file = output; "Diagram written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(diagram.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

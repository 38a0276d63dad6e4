//! CLI logic for the IoRing layout tool.
//!
//! This module contains the core CLI logic: loading configuration, reading
//! the intent graph, and dispatching to the selected subcommand.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{fs, path::Path};

use log::info;

use ioring::{IoRingError, RingBuilder};

/// Run the IoRing CLI application
///
/// `layout` processes the input file through the full pipeline and writes
/// the placed instances as JSON; `validate` only parses the intent graph and
/// prints its statistics.
///
/// # Errors
///
/// Returns `IoRingError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Layout errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), IoRingError> {
    let input = args.command.input();
    info!(input_path = input; "Reading intent graph");

    let app_config = config::load_config(args.config.as_ref())?;
    let builder = RingBuilder::new(app_config);

    let source = fs::read_to_string(input)?;
    let graph = builder.parse(&source)?;

    match &args.command {
        Command::Layout { output, .. } => {
            let output = Path::new(output).with_extension("json");
            let layout = builder.layout(&graph)?;
            let json = builder.render_json(&layout)?;

            fs::write(&output, json)?;

            info!(output_file = output.display().to_string(); "Layout exported successfully");
        }
        Command::Validate { .. } => {
            println!("{}", graph.statistics());
            info!("Intent graph is valid");
        }
    }

    Ok(())
}

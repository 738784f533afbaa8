//! CLI logic for the Brickdraw diagram tool.
//!
//! The CLI loads a Turtle diagram into an editing session and writes it back
//! out, either as an SVG snapshot or as normalized Turtle.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::{fs, path::Path};

use log::info;

use brickdraw::{BrickdrawError, Editor, ImportReport, catalog::EntityLibrary};

/// Run the Brickdraw CLI application
///
/// The input document is merged into an empty scene, then the scene is
/// written to the output path in the requested format. Records the import
/// had to skip are returned in the report; they do not fail the run.
///
/// # Errors
///
/// Returns `BrickdrawError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Turtle syntax errors
/// - Serialization errors
pub fn run(args: &Args) -> Result<ImportReport, BrickdrawError> {
    let format = args.output_format();
    info!(
        input_path = args.input,
        output_path = args.output,
        output_format:? = format;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let mut editor = Editor::new(&app_config, Box::new(EntityLibrary::standard()))?;

    let report = editor.import_from_file(Path::new(&args.input))?;
    info!(
        entities = report.entities(),
        connections = report.visual_connections() + report.implicit_connections(),
        warnings = report.warnings().len();
        "Diagram loaded"
    );

    match format {
        OutputFormat::Svg => fs::write(&args.output, editor.render_svg())?,
        OutputFormat::Turtle => editor.export_to_file(Path::new(&args.output))?,
    }

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(report)
}

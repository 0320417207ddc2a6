//! obj2vbo CLI - convert Wavefront OBJ files to VBO artifacts.
//!
//! Usage: obj2vbo <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `obj2vbo --help` for available commands.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

use obj2vbo::convert::{convert_file, ConvertOptions};
use obj2vbo::diagnostics::{DiagnosticSink, Severity};
use obj2vbo::vbo;

#[derive(Parser)]
#[command(name = "obj2vbo")]
#[command(author, version, about = "Wavefront OBJ to VBO converter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an OBJ file to a VBO artifact
    Convert {
        /// Input OBJ file
        input: PathBuf,

        /// Output VBO file (default: input with a .vbo extension)
        output: Option<PathBuf>,

        /// Overwrite explicit normals on faces that mix explicit and
        /// missing ones, matching older converters bit for bit
        #[arg(long)]
        legacy_normals: bool,

        /// Suppress warning diagnostics (errors still print)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Display information about a VBO artifact
    Info {
        /// Input VBO file
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            legacy_normals,
            quiet,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("vbo"));
            cmd_convert(&input, &output, legacy_normals, quiet)?;
        }

        Commands::Info { input } => {
            cmd_info(&input)?;
        }
    }

    Ok(())
}

/// Create a sink that prints diagnostics in `file(line): severity: message`
/// form, the format downstream tooling already parses.
fn console_sink(quiet: bool) -> DiagnosticSink {
    DiagnosticSink::new(move |d| {
        if quiet && d.severity == Severity::Warning {
            return;
        }
        eprintln!("{}({}): {}: {}", d.file, d.line, d.severity, d.message);
    })
}

fn cmd_convert(
    input: &PathBuf,
    output: &PathBuf,
    legacy_normals: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ConvertOptions::default().with_legacy_normal_overwrite(legacy_normals);
    let sink = console_sink(quiet);

    let start = Instant::now();
    let summary = convert_file(input, output, &options, &sink)?;
    let elapsed = start.elapsed();

    println!(
        "Converted {} faces into {} vertices and {} triangles",
        summary.faces, summary.vertices, summary.triangles
    );
    println!("Wrote: {}", output.display());
    println!("Time: {:.2?}", elapsed);

    Ok(())
}

fn cmd_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = vbo::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.vertex_count());
    println!("Indices: {}", mesh.index_count());
    println!("Triangles: {}", mesh.triangle_count());

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let diag = max - min;
        println!(
            "Dimensions: {:.3} x {:.3} x {:.3}",
            diag.x, diag.y, diag.z
        );
    }

    Ok(())
}

//! Scene OBJ Exporter CLI
//!
//! Convert JSON scene descriptions to Wavefront OBJ/MTL.

use clap::{Parser, Subcommand};
use scene_obj_exporter::{export_scene, find_format, formats, load_scene, ExportConfig, FileSystem};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scene-obj-exporter")]
#[command(author, version, about = "Export JSON scene graphs to Wavefront OBJ", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a scene file
    Export {
        /// Input JSON file containing the scene
        #[arg(short, long)]
        input: PathBuf,

        /// Output geometry file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format id (see `formats`)
        #[arg(short, long, default_value = "obj")]
        format: String,

        /// Fixed number of fractional digits for coordinates
        #[arg(long)]
        precision: Option<usize>,
    },

    /// List the registered export formats
    Formats,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            output,
            format,
            precision,
        } => {
            export_file(&input, &output, &format, precision)?;
        }
        Commands::Formats => {
            for format in formats() {
                println!("{:<10} .{:<5} {}", format.id, format.file_extension, format.description);
            }
        }
    }

    Ok(())
}

fn export_file(
    input_path: &PathBuf,
    output_path: &PathBuf,
    format_id: &str,
    precision: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = find_format(format_id).ok_or_else(|| format!("Unknown export format: {}", format_id))?;

    println!("Loading scene from {:?}...", input_path);
    let scene = load_scene(input_path)?;
    println!(
        "  Found {} mesh slots, {} materials",
        scene.meshes.len(),
        scene.materials.len()
    );

    let output_path = if output_path.extension().is_some() {
        output_path.clone()
    } else {
        output_path.with_extension(format.file_extension)
    };
    let output = output_path
        .to_str()
        .ok_or_else(|| format!("Output path is not valid UTF-8: {:?}", output_path))?;

    let mut config = ExportConfig::default();
    config.precision = precision;

    export_scene(format.id, output, &mut FileSystem::new(), &scene, &config)?;
    println!("Exported {} to {:?}", format.description, output_path);

    Ok(())
}

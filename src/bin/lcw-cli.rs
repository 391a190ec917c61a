//! lcw-cli - Command-line interface for LCW
//!
//! A command-line tool for decoding LCW-compressed files and converting
//! decoded indexed images to PNG.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use lcw::{decompress_with_stats, IndexedImage, Palette, Termination};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "lcw-cli")]
#[command(about = "A CLI tool for Westwood LCW decompression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompress an LCW file to raw bytes
    Decompress {
        /// Input compressed file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress an LCW image and save it as PNG
    Convert {
        /// Input compressed file
        input: PathBuf,

        /// Colour palette file (.pal, .act or .gpl)
        palette: PathBuf,

        /// Output PNG file
        output: PathBuf,

        /// Image width in pixels
        #[arg(long)]
        width: u32,

        /// Image height in pixels
        #[arg(long)]
        height: u32,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Get information about a compressed file
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Decompress {
            input,
            output,
            force,
        } => decompress_file(&input, &output, force, cli.verbose, cli.quiet),
        Commands::Convert {
            input,
            palette,
            output,
            width,
            height,
            force,
        } => convert_file(
            &input,
            &palette,
            &output,
            (width, height),
            force,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn check_paths(input: &PathBuf, output: &PathBuf, force: bool) -> Result<(), String> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()));
    }

    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        ));
    }

    Ok(())
}

fn progress_bar(input_size: usize, quiet: bool) -> Option<ProgressBar> {
    if quiet || input_size <= 1024 * 1024 {
        return None;
    }

    let pb = ProgressBar::new(2);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message("Decompressing...");
    pb.inc(1);
    Some(pb)
}

fn describe(termination: &Termination) -> String {
    match termination {
        Termination::EndMarker { position } => format!("end marker at offset {position}"),
        Termination::Exhausted => "input exhausted".to_string(),
        Termination::Truncated { kind, position } => {
            format!("truncated {kind:?} command at offset {position}")
        }
    }
}

fn decompress_file(
    input: &PathBuf,
    output: &PathBuf,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Decompressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();

    // Read input file
    let compressed_data = fs::read(input)?;
    let input_size = compressed_data.len();

    if verbose {
        println!("Compressed size: {} bytes", input_size);
    }

    let progress = progress_bar(input_size, quiet);

    let (decompressed_data, stats) = decompress_with_stats(&compressed_data);

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decompression complete");
    }

    // Write output file
    fs::write(output, &decompressed_data)?;

    let decompression_time = start_time.elapsed();

    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", decompressed_data.len());
        println!("  Ratio:  {:.1}%", stats.ratio());
        println!("  Time:   {:.2?}", decompression_time);

        if stats.termination.is_truncated() {
            println!("  Note: Stream ended early ({})", describe(&stats.termination));
        }
    }

    Ok(())
}

fn convert_file(
    input: &PathBuf,
    palette_path: &PathBuf,
    output: &PathBuf,
    (width, height): (u32, u32),
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!("Loading compressed data from: {}", input.display());
    }

    let compressed_data = fs::read(input)?;
    if verbose {
        println!("Compressed data size: {} bytes", compressed_data.len());
    }

    let progress = progress_bar(compressed_data.len(), quiet);
    let (decompressed_data, _stats) = decompress_with_stats(&compressed_data);

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decompression complete");
    }

    if verbose {
        println!("Decompressed data size: {} bytes", decompressed_data.len());
        println!("Loading palette from: {}", palette_path.display());
    }

    let palette = Palette::load(palette_path)?;
    if verbose {
        println!("Loaded palette with {} colors", palette.colors().len());
    }

    let image = IndexedImage::from_decoded(decompressed_data, width, height)?;
    image.save_png(&palette, output)?;

    if !quiet {
        println!("PNG saved as: {}", output.display());
        println!("✓ Conversion completed successfully!");
    }

    Ok(())
}

fn show_file_info(input: &PathBuf, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Check if input file exists
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    let (decompressed, stats) = decompress_with_stats(&data);

    println!("LCW File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", data.len());
    println!("  Decompressed Size: {} bytes", decompressed.len());
    println!("  Compression Ratio: {:.1}%", stats.ratio());
    println!("  Commands: {}", stats.commands);
    println!("  Stopped: {}", describe(&stats.termination));

    if stats.termination.is_end_marker() && stats.input_bytes < data.len() {
        println!(
            "  Trailing bytes: {} after the end marker",
            data.len() - stats.input_bytes
        );
    }

    if verbose {
        println!("  Literal bytes: {}", stats.literal_bytes);
        println!("  Fill bytes: {}", stats.fill_bytes);
        println!("  Copied bytes: {}", stats.copy_bytes);
        println!("  Zero-filled bytes: {}", stats.zero_filled_bytes);
        println!("  Clamped short copies: {}", stats.clamped_copies);
    }

    Ok(())
}

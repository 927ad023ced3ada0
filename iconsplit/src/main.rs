use iconsplit::split_sheet;
use libmonobmp::ExtractOptions;
use std::path::PathBuf;
use tracing::{info, Level};

use anyhow::{bail, Result};
use clap::Parser;

#[cfg(not(debug_assertions))]
const DEFAULT_DEBUG_LEVEL: u8 = 1;
#[cfg(debug_assertions)]
const DEFAULT_DEBUG_LEVEL: u8 = 99;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Turn debugging information on
    #[arg(short, long, default_value_t = DEFAULT_DEBUG_LEVEL, action = clap::ArgAction::Count)]
    verbosity: u8,

    /// The bitmap file holding the icon sheet (must be a one-bit-per-pixel
    /// bitmap file)
    #[arg(short, long)]
    input: PathBuf,

    /// Directory into which to place the icon files
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pad all icon files to the same dimensions as the largest icon
    #[arg(long)]
    samesize: bool,

    /// Extra white pixels added to the left and right of each icon
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=1000))]
    hmargin: u32,

    /// Extra white pixels added above and below each icon
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=1000))]
    vmargin: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(true)
        .with_line_number(true)
        .init();

    if !cli.input.is_file() {
        bail!(
            "Input file does not exist or is not a file: {}",
            cli.input.display()
        );
    }
    let output = match cli.output {
        Some(output) => {
            if !output.is_dir() {
                bail!(
                    "Path provided for output directory is not a directory: {}",
                    output.display()
                );
            }
            output
        }
        None => {
            let Some(dir) = cli.input.parent() else {
                bail!("Invalid input file");
            };
            let output = dir.to_path_buf();
            info!("output directory: {}", output.display());
            output
        }
    };

    let options = ExtractOptions::builder()
        .uniform_size(cli.samesize)
        .horizontal_margin(cli.hmargin)
        .vertical_margin(cli.vmargin)
        .build();
    split_sheet(&cli.input, &output, &options)?;
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::Result;
use libmonobmp::{ExtractOptions, IconSheet};
use tracing::{debug, info, instrument};

#[instrument]
pub fn split_sheet(
    input: &Path,
    output_dir: &Path,
    options: &ExtractOptions,
) -> Result<Vec<PathBuf>> {
    let sheet = IconSheet::from_file(input)?;
    debug!("Read icon sheet from file");
    info!(
        "Sheet is {}x{} pixels, pixel data begins at byte {}",
        sheet.width(),
        sheet.height(),
        sheet.header().data_offset()
    );

    let written = sheet.write_icons(output_dir, options)?;
    info!(
        "Successfully wrote {} icon files to {}",
        written.len(),
        output_dir.display()
    );
    Ok(written)
}

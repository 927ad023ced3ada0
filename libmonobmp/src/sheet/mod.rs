#![allow(clippy::module_name_repetitions)]

pub(crate) mod compose;
pub(crate) mod detect;
pub(crate) mod header;
pub(crate) mod plane;
pub(crate) mod writer;

pub use compose::IconRaster;
pub use detect::{Band, IconBox};
pub use header::{Compression, SheetHeader};
pub use plane::PixelPlane;

use crate::error::Error;
use anyhow::{Context, Result};
use bon::Builder;
use compose::{compose, Placement};
use std::{
    fs::{self, File},
    io::{BufWriter, Seek, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Options controlling how icons are sized when they are extracted
#[derive(Builder, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Pad every icon file to the dimensions of the largest discovered
    /// icon, re-centring the smaller ones
    #[builder(default)]
    pub uniform_size: bool,
    /// Background pixels added to the left and to the right of each icon
    #[builder(default)]
    pub horizontal_margin: u32,
    /// Background pixels added above and below each icon
    #[builder(default)]
    pub vertical_margin: u32,
}

/// A decoded monochrome icon-sheet bitmap
///
/// Owns the validated [`SheetHeader`] and the normalized [`PixelPlane`].
/// The plane is immutable after decoding; every extraction reads it and
/// builds its own [`IconRaster`], so icons are independent of each other.
#[derive(Debug)]
pub struct IconSheet {
    header: SheetHeader,
    plane: PixelPlane,
}

impl IconSheet {
    /// Decodes an icon sheet from the bytes of a bitmap file.
    ///
    /// # Errors
    ///
    /// Any header, colour-table or pixel-data validation failure is
    /// returned as the corresponding [`Error`] variant; nothing is
    /// decoded past the first violation.
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        let header = SheetHeader::parse(data)?;
        let plane = PixelPlane::decode(data, &header)?;
        Ok(Self { header, plane })
    }

    /// Tries to read a [`Self`] from a provided file path.
    ///
    /// # Errors
    ///
    /// This function will error if the file cannot be read or contains
    /// invalid data. See [`Self::from_bytes`] for the validation errors.
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self> {
        let data = fs::read(&filename)
            .with_context(|| format!("read bitmap file {}", filename.as_ref().display()))?;
        debug!("read {} bytes from file", data.len());
        Ok(Self::from_bytes(&data)?)
    }

    /// Returns a reference to the [`SheetHeader`]
    #[must_use]
    pub const fn header(&self) -> &SheetHeader {
        &self.header
    }

    /// Returns a reference to the decoded [`PixelPlane`]
    #[must_use]
    pub const fn plane(&self) -> &PixelPlane {
        &self.plane
    }

    /// Returns the sheet width
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.header.width()
    }

    /// Returns the sheet height
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.header.height()
    }

    /// Locates the tight bounding box of every icon on the sheet, in
    /// row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoIconsFound`] if the sheet contains no
    /// foreground pixels at all.
    pub fn find_icons(&self) -> Result<Vec<IconBox>, Error> {
        detect::find_icons(&self.plane)
    }

    /// Extracts every icon into its own raster, sized per `options`.
    ///
    /// # Errors
    ///
    /// See [`Self::find_icons`].
    pub fn extract_icons(&self, options: &ExtractOptions) -> Result<Vec<IconRaster>, Error> {
        let icons = self.find_icons()?;
        Ok(self.compose_all(&icons, options))
    }

    /// Writes one extracted icon to `sink` as a complete, standalone
    /// bitmap file and returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Fails on sink errors, or with [`Error::OutputSizeMismatch`] if the
    /// sink does not end up exactly as long as calculated.
    pub fn write_icon(&self, icon: &IconRaster, sink: &mut (impl Write + Seek)) -> Result<u64, Error> {
        let data_len = (icon.padded_row_bytes() * icon.height() as usize) as u32;
        let header = self.header.derived(icon.width(), icon.height(), data_len);
        writer::write_icon(&header, icon, sink)
    }

    /// Extracts every icon and writes each to `output_dir` as `<n>.bmp`,
    /// numbered row-major. Returns the written paths, in icon order.
    ///
    /// # Errors
    ///
    /// This will error if no icons are found, or if any icon file cannot
    /// be created or written; a per-icon failure aborts the whole run.
    pub fn write_icons<P: AsRef<Path>>(
        &self,
        output_dir: P,
        options: &ExtractOptions,
    ) -> Result<Vec<PathBuf>> {
        let icons = self.find_icons()?;
        let rasters = self.compose_all(&icons, options);
        // enough leading zeroes that the lowest numbers are the same
        // length as the highest
        let digits = rasters.len().to_string().len();

        let mut written = Vec::with_capacity(rasters.len());
        for (number, raster) in rasters.iter().enumerate() {
            let path = output_dir.as_ref().join(format!("{number:0digits$}.bmp"));
            let file = File::options()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .with_context(|| format!("create icon file {}", path.display()))?;
            let mut file = BufWriter::new(file);
            let size = self
                .write_icon(raster, &mut file)
                .with_context(|| format!("write icon file {}", path.display()))?;
            debug!("wrote {size} bytes to {}", path.display());
            written.push(path);
        }
        info!("Finished writing {} icon files", written.len());
        Ok(written)
    }

    fn compose_all(&self, icons: &[IconBox], options: &ExtractOptions) -> Vec<IconRaster> {
        let uniform = options.uniform_size.then(|| {
            (
                icons.iter().map(IconBox::width).max().unwrap_or(0),
                icons.iter().map(IconBox::height).max().unwrap_or(0),
            )
        });
        icons
            .iter()
            .map(|&icon| compose(&self.plane, icon, Placement::new(icon, options, uniform)))
            .collect()
    }
}

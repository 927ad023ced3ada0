use tracing::debug;

use super::header::SheetHeader;
use crate::error::Error;

/// Unpadded, top-to-bottom, polarity-normalized 1-bit raster of the sheet
///
/// Built once from the file's bottom-up, 4-byte-padded representation and
/// read-only from then on. After normalization a bit value of 0 is always
/// foreground (ink) and 1 is background, whichever colour the source
/// palette put first; any bits past the true width in the last byte of a
/// row are forced to background so edge scans never see phantom ink.
#[derive(Debug, Eq, PartialEq)]
pub struct PixelPlane {
    width: u32,
    height: u32,
    row_bytes: usize,
    bits: Vec<u8>,
}

impl PixelPlane {
    /// Decodes the pixel data of `data` into a [`PixelPlane`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedRow`] if any row slice reaches past the
    /// end of the file.
    pub fn decode(data: &[u8], header: &SheetHeader) -> Result<Self, Error> {
        let width = header.width();
        let height = header.height();
        let row_bytes = (width as usize).div_ceil(8);
        // rows in the file are padded to a multiple of 4 bytes
        let stride = row_bytes.next_multiple_of(4);
        debug!("one row is {row_bytes} bytes of pixels, {stride} bytes with padding");

        let data_offset = header.data_offset() as usize;
        // the top plane row sits highest in the file; if it fits, every
        // row below it fits too
        let needed =
            data_offset as u64 + stride as u64 * u64::from(height) - (stride - row_bytes) as u64;
        if needed > data.len() as u64 {
            return Err(Error::TruncatedRow { row: 0 });
        }

        let mut bits = vec![0; row_bytes * height as usize];
        for row in 0..height as usize {
            // file rows run bottom-up; plane rows run top-down
            let start = data_offset + stride * (height as usize - row - 1);
            let Some(source) = data.get(start..start + row_bytes) else {
                return Err(Error::TruncatedRow { row: row as u32 });
            };
            bits[row * row_bytes..(row + 1) * row_bytes].copy_from_slice(source);
        }

        if header.is_inverted() {
            for byte in &mut bits {
                *byte = !*byte;
            }
        }

        // force padding bits past the true width to background
        if width % 8 != 0 {
            let mask = (1u8 << (8 - width % 8)) - 1;
            for row in 0..height as usize {
                bits[(row + 1) * row_bytes - 1] |= mask;
            }
        }

        Ok(Self {
            width,
            height,
            row_bytes,
            bits,
        })
    }

    /// Returns the width of the sheet in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the sheet in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at (`row`, `col`) is ink
    #[must_use]
    pub fn is_foreground(&self, row: u32, col: u32) -> bool {
        let byte = self.bits[row as usize * self.row_bytes + (col / 8) as usize];
        (!byte >> (7 - col % 8)) & 1 != 0
    }

    // one unpadded row of normalized pixel bytes
    pub(crate) fn row(&self, row: u32) -> &[u8] {
        let start = row as usize * self.row_bytes;
        &self.bits[start..start + self.row_bytes]
    }

    pub(crate) fn row_has_ink(&self, row: u32) -> bool {
        // padding bits were forced to background, so any byte below 0xFF
        // means at least one foreground pixel
        self.row(row).iter().any(|&byte| byte != 0xFF)
    }

    pub(crate) fn col_has_ink(&self, col: u32) -> bool {
        (0..self.height).any(|row| self.is_foreground(row, col))
    }
}

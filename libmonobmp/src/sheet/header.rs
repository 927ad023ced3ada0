use strum::{FromRepr, IntoStaticStr};
use tracing::{debug, info};

use crate::error::Error;

/// Length of the fixed bitmap file header preceding the info header
pub(crate) const FILE_HEADER_LEN: u64 = 14;
/// Smallest possible file: 14-byte file header + 40-byte info header
pub(crate) const MIN_HEADER_LEN: usize = 54;
const MAGIC: [u8; 2] = *b"BM";
const COLOUR_TABLE_LEN: i64 = 8;

/// Compression methods a bitmap info header can declare
///
/// Only the absence of compression is supported; recognised codes are
/// modelled so that rejections can name the method.
#[derive(FromRepr, IntoStaticStr, Debug, Eq, PartialEq, Copy, Clone)]
#[repr(u32)]
pub enum Compression {
    /// BI_RLE8
    Rle8 = 1,
    /// BI_RLE4
    Rle4 = 2,
    /// BI_BITFIELDS
    Bitfields = 3,
    /// BI_JPEG
    Jpeg = 4,
    /// BI_PNG
    Png = 5,
    /// BI_ALPHABITFIELDS
    AlphaBitfields = 6,
    /// BI_CMYK
    Cmyk = 11,
    /// BI_CMYKRLE8
    CmykRle8 = 12,
    /// BI_CMYKRLE4
    CmykRle4 = 13,
}

impl Compression {
    /// Returns the method name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        Into::<&'static str>::into(self)
    }
}

/// Validated header of a monochrome icon-sheet bitmap
///
/// Holds the fields the extraction pipeline needs plus the raw header and
/// colour-table bytes, kept verbatim so that headers for the derived
/// per-icon files can be built from them.
///
/// ## Polarity
///
/// The colour table entry with the numerically smaller packed BGRA value
/// is treated as black. This is a heuristic, not a guaranteed polarity
/// detector for arbitrary two-colour palettes (a palette holding neither
/// pure black nor pure white still picks the darker-valued entry); it is
/// preserved from the tools this library replaces. Entries comparing
/// equal count as inverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetHeader {
    data_offset: u32,
    info_header_len: u32,
    width: u32,
    height: u32,
    colour_table: [u32; 2],
    inverted: bool,
    /// file bytes `[0, data_offset)`, exactly as read
    prefix: Vec<u8>,
}

impl SheetHeader {
    /// Parses and validates the file header, info header and colour table
    /// of a 1-bit-per-pixel uncompressed Windows bitmap.
    ///
    /// # Errors
    ///
    /// Each violated constraint maps to its own [`Error`] variant; the
    /// first violation wins and nothing is decoded past it.
    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        if data.len() < MIN_HEADER_LEN {
            return Err(Error::HeaderTooSmall { len: data.len() });
        }
        let magic = [data[0], data[1]];
        if magic != MAGIC {
            return Err(Error::NotABitmap { magic });
        }
        let declared_size = read_u32(data, 2);
        if declared_size as usize != data.len() {
            return Err(Error::FileSizeMismatch {
                declared: declared_size,
                actual: data.len(),
            });
        }
        let data_offset = read_u32(data, 10);
        if data_offset as usize >= data.len() {
            return Err(Error::OffsetOutOfRange {
                offset: data_offset,
                file_size: data.len(),
            });
        }
        debug!("pixel data begins at byte {data_offset}");

        let info_header_len = read_u32(data, 14);
        let width = read_u32(data, 18);
        let height = read_u32(data, 22);
        debug!("info header is {info_header_len} bytes, image is {width}x{height} pixels");
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }
        let planes = read_u16(data, 26);
        if planes != 1 {
            return Err(Error::UnsupportedPlanes(planes));
        }
        let depth = read_u16(data, 28);
        if depth != 1 {
            return Err(Error::UnsupportedDepth(depth));
        }
        let compression = read_u32(data, 30);
        if compression != 0 {
            return Err(match Compression::from_repr(compression) {
                Some(method) => Error::UnsupportedCompression {
                    method: method.as_str(),
                    code: compression,
                },
                None => Error::UnrecognisedCompression(compression),
            });
        }
        let data_len = read_u32(data, 34);
        let data_end = u64::from(data_offset) + u64::from(data_len);
        if data_end > data.len() as u64 {
            return Err(Error::DataOverrun {
                data_end,
                file_size: data.len(),
            });
        }
        debug!(
            "pixel data is {data_len} bytes, {} bytes of file remain after it",
            data.len() as u64 - data_end
        );
        let palette_len = read_u32(data, 46);
        if palette_len != 2 {
            return Err(Error::UnsupportedPalette(palette_len));
        }

        // the optional bitfield masks sit between the info header and the
        // colour table, so the table position must be computed, not assumed
        let colour_table_offset = FILE_HEADER_LEN + u64::from(info_header_len);
        let colour_table_len = i64::from(data_offset) - colour_table_offset as i64;
        if colour_table_len != COLOUR_TABLE_LEN {
            return Err(Error::BadColourTable {
                len: colour_table_len,
                offset: colour_table_offset,
            });
        }
        let colour_table = [
            read_u32(data, colour_table_offset as usize),
            read_u32(data, colour_table_offset as usize + 4),
        ];
        // Monochrome palettes might not be black and white, so the lower
        // packed value is taken as black.
        let inverted = colour_table[0] >= colour_table[1];
        if inverted {
            info!("colour table maps bit 0 to white and bit 1 to black, raster will be inverted");
        } else {
            info!("colour table maps bit 0 to black and bit 1 to white");
        }

        Ok(Self {
            data_offset,
            info_header_len,
            width,
            height,
            colour_table,
            inverted,
            prefix: data[..data_offset as usize].to_vec(),
        })
    }

    /// Returns the image width in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the offset at which pixel data begins
    #[must_use]
    pub const fn data_offset(&self) -> u32 {
        self.data_offset
    }

    /// Returns the two packed BGRA colour table entries, in file order
    #[must_use]
    pub const fn colour_table(&self) -> [u32; 2] {
        self.colour_table
    }

    /// Whether the raster bits must be complemented so that 0 reads as black
    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Builds the header + colour-table bytes for a derived sub-image.
    ///
    /// The original bytes are kept verbatim and only the file size, the
    /// dimensions and the pixel-data length are rewritten. When the source
    /// required inversion the two colour-table entries swap places, so the
    /// derived file stays visually consistent with the normalized bits
    /// that get written for it.
    pub(crate) fn derived(&self, width: u32, height: u32, data_len: u32) -> Vec<u8> {
        let mut header = self.prefix.clone();
        write_u32(&mut header, 2, self.data_offset + data_len);
        write_u32(&mut header, 18, width);
        write_u32(&mut header, 22, height);
        write_u32(&mut header, 34, data_len);
        if self.inverted {
            let table_at = (FILE_HEADER_LEN + u64::from(self.info_header_len)) as usize;
            let (first, second) = header[table_at..table_at + 8].split_at_mut(4);
            first.swap_with_slice(second);
        }
        header
    }
}

fn read_u16(data: &[u8], at: usize) -> u16 {
    let mut raw = [0; 2];
    raw.copy_from_slice(&data[at..at + 2]);
    u16::from_le_bytes(raw)
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    let mut raw = [0; 4];
    raw.copy_from_slice(&data[at..at + 4]);
    u32::from_le_bytes(raw)
}

fn write_u32(data: &mut [u8], at: usize, value: u32) {
    data[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

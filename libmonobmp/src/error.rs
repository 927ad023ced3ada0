use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
/// Possible `libmonobmp` errors
///
/// Every header and geometry check failure is fatal for the whole run and
/// maps to exactly one variant here, carrying the offending value, the
/// expected value, and byte offsets where they help diagnosis.
pub enum Error {
    /// The file is smaller than the fixed file header + info header
    #[error("file is too small to contain the required bitmap headers, got {len} bytes but need at least 54")]
    HeaderTooSmall {
        /// actual file length
        len: usize,
    },
    /// The first two bytes are not the ASCII pair `BM`
    #[error("not a Windows bitmap file, expected identifier 'BM' (0x42 0x4D) as the first two bytes but got {magic:02X?}")]
    NotABitmap {
        /// the two bytes found instead
        magic: [u8; 2],
    },
    /// The size recorded within the file disagrees with the buffer length
    #[error("size declared within the file is {declared} bytes but the actual size is {actual} bytes")]
    FileSizeMismatch {
        /// size field at byte offset 2
        declared: u32,
        /// measured length of the input
        actual: usize,
    },
    /// The pixel-data offset points past the end of the file
    #[error("pixel data offset {offset} lies beyond the end of the file ({file_size} bytes)")]
    OffsetOutOfRange {
        /// offset field at byte offset 10
        offset: u32,
        /// measured length of the input
        file_size: usize,
    },
    /// Width or height is zero
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage {
        /// declared width in pixels
        width: u32,
        /// declared height in pixels
        height: u32,
    },
    /// The colour-plane count is not 1
    #[error("number of colour planes must be 1, got {0}")]
    UnsupportedPlanes(u16),
    /// The bit depth is not 1 bit per pixel
    #[error("bit depth must be 1 bit per pixel, got {0}")]
    UnsupportedDepth(u16),
    /// The image data is compressed with a recognised method
    #[error("image data is compressed ({method}, method code {code}), only uncompressed data is supported")]
    UnsupportedCompression {
        /// name of the recognised compression method
        method: &'static str,
        /// compression field at byte offset 30
        code: u32,
    },
    /// The compression field holds a code this library does not recognise
    #[error("compression method code {0} is not recognised")]
    UnrecognisedCompression(u32),
    /// Offset plus declared pixel-data length overshoots the file
    #[error("pixel data is calculated to overshoot the end of the file, data ends at byte {data_end} but the file is {file_size} bytes")]
    DataOverrun {
        /// pixel-data offset plus declared pixel-data length
        data_end: u64,
        /// measured length of the input
        file_size: usize,
    },
    /// The palette colour count is not 2
    #[error("number of colours in the palette must be 2, got {0}")]
    UnsupportedPalette(u32),
    /// The colour table is not exactly two 4-byte entries
    #[error("colour table length should be 8 bytes, instead it is {len} bytes at offset {offset}")]
    BadColourTable {
        /// pixel-data offset minus colour-table offset
        len: i64,
        /// 14 + info-header length
        offset: u64,
    },
    /// A pixel row could not be read in full
    #[error("unable to read a full row of pixel data from the file, failed on image row {row}")]
    TruncatedRow {
        /// top-down row index of the short read
        row: u32,
    },
    /// The coarse scan found no row containing foreground pixels
    #[error("no icon rows found in bitmap image")]
    NoIconsFound,
    /// A written icon file does not have the size calculated for it
    #[error("icon file size check failed, calculated {calculated} bytes but measured {actual} bytes after writing")]
    OutputSizeMismatch {
        /// data offset plus height times padded row stride
        calculated: u64,
        /// sink length measured after the write
        actual: u64,
    },
    /// Error returned when writing to an output sink fails
    #[error("i/o error")]
    Io(#[from] std::io::Error),
}

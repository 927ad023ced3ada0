use tracing::instrument;

use super::{detect::IconBox, plane::PixelPlane, ExtractOptions};

/// Destination raster for one extracted icon
///
/// Rows are stored top-down without padding bytes, in the same normalized
/// polarity as [`PixelPlane`]: 0 is ink, 1 is background.
#[derive(Debug, Eq, PartialEq)]
pub struct IconRaster {
    width: u32,
    height: u32,
    row_bytes: usize,
    bytes: Vec<u8>,
}

impl IconRaster {
    // Starts all-zero. Margins and row padding are raised to background
    // explicitly; the content copy only ever ORs bits in.
    fn blank(width: u32, height: u32) -> Self {
        let row_bytes = (width as usize).div_ceil(8);
        Self {
            width,
            height,
            row_bytes,
            bytes: vec![0; row_bytes * height as usize],
        }
    }

    /// Width of the icon in pixels, margins included
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the icon in pixels, margins included
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at (`row`, `col`) is ink
    #[must_use]
    pub fn is_foreground(&self, row: u32, col: u32) -> bool {
        let byte = self.bytes[row as usize * self.row_bytes + (col / 8) as usize];
        (!byte >> (7 - col % 8)) & 1 != 0
    }

    pub(crate) fn row(&self, row: u32) -> &[u8] {
        let start = row as usize * self.row_bytes;
        &self.bytes[start..start + self.row_bytes]
    }

    pub(crate) const fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    pub(crate) fn padded_row_bytes(&self) -> usize {
        self.row_bytes.next_multiple_of(4)
    }

    // set the bits [start, end) of `row` to background
    fn set_run(&mut self, row: u32, start: u32, end: u32) {
        let mut col = start;
        while col < end {
            let lead = col % 8;
            let take = (8 - lead).min(end - col);
            let mask = (0xFFu16 >> lead) as u8 & !((0xFFu16 >> (lead + take)) as u8);
            self.bytes[row as usize * self.row_bytes + (col / 8) as usize] |= mask;
            col += take;
        }
    }
}

/// Destination geometry of one icon: overall dimensions plus the
/// background border on each side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Placement {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) pad_top: u32,
    pub(crate) pad_bottom: u32,
    pub(crate) pad_left: u32,
    pub(crate) pad_right: u32,
}

impl Placement {
    /// Computes the destination geometry for `icon`. In uniform mode the
    /// content area is the size of the largest discovered icon and any
    /// surplus is split with the larger half on the top/left, keeping the
    /// content as centred as integer arithmetic allows.
    pub(crate) fn new(icon: IconBox, options: &ExtractOptions, uniform: Option<(u32, u32)>) -> Self {
        let (content_width, content_height) = uniform.unwrap_or((icon.width(), icon.height()));
        let surplus_w = content_width - icon.width();
        let surplus_h = content_height - icon.height();
        Self {
            width: content_width + 2 * options.horizontal_margin,
            height: content_height + 2 * options.vertical_margin,
            pad_top: options.vertical_margin + surplus_h.div_ceil(2),
            pad_bottom: options.vertical_margin + surplus_h / 2,
            pad_left: options.horizontal_margin + surplus_w.div_ceil(2),
            pad_right: options.horizontal_margin + surplus_w / 2,
        }
    }
}

/// Copies the pixels inside `icon` out of the sheet into a fresh raster
/// described by `placement`.
#[instrument(skip(plane), level = "trace")]
pub(crate) fn compose(plane: &PixelPlane, icon: IconBox, placement: Placement) -> IconRaster {
    let mut raster = IconRaster::blank(placement.width, placement.height);
    // runs through the last byte of a row also raise its padding bits
    let row_bits = (raster.row_bytes * 8) as u32;

    for row in 0..placement.pad_top {
        raster.set_run(row, 0, row_bits);
    }
    for row in placement.pad_top + icon.height()..placement.height {
        raster.set_run(row, 0, row_bits);
    }
    for row in placement.pad_top..placement.pad_top + icon.height() {
        raster.set_run(row, 0, placement.pad_left);
        raster.set_run(row, placement.width - placement.pad_right, row_bits);
    }

    for (offset, source_row) in (icon.top..=icon.bottom).enumerate() {
        blit_row(
            plane,
            source_row,
            icon.left,
            &mut raster,
            placement.pad_top + offset as u32,
            placement.pad_left,
            icon.width(),
        );
    }
    raster
}

// Transplants `width` pixels of one row. Neither the source column nor
// the destination column needs to be byte-aligned, and their bit phases
// may differ, so the transfer walks both sides with a byte cursor and a
// bit cursor each and moves the widest chunk that fits all three limits:
// bits left in the source byte, bits left in the destination byte, bits
// left in the row.
fn blit_row(
    source: &PixelPlane,
    source_row: u32,
    source_left: u32,
    raster: &mut IconRaster,
    raster_row: u32,
    raster_left: u32,
    width: u32,
) {
    let source_bytes = source.row(source_row);
    let row_start = raster_row as usize * raster.row_bytes;
    let mut source_col = source_left;
    let mut raster_col = raster_left;
    let mut source_index = (source_left / 8) as usize;
    let mut raster_index = row_start + (raster_left / 8) as usize;
    let mut remaining = width;

    while remaining > 0 {
        let source_bit = source_col % 8;
        let raster_bit = raster_col % 8;
        let take = (8 - source_bit).min(8 - raster_bit).min(remaining);

        // exactly the bits [source_bit, source_bit + take), leading and
        // trailing neighbours masked off
        let mask = (0xFFu16 >> source_bit) as u8 & !((0xFFu16 >> (source_bit + take)) as u8);
        let chunk = source_bytes[source_index] & mask;
        // shift right when the destination phase lags the source, left
        // when it leads; the shift count is never negative
        let aligned = if raster_bit >= source_bit {
            chunk >> (raster_bit - source_bit)
        } else {
            chunk << (source_bit - raster_bit)
        };
        raster.bytes[raster_index] |= aligned;

        source_col += take;
        raster_col += take;
        remaining -= take;
        // a byte cursor only advances once its byte is fully consumed
        if source_col % 8 == 0 {
            source_index += 1;
        }
        if raster_col % 8 == 0 {
            raster_index += 1;
        }
    }
}

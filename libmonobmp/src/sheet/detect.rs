use itertools::Itertools;
use tracing::{debug, warn};

use super::plane::PixelPlane;
use crate::error::Error;

/// A maximal contiguous run of sheet rows (or columns) containing ink,
/// as a closed `[start, end]` interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// first active row/column
    pub start: u32,
    /// last active row/column
    pub end: u32,
}

/// Tight bounding box of one icon, all coordinates inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconBox {
    /// topmost row containing ink
    pub top: u32,
    /// bottommost row containing ink
    pub bottom: u32,
    /// leftmost column containing ink
    pub left: u32,
    /// rightmost column containing ink
    pub right: u32,
}

impl IconBox {
    /// Width of the box in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    /// Height of the box in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

/// Locates every icon on the sheet.
///
/// Pass 1 finds the coarse row and column bands that contain any ink at
/// all; pass 2 refines each band intersection into a tight box. Cells of
/// the band grid without any ink (an incomplete trailing row or column of
/// icons) are reported and dropped. Boxes are emitted row-major, which
/// fixes the icon numbering.
pub(crate) fn find_icons(plane: &PixelPlane) -> Result<Vec<IconBox>, Error> {
    let row_bands = scan_bands(0..plane.height(), |row| plane.row_has_ink(row));
    if row_bands.is_empty() {
        return Err(Error::NoIconsFound);
    }
    let col_bands = scan_bands(0..plane.width(), |col| plane.col_has_ink(col));
    debug!(
        "{} rows and {} columns of icons detected",
        row_bands.len(),
        col_bands.len()
    );

    let mut icons = Vec::new();
    for rows in &row_bands {
        for cols in &col_bands {
            match refine(plane, *rows, *cols) {
                Some(icon) => icons.push(icon),
                None => warn!(
                    top = rows.start,
                    bottom = rows.end,
                    left = cols.start,
                    right = cols.end,
                    "unable to find any pixels within row/column bounds, skipping grid cell"
                ),
            }
        }
    }
    debug!("{} icons found", icons.len());
    Ok(icons)
}

// maximal runs of active indices over `range`
fn scan_bands<F>(range: std::ops::Range<u32>, is_active: F) -> Vec<Band>
where
    F: Fn(u32) -> bool,
{
    let runs = range.group_by(|&index| is_active(index));
    runs.into_iter()
        .filter_map(|(active, run)| {
            let (start, end) = run.minmax().into_option()?;
            active.then_some(Band { start, end })
        })
        .collect()
}

// Icons need not be centred within their grid cell, so each edge is
// searched independently inside the band intersection.
fn refine(plane: &PixelPlane, rows: Band, cols: Band) -> Option<IconBox> {
    let top = top_edge(plane, rows, cols)?;
    let bottom = bottom_edge(plane, rows, cols)?;
    let left = left_edge(plane, rows, cols)?;
    let right = right_edge(plane, rows, cols)?;
    Some(IconBox {
        top,
        bottom,
        left,
        right,
    })
}

fn top_edge(plane: &PixelPlane, rows: Band, cols: Band) -> Option<u32> {
    (rows.start..=rows.end).find(|&row| (cols.start..=cols.end).any(|col| plane.is_foreground(row, col)))
}

fn bottom_edge(plane: &PixelPlane, rows: Band, cols: Band) -> Option<u32> {
    (rows.start..=rows.end)
        .rev()
        .find(|&row| (cols.start..=cols.end).any(|col| plane.is_foreground(row, col)))
}

fn left_edge(plane: &PixelPlane, rows: Band, cols: Band) -> Option<u32> {
    (cols.start..=cols.end).find(|&col| (rows.start..=rows.end).any(|row| plane.is_foreground(row, col)))
}

fn right_edge(plane: &PixelPlane, rows: Band, cols: Band) -> Option<u32> {
    (cols.start..=cols.end)
        .rev()
        .find(|&col| (rows.start..=rows.end).any(|row| plane.is_foreground(row, col)))
}

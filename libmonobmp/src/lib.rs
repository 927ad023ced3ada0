//! # libmonobmp
//!
//! This library reads monochrome (1-bit-per-pixel) Windows bitmap files
//! containing a grid of icons or glyphs, locates every icon by detecting
//! contiguous runs of foreground pixels, and re-encodes each one as its
//! own standalone, valid bitmap file. Icons can be padded with
//! configurable margins and, optionally, all padded to the dimensions of
//! the largest icon on the sheet.
//!
//! The decoded sheet is held as an unpadded top-down raster with the
//! polarity normalized so that a bit value of 0 always means ink. Each
//! extracted icon is rebuilt bit-by-bit, which keeps the copy correct
//! even when the icon's edges fall in the middle of a byte.
//!
//! ### Limitations
//!
//! Only uncompressed, 1-bit-per-pixel bitmaps with a two-entry colour
//! table are accepted; anything else is rejected with a specific error.
//!
//! Which palette entry counts as "black" is decided by comparing the two
//! packed BGRA values and taking the smaller one. For palettes that hold
//! neither pure black nor pure white this is an approximation, kept for
//! compatibility with the tools this library replaces; see
//! [`sheet::SheetHeader`].
//!
//! ### Usage
//!
//! ```no_run
//! use libmonobmp::{ExtractOptions, IconSheet};
//!
//! fn main() -> anyhow::Result<()> {
//!     let sheet = IconSheet::from_file("iconarray.bmp")?;
//!     let options = ExtractOptions::builder()
//!         .uniform_size(true)
//!         .horizontal_margin(2)
//!         .vertical_margin(2)
//!         .build();
//!
//!     let written = sheet.write_icons("icons", &options)?;
//!     println!("wrote {} icon files", written.len());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

mod error;
/// Module containing types for monochrome bitmap icon sheets
pub mod sheet;

pub use error::Error;
pub use sheet::ExtractOptions;
pub use sheet::IconBox;
pub use sheet::IconRaster;
pub use sheet::IconSheet;

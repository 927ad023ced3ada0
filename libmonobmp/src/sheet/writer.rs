use std::io::{Seek, SeekFrom, Write};

use tracing::trace;

use super::compose::IconRaster;
use crate::error::Error;

/// Serializes one icon as a complete bitmap file: the derived header and
/// colour table, then the raster rows bottom-up, each padded to a 4-byte
/// stride with background bytes.
///
/// After writing, the sink length is measured again and compared against
/// the calculated size; a mismatch fails the whole run.
pub(crate) fn write_icon(
    header: &[u8],
    raster: &IconRaster,
    sink: &mut (impl Write + Seek),
) -> Result<u64, Error> {
    let row_bytes = raster.row_bytes();
    let padded = raster.padded_row_bytes();
    let padding = [0xFF; 3];

    sink.write_all(header)?;
    // undo the top-down internal order, bitmap files store rows bottom-up
    for row in (0..raster.height()).rev() {
        sink.write_all(raster.row(row))?;
        sink.write_all(&padding[..padded - row_bytes])?;
    }
    sink.flush()?;

    let calculated = header.len() as u64 + u64::from(raster.height()) * padded as u64;
    let actual = sink.seek(SeekFrom::End(0))?;
    trace!("icon file calculated as {calculated} bytes, measured {actual} bytes");
    if actual != calculated {
        return Err(Error::OutputSizeMismatch { calculated, actual });
    }
    Ok(actual)
}

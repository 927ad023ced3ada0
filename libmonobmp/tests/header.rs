mod common;
use common::{write_u32, SheetBuilder};
use libmonobmp::{Error, IconSheet};

fn sheet_bytes() -> Vec<u8> {
    SheetBuilder::new(16, 16).rect(2, 2, 3, 3).build()
}

#[test]
fn accepts_valid_sheet() {
    let sheet = IconSheet::from_bytes(&sheet_bytes()).unwrap();
    assert_eq!(sheet.width(), 16);
    assert_eq!(sheet.height(), 16);
    assert_eq!(sheet.header().data_offset(), 62);
    assert!(!sheet.header().is_inverted());
}

#[test]
fn detects_swapped_palette() {
    let data = SheetBuilder::new(16, 16)
        .rect(2, 2, 3, 3)
        .swapped_palette()
        .build();
    let sheet = IconSheet::from_bytes(&data).unwrap();
    assert!(sheet.header().is_inverted());
}

#[test]
fn rejects_short_file() {
    let err = IconSheet::from_bytes(&sheet_bytes()[..40]).unwrap_err();
    assert!(matches!(err, Error::HeaderTooSmall { len: 40 }));
}

#[test]
fn rejects_bad_magic() {
    let mut data = sheet_bytes();
    data[0] = b'P';
    let err = IconSheet::from_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::NotABitmap { magic: [b'P', b'M'] }));
}

#[test]
fn rejects_wrong_declared_size() {
    let mut data = sheet_bytes();
    let actual = data.len();
    write_u32(&mut data, 2, actual as u32 + 4);
    let err = IconSheet::from_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::FileSizeMismatch { declared, actual: a } if declared as usize == actual + 4 && a == actual));
}

#[test]
fn rejects_offset_beyond_file() {
    let mut data = sheet_bytes();
    let len = data.len() as u32;
    write_u32(&mut data, 10, len);
    let err = IconSheet::from_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::OffsetOutOfRange { offset, .. } if offset == len));
}

#[test]
fn rejects_zero_dimensions() {
    let mut data = sheet_bytes();
    write_u32(&mut data, 18, 0);
    let err = IconSheet::from_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::EmptyImage { width: 0, height: 16 }));
}

#[test]
fn rejects_multiple_colour_planes() {
    let mut data = sheet_bytes();
    data[26..28].copy_from_slice(&2u16.to_le_bytes());
    let err = IconSheet::from_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::UnsupportedPlanes(2)));
}

#[test]
fn rejects_deeper_pixels() {
    let mut data = sheet_bytes();
    data[28..30].copy_from_slice(&8u16.to_le_bytes());
    let err = IconSheet::from_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::UnsupportedDepth(8)));
}

#[test]
fn rejects_recognised_compression_by_name() {
    let mut data = sheet_bytes();
    write_u32(&mut data, 30, 2);
    let err = IconSheet::from_bytes(&data).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedCompression {
            method: "Rle4",
            code: 2
        }
    ));
}

#[test]
fn rejects_unrecognised_compression() {
    let mut data = sheet_bytes();
    write_u32(&mut data, 30, 7);
    let err = IconSheet::from_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::UnrecognisedCompression(7)));
}

#[test]
fn rejects_data_overrun() {
    let mut data = sheet_bytes();
    write_u32(&mut data, 34, 4096);
    let err = IconSheet::from_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::DataOverrun { data_end: 4158, .. }));
}

#[test]
fn rejects_wrong_palette_count() {
    let mut data = sheet_bytes();
    write_u32(&mut data, 46, 16);
    let err = IconSheet::from_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::UnsupportedPalette(16)));
}

#[test]
fn rejects_bad_colour_table_length() {
    let mut data = sheet_bytes();
    // shrinking the declared info header stretches the implied colour table
    write_u32(&mut data, 14, 36);
    let err = IconSheet::from_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::BadColourTable { len: 12, offset: 50 }));
}

#[test]
fn rejects_truncated_pixel_rows() {
    let mut data = sheet_bytes();
    // drop the last two file rows but keep the size fields consistent,
    // so only the row reads can notice
    let stride = 4usize;
    data.truncate(data.len() - 2 * stride);
    let new_len = data.len() as u32;
    write_u32(&mut data, 2, new_len);
    write_u32(&mut data, 34, (16 * stride - 2 * stride) as u32);
    let err = IconSheet::from_bytes(&data).unwrap_err();
    // the top plane row sits highest in the file, so it fails first
    assert!(matches!(err, Error::TruncatedRow { row: 0 }));
}

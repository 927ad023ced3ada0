use std::{fs, io::Cursor};

mod common;
use common::{read_u32, SheetBuilder};
use libmonobmp::{Error, ExtractOptions, IconBox, IconSheet};
use mktemp::Temp;

#[test]
fn finds_single_rectangle_tight_box() -> anyhow::Result<()> {
    // edges on and off byte boundaries
    for (top, left, height, width) in [(0, 0, 4, 4), (2, 5, 3, 7), (9, 7, 1, 1), (4, 3, 5, 9), (0, 9, 7, 7)] {
        let data = SheetBuilder::new(16, 16).rect(top, left, height, width).build();
        let icons = IconSheet::from_bytes(&data)?.find_icons()?;
        assert_eq!(
            icons,
            vec![IconBox {
                top,
                bottom: top + height - 1,
                left,
                right: left + width - 1,
            }],
            "rectangle at ({top},{left}) size {height}x{width}"
        );
    }
    Ok(())
}

#[test]
fn blank_sheet_has_no_icons() {
    let data = SheetBuilder::new(16, 16).build();
    let err = IconSheet::from_bytes(&data).unwrap().find_icons().unwrap_err();
    assert!(matches!(err, Error::NoIconsFound));
}

#[test]
fn two_squares_become_two_standalone_files() -> anyhow::Result<()> {
    let data = SheetBuilder::new(16, 16)
        .rect(2, 2, 3, 3)
        .rect(10, 10, 3, 3)
        .build();
    let sheet = IconSheet::from_bytes(&data)?;
    let icons = sheet.find_icons()?;
    assert_eq!(
        icons,
        vec![
            IconBox { top: 2, bottom: 4, left: 2, right: 4 },
            IconBox { top: 10, bottom: 12, left: 10, right: 12 },
        ]
    );

    let dir = Temp::new_dir()?;
    let written = sheet.write_icons(&dir, &ExtractOptions::default())?;
    assert_eq!(written, vec![dir.join("0.bmp"), dir.join("1.bmp")]);

    for path in &written {
        let bytes = fs::read(path)?;
        // each icon must decode again on its own
        let icon = IconSheet::from_bytes(&bytes)?;
        assert_eq!((icon.width(), icon.height()), (3, 3));
        for row in 0..3 {
            for col in 0..3 {
                assert!(icon.plane().is_foreground(row, col));
            }
        }
        // and an unrelated decoder must agree
        let img = image::load_from_memory(&bytes)?.to_luma8();
        assert_eq!(img.dimensions(), (3, 3));
        assert!(img.pixels().all(|pixel| pixel.0[0] == 0));
    }
    Ok(())
}

#[test]
fn polarity_of_the_source_does_not_matter() -> anyhow::Result<()> {
    let layout = |builder: SheetBuilder| builder.rect(1, 3, 4, 6).rect(9, 2, 5, 5);
    let normal = IconSheet::from_bytes(&layout(SheetBuilder::new(20, 16)).build())?;
    let twin = IconSheet::from_bytes(&layout(SheetBuilder::new(20, 16)).swapped_palette().build())?;

    assert_eq!(normal.find_icons()?, twin.find_icons()?);

    let options = ExtractOptions::default();
    let rasters = normal.extract_icons(&options)?;
    assert_eq!(rasters, twin.extract_icons(&options)?);

    // the derived colour-table swap makes even the emitted bytes converge
    for (ours, theirs) in rasters.iter().zip(twin.extract_icons(&options)?.iter()) {
        let mut a = Cursor::new(Vec::new());
        let mut b = Cursor::new(Vec::new());
        normal.write_icon(ours, &mut a)?;
        twin.write_icon(theirs, &mut b)?;
        assert_eq!(a.into_inner(), b.into_inner());
    }
    Ok(())
}

#[test]
fn uniform_sizing_recentres_without_changing_content() -> anyhow::Result<()> {
    let data = SheetBuilder::new(24, 16)
        .rect(2, 2, 5, 4)
        .rect(3, 14, 3, 6)
        .build();
    let sheet = IconSheet::from_bytes(&data)?;

    let options = ExtractOptions::builder()
        .uniform_size(true)
        .horizontal_margin(1)
        .vertical_margin(2)
        .build();
    let uniform = sheet.extract_icons(&options)?;
    assert_eq!(uniform.len(), 2);
    for raster in &uniform {
        assert_eq!((raster.width(), raster.height()), (6 + 2, 5 + 4));
    }

    // the second icon is 6x3; under uniform sizing it gains one extra
    // blank row above and one below on top of the margins
    let tight = sheet.extract_icons(&ExtractOptions::default())?;
    let (pad_top, pad_left) = (2 + 1, 1);
    for row in 0..3 {
        for col in 0..6 {
            assert_eq!(
                uniform[1].is_foreground(pad_top + row, pad_left + col),
                tight[1].is_foreground(row, col)
            );
        }
    }
    Ok(())
}

#[test]
fn margins_surround_the_icon_with_background() -> anyhow::Result<()> {
    let data = SheetBuilder::new(16, 16).rect(4, 4, 3, 3).build();
    let sheet = IconSheet::from_bytes(&data)?;
    let options = ExtractOptions::builder()
        .horizontal_margin(2)
        .vertical_margin(1)
        .build();
    let rasters = sheet.extract_icons(&options)?;
    assert_eq!(rasters.len(), 1);
    let raster = &rasters[0];
    assert_eq!((raster.width(), raster.height()), (7, 5));
    for row in 0..5 {
        for col in 0..7 {
            let inside = (1..4).contains(&row) && (2..5).contains(&col);
            assert_eq!(raster.is_foreground(row, col), inside, "pixel ({row},{col})");
        }
    }
    Ok(())
}

#[test]
fn incomplete_grid_cell_is_dropped_not_fatal() -> anyhow::Result<()> {
    let data = SheetBuilder::new(16, 16)
        .rect(2, 2, 3, 3)
        .rect(2, 10, 3, 3)
        .rect(10, 2, 3, 3)
        .build();
    let icons = IconSheet::from_bytes(&data)?.find_icons()?;
    assert_eq!(
        icons,
        vec![
            IconBox { top: 2, bottom: 4, left: 2, right: 4 },
            IconBox { top: 2, bottom: 4, left: 10, right: 12 },
            IconBox { top: 10, bottom: 12, left: 2, right: 4 },
        ]
    );
    Ok(())
}

#[test]
fn emitted_rows_are_padded_to_four_bytes_with_background() -> anyhow::Result<()> {
    let data = SheetBuilder::new(16, 16).rect(0, 0, 4, 10).build();
    let sheet = IconSheet::from_bytes(&data)?;
    let rasters = sheet.extract_icons(&ExtractOptions::default())?;

    let mut sink = Cursor::new(Vec::new());
    let size = sheet.write_icon(&rasters[0], &mut sink)?;
    let bytes = sink.into_inner();

    // 10 pixels need 2 bytes, padded to a 4-byte stride
    assert_eq!(size, 62 + 4 * 4);
    assert_eq!(bytes.len() as u64, size);
    assert_eq!(read_u32(&bytes, 2), 62 + 16);
    assert_eq!(read_u32(&bytes, 18), 10);
    assert_eq!(read_u32(&bytes, 22), 4);
    assert_eq!(read_u32(&bytes, 34), 16);
    for row in 0..4 {
        let at = 62 + row * 4;
        assert_eq!(bytes[at], 0x00);
        // bits past the true width and the stride padding are background
        assert_eq!(bytes[at + 1], 0x3F);
        assert_eq!(&bytes[at + 2..at + 4], &[0xFF, 0xFF]);
    }
    Ok(())
}

#[test]
fn icon_numbers_share_a_width() -> anyhow::Result<()> {
    let mut builder = SheetBuilder::new(40, 30);
    for row in [2, 12, 22] {
        for col in [2, 12, 22, 32] {
            builder = builder.rect(row, col, 2, 2);
        }
    }
    let sheet = IconSheet::from_bytes(&builder.build())?;

    let dir = Temp::new_dir()?;
    let written = sheet.write_icons(&dir, &ExtractOptions::default())?;
    assert_eq!(written.len(), 12);
    assert_eq!(written[0], dir.join("00.bmp"));
    assert_eq!(written[11], dir.join("11.bmp"));
    Ok(())
}

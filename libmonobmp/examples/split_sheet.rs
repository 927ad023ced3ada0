use anyhow::Result;
use libmonobmp::{ExtractOptions, IconSheet};

fn main() -> Result<()> {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "iconarray.bmp".into());

    let sheet = IconSheet::from_file(&input)?;
    let options = ExtractOptions::builder()
        .uniform_size(true)
        .horizontal_margin(2)
        .vertical_margin(2)
        .build();

    let written = sheet.write_icons(".", &options)?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

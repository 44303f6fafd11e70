use std::path::Path;

use mwdisplay_store::layout::{
    FIELD_COUNT,
    REGION_SIZE,
};
use mwdisplay_store::platform::MemoryRegion;
use mwdisplay_store::Store;

use crate::entry::FieldEntry;
use crate::error::Error;
use crate::EepromImage;

/// Bytes per row of [`hex_dump`].
pub const DUMP_ROW_SIZE: usize = 16;

fn check_size(data: &[u8]) -> Result<(), Error> {
    if data.len() != REGION_SIZE {
        return Err(Error::InvalidImageSize(data.len()));
    }
    Ok(())
}

/// Decode every field of an image, in region order.
pub(crate) fn parse_image_data(data: &[u8]) -> Result<EepromImage, Error> {
    check_size(data)?;
    let store = Store::new(0, MemoryRegion::from_bytes(data)?)?;

    let entries = store
        .raw_snapshot()
        .iter()
        .map(|(field, slot)| Ok(FieldEntry::new(field, slot?)?))
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(EepromImage { entries })
}

pub(crate) fn parse_image(path: impl AsRef<Path>) -> Result<EepromImage, Error> {
    let data = std::fs::read(path)?;
    parse_image_data(&data)
}

/// Write every entry on top of `base`, or on top of an erased region.
///
/// Fields without an entry and the reserved ranges keep the bytes of `base`.
pub(crate) fn generate_image_data(
    image: &EepromImage,
    base: Option<&[u8]>,
) -> Result<Vec<u8>, Error> {
    let region = match base {
        Some(base) => {
            check_size(base)?;
            MemoryRegion::from_bytes(base)?
        }
        None => MemoryRegion::new(),
    };

    let mut seen = [false; FIELD_COUNT];
    let mut store = Store::new(0, region)?;
    for entry in &image.entries {
        if std::mem::replace(&mut seen[entry.field as usize], true) {
            return Err(Error::DuplicateField(entry.field));
        }
        store.write_field(entry.field, entry.raw)?;
    }

    Ok(store.into_inner().as_bytes().to_vec())
}

/// Format an image as rows of [`DUMP_ROW_SIZE`] bytes, each prefixed with its `$` offset.
pub(crate) fn hex_dump(data: &[u8]) -> Result<String, Error> {
    check_size(data)?;

    let mut out = String::with_capacity(REGION_SIZE / DUMP_ROW_SIZE * 56);
    for (row, chunk) in data.chunks(DUMP_ROW_SIZE).enumerate() {
        let bytes: Vec<String> = chunk.iter().map(|byte| format!("{byte:02X}")).collect();
        out.push_str(&format!("${:04X}: {}\n", row * DUMP_ROW_SIZE, bytes.join(" ")));
    }
    Ok(out)
}

//! Parser, generator and hex dumper for MWDisplay EEPROM images.
//!
//! An image is the full 1 KiB region as read from or written to the
//! dashboard's EEPROM. Fields are decoded and encoded with the same table
//! the firmware uses, so an image generated here loads unchanged on the
//! device.

pub mod entry;
pub mod error;

mod csv;
mod image;

use std::io::Write;
use std::path::Path;

pub use entry::FieldEntry;
pub use error::Error;
pub use image::DUMP_ROW_SIZE;
pub use mwdisplay_store::layout::REGION_SIZE as IMAGE_SIZE;
use mwdisplay_store::Field;

/// The raw values of a set of fields.
///
/// This is the in-memory representation shared by the CSV and image
/// parsers/generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EepromImage {
    /// The ordered list of entries, at most one per field.
    pub entries: Vec<FieldEntry>,
}

impl EepromImage {
    /// The entry of `field`, if present.
    pub fn get(&self, field: Field) -> Option<&FieldEntry> {
        self.entries.iter().find(|entry| entry.field == field)
    }

    /// Parse CSV content from a string.
    ///
    /// The columns are `field,raw,value,unit`. A non-empty `value` is encoded
    /// and must lie inside the field's range, otherwise `raw` is used.
    pub fn from_csv(content: &str) -> Result<Self, Error> {
        csv::parser::parse_csv(content)
    }

    /// Parse a CSV file at the given `path`.
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(&path)?;
        csv::parser::parse_csv(&content)
    }

    /// Serialize this image to CSV and return the content as a `String`.
    pub fn to_csv(&self) -> Result<String, Error> {
        csv::writer::write_csv_content(self)
    }

    /// Serialize this image to a CSV file at the given `path`.
    pub fn to_csv_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        csv::writer::write_csv(self, path)
    }

    /// Generate an image in memory.
    ///
    /// Every entry is written on top of `base` if given, or on top of a
    /// factory-erased region. Bytes outside the listed fields, including the
    /// reserved ranges, are taken from the base unchanged.
    pub fn generate_image(&self, base: Option<&[u8]>) -> Result<Vec<u8>, Error> {
        image::generate_image_data(self, base)
    }

    /// Generate an image and write it to `path`.
    pub fn generate_image_file<P: AsRef<Path>>(
        &self,
        path: P,
        base: Option<&[u8]>,
    ) -> Result<(), Error> {
        let data = self.generate_image(base)?;
        std::fs::File::create(path)?.write_all(&data)?;
        Ok(())
    }

    /// Parse an image from an in-memory byte slice.
    pub fn parse_image(data: &[u8]) -> Result<Self, Error> {
        image::parse_image_data(data)
    }

    /// Parse an image file at the given `path`.
    pub fn parse_image_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        image::parse_image(path)
    }
}

/// Hex dump of an image, [`DUMP_ROW_SIZE`] bytes per row with `$` offsets.
pub fn hex_dump(data: &[u8]) -> Result<String, Error> {
    image::hex_dump(data)
}

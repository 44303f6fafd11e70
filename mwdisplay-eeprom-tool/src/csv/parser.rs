use std::str::FromStr;

use mwdisplay_store::Field;

use crate::entry::FieldEntry;
use crate::error::Error;
use crate::EepromImage;

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    field: String,
    #[serde(default)]
    raw: String,
    #[serde(default)]
    value: String,
    // informational only, the unit follows from the field
    #[serde(default)]
    #[allow(dead_code)]
    unit: String,
}

/// Parse CSV content from a string into an [`EepromImage`].
pub(crate) fn parse_csv(content: &str) -> Result<EepromImage, Error> {
    let mut image = EepromImage { entries: vec![] };
    let mut reader = csv::Reader::from_reader(content.as_bytes());

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let entry = parse_row(row)?;

        if image.get(entry.field).is_some() {
            return Err(Error::DuplicateField(entry.field));
        }
        image.entries.push(entry);
    }

    Ok(image)
}

fn parse_row(row: CsvRow) -> Result<FieldEntry, Error> {
    let field = Field::from_str(row.field.trim()).map_err(|_| Error::InvalidField(row.field))?;

    // the value column wins, so a hand-edited value needs no matching raw column
    if !row.value.trim().is_empty() {
        FieldEntry::from_value(field, &row.value)
    } else if !row.raw.trim().is_empty() {
        FieldEntry::from_raw_hex(field, &row.raw)
    } else {
        Err(Error::InvalidValue(format!(
            "{field}: either raw or value must be given"
        )))
    }
}

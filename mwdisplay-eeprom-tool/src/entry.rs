use std::str::FromStr;

use mwdisplay_store::codec::{
    self,
    Physical,
};
use mwdisplay_store::field::Encoding;
use mwdisplay_store::{
    Field,
    GearTeeth,
};

use crate::error::Error;

/// The raw stored value of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldEntry {
    pub field: Field,
    pub raw: u32,
}

impl FieldEntry {
    /// Checks that `raw` fits the width of `field`.
    pub fn new(field: Field, raw: u32) -> Result<Self, Error> {
        if !field.accepts(raw) {
            return Err(mwdisplay_store::error::Error::RawOutOfRange { field, raw }.into());
        }
        Ok(Self { field, raw })
    }

    /// Encodes a physical value as written in the CSV `value` column.
    ///
    /// Scalars are decimal numbers in the field's unit, gear teeth are four counts
    /// separated by `/`. A value outside the field's range is rejected instead of being
    /// saturated.
    pub fn from_value(field: Field, value: &str) -> Result<Self, Error> {
        let value = value.trim();
        let raw = match field.layout().encoding {
            Encoding::PackedTeeth => parse_teeth(value)?.to_raw(),
            _ => {
                let physical = f64::from_str(value)
                    .map_err(|e| Error::InvalidValue(format!("{field}: {value:?}: {e}")))?;
                codec::encode_scalar(field, physical)?.into_exact(field)?
            }
        };
        Ok(Self { field, raw })
    }

    /// Decodes a big-endian hex string of exactly the field's width.
    pub fn from_raw_hex(field: Field, raw: &str) -> Result<Self, Error> {
        let bytes = hex::decode(raw.trim())?;
        if bytes.len() != field.layout().width.bytes() {
            return Err(Error::InvalidValue(format!(
                "{field}: raw value {raw:?} must be {} bytes",
                field.layout().width.bytes()
            )));
        }
        let raw = bytes
            .iter()
            .fold(0u32, |acc, &byte| (acc << 8) | byte as u32);
        Self::new(field, raw)
    }

    /// Big-endian upper-case hex, as the bytes appear in the image.
    pub fn raw_hex(&self) -> String {
        let bytes = self.raw.to_be_bytes();
        hex::encode_upper(&bytes[4 - self.field.layout().width.bytes()..])
    }

    /// The physical value at the field's full decimal precision.
    pub fn value(&self) -> String {
        match codec::decode(self.field, self.raw) {
            Physical::Scalar(value) => format!("{:.*}", self.field.decimals(), value),
            Physical::Teeth(teeth) => format!(
                "{}/{}/{}/{}",
                teeth.primary_drive,
                teeth.primary_driven,
                teeth.secondary_drive,
                teeth.secondary_driven
            ),
        }
    }

    pub fn unit(&self) -> String {
        self.field.layout().unit.to_string()
    }
}

fn parse_teeth(value: &str) -> Result<GearTeeth, Error> {
    let counts = value
        .split('/')
        .map(|count| count.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| Error::InvalidValue(format!("gear teeth {value:?}: {e}")))?;

    match counts.as_slice() {
        &[p1, p2, s1, s2] => Ok(GearTeeth::new(p1, p2, s1, s2)),
        _ => Err(Error::InvalidValue(format!(
            "gear teeth {value:?}: expected four counts separated by '/'"
        ))),
    }
}

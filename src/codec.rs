//! Conversion between raw stored codes and physical values.
//!
//! Decoding is total over the field's raw range. Encoding rounds to the
//! nearest raw code, ties going to the larger code, and saturates at the
//! field's bounds instead of wrapping.

use crate::error::Error;
use crate::field::{Encoding, Field};

/// Tooth counts of the two-stage final drive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GearTeeth {
    pub primary_drive: u8,
    pub primary_driven: u8,
    pub secondary_drive: u8,
    pub secondary_driven: u8,
}

impl GearTeeth {
    pub const fn new(p1: u8, p2: u8, s1: u8, s2: u8) -> Self {
        Self {
            primary_drive: p1,
            primary_driven: p2,
            secondary_drive: s1,
            secondary_driven: s2,
        }
    }

    pub const fn from_raw(raw: u32) -> Self {
        let [p1, p2, s1, s2] = raw.to_be_bytes();
        Self::new(p1, p2, s1, s2)
    }

    pub const fn to_raw(self) -> u32 {
        u32::from_be_bytes([
            self.primary_drive,
            self.primary_driven,
            self.secondary_drive,
            self.secondary_driven,
        ])
    }

    /// Clamps each count to `0..=255` independently.
    pub fn saturating_from(counts: [i32; 4]) -> Encoded {
        let mut clamped = false;
        let [p1, p2, s1, s2] = counts.map(|count| {
            let tooth = count.clamp(0, u8::MAX as i32);
            clamped |= tooth != count;
            tooth as u8
        });
        let raw = Self::new(p1, p2, s1, s2).to_raw();
        if clamped {
            Encoded::Saturated(raw)
        } else {
            Encoded::Exact(raw)
        }
    }
}

/// A decoded field value.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Physical {
    Scalar(f64),
    Teeth(GearTeeth),
}

/// Result of encoding a physical value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Encoded {
    /// The nearest raw code lies within the field's range.
    Exact(u32),
    /// The requested value was out of range, the boundary code is returned instead.
    Saturated(u32),
}

impl Encoded {
    pub const fn raw(self) -> u32 {
        match self {
            Encoded::Exact(raw) | Encoded::Saturated(raw) => raw,
        }
    }

    pub const fn is_saturated(self) -> bool {
        matches!(self, Encoded::Saturated(_))
    }

    /// Rejects saturated results with [`Error::OutOfRange`].
    pub const fn into_exact(self, field: Field) -> Result<u32, Error> {
        match self {
            Encoded::Exact(raw) => Ok(raw),
            Encoded::Saturated(_) => Err(Error::OutOfRange(field)),
        }
    }

    /// Marks the result saturated if `other` is.
    pub(crate) const fn merge(self, other: Encoded) -> Encoded {
        if other.is_saturated() {
            Encoded::Saturated(self.raw())
        } else {
            self
        }
    }
}

/// Decodes a raw code.
///
/// Decoding is total: bits above the field's width are masked off, so `0x1_0000` decodes
/// like `0` for a 16-bit field. Use [`Field::accepts`] to reject such codes first.
pub fn decode(field: Field, raw: u32) -> Physical {
    let raw = raw & field.max_raw();
    match field.layout().encoding {
        Encoding::Unsigned { divisor } => Physical::Scalar(raw as f64 / divisor as f64),
        Encoding::SignedOffset { divisor, zero } => {
            Physical::Scalar((raw as i64 - zero as i64) as f64 / divisor as f64)
        }
        Encoding::PackedTeeth => Physical::Teeth(GearTeeth::from_raw(raw)),
    }
}

/// Decodes a scalar field.
pub fn decode_scalar(field: Field, raw: u32) -> Result<f64, Error> {
    match decode(field, raw) {
        Physical::Scalar(value) => Ok(value),
        Physical::Teeth(_) => Err(Error::EncodingMismatch(field)),
    }
}

/// Encodes a physical value into the field's raw code.
pub fn encode(field: Field, value: Physical) -> Result<Encoded, Error> {
    match (field.layout().encoding, value) {
        (Encoding::PackedTeeth, Physical::Teeth(teeth)) => Ok(Encoded::Exact(teeth.to_raw())),
        (Encoding::PackedTeeth, Physical::Scalar(_)) => Err(Error::EncodingMismatch(field)),
        (_, Physical::Teeth(_)) => Err(Error::EncodingMismatch(field)),
        (_, Physical::Scalar(value)) => encode_scalar(field, value),
    }
}

/// Encodes a scalar value, saturating at the field bounds.
pub fn encode_scalar(field: Field, value: f64) -> Result<Encoded, Error> {
    let (divisor, zero) = match field.layout().encoding {
        Encoding::Unsigned { divisor } => (divisor, 0),
        Encoding::SignedOffset { divisor, zero } => (divisor, zero),
        Encoding::PackedTeeth => return Err(Error::EncodingMismatch(field)),
    };

    let min = field.min_raw();
    let max = field.max_raw();
    // floor(shifted) is the nearest code with ties going up
    let shifted = value * divisor as f64 + zero as f64 + 0.5;

    if shifted.is_nan() || shifted < min as f64 {
        Ok(Encoded::Saturated(min))
    } else if shifted >= max as f64 + 1.0 {
        Ok(Encoded::Saturated(max))
    } else {
        // non-negative here, so truncation is floor
        Ok(Encoded::Exact(shifted as u32))
    }
}

/// Smallest physical value representable by a scalar field.
pub fn min_physical(field: Field) -> Result<f64, Error> {
    decode_scalar(field, field.min_raw())
}

/// Largest physical value representable by a scalar field.
pub fn max_physical(field: Field) -> Result<f64, Error> {
    decode_scalar(field, field.max_raw())
}

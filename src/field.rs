//! Table-driven metadata for every persisted quantity.
//!
//! Adding a quantity is a data change: a new [`Field`] variant, its row in
//! [`Field::layout`] and an entry in [`crate::layout::FIELDS`].

/// Every quantity persisted in the region, named as in the stored-format table.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
    strum::EnumCount,
    strum::FromRepr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Field {
    Odometer,
    Tripmeter,
    MaxSpeed,
    MaxRpm,
    MinChtTemp,
    MaxChtTemp,
    MinCvtTemp,
    MaxCvtTemp,
    MinAmbTemp,
    MaxAmbTemp,
    RearTireCirc,
    RearTireDiam,
    FinalDriveGears,
    FinalDriveRatio,
}

/// Stored width of a field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Width {
    U16 = 2,
    U32 = 4,
}

impl Width {
    /// Number of bytes occupied in the region.
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Largest raw code representable in this width.
    pub const fn max_raw(self) -> u32 {
        match self {
            Width::U16 => u16::MAX as u32,
            Width::U32 => u32::MAX,
        }
    }
}

/// How a raw code maps to a physical value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Encoding {
    /// `physical = raw / divisor`
    Unsigned { divisor: u32 },
    /// `physical = (raw - zero) / divisor`
    SignedOffset { divisor: u32, zero: u32 },
    /// Four 8-bit tooth counts, most significant byte first.
    PackedTeeth,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    #[strum(serialize = "km")]
    Kilometre,
    #[strum(serialize = "km/h")]
    KilometrePerHour,
    #[strum(serialize = "rpm")]
    Rpm,
    #[strum(serialize = "°C")]
    Celsius,
    #[strum(serialize = "mm")]
    Millimetre,
    #[strum(serialize = "teeth")]
    Teeth,
    #[strum(serialize = "")]
    Ratio,
}

/// Which direction an extreme-tracking field moves in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Extreme {
    Min,
    Max,
}

/// Position, width and scaling of one field inside the region.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    pub offset: u16,
    pub width: Width,
    pub encoding: Encoding,
    pub unit: Unit,
}

const TEMPERATURE: Encoding = Encoding::SignedOffset {
    divisor: 200,
    zero: 32767,
};

const DISTANCE: Encoding = Encoding::Unsigned { divisor: 8000 };

impl Field {
    pub const fn layout(self) -> Layout {
        const fn row(offset: u16, width: Width, encoding: Encoding, unit: Unit) -> Layout {
            Layout {
                offset,
                width,
                encoding,
                unit,
            }
        }

        match self {
            Field::Odometer => row(0x0000, Width::U32, DISTANCE, Unit::Kilometre),
            Field::Tripmeter => row(0x0004, Width::U32, DISTANCE, Unit::Kilometre),
            Field::MaxSpeed => row(
                0x0008,
                Width::U16,
                Encoding::Unsigned { divisor: 400 },
                Unit::KilometrePerHour,
            ),
            Field::MaxRpm => row(
                0x000A,
                Width::U16,
                Encoding::Unsigned { divisor: 4 },
                Unit::Rpm,
            ),
            Field::MinChtTemp => row(0x000C, Width::U16, TEMPERATURE, Unit::Celsius),
            Field::MaxChtTemp => row(0x000E, Width::U16, TEMPERATURE, Unit::Celsius),
            Field::MinCvtTemp => row(0x0010, Width::U16, TEMPERATURE, Unit::Celsius),
            Field::MaxCvtTemp => row(0x0012, Width::U16, TEMPERATURE, Unit::Celsius),
            Field::MinAmbTemp => row(0x0014, Width::U16, TEMPERATURE, Unit::Celsius),
            Field::MaxAmbTemp => row(0x0016, Width::U16, TEMPERATURE, Unit::Celsius),
            Field::RearTireCirc => row(
                0x0100,
                Width::U16,
                Encoding::Unsigned { divisor: 20 },
                Unit::Millimetre,
            ),
            Field::RearTireDiam => row(
                0x0102,
                Width::U16,
                Encoding::Unsigned { divisor: 80 },
                Unit::Millimetre,
            ),
            Field::FinalDriveGears => row(0x0104, Width::U32, Encoding::PackedTeeth, Unit::Teeth),
            Field::FinalDriveRatio => row(
                0x0108,
                Width::U16,
                Encoding::Unsigned { divisor: 3125 },
                Unit::Ratio,
            ),
        }
    }

    /// The snake_case name used in dumps and on the wire.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub const fn min_raw(self) -> u32 {
        0
    }

    pub const fn max_raw(self) -> u32 {
        self.layout().width.max_raw()
    }

    /// Returns true if `raw` is a valid stored code for this field.
    pub const fn accepts(self, raw: u32) -> bool {
        raw >= self.min_raw() && raw <= self.max_raw()
    }

    /// Number of decimals needed to print every raw code of this field exactly.
    ///
    /// All divisors are of the form 2^a * 5^b, so a finite decimal expansion exists.
    pub const fn decimals(self) -> usize {
        match self.layout().encoding {
            Encoding::Unsigned { divisor } | Encoding::SignedOffset { divisor, .. } => {
                let mut decimals = 0;
                let mut power = 1u64;
                while power % divisor as u64 != 0 {
                    decimals += 1;
                    power *= 10;
                }
                decimals
            }
            Encoding::PackedTeeth => 0,
        }
    }

    /// The direction this field is updated in, if it tracks a peak value.
    pub const fn extreme(self) -> Option<Extreme> {
        match self {
            Field::MaxSpeed
            | Field::MaxRpm
            | Field::MaxChtTemp
            | Field::MaxCvtTemp
            | Field::MaxAmbTemp => Some(Extreme::Max),
            Field::MinChtTemp | Field::MinCvtTemp | Field::MinAmbTemp => Some(Extreme::Min),
            _ => None,
        }
    }
}

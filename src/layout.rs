use crate::field::Field;
use core::ops::Range;

/// Size of the persistent region in bytes ($0000-$03FF).
pub const REGION_SIZE: usize = 0x0400;

/// Byte value of a factory-erased region. Every field decodes to its minimum.
pub const ERASED_BYTE: u8 = 0x00;

/// Ranges that are never read or written by the store.
pub const RESERVED: [Range<usize>; 2] = [0x0018..0x0100, 0x010A..REGION_SIZE];

/// Number of persisted fields.
pub const FIELD_COUNT: usize = 14;

/// All fields in region order.
pub const FIELDS: [Field; FIELD_COUNT] = [
    Field::Odometer,
    Field::Tripmeter,
    Field::MaxSpeed,
    Field::MaxRpm,
    Field::MinChtTemp,
    Field::MaxChtTemp,
    Field::MinCvtTemp,
    Field::MaxCvtTemp,
    Field::MinAmbTemp,
    Field::MaxAmbTemp,
    Field::RearTireCirc,
    Field::RearTireDiam,
    Field::FinalDriveGears,
    Field::FinalDriveRatio,
];

const fn span(field: Field) -> Range<usize> {
    let layout = field.layout();
    let start = layout.offset as usize;
    start..start + layout.width.bytes()
}

const fn disjoint(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.end <= b.start || b.end <= a.start
}

const fn layout_is_consistent() -> bool {
    let mut i = 0;
    while i < FIELDS.len() {
        let a = span(FIELDS[i]);
        if a.end > REGION_SIZE || FIELDS[i] as usize != i {
            return false;
        }
        let mut r = 0;
        while r < RESERVED.len() {
            if !disjoint(&a, &RESERVED[r]) {
                return false;
            }
            r += 1;
        }
        let mut j = i + 1;
        while j < FIELDS.len() {
            if !disjoint(&a, &span(FIELDS[j])) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

// Compile-time assertion that no two fields overlap and no field touches a reserved range
const _: () = assert!(
    layout_is_consistent(),
    "Field layout must not overlap itself or the reserved ranges"
);

/// Byte range of `field` relative to the start of the region.
pub fn field_range(field: Field) -> Range<usize> {
    span(field)
}

/// Serializes `raw` into the field's stored big-endian representation.
/// Returns the buffer and the number of significant leading bytes.
pub(crate) fn to_bytes(field: Field, raw: u32) -> ([u8; 4], usize) {
    let width = field.layout().width.bytes();
    let mut buf = [0u8; 4];
    buf[..width].copy_from_slice(&raw.to_be_bytes()[4 - width..]);
    (buf, width)
}

/// Reads a big-endian value of the field's width from `bytes`.
pub(crate) fn from_bytes(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32)
}

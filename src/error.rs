use crate::field::Field;
use thiserror::Error;

/// Errors that can occur during store operations. None of them are fatal: a caller decides
/// whether to retry, fall back to the field's factory minimum or refuse to start.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// The region (base address + 1 KiB) does not fit into the medium
    #[error("region does not fit the storage medium")]
    InvalidRegion,

    /// The medium did not become ready or a read failed. Never retried internally.
    #[error("storage unavailable")]
    StorageUnavailable,

    /// A write failed, the read-back did not match, or a loaded raw value is outside the
    /// field's range. The stored bytes of this field must not be trusted.
    #[error("incomplete write of {0}")]
    WriteIncomplete(Field),

    /// The requested physical value was clamped to the field bounds
    #[error("{0} out of range")]
    OutOfRange(Field),

    /// The raw value is wider than the field
    #[error("raw value {raw:#x} does not fit {field}")]
    RawOutOfRange { field: Field, raw: u32 },

    /// A scalar was requested from the tooth-count field or the other way round
    #[error("{0} has a different encoding")]
    EncodingMismatch(Field),

    /// The field does not track a minimum or maximum
    #[error("{0} is not an extreme")]
    NotAnExtreme(Field),
}

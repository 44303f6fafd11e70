#![doc = include_str ! ("../README.md")]
#![cfg_attr(not(target_arch = "x86_64"), no_std)]

pub mod codec;
#[cfg(target_has_atomic = "32")]
pub mod counter;
pub mod error;
pub mod field;
pub mod geometry;
mod get;
pub mod layout;
pub mod platform;
mod session;
mod set;
mod working_set;

pub use codec::{Encoded, GearTeeth, Physical};
pub use field::Field;
pub use get::Get;
pub use set::Set;
pub use working_set::{RegionState, WorkingSet};

use crate::codec::encode_scalar;
use crate::error::Error;
use crate::field::Extreme;
use crate::layout::{FIELDS, REGION_SIZE, field_range, from_bytes, to_bytes};
use crate::platform::Platform;
use crate::session::Session;
#[cfg(feature = "defmt")]
use defmt::{trace, warn};

/// The Store owns the storage medium and keeps the working set of every field in memory.
///
/// All writes take `&mut self`, so the whole region is a single mutual-exclusion domain.
pub struct Store<T: Platform> {
    pub(crate) hal: T,
    pub(crate) base_address: u32,
    pub(crate) working: WorkingSet,
}

impl<T: Platform> Store<T> {
    /// Checks that the region starting at `base_address` fits into the medium and loads
    /// every field.
    ///
    /// Fields that cannot be loaded are kept as per-field errors in the working set; only
    /// an unavailable medium fails the construction.
    pub fn new(base_address: usize, hal: T) -> Result<Store<T>, Error> {
        let end = base_address
            .checked_add(REGION_SIZE)
            .ok_or(Error::InvalidRegion)?;
        if end > hal.capacity() || end > u32::MAX as usize {
            return Err(Error::InvalidRegion);
        }

        let mut store = Self {
            hal,
            base_address: base_address as u32,
            working: WorkingSet::erased(),
        };
        store.load_all()?;
        Ok(store)
    }

    /// Reads every field from the medium and replaces the working set.
    ///
    /// Reserved bytes are never read.
    pub fn load_all(&mut self) -> Result<WorkingSet, Error> {
        let mut working = WorkingSet::erased();
        {
            let mut session = Session::open(&mut self.hal)?;
            for field in FIELDS {
                let slot = load_field(&mut session, self.base_address, field);

                #[cfg(feature = "defmt")]
                if slot.is_err() {
                    warn!("load_all: {} failed", field);
                }

                working.set(field, slot);
            }
        }

        #[cfg(feature = "defmt")]
        trace!("load_all: @{:#06x} {}", self.base_address, working.state());

        #[cfg(feature = "debug-logs")]
        println!("store: load_all {:?}", working);

        self.working = working;
        Ok(working)
    }

    /// Reads a single field from the medium and refreshes its working-set slot.
    pub fn read_field(&mut self, field: Field) -> Result<u32, Error> {
        let slot = {
            let mut session = Session::open(&mut self.hal)?;
            load_field(&mut session, self.base_address, field)
        };
        self.working.set(field, slot);
        slot
    }

    /// Writes exactly the bytes of `field`, verifies them and updates the working set.
    ///
    /// Bytes outside the field, including the reserved ranges, are left untouched. If the
    /// medium was not ready nothing has been written and the working set is unchanged. Any
    /// other failure marks the field as failed since its stored bytes are unknown.
    pub fn write_field(&mut self, field: Field, raw: u32) -> Result<(), Error> {
        if !field.accepts(raw) {
            return Err(Error::RawOutOfRange { field, raw });
        }

        let (buf, len) = to_bytes(field, raw);
        let address = self.address(field);

        #[cfg(feature = "defmt")]
        trace!("write_field: {} = {:#x} @{:#06x}", field, raw, address);

        #[cfg(feature = "debug-logs")]
        println!("store: write_field {field} = {raw:#x} @{address:#06x}");

        let result = Session::open(&mut self.hal)
            .and_then(|mut session| session.write_verified(field, address, &buf[..len]));

        match result {
            Ok(()) => {
                self.working.set(field, Ok(raw));
                Ok(())
            }
            Err(Error::StorageUnavailable) => Err(Error::StorageUnavailable),
            Err(e) => {
                #[cfg(feature = "defmt")]
                warn!("write_field: {} failed: {}", field, e);

                self.working.set(field, Err(e));
                Err(e)
            }
        }
    }

    /// Get a decoded value from the working set.
    ///
    /// Supported types are `f64` for scalar fields, [`GearTeeth`] for the final drive gears
    /// and [`Physical`] for either.
    pub fn get<R>(&self, field: Field) -> Result<R, Error>
    where
        Store<T>: Get<R>,
    {
        Get::get(self, field)
    }

    /// Encode a value and write it to the medium.
    ///
    /// Type support:
    ///  * `f64`: scalar fields, saturating at the field bounds
    ///  * [`GearTeeth`] and `[i32; 4]`: the final drive gears, each count clamped to `0..=255`
    ///  * [`Physical`]: either
    pub fn set<R>(&mut self, field: Field, value: R) -> Result<Encoded, Error>
    where
        Store<T>: Set<R>,
    {
        Set::set(self, field, value)
    }

    /// Decodes a scalar field from the working set.
    pub fn get_physical(&self, field: Field) -> Result<f64, Error> {
        codec::decode_scalar(field, self.working.raw(field)?)
    }

    /// Encodes `value` and commits it. A saturated result means the boundary was stored
    /// instead of the requested value.
    pub fn set_physical(&mut self, field: Field, value: f64) -> Result<Encoded, Error> {
        let encoded = encode_scalar(field, value)?;
        self.write_field(field, encoded.raw())?;
        Ok(encoded)
    }

    /// A copy of every field's raw value, for diagnostics or transmission.
    pub fn raw_snapshot(&self) -> WorkingSet {
        self.working
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working
    }

    pub fn state(&self) -> RegionState {
        self.working.state()
    }

    /// Commits `value` only if it beats the stored extreme of `field`.
    ///
    /// Returns `None` if nothing was written. A field that failed to load is always
    /// overwritten, and so is a minimum tracker still holding the erased code.
    pub fn commit_extreme(&mut self, field: Field, value: f64) -> Result<Option<Encoded>, Error> {
        let extreme = field.extreme().ok_or(Error::NotAnExtreme(field))?;
        let encoded = encode_scalar(field, value)?;

        let beats = match self.working.raw(field) {
            Ok(current) => match extreme {
                Extreme::Max => encoded.raw() > current,
                Extreme::Min => current == field.min_raw() || encoded.raw() < current,
            },
            Err(_) => true,
        };
        if !beats {
            return Ok(None);
        }

        self.write_field(field, encoded.raw())?;
        Ok(Some(encoded))
    }

    /// Writes the value any new reading beats: the minimum code for a maximum tracker and
    /// the maximum code for a minimum tracker.
    pub fn reset_extreme(&mut self, field: Field) -> Result<(), Error> {
        let neutral = match field.extreme() {
            Some(Extreme::Max) => field.min_raw(),
            Some(Extreme::Min) => field.max_raw(),
            None => return Err(Error::NotAnExtreme(field)),
        };
        self.write_field(field, neutral)
    }

    /// Adds a travelled distance in km to the odometer and the tripmeter.
    ///
    /// Both counters saturate at their maximum. The odometer is committed first; there is no
    /// atomicity across the two fields.
    pub fn add_distance(&mut self, km: f64) -> Result<Encoded, Error> {
        let delta = encode_scalar(Field::Odometer, km)?;
        let mut result = Encoded::Exact(0);

        for field in [Field::Odometer, Field::Tripmeter] {
            let current = self.working.raw(field)?;
            let next = match current.checked_add(delta.raw()) {
                Some(raw) => Encoded::Exact(raw),
                None => Encoded::Saturated(field.max_raw()),
            };
            self.write_field(field, next.raw())?;
            if field == Field::Odometer {
                result = next;
            } else {
                result = result.merge(next);
            }
        }

        Ok(result.merge(delta))
    }

    /// Sets the tripmeter back to zero.
    pub fn reset_trip(&mut self) -> Result<(), Error> {
        self.write_field(Field::Tripmeter, 0)
    }

    /// The storage medium, e.g. for inspection.
    pub fn medium(&self) -> &T {
        &self.hal
    }

    pub fn medium_mut(&mut self) -> &mut T {
        &mut self.hal
    }

    /// Releases the storage medium.
    pub fn into_inner(self) -> T {
        self.hal
    }

    fn address(&self, field: Field) -> u32 {
        self.base_address + field_range(field).start as u32
    }
}

fn load_field<T: Platform>(
    session: &mut Session<'_, T>,
    base_address: u32,
    field: Field,
) -> Result<u32, Error> {
    let range = field_range(field);
    let mut buf = [0u8; 4];
    let bytes = &mut buf[..range.len()];
    session.read(base_address + range.start as u32, bytes)?;

    // every field spans its full width, torn values are caught by the write read-back
    Ok(from_bytes(bytes))
}

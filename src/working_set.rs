use crate::codec::{self, Physical};
use crate::error::Error;
use crate::field::Field;
use crate::layout::{FIELD_COUNT, FIELDS};

/// Observable state of the region.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegionState {
    /// Every field holds the factory-erased pattern and decodes to its minimum.
    Uninitialized,
    /// At least one field reflects a prior commit.
    Initialized,
}

/// The in-memory copy of every field's raw value.
///
/// A field that could not be loaded keeps its error instead of a value, so one torn field
/// does not invalidate the others.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WorkingSet {
    slots: [Result<u32, Error>; FIELD_COUNT],
}

impl WorkingSet {
    pub(crate) const fn erased() -> Self {
        Self {
            slots: [Ok(0); FIELD_COUNT],
        }
    }

    pub(crate) fn set(&mut self, field: Field, slot: Result<u32, Error>) {
        self.slots[field as usize] = slot;
    }

    pub fn raw(&self, field: Field) -> Result<u32, Error> {
        self.slots[field as usize]
    }

    /// The raw value, or the factory minimum if the field failed to load.
    pub fn raw_or_min(&self, field: Field) -> u32 {
        self.raw(field).unwrap_or(field.min_raw())
    }

    pub fn physical(&self, field: Field) -> Result<Physical, Error> {
        self.raw(field).map(|raw| codec::decode(field, raw))
    }

    /// All fields in region order, keyed by field.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Result<u32, Error>)> + '_ {
        FIELDS.iter().map(|&field| (field, self.raw(field)))
    }

    /// Fields that failed to load or to commit.
    pub fn failed(&self) -> impl Iterator<Item = Field> + '_ {
        self.iter()
            .filter_map(|(field, slot)| slot.is_err().then_some(field))
    }

    pub fn state(&self) -> RegionState {
        let erased = self
            .iter()
            .all(|(field, slot)| slot == Ok(field.min_raw()));
        if erased {
            RegionState::Uninitialized
        } else {
            RegionState::Initialized
        }
    }
}

use crate::error::Error;
use crate::layout::{ERASED_BYTE, REGION_SIZE};
use embedded_storage::nor_flash::{NorFlash, RmwNorFlashStorage};
use embedded_storage::{ReadStorage, Storage};

/// See README.md for an example implementation.
pub trait Platform: Access + Storage {}

impl<T: Access + Storage> Platform for T {}

/// The medium did not become ready within its bounded wait.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotReady;

/// Bus hooks wrapped around every access to the medium.
///
/// An EEPROM driver would busy-wait for the previous write cycle in `acquire` and give up
/// after its datasheet write time. `release` is called on every exit path of an access that
/// was successfully acquired.
pub trait Access {
    fn acquire(&mut self) -> Result<(), NotReady> {
        Ok(())
    }

    fn release(&mut self) {}
}

impl<T: Access> Access for &mut T {
    fn acquire(&mut self) -> Result<(), NotReady> {
        T::acquire(self)
    }

    fn release(&mut self) {
        T::release(self)
    }
}

/// Page-erase media keep every untouched byte of a page through the merge buffer.
impl<S: NorFlash> Access for RmwNorFlashStorage<'_, S> {}

/// A RAM-backed region, used on the host to inspect and build images.
#[derive(Clone, PartialEq, Eq)]
pub struct MemoryRegion {
    bytes: [u8; REGION_SIZE],
}

/// Access outside the region.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfBounds;

impl MemoryRegion {
    /// A factory-erased region.
    pub const fn new() -> Self {
        Self {
            bytes: [ERASED_BYTE; REGION_SIZE],
        }
    }

    /// Copies an image of exactly [`REGION_SIZE`] bytes.
    pub fn from_bytes(image: &[u8]) -> Result<Self, Error> {
        let bytes = image.try_into().map_err(|_| Error::InvalidRegion)?;
        Ok(Self { bytes })
    }

    pub const fn as_bytes(&self) -> &[u8; REGION_SIZE] {
        &self.bytes
    }

    fn span(&self, offset: u32, len: usize) -> Result<core::ops::Range<usize>, OutOfBounds> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or(OutOfBounds)?;
        if end > self.bytes.len() {
            return Err(OutOfBounds);
        }
        Ok(start..end)
    }
}

impl Default for MemoryRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for MemoryRegion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemoryRegion")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl ReadStorage for MemoryRegion {
    type Error = OutOfBounds;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let span = self.span(offset, bytes.len())?;
        bytes.copy_from_slice(&self.bytes[span]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }
}

impl Storage for MemoryRegion {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let span = self.span(offset, bytes.len())?;
        self.bytes[span].copy_from_slice(bytes);
        Ok(())
    }
}

impl Access for MemoryRegion {}

use crate::error::Error;
use crate::field::Field;
use crate::platform::Platform;
#[cfg(feature = "defmt")]
use defmt::trace;

/// Scoped access to the medium: acquired on construction, released on drop, so a failing
/// read or write can never leave the bus held.
pub(crate) struct Session<'a, T: Platform> {
    hal: &'a mut T,
}

impl<'a, T: Platform> Session<'a, T> {
    pub(crate) fn open(hal: &'a mut T) -> Result<Self, Error> {
        hal.acquire().map_err(|_| Error::StorageUnavailable)?;

        #[cfg(feature = "defmt")]
        trace!("session: acquired");

        Ok(Self { hal })
    }

    pub(crate) fn read(&mut self, address: u32, bytes: &mut [u8]) -> Result<(), Error> {
        self.hal
            .read(address, bytes)
            .map_err(|_| Error::StorageUnavailable)
    }

    /// Writes `bytes` and reads them back. Any failure is reported as an incomplete write of
    /// `field` since the medium may hold a partial value.
    pub(crate) fn write_verified(
        &mut self,
        field: Field,
        address: u32,
        bytes: &[u8],
    ) -> Result<(), Error> {
        self.hal
            .write(address, bytes)
            .map_err(|_| Error::WriteIncomplete(field))?;

        let mut readback = [0u8; 4];
        let readback = &mut readback[..bytes.len()];
        self.hal
            .read(address, readback)
            .map_err(|_| Error::WriteIncomplete(field))?;

        if *readback != *bytes {
            return Err(Error::WriteIncomplete(field));
        }
        Ok(())
    }
}

impl<T: Platform> Drop for Session<'_, T> {
    fn drop(&mut self) {
        self.hal.release();

        #[cfg(feature = "defmt")]
        trace!("session: released");
    }
}

use crate::codec::{self, GearTeeth, Physical};
use crate::error::Error;
use crate::field::{Encoding, Field};
use crate::platform::Platform;
use crate::{Encoded, Store};

pub trait Set<T> {
    fn set(&mut self, field: Field, value: T) -> Result<Encoded, Error>;
}

impl<T, S: Set<T>> Set<T> for &mut S {
    fn set(&mut self, field: Field, value: T) -> Result<Encoded, Error> {
        (*self).set(field, value)
    }
}

impl<T: Platform> Set<f64> for Store<T> {
    fn set(&mut self, field: Field, value: f64) -> Result<Encoded, Error> {
        self.set_physical(field, value)
    }
}

impl<T: Platform> Set<GearTeeth> for Store<T> {
    fn set(&mut self, field: Field, value: GearTeeth) -> Result<Encoded, Error> {
        self.set(field, Physical::Teeth(value))
    }
}

impl<T: Platform> Set<[i32; 4]> for Store<T> {
    fn set(&mut self, field: Field, value: [i32; 4]) -> Result<Encoded, Error> {
        if field.layout().encoding != Encoding::PackedTeeth {
            return Err(Error::EncodingMismatch(field));
        }
        let encoded = GearTeeth::saturating_from(value);
        self.write_field(field, encoded.raw())?;
        Ok(encoded)
    }
}

impl<T: Platform> Set<Physical> for Store<T> {
    fn set(&mut self, field: Field, value: Physical) -> Result<Encoded, Error> {
        let encoded = codec::encode(field, value)?;
        self.write_field(field, encoded.raw())?;
        Ok(encoded)
    }
}

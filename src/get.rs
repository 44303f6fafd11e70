//! The `Get<T>` trait and its implementation in this module allows providing a single generic,
//! overloaded function `get<T>()` for all physical representations of a field.

use crate::codec::{self, GearTeeth, Physical};
use crate::error::Error;
use crate::field::Field;
use crate::platform::Platform;
use crate::Store;

pub trait Get<T> {
    fn get(&self, field: Field) -> Result<T, Error>;
}

impl<T, G: Get<T>> Get<T> for &mut G {
    fn get(&self, field: Field) -> Result<T, Error> {
        (**self).get(field)
    }
}

impl<T: Platform> Get<f64> for Store<T> {
    fn get(&self, field: Field) -> Result<f64, Error> {
        self.get_physical(field)
    }
}

impl<T: Platform> Get<GearTeeth> for Store<T> {
    fn get(&self, field: Field) -> Result<GearTeeth, Error> {
        match codec::decode(field, self.working.raw(field)?) {
            Physical::Teeth(teeth) => Ok(teeth),
            Physical::Scalar(_) => Err(Error::EncodingMismatch(field)),
        }
    }
}

impl<T: Platform> Get<Physical> for Store<T> {
    fn get(&self, field: Field) -> Result<Physical, Error> {
        self.working.physical(field)
    }
}

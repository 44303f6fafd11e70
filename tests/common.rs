#![allow(dead_code)]

// filename according to https://doc.rust-lang.org/book/ch11-03-test-organization.html
use embedded_storage::nor_flash::{
    ErrorType, NorFlash, NorFlashError, NorFlashErrorKind, ReadNorFlash,
};
use embedded_storage::{ReadStorage, Storage};
use mwdisplay_store::layout::{REGION_SIZE, RESERVED};
use mwdisplay_store::platform::{Access, NotReady};

// $0000-$0017 of the documented sample unit
pub const SAMPLE_VARIABLES: [u8; 0x18] = [
    0x03, 0xAB, 0x34, 0xE6, 0x00, 0x00, 0xFE, 0xCD, 0x62, 0xD7, 0xAB, 0x0F, 0x72, 0xD0, 0xCC, 0xA4,
    0x81, 0x4F, 0x9C, 0xD1, 0x73, 0x19, 0x9E, 0x13,
];

// $0100-$0109 of the documented sample unit
pub const SAMPLE_CONSTANTS: [u8; 0x0A] = [
    0x79, 0x4A, 0x9A, 0x6E, 0x0D, 0x34, 0x0D, 0x2C, 0xA5, 0x44,
];

/// The documented sample dump, reserved bytes zero.
pub fn sample_image() -> Vec<u8> {
    let mut image = vec![0u8; REGION_SIZE];
    image[..0x18].copy_from_slice(&SAMPLE_VARIABLES);
    image[0x100..0x10A].copy_from_slice(&SAMPLE_CONSTANTS);
    image
}

/// The sample dump with a recognizable pattern in every reserved byte.
pub fn patterned_image() -> Vec<u8> {
    let mut image = sample_image();
    for range in RESERVED {
        for addr in range {
            image[addr] = (addr as u8).wrapping_mul(7).wrapping_add(3);
        }
    }
    image
}

/// Every byte index at which `a` and `b` differ.
pub fn changed_bytes(a: &[u8], b: &[u8]) -> Vec<usize> {
    a.iter()
        .zip(b)
        .enumerate()
        .filter_map(|(i, (x, y))| (x != y).then_some(i))
        .collect()
}

#[derive(Default)]
pub struct Eeprom {
    pub buf: Vec<u8>,
    pub fail_after_operation: usize,
    pub operations: Vec<Operation>,
    /// Acquire fails while set
    pub busy: bool,
    /// Only this many bytes of the next write reach the medium before it fails
    pub tear_after: Option<usize>,
    pub acquired: usize,
    pub released: usize,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Operation {
    Read { offset: u32, len: usize },
    Write { offset: u32, len: usize },
}

impl Eeprom {
    pub fn new(size: usize) -> Self {
        Self {
            buf: vec![0x00u8; size],
            fail_after_operation: usize::MAX,
            ..Default::default()
        }
    }

    pub fn from_image(image: &[u8]) -> Self {
        Self {
            buf: image.to_vec(),
            fail_after_operation: usize::MAX,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn writes(&self) -> Vec<Operation> {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::Write { .. }))
            .cloned()
            .collect()
    }

    pub fn clear_operations(&mut self) {
        self.operations.clear();
    }
}

#[derive(Debug, PartialEq)]
pub struct EepromError;

impl ReadStorage for Eeprom {
    type Error = EepromError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        println!(
            "    eeprom: read:  0x{offset:04X}[0x{:04X}] #{:>2}",
            bytes.len(),
            self.operations.len()
        );
        if self.operations.len() >= self.fail_after_operation {
            println!("    eeprom: FAULT");
            return Err(EepromError);
        }
        self.operations.push(Operation::Read {
            offset,
            len: bytes.len(),
        });

        let offset = offset as usize;
        bytes.copy_from_slice(&self.buf[offset..offset + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.buf.len()
    }
}

impl Storage for Eeprom {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        println!(
            "    eeprom: write: 0x{offset:04X}[0x{:04X}] #{:>2}",
            bytes.len(),
            self.operations.len()
        );
        if self.operations.len() >= self.fail_after_operation {
            println!("    eeprom: FAULT");
            return Err(EepromError);
        }
        self.operations.push(Operation::Write {
            offset,
            len: bytes.len(),
        });

        let offset = offset as usize;
        let written = self.tear_after.take().unwrap_or(bytes.len()).min(bytes.len());
        self.buf[offset..offset + written].copy_from_slice(&bytes[..written]);
        if written < bytes.len() {
            println!("    eeprom: TORN after {written} bytes");
            return Err(EepromError);
        }
        Ok(())
    }
}

impl Access for Eeprom {
    fn acquire(&mut self) -> Result<(), NotReady> {
        if self.busy {
            return Err(NotReady);
        }
        self.acquired += 1;
        Ok(())
    }

    fn release(&mut self) {
        self.released += 1;
    }
}

pub const FLASH_PAGE_SIZE: usize = 256;
pub const WORD_SIZE: usize = 4;

/// A page-erase medium: erased bytes are 0xFF and a write can only flip bits from 1 to 0.
pub struct Flash {
    pub buf: Vec<u8>,
    pub erases: usize,
}

impl Flash {
    pub fn from_image(image: &[u8]) -> Self {
        Self {
            buf: image.to_vec(),
            erases: 0,
        }
    }
}

#[derive(Debug)]
pub struct FlashError;

impl NorFlashError for FlashError {
    fn kind(&self) -> NorFlashErrorKind {
        NorFlashErrorKind::Other
    }
}

impl ErrorType for Flash {
    type Error = FlashError;
}

impl ReadNorFlash for Flash {
    const READ_SIZE: usize = 1;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let offset = offset as usize;
        bytes.copy_from_slice(&self.buf[offset..offset + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.buf.len()
    }
}

impl NorFlash for Flash {
    const WRITE_SIZE: usize = WORD_SIZE;

    const ERASE_SIZE: usize = FLASH_PAGE_SIZE;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        assert!(from.is_multiple_of(Self::ERASE_SIZE as _));
        assert!(to.is_multiple_of(Self::ERASE_SIZE as _));

        println!("    flash: erase: {from:04X} - {to:04X}");
        self.erases += 1;
        for addr in from..to {
            self.buf[addr as usize] = 0xff;
        }
        Ok(())
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        assert!(offset.is_multiple_of(Self::WRITE_SIZE as _));
        assert!(bytes.len().is_multiple_of(Self::WRITE_SIZE as _));

        println!("    flash: write: 0x{offset:04X}[0x{:04X}]", bytes.len());
        let offset = offset as usize;
        for (i, &val) in bytes.iter().enumerate() {
            self.buf[offset + i] &= val;
        }
        Ok(())
    }
}

//! Test support utilities - only compiled in test builds.

use heapless::Vec;

use crate::{
    device::{PageDevice, RamDevice},
    eeprom::Eeprom,
    error::EepromError,
};

/// Standard test geometry: 8 KiB device, 32-byte pages, 256 pages.
pub const DEVICE_SIZE: usize = 8192;
pub const PAGE_SIZE: usize = 32;

pub type TestDevice = RamDevice<DEVICE_SIZE, PAGE_SIZE>;
pub type TestEeprom = Eeprom<DEVICE_SIZE, PAGE_SIZE, TestDevice>;

/// Helper to create a fresh handle over a RAM store.
pub fn test_eeprom() -> TestEeprom {
    Eeprom::new(TestDevice::new())
}

/// Helper to create a handle whose store records every page operation.
pub fn trace_eeprom() -> Eeprom<DEVICE_SIZE, PAGE_SIZE, TraceDevice<DEVICE_SIZE, PAGE_SIZE>> {
    Eeprom::new(TraceDevice::new())
}

/// Fills `buf` with a deterministic byte pattern derived from `seed`,
/// including zero and other non-printable values.
pub fn fill_pattern(buf: &mut [u8], seed: u8) {
    for (i, b) in buf.iter_mut().enumerate() {
        *b = (seed ^ i as u8).wrapping_mul(167).wrapping_add(i as u8 >> 3);
    }
}

/// One page operation observed by [`TraceDevice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOp {
    Read(usize),
    Write(usize),
    Erase,
}

/// RAM store that records the page operations issued against it.
pub struct TraceDevice<const DS: usize, const PS: usize> {
    inner: RamDevice<DS, PS>,
    pub ops: Vec<PageOp, 64>,
}

impl<const DS: usize, const PS: usize> TraceDevice<DS, PS> {
    pub fn new() -> Self {
        Self {
            inner: RamDevice::new(),
            ops: Vec::new(),
        }
    }

    fn record(&mut self, op: PageOp) {
        self.ops.push(op).unwrap();
    }
}

impl<const DS: usize, const PS: usize> PageDevice<PS> for TraceDevice<DS, PS> {
    const PAGE_COUNT: usize = DS / PS;

    fn read_page(&mut self, page: usize, buf: &mut [u8; PS]) -> Result<(), EepromError> {
        self.record(PageOp::Read(page));
        self.inner.read_page(page, buf)
    }

    fn write_page(&mut self, page: usize, data: &[u8; PS]) -> Result<(), EepromError> {
        self.record(PageOp::Write(page));
        self.inner.write_page(page, data)
    }

    fn erase_all(&mut self) -> Result<(), EepromError> {
        self.record(PageOp::Erase);
        self.inner.erase_all()
    }
}

/// RAM store that fails exactly one page operation with [`EepromError::Io`].
///
/// Counting is zero-based over all page operations; once the designated
/// operation has failed, the store behaves normally again.
pub struct FaultyDevice<const DS: usize, const PS: usize> {
    inner: RamDevice<DS, PS>,
    until_failure: Option<usize>,
}

impl<const DS: usize, const PS: usize> FaultyDevice<DS, PS> {
    pub fn failing_at(op_index: usize) -> Self {
        Self {
            inner: RamDevice::new(),
            until_failure: Some(op_index),
        }
    }

    fn tick(&mut self) -> Result<(), EepromError> {
        match self.until_failure {
            Some(0) => {
                self.until_failure = None;
                Err(EepromError::Io)
            }
            Some(n) => {
                self.until_failure = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl<const DS: usize, const PS: usize> PageDevice<PS> for FaultyDevice<DS, PS> {
    const PAGE_COUNT: usize = DS / PS;

    fn read_page(&mut self, page: usize, buf: &mut [u8; PS]) -> Result<(), EepromError> {
        self.tick()?;
        self.inner.read_page(page, buf)
    }

    fn write_page(&mut self, page: usize, data: &[u8; PS]) -> Result<(), EepromError> {
        self.tick()?;
        self.inner.write_page(page, data)
    }

    fn erase_all(&mut self) -> Result<(), EepromError> {
        self.tick()?;
        self.inner.erase_all()
    }
}

impl<const DS: usize, const PS: usize> Default for TraceDevice<DS, PS> {
    fn default() -> Self {
        Self::new()
    }
}

//! Page-granular backing store contract and an in-RAM implementation.

use crate::error::EepromError;

/// Byte value a freshly erased cell reads back as.
pub const ERASED_BYTE: u8 = 0xFF;

/// A backing store that only understands whole, page-aligned pages.
///
/// This is the one primitive the access layer builds on: read or write
/// exactly one full page at a page index. Valid indices are
/// `0..PAGE_COUNT`. An out-of-range index is a bug in the caller's
/// decomposition arithmetic, never a device condition — implementations
/// should panic on it rather than return an error.
pub trait PageDevice<const PS: usize> {
    /// Number of pages the store holds.
    const PAGE_COUNT: usize;

    /// Reads one full page into `buf`.
    fn read_page(&mut self, page: usize, buf: &mut [u8; PS]) -> Result<(), EepromError>;

    /// Writes one full page from `data`.
    fn write_page(&mut self, page: usize, data: &[u8; PS]) -> Result<(), EepromError>;

    /// Wipes every page to the erased state.
    fn erase_all(&mut self) -> Result<(), EepromError>;
}

/// Flat in-memory backing store with `DS` bytes in `PS`-byte pages.
///
/// Stands in for the real part: a memory array emulating the EEPROM
/// cells, owned for the life of the device handle. A fresh device reads
/// back all [`ERASED_BYTE`], the same state [`erase_all`] restores.
///
/// [`erase_all`]: PageDevice::erase_all
pub struct RamDevice<const DS: usize, const PS: usize> {
    bytes: [u8; DS],
}

impl<const DS: usize, const PS: usize> RamDevice<DS, PS> {
    pub fn new() -> Self {
        const {
            assert!(PS > 0 && DS % PS == 0, "device size must be a whole number of pages");
        }
        Self {
            bytes: [ERASED_BYTE; DS],
        }
    }

    /// Direct view of the cell array, for inspection.
    pub fn as_bytes(&self) -> &[u8; DS] {
        &self.bytes
    }

    fn page_bounds(page: usize) -> core::ops::Range<usize> {
        assert!(
            page < Self::PAGE_COUNT,
            "page index {} out of range (device has {} pages)",
            page,
            Self::PAGE_COUNT,
        );
        let start = page * PS;
        start..start + PS
    }
}

impl<const DS: usize, const PS: usize> Default for RamDevice<DS, PS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const DS: usize, const PS: usize> PageDevice<PS> for RamDevice<DS, PS> {
    const PAGE_COUNT: usize = DS / PS;

    fn read_page(&mut self, page: usize, buf: &mut [u8; PS]) -> Result<(), EepromError> {
        buf.copy_from_slice(&self.bytes[Self::page_bounds(page)]);
        Ok(())
    }

    fn write_page(&mut self, page: usize, data: &[u8; PS]) -> Result<(), EepromError> {
        self.bytes[Self::page_bounds(page)].copy_from_slice(data);
        Ok(())
    }

    fn erase_all(&mut self) -> Result<(), EepromError> {
        self.bytes.fill(ERASED_BYTE);
        Ok(())
    }
}

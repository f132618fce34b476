//! Byte-range access over a page-granular backing store.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::{
    device::PageDevice,
    error::EepromError,
    helpers::{check_params, page_segments},
};

/// Device handle exposing byte-addressable reads and writes over a
/// store that only moves whole pages.
///
/// Boundary pages that the request covers only partially are read whole
/// and merged; interior pages transfer directly. All of that happens
/// under one mutual-exclusion primitive owned by the handle: the entire
/// body of every operation runs inside a single critical section, so at
/// most one device operation is in flight at any time, even for requests
/// touching disjoint regions. A completed write is fully visible to any
/// operation entering afterwards, and no multi-page update can be
/// observed torn.
///
/// # Const Generics
/// - `DS`: Device size in bytes
/// - `PS`: Page size in bytes (`DS` must be a whole multiple of `PS`)
///
/// # Type Parameters
/// - `D`: Backing store, accessed one page at a time
pub struct Eeprom<const DS: usize, const PS: usize, D: PageDevice<PS>> {
    device: Mutex<RefCell<D>>,
}

impl<const DS: usize, const PS: usize, D: PageDevice<PS>> Eeprom<DS, PS, D> {
    /// Device size in bytes.
    pub const SIZE: usize = DS;
    /// Page size in bytes.
    pub const PAGE_SIZE: usize = PS;
    /// Number of pages.
    pub const PAGE_COUNT: usize = DS / PS;

    /// Wraps a backing store in a device handle.
    ///
    /// The geometry is checked at compile time: `DS` must be a whole
    /// multiple of `PS`, and the store must hold exactly `DS / PS` pages.
    pub fn new(device: D) -> Self {
        const {
            assert!(PS > 0 && DS % PS == 0, "device size must be a whole number of pages");
            assert!(
                D::PAGE_COUNT == DS / PS,
                "backing store page count does not match the device geometry"
            );
        }
        Self {
            device: Mutex::new(RefCell::new(device)),
        }
    }

    /// Consumes the handle and returns the backing store.
    pub fn into_inner(self) -> D {
        self.device.into_inner().into_inner()
    }

    /// Reads `size` bytes starting at `offset` into `buf[..size]`.
    ///
    /// `size` is the authoritative transfer length; bytes of `buf`
    /// beyond it are left untouched. Boundary pages are read whole and
    /// only the requested span is copied out.
    ///
    /// # Errors
    /// * [`EepromError::InvalidOffset`] - `offset` lies past the device end
    /// * [`EepromError::InvalidSize`] - `size` is 0
    /// * [`EepromError::OutOfBounds`] - `offset + size` exceeds the device
    /// * [`EepromError::SizeMismatch`] - `buf` is shorter than `size`
    /// * [`EepromError::Io`] - propagated from the backing store
    pub fn read(&self, offset: u32, size: usize, buf: &mut [u8]) -> Result<(), EepromError> {
        let start = check_params::<DS>(offset, size)?;
        if buf.len() < size {
            return Err(EepromError::SizeMismatch);
        }

        critical_section::with(|cs| {
            let mut device = self.device.borrow_ref_mut(cs);
            let mut scratch = [0u8; PS];

            for seg in page_segments::<PS>(start, size) {
                device.read_page(seg.page, &mut scratch)?;
                buf[seg.in_buf].copy_from_slice(&scratch[seg.in_page]);
            }
            Ok(())
        })
    }

    /// Writes the `size` bytes of `data` to the device starting at `offset`.
    ///
    /// Partial boundary pages are read-modify-written: the page is read
    /// whole, the caller's bytes are spliced into the requested span,
    /// and the page is written back. Interior pages are overwritten
    /// wholesale without a prior read.
    ///
    /// An [`EepromError::Io`] failure partway through may leave earlier
    /// pages updated and later ones untouched.
    ///
    /// # Errors
    /// * [`EepromError::InvalidOffset`] - `offset` lies past the device end
    /// * [`EepromError::InvalidSize`] - `size` is 0
    /// * [`EepromError::OutOfBounds`] - `offset + size` exceeds the device
    /// * [`EepromError::SizeMismatch`] - `data.len()` differs from `size`
    /// * [`EepromError::Io`] - propagated from the backing store
    pub fn write(&self, offset: u32, size: usize, data: &[u8]) -> Result<(), EepromError> {
        let start = check_params::<DS>(offset, size)?;
        if data.len() != size {
            return Err(EepromError::SizeMismatch);
        }

        critical_section::with(|cs| {
            let mut device = self.device.borrow_ref_mut(cs);
            let mut scratch = [0u8; PS];

            for seg in page_segments::<PS>(start, size) {
                if seg.len() != PS {
                    // Keep the untouched bytes of a boundary page
                    device.read_page(seg.page, &mut scratch)?;
                }
                scratch[seg.in_page].copy_from_slice(&data[seg.in_buf]);
                device.write_page(seg.page, &scratch)?;
            }
            Ok(())
        })
    }

    /// Erases the whole device via the backing store's erase primitive.
    ///
    /// Takes the same critical section as reads and writes, so an erase
    /// never races an in-flight operation.
    pub fn reset(&self) -> Result<(), EepromError> {
        critical_section::with(|cs| self.device.borrow_ref_mut(cs).erase_all())
    }
}

impl<const DS: usize, const PS: usize, D: PageDevice<PS>> core::fmt::Debug for Eeprom<DS, PS, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Eeprom")
            .field("size", &DS)
            .field("page_size", &PS)
            .finish_non_exhaustive()
    }
}

//! A `no_std`, no-alloc byte-range access layer for paged EEPROMs.
//!
//! This crate emulates a byte-addressable non-volatile memory on top of a
//! backing store whose only primitive is "move one full page at a
//! page-aligned offset". Callers ask for arbitrary byte ranges; the handle
//! translates each request into whole-page operations, merging the partial
//! boundary pages, and serializes every caller behind one lock.
//!
//! # Features
//!
//! - **Zero heap allocation** - One page-sized scratch buffer on the stack
//! - **Unified decomposition** - Leading/interior/trailing segments from a
//!   single arithmetic path, shared by reads and writes
//! - **Read-modify-write merging** - Partial boundary pages never clobber
//!   their untouched bytes
//! - **One lock, whole operation** - No torn multi-page update can be
//!   observed, and the lock is released on every exit path
//!
//! # Architecture
//!
//! Every request decomposes into at most three kinds of segments:
//!
//! ```text
//!          offset                                 offset + size
//!             │                                         │
//!             ▼                                         ▼
//! ┌───────────┬──────┬──────────────┬──────────────┬────┬────────┐
//! │           │ lead │   interior   │   interior   │tail│        │
//! └───────────┴──────┴──────────────┴──────────────┴────┴────────┘
//! ├─── page k ───────┼── page k+1 ──┼── page k+2 ──┼── page k+3 ──┤
//! ```
//!
//! - **Leading/trailing partial pages** are read whole; a read copies out
//!   only the requested span, a write splices the caller's bytes in and
//!   writes the page back
//! - **Interior pages** transfer wholesale, with no merge read on writes
//!
//! # Example
//!
//! ```rust,no_run
//! use paged_eeprom::prelude::*;
//!
//! // 8 KiB device in 32-byte pages over a RAM backing store
//! let eeprom = Eeprom::<8192, 32, _>::new(RamDevice::<8192, 32>::new());
//!
//! // Ranges may start and end anywhere; page alignment is handled inside
//! eeprom.write(1003, 5, b"hello")?;
//!
//! let mut out = [0u8; 5];
//! eeprom.read(1003, 5, &mut out)?;
//! assert_eq!(&out, b"hello");
//!
//! // Wipe the device back to the erased state
//! eeprom.reset()?;
//! # Ok::<(), EepromError>(())
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod device;
pub mod eeprom;
pub mod error;
pub mod helpers;

#[cfg(test)]
mod test_support;

pub use device::{ERASED_BYTE, PageDevice, RamDevice};
pub use eeprom::Eeprom;
pub use error::EepromError;

pub mod prelude {
    pub use crate::{ERASED_BYTE, Eeprom, EepromError, PageDevice, RamDevice};
}

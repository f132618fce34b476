/// Errors that can occur during byte-range access to the device.
///
/// Every variant is recoverable; callers can match on the kind and
/// retry or report as they see fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EepromError {
    /// Offset lies beyond the end of the device.
    InvalidOffset,
    /// Requested transfer size is zero.
    InvalidSize,
    /// Range starts inside the device but extends past its end.
    OutOfBounds,
    /// Caller buffer length does not match the requested size.
    SizeMismatch,
    /// The backing store reported an I/O failure.
    ///
    /// A failure in the middle of a multi-page write may leave earlier
    /// pages updated and later ones untouched; no atomicity across
    /// pages is provided.
    Io,
}

impl core::fmt::Display for EepromError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EepromError::InvalidOffset => write!(f, "offset lies beyond the end of the device"),
            EepromError::InvalidSize => write!(f, "requested transfer size is zero"),
            EepromError::OutOfBounds => write!(f, "range extends past the end of the device"),
            EepromError::SizeMismatch => {
                write!(f, "buffer length does not match the requested size")
            }
            EepromError::Io => write!(f, "backing store reported an i/o failure"),
        }
    }
}

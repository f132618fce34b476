//! Decomposition of byte ranges into page-granular segments.
//!
//! The backing store only moves whole pages, so every byte-range request
//! has to be translated into page operations: at most one partial leading
//! page, zero or more whole interior pages, and at most one partial
//! trailing page. [`page_segments`] is the single source of that
//! arithmetic, used identically by reads and writes.

use core::ops::Range;

use crate::error::EepromError;

/// One page touched by a byte-range access.
///
/// `in_page` is the byte span inside the page that belongs to the
/// request; `in_buf` is the matching span inside the caller's buffer.
/// The two spans always have equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSegment {
    /// Index of the touched page.
    pub page: usize,
    /// Requested byte span inside the page.
    pub in_page: Range<usize>,
    /// Matching byte span inside the caller buffer.
    pub in_buf: Range<usize>,
}

impl PageSegment {
    /// Number of bytes this segment transfers.
    #[inline]
    pub fn len(&self) -> usize {
        self.in_page.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.in_page.is_empty()
    }
}

/// Iterator over the page segments of a byte range.
///
/// Created by [`page_segments`].
#[derive(Debug, Clone)]
pub struct PageSegments<const PS: usize> {
    cursor: usize,
    end: usize,
    copied: usize,
}

impl<const PS: usize> Iterator for PageSegments<PS> {
    type Item = PageSegment;

    fn next(&mut self) -> Option<PageSegment> {
        if self.cursor >= self.end {
            return None;
        }

        let page = self.cursor / PS;
        let start = self.cursor % PS;
        let take = (PS - start).min(self.end - self.cursor);

        let seg = PageSegment {
            page,
            in_page: start..start + take,
            in_buf: self.copied..self.copied + take,
        };

        self.cursor += take;
        self.copied += take;
        Some(seg)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.cursor >= self.end {
            0
        } else {
            (self.end - 1) / PS - self.cursor / PS + 1
        };
        (n, Some(n))
    }
}

impl<const PS: usize> ExactSizeIterator for PageSegments<PS> {}

/// Decomposes the byte range `[offset, offset + len)` into page segments.
///
/// Each touched page is yielded exactly once, in ascending page order.
/// Whole interior pages come out with `in_page == 0..PS`; boundary pages
/// carry the partial span that actually belongs to the request.
/// The range is expected to be validated already (see [`check_params`]);
/// in particular `offset + len` must not overflow `usize`.
///
/// # Type Parameters
/// * `PS` - Page size in bytes
///
/// # Example
/// ```
/// use paged_eeprom::helpers::page_segments;
///
/// // 32-byte pages: bytes 10..34 touch the tail of page 0 and the
/// // head of page 1.
/// let mut segs = page_segments::<32>(10, 24);
///
/// let lead = segs.next().unwrap();
/// assert_eq!((lead.page, lead.in_page, lead.in_buf), (0, 10..32, 0..22));
///
/// let trail = segs.next().unwrap();
/// assert_eq!((trail.page, trail.in_page, trail.in_buf), (1, 0..2, 22..24));
///
/// assert!(segs.next().is_none());
/// ```
pub fn page_segments<const PS: usize>(offset: usize, len: usize) -> PageSegments<PS> {
    PageSegments {
        cursor: offset,
        end: offset + len,
        copied: 0,
    }
}

/// Validates an access request against the device geometry.
///
/// Returns the byte offset as `usize` on success. Checks run in a fixed
/// order so each failure maps to one distinct error kind, and a failed
/// check never touches the device.
///
/// # Type Parameters
/// * `DS` - Device size in bytes
///
/// # Errors
/// * [`EepromError::InvalidOffset`] - if `offset` lies past the device end
/// * [`EepromError::InvalidSize`] - if `size` is 0
/// * [`EepromError::OutOfBounds`] - if `offset + size` exceeds the device
///
/// # Example
/// ```
/// use paged_eeprom::helpers::check_params;
/// use paged_eeprom::EepromError;
///
/// assert_eq!(check_params::<8192>(100, 32), Ok(100));
/// assert_eq!(check_params::<8192>(8193, 1), Err(EepromError::InvalidOffset));
/// assert_eq!(check_params::<8192>(100, 0), Err(EepromError::InvalidSize));
/// assert_eq!(check_params::<8192>(8190, 10), Err(EepromError::OutOfBounds));
/// ```
pub fn check_params<const DS: usize>(offset: u32, size: usize) -> Result<usize, EepromError> {
    let offset = offset as usize;

    if offset > DS {
        return Err(EepromError::InvalidOffset);
    }
    if size == 0 {
        return Err(EepromError::InvalidSize);
    }

    let end = offset.checked_add(size).ok_or(EepromError::OutOfBounds)?;
    if end > DS {
        return Err(EepromError::OutOfBounds);
    }

    Ok(offset)
}

#[test]
fn aligned_range_yields_whole_pages_only() {
    let mut it = page_segments::<32>(0, 64);

    let first = it.next().unwrap();
    assert_eq!((first.page, first.in_page.clone(), first.in_buf.clone()), (0, 0..32, 0..32));

    let second = it.next().unwrap();
    assert_eq!((second.page, second.in_page.clone(), second.in_buf.clone()), (1, 0..32, 32..64));

    assert!(it.next().is_none());
}

#[test]
fn trailing_partial_page() {
    // Aligned offset, ragged size: one whole page then 18 bytes of the next
    let mut it = page_segments::<32>(0, 50);
    assert_eq!(it.next().unwrap().in_page, 0..32);

    let trail = it.next().unwrap();
    assert_eq!((trail.page, trail.in_page.clone(), trail.in_buf.clone()), (1, 0..18, 32..50));
    assert!(it.next().is_none());
}

#[test]
fn leading_partial_page() {
    // Ragged offset, range ends exactly on a page boundary
    let mut it = page_segments::<32>(10, 22);

    let lead = it.next().unwrap();
    assert_eq!((lead.page, lead.in_page.clone(), lead.in_buf.clone()), (0, 10..32, 0..22));
    assert!(it.next().is_none());
}

#[test]
fn both_boundaries_partial_with_interior() {
    // 10..100 over 32-byte pages: partial, whole, whole, partial
    let mut it = page_segments::<32>(10, 90);
    assert_eq!(it.len(), 4);

    assert_eq!(it.next().unwrap().in_page, 10..32);
    assert_eq!(it.next().unwrap().in_page, 0..32);
    assert_eq!(it.next().unwrap().in_page, 0..32);

    let trail = it.next().unwrap();
    assert_eq!((trail.page, trail.in_page.clone()), (3, 0..4));
    assert!(it.next().is_none());
}

#[test]
fn range_inside_single_page() {
    let mut it = page_segments::<32>(40, 5);
    let seg = it.next().unwrap();
    assert_eq!((seg.page, seg.in_page.clone(), seg.in_buf.clone()), (1, 8..13, 0..5));
    assert!(it.next().is_none());
}

#[test]
fn buffer_spans_are_contiguous_and_cover_len() {
    let mut expected_start = 0;
    for seg in page_segments::<32>(7, 201) {
        assert_eq!(seg.in_buf.start, expected_start);
        assert_eq!(seg.len(), seg.in_buf.len());
        expected_start = seg.in_buf.end;
    }
    assert_eq!(expected_start, 201);
}

#[test]
fn check_params_edge_cases() {
    // Offset equal to device size is not itself invalid; any read from
    // there trips the bounds check instead
    assert_eq!(check_params::<8192>(8192, 1), Err(EepromError::OutOfBounds));
    assert_eq!(check_params::<8192>(8193, 1), Err(EepromError::InvalidOffset));

    // Full-device request is the largest accepted one
    assert_eq!(check_params::<8192>(0, 8192), Ok(0));
    assert_eq!(check_params::<8192>(0, 8193), Err(EepromError::OutOfBounds));

    // Length overflow folds into the bounds check
    assert_eq!(check_params::<8192>(1, usize::MAX), Err(EepromError::OutOfBounds));
}

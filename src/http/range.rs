//! Byte-range parsing and resolution.
//!
//! Only the single-range form `bytes=<start>-<end>` is understood,
//! where either side may be empty. Anything else (multiple ranges,
//! other units, non-numeric bounds) is ignored and the full resource is
//! served; a range header is never a reason to fail a request.

use crate::http::types::slice_to_u64;
use memchr::memchr;

/// The raw bounds of a `Range: bytes=` header.
///
/// `None` means the bound was omitted in the header. An omitted start
/// means "from the beginning" (byte 0), not an RFC 9110 suffix range;
/// an omitted end means "to the end of the resource".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    start: Option<u64>,
    end: Option<u64>,
}

/// A range bounded to a concrete resource.
///
/// Always satisfies `offset + length <= resource_size`, so slicing with
/// it can never leave the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub offset: usize,
    pub length: usize,
}

impl RangeSpec {
    /// Parses the value that followed `"bytes="`, up to the end of its
    /// header line.
    ///
    /// Returns `None` for anything that is not exactly one
    /// `<digits?>-<digits?>` pair.
    pub(crate) fn parse(tail: &[u8]) -> Option<Self> {
        let value = match memchr(b'\r', tail) {
            Some(end) => &tail[..end],
            None => tail,
        };

        let dash = memchr(b'-', value)?;
        let (raw_start, raw_end) = (&value[..dash], &value[dash + 1..]);

        let start = match raw_start {
            b"" => None,
            digits => Some(slice_to_u64(digits)?),
        };
        let end = match raw_end {
            b"" => None,
            digits => Some(slice_to_u64(digits)?),
        };

        Some(RangeSpec { start, end })
    }

    /// Requested first byte, if one was given.
    #[inline(always)]
    pub const fn start(&self) -> Option<u64> {
        self.start
    }

    /// Requested last byte (inclusive), if one was given.
    #[inline(always)]
    pub const fn end(&self) -> Option<u64> {
        self.end
    }

    /// Bounds this spec to a resource of `resource_size` bytes.
    ///
    /// An omitted start reads from byte 0, an omitted end reads to the
    /// end of the resource, and the result is clamped so it never
    /// reaches past the resource. A start beyond the resource, or an
    /// end before the start, resolves to an empty slice rather than an
    /// error.
    pub fn resolve(self, resource_size: usize) -> ResolvedRange {
        let size = resource_size as u64;
        let start = self.start.unwrap_or(0);
        let offset = start.min(size);

        let requested = match self.end {
            Some(end) if end < start => 0,
            Some(end) => (end - start).saturating_add(1).min(size),
            None => size,
        };
        let length = requested.min(size - offset);

        ResolvedRange {
            offset: offset as usize,
            length: length as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing() {
        let cases: [(&[u8], Option<(Option<u64>, Option<u64>)>); 9] = [
            (b"100-200\r\nAccept: */*", Some((Some(100), Some(200)))),
            (b"0-0\r\n", Some((Some(0), Some(0)))),
            (b"-5\r\n", Some((None, Some(5)))),
            (b"3-\r\n", Some((Some(3), None))),
            (b"-\r\n", Some((None, None))),
            (b"7-9", Some((Some(7), Some(9)))),
            (b"abc-def\r\n", None),
            (b"100\r\n", None),
            (b"0-1,5-6\r\n", None),
        ];

        for (input, expected) in cases {
            let parsed = RangeSpec::parse(input).map(|r| (r.start(), r.end()));
            assert_eq!(parsed, expected, "input {:?}", String::from_utf8_lossy(input));
        }
    }

    fn spec(start: Option<u64>, end: Option<u64>) -> RangeSpec {
        RangeSpec { start, end }
    }

    #[test]
    fn resolution() {
        let cases = [
            // (spec, resource_size, offset, length)
            (spec(Some(0), Some(4)), 10, 0, 5),
            (spec(Some(2), None), 10, 2, 8),
            (spec(None, None), 10, 0, 10),
            (spec(Some(0), Some(999)), 10, 0, 10),
            (spec(Some(8), Some(20)), 10, 8, 2),
            (spec(Some(15), Some(20)), 10, 10, 0),
            (spec(Some(5), Some(2)), 10, 5, 0),
            (spec(Some(0), Some(0)), 10, 0, 1),
            (spec(None, None), 0, 0, 0),
        ];

        for (range, size, offset, length) in cases {
            let resolved = range.resolve(size);
            assert_eq!(
                resolved,
                ResolvedRange { offset, length },
                "range {range:?} over {size} bytes",
            );
            assert!(resolved.offset + resolved.length <= size);
        }
    }

    #[test]
    fn omitted_start_reads_from_zero() {
        // "bytes=-5" starts at byte 0; it is not a suffix range.
        let resolved = spec(None, Some(5)).resolve(10);
        assert_eq!(resolved, ResolvedRange { offset: 0, length: 6 });
    }
}

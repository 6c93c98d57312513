//! Buffer packing.
//!
//! Layout, in source order:
//!
//! ```text
//! section: '[' name NUL
//! entry:   key NUL value NUL
//! end:     NUL
//! ```

use crate::scan::{Line, Lines, Span, classify};

/// Marks the start of a section name in the packed buffer.
pub(crate) const SECTION_MARKER: u8 = b'[';
/// Ends every field, and the buffer itself.
pub(crate) const TERMINATOR: u8 = 0;

const fn put(out: &mut [u8], at: usize, byte: u8) -> usize {
    if at < out.len() {
        out[at] = byte;
    }
    at + 1
}

const fn copy(input: &[u8], span: Span, out: &mut [u8], mut at: usize) -> usize {
    let mut i = span.start;
    while i < span.end {
        at = put(out, at, input[i]);
        i += 1;
    }
    put(out, at, TERMINATOR)
}

/// Packs the sections, keys and values of `input` into `out` and returns the
/// number of bytes the layout needs, closing sentinel included.
///
/// `input` must already have passed [`measure`](crate::measure), and `out`
/// should hold `measure(input)? + 1` bytes. Lines that would fail validation
/// are skipped and bytes past the end of `out` are dropped, so the result is
/// unspecified (though never a panic) if either condition is broken.
pub const fn pack_into(input: &[u8], out: &mut [u8]) -> usize {
    let mut lines = Lines::new();
    let mut at = 0;
    while let Some((line, number)) = lines.next_line(input) {
        match classify(input, line, number) {
            Ok(Line::Section(name)) => {
                at = put(out, at, SECTION_MARKER);
                at = copy(input, name, out, at);
            }
            Ok(Line::Entry { key, value }) => {
                at = copy(input, key, out, at);
                at = copy(input, value, out, at);
            }
            Ok(Line::Skip) | Err(_) => {}
        }
    }
    put(out, at, TERMINATOR)
}

/// Packs into a fixed-size array; used by [`ini!`](crate::ini).
#[doc(hidden)]
#[must_use]
pub const fn pack_array<const N: usize>(input: &[u8]) -> [u8; N] {
    let mut out = [TERMINATOR; N];
    pack_into(input, &mut out);
    out
}

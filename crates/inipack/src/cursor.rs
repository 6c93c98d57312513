//! Forward cursor over a packed buffer.
//!
//! A cursor always sits at the start of a record (after any section markers
//! that precede it) or at the closing sentinel, which is the last byte of the
//! buffer. Because those positions are distinct, comparing positions is enough
//! to tell "on the last record" from "at the end".

use core::iter::FusedIterator;

use bstr::BStr;

use crate::pack::{SECTION_MARKER, TERMINATOR};

/// One key-value pair and the section it belongs to, borrowed from the packed
/// buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Record<'a> {
    /// The most recent `[section]` before this pair, if any.
    pub section: Option<&'a BStr>,
    /// Trimmed key. May be empty for a line like `=value`.
    pub key: &'a BStr,
    /// Trimmed value; never empty.
    pub value: &'a BStr,
}

/// A stateful position in a packed buffer.
///
/// Cursors are cheap to copy and only move forward. Two cursors are equal
/// when they point into the same buffer at the same record.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    packed: &'a [u8],
    pos: usize,
    next: usize,
    section: Option<&'a BStr>,
    current: Option<Record<'a>>,
}

impl<'a> Cursor<'a> {
    /// Opens a cursor at `pos`, entering any sections that start there.
    pub(crate) fn at(packed: &'a [u8], pos: usize) -> Self {
        let mut cursor = Self {
            packed,
            pos,
            next: pos,
            section: None,
            current: None,
        };
        cursor.load(pos);
        cursor
    }

    /// A cursor at the closing sentinel.
    pub(crate) fn end(packed: &'a [u8]) -> Self {
        Self::at(packed, Self::sentinel(packed))
    }

    fn sentinel(packed: &[u8]) -> usize {
        packed.len().saturating_sub(1)
    }

    /// Index of the terminator that closes the field starting at `from`.
    fn field_end(&self, from: usize) -> usize {
        let last = Self::sentinel(self.packed);
        self.packed
            .get(from..last)
            .and_then(|rest| rest.iter().position(|&b| b == TERMINATOR))
            .map_or(last, |offset| from + offset)
    }

    fn field(&self, from: usize, to: usize) -> &'a BStr {
        let packed: &'a [u8] = self.packed;
        BStr::new(packed.get(from..to).unwrap_or_default())
    }

    fn load(&mut self, mut pos: usize) {
        let last = Self::sentinel(self.packed);
        while pos < last && self.packed[pos] == SECTION_MARKER {
            let name_end = self.field_end(pos + 1);
            self.section = Some(self.field(pos + 1, name_end));
            pos = name_end + 1;
        }

        self.pos = pos.min(last);
        if pos >= last {
            self.current = None;
            self.next = self.pos;
            return;
        }

        let key_end = self.field_end(pos);
        let value_end = self.field_end(key_end + 1);
        self.current = Some(Record {
            section: self.section,
            key: self.field(pos, key_end),
            value: self.field(key_end + 1, value_end),
        });
        self.next = value_end + 1;
    }

    /// The record under the cursor, or `None` at the end.
    #[must_use]
    pub fn record(&self) -> Option<Record<'a>> {
        self.current
    }

    /// Whether the cursor has reached the closing sentinel.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Byte offset of the current record in the packed buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Moves to the next record. At the end this does nothing.
    pub fn advance(&mut self) {
        if self.current.is_some() {
            self.load(self.next);
        }
    }
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.packed, other.packed) && self.pos == other.pos
    }
}

impl Eq for Cursor<'_> {}

/// Iterates the records in `[begin, end)`.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    cursor: Cursor<'a>,
    end: Cursor<'a>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(begin: Cursor<'a>, end: Cursor<'a>) -> Self {
        Self { cursor: begin, end }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == self.end {
            return None;
        }
        let record = self.cursor.record()?;
        self.cursor.advance();
        Some(record)
    }
}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    const PACKED: &[u8] = b"top\x001\x00[a\x00[b\x00k\x00v\x00j\x00x\x00[c\x00\x00";

    fn bytes(s: &BStr) -> &[u8] {
        s
    }

    fn triples(mut cursor: Cursor<'_>) -> Vec<(Option<&[u8]>, &[u8], &[u8])> {
        let mut out = Vec::new();
        while let Some(r) = cursor.record() {
            out.push((r.section.map(bytes), bytes(r.key), bytes(r.value)));
            cursor.advance();
        }
        out
    }

    #[test]
    fn walks_records_and_tracks_sections() {
        let seen = triples(Cursor::at(PACKED, 0));
        assert_eq!(
            seen,
            [
                (None, &b"top"[..], &b"1"[..]),
                (Some(&b"b"[..]), &b"k"[..], &b"v"[..]),
                (Some(&b"b"[..]), &b"j"[..], &b"x"[..]),
            ]
        );
    }

    #[test]
    fn trailing_section_without_records_reaches_end() {
        let mut cursor = Cursor::at(PACKED, 0);
        for _ in 0..3 {
            cursor.advance();
        }
        assert!(cursor.is_end());
        assert_eq!(cursor, Cursor::end(PACKED));
    }

    #[test]
    fn last_record_is_not_end() {
        let mut cursor = Cursor::at(PACKED, 0);
        cursor.advance();
        cursor.advance();
        assert!(!cursor.is_end());
        assert_ne!(cursor, Cursor::end(PACKED));
        cursor.advance();
        assert_eq!(cursor, Cursor::end(PACKED));
    }

    #[test]
    fn empty_key_is_a_record() {
        let packed = b"\x00v\x00\x00";
        let cursor = Cursor::at(packed, 0);
        let record = cursor.record().expect("a record");
        assert_eq!(record.key, "");
        assert_eq!(record.value, "v");
    }

    #[test]
    fn advancing_past_end_stays_put() {
        let mut cursor = Cursor::end(PACKED);
        cursor.advance();
        assert!(cursor.is_end());
        assert_eq!(cursor.offset(), PACKED.len() - 1);
    }

    #[test]
    fn cursors_over_different_buffers_differ() {
        let copy = PACKED.to_vec();
        assert_ne!(Cursor::at(PACKED, 0), Cursor::at(&copy, 0));
    }

    #[test]
    fn iter_stops_at_end_cursor() {
        let begin = Cursor::at(PACKED, 0);
        let mut end = begin;
        end.advance();
        let keys: Vec<_> = Iter::new(begin, end).map(|r| r.key).collect();
        assert_eq!(keys, ["top"]);
    }

    #[test]
    fn empty_buffer_is_end() {
        assert!(Cursor::at(&[], 0).is_end());
        assert!(Cursor::at(&[0], 0).is_end());
    }
}

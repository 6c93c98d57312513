//! Byte and line classification shared by the sizing, packing and counting
//! passes.
//!
//! Everything here is `const fn` so the passes built on top can run inside a
//! `static` initializer. That rules out iterators and `?`; loops are written
//! with explicit indices instead.

use crate::error::{ConfigError, ErrorKind};

/// A half-open byte range of the raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl Span {
    pub(crate) const fn len(self) -> usize {
        self.end - self.start
    }
}

/// What a single line of input contributes to the packed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line {
    /// Blank or comment line.
    Skip,
    /// `[name]`; the span covers `name` only.
    Section(Span),
    /// `key = value`, both trimmed.
    Entry { key: Span, value: Span },
}

/// Anything above space except DEL. Bytes `>= 0x80` are printable so UTF-8
/// passes through untouched.
pub(crate) const fn is_printable(b: u8) -> bool {
    b > b' ' && b != 0x7f
}

pub(crate) const fn is_eol(b: u8) -> bool {
    b == b'\n' || b == 0
}

pub(crate) const fn is_comment(b: u8) -> bool {
    b == b';' || b == b'#'
}

/// First printable byte in `from..end`, or `end`.
pub(crate) const fn skip_blank(input: &[u8], mut from: usize, end: usize) -> usize {
    while from < end && !is_printable(input[from]) {
        from += 1;
    }
    from
}

/// Walks the input one line at a time, tracking 1-based line numbers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Lines {
    pos: usize,
    number: usize,
}

impl Lines {
    pub(crate) const fn new() -> Self {
        Self { pos: 0, number: 0 }
    }

    /// The next line (without its terminator) and its number.
    pub(crate) const fn next_line(&mut self, input: &[u8]) -> Option<(Span, usize)> {
        if self.pos >= input.len() {
            return None;
        }
        let start = self.pos;
        let mut end = start;
        while end < input.len() && !is_eol(input[end]) {
            end += 1;
        }
        self.pos = end + 1;
        self.number += 1;
        Some((Span { start, end }, self.number))
    }
}

const fn column(line: Span, at: usize) -> usize {
    at - line.start + 1
}

/// Classifies one line, locating the trimmed section name, key and value.
pub(crate) const fn classify(input: &[u8], line: Span, number: usize) -> Result<Line, ConfigError> {
    let start = skip_blank(input, line.start, line.end);
    if start == line.end || is_comment(input[start]) {
        return Ok(Line::Skip);
    }

    if input[start] == b'[' {
        let mut p = start + 1;
        while p < line.end && input[p] != b']' {
            p += 1;
        }
        if p == line.end {
            return Err(ConfigError::new(
                ErrorKind::UnterminatedSection,
                number,
                column(line, start),
            ));
        }
        return Ok(Line::Section(Span { start: start + 1, end: p }));
    }

    // The key is the first printable run; only whitespace may follow it.
    let mut p = start;
    let mut key_end = start;
    let mut key_closed = false;
    while p < line.end && input[p] != b'=' {
        if !is_printable(input[p]) {
            key_closed = true;
        } else if key_closed {
            return Err(ConfigError::new(ErrorKind::MalformedKey, number, column(line, p)));
        } else {
            key_end = p + 1;
        }
        p += 1;
    }
    if p == line.end {
        return Err(ConfigError::new(
            ErrorKind::MissingAssignment,
            number,
            column(line, p),
        ));
    }

    let value_start = skip_blank(input, p + 1, line.end);
    if value_start == line.end {
        return Err(ConfigError::new(ErrorKind::EmptyValue, number, column(line, p) + 1));
    }
    let mut value_end = line.end;
    while !is_printable(input[value_end - 1]) {
        value_end -= 1;
    }

    Ok(Line::Entry {
        key: Span { start, end: key_end },
        value: Span { start: value_start, end: value_end },
    })
}

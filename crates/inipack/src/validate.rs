//! Grammar validation and sizing.

use crate::{
    error::{ConfigError, ErrorKind},
    scan::{Line, Lines, classify, is_comment, skip_blank},
};

/// Validates `input` and returns the number of bytes its records occupy once
/// packed.
///
/// Sections cost their name plus a marker and a terminator; entries cost the
/// trimmed key and value plus one terminator each. The packed buffer needs one
/// more byte than this for the closing sentinel.
///
/// # Errors
///
/// Returns the first [`ConfigError`] found, in line order.
pub const fn measure(input: &[u8]) -> Result<usize, ConfigError> {
    let mut lines = Lines::new();
    let mut size = 0;
    while let Some((line, number)) = lines.next_line(input) {
        match classify(input, line, number) {
            Ok(Line::Skip) => {}
            Ok(Line::Section(name)) => size += name.len() + 2,
            Ok(Line::Entry { key, value }) => size += key.len() + value.len() + 2,
            Err(err) => return Err(err),
        }
    }
    Ok(size)
}

/// Counts key-value lines: every line that is not blank, a comment or a
/// section header.
///
/// Only meaningful for input that [`measure`] accepts.
#[must_use]
pub const fn count_records(input: &[u8]) -> usize {
    let mut lines = Lines::new();
    let mut count = 0;
    while let Some((line, _)) = lines.next_line(input) {
        let p = skip_blank(input, line.start, line.end);
        if p < line.end && !is_comment(input[p]) && input[p] != b'[' {
            count += 1;
        }
    }
    count
}

/// [`measure`] for `const` items: an invalid configuration becomes a compile
/// error naming the violated rule. Used by [`ini!`](crate::ini).
#[doc(hidden)]
#[must_use]
pub const fn validated_size(input: &[u8]) -> usize {
    match measure(input) {
        Ok(size) => size,
        Err(err) => match err.kind() {
            ErrorKind::UnterminatedSection => panic!("invalid INI: unterminated section header"),
            ErrorKind::MalformedKey => panic!("invalid INI: malformed key"),
            ErrorKind::MissingAssignment => panic!("invalid INI: missing assignment"),
            ErrorKind::EmptyValue => panic!("invalid INI: empty value"),
        },
    }
}

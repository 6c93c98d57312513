use alloc::{boxed::Box, vec};
use core::{fmt, str::FromStr};

use bstr::BStr;
use log::{debug, trace};

use crate::{
    cursor::{Cursor, Iter, Record},
    error::ConfigError,
    number::FromValue,
    pack::{TERMINATOR, pack_into},
    validate::{count_records, measure},
};

/// A validated, packed INI configuration.
///
/// All section names, keys and values live in one buffer that is written
/// once, when the configuration is built, and never again. Every query walks
/// that buffer and hands out borrows of it.
///
/// `S` is the buffer's storage: an owned `Box<[u8]>` for [`Config::parse`],
/// or a `&'static [u8]` for configurations packed at compile time with
/// [`ini!`](crate::ini).
///
/// ```
/// use inipack::Config;
///
/// let config = Config::parse("name = demo\n[server]\nport = 8080\n")?;
/// assert_eq!(config.get("name"), "demo");
/// assert_eq!(config.get_in_as::<u16>("server", "port"), 8080);
/// assert!(!config.contains("missing"));
/// # Ok::<(), inipack::ConfigError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Config<S = Box<[u8]>> {
    packed: S,
    len: usize,
}

/// A configuration packed at compile time by [`ini!`](crate::ini).
pub type StaticConfig = Config<&'static [u8]>;

impl Config {
    /// Validates and packs `input`.
    ///
    /// # Errors
    ///
    /// Fails with the first syntax error in `input`; nothing is built in that
    /// case.
    pub fn parse(input: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
        let input = input.as_ref();
        let size = measure(input).inspect_err(|err| debug!("rejected configuration: {err}"))?;
        trace!("configuration validated, {size} bytes of records");

        let mut packed = vec![TERMINATOR; size + 1].into_boxed_slice();
        let written = pack_into(input, &mut packed);
        debug_assert_eq!(written, packed.len());

        let len = count_records(input);
        debug!("packed {len} records into {} bytes", packed.len());
        Ok(Self { packed, len })
    }
}

impl<S> Config<S> {
    /// Wraps an already packed buffer holding `len` records.
    ///
    /// Used by [`ini!`](crate::ini). The buffer must come from
    /// [`pack_into`](crate::pack_into); anything else gives meaningless (but
    /// memory-safe) query results.
    #[doc(hidden)]
    pub const fn from_packed(packed: S, len: usize) -> Self {
        Self { packed, len }
    }
}

impl<S: AsRef<[u8]>> Config<S> {
    fn packed(&self) -> &[u8] {
        self.packed.as_ref()
    }

    /// The packed buffer: `[section NUL`, `key NUL value NUL`, closing `NUL`.
    #[must_use]
    pub fn as_packed(&self) -> &BStr {
        BStr::new(self.packed())
    }

    /// Number of key-value records. Section headers are not counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no key-value records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cursor on the first record.
    #[must_use]
    pub fn begin(&self) -> Cursor<'_> {
        Cursor::at(self.packed(), 0)
    }

    /// Cursor past the last record.
    #[must_use]
    pub fn end(&self) -> Cursor<'_> {
        Cursor::end(self.packed())
    }

    /// Cursor on the first record of section `name`, or [`end`](Self::end)
    /// if the section has no records.
    #[must_use]
    pub fn begin_section(&self, name: impl AsRef<[u8]>) -> Cursor<'_> {
        let name = name.as_ref();
        let mut cursor = self.begin();
        while let Some(record) = cursor.record() {
            if in_section(&record, name) {
                break;
            }
            cursor.advance();
        }
        cursor
    }

    /// Cursor on the first record after the first run of section `name`.
    #[must_use]
    pub fn end_section(&self, name: impl AsRef<[u8]>) -> Cursor<'_> {
        let name = name.as_ref();
        let mut cursor = self.begin_section(name);
        while let Some(record) = cursor.record() {
            if !in_section(&record, name) {
                break;
            }
            cursor.advance();
        }
        cursor
    }

    /// Iterates every record in source order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.begin(), self.end())
    }

    /// A view of the records in section `name`.
    ///
    /// Section names compare as exact bytes. If the same name heads several
    /// blocks, the view covers the first one only.
    #[must_use]
    pub fn section(&self, name: impl AsRef<[u8]>) -> Section<'_> {
        let name = name.as_ref();
        Section {
            begin: self.begin_section(name),
            end: self.end_section(name),
        }
    }

    /// The value of the first record with `key`, or `""`.
    #[must_use]
    pub fn get(&self, key: impl AsRef<[u8]>) -> &BStr {
        lookup(self.iter(), key.as_ref())
    }

    /// The value of the first record with `key` in `section`, or `""`.
    #[must_use]
    pub fn get_in(&self, section: impl AsRef<[u8]>, key: impl AsRef<[u8]>) -> &BStr {
        self.section(section).get(key)
    }

    /// [`get`](Self::get), converted with [`FromValue`]. Missing keys and
    /// unparseable values give zero.
    #[must_use]
    pub fn get_as<T: FromValue>(&self, key: impl AsRef<[u8]>) -> T {
        T::from_value(self.get(key))
    }

    /// [`get_in`](Self::get_in), converted with [`FromValue`].
    #[must_use]
    pub fn get_in_as<T: FromValue>(&self, section: impl AsRef<[u8]>, key: impl AsRef<[u8]>) -> T {
        T::from_value(self.get_in(section, key))
    }

    /// Whether any record has `key`.
    #[must_use]
    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        !self.get(key).is_empty()
    }

    /// Whether `section` has a record with `key`.
    #[must_use]
    pub fn contains_in(&self, section: impl AsRef<[u8]>, key: impl AsRef<[u8]>) -> bool {
        !self.get_in(section, key).is_empty()
    }

    /// Panics if the packed buffer disagrees with the record count or with
    /// key lookups.
    #[cfg(any(test, feature = "fuzzing"))]
    pub fn check_invariants(&self) {
        assert_eq!(self.packed().last(), Some(&TERMINATOR), "missing sentinel");
        assert_eq!(self.iter().count(), self.len, "record count mismatch");
        assert_eq!(self.begin() == self.end(), self.is_empty());

        let mut seen = alloc::collections::BTreeSet::new();
        for record in self {
            assert!(!record.value.is_empty(), "empty value for {:?}", record.key);
            if seen.insert(record.key) {
                assert_eq!(self.get(record.key), record.value);
            }
            if let Some(section) = record.section {
                assert!(!self.section(section).is_empty(), "section {section:?} lost its records");
            }
        }
    }
}

fn in_section(record: &Record<'_>, name: &[u8]) -> bool {
    record.section.is_some_and(|section| section == name)
}

fn lookup<'a>(mut records: Iter<'a>, key: &[u8]) -> &'a BStr {
    records
        .find(|record| record.key == key)
        .map(|record| record.value)
        .unwrap_or_default()
}

impl<S: AsRef<[u8]>> fmt::Debug for Config<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("len", &self.len)
            .field("packed", &self.as_packed())
            .finish()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Config {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&[u8]> for Config {
    type Error = ConfigError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl<'a, S: AsRef<[u8]>> IntoIterator for &'a Config<S> {
    type Item = Record<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The records of one section, as a `[begin, end)` cursor range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    begin: Cursor<'a>,
    end: Cursor<'a>,
}

impl<'a> Section<'a> {
    /// Cursor on the section's first record.
    #[must_use]
    pub fn begin(&self) -> Cursor<'a> {
        self.begin
    }

    /// Cursor past the section's last record.
    #[must_use]
    pub fn end(&self) -> Cursor<'a> {
        self.end
    }

    /// Whether the section has no records (or does not exist).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Iterates the section's records.
    #[must_use]
    pub fn iter(&self) -> Iter<'a> {
        Iter::new(self.begin, self.end)
    }

    /// The value of the first record with `key` in this section, or `""`.
    #[must_use]
    pub fn get(&self, key: impl AsRef<[u8]>) -> &'a BStr {
        lookup(self.iter(), key.as_ref())
    }

    /// [`get`](Self::get), converted with [`FromValue`].
    #[must_use]
    pub fn get_as<T: FromValue>(&self, key: impl AsRef<[u8]>) -> T {
        T::from_value(self.get(key))
    }

    /// Whether this section has a record with `key`.
    #[must_use]
    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        !self.get(key).is_empty()
    }
}

impl<'a> IntoIterator for Section<'a> {
    type Item = Record<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &Section<'a> {
    type Item = Record<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

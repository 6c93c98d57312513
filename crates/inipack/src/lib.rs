//! INI configuration, validated and packed before use.
//!
//! Text goes through two passes: [`measure`] checks the syntax and computes
//! how many bytes the records need, then [`pack_into`] copies every section
//! name, key and value into a single buffer of exactly that size. A
//! [`Config`] owns that buffer and answers queries by walking it with a
//! [`Cursor`]; nothing is parsed again after construction.
//!
//! Both passes are `const fn`, so [`ini!`] can do all of this while compiling
//! and leave only a static byte array in the binary.
//!
//! ```
//! use inipack::{StaticConfig, ini};
//!
//! static CONFIG: StaticConfig = ini!(
//!     "; defaults\n\
//!      [window]\n\
//!      width = 640\n\
//!      title = Hello there\n"
//! );
//!
//! assert_eq!(CONFIG.get_in_as::<u32>("window", "width"), 640);
//! assert_eq!(CONFIG.get_in("window", "title"), "Hello there");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod config;
mod cursor;
mod error;
mod number;
mod pack;
mod scan;
mod validate;

#[cfg(test)]
mod tests;

pub use bstr::BStr;
pub use config::{Config, Section, StaticConfig};
pub use cursor::{Cursor, Iter, Record};
pub use error::{ConfigError, ErrorKind};
pub use number::FromValue;
pub use pack::pack_into;
pub use validate::{count_records, measure};

#[doc(hidden)]
pub mod __private {
    pub use crate::{pack::pack_array, validate::validated_size};
}

/// Validates and packs an INI string at compile time, producing a
/// [`StaticConfig`].
///
/// The argument must be a `&'static str` constant expression, such as a
/// literal or `include_str!("app.ini")`. Invalid text fails the build with a
/// message naming the violated rule:
///
/// ```compile_fail
/// static BAD: inipack::StaticConfig = inipack::ini!("[unterminated\n");
/// ```
#[macro_export]
macro_rules! ini {
    ($text:expr $(,)?) => {{
        const TEXT: &[u8] = ($text).as_bytes();
        const SIZE: usize = $crate::__private::validated_size(TEXT) + 1;
        const LEN: usize = $crate::count_records(TEXT);
        static PACKED: [u8; SIZE] = $crate::__private::pack_array::<SIZE>(TEXT);
        $crate::StaticConfig::from_packed(&PACKED, LEN)
    }};
}

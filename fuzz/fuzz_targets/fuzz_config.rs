#![no_main]

use arbitrary::Arbitrary;
use inipack::{Config, measure};
use libfuzzer_sys::fuzz_target;

/// One line of input, biased toward the shapes the parser cares about.
#[derive(Debug, Arbitrary)]
enum Line<'a> {
    Section(&'a str),
    Entry { indent: u8, key: &'a str, value: &'a str },
    Comment(bool, &'a str),
    Raw(&'a [u8]),
}

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    lines: Vec<Line<'a>>,
    crlf: bool,
}

impl Input<'_> {
    fn render(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for line in &self.lines {
            match line {
                Line::Section(name) => {
                    out.push(b'[');
                    out.extend_from_slice(name.as_bytes());
                    out.push(b']');
                }
                Line::Entry { indent, key, value } => {
                    out.extend(std::iter::repeat_n(b' ', usize::from(indent % 4)));
                    out.extend_from_slice(key.as_bytes());
                    out.extend_from_slice(b" = ");
                    out.extend_from_slice(value.as_bytes());
                }
                Line::Comment(hash, text) => {
                    out.push(if *hash { b'#' } else { b';' });
                    out.extend_from_slice(text.as_bytes());
                }
                Line::Raw(bytes) => out.extend_from_slice(bytes),
            }
            out.extend_from_slice(if self.crlf { b"\r\n" } else { b"\n" });
        }
        out
    }
}

fuzz_target!(|input: Input<'_>| {
    let text = input.render();
    match Config::parse(&text) {
        Ok(config) => {
            config.check_invariants();
            let size = measure(&text).expect("parse accepted what measure rejects");
            assert_eq!(config.as_packed().len(), size + 1);
        }
        Err(err) => {
            assert!(err.line >= 1 && err.column >= 1);
            assert_eq!(measure(&text), Err(err));
        }
    }
});

use alloc::{boxed::Box, string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};

const KEY_CHARS: &[char] = &['a', 'b', 'k', 'x', '_', '.', '1', '9', 'ä'];
const VALUE_CHARS: &[char] = &['v', 'w', '0', '-', '.', '=', '[', ']', ';', '#', ' ', '\t', 'é'];
const PADDING: &[&str] = &["", " ", "  ", "\t", " \t "];

fn word(g: &mut Gen, chars: &[char]) -> String {
    let len = usize::arbitrary(g) % 6;
    (0..len).map(|_| *g.choose(chars).unwrap_or(&'a')).collect()
}

fn pad(g: &mut Gen) -> &'static str {
    g.choose(PADDING).copied().unwrap_or("")
}

/// A line of syntactically valid INI text, remembering its canonical parts.
#[derive(Debug, Clone)]
pub(crate) enum IniLine {
    Blank(&'static str),
    Comment(char, String),
    Section(String),
    Entry {
        key: String,
        value: String,
        pads: [&'static str; 4],
    },
}

impl IniLine {
    fn render(&self, out: &mut String) {
        match self {
            IniLine::Blank(ws) => out.push_str(ws),
            IniLine::Comment(marker, text) => {
                out.push(*marker);
                out.push_str(text);
            }
            IniLine::Section(name) => {
                out.push('[');
                out.push_str(name);
                out.push(']');
            }
            IniLine::Entry { key, value, pads } => {
                out.push_str(pads[0]);
                out.push_str(key);
                out.push_str(pads[1]);
                out.push('=');
                out.push_str(pads[2]);
                out.push_str(value);
                out.push_str(pads[3]);
            }
        }
    }
}

impl Arbitrary for IniLine {
    fn arbitrary(g: &mut Gen) -> Self {
        match usize::arbitrary(g) % 8 {
            0 => IniLine::Blank(pad(g)),
            1 => IniLine::Comment(*g.choose(&[';', '#']).unwrap_or(&';'), word(g, VALUE_CHARS)),
            2 => IniLine::Section(word(g, KEY_CHARS)),
            _ => {
                // Values must start and end with a printable character.
                let mut value = word(g, VALUE_CHARS);
                value.insert(0, *g.choose(&['v', '1', '[']).unwrap_or(&'v'));
                if value.ends_with(|c| c == ' ' || c == '\t') {
                    value.push('z');
                }
                IniLine::Entry {
                    key: word(g, KEY_CHARS),
                    value,
                    pads: [pad(g), pad(g), pad(g), pad(g)],
                }
            }
        }
    }
}

/// A valid INI document and the records it should produce.
#[derive(Debug, Clone)]
pub(crate) struct IniDoc {
    pub(crate) lines: Vec<IniLine>,
    pub(crate) crlf: bool,
}

/// `(section, key, value)` as the parser should report it.
pub(crate) type Expected = (Option<String>, String, String);

impl IniDoc {
    pub(crate) fn text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            line.render(&mut out);
            out.push_str(if self.crlf { "\r\n" } else { "\n" });
        }
        out
    }

    pub(crate) fn expected(&self) -> Vec<Expected> {
        let mut section = None;
        let mut records = Vec::new();
        for line in &self.lines {
            match line {
                IniLine::Section(name) => section = Some(name.clone()),
                IniLine::Entry { key, value, .. } => {
                    records.push((section.clone(), key.clone(), value.clone()));
                }
                IniLine::Blank(_) | IniLine::Comment(..) => {}
            }
        }
        records
    }
}

impl Arbitrary for IniDoc {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            lines: Vec::arbitrary(g),
            crlf: bool::arbitrary(g),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let crlf = self.crlf;
        Box::new(
            self.lines
                .shrink()
                .map(move |lines| IniDoc { lines, crlf }),
        )
    }
}

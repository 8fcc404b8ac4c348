//! Reads generated modules back into records.
//!
//! The generated source is only meant for rustc; tests cannot compile it, so
//! this parser understands exactly the record layout the encoder writes.

use embedfs::{FileRecord, ModTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub path: String,
    pub content: Vec<u8>,
    pub compressed: bool,
    pub original_size: u64,
    pub stored_size: u64,
    pub mod_time: ModTime,
}

impl ParsedRecord {
    pub fn as_record(&self) -> FileRecord<'_> {
        FileRecord {
            path: &self.path,
            content: &self.content,
            compressed: self.compressed,
            original_size: self.original_size,
            stored_size: self.stored_size,
            mod_time: self.mod_time,
        }
    }
}

#[derive(Debug, Default)]
pub struct ParsedModule {
    pub package: String,
    pub cfg: Option<String>,
    pub records: Vec<ParsedRecord>,
}

impl ParsedModule {
    pub fn file_records(&self) -> Vec<FileRecord<'_>> {
        self.records.iter().map(ParsedRecord::as_record).collect()
    }
}

#[derive(Default)]
struct Partial {
    path: Option<String>,
    content: Option<Vec<u8>>,
    compressed: Option<bool>,
    original_size: Option<u64>,
    stored_size: Option<u64>,
}

pub fn parse_module(source: &str) -> ParsedModule {
    assert!(
        source.starts_with("// Code generated by embedfs. DO NOT EDIT.\n"),
        "missing banner"
    );
    let mut module = ParsedModule::default();
    let mut partial = Partial::default();

    for line in source.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("#[cfg(") {
            module.cfg = Some(rest.trim_end_matches(")]").to_string());
        } else if let Some(rest) = line.strip_prefix("pub mod ") {
            module.package = rest.trim_end_matches(" {").to_string();
        } else if let Some(rest) = line.strip_prefix("path: ") {
            partial.path = Some(unescape_str(rest.trim_end_matches(',')));
        } else if let Some(rest) = line.strip_prefix("content: b") {
            partial.content = Some(unescape_bytes(rest.trim_end_matches(',')));
        } else if let Some(rest) = line.strip_prefix("compressed: ") {
            partial.compressed = Some(rest.trim_end_matches(',') == "true");
        } else if let Some(rest) = line.strip_prefix("original_size: ") {
            partial.original_size = Some(rest.trim_end_matches(',').parse().unwrap());
        } else if let Some(rest) = line.strip_prefix("stored_size: ") {
            partial.stored_size = Some(rest.trim_end_matches(',').parse().unwrap());
        } else if let Some(rest) = line.strip_prefix("mod_time: ::embedfs::ModTime::new(") {
            let args = rest.trim_end_matches("),");
            let (secs, nanos) = args.split_once(", ").unwrap();
            let finished = std::mem::take(&mut partial);
            module.records.push(ParsedRecord {
                path: finished.path.unwrap(),
                content: finished.content.unwrap(),
                compressed: finished.compressed.unwrap(),
                original_size: finished.original_size.unwrap(),
                stored_size: finished.stored_size.unwrap(),
                mod_time: ModTime::new(secs.parse().unwrap(), nanos.parse().unwrap()),
            });
        }
    }
    assert!(source.trim_end().ends_with('}'), "module is not closed");
    module
}

fn strip_quotes(literal: &str) -> &str {
    literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or_else(|| panic!("not a quoted literal: {literal}"))
}

fn unescape_bytes(literal: &str) -> Vec<u8> {
    let body = strip_quotes(literal).as_bytes();
    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        if body[i] != b'\\' {
            out.push(body[i]);
            i += 1;
            continue;
        }
        match body[i + 1] {
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'0' => out.push(0),
            b'\\' => out.push(b'\\'),
            b'"' => out.push(b'"'),
            b'\'' => out.push(b'\''),
            b'x' => {
                let hex = std::str::from_utf8(&body[i + 2..i + 4]).unwrap();
                out.push(u8::from_str_radix(hex, 16).unwrap());
                i += 2;
            }
            other => panic!("unexpected escape \\{}", other as char),
        }
        i += 2;
    }
    out
}

fn unescape_str(literal: &str) -> String {
    let body = strip_quotes(literal);
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('u') => {
                let hex: String = chars
                    .by_ref()
                    .skip(1)
                    .take_while(|&c| c != '}')
                    .collect();
                let code = u32::from_str_radix(&hex, 16).unwrap();
                out.push(char::from_u32(code).unwrap());
            }
            other => panic!("unexpected escape {other:?}"),
        }
    }
    out
}

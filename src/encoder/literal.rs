//! Rust literal rendering for generated source.

use std::io::{self, Write};

/// Largest slice handed to the sink at once while escaping content.
const CHUNK: usize = 8 * 1024;

/// Write `bytes` as a Rust byte string literal (`b"..."`).
///
/// Printable ASCII is kept as is; everything else uses `\n`, `\r`, `\t`, `\0`
/// or `\xNN` escapes, which keeps the literal on one line.
pub fn write_byte_string<W: Write>(sink: &mut W, bytes: &[u8]) -> io::Result<()> {
    sink.write_all(b"b\"")?;
    let mut buf = Vec::with_capacity(CHUNK * 4);
    for chunk in bytes.chunks(CHUNK) {
        buf.clear();
        for &byte in chunk {
            escape_byte(byte, &mut buf);
        }
        sink.write_all(&buf)?;
    }
    sink.write_all(b"\"")
}

fn escape_byte(byte: u8, out: &mut Vec<u8>) {
    match byte {
        b'"' => out.extend_from_slice(b"\\\""),
        b'\\' => out.extend_from_slice(b"\\\\"),
        b'\n' => out.extend_from_slice(b"\\n"),
        b'\r' => out.extend_from_slice(b"\\r"),
        b'\t' => out.extend_from_slice(b"\\t"),
        b'\0' => out.extend_from_slice(b"\\0"),
        0x20..=0x7e => out.push(byte),
        _ => {
            const HEX: &[u8; 16] = b"0123456789abcdef";
            out.extend_from_slice(b"\\x");
            out.push(HEX[(byte >> 4) as usize]);
            out.push(HEX[(byte & 0x0f) as usize]);
        }
    }
}

/// Render `s` as a Rust string literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            ' '..='~' => out.push(c),
            _ => out.extend(c.escape_default()),
        }
    }
    out.push('"');
    out
}

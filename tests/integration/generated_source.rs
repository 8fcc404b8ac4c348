//! Checked-in encoder output, compiled into the test binary.
//!
//! `fixtures/assets.rs` is stored uncompressed and must be reproduced byte for
//! byte. `fixtures/compressed.rs` carries a gzip record; its compressed bytes
//! depend on the deflate backend, so regeneration is compared after decoding.

use crate::integration::support::parse_module;
use chrono::{DateTime, TimeZone, Utc};
use embedfs::{generate, EmbeddedFs, EncodeError, EncoderOptions, FileKind};
use std::io::Read;

mod generated {
    include!("../fixtures/assets.rs");
    include!("../fixtures/compressed.rs");
}

const QUOTED: &str = "docs/caf\u{e9} \"quoted\".txt";

fn at(secs: i64, nanos: u32) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, nanos).unwrap()
}

fn all_bytes() -> Vec<u8> {
    (0..=255u8).collect()
}

fn regenerate_assets() -> String {
    let options = EncoderOptions::default().with_tags(["debug_assertions", "not(debug_assertions)"]);
    let all = all_bytes();
    let files: [(&str, &[u8], DateTime<Utc>); 4] = [
        ("index.html", b"<h1>embedfs</h1>\n", at(1_700_000_000, 0)),
        (QUOTED, "caf\u{e9}\n".as_bytes(), at(1_600_000_000, 123)),
        ("bin/all-bytes.bin", &all, at(-1, 500)),
        ("empty.txt", b"", at(0, 0)),
    ];
    let (sink, _) = generate::<_, EncodeError, _>(Vec::new(), "assets", options, |encoder| {
        for (path, content, mod_time) in files {
            encoder.add_file(path, content, mod_time)?;
        }
        Ok(())
    })
    .unwrap();
    String::from_utf8(sink).unwrap()
}

fn app_log() -> Vec<u8> {
    b"GET /index.html 200\n".repeat(100)
}

#[test]
fn included_module_serves_every_file() {
    let fs = generated::assets::fs().unwrap();
    assert_eq!(fs.len(), 4);
    assert_eq!(fs.read("index.html").unwrap(), b"<h1>embedfs</h1>\n");
    assert_eq!(fs.read_to_string(QUOTED).unwrap(), "caf\u{e9}\n");
    assert_eq!(fs.read("/bin/all-bytes.bin").unwrap(), all_bytes());
    assert!(fs.read("empty.txt").unwrap().is_empty());

    let meta = fs.metadata("bin/all-bytes.bin").unwrap();
    assert_eq!(meta.mod_time, at(-1, 500));
    assert_eq!(meta.size, 256);

    let root: Vec<(String, FileKind)> = fs
        .read_dir("")
        .unwrap()
        .into_iter()
        .map(|m| (m.name, m.kind))
        .collect();
    assert_eq!(
        root,
        vec![
            ("bin".to_string(), FileKind::Directory),
            ("docs".to_string(), FileKind::Directory),
            ("empty.txt".to_string(), FileKind::File),
            ("index.html".to_string(), FileKind::File),
        ]
    );
    assert_eq!(
        fs.metadata("docs").unwrap().mod_time,
        at(1_600_000_000, 123)
    );
}

#[test]
fn included_module_inflates_compressed_records() {
    let mut log = generated::compressed::open("logs/app.log")
        .unwrap()
        .into_file()
        .unwrap();
    let mut content = Vec::new();
    log.read_to_end(&mut content).unwrap();
    assert_eq!(content, app_log());

    let fs = generated::compressed::fs().unwrap();
    let record = &fs.records()[0];
    assert!(record.compressed);
    assert!(record.stored_size < record.original_size);
    assert_eq!(fs.read("tiny.txt").unwrap(), b"x");
}

#[test]
fn regeneration_is_byte_identical() {
    let first = regenerate_assets();
    assert_eq!(first, include_str!("../fixtures/assets.rs"));
    assert_eq!(regenerate_assets(), first);
}

#[test]
fn regenerated_compressed_module_matches_fixture() {
    let options = EncoderOptions::default().with_gzip(true);
    let log = app_log();
    let (sink, _) = generate::<_, EncodeError, _>(Vec::new(), "compressed", options, |encoder| {
        encoder.add_file("logs/app.log", &log, at(1_650_000_000, 42))?;
        encoder.add_file("tiny.txt", b"x", at(1_650_000_000, 42))?;
        Ok(())
    })
    .unwrap();

    let fresh = parse_module(&String::from_utf8(sink).unwrap());
    let fixture = parse_module(include_str!("../fixtures/compressed.rs"));
    assert_eq!(fresh.package, fixture.package);
    assert_eq!(fresh.records.len(), fixture.records.len());
    for (new, old) in fresh.records.iter().zip(&fixture.records) {
        assert_eq!(new.path, old.path);
        assert_eq!(new.compressed, old.compressed);
        assert_eq!(new.original_size, old.original_size);
        assert_eq!(new.mod_time, old.mod_time);
    }

    let fresh_records = fresh.file_records();
    let fixture_records = fixture.file_records();
    let fresh_fs = EmbeddedFs::new(&fresh_records).unwrap();
    let fixture_fs = EmbeddedFs::new(&fixture_records).unwrap();
    for path in ["logs/app.log", "tiny.txt"] {
        assert_eq!(fresh_fs.read(path).unwrap(), fixture_fs.read(path).unwrap());
    }
}

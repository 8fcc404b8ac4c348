//! Runtime contracts of a module shaped like the encoder's output.

use embedfs::{EmbeddedFs, FileKind, FileSystem, Handle, VfsError};
use std::io::{ErrorKind, Read};
use std::thread;

#[allow(dead_code)]
mod assets {
    static RECORDS: &[::embedfs::FileRecord<'static>] = &[
        ::embedfs::FileRecord {
            path: "index.html",
            content: b"<h1>hi</h1>\n",
            compressed: false,
            original_size: 12,
            stored_size: 12,
            mod_time: ::embedfs::ModTime::new(1_600_000_000, 0),
        },
        ::embedfs::FileRecord {
            path: "css/site.css",
            content: b"body { color: red; }",
            compressed: false,
            original_size: 20,
            stored_size: 20,
            mod_time: ::embedfs::ModTime::new(1_600_000_100, 5),
        },
    ];

    static FS: ::embedfs::EmbeddedFsCell = ::embedfs::EmbeddedFsCell::new(RECORDS);

    pub fn fs() -> ::core::result::Result<&'static ::embedfs::EmbeddedFs<'static>, ::embedfs::VfsError> {
        FS.get()
    }

    pub fn open(path: &str) -> ::core::result::Result<::embedfs::Handle<'static>, ::embedfs::VfsError> {
        fs()?.open(path)
    }
}

#[allow(dead_code)]
mod broken {
    static RECORDS: &[::embedfs::FileRecord<'static>] = &[
        ::embedfs::FileRecord {
            path: "a",
            content: b"",
            compressed: false,
            original_size: 0,
            stored_size: 0,
            mod_time: ::embedfs::ModTime::new(0, 0),
        },
        ::embedfs::FileRecord {
            path: "a/b",
            content: b"",
            compressed: false,
            original_size: 0,
            stored_size: 0,
            mod_time: ::embedfs::ModTime::new(0, 0),
        },
    ];

    static FS: ::embedfs::EmbeddedFsCell = ::embedfs::EmbeddedFsCell::new(RECORDS);

    pub fn fs() -> ::core::result::Result<&'static ::embedfs::EmbeddedFs<'static>, ::embedfs::VfsError> {
        FS.get()
    }
}

#[test]
fn generated_accessors_serve_files() {
    let mut handle = assets::open("/index.html").unwrap().into_file().unwrap();
    let mut text = String::new();
    handle.read_to_string(&mut text).unwrap();
    assert_eq!(text, "<h1>hi</h1>\n");

    let css = assets::open("css").unwrap();
    assert!(css.is_dir());
    let stat = css.stat();
    assert_eq!(stat.name, "css");
    assert_eq!(stat.kind, FileKind::Directory);
}

#[test]
fn shared_filesystem_across_threads() {
    let workers: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let fs = assets::fs().unwrap();
                let path = if i % 2 == 0 { "index.html" } else { "css/site.css" };
                fs.read(path).unwrap().len()
            })
        })
        .collect();
    for (i, worker) in workers.into_iter().enumerate() {
        let expected = if i % 2 == 0 { 12 } else { 20 };
        assert_eq!(worker.join().unwrap(), expected);
    }
    assert!(std::ptr::eq(assets::fs().unwrap(), assets::fs().unwrap()));
}

#[test]
fn corrupt_manifest_is_reported_on_every_access() {
    assert!(matches!(broken::fs(), Err(VfsError::CorruptManifest(_))));
    assert!(matches!(broken::fs(), Err(VfsError::CorruptManifest(_))));
}

#[test]
fn generic_filesystem_surface() {
    let fs: &dyn FileSystem = assets::fs().unwrap();
    let root: Vec<String> = fs.read_dir("").unwrap().into_iter().map(|m| m.name).collect();
    assert_eq!(root, vec!["css", "index.html"]);
    assert!(matches!(fs.open("css/site.css"), Ok(Handle::File(_))));
    assert!(fs.create("new.txt").is_err());
}

#[test]
fn errors_map_to_io_kinds() {
    let fs: &EmbeddedFs<'static> = assets::fs().unwrap();
    let missing: std::io::Error = fs.open("missing.txt").unwrap_err().into();
    assert_eq!(missing.kind(), ErrorKind::NotFound);

    let directory = fs.read_to_string("css").unwrap_err();
    assert_eq!(directory.kind(), ErrorKind::InvalidInput);

    let mut file = fs.open("index.html").unwrap().into_file().unwrap();
    let write = std::io::Write::write(&mut file, b"x").unwrap_err();
    assert_eq!(write.kind(), ErrorKind::Unsupported);
}

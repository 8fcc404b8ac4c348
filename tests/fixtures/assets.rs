// Code generated by embedfs. DO NOT EDIT.

#[cfg(any(debug_assertions, not(debug_assertions)))]
#[allow(dead_code)]
pub mod assets {
    static RECORDS: &[::embedfs::FileRecord<'static>] = &[
        ::embedfs::FileRecord {
            path: "index.html",
            content: b"<h1>embedfs</h1>\n",
            compressed: false,
            original_size: 17,
            stored_size: 17,
            mod_time: ::embedfs::ModTime::new(1700000000, 0),
        },
        ::embedfs::FileRecord {
            path: "docs/caf\u{e9} \"quoted\".txt",
            content: b"caf\xc3\xa9\n",
            compressed: false,
            original_size: 6,
            stored_size: 6,
            mod_time: ::embedfs::ModTime::new(1600000000, 123),
        },
        ::embedfs::FileRecord {
            path: "bin/all-bytes.bin",
            content: b"\0\x01\x02\x03\x04\x05\x06\x07\x08\t\n\x0b\x0c\r\x0e\x0f\x10\x11\x12\x13\x14\x15\x16\x17\x18\x19\x1a\x1b\x1c\x1d\x1e\x1f !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~\x7f\x80\x81\x82\x83\x84\x85\x86\x87\x88\x89\x8a\x8b\x8c\x8d\x8e\x8f\x90\x91\x92\x93\x94\x95\x96\x97\x98\x99\x9a\x9b\x9c\x9d\x9e\x9f\xa0\xa1\xa2\xa3\xa4\xa5\xa6\xa7\xa8\xa9\xaa\xab\xac\xad\xae\xaf\xb0\xb1\xb2\xb3\xb4\xb5\xb6\xb7\xb8\xb9\xba\xbb\xbc\xbd\xbe\xbf\xc0\xc1\xc2\xc3\xc4\xc5\xc6\xc7\xc8\xc9\xca\xcb\xcc\xcd\xce\xcf\xd0\xd1\xd2\xd3\xd4\xd5\xd6\xd7\xd8\xd9\xda\xdb\xdc\xdd\xde\xdf\xe0\xe1\xe2\xe3\xe4\xe5\xe6\xe7\xe8\xe9\xea\xeb\xec\xed\xee\xef\xf0\xf1\xf2\xf3\xf4\xf5\xf6\xf7\xf8\xf9\xfa\xfb\xfc\xfd\xfe\xff",
            compressed: false,
            original_size: 256,
            stored_size: 256,
            mod_time: ::embedfs::ModTime::new(-1, 500),
        },
        ::embedfs::FileRecord {
            path: "empty.txt",
            content: b"",
            compressed: false,
            original_size: 0,
            stored_size: 0,
            mod_time: ::embedfs::ModTime::new(0, 0),
        },
    ];

    static FS: ::embedfs::EmbeddedFsCell = ::embedfs::EmbeddedFsCell::new(RECORDS);

    /// Embedded filesystem, built on first use.
    pub fn fs() -> ::core::result::Result<&'static ::embedfs::EmbeddedFs<'static>, ::embedfs::VfsError> {
        FS.get()
    }

    pub fn open(path: &str) -> ::core::result::Result<::embedfs::Handle<'static>, ::embedfs::VfsError> {
        fs()?.open(path)
    }
}

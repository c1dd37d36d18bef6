#![allow(dead_code)]

use std::io::{Cursor, Write};

use packview::{CancelFlag, LoadOptions, LoadReport, MemoryReader, Progress, load_package};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Build a ZIP in memory. Names ending in `/` become directory entries.
pub fn archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Options that keep the scan on the test's own task.
pub fn options() -> LoadOptions {
    LoadOptions {
        yield_between_entries: false,
        ..LoadOptions::default()
    }
}

pub async fn load(bytes: Vec<u8>) -> LoadReport {
    load_with(bytes, &options()).await
}

pub async fn load_with(bytes: Vec<u8>, options: &LoadOptions) -> LoadReport {
    let reader = MemoryReader::new(bytes);
    load_package(&reader, options, &CancelFlag::new(), |_| {})
        .await
        .unwrap()
}

/// Load and collect every progress notification.
pub async fn load_collecting(bytes: Vec<u8>) -> (LoadReport, Vec<Progress>) {
    let reader = MemoryReader::new(bytes);
    let mut seen = Vec::new();
    let report = load_package(&reader, &options(), &CancelFlag::new(), |p| seen.push(p.clone()))
        .await
        .unwrap();
    (report, seen)
}

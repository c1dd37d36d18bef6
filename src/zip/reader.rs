use flate2::Crc;
use flate2::read::DeflateDecoder;
use std::io::Read;

use crate::io::ReadAt;
use anyhow::{Context, Result, bail};

use super::parser::CentralDirectory;
use super::structures::{ArchiveEntry, CompressionMethod};

/// Opened archive: the parsed central directory plus on-demand entry reads.
///
/// Entries are read one at a time and the returned buffer belongs to the
/// caller, so peak memory follows the largest single entry rather than the
/// archive.
pub struct ArchiveReader<'a, R: ReadAt + ?Sized> {
    directory: CentralDirectory<'a, R>,
    entries: Vec<ArchiveEntry>,
}

impl<'a, R: ReadAt + ?Sized> ArchiveReader<'a, R> {
    /// Parse the central directory. Fails if `reader` is not a ZIP archive.
    pub async fn open(reader: &'a R) -> Result<Self> {
        let directory = CentralDirectory::new(reader);
        let entries = directory.entries().await?;
        Ok(Self { directory, entries })
    }

    /// Entries in central directory order
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Read and decompress the full content of one entry.
    ///
    /// The decompressed length and CRC-32 must match the directory record.
    pub async fn read(&self, entry: &ArchiveEntry) -> Result<Vec<u8>> {
        if entry.is_encrypted() {
            bail!("{} is encrypted", entry.name);
        }

        let data_offset = self.directory.data_offset(entry).await?;
        let size = self.directory.reader().size();
        if data_offset.saturating_add(entry.compressed_size) > size {
            bail!(
                "{} claims {} bytes past the end of the archive",
                entry.name,
                entry.compressed_size
            );
        }

        let mut raw = vec![0u8; entry.compressed_size as usize];
        self.directory
            .reader()
            .read_exact_at(data_offset, &mut raw)
            .await?;

        let data = match entry.compression_method {
            CompressionMethod::Stored => raw,
            CompressionMethod::Deflate => inflate(&raw, entry.uncompressed_size)
                .with_context(|| format!("Cannot inflate {}", entry.name))?,
            CompressionMethod::Unknown(method) => {
                bail!("{} uses unsupported compression method {}", entry.name, method)
            }
        };

        if data.len() as u64 != entry.uncompressed_size {
            bail!(
                "{} expanded to {} bytes, directory says {}",
                entry.name,
                data.len(),
                entry.uncompressed_size
            );
        }

        let mut crc = Crc::new();
        crc.update(&data);
        if crc.sum() != entry.crc32 {
            bail!("CRC mismatch in {}", entry.name);
        }

        Ok(data)
    }
}

/// Inflate a raw DEFLATE stream, reading at most one byte past `expected`
/// so an oversized stream is detected without expanding all of it.
fn inflate(raw: &[u8], expected: u64) -> Result<Vec<u8>> {
    // Do not trust the declared size for the up-front allocation
    let capacity = expected.min(raw.len() as u64 * 16) as usize;
    let mut out = Vec::with_capacity(capacity);
    DeflateDecoder::new(raw)
        .take(expected.saturating_add(1))
        .read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::DeflateEncoder;
    use std::io::Write;

    #[test]
    fn inflate_respects_expected_length() {
        let payload = b"{\"hello\":\"world\"}".repeat(10);
        let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
        enc.write_all(&payload).unwrap();
        let compressed = enc.finish().unwrap();

        assert_eq!(inflate(&compressed, payload.len() as u64).unwrap(), payload);
        // a lying directory record yields one extra byte, which read() rejects
        assert_eq!(inflate(&compressed, 5).unwrap().len(), 6);
    }

    #[test]
    fn inflate_rejects_garbage() {
        assert!(inflate(&[0xFF, 0xFF, 0xFF, 0xFF], 10).is_err());
    }
}

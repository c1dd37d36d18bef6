use super::ReadAt;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::io::{Read, Seek, SeekFrom};
use std::sync::Mutex;

/// Adapter over a caller-owned seekable stream.
///
/// Pass `&mut stream` to keep ownership: the adapter never closes the
/// stream, it only seeks and reads. Reads are serialized through a mutex
/// since `Seek` moves a shared cursor.
pub struct SeekableReader<S> {
    stream: Mutex<S>,
    size: u64,
}

impl<S: Read + Seek> SeekableReader<S> {
    /// Wrap `stream`, measuring its length by seeking to the end.
    ///
    /// Fails when the stream refuses to seek.
    pub fn new(mut stream: S) -> Result<Self> {
        let size = stream
            .seek(SeekFrom::End(0))
            .context("Archive stream is not seekable")?;
        stream.seek(SeekFrom::Start(0))?;
        Ok(Self {
            stream: Mutex::new(stream),
            size,
        })
    }

    pub fn into_inner(self) -> S {
        self.stream.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<S: Read + Seek + Send> ReadAt for SeekableReader<S> {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        if offset >= self.size {
            return Ok(0);
        }
        let mut stream = self
            .stream
            .lock()
            .map_err(|_| anyhow!("Archive stream lock poisoned"))?;
        stream.seek(SeekFrom::Start(offset))?;
        Ok(stream.read(buf)?)
    }

    fn size(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct Unseekable;

    impl Read for Unseekable {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Ok(0)
        }
    }

    impl Seek for Unseekable {
        fn seek(&mut self, _pos: SeekFrom) -> std::io::Result<u64> {
            Err(std::io::Error::new(std::io::ErrorKind::Unsupported, "pipe"))
        }
    }

    #[tokio::test]
    async fn borrows_caller_stream() {
        let mut cursor = Cursor::new(b"hello world".to_vec());
        {
            let reader = SeekableReader::new(&mut cursor).unwrap();
            assert_eq!(reader.size(), 11);
            let mut buf = [0u8; 5];
            reader.read_exact_at(6, &mut buf).await.unwrap();
            assert_eq!(&buf, b"world");
        }
        // still usable by the caller afterwards
        assert_eq!(cursor.get_ref().len(), 11);
    }

    #[test]
    fn rejects_unseekable_stream() {
        let err = SeekableReader::new(Unseekable).err().unwrap();
        assert!(err.to_string().contains("not seekable"));
    }
}

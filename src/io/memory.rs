use super::ReadAt;
use anyhow::Result;
use async_trait::async_trait;

/// Archive bytes already held in memory, e.g. a dropped file.
///
/// Generic over the buffer so callers can hand over a `Vec<u8>`, a
/// `bytes`-like owned buffer, or borrow a slice they keep ownership of.
pub struct MemoryReader<B> {
    bytes: B,
}

impl<B: AsRef<[u8]>> MemoryReader<B> {
    pub fn new(bytes: B) -> Self {
        Self { bytes }
    }

    pub fn into_inner(self) -> B {
        self.bytes
    }
}

#[async_trait]
impl<B: AsRef<[u8]> + Send + Sync> ReadAt for MemoryReader<B> {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let data = self.bytes.as_ref();
        let Ok(start) = usize::try_from(offset) else {
            return Ok(0);
        };
        if start >= data.len() {
            return Ok(0);
        }
        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        Ok(n)
    }

    fn size(&self) -> u64 {
        self.bytes.as_ref().len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn short_read_at_tail() {
        let reader = MemoryReader::new(b"abcdef".to_vec());
        let mut buf = [0u8; 4];
        assert_eq!(reader.read_at(4, &mut buf).await.unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
        assert_eq!(reader.read_at(6, &mut buf).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn borrowed_slice() {
        let data = [1u8, 2, 3];
        let reader = MemoryReader::new(&data[..]);
        let mut buf = [0u8; 3];
        reader.read_exact_at(0, &mut buf).await.unwrap();
        assert_eq!(buf, data);
    }
}

use anyhow::Result;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Chunk size for partial hashing (64 KiB)
const CHUNK_SIZE: usize = 64 * 1024;

/// Compute a quick fingerprint: SHA-256 over the file's byte length, its
/// first 64 KiB, and — when the file exceeds twice the chunk size — its
/// last 64 KiB.
///
/// This is a fingerprint, not a proof of equality: two distinct files
/// whose size, head and tail chunks all coincide will collide. The
/// tradeoff buys duplicate candidate filtering on multi-gigabyte files
/// without reading them fully.
pub fn quick_hash(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();

    let mut hasher = Sha256::new();
    hasher.update(len.to_le_bytes());

    let mut buffer = vec![0u8; CHUNK_SIZE];
    let head = read_up_to(&mut file, &mut buffer)?;
    hasher.update(&buffer[..head]);

    if len > (CHUNK_SIZE as u64) * 2 {
        file.seek(SeekFrom::Start(len - CHUNK_SIZE as u64))?;
        let tail = read_up_to(&mut file, &mut buffer)?;
        hasher.update(&buffer[..tail]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Compute the full SHA-256 of a file's entire contents. Provided for
/// verification; the duplicate grouper deliberately relies on
/// [`quick_hash`] alone.
pub fn full_hash(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(1024 * 1024, file);

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 1024 * 1024];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Fill as much of `buf` as the reader yields before EOF
fn read_up_to(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

use crate::tail::{CHUNK_SIZE, TailBuffer, WindowError};
use std::io::{self, Read};

/// Reads until `buf` is full or the reader reports end of stream.
///
/// A short count means end of stream. If an error follows a partial read,
/// the bytes already read are returned and the error surfaces on the next call.
pub fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if total > 0 => {
                tracing::debug!(error = %e, total, "read error after partial read");
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

/// Appends at most `limit` bytes from `reader` to `buf`.
///
/// Stops early at end of stream. Returns the number of bytes copied.
pub fn copy_exact<R: Read + ?Sized>(
    reader: &mut R,
    limit: u64,
    buf: &mut TailBuffer,
) -> Result<u64, WindowError> {
    if limit == 0 {
        return Ok(0);
    }

    let mut copied = 0u64;
    while copied < limit {
        let want = (limit - copied).min(CHUNK_SIZE as u64) as usize;
        let n = read_full(reader, buf.spare_mut(want)?)?;
        if n == 0 {
            break;
        }
        buf.commit(n);
        copied += n as u64;
    }
    Ok(copied)
}

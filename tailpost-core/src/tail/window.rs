use crate::conf::CountUnit;
use crate::tail::{CHUNK_SIZE, TailBuffer, WindowError, copy_exact, read_full};
use std::io::{self, Read, Seek, SeekFrom};

/// Assumed upper bound for a line when estimating how far back to seek.
///
/// Only affects where scanning starts; a window whose lines turn out longer
/// is found by scanning further back.
pub const LINE_LENGTH_ESTIMATE: u64 = 64 * 1024;

/// Where to start reading a file of `size` bytes to find its last `count` units.
///
/// Returns `None` for files reporting size 0 (pseudo-filesystem entries), which
/// must be read from the current position instead.
pub fn seek_offset(size: u64, count: u64, unit: CountUnit) -> Option<u64> {
    if size == 0 {
        return None;
    }
    let back = match unit {
        CountUnit::Bytes => count,
        // Small counts are padded so short files are read whole.
        CountUnit::Lines => {
            (count | 0xF).min(i32::MAX as u64 / LINE_LENGTH_ESTIMATE) * LINE_LENGTH_ESTIMATE
        }
    };
    Some(size.saturating_sub(back))
}

/// Fills `buf` with the last `count` lines or bytes of `reader`.
///
/// The reader is left at the position following the last byte read, which is
/// returned so following can resume from there. Sources that cannot seek
/// (pipes, character devices) are read forward from where they are, and the
/// returned offset counts the bytes consumed.
pub fn tail_window<R: Read + Seek>(
    reader: &mut R,
    count: u64,
    unit: CountUnit,
    buf: &mut TailBuffer,
) -> Result<u64, WindowError> {
    buf.clear();

    let Some(current) = seekable(reader.stream_position())? else {
        return if count == 0 {
            Ok(0)
        } else {
            stream_forward(reader, count, unit, buf)
        };
    };

    // An empty window is trivial; follow starts at the current end.
    let end = reader.seek(SeekFrom::End(0))?;
    if count == 0 {
        return Ok(end);
    }

    let Some(mut start) = seek_offset(end, count, unit) else {
        reader.seek(SeekFrom::Start(current))?;
        return Ok(current + stream_forward(reader, count, unit, buf)?);
    };

    reader.seek(SeekFrom::Start(start))?;
    let read = match unit {
        // Seekable: the window is exactly the bytes from the seek point on.
        CountUnit::Bytes => copy_exact(reader, count, buf)?,
        // Lines longer than the estimate: widen the scan until the window's
        // first line is known to be whole.
        CountUnit::Lines => loop {
            let (read, trimmed) = stream_lines(reader, count, buf)?;
            if trimmed || start == 0 {
                break read;
            }
            start = start.saturating_sub(end - start);
            buf.clear();
            reader.seek(SeekFrom::Start(start))?;
        },
    };

    Ok(start + read)
}

/// `None` when the source has no notion of position.
fn seekable(position: io::Result<u64>) -> Result<Option<u64>, WindowError> {
    match position {
        Ok(pos) => Ok(Some(pos)),
        Err(e) if e.kind() == io::ErrorKind::NotSeekable => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Streams the rest of `reader`, keeping only the last `count` units.
/// Returns the number of bytes read.
fn stream_forward<R: Read>(
    reader: &mut R,
    count: u64,
    unit: CountUnit,
    buf: &mut TailBuffer,
) -> Result<u64, WindowError> {
    match unit {
        CountUnit::Bytes => stream_bytes(reader, count, buf),
        CountUnit::Lines => Ok(stream_lines(reader, count, buf)?.0),
    }
}

fn stream_bytes<R: Read>(reader: &mut R, count: u64, buf: &mut TailBuffer) -> Result<u64, WindowError> {
    let mut read = 0u64;
    loop {
        let n = read_full(reader, buf.spare_mut(CHUNK_SIZE)?)?;
        if n == 0 {
            return Ok(read);
        }
        buf.commit(n);
        read += n as u64;

        if buf.len() as u64 > count {
            buf.discard_front(buf.len() - count as usize);
        }
    }
}

/// Keeps the last `count` lines in `buf`, where an unterminated final line
/// counts as one of them.
///
/// Returns the bytes read and whether anything was dropped from the front,
/// i.e. whether the buffer is known to start right after a line terminator.
///
/// `seen` tracks the terminators currently held in the buffer.
fn stream_lines<R: Read>(
    reader: &mut R,
    count: u64,
    buf: &mut TailBuffer,
) -> Result<(u64, bool), WindowError> {
    let mut seen = 0u64;
    let mut read = 0u64;
    let mut trimmed = false;
    loop {
        let start = buf.len();
        let n = read_full(reader, buf.spare_mut(CHUNK_SIZE)?)?;
        if n == 0 {
            return Ok((read, trimmed));
        }
        buf.commit(n);
        read += n as u64;

        let chunk = &buf.as_slice()[start..];
        let in_chunk = count_newlines(chunk);
        if seen + in_chunk < count {
            seen += in_chunk;
            continue;
        }

        let extra = u64::from(chunk.last() != Some(&b'\n'));
        let excess = seen + in_chunk + extra - count;
        let cut = after_nth_newline(buf.as_slice(), excess);
        if cut > 0 {
            buf.discard_front(cut);
            trimmed = true;
        }
        seen = count - extra;
    }
}

fn count_newlines(bytes: &[u8]) -> u64 {
    bytes.iter().filter(|&&b| b == b'\n').count() as u64
}

/// Offset just past the `n`-th newline, or 0 for `n == 0`.
fn after_nth_newline(bytes: &[u8], n: u64) -> usize {
    if n == 0 {
        return 0;
    }
    bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'\n')
        .nth((n - 1) as usize)
        .map_or(bytes.len(), |(i, _)| i + 1)
}

use super::numbered_lines;
use crate::conf::CountUnit;
use crate::tail::{LINE_LENGTH_ESTIMATE, TailBuffer, seek_offset, tail_window};
use pretty_assertions::assert_eq;
use std::io::{self, Cursor, Read, Seek, SeekFrom};

fn window(contents: &[u8], count: u64, unit: CountUnit) -> (Vec<u8>, u64) {
    let mut reader = Cursor::new(contents.to_vec());
    let mut buf = TailBuffer::new();
    let end = tail_window(&mut reader, count, unit, &mut buf).expect("window should compute");
    (buf.as_slice().to_vec(), end)
}

#[test]
fn last_two_of_five_lines() {
    let contents = numbered_lines(5);

    let (out, end) = window(contents.as_bytes(), 2, CountUnit::Lines);

    assert_eq!(out, b"line 4\nline 5\n");
    assert_eq!(end, contents.len() as u64);
}

#[test]
fn unterminated_last_line_counts_as_a_line() {
    let (out, _) = window(b"a\nb\nc", 2, CountUnit::Lines);
    assert_eq!(out, b"b\nc");

    let (out, _) = window(b"a\nb\nc", 1, CountUnit::Lines);
    assert_eq!(out, b"c");
}

#[test]
fn fewer_lines_than_requested_yields_whole_file() {
    let contents = numbered_lines(3);

    let (out, _) = window(contents.as_bytes(), 10, CountUnit::Lines);

    assert_eq!(out, contents.as_bytes());
}

#[test]
fn lines_spanning_many_chunks() {
    let contents = numbered_lines(20_000);
    let expected: String = (19_991..=20_000).map(|i| format!("line {i}\n")).collect();

    let (out, _) = window(contents.as_bytes(), 10, CountUnit::Lines);

    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn lines_longer_than_the_estimate() {
    let long = "x".repeat(2 * 16 * LINE_LENGTH_ESTIMATE as usize);
    let contents = format!("first\n{long}\nlast\n");

    let (out, _) = window(contents.as_bytes(), 2, CountUnit::Lines);

    assert_eq!(String::from_utf8(out).unwrap(), format!("{long}\nlast\n"));
}

#[test]
fn bytes_window_is_min_of_count_and_size() {
    let (out, end) = window(b"hello world", 5, CountUnit::Bytes);
    assert_eq!(out, b"world");
    assert_eq!(end, 11);

    let (out, _) = window(b"hello world", 100, CountUnit::Bytes);
    assert_eq!(out, b"hello world");
}

#[test]
fn zero_count_emits_nothing_and_ends_at_eof() {
    for unit in [CountUnit::Lines, CountUnit::Bytes] {
        let (out, end) = window(b"some\ncontent\n", 0, unit);
        assert!(out.is_empty());
        assert_eq!(end, 13);
    }
}

#[test]
fn empty_input_yields_empty_window() {
    let (out, end) = window(b"", 10, CountUnit::Lines);
    assert!(out.is_empty());
    assert_eq!(end, 0);
}

#[test]
fn window_is_stable_across_repeated_runs() {
    let contents = numbered_lines(100);
    let mut reader = Cursor::new(contents.into_bytes());
    let mut buf = TailBuffer::new();

    let first_end = tail_window(&mut reader, 7, CountUnit::Lines, &mut buf).unwrap();
    let first = buf.as_slice().to_vec();
    reader.seek(SeekFrom::Start(0)).unwrap();
    let second_end = tail_window(&mut reader, 7, CountUnit::Lines, &mut buf).unwrap();

    assert_eq!(first, buf.as_slice());
    assert_eq!(first_end, second_end);
}

/// A reader that refuses to seek, like a pipe.
struct Unseekable(Cursor<Vec<u8>>);

impl Read for Unseekable {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Seek for Unseekable {
    fn seek(&mut self, _: SeekFrom) -> io::Result<u64> {
        Err(io::ErrorKind::NotSeekable.into())
    }
}

#[test]
fn unseekable_source_is_read_forward() {
    let contents = numbered_lines(5);
    let mut buf = TailBuffer::new();

    let mut reader = Unseekable(Cursor::new(contents.clone().into_bytes()));
    let end = tail_window(&mut reader, 2, CountUnit::Lines, &mut buf).unwrap();
    assert_eq!(buf.as_slice(), b"line 4\nline 5\n");
    assert_eq!(end, contents.len() as u64);

    let mut reader = Unseekable(Cursor::new(contents.clone().into_bytes()));
    let end = tail_window(&mut reader, 3, CountUnit::Bytes, &mut buf).unwrap();
    assert_eq!(buf.as_slice(), b" 5\n");
    assert_eq!(end, contents.len() as u64);
}

#[test]
fn unseekable_source_with_zero_count_reads_nothing() {
    let mut reader = Unseekable(Cursor::new(b"pending\n".to_vec()));
    let mut buf = TailBuffer::new();

    let end = tail_window(&mut reader, 0, CountUnit::Lines, &mut buf).unwrap();

    assert!(buf.as_slice().is_empty());
    assert_eq!(end, 0);
    assert_eq!(reader.0.position(), 0);
}

#[cfg(unix)]
#[test]
fn fifo_window_keeps_last_lines() {
    use std::fs::{File, OpenOptions};
    use std::io::Write;
    use std::process::Command;

    let dir = tempfile::TempDir::new().unwrap();
    let fifo = dir.path().join("pipe");
    let status = Command::new("mkfifo").arg(&fifo).status().unwrap();
    assert!(status.success());

    let writer = std::thread::spawn({
        let fifo = fifo.clone();
        move || {
            let mut pipe = OpenOptions::new().write(true).open(fifo).unwrap();
            pipe.write_all(b"l1\nl2\nl3\n").unwrap();
        }
    });

    let mut reader = File::open(&fifo).unwrap();
    let mut buf = TailBuffer::new();
    let end = tail_window(&mut reader, 2, CountUnit::Lines, &mut buf).unwrap();
    writer.join().unwrap();

    assert_eq!(buf.as_slice(), b"l2\nl3\n");
    assert_eq!(end, 9);
}

#[test]
fn seek_offset_pads_small_line_counts() {
    let size = 100 * LINE_LENGTH_ESTIMATE;

    assert_eq!(
        seek_offset(size, 1, CountUnit::Lines),
        Some(size - 15 * LINE_LENGTH_ESTIMATE)
    );
    assert_eq!(
        seek_offset(size, 20, CountUnit::Lines),
        Some(size - 31 * LINE_LENGTH_ESTIMATE)
    );
    assert_eq!(seek_offset(1000, 10, CountUnit::Lines), Some(0));
    assert_eq!(seek_offset(1000, 10, CountUnit::Bytes), Some(990));
    assert_eq!(seek_offset(0, 10, CountUnit::Lines), None);
}

#[test]
fn seek_offset_caps_huge_line_counts() {
    let cap = i32::MAX as u64 / LINE_LENGTH_ESTIMATE * LINE_LENGTH_ESTIMATE;
    let size = 2 * cap;

    assert_eq!(seek_offset(size, u64::MAX >> 1, CountUnit::Lines), Some(size - cap));
}

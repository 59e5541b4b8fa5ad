mod window_tests;

use crate::conf::{CountUnit, Direction, FailurePolicy, TailConfig};
use crate::output::{Dispatcher, MemorySink};
use crate::tail::Session;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub(super) fn lines_config(count: u64) -> TailConfig {
    TailConfig {
        count,
        unit: CountUnit::Lines,
        direction: Direction::FromTail,
        poll_interval: Duration::from_millis(10),
        ..TailConfig::default()
    }
}

pub(super) fn session_with(
    config: TailConfig,
    paths: &[PathBuf],
    sink: &MemorySink,
    on_failure: FailurePolicy,
) -> Session<Vec<u8>> {
    let dispatcher = Dispatcher::new(Vec::new(), Box::new(sink.clone()), on_failure);
    Session::open(config, paths, dispatcher).expect("session should open")
}

pub(super) fn session(config: TailConfig, paths: &[PathBuf], sink: &MemorySink) -> Session<Vec<u8>> {
    session_with(config, paths, sink, FailurePolicy::Drop)
}

pub(super) fn output(session: &Session<Vec<u8>>) -> String {
    String::from_utf8_lossy(session.dispatcher().output()).into_owned()
}

pub(super) fn append(path: &Path, bytes: &str) {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .unwrap();
    file.write_all(bytes.as_bytes()).unwrap();
}

pub(super) fn numbered_lines(n: usize) -> String {
    (1..=n).map(|i| format!("line {i}\n")).collect()
}

pub(super) fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

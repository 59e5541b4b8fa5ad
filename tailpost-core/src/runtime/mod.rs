//! Process-level wiring: pid file, shutdown signals and the tailing run.

mod pid;
mod run;
mod shutdown;

pub use pid::{remove_pid, write_pid};
pub use run::{run, tail_files};
pub use shutdown::ShutdownHandle;

//! Tail window and follow engine.
//!
//! A [`Session`] owns everything mutable: the tracked files, the tail buffer,
//! the dispatcher and the exit status. It runs in two phases:
//!
//! 1. **Initial window** - per file, in registration order, either the last N
//!    lines/bytes ([`tail_window`]) or everything from the N-th line/byte on
//!    ([`SkipFilter`]) is emitted.
//! 2. **Follow** - every poll interval each file is checked for replacement and
//!    truncation, then newly appended bytes are read and dispatched.
//!
//! All of it runs on a single execution sequence; the inter-tick sleep is the
//! only suspension point.

mod buffer;
mod copy;
mod error;
mod exit;
mod follow;
mod identity;
mod registry;
mod session;
mod skip;
#[cfg(test)]
mod tests;
mod window;

pub use buffer::{CHUNK_SIZE, TailBuffer};
pub use copy::{copy_exact, read_full};
pub use error::{EngineError, WindowError};
pub use exit::ExitStatus;
pub use follow::{FileState, TickOutcome};
pub use identity::FileIdentity;
pub use registry::{FileHandle, Registry, TrackedFile};
pub use session::Session;
pub use skip::SkipFilter;
pub use window::{LINE_LENGTH_ESTIMATE, seek_offset, tail_window};

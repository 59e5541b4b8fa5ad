mod banner;
mod dispatcher;
pub mod sink;

pub use banner::{Banners, banner};
pub use dispatcher::Dispatcher;
pub use sink::{ContentSink, HttpSink, MemorySink, NullSink, SinkError, build_sink};

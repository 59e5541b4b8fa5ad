pub mod collector;
pub mod fixtures;
pub mod tracing;

pub use self::collector::{Collector, Received, closed_port_url};
pub use self::fixtures::{append, fixture_path, runtime_config};
pub use self::tracing::{CapturedEvent, init_test_tracing};

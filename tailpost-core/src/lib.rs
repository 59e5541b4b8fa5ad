pub mod cli;
pub mod conf;
pub mod logging;
pub mod output;
pub mod runtime;
pub mod tail;

// Adapters layer: concrete implementations of the domain ports.

pub mod response_log;

pub use response_log::{FileResponseLog, MemoryResponseLog};

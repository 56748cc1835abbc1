pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{FileResponseLog, MemoryResponseLog};
pub use crate::config::{suite_config::SuiteConfig, HarnessConfig};
pub use crate::core::{cases::default_cases, dispatcher::RequestDispatcher, suite::TestSuite};
pub use crate::utils::error::{HarnessError, Result};

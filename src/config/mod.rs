//! Configuration for the `waitfor-http` binary.
//!
//! Provides YAML-based loading of the check target and timeout. The probe
//! itself takes no configuration: everything here only shapes the one-shot
//! command line host.

mod app;
mod validation;

pub use app::{CheckConfig, DEFAULT_TIMEOUT};
pub use validation::{ConfigError, expand_env_vars, parse_duration};

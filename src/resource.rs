//! Resource Layer
//!
//! Pluggable readiness probes keyed by URL scheme. A host builds a
//! [`Registry`] from [`ResourceConfig`] descriptors once at startup, resolves
//! each target URL to a [`Resource`] and calls [`Resource::test`] with a
//! [`Context`](crate::Context) that bounds the attempt.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use waitfor_http::{Context, Registry, resource::http};
//!
//! # async fn example() -> Result<(), waitfor_http::ResourceError> {
//! let registry = Registry::new([http::use_config()]);
//! let ctx = Context::background().with_timeout(Duration::from_secs(5));
//! registry.test(&ctx, "https://example.com/healthz").await?;
//! # Ok(())
//! # }
//! ```

pub mod http;
mod registry;
mod traits;

pub use registry::Registry;
pub use traits::{Resource, ResourceConfig, ResourceError, ResourceFactory};

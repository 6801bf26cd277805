//! waitfor-http - HTTP readiness probe
//!
//! This crate provides an HTTP/HTTPS resource for "wait until available"
//! orchestrators. It can be registered with a host as a scheme-keyed factory,
//! or run as a one-shot check with the `waitfor-http` executable.
//!
//! # Architecture
//!
//! - **Resources**: [`Resource`] trait, [`ResourceConfig`] descriptors and the
//!   [`Registry`] dispatch table
//! - **HTTP probe**: [`resource::http`], one GET per check, ready on `[200, 400)`
//! - **Context**: [`Context`] carries cancellation and deadline into each check
//! - **Config**: YAML settings for the command line host
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use waitfor_http::{Context, resource::http};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let url = url::Url::parse("http://localhost:8080/healthz")?;
//!     let probe = http::new(Some(url))?;
//!
//!     let ctx = Context::background().with_timeout(Duration::from_secs(5));
//!     probe.test(&ctx).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod context;
pub mod resource;

pub use context::{Context, ContextError};
pub use resource::{Registry, Resource, ResourceConfig, ResourceError, ResourceFactory};

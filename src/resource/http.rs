//! HTTP resource for probing HTTP/HTTPS endpoints.
//!
//! - [`HttpResource`]: single GET readiness check
//! - [`use_config`]: registration descriptor for `http` and `https`

mod probe;

pub use probe::{
    HttpResource, Readiness, SCHEME, SCHEME_TLS, classify, new, status_line, use_config,
};

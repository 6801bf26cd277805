//! Scheme-keyed dispatch table for resource factories.

use std::collections::HashMap;

use url::Url;

use crate::context::Context;
use crate::resource::{Resource, ResourceConfig, ResourceError, ResourceFactory};

/// Read-only mapping from URL scheme to resource factory.
///
/// Populated once from [`ResourceConfig`] descriptors; there is no way to
/// register or remove a scheme afterwards.
#[derive(Clone, Default)]
pub struct Registry {
    factories: HashMap<String, ResourceFactory>,
}

impl Registry {
    /// Build a registry from descriptors.
    ///
    /// Schemes are matched case-insensitively. If two descriptors claim the
    /// same scheme, the later one wins.
    pub fn new(configs: impl IntoIterator<Item = ResourceConfig>) -> Self {
        let mut factories = HashMap::new();
        for config in configs {
            for scheme in config.scheme {
                let scheme = scheme.to_ascii_lowercase();
                if factories.insert(scheme.clone(), config.factory).is_some() {
                    tracing::warn!(scheme = %scheme, "Scheme registered twice, keeping the last factory");
                }
            }
        }

        tracing::debug!(schemes = factories.len(), "Resource registry built");
        Self { factories }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("schemes", &self.schemes())
            .finish()
    }
}

impl Registry {
    /// Registered schemes, sorted.
    pub fn schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        schemes.sort_unstable();
        schemes
    }

    /// Factory registered for `scheme`, if any.
    pub fn factory(&self, scheme: &str) -> Option<ResourceFactory> {
        self.factories.get(&scheme.to_ascii_lowercase()).copied()
    }

    /// Parse `raw` and build the matching resource.
    ///
    /// # Errors
    /// - `ResourceError::InvalidUrl` if `raw` is not a valid URL
    /// - `ResourceError::UnsupportedScheme` if no factory handles its scheme
    /// - whatever the factory itself returns
    pub fn resolve(&self, raw: &str) -> Result<Box<dyn Resource>, ResourceError> {
        let url = Url::parse(raw).map_err(|source| ResourceError::InvalidUrl {
            url: raw.to_string(),
            source,
        })?;

        let factory = self
            .factory(url.scheme())
            .ok_or_else(|| ResourceError::UnsupportedScheme(url.scheme().to_string()))?;

        factory(Some(url))
    }

    /// Resolve `raw` and run exactly one readiness check against it.
    pub async fn test(&self, ctx: &Context, raw: &str) -> Result<(), ResourceError> {
        let resource = self.resolve(raw)?;
        resource.test(ctx).await
    }
}

use std::collections::HashMap;

use etims_domain::{EtimsError, Result, RouteDescriptor};

/// Immutable lookup from route key to descriptor.
///
/// Built once from configuration and shared read-only between concurrent
/// dispatches.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, RouteDescriptor>,
}

impl RouteTable {
    /// Build a table, rejecting blank keys, blank templates and duplicates.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = RouteDescriptor>) -> Result<Self> {
        let mut routes = HashMap::new();

        for descriptor in descriptors {
            if descriptor.key.trim().is_empty() {
                return Err(EtimsError::Config("Route with an empty key".into()));
            }
            if descriptor.path_template.trim().is_empty() {
                return Err(EtimsError::Config(format!(
                    "Route {} has an empty path template",
                    descriptor.key
                )));
            }
            if routes.contains_key(&descriptor.key) {
                return Err(EtimsError::Config(format!(
                    "Route {} is defined more than once",
                    descriptor.key
                )));
            }
            routes.insert(descriptor.key.clone(), descriptor);
        }

        Ok(Self { routes })
    }

    /// Descriptor registered under `key`.
    pub fn get(&self, key: &str) -> Option<&RouteDescriptor> {
        self.routes.get(key)
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.routes.contains_key(key)
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no route is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

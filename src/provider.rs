//! The provider capability: a source that can produce a full settings map.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::FigstackError;

/// A flat configuration mapping: dotted keys to stringified values.
///
/// Every source reduces to this shape, whatever its native type richness.
/// Typed access happens at read time, when [`Config`](crate::Config)
/// accessors parse the strings back out.
pub type Settings = BTreeMap<String, String>;

/// A source of configuration.
///
/// Implementations produce their complete [`Settings`] map on every call, or
/// fail. Providers never cache on their own; wrap one in
/// [`OnceLoader`](crate::OnceLoader) or [`CachedLoader`](crate::CachedLoader)
/// when re-reading the source on every load is too expensive.
pub trait Provider: Send + Sync {
    /// Produce the full flat mapping for this source.
    fn load(&self) -> Result<Settings, FigstackError>;
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn load(&self) -> Result<Settings, FigstackError> {
        (**self).load()
    }
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn load(&self) -> Result<Settings, FigstackError> {
        (**self).load()
    }
}

impl<P: Provider + ?Sized> Provider for &P {
    fn load(&self) -> Result<Settings, FigstackError> {
        (**self).load()
    }
}

/// An in-memory provider.
///
/// Hands out a copy of whatever it currently holds and never fails. Cloning
/// a `Static` produces another handle to the same underlying map, so a value
/// changed through [`set`](Static::set) is visible to every clone, including
/// one already registered with a [`Config`](crate::Config) or wrapped in a
/// loader.
#[derive(Clone, Default)]
pub struct Static {
    settings: Arc<RwLock<Settings>>,
}

impl Static {
    pub fn new<I, K, V>(settings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            settings: Arc::new(RwLock::new(
                settings
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            )),
        }
    }

    /// Insert or replace a single setting.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.write().insert(key.into(), value.into());
    }
}

impl Provider for Static {
    fn load(&self) -> Result<Settings, FigstackError> {
        Ok(self.settings.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_loads_its_map() {
        let provider = Static::new([("global.timeout", "30"), ("local.enabled", "true")]);
        let settings = provider.load().unwrap();
        assert_eq!(settings.get("global.timeout").unwrap(), "30");
        assert_eq!(settings.get("local.enabled").unwrap(), "true");
        assert_eq!(settings.len(), 2);
    }

    #[test]
    fn set_replaces_a_value() {
        let provider = Static::new([("mode", "dev")]);
        provider.set("mode", "prod");
        assert_eq!(provider.load().unwrap().get("mode").unwrap(), "prod");
    }

    #[test]
    fn clones_share_the_underlying_map() {
        let provider = Static::new([("mode", "dev")]);
        let handle = provider.clone();
        handle.set("mode", "prod");
        assert_eq!(provider.load().unwrap().get("mode").unwrap(), "prod");
    }

    #[test]
    fn load_returns_an_independent_copy() {
        let provider = Static::new([("mode", "dev")]);
        let mut settings = provider.load().unwrap();
        settings.insert("mode".into(), "mutated".into());
        assert_eq!(provider.load().unwrap().get("mode").unwrap(), "dev");
    }

    #[test]
    fn provider_works_through_box_arc_and_ref() {
        fn load_via<P: Provider>(provider: P) -> Settings {
            provider.load().unwrap()
        }

        let provider = Static::new([("k", "v")]);
        assert_eq!(load_via(&provider).get("k").unwrap(), "v");
        assert_eq!(
            load_via(Box::new(provider.clone()) as Box<dyn Provider>)
                .get("k")
                .unwrap(),
            "v"
        );
        assert_eq!(
            load_via(Arc::new(provider) as Arc<dyn Provider>).get("k").unwrap(),
            "v"
        );
    }
}

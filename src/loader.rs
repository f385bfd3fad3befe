//! Caching decorators for providers.
//!
//! Providers re-read their source on every load. When that is too expensive,
//! wrap the provider in one of these loaders instead of caching inside the
//! provider: [`OnceLoader`] freezes the first outcome forever, while
//! [`CachedLoader`] holds the latest success until someone calls
//! [`invalidate`](CachedLoader::invalidate).

use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::error::FigstackError;
use crate::provider::{Provider, Settings};

/// Runs the wrapped provider's load at most once, ever.
///
/// The first call's outcome is stored permanently and replayed to every
/// later caller; that includes a failed load, so a broken source stays
/// broken until the loader itself is rebuilt. Under concurrent first calls,
/// exactly one thread runs the provider and the rest block until the
/// outcome is in.
///
/// Every call hands back its own copy of the stored map, so callers cannot
/// corrupt the cache through their result.
///
/// ```
/// use figstack::{OnceLoader, Provider, Static};
///
/// let source = Static::new([("local.enabled", "true")]);
/// let loader = OnceLoader::new(source.clone());
///
/// assert_eq!(loader.load().unwrap().get("local.enabled").unwrap(), "true");
/// source.set("local.enabled", "false");
/// assert_eq!(loader.load().unwrap().get("local.enabled").unwrap(), "true");
/// ```
pub struct OnceLoader<P> {
    provider: P,
    outcome: OnceLock<Result<Settings, FigstackError>>,
}

impl<P: Provider> OnceLoader<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            outcome: OnceLock::new(),
        }
    }
}

impl<P: Provider> Provider for OnceLoader<P> {
    fn load(&self) -> Result<Settings, FigstackError> {
        self.outcome
            .get_or_init(|| {
                tracing::debug!("first load, running wrapped provider");
                self.provider.load()
            })
            .clone()
    }
}

/// Memoizes the wrapped provider's load until invalidated.
///
/// The loader starts out invalidated: the first load runs the provider and
/// keeps the result for later calls. Only successes are kept. A failed load
/// leaves the loader invalidated so the next call retries, which makes this
/// the right wrapper for sources with transient failures (the deliberate
/// opposite of [`OnceLoader`]).
///
/// [`invalidate`](CachedLoader::invalidate) discards the held map; calling
/// it on an already-invalidated loader does nothing.
pub struct CachedLoader<P> {
    provider: P,
    cached: Mutex<Option<Settings>>,
}

impl<P: Provider> CachedLoader<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cached: Mutex::new(None),
        }
    }

    /// Discard the cached settings; the next load runs the provider again.
    pub fn invalidate(&self) {
        tracing::debug!("cache invalidated");
        *self.cached.lock() = None;
    }
}

impl<P: Provider> Provider for CachedLoader<P> {
    fn load(&self) -> Result<Settings, FigstackError> {
        let mut cached = self.cached.lock();

        match &*cached {
            Some(settings) => Ok(settings.clone()),
            None => {
                tracing::debug!("cache empty, running wrapped provider");
                let settings = self.provider.load()?;
                *cached = Some(settings.clone());
                Ok(settings)
            }
        }
    }
}

use std::collections::HashMap;

use crate::error::FigstackError;
use crate::provider::{Provider, Settings};

/// Renames another provider's keys onto the canonical namespace.
///
/// Built from a fixed table of `{source key → destination key}`. On every
/// load the wrapped provider runs first, then each key found in the table is
/// replaced by its destination; keys not in the table pass through
/// untouched. The table never changes after construction, so the output is a
/// pure function of the wrapped provider's output.
///
/// This is the tool for sources whose native naming does not line up with
/// the keys the application reads, e.g. a shared file that nests this app's
/// settings under its own prefix:
///
/// ```
/// use figstack::{Provider, Resolver, Static};
///
/// let shared = Static::new([("items.server.timeout", "30")]);
/// let resolved = Resolver::new(shared, [("items.server.timeout", "server.timeout")]);
///
/// let settings = resolved.load().unwrap();
/// assert_eq!(settings.get("server.timeout").unwrap(), "30");
/// ```
pub struct Resolver<P> {
    provider: P,
    mappings: HashMap<String, String>,
}

impl<P: Provider> Resolver<P> {
    pub fn new<I, K, V>(provider: P, mappings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            provider,
            mappings: mappings
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }
}

impl<P: Provider> Provider for Resolver<P> {
    fn load(&self) -> Result<Settings, FigstackError> {
        let settings = self.provider.load()?;

        Ok(settings
            .into_iter()
            .map(|(key, value)| match self.mappings.get(&key) {
                Some(destination) => (destination.clone(), value),
                None => (key, value),
            })
            .collect())
    }
}

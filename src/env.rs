use std::collections::HashMap;

use crate::error::FigstackError;
use crate::provider::{Provider, Settings};

/// Loads settings from environment variables.
///
/// Built from a table of `{canonical key → environment variable name}`; on
/// every load each variable is looked up fresh, so the provider tracks
/// whatever the process environment currently says.
///
/// A variable that is unset, or set to the empty string, is omitted from the
/// result entirely. It never produces an empty entry, so it cannot shadow a
/// lower-precedence provider's value for the same key.
pub struct Environment {
    mappings: HashMap<String, String>,
}

impl Environment {
    /// Map canonical settings keys to the environment variables backing them.
    ///
    /// ```
    /// use figstack::Environment;
    ///
    /// let provider = Environment::new([
    ///     ("server.timeout", "MYAPP_TIMEOUT"),
    ///     ("server.host", "MYAPP_HOST"),
    /// ]);
    /// ```
    pub fn new<I, K, V>(mappings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            mappings: mappings
                .into_iter()
                .map(|(key, var)| (key.into(), var.into()))
                .collect(),
        }
    }

    // Takes a lookup closure so tests can pass synthetic variables instead
    // of mutating the process environment.
    fn load_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Settings {
        let mut settings = Settings::new();

        for (key, var) in &self.mappings {
            if let Some(value) = lookup(var)
                && !value.is_empty()
            {
                settings.insert(key.clone(), value);
            }
        }

        settings
    }
}

impl Provider for Environment {
    fn load(&self) -> Result<Settings, FigstackError> {
        Ok(self.load_with(|var| std::env::var(var).ok()))
    }
}

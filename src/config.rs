use parking_lot::RwLock;

use crate::error::FigstackError;
use crate::provider::{Provider, Settings};

/// Aggregates providers into one merged, queryable view.
///
/// Providers are held in registration order and merged key-by-key: a later
/// provider's value replaces an earlier provider's value for the same key,
/// and keys a later provider does not mention survive from earlier layers.
/// Register broad defaults first and narrow overrides last.
///
/// Every accessor re-runs the full merge, so lookups always reflect what the
/// sources currently say. Sources that should not be re-read on every access
/// opt in to caching by wrapping themselves in
/// [`OnceLoader`](crate::OnceLoader) or [`CachedLoader`](crate::CachedLoader)
/// before registration.
///
/// A key whose value is the empty string is indistinguishable from an absent
/// key: required accessors report both as
/// [`RequiredNotSet`](FigstackError::RequiredNotSet), and `_or` accessors
/// substitute the default for both.
///
/// `Config` is safe to share across threads behind an `Arc`.
///
/// ```
/// use figstack::{Config, Static};
///
/// let defaults = Static::new([("server.host", "localhost"), ("server.retries", "3")]);
/// let overrides = Static::new([("server.host", "prod.internal")]);
///
/// let config = Config::new(vec![Box::new(defaults), Box::new(overrides)]);
/// assert_eq!(config.get_string("server.host").unwrap(), "prod.internal");
/// assert_eq!(config.get_int("server.retries").unwrap(), 3);
/// ```
pub struct Config {
    providers: Vec<Box<dyn Provider>>,
    validator: Option<Box<dyn Fn(&Settings) -> Result<(), String> + Send + Sync>>,
    merged: RwLock<Settings>,
}

impl Config {
    /// Build an aggregator over `providers`, lowest precedence first.
    pub fn new(providers: Vec<Box<dyn Provider>>) -> Self {
        Self {
            providers,
            validator: None,
            merged: RwLock::new(Settings::new()),
        }
    }

    /// Append a provider at the highest-precedence position.
    pub fn provider(mut self, provider: impl Provider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Run `validator` over the merged settings after every load.
    ///
    /// A rejection surfaces from [`load`](Self::load), and therefore from
    /// every accessor, as [`FigstackError::Validation`].
    pub fn validator(
        mut self,
        validator: impl Fn(&Settings) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Reload every provider and rebuild the merged view.
    ///
    /// Providers run in registration order and the first failure aborts the
    /// whole load; remaining providers are not consulted and the previously
    /// published view stays in place. The rebuilt view is published only
    /// after every provider has answered and the validator (if any) has
    /// accepted it.
    pub fn load(&self) -> Result<(), FigstackError> {
        let mut merged = Settings::new();

        for provider in &self.providers {
            merged.extend(provider.load()?);
        }

        if let Some(validator) = &self.validator {
            validator(&merged).map_err(FigstackError::Validation)?;
        }

        tracing::debug!(
            providers = self.providers.len(),
            keys = merged.len(),
            "configuration reloaded"
        );

        *self.merged.write() = merged;
        Ok(())
    }

    /// Reload and return a copy of the full merged view.
    pub fn settings(&self) -> Result<Settings, FigstackError> {
        self.load()?;
        Ok(self.merged.read().clone())
    }

    // Reload, then fetch one key; absent keys come back as the empty string.
    fn lookup(&self, key: &str) -> Result<String, FigstackError> {
        self.load()?;
        Ok(self.merged.read().get(key).cloned().unwrap_or_default())
    }

    fn required(&self, key: &str) -> Result<String, FigstackError> {
        let value = self.lookup(key)?;
        if value.is_empty() {
            return Err(FigstackError::RequiredNotSet(key.to_string()));
        }
        Ok(value)
    }

    /// Fetch a required string setting.
    pub fn get_string(&self, key: &str) -> Result<String, FigstackError> {
        self.required(key)
    }

    /// Fetch a string setting, substituting `default` when unset.
    pub fn get_string_or(&self, key: &str, default: &str) -> Result<String, FigstackError> {
        let value = self.lookup(key)?;
        if value.is_empty() {
            return Ok(default.to_string());
        }
        Ok(value)
    }

    /// Fetch a required integer setting.
    pub fn get_int(&self, key: &str) -> Result<i64, FigstackError> {
        parse_int(key, &self.required(key)?)
    }

    /// Fetch an integer setting, substituting `default` when unset.
    ///
    /// Only the unset case defaults: a value that is present but malformed
    /// still fails with [`InvalidValue`](FigstackError::InvalidValue).
    pub fn get_int_or(&self, key: &str, default: i64) -> Result<i64, FigstackError> {
        let value = self.lookup(key)?;
        if value.is_empty() {
            return Ok(default);
        }
        parse_int(key, &value)
    }

    /// Fetch a required float setting.
    pub fn get_float(&self, key: &str) -> Result<f64, FigstackError> {
        parse_float(key, &self.required(key)?)
    }

    /// Fetch a float setting, substituting `default` when unset.
    ///
    /// Only the unset case defaults; malformed values still fail.
    pub fn get_float_or(&self, key: &str, default: f64) -> Result<f64, FigstackError> {
        let value = self.lookup(key)?;
        if value.is_empty() {
            return Ok(default);
        }
        parse_float(key, &value)
    }

    /// Fetch a required boolean setting.
    ///
    /// Accepts `true` and `false` in any case; everything else is
    /// [`InvalidValue`](FigstackError::InvalidValue).
    pub fn get_bool(&self, key: &str) -> Result<bool, FigstackError> {
        parse_bool(key, &self.required(key)?)
    }

    /// Fetch a boolean setting, substituting `default` when unset.
    ///
    /// Only the unset case defaults; malformed values still fail.
    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool, FigstackError> {
        let value = self.lookup(key)?;
        if value.is_empty() {
            return Ok(default);
        }
        parse_bool(key, &value)
    }
}

fn parse_int(key: &str, value: &str) -> Result<i64, FigstackError> {
    value.parse().map_err(|e: std::num::ParseIntError| {
        FigstackError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

fn parse_float(key: &str, value: &str) -> Result<f64, FigstackError> {
    value.parse().map_err(|e: std::num::ParseFloatError| {
        FigstackError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, FigstackError> {
    if value.eq_ignore_ascii_case("true") {
        return Ok(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return Ok(false);
    }
    Err(FigstackError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: "expected true or false".to_string(),
    })
}

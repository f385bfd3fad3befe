//! Layered configuration from files, environment variables, and command-line
//! flags, merged into one flat, queryable view.
//!
//! Every source is a [`Provider`]: something that can produce a complete
//! [`Settings`] map of dotted keys to string values. A [`Config`] holds
//! providers in registration order and answers typed lookups against their
//! merged output.
//!
//! ```
//! use figstack::{Config, Static};
//!
//! let defaults = Static::new([
//!     ("server.host", "localhost"),
//!     ("server.port", "8080"),
//! ]);
//! let overrides = Static::new([("server.host", "prod.internal")]);
//!
//! let config = Config::new(vec![Box::new(defaults), Box::new(overrides)]);
//!
//! assert_eq!(config.get_string("server.host")?, "prod.internal");
//! assert_eq!(config.get_int("server.port")?, 8080);
//! assert_eq!(config.get_int_or("server.timeout", 30)?, 30);
//! # Ok::<(), figstack::FigstackError>(())
//! ```
//!
//! A realistic stack reads a config file, lets the environment override it,
//! and lets flags override everything:
//!
//! ```no_run
//! use figstack::{CachedLoader, Config, Environment, JsonFile};
//!
//! let config = Config::new(vec![])
//!     .provider(CachedLoader::new(JsonFile::new("/etc/myapp/config.json")))
//!     .provider(Environment::new([
//!         ("server.host", "MYAPP_HOST"),
//!         ("server.port", "MYAPP_PORT"),
//!     ]));
//!
//! let port = config.get_int_or("server.port", 8080)?;
//! # Ok::<(), figstack::FigstackError>(())
//! ```
//!
//! # Everything is a string
//!
//! Sources disagree about types: JSON has numbers and booleans, INI has
//! neither, environment variables and flags are text. Rather than reconcile
//! type systems per source, every provider reduces its data to a flat
//! `{String: String}` map. Nested documents are run through [`flatten`],
//! which joins keys with dots (`{"a": {"b": 1}}` becomes `{"a.b": "1"}`) and
//! stringifies scalars in their natural form. Typing comes back at read
//! time: [`Config::get_int`] and friends parse the merged strings on demand.
//!
//! Two consequences are worth knowing up front. Arrays do not get indexed
//! keys; an array value stringifies wholesale as JSON text. And the empty
//! string is the "not set" sentinel, so a key explicitly set to `""` behaves
//! exactly like an absent key at lookup time.
//!
//! # Layer precedence
//!
//! Merging is key-by-key: a later provider's value replaces an earlier one's
//! for that key only, and a later provider never erases keys wholesale.
//! Registration order is the only precedence rule. The conventional stack:
//!
//! ```text
//! Config files        broad defaults, lowest precedence
//!       ↑ overridden by
//! Environment vars    unset or empty vars fall through
//!       ↑ overridden by
//! Command-line flags  explicitly-set flags only
//! ```
//!
//! Every layer is sparse. A provider contributes only the keys it actually
//! has; anything it omits falls through to the layers below. The
//! [`Environment`] and [`CommandLine`] providers lean on this by omitting
//! unset variables and unset flags outright instead of contributing empty
//! values.
//!
//! # Live lookups and caching
//!
//! Every accessor re-runs the full merge, so lookups track edits to config
//! files and environment changes with no extra machinery. When a source is
//! too expensive to re-read per lookup, wrap it:
//!
//! - [`OnceLoader`] reads through to its provider exactly once and replays
//!   that first outcome forever, failures included.
//! - [`CachedLoader`] keeps the latest successful read and re-reads only
//!   after [`invalidate`](CachedLoader::invalidate); failures are never
//!   cached.
//!
//! Both are providers themselves, so caching any single layer is a one-line
//! change at registration.
//!
//! # File formats
//!
//! [`JsonFile`], [`YamlFile`], and [`TomlFile`] decode into the same nested
//! shape and share the flattener, so nesting behaves identically across the
//! three. TOML datetimes come through as their literal text. [`IniFile`] is
//! two levels deep by nature and emits lower-cased
//! `section.key` tokens directly; keys above any section header land in the
//! `default` section. Each file provider points at one explicit path and
//! fails the load if the file is missing or malformed.
//!
//! # Environment variables
//!
//! [`Environment`] takes a table mapping canonical keys to the variables
//! backing them:
//!
//! | Config key | Env var |
//! |------------|---------|
//! | `server.host` | `MYAPP_HOST` |
//! | `server.port` | `MYAPP_PORT` |
//!
//! Unset and empty variables are omitted entirely, so an empty export can
//! never shadow a value from a lower layer.
//!
//! # Command-line flags
//!
//! [`CommandLine`] consumes any parsed flag context through the [`FlagSet`]
//! trait. Only explicitly-set flags contribute by default;
//! [`use_defaults`](CommandLine::use_defaults) also admits flags with
//! non-empty default values. Behind the `clap` Cargo feature (on by
//! default), `clap::ArgMatches` implements `FlagSet` directly. To use a
//! different argument parser, implement the three-method trait and turn the
//! feature off:
//!
//! ```toml
//! figstack = { version = "...", default-features = false }
//! ```
//!
//! # Renaming keys
//!
//! When a source's native key naming does not line up with the canonical
//! namespace, wrap it in a [`Resolver`] with a `{source key → canonical
//! key}` table. Mapped keys are renamed, unmapped keys pass through, and the
//! wrapped provider never knows.
//!
//! # Error handling
//!
//! All fallible operations return [`FigstackError`]. File errors carry the
//! offending path, lookup errors carry the key, and parse failures carry the
//! rejected value. The type is `Clone` so loaders can memoize and replay
//! failed loads.

pub mod error;

mod cli;
mod config;
mod env;
mod file;
mod flatten;
mod loader;
mod provider;
mod resolver;

#[cfg(test)]
mod fixtures;

pub use cli::{CommandLine, FlagSet};
pub use config::Config;
pub use env::Environment;
pub use error::FigstackError;
pub use file::{IniFile, JsonFile, TomlFile, YamlFile};
pub use flatten::flatten;
pub use loader::{CachedLoader, OnceLoader};
pub use provider::{Provider, Settings, Static};
pub use resolver::Resolver;

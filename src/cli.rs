//! Command-line flag provider.
//!
//! The provider consumes an **already-parsed flag context** through the
//! [`FlagSet`] trait; it never parses arguments itself. Behind the `clap`
//! Cargo feature (on by default), `clap::ArgMatches` implements `FlagSet`,
//! so a parsed clap command plugs straight in.
//!
//! If you use a different argument parser, implement [`FlagSet`] for its
//! parsed output and skip the clap integration entirely.

use crate::error::FigstackError;
use crate::provider::{Provider, Settings};

/// An already-parsed set of command-line flags.
///
/// The three operations mirror what any argument parser can answer once
/// parsing is done: which flags it holds values for, whether a flag was
/// given explicitly, and the flag's current value.
pub trait FlagSet: Send + Sync {
    /// Names of the flags the parsed context holds.
    fn names(&self) -> Vec<String>;

    /// Whether the flag was explicitly set on the command line, as opposed
    /// to carrying a default.
    fn is_set(&self, name: &str) -> bool;

    /// The flag's current value (explicit or default), if it has one.
    fn value(&self, name: &str) -> Option<String>;
}

/// Loads settings from parsed command-line flags.
///
/// A flag contributes a setting when it was explicitly set on the command
/// line, or, after [`use_defaults`](CommandLine::use_defaults), when it
/// carries a non-empty default. Everything else is omitted so lower layers
/// shine through.
pub struct CommandLine<F> {
    flags: F,
    use_defaults: bool,
}

impl<F: FlagSet> CommandLine<F> {
    /// Wrap a parsed flag context. Only explicitly-set flags are included.
    pub fn new(flags: F) -> Self {
        Self {
            flags,
            use_defaults: false,
        }
    }

    /// Also include flags whose default value is non-empty.
    pub fn use_defaults(mut self) -> Self {
        self.use_defaults = true;
        self
    }
}

impl<F: FlagSet> Provider for CommandLine<F> {
    fn load(&self) -> Result<Settings, FigstackError> {
        let mut settings = Settings::new();

        for name in self.flags.names() {
            let Some(value) = self.flags.value(&name) else {
                continue;
            };

            if self.flags.is_set(&name) || (self.use_defaults && !value.is_empty()) {
                settings.insert(name, value);
            }
        }

        Ok(settings)
    }
}

/// `FlagSet` over parsed clap matches.
///
/// Flag names are clap arg ids. Multi-value occurrences join with `,`.
/// `ids()` also yields matched `ArgGroup` ids; a group stores the member
/// args' `Id`s as its values, so ids whose values downcast to `clap::Id`
/// are dropped from `names()`.
#[cfg(feature = "clap")]
impl FlagSet for clap::ArgMatches {
    fn names(&self) -> Vec<String> {
        self.ids()
            .filter(|id| self.try_get_many::<clap::Id>(id.as_str()).is_err())
            .map(|id| id.as_str().to_string())
            .collect()
    }

    fn is_set(&self, name: &str) -> bool {
        matches!(
            self.value_source(name),
            Some(clap::parser::ValueSource::CommandLine)
        )
    }

    fn value(&self, name: &str) -> Option<String> {
        let raw = self.try_get_raw(name).ok().flatten()?;
        let values: Vec<String> = raw
            .map(|os| os.to_string_lossy().into_owned())
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values.join(","))
        }
    }
}


#[cfg(all(test, feature = "clap"))]
mod clap_tests {
    use super::*;

    fn matches(args: &[&str]) -> clap::ArgMatches {
        clap::Command::new("app")
            .arg(clap::Arg::new("timeout").long("timeout").default_value("30"))
            .arg(clap::Arg::new("frequency").long("frequency"))
            .try_get_matches_from(args)
            .unwrap()
    }

    #[test]
    fn explicit_flag_overrides_its_default() {
        let provider = CommandLine::new(matches(&["app", "--timeout", "50"]));
        let settings = provider.load().unwrap();
        assert_eq!(settings.get("timeout").unwrap(), "50");
    }

    #[test]
    fn defaulted_flag_is_skipped_by_default() {
        let provider = CommandLine::new(matches(&["app"]));
        assert!(provider.load().unwrap().is_empty());
    }

    #[test]
    fn defaulted_flag_appears_with_use_defaults() {
        let provider = CommandLine::new(matches(&["app"])).use_defaults();
        let settings = provider.load().unwrap();
        assert_eq!(settings.get("timeout").unwrap(), "30");
        assert!(!settings.contains_key("frequency"));
    }

    #[test]
    fn explicit_and_defaulted_flags_combine() {
        let provider =
            CommandLine::new(matches(&["app", "--frequency", "0.5"])).use_defaults();
        let settings = provider.load().unwrap();
        assert_eq!(settings.get("timeout").unwrap(), "30");
        assert_eq!(settings.get("frequency").unwrap(), "0.5");
    }

    #[test]
    fn group_ids_are_not_reported_as_flags() {
        let parsed = clap::Command::new("app")
            .arg(clap::Arg::new("timeout").long("timeout"))
            .arg(clap::Arg::new("host").long("host"))
            .group(
                clap::ArgGroup::new("server_opts")
                    .args(["timeout", "host"])
                    .multiple(true),
            )
            .try_get_matches_from(["app", "--timeout", "50"])
            .unwrap();

        let settings = CommandLine::new(parsed).load().unwrap();

        assert_eq!(settings.get("timeout").unwrap(), "50");
        assert!(!settings.contains_key("server_opts"));
    }
}

#[cfg(test)]
pub mod test {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::error::FigstackError;
    use crate::provider::{Provider, Settings};

    pub fn settings(pairs: &[(&str, &str)]) -> Settings {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn offline() -> FigstackError {
        FigstackError::Io {
            path: "fixture".into(),
            source: Arc::new(std::io::Error::other("source offline")),
        }
    }

    // -- Counts loads, for caching assertions -----------------------------------

    pub struct Counting<P> {
        inner: P,
        calls: Arc<AtomicUsize>,
    }

    impl<P: Provider> Counting<P> {
        pub fn new(inner: P) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    inner,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    impl<P: Provider> Provider for Counting<P> {
        fn load(&self) -> Result<Settings, FigstackError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.load()
        }
    }

    // -- Fails every load -------------------------------------------------------

    pub struct Failing;

    impl Provider for Failing {
        fn load(&self) -> Result<Settings, FigstackError> {
            Err(offline())
        }
    }

    // -- Fails the first N loads, then serves a fixed map -----------------------

    pub struct Flaky {
        failures: AtomicUsize,
        settings: Settings,
    }

    impl Flaky {
        pub fn new(failures: usize, settings: Settings) -> Self {
            Self {
                failures: AtomicUsize::new(failures),
                settings,
            }
        }
    }

    impl Provider for Flaky {
        fn load(&self) -> Result<Settings, FigstackError> {
            if self.failures.load(Ordering::SeqCst) > 0 {
                self.failures.fetch_sub(1, Ordering::SeqCst);
                return Err(offline());
            }
            Ok(self.settings.clone())
        }
    }
}

//! Visualizer configuration.

use std::time::Duration;

use sortvis_trace::{ArrayConfig, Verbosity};

use crate::error::{Error, Result};

/// Immutable settings for a visualizer instance.
#[derive(Debug, Clone, PartialEq)]
pub struct VisConfig {
    /// Shape of the random arrays produced on reset
    pub array: ArrayConfig,
    /// Pause after each step during playback
    pub interval: Duration,
    /// Trace granularity
    pub verbosity: Verbosity,
    /// Fixed RNG seed, entropy when absent
    pub seed: Option<u64>,
    /// HTTP listen port
    pub port: u16,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            array: ArrayConfig::default(),
            interval: Duration::from_millis(1500),
            verbosity: Verbosity::default(),
            seed: None,
            port: 3000,
        }
    }
}

impl VisConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            array: ArrayConfig {
                size: parse(&lookup, "SORTVIS_SIZE")?.unwrap_or(defaults.array.size),
                min: parse(&lookup, "SORTVIS_MIN")?.unwrap_or(defaults.array.min),
                max: parse(&lookup, "SORTVIS_MAX")?.unwrap_or(defaults.array.max),
            },
            interval: parse(&lookup, "SORTVIS_INTERVAL_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.interval),
            verbosity: match lookup("SORTVIS_VERBOSITY") {
                Some(raw) => raw.parse().map_err(Error::Config)?,
                None => defaults.verbosity,
            },
            seed: parse(&lookup, "SORTVIS_SEED")?,
            port: parse(&lookup, "SORTVIS_PORT")?.unwrap_or(defaults.port),
        };

        config.validate()?;
        Ok(config)
    }

    /// Override size and port from positional arguments `[size] [port]`.
    pub fn with_args<I, S>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut positional = args
            .into_iter()
            .filter(|a| !a.as_ref().starts_with("--"));

        if let Some(size) = positional.next() {
            self.array.size = parse_value("size", size.as_ref())?;
        }
        if let Some(port) = positional.next() {
            self.port = parse_value("port", port.as_ref())?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Builder-style interval override.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder-style verbosity override.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Check for values that cannot produce an array.
    pub fn validate(&self) -> Result<()> {
        self.array.validate()?;
        Ok(())
    }
}

fn parse<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| parse_value(key, &raw))
        .transpose()
}

fn parse_value<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} has invalid value '{}'", name, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_reference_page() {
        let config = VisConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.array, ArrayConfig { size: 8, min: 10, max: 99 });
        assert_eq!(config.interval, Duration::from_millis(1500));
        assert_eq!(config.verbosity, Verbosity::Grouped);
        assert_eq!(config.seed, None);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn reads_every_key() {
        let config = VisConfig::from_lookup(lookup(&[
            ("SORTVIS_SIZE", "12"),
            ("SORTVIS_MIN", "1"),
            ("SORTVIS_MAX", "9"),
            ("SORTVIS_INTERVAL_MS", "250"),
            ("SORTVIS_VERBOSITY", "fine"),
            ("SORTVIS_SEED", "7"),
            ("SORTVIS_PORT", "8081"),
        ]))
        .unwrap();

        assert_eq!(config.array, ArrayConfig { size: 12, min: 1, max: 9 });
        assert_eq!(config.interval, Duration::from_millis(250));
        assert_eq!(config.verbosity, Verbosity::Fine);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.port, 8081);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            VisConfig::from_lookup(lookup(&[("SORTVIS_SIZE", "many")])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            VisConfig::from_lookup(lookup(&[("SORTVIS_SIZE", "0")])),
            Err(Error::Trace(sortvis_trace::Error::InvalidSize(0)))
        ));
        assert!(matches!(
            VisConfig::from_lookup(lookup(&[("SORTVIS_VERBOSITY", "chatty")])),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn positional_args_override() {
        let config = VisConfig::default()
            .with_args(["--headless", "16", "9000"])
            .unwrap();
        assert_eq!(config.array.size, 16);
        assert_eq!(config.port, 9000);

        assert!(VisConfig::default().with_args(["0"]).is_err());
    }
}

//! Device configuration.
//!
//! ## Environment overrides
//!
//! [`DeviceConfig::from_env`] starts from the defaults and applies:
//! - `VKBD_UINPUT_PATH`: colon-separated list of device nodes to probe
//! - `VKBD_SETTLE_MS`: settle delay after creation, in milliseconds

use std::path::PathBuf;
use std::time::Duration;

/// Device nodes known to expose uinput, probed in this order.
pub const DEFAULT_CANDIDATE_PATHS: [&str; 3] =
    ["/dev/uinput", "/dev/input/uinput", "/dev/misc/uinput"];

/// Name the device registers under when none is given.
pub const DEFAULT_NAME: &str = "vkbd virtual keyboard";

/// The kernel drops the first events written right after `UI_DEV_CREATE`
/// unless consumers have had time to pick up the new device.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Lower bound applied to any configured settle delay.
pub const MIN_SETTLE_DELAY: Duration = Duration::from_millis(10);

pub const ENV_UINPUT_PATH: &str = "VKBD_UINPUT_PATH";
pub const ENV_SETTLE_MS: &str = "VKBD_SETTLE_MS";

/// How a [`VirtualKeyboard`](crate::VirtualKeyboard) is brought up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    pub name: String,
    pub candidate_paths: Vec<PathBuf>,
    settle_delay: Duration,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            candidate_paths: DEFAULT_CANDIDATE_PATHS.iter().map(PathBuf::from).collect(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl DeviceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with the `VKBD_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(paths) = lookup(ENV_UINPUT_PATH) {
            let paths: Vec<PathBuf> = paths
                .split(':')
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect();
            if paths.is_empty() {
                log::warn!("{} is set but lists no paths, ignoring", ENV_UINPUT_PATH);
            } else {
                config.candidate_paths = paths;
            }
        }

        if let Some(ms) = lookup(ENV_SETTLE_MS) {
            match ms.trim().parse::<u64>() {
                Ok(ms) => config = config.with_settle_delay(Duration::from_millis(ms)),
                Err(e) => log::warn!("ignoring {}={:?}: {}", ENV_SETTLE_MS, ms, e),
            }
        }

        config
    }

    /// Set the name shown to input consumers (truncated to 80 bytes).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_candidate_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.candidate_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set the pause after creation. Values below [`MIN_SETTLE_DELAY`]
    /// are raised to it.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay.max(MIN_SETTLE_DELAY);
        self
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DeviceConfig::default();
        assert_eq!(config.name, DEFAULT_NAME);
        assert_eq!(
            config.candidate_paths,
            vec![
                PathBuf::from("/dev/uinput"),
                PathBuf::from("/dev/input/uinput"),
                PathBuf::from("/dev/misc/uinput"),
            ]
        );
        assert_eq!(config.settle_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_settle_delay_is_clamped() {
        let config = DeviceConfig::new().with_settle_delay(Duration::ZERO);
        assert_eq!(config.settle_delay(), MIN_SETTLE_DELAY);

        let config = DeviceConfig::new().with_settle_delay(Duration::from_millis(250));
        assert_eq!(config.settle_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_env_overrides() {
        let config = DeviceConfig::from_lookup(lookup(&[
            (ENV_UINPUT_PATH, "/tmp/a::/tmp/b"),
            (ENV_SETTLE_MS, " 200 "),
        ]));
        assert_eq!(
            config.candidate_paths,
            vec![PathBuf::from("/tmp/a"), PathBuf::from("/tmp/b")]
        );
        assert_eq!(config.settle_delay(), Duration::from_millis(200));
    }

    #[test]
    fn test_malformed_env_is_ignored() {
        let config = DeviceConfig::from_lookup(lookup(&[
            (ENV_UINPUT_PATH, ":"),
            (ENV_SETTLE_MS, "soon"),
        ]));
        assert_eq!(config, DeviceConfig::default());
    }

    #[test]
    fn test_builder() {
        let config = DeviceConfig::new()
            .with_name("macro pad")
            .with_candidate_paths(["/dev/uinput"]);
        assert_eq!(config.name, "macro pad");
        assert_eq!(config.candidate_paths, vec![PathBuf::from("/dev/uinput")]);
    }
}

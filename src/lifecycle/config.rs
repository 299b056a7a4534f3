use tracing::warn;

/// Environment variable overriding [`SystemConfig::mailbox_capacity`].
pub const MAILBOX_CAPACITY_VAR: &str = "SOCIAL_FEED_MAILBOX_CAPACITY";

/// Runtime settings shared by every activation of a [`SocialSystem`](crate::lifecycle::SocialSystem).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemConfig {
    /// Capacity of each activation's mailbox. Callers wait for room when it is full.
    pub mailbox_capacity: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 32,
        }
    }
}

impl SystemConfig {
    /// Defaults, overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for each variable.
    ///
    /// Unparseable or zero values are ignored with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(MAILBOX_CAPACITY_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.mailbox_capacity = capacity,
                _ => warn!(
                    var = MAILBOX_CAPACITY_VAR,
                    value = %raw,
                    default = config.mailbox_capacity,
                    "Ignoring invalid mailbox capacity"
                ),
            }
        }
        config
    }
}

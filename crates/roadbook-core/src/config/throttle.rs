//! Login throttle configuration.

use serde::{Deserialize, Serialize};

/// Failed-login counting and IP blocking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Failed attempts within the window before the address is blocked.
    #[serde(default = "default_max_failures")]
    pub max_failures: u32,
    /// Fixed counting window, in seconds.
    #[serde(default = "default_window")]
    pub window_seconds: u64,
    /// Block duration once the threshold is reached, in seconds. The block
    /// expiry is absolute; attempts made while blocked do not extend it.
    #[serde(default = "default_block")]
    pub block_seconds: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_failures: default_max_failures(),
            window_seconds: default_window(),
            block_seconds: default_block(),
        }
    }
}

fn default_max_failures() -> u32 {
    5
}

fn default_window() -> u64 {
    15 * 60
}

fn default_block() -> u64 {
    15 * 60
}

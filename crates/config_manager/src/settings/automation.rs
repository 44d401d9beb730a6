//! Automation behavior settings.

use serde::{Deserialize, Serialize};

/// Settings that control how the browser automation behaves.
///
/// All durations are in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutomationSettings {
    /// Run the browser without a visible window.
    pub headless: bool,

    /// Upper bound for a single page operation.
    pub timeout: u64,

    /// How many times an individual step may retry itself.
    pub retry_attempts: u32,

    /// Delay inserted between browser operations.
    pub slow_mo: u64,

    /// Pause between repeated clicks in polling steps.
    pub click_interval: u64,

    /// Capture a screenshot when a step fails.
    pub screenshot_on_error: bool,

    /// Browser viewport size.
    pub viewport: Viewport,
}

impl Default for AutomationSettings {
    fn default() -> Self {
        Self {
            headless: true,
            timeout: 30_000,
            retry_attempts: 3,
            slow_mo: 0,
            click_interval: 500,
            screenshot_on_error: true,
            viewport: Viewport::default(),
        }
    }
}

/// Browser viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

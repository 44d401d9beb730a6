//! Automation scripts built on the action executor.
//!
//! Browser control is out of scope for this crate, so scripts drive a
//! [`PointerTarget`]. The [`DryRunTarget`] records and logs every click
//! instead of touching a real page.

use std::time::Duration;

use action_executor::{with_timeout, Action, ActionExecutor, ActionResult, ExecutionContext};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

#[cfg(test)]
#[path = "scripts_tests.rs"]
mod tests;

/// A position on the game canvas, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// Something that can be clicked.
#[async_trait]
pub trait PointerTarget: Send {
    async fn click(&mut self, point: Point) -> ActionResult<()>;
}

/// Target that only records clicks.
#[derive(Debug, Default)]
pub struct DryRunTarget {
    clicks: Vec<Point>,
}

impl DryRunTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clicks(&self) -> &[Point] {
        &self.clicks
    }
}

#[async_trait]
impl PointerTarget for DryRunTarget {
    async fn click(&mut self, point: Point) -> ActionResult<()> {
        info!(message = "Dry-run click", x = point.x, y = point.y);
        self.clicks.push(point);
        Ok(())
    }
}

/// Clicks a fixed point a number of times with a pause in between.
///
/// Used to get past the loading screen, which advances on clicks. This is
/// timing dependent by nature; it does not look at the page at all.
#[derive(Debug, Clone)]
pub struct SkipLoadingScreen {
    pub point: Point,
    pub times: u32,
    pub interval: Duration,
    /// Limit for each single click.
    pub click_timeout: Duration,
}

#[async_trait]
impl<T: PointerTarget + 'static> Action<T> for SkipLoadingScreen {
    fn name(&self) -> &str {
        "skip-loading-screen"
    }

    async fn run(&self, context: &mut ExecutionContext<T>) -> ActionResult<Value> {
        for attempt in 0..self.times {
            with_timeout(self.click_timeout, context.handle_mut().click(self.point)).await?;
            debug!(message = "Loading screen click", attempt = attempt + 1, total = self.times);

            if attempt + 1 < self.times {
                tokio::time::sleep(self.interval).await;
            }
        }
        Ok(json!({ "clicks": self.times, "x": self.point.x, "y": self.point.y }))
    }
}

/// Builds the skip-loading script: the click loop followed by a summary
/// step that reads the loop's result.
pub fn skip_loading_script<T: PointerTarget + 'static>(
    target: T,
    clicks: SkipLoadingScreen,
) -> ActionExecutor<T> {
    ActionExecutor::new(target)
        .with_action(clicks)
        .then("summary", |ctx| {
            Box::pin(async move {
                let clicks = ctx
                    .last_result()
                    .and_then(|result| result["clicks"].as_u64())
                    .unwrap_or(0);
                Ok(json!(format!("loading screen skipped after {} clicks", clicks)))
            })
        })
}

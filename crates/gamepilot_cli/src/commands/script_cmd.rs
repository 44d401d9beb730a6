//! Script commands.
//!
//! Scripts run through the action executor against a dry-run target that
//! logs each click; no browser is driven.

use std::time::Duration;

use clap::Subcommand;
use config_manager::{schema::CLICK_INTERVAL_RANGE, ConfigManager, Configuration};
use tracing::{info, instrument};

use crate::errors::Error;
use crate::scripts::{skip_loading_script, DryRunTarget, Point, SkipLoadingScreen};

#[cfg(test)]
#[path = "script_cmd_tests.rs"]
mod tests;

/// Number of clicks used when `--times` is not given.
pub const DEFAULT_SKIP_CLICKS: u32 = 10;

/// Subcommands for the script command
#[derive(Subcommand, Debug)]
pub enum ScriptCommands {
    /// Click through the loading screen
    SkipLoading {
        /// How many times to click
        #[arg(long, default_value_t = DEFAULT_SKIP_CLICKS)]
        times: u32,

        /// Pause between clicks in milliseconds (default: automation.clickInterval)
        #[arg(long)]
        interval: Option<u64>,

        /// Horizontal click position (default: viewport center)
        #[arg(long, requires = "y")]
        x: Option<u32>,

        /// Vertical click position (default: viewport center)
        #[arg(long, requires = "x")]
        y: Option<u32>,
    },
}

/// Builds the click loop from the command options and configuration.
pub fn skip_loading_step(
    config: &Configuration,
    times: u32,
    interval: Option<u64>,
    point: Option<(u32, u32)>,
) -> Result<SkipLoadingScreen, Error> {
    let interval = interval.unwrap_or(config.automation.click_interval);
    let (min, max) = CLICK_INTERVAL_RANGE;
    if !(min..=max).contains(&(interval as i64)) {
        return Err(Error::InvalidArguments(format!(
            "--interval must be between {} and {} milliseconds",
            min, max
        )));
    }

    let viewport = config.automation.viewport;
    let (x, y) = point.unwrap_or((viewport.width / 2, viewport.height / 2));
    if x >= viewport.width || y >= viewport.height {
        return Err(Error::InvalidArguments(format!(
            "click position {},{} is outside the {}x{} viewport",
            x, y, viewport.width, viewport.height
        )));
    }

    Ok(SkipLoadingScreen {
        point: Point { x, y },
        times,
        interval: Duration::from_millis(interval),
        click_timeout: Duration::from_millis(config.automation.timeout),
    })
}

/// Execute the script command
#[instrument(skip(manager))]
pub async fn execute(cmd: ScriptCommands, manager: &mut ConfigManager) -> Result<(), Error> {
    let config = manager.get_config()?;

    match cmd {
        ScriptCommands::SkipLoading {
            times,
            interval,
            x,
            y,
        } => {
            let step = skip_loading_step(&config, times, interval, x.zip(y))?;
            info!(
                message = "Running skip-loading script",
                clicks = times,
                x = step.point.x,
                y = step.point.y
            );

            let mut executor = skip_loading_script(DryRunTarget::new(), step);
            executor.execute().await?;

            if let Some(summary) = executor.context().last_result().and_then(|v| v.as_str()) {
                println!("{} (dry run)", summary);
            }
            Ok(())
        }
    }
}

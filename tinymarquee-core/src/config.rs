use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Tunables of a marquee label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarqueeConfig {
    /// pixels per second
    #[serde(default = "speed")]
    pub speed: f64,
    /// seconds the text rests at the start position before each scroll
    #[serde(default = "pause_interval")]
    pub pause_interval: f64,
    /// pixels
    #[serde(default = "fade_length")]
    pub fade_length: f64,
    /// the gap between the two copies of the text is `width / gap_ratio`
    #[serde(default = "gap_ratio")]
    pub gap_ratio: f64,
    /// delay before re-evaluating after a change, lets the host layout settle
    #[serde(default = "settle_delay_ms")]
    pub settle_delay_ms: u64,
}

fn speed() -> f64 {
    70.0
}
fn pause_interval() -> f64 {
    3.0
}
fn fade_length() -> f64 {
    14.0
}
fn gap_ratio() -> f64 {
    3.5
}
fn settle_delay_ms() -> u64 {
    50
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            speed: speed(),
            pause_interval: pause_interval(),
            fade_length: fade_length(),
            gap_ratio: gap_ratio(),
            settle_delay_ms: settle_delay_ms(),
        }
    }
}

impl MarqueeConfig {
    pub fn validate(&self) -> Result<()> {
        validate_speed(self.speed)?;
        self.pause_duration()?;
        if !(self.fade_length.is_finite() && self.fade_length >= 0.0) {
            bail!("invalid fade length {}, must be >= 0", self.fade_length)
        }
        if !(self.gap_ratio.is_finite() && self.gap_ratio > 0.0) {
            bail!("invalid gap ratio {}, must be > 0", self.gap_ratio)
        }
        Ok(())
    }

    pub fn pause_duration(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.pause_interval)
            .with_context(|| format!("invalid pause interval {}", self.pause_interval))
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

pub(crate) fn validate_speed(speed: f64) -> Result<()> {
    if !(speed.is_finite() && speed > 0.0) {
        bail!("cannot set a speed of {speed}, the speed must be a positive number of pixels per second")
    }
    Ok(())
}

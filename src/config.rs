use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use tinymarquee_core::{config::MarqueeConfig, text::Color};

use crate::cli::Cli;

pub const CONFIG_REL_PATH: &str = "tinymarquee/";
pub const CONFIG_FILE_NAME: &str = "tinymarquee.ron";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DemoConfig {
    #[serde(default = "MarqueeConfig::default")]
    pub marquee: MarqueeConfig,
    #[serde(default = "text")]
    pub text: String,
    /// size of the marquee in the demo window
    #[serde(default = "width")]
    pub width: i32,
    #[serde(default = "height")]
    pub height: i32,
    #[serde(default = "text_color")]
    pub text_color: Color,
    /// values applied by the "Faster" button
    #[serde(default = "faster_speed")]
    pub faster_speed: f64,
    #[serde(default = "faster_pause_interval")]
    pub faster_pause_interval: f64,
}

fn text() -> String {
    "Hi there! This text is too long to fit, so it scrolls in a loop with faded edges.".to_string()
}
fn width() -> i32 {
    200
}
fn height() -> i32 {
    40
}
fn text_color() -> Color {
    Color::BLACK
}
fn faster_speed() -> f64 {
    200.0
}
fn faster_pause_interval() -> f64 {
    0.0
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            marquee: MarqueeConfig::default(),
            text: text(),
            width: width(),
            height: height(),
            text_color: text_color(),
            faster_speed: faster_speed(),
            faster_pause_interval: faster_pause_interval(),
        }
    }
}

impl DemoConfig {
    /// command line values win over the file
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(text) = &cli.text {
            self.text = text.clone();
        }
        if let Some(speed) = cli.speed {
            self.marquee.speed = speed;
        }
        self
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_REL_PATH).join(CONFIG_FILE_NAME))
}

pub fn parse_config(content: &str) -> Result<DemoConfig> {
    ron::de::from_str(content).with_context(|| "failed to parse config")
}

/// Reads the config at `path` (or the default location).
/// A missing or broken file falls back to the defaults.
pub fn get_config(path: Option<&Path>) -> DemoConfig {
    let Some(path) = path.map(Path::to_path_buf).or_else(get_config_path) else {
        warn!("no config directory, using default config");
        return DemoConfig::default();
    };
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) => {
            info!("no config at {}, using default: {err}", path.display());
            return DemoConfig::default();
        }
    };
    parse_config(&content).unwrap_or_else(|err| {
        warn!("{err:#}, using default config");
        DemoConfig::default()
    })
}

pub fn default_config_string() -> Result<String> {
    ron::ser::to_string_pretty(&DemoConfig::default(), PrettyConfig::default())
        .with_context(|| "failed to serialize default config")
}

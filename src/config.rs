use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::layout::Layout;
use crate::render::RenderMode;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;
use crate::ticker::DEFAULT_INTERVAL;

const ENV_TICK_MS: &str = "LIFEGRID_TICK_MS";
const ENV_FPS: &str = "LIFEGRID_FPS";
const ENV_CELL_WIDTH: &str = "LIFEGRID_CELL_WIDTH";
const ENV_CELL_HEIGHT: &str = "LIFEGRID_CELL_HEIGHT";
const ENV_PAD: &str = "LIFEGRID_PAD";
const ENV_RULE: &str = "LIFEGRID_RULE";
const ENV_RENDER: &str = "LIFEGRID_RENDER";
const ENV_LOG: &str = "LIFEGRID_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Time between generations while running
    pub tick: Duration,

    /// Frames drawn per second
    pub framerate: u32,

    pub layout: Layout,
    pub render: RenderMode,
    pub rules: RuleSet,

    /// Where tracing output goes. Nothing is logged without it.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick: DEFAULT_INTERVAL,
            framerate: 60,
            layout: Layout::default(),
            render: RenderMode::Glyphs,
            rules: RuleSet::default(),
            log_file: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: expected a positive integer, found \"{value}\"")]
    NotPositive { var: &'static str, value: String },

    #[error("{var}: expected an integer up to 65535, found \"{value}\"")]
    Size { var: &'static str, value: String },

    #[error("{var}: expected \"glyphs\" or \"braille\", found \"{value}\"")]
    RenderMode { var: &'static str, value: String },

    #[error("LIFEGRID_RULE: {0}")]
    Rule(#[from] RuleError),
}

impl Config {
    /// Defaults, overridden by any `LIFEGRID_*` variables that are set and non-empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(ENV_TICK_MS) {
            config.tick = Duration::from_millis(positive(ENV_TICK_MS, &value)?.into());
        }

        if let Some(value) = get(ENV_FPS) {
            config.framerate = positive(ENV_FPS, &value)?;
        }

        let Layout {
            mut cell_width,
            mut cell_height,
            mut pad,
        } = config.layout;

        if let Some(value) = get(ENV_CELL_WIDTH) {
            cell_width = cell_size(ENV_CELL_WIDTH, &value)?;
        }

        if let Some(value) = get(ENV_CELL_HEIGHT) {
            cell_height = cell_size(ENV_CELL_HEIGHT, &value)?;
        }

        if let Some(value) = get(ENV_PAD) {
            pad = size(ENV_PAD, &value)?;
        }

        config.layout = Layout::new(cell_width, cell_height, pad);

        if let Some(value) = get(ENV_RULE) {
            config.rules = value.parse()?;
        }

        if let Some(value) = get(ENV_RENDER) {
            config.render = match value.trim().to_ascii_lowercase().as_str() {
                "glyphs" => RenderMode::Glyphs,
                "braille" => RenderMode::Braille,
                _ => {
                    return Err(ConfigError::RenderMode {
                        var: ENV_RENDER,
                        value,
                    });
                }
            };
        }

        config.log_file = get(ENV_LOG).map(PathBuf::from);

        Ok(config)
    }

    /// Time budget of a single frame.
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs(1) / self.framerate.max(1)
    }
}

fn positive(var: &'static str, value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::NotPositive {
            var,
            value: value.to_string(),
        }),
    }
}

/// Like [`size`], but zero is rejected.
fn cell_size(var: &'static str, value: &str) -> Result<u16, ConfigError> {
    positive(var, value)?;
    size(var, value)
}

fn size(var: &'static str, value: &str) -> Result<u16, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Size {
        var,
        value: value.to_string(),
    })
}

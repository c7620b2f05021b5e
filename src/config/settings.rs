//! User configuration (JSON)
//!
//! Every field carries a serde default so a partial or older file still
//! loads. Out-of-range values are clamped with a warning rather than
//! rejected.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::constants::{self, avoid, clicks, mascot, patrol};
use crate::palette::Category;
use crate::types::{Expression, Position};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub avoid: AvoidSettings,
    #[serde(default)]
    pub patrol: PatrolSettings,
    #[serde(default)]
    pub clicks: ClickSettings,
    #[serde(default = "default_start_position")]
    pub start_position: Position,
    /// Order in which single clicks step through expressions
    #[serde(default = "default_expression_cycle")]
    pub expression_cycle: Vec<Expression>,
    /// Entries offered by the double-click palette
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
}

/// Pointer proximity avoidance
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AvoidSettings {
    #[serde(default = "default_avoid_radius")]
    pub radius: f32,
    #[serde(default = "default_avoid_max_offset")]
    pub max_offset: f32,
}

/// Idle wandering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PatrolSettings {
    #[serde(default = "default_patrol_enabled")]
    pub enabled: bool,
    #[serde(default = "default_patrol_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_patrol_smoothing")]
    pub smoothing: f32,
}

/// Click/drag classification timings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClickSettings {
    #[serde(default = "default_double_click_window_ms")]
    pub double_click_window_ms: u64,
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f32,
    #[serde(default = "default_blink_ms")]
    pub blink_ms: u64,
}

/// Tunables consumed by the widget core, resolved from [`Config`]
#[derive(Debug, Clone)]
pub struct WidgetSettings {
    pub avoid_radius: f32,
    pub avoid_max_offset: f32,
    pub patrol_enabled: bool,
    pub patrol_interval: Duration,
    pub patrol_smoothing: f32,
    pub double_click_window: Duration,
    pub drag_threshold: f32,
    pub blink: Duration,
    pub start_position: Position,
    pub expression_cycle: Vec<Expression>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_start_position() -> Position {
    Position::new(mascot::START_X, mascot::START_Y)
}

fn default_expression_cycle() -> Vec<Expression> {
    Expression::ALL.to_vec()
}

fn default_categories() -> Vec<Category> {
    [
        ("modules", "Modules"),
        ("docs", "Documentation"),
        ("help", "Help & Support"),
        ("settings", "Settings"),
        ("about", "About"),
    ]
    .into_iter()
    .map(|(key, label)| Category::new(key, label))
    .collect()
}

fn default_avoid_radius() -> f32 {
    avoid::RADIUS
}

fn default_avoid_max_offset() -> f32 {
    avoid::MAX_OFFSET
}

fn default_patrol_enabled() -> bool {
    true
}

fn default_patrol_interval_ms() -> u64 {
    patrol::INTERVAL_MS
}

fn default_patrol_smoothing() -> f32 {
    patrol::SMOOTHING
}

fn default_double_click_window_ms() -> u64 {
    clicks::DOUBLE_CLICK_WINDOW_MS
}

fn default_drag_threshold() -> f32 {
    clicks::DRAG_THRESHOLD
}

fn default_blink_ms() -> u64 {
    clicks::BLINK_MS
}

impl Default for AvoidSettings {
    fn default() -> Self {
        Self {
            radius: default_avoid_radius(),
            max_offset: default_avoid_max_offset(),
        }
    }
}

impl Default for PatrolSettings {
    fn default() -> Self {
        Self {
            enabled: default_patrol_enabled(),
            interval_ms: default_patrol_interval_ms(),
            smoothing: default_patrol_smoothing(),
        }
    }
}

impl Default for ClickSettings {
    fn default() -> Self {
        Self {
            double_click_window_ms: default_double_click_window_ms(),
            drag_threshold: default_drag_threshold(),
            blink_ms: default_blink_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            avoid: AvoidSettings::default(),
            patrol: PatrolSettings::default(),
            clicks: ClickSettings::default(),
            start_position: default_start_position(),
            expression_cycle: default_expression_cycle(),
            categories: default_categories(),
        }
    }
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Config::default().widget_settings()
    }
}

impl Config {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(constants::config::APP_DIR);
        path.push(constants::config::FILENAME);
        path
    }

    /// Load configuration from `path`, writing a default file if none exists
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Config file not found, creating default config");
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config JSON from {}", path.display()))?;
        config.validate_and_clamp();

        info!(path = %path.display(), categories = config.categories.len(), "Loaded config");
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Clamp values to ranges the widget can work with
    pub fn validate_and_clamp(&mut self) {
        use crate::constants::validation::*;

        if !self.avoid.radius.is_finite() || self.avoid.radius < 0.0 {
            warn!(radius = self.avoid.radius, using = avoid::RADIUS, "avoid.radius invalid, using default");
            self.avoid.radius = avoid::RADIUS;
        } else if self.avoid.radius > MAX_AVOID_RADIUS {
            warn!(radius = self.avoid.radius, max = MAX_AVOID_RADIUS, "avoid.radius exceeds maximum, clamping");
            self.avoid.radius = MAX_AVOID_RADIUS;
        }

        if !self.avoid.max_offset.is_finite() || self.avoid.max_offset < 0.0 {
            warn!(max_offset = self.avoid.max_offset, using = avoid::MAX_OFFSET, "avoid.max_offset invalid, using default");
            self.avoid.max_offset = avoid::MAX_OFFSET;
        } else if self.avoid.max_offset > MAX_AVOID_OFFSET {
            warn!(max_offset = self.avoid.max_offset, max = MAX_AVOID_OFFSET, "avoid.max_offset exceeds maximum, clamping");
            self.avoid.max_offset = MAX_AVOID_OFFSET;
        }

        if self.patrol.interval_ms < MIN_PATROL_INTERVAL_MS {
            warn!(interval_ms = self.patrol.interval_ms, min = MIN_PATROL_INTERVAL_MS, "patrol.interval_ms below minimum, clamping");
            self.patrol.interval_ms = MIN_PATROL_INTERVAL_MS;
        }

        if !self.patrol.smoothing.is_finite() {
            warn!(smoothing = self.patrol.smoothing, using = patrol::SMOOTHING, "patrol.smoothing invalid, using default");
            self.patrol.smoothing = patrol::SMOOTHING;
        } else if !(MIN_SMOOTHING..=MAX_SMOOTHING).contains(&self.patrol.smoothing) {
            warn!(smoothing = self.patrol.smoothing, min = MIN_SMOOTHING, max = MAX_SMOOTHING, "patrol.smoothing out of range, clamping");
            self.patrol.smoothing = self.patrol.smoothing.clamp(MIN_SMOOTHING, MAX_SMOOTHING);
        }

        let window = self.clicks.double_click_window_ms;
        if !(MIN_DOUBLE_CLICK_WINDOW_MS..=MAX_DOUBLE_CLICK_WINDOW_MS).contains(&window) {
            warn!(double_click_window_ms = window, "clicks.double_click_window_ms out of range, clamping");
            self.clicks.double_click_window_ms =
                window.clamp(MIN_DOUBLE_CLICK_WINDOW_MS, MAX_DOUBLE_CLICK_WINDOW_MS);
        }

        if !self.clicks.drag_threshold.is_finite() || self.clicks.drag_threshold < 0.0 {
            warn!(drag_threshold = self.clicks.drag_threshold, using = clicks::DRAG_THRESHOLD, "clicks.drag_threshold invalid, using default");
            self.clicks.drag_threshold = clicks::DRAG_THRESHOLD;
        } else if self.clicks.drag_threshold > MAX_DRAG_THRESHOLD {
            warn!(drag_threshold = self.clicks.drag_threshold, max = MAX_DRAG_THRESHOLD, "clicks.drag_threshold exceeds maximum, clamping");
            self.clicks.drag_threshold = MAX_DRAG_THRESHOLD;
        }

        if self.clicks.blink_ms > MAX_BLINK_MS {
            warn!(blink_ms = self.clicks.blink_ms, max = MAX_BLINK_MS, "clicks.blink_ms exceeds maximum, clamping");
            self.clicks.blink_ms = MAX_BLINK_MS;
        }

        if !self.start_position.is_finite() {
            warn!(start_position = ?self.start_position, "start_position not finite, using default");
            self.start_position = default_start_position();
        }

        // A repeated entry would make the cycle skip states, so keep first occurrences only
        let mut seen = Vec::with_capacity(self.expression_cycle.len());
        self.expression_cycle.retain(|expression| {
            if seen.contains(expression) {
                false
            } else {
                seen.push(*expression);
                true
            }
        });
        if self.expression_cycle.is_empty() {
            warn!("expression_cycle is empty, using default cycle");
            self.expression_cycle = default_expression_cycle();
        }

        if self.categories.is_empty() {
            warn!("categories is empty, using default categories");
            self.categories = default_categories();
        }
    }

    /// Resolve the tunables the widget core works with
    pub fn widget_settings(&self) -> WidgetSettings {
        WidgetSettings {
            avoid_radius: self.avoid.radius,
            avoid_max_offset: self.avoid.max_offset,
            patrol_enabled: self.patrol.enabled,
            patrol_interval: Duration::from_millis(self.patrol.interval_ms),
            patrol_smoothing: self.patrol.smoothing,
            double_click_window: Duration::from_millis(self.clicks.double_click_window_ms),
            drag_threshold: self.clicks.drag_threshold,
            blink: Duration::from_millis(self.clicks.blink_ms),
            start_position: self.start_position,
            expression_cycle: self.expression_cycle.clone(),
        }
    }
}

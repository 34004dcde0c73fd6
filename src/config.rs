use std::fs;
use std::path::Path;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::snake::Position;

/// Default grid side length.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Smallest grid side that still leaves a free cell for food at start.
pub const MIN_GRID_SIZE: u16 = 2;

/// Score granted per food by default.
pub const DEFAULT_FOOD_REWARD: u32 = 10;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Interval reduction applied each time food is eaten.
pub const DEFAULT_TICK_DECREMENT_MS: u64 = 5;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns an `n` by `n` grid.
    #[must_use]
    pub fn square(n: u16) -> Self {
        Self {
            width: n,
            height: n,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the centre cell, rounding towards the bottom-right.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }
}

/// Tuning constants for one engine instance.
///
/// Every field may be omitted from a JSON config file; missing fields take
/// the defaults below.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub grid_size: u16,
    /// Start cell of the snake head. `None` means the grid centre.
    pub start: Option<Position>,
    pub food_reward: u32,
    pub base_tick_interval_ms: u64,
    /// Speed ramp step. Zero disables the ramp.
    pub tick_decrement_ms: u64,
    pub min_tick_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            start: None,
            food_reward: DEFAULT_FOOD_REWARD,
            base_tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            tick_decrement_ms: DEFAULT_TICK_DECREMENT_MS,
            min_tick_interval_ms: MIN_TICK_INTERVAL_MS,
        }
    }
}

impl EngineConfig {
    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                min: MIN_GRID_SIZE,
                actual: self.grid_size,
            });
        }

        let bounds = self.grid();
        let start = self.start_cell();
        if !start.is_within_bounds(bounds) {
            return Err(ConfigError::StartOutOfBounds {
                x: start.x,
                y: start.y,
                width: bounds.width,
                height: bounds.height,
            });
        }

        if self.base_tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        if self.min_tick_interval_ms > self.base_tick_interval_ms {
            return Err(ConfigError::FloorAboveBase {
                min_ms: self.min_tick_interval_ms,
                base_ms: self.base_tick_interval_ms,
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize::square(self.grid_size)
    }

    #[must_use]
    pub fn start_cell(&self) -> Position {
        self.start.unwrap_or_else(|| self.grid().center())
    }

    /// Returns the interval that follows `current_ms` after one food.
    #[must_use]
    pub fn ramped_interval_ms(&self, current_ms: u64) -> u64 {
        current_ms
            .saturating_sub(self.tick_decrement_ms)
            .max(self.min_tick_interval_ms)
    }
}

/// Color set applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub grid_dot: Color,
    pub border: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub hud_accent: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Green snake on a dark board.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    grid_dot: Color::DarkGray,
    border: Color::Gray,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    hud_accent: Color::LightGreen,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Terminal columns used per logical cell; keeps cells roughly square.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_EMPTY: &str = "· ";
pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_FOOD: &str = "●";
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲ ";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼ ";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀ ";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶ ";

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{EngineConfig, GridSize};
    use crate::error::ConfigError;
    use crate::snake::Position;

    #[test]
    fn defaults_are_valid_and_centered() {
        let config = EngineConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.grid(), GridSize::square(20));
        assert_eq!(config.start_cell(), Position { x: 10, y: 10 });
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "grid_size": 12, "tick_decrement_ms": 0 }"#)
                .expect("partial config should parse");

        assert_eq!(config.grid_size, 12);
        assert_eq!(config.tick_decrement_ms, 0);
        assert_eq!(config.food_reward, 10);
        assert_eq!(config.start_cell(), Position { x: 6, y: 6 });
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<EngineConfig>(r#"{ "speed": 3 }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let tiny = EngineConfig {
            grid_size: 1,
            ..EngineConfig::default()
        };
        assert!(matches!(
            tiny.validate(),
            Err(ConfigError::GridTooSmall { actual: 1, .. })
        ));

        let outside = EngineConfig {
            start: Some(Position { x: 20, y: 3 }),
            ..EngineConfig::default()
        };
        assert!(matches!(
            outside.validate(),
            Err(ConfigError::StartOutOfBounds { x: 20, .. })
        ));

        let zero = EngineConfig {
            base_tick_interval_ms: 0,
            min_tick_interval_ms: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::ZeroInterval)));

        let inverted = EngineConfig {
            base_tick_interval_ms: 40,
            ..EngineConfig::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::FloorAboveBase { min_ms: 50, base_ms: 40 })
        ));
    }

    #[test]
    fn ramp_never_goes_below_floor() {
        let config = EngineConfig::default();

        assert_eq!(config.ramped_interval_ms(150), 145);
        assert_eq!(config.ramped_interval_ms(53), 50);
        assert_eq!(config.ramped_interval_ms(50), 50);
    }

    #[test]
    fn load_reads_and_validates_file() {
        let path = unique_test_path("valid");
        write_test_file(&path, r#"{ "grid_size": 8, "food_reward": 3 }"#);

        let config = EngineConfig::load(&path).expect("config should load");
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.food_reward, 3);

        cleanup_test_path(&path);
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let missing = unique_test_path("missing");
        assert!(matches!(
            EngineConfig::load(&missing),
            Err(ConfigError::Read { .. })
        ));

        let malformed = unique_test_path("malformed");
        write_test_file(&malformed, "not-json");
        assert!(matches!(
            EngineConfig::load(&malformed),
            Err(ConfigError::Parse { .. })
        ));

        cleanup_test_path(&malformed);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join(format!("grid-snake-config-{label}-{nanos}"))
            .join("config.json")
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}

// config.rs
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "SLITHER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "slither.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Every gameplay constant in one place. Any subset of keys may appear in the
/// TOML file, the rest fall back to `Default`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub food_count: usize,
    pub ai_count: usize,

    pub base_speed: f32,
    pub boost_speed: f32,
    pub initial_segments: usize,
    pub growth_per_food: usize,
    pub score_per_food: u32,

    /// Added to the pellet radius when testing whether a head reaches it.
    pub consume_radius: f32,
    pub collision_threshold: f32,
    /// Per-tick probability that an AI snake picks a new food target.
    pub retarget_chance: f64,

    pub food_radius_min: f32,
    pub food_radius_max: f32,

    pub segment_radius: f32,
    pub minimap_size: f32,
    pub minimap_margin: f32,

    pub tick_hz: f64,
    pub window_width: f32,
    pub window_height: f32,

    pub seed: Option<u64>,
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 5000.0,
            world_height: 5000.0,
            food_count: 300,
            ai_count: 5,
            base_speed: 2.0,
            boost_speed: 4.0,
            initial_segments: 100,
            growth_per_food: 5,
            score_per_food: 10,
            consume_radius: 10.0,
            collision_threshold: 10.0,
            retarget_chance: 0.01,
            food_radius_min: 6.0,
            food_radius_max: 10.0,
            segment_radius: 10.0,
            minimap_size: 150.0,
            minimap_margin: 20.0,
            tick_hz: 60.0,
            window_width: 1280.0,
            window_height: 720.0,
            seed: None,
            log_filter: "info,wgpu=error,naga=warn".to_string(),
        }
    }
}

impl GameConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        // NaN and infinities fail both checks
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(invalid(field, format!("{} must be finite and positive", value)))
            }
        }

        fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(invalid(field, format!("{} must be finite and not negative", value)))
            }
        }

        positive("world_width", self.world_width.into())?;
        positive("world_height", self.world_height.into())?;
        non_negative("base_speed", self.base_speed.into())?;
        non_negative("boost_speed", self.boost_speed.into())?;
        if self.initial_segments == 0 {
            return Err(invalid("initial_segments", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.retarget_chance) {
            return Err(invalid("retarget_chance", "must be within [0, 1]"));
        }
        non_negative("food_radius_min", self.food_radius_min.into())?;
        non_negative("food_radius_max", self.food_radius_max.into())?;
        if self.food_radius_min > self.food_radius_max {
            return Err(invalid(
                "food_radius_max",
                format!(
                    "{} is smaller than food_radius_min {}",
                    self.food_radius_max, self.food_radius_min
                ),
            ));
        }
        non_negative("consume_radius", self.consume_radius.into())?;
        non_negative("collision_threshold", self.collision_threshold.into())?;
        non_negative("segment_radius", self.segment_radius.into())?;
        positive("minimap_size", self.minimap_size.into())?;
        non_negative("minimap_margin", self.minimap_margin.into())?;
        positive("window_width", self.window_width.into())?;
        positive("window_height", self.window_height.into())?;
        positive("tick_hz", self.tick_hz)?;
        Ok(())
    }
}

/// `$SLITHER_CONFIG` when set, otherwise `slither.toml` in the working directory.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.food_count, 300);
        assert_eq!(config.ai_count, 5);
        assert_eq!(config.world_width, 5000.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml("food_count = 12\nseed = 7\n").unwrap();
        assert_eq!(config.food_count, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.ai_count, GameConfig::default().ai_count);
        assert_eq!(config.boost_speed, 4.0);
    }

    #[test]
    fn test_rejects_bad_retarget_chance() {
        let err = GameConfig::from_toml("retarget_chance = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "retarget_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_inverted_food_radius() {
        let err = GameConfig::from_toml("food_radius_min = 9.0\nfood_radius_max = 3.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_zero_world() {
        let err = GameConfig::from_toml("world_width = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "world_width",
                ..
            }
        ));
    }

    fn rejected_field(toml: &str) -> &'static str {
        match GameConfig::from_toml(toml) {
            Err(ConfigError::Invalid { field, .. }) => field,
            other => panic!("expected {:?} to be rejected, got {:?}", toml, other),
        }
    }

    #[test]
    fn test_rejects_non_finite_values() {
        assert_eq!(rejected_field("food_radius_max = inf"), "food_radius_max");
        assert_eq!(rejected_field("world_width = inf"), "world_width");
        assert_eq!(rejected_field("world_height = nan"), "world_height");
        assert_eq!(rejected_field("base_speed = nan"), "base_speed");
        assert_eq!(rejected_field("boost_speed = inf"), "boost_speed");
        assert_eq!(rejected_field("consume_radius = nan"), "consume_radius");
        assert_eq!(rejected_field("tick_hz = inf"), "tick_hz");
        assert_eq!(rejected_field("retarget_chance = nan"), "retarget_chance");
    }

    #[test]
    fn test_rejects_negative_radii_and_layout() {
        assert_eq!(rejected_field("segment_radius = -5.0"), "segment_radius");
        assert_eq!(rejected_field("collision_threshold = -1.0"), "collision_threshold");
        assert_eq!(rejected_field("consume_radius = -1.0"), "consume_radius");
        assert_eq!(rejected_field("minimap_size = 0.0"), "minimap_size");
        assert_eq!(rejected_field("minimap_margin = -3.0"), "minimap_margin");
        assert_eq!(rejected_field("window_width = 0.0"), "window_width");
        assert_eq!(rejected_field("window_height = -1.0"), "window_height");
    }

    #[test]
    fn test_accepted_config_builds_a_session() {
        let config = GameConfig::from_toml(
            "world_width = 200.0\nworld_height = 100.0\nfood_radius_min = 4.0\nfood_radius_max = 4.0\nseed = 3",
        )
        .unwrap();
        let session = crate::resources::Session::new(config);
        assert_eq!(session.food.len(), 300);
        assert!(session.food.items.iter().all(|f| f.radius == 4.0));
    }

    #[test]
    fn test_type_mismatch_is_parse_error() {
        let err = GameConfig::from_toml("food_count = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = GameConfig::load(Path::new("definitely/not/here/slither.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}

use serde::{Deserialize, Serialize};

use crate::map_core::error::MapError;
use crate::map_core::remap::round2;
use crate::map_core::tile::ResourceKind;
use crate::map_core::weighted::{total_weight, Weighted};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub seed: u32,
    pub width: usize,
    pub height: usize,
    pub land_noise: NoiseConfig,
    pub biome_noise: NoiseConfig,
    pub land_mask_radius: f32,
    pub biomes: Vec<BiomeConfig>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 64,
            height: 64,
            land_noise: NoiseConfig::default(),
            biome_noise: NoiseConfig {
                octaves: 4,
                scale: 26.0,
                ..NoiseConfig::default()
            },
            land_mask_radius: 2.5,
            biomes: default_biomes(),
        }
    }
}

impl MapConfig {
    pub fn load() -> Self {
        let path = std::path::Path::new("config.json");
        if !path.exists() {
            log::info!("no config.json found, using defaults");
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("loaded config.json");
                    config
                }
                Err(e) => {
                    log::warn!("failed to parse config.json: {e}, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("failed to read config.json: {e}, using defaults");
                Self::default()
            }
        }
    }

    /// Rejects configurations that would corrupt a run, before it starts.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        self.land_noise.validate("land")?;
        self.biome_noise.validate("biome")?;

        for biome in &self.biomes {
            if biome.colors.is_empty() {
                return Err(MapError::EmptyColorTable {
                    biome: biome.name.clone(),
                });
            }
            if total_weight(&biome.colors) <= 0.0 {
                return Err(MapError::ZeroWeightTable {
                    biome: biome.name.clone(),
                    table: "color",
                });
            }
            if !biome.resources.is_empty() && total_weight(&biome.resources) <= 0.0 {
                return Err(MapError::ZeroWeightTable {
                    biome: biome.name.clone(),
                    table: "resource",
                });
            }
            for resource in &biome.resources {
                if !resource.value.variants.is_empty()
                    && total_weight(&resource.value.variants) <= 0.0
                {
                    return Err(MapError::ZeroWeightTable {
                        biome: biome.name.clone(),
                        table: "variant",
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub octaves: u32,
    pub scale: f32,
    pub lacunarity: f32,
    pub persistence: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 6,
            scale: 40.0,
            lacunarity: 1.25,
            persistence: 0.75,
        }
    }
}

impl NoiseConfig {
    fn validate(&self, channel: &'static str) -> Result<(), MapError> {
        if !(self.scale > 0.0) {
            return Err(MapError::InvalidScale {
                channel,
                scale: self.scale,
            });
        }
        Ok(())
    }
}

/// Inclusive numeric range; values are rounded to two decimals before the
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub min: f32,
    pub max: f32,
}

impl Threshold {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        let value = round2(value);
        value >= self.min && value <= self.max
    }
}

/// One biome the classifier tries in list order. Later entries overwrite the
/// color and label of tiles an earlier entry already claimed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiomeConfig {
    pub name: String,
    pub land_threshold: Threshold,
    pub biome_threshold: Threshold,
    pub colors: Vec<Weighted<[f32; 4]>>,
    #[serde(default)]
    pub resources: Vec<Weighted<ResourceConfig>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub kind: ResourceKind,
    /// Opaque variant ids the placement collaborator resolves to scene
    /// objects. A resource without variants marks the tile but places
    /// nothing.
    #[serde(default)]
    pub variants: Vec<Weighted<String>>,
}

fn default_biomes() -> Vec<BiomeConfig> {
    vec![
        BiomeConfig {
            name: "beach".into(),
            land_threshold: Threshold::new(0.0, 0.08),
            biome_threshold: Threshold::new(0.0, 1.0),
            colors: vec![
                Weighted::new([0.93, 0.87, 0.69, 1.0], 0.8),
                Weighted::new([0.89, 0.81, 0.60, 1.0], 0.2),
            ],
            resources: Vec::new(),
        },
        BiomeConfig {
            name: "grassland".into(),
            land_threshold: Threshold::new(0.08, 1.0),
            biome_threshold: Threshold::new(0.0, 0.45),
            colors: vec![
                Weighted::new([0.45, 0.66, 0.32, 1.0], 0.6),
                Weighted::new([0.52, 0.71, 0.35, 1.0], 0.4),
            ],
            resources: vec![
                Weighted::new(
                    ResourceConfig {
                        kind: ResourceKind::None,
                        variants: Vec::new(),
                    },
                    0.85,
                ),
                Weighted::new(
                    ResourceConfig {
                        kind: ResourceKind::Berries,
                        variants: vec![Weighted::new("berry_bush".into(), 1.0)],
                    },
                    0.15,
                ),
            ],
        },
        BiomeConfig {
            name: "forest".into(),
            land_threshold: Threshold::new(0.08, 1.0),
            biome_threshold: Threshold::new(0.45, 0.8),
            colors: vec![
                Weighted::new([0.23, 0.44, 0.25, 1.0], 0.7),
                Weighted::new([0.19, 0.38, 0.22, 1.0], 0.3),
            ],
            resources: vec![
                Weighted::new(
                    ResourceConfig {
                        kind: ResourceKind::None,
                        variants: Vec::new(),
                    },
                    0.5,
                ),
                Weighted::new(
                    ResourceConfig {
                        kind: ResourceKind::Wood,
                        variants: vec![
                            Weighted::new("tree_pine".into(), 0.6),
                            Weighted::new("tree_oak".into(), 0.4),
                        ],
                    },
                    0.5,
                ),
            ],
        },
        BiomeConfig {
            name: "mountain".into(),
            land_threshold: Threshold::new(0.08, 1.0),
            biome_threshold: Threshold::new(0.8, 1.0),
            colors: vec![
                Weighted::new([0.48, 0.49, 0.51, 1.0], 0.75),
                Weighted::new([0.55, 0.56, 0.58, 1.0], 0.25),
            ],
            resources: vec![
                Weighted::new(
                    ResourceConfig {
                        kind: ResourceKind::None,
                        variants: Vec::new(),
                    },
                    0.65,
                ),
                Weighted::new(
                    ResourceConfig {
                        kind: ResourceKind::Stone,
                        variants: vec![
                            Weighted::new("rock_small".into(), 0.7),
                            Weighted::new("rock_large".into(), 0.3),
                        ],
                    },
                    0.35,
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::{MapConfig, NoiseConfig, Threshold};
    use crate::map_core::error::MapError;
    use crate::map_core::weighted::Weighted;

    #[test]
    fn default_config_is_valid() {
        assert!(MapConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_grid() {
        let config = MapConfig {
            width: 0,
            ..MapConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MapError::InvalidSize { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_scale() {
        let config = MapConfig {
            land_noise: NoiseConfig {
                scale: 0.0,
                ..NoiseConfig::default()
            },
            ..MapConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MapError::InvalidScale { channel: "land", .. })
        ));
    }

    #[test]
    fn rejects_empty_and_weightless_color_tables() {
        let mut config = MapConfig::default();
        config.biomes[0].colors.clear();
        assert!(matches!(
            config.validate(),
            Err(MapError::EmptyColorTable { .. })
        ));

        let mut config = MapConfig::default();
        config.biomes[1].colors = vec![Weighted::new([0.0, 0.0, 0.0, 1.0], 0.0)];
        assert!(matches!(
            config.validate(),
            Err(MapError::ZeroWeightTable { table: "color", .. })
        ));
    }

    #[test]
    fn thresholds_compare_at_two_decimals() {
        let threshold = Threshold::new(0.1, 0.5);
        assert!(threshold.contains(0.1));
        assert!(threshold.contains(0.5));
        assert!(threshold.contains(0.504)); // rounds down onto the edge
        assert!(threshold.contains(0.096)); // rounds up onto the edge
        assert!(!threshold.contains(0.506));
        assert!(!threshold.contains(0.09));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = MapConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: MapConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, config.seed);
        assert_eq!(back.biomes.len(), config.biomes.len());
        assert_eq!(back.biomes[2].name, "forest");
    }
}

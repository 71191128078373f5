use thiserror::Error;

/// Configuration problems rejected before a generation run starts.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map size must be at least 1x1, got {width}x{height}")]
    InvalidSize { width: usize, height: usize },

    #[error("{channel} noise scale must be positive, got {scale}")]
    InvalidScale { channel: &'static str, scale: f32 },

    #[error("biome `{biome}` has an empty color table")]
    EmptyColorTable { biome: String },

    #[error("biome `{biome}`: {table} weights sum to zero")]
    ZeroWeightTable {
        biome: String,
        table: &'static str,
    },
}

pub mod map_core;
pub mod mesher;

pub use map_core::config::MapConfig;
pub use map_core::error::MapError;
pub use map_core::map::{HexMap, PropHandle, PropPlacer};
pub use mesher::MeshBuffer;

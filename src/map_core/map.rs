use glam::{IVec2, Vec3};

use crate::map_core::biome;
use crate::map_core::config::MapConfig;
use crate::map_core::error::MapError;
use crate::map_core::hex;
use crate::map_core::rng::GenRng;
use crate::map_core::tile::{Tile, TileGrid};
use crate::mesher::{self, MeshBuffer};

/// Opaque id for a scene object spawned through a [`PropPlacer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropHandle(pub u64);

/// Placement collaborator. The scene side owns the spawned objects; the map
/// only keeps the handles and gives every one back through `release` when
/// its grid is cleared or resized.
pub trait PropPlacer {
    fn place(&mut self, variant: &str, position: Vec3) -> Option<PropHandle>;
    fn release(&mut self, handle: PropHandle);
}

/// Discards every placement request.
impl PropPlacer for () {
    fn place(&mut self, _variant: &str, _position: Vec3) -> Option<PropHandle> {
        None
    }

    fn release(&mut self, _handle: PropHandle) {}
}

/// Owns one tile grid and the mesh built from it. Each `generate` call runs
/// the whole pipeline to completion: nothing is observable half-done, and a
/// fresh rng seeded from the config drives every stochastic step.
pub struct HexMap {
    grid: TileGrid,
    mesh: MeshBuffer,
}

impl HexMap {
    pub fn new() -> Self {
        Self {
            grid: TileGrid::new(0, 0),
            mesh: MeshBuffer::default(),
        }
    }

    pub fn generate(
        &mut self,
        config: &MapConfig,
        placer: &mut dyn PropPlacer,
    ) -> Result<(), MapError> {
        config.validate()?;

        self.grid.reset(config.width, config.height, placer);
        let mut rng = GenRng::new(config.seed);

        biome::generate_land(&mut rng, config, &mut self.grid);
        biome::generate_biomes(&mut rng, config, &mut self.grid, placer);
        self.mesh = mesher::build_map_mesh(&self.grid);

        log::info!(
            "generated {}x{} map (seed {}): {} solid tiles, {} vertices, {} triangles",
            config.width,
            config.height,
            config.seed,
            self.grid.tiles().iter().filter(|t| t.solid).count(),
            self.mesh.positions.len(),
            self.mesh.triangle_count(),
        );
        Ok(())
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// The mesh from the latest `generate` call, as an immutable snapshot.
    pub fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.grid.get(IVec2::new(x, y))
    }

    /// Hit-testing entry point for the picking collaborator.
    pub fn tile_at_world(&self, position: Vec3) -> Option<&Tile> {
        self.grid.get(hex::world_to_grid(position, hex::OUTER_RADIUS))
    }
}

impl Default for HexMap {
    fn default() -> Self {
        Self::new()
    }
}

use glam::{IVec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::map_core::map::{PropHandle, PropPlacer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResourceKind {
    #[default]
    None,
    Wood,
    Stone,
    Berries,
}

/// One cell of the hex grid, filled in by the generation passes.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub solid: bool,
    pub land_value: f32,
    pub biome_value: f32,
    pub color: Vec4,
    pub resource: ResourceKind,
    pub biome_label: String,
    pub placed: Option<PropHandle>,
}

impl Tile {
    pub fn new(solid: bool, land_value: f32) -> Self {
        Self {
            solid,
            land_value,
            biome_value: 0.0,
            color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            resource: ResourceKind::None,
            biome_label: String::from("None"),
            placed: None,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(false, 0.0)
    }
}

/// Row-major tile storage (`index = y * width + x`). Exactly one grid is
/// live per map; regeneration reuses the allocation when the dimensions
/// match and reallocates otherwise, releasing placements either way.
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, x: usize, y: usize) -> &Tile {
        &self.tiles[y * self.width + x]
    }

    pub fn tile_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        &mut self.tiles[y * self.width + x]
    }

    pub fn get(&self, coord: IVec2) -> Option<&Tile> {
        if coord.x < 0 || coord.y < 0 || coord.x >= self.width as i32 || coord.y >= self.height as i32
        {
            return None;
        }
        Some(self.tile(coord.x as usize, coord.y as usize))
    }

    /// Clears every tile for the next run, handing placements back to the
    /// collaborator that owns them first.
    pub fn reset(&mut self, width: usize, height: usize, placer: &mut dyn PropPlacer) {
        for tile in &mut self.tiles {
            if let Some(handle) = tile.placed.take() {
                placer.release(handle);
            }
            *tile = Tile::default();
        }

        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.tiles = vec![Tile::default(); width * height];
        }
    }
}

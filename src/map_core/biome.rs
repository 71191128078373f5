use glam::Vec4;

use crate::map_core::config::{BiomeConfig, MapConfig};
use crate::map_core::gradient_mask::{self, MaskShape};
use crate::map_core::gradient_noise;
use crate::map_core::hex;
use crate::map_core::map::PropPlacer;
use crate::map_core::rng::GenRng;
use crate::map_core::tile::{Tile, TileGrid};
use crate::map_core::weighted;

/// Land pass: noise minus a disk falloff, clamped to `[0, 1]`. Every tile is
/// re-created, so the grid is fully populated before anything reads it.
pub fn generate_land(rng: &mut GenRng, config: &MapConfig, grid: &mut TileGrid) {
    let (width, height) = (grid.width(), grid.height());
    let land = gradient_noise::generate(rng, &config.land_noise, width, height);
    let mask = gradient_mask::generate(
        MaskShape::Disk,
        config.land_mask_radius,
        width,
        height,
        false,
    );

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let value = (land[idx] - mask[idx]).clamp(0.0, 1.0);
            *grid.tile_mut(x, y) = Tile::new(value > 0.0, value);
        }
    }

    log::debug!(
        "land pass: {} of {} tiles solid",
        grid.tiles().iter().filter(|t| t.solid).count(),
        width * height
    );
}

/// Biome pass: writes the biome channel to every tile (water included),
/// then runs each biome definition over the grid in list order. A later
/// biome overwrites the color and label of tiles an earlier one claimed;
/// a placement, once made, sticks.
pub fn generate_biomes(
    rng: &mut GenRng,
    config: &MapConfig,
    grid: &mut TileGrid,
    placer: &mut dyn PropPlacer,
) {
    let (width, height) = (grid.width(), grid.height());
    let biome_values = gradient_noise::generate(rng, &config.biome_noise, width, height);

    for y in 0..height {
        for x in 0..width {
            grid.tile_mut(x, y).biome_value = biome_values[y * width + x];
        }
    }

    for biome in &config.biomes {
        assign_colors(rng, biome, grid);
        assign_resources(rng, biome, grid, placer);
    }
}

fn matches(biome: &BiomeConfig, tile: &Tile) -> bool {
    biome.land_threshold.contains(tile.land_value)
        && biome.biome_threshold.contains(tile.biome_value)
}

fn assign_colors(rng: &mut GenRng, biome: &BiomeConfig, grid: &mut TileGrid) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let tile = grid.tile_mut(x, y);
            if !tile.solid || !matches(biome, tile) {
                continue;
            }
            if let Some(color) = weighted::pick(rng, &biome.colors) {
                tile.color = Vec4::from_array(*color);
                tile.biome_label = biome.name.clone();
            }
        }
    }
}

fn assign_resources(
    rng: &mut GenRng,
    biome: &BiomeConfig,
    grid: &mut TileGrid,
    placer: &mut dyn PropPlacer,
) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let tile = grid.tile_mut(x, y);
            if !tile.solid || !matches(biome, tile) {
                continue;
            }
            if biome.resources.is_empty() {
                continue;
            }

            let Some(resource) = weighted::pick(rng, &biome.resources) else {
                continue;
            };
            tile.resource = resource.kind;

            if resource.variants.is_empty() || tile.placed.is_some() {
                continue;
            }
            if let Some(variant) = weighted::pick(rng, &resource.variants) {
                let position = hex::grid_to_world(x as i32, y as i32, hex::OUTER_RADIUS);
                tile.placed = placer.place(variant, position);
            }
        }
    }
}

use std::collections::BTreeMap;

use anyhow::Result;
use hex_map_gen::{HexMap, MapConfig};

fn main() -> Result<()> {
    env_logger::init();

    let config = MapConfig::load();
    let mut map = HexMap::new();
    map.generate(&config, &mut ())?;

    let mut biomes: BTreeMap<&str, usize> = BTreeMap::new();
    for tile in map.grid().tiles().iter().filter(|t| t.solid) {
        *biomes.entry(tile.biome_label.as_str()).or_default() += 1;
    }
    for (biome, count) in &biomes {
        log::info!("  {biome}: {count} tiles");
    }

    Ok(())
}

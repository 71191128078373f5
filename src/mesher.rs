use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

use crate::map_core::hex::{self, HexDirection, INNER_RADIUS, OUTER_RADIUS};
use crate::map_core::tile::TileGrid;

/// How far the side walls drop below a tile's cap.
pub const WALL_HEIGHT: f32 = 0.5;

// Perimeter of one hexagon around its center, starting at the south point
// and walking west-about. Cap fans and wall rims both index into this.
const CORNERS: [Vec3; 6] = [
    Vec3::new(0.0, 0.0, -OUTER_RADIUS),
    Vec3::new(-INNER_RADIUS, 0.0, -OUTER_RADIUS * 0.5),
    Vec3::new(-INNER_RADIUS, 0.0, OUTER_RADIUS * 0.5),
    Vec3::new(0.0, 0.0, OUTER_RADIUS),
    Vec3::new(INNER_RADIUS, 0.0, OUTER_RADIUS * 0.5),
    Vec3::new(INNER_RADIUS, 0.0, -OUTER_RADIUS * 0.5),
];

// Rim corner pair closing each wall, indexed by HexDirection.
const WALL_CORNERS: [(usize, usize); 6] = [
    (2, 3), // NorthWest
    (3, 4), // NorthEast
    (4, 5), // East
    (5, 0), // SouthEast
    (0, 1), // SouthWest
    (1, 2), // West
];

const WALL_ORDER: [HexDirection; 6] = [
    HexDirection::SouthWest,
    HexDirection::West,
    HexDirection::NorthWest,
    HexDirection::NorthEast,
    HexDirection::East,
    HexDirection::SouthEast,
];

/// Interleaved vertex layout handed to the rendering collaborator.
#[repr(C)]
#[derive(Clone, Copy, Debug, Zeroable, Pod)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

/// Parallel mesh buffers, rebuilt from empty on every synthesis call.
/// Vertices are deliberately duplicated per cap and per wall so each tile
/// keeps its flat color without bleeding into neighbors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub colors: Vec<Vec4>,
}

impl MeshBuffer {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn to_vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(self.normals.iter())
            .zip(self.colors.iter())
            .map(|((position, normal), color)| Vertex {
                position: position.to_array(),
                normal: normal.to_array(),
                color: color.to_array(),
            })
            .collect()
    }

    fn recompute_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vec3::ZERO);

        for triangle in self.indices.chunks_exact(3) {
            let (a, b, c) = (
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            );
            let face = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }

        for normal in &mut self.normals {
            *normal = normal.normalize_or_zero();
        }
    }
}

/// Walks the solid tiles in row-major order and emits a cap per tile plus a
/// wall on every edge whose neighbor is off-grid or water.
pub fn build_map_mesh(grid: &TileGrid) -> MeshBuffer {
    let mut mesh = MeshBuffer::default();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let tile = grid.tile(x, y);
            if !tile.solid {
                continue;
            }
            add_cap(&mut mesh, x as i32, y as i32, tile.color);
            add_walls(&mut mesh, grid, x as i32, y as i32, tile.color);
        }
    }

    mesh.recompute_normals();
    mesh
}

fn add_cap(mesh: &mut MeshBuffer, x: i32, y: i32, color: Vec4) {
    let center = hex::grid_to_world(x, y, OUTER_RADIUS);
    let base = mesh.positions.len() as u32;

    for corner in CORNERS {
        mesh.positions.push(center + corner);
        mesh.colors.push(color);
    }
    for i in 2..6u32 {
        mesh.indices
            .extend_from_slice(&[base, base + i - 1, base + i]);
    }
}

fn add_walls(mesh: &mut MeshBuffer, grid: &TileGrid, x: i32, y: i32, color: Vec4) {
    for direction in WALL_ORDER {
        if !neighbor_is_solid(grid, x, y, direction) {
            add_wall(mesh, x, y, direction, color);
        }
    }
}

fn neighbor_is_solid(grid: &TileGrid, x: i32, y: i32, direction: HexDirection) -> bool {
    hex::neighbor_in_bounds(x, y, direction, grid.width(), grid.height())
        .map_or(false, |n| grid.tile(n.x as usize, n.y as usize).solid)
}

fn add_wall(mesh: &mut MeshBuffer, x: i32, y: i32, direction: HexDirection, color: Vec4) {
    let center = hex::grid_to_world(x, y, OUTER_RADIUS);
    let (a, b) = WALL_CORNERS[direction as usize];
    let drop = Vec3::new(0.0, WALL_HEIGHT, 0.0);
    let base = mesh.positions.len() as u32;

    mesh.positions.push(center + CORNERS[a]);
    mesh.positions.push(center + CORNERS[b]);
    mesh.positions.push(center + CORNERS[a] - drop);
    mesh.positions.push(center + CORNERS[b] - drop);
    mesh.colors.extend([color; 4]);

    mesh.indices
        .extend_from_slice(&[base + 2, base + 1, base, base + 3, base + 1, base + 2]);
}

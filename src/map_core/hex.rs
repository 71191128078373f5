use glam::{IVec2, Vec3};

/// Circumradius of one hexagon at `size = 1`.
pub const OUTER_RADIUS: f32 = 1.0;
/// Apothem: `OUTER_RADIUS * sqrt(3) / 2`.
pub const INNER_RADIUS: f32 = OUTER_RADIUS * 0.866025404;

/// Grid cell to the 3D center of its hexagon. Odd rows shove east by half a
/// hexagon; the `y * 0.5 - floor(y / 2)` term is that half-step.
pub fn grid_to_world(x: i32, y: i32, size: f32) -> Vec3 {
    let inner = size * 0.866025404;
    let shove = y as f32 * 0.5 - y.div_euclid(2) as f32;
    Vec3::new(
        (x as f32 + shove) * inner * 2.0,
        0.0,
        y as f32 * size * 1.5,
    )
}

/// 3D position back to the grid cell that owns it. Exact inverse of
/// [`grid_to_world`] on cell centers: the shove term lands inside the floor,
/// where the odd-row half-step cannot carry the column over.
pub fn world_to_grid(position: Vec3, size: f32) -> IVec2 {
    let inner = size * 0.866025404;
    let y = (position.z / (size * 1.5)).floor() as i32;
    let shove = y as f32 * 0.5 - y.div_euclid(2) as f32;
    let x = ((position.x / (inner * 2.0)).floor() + shove).floor() as i32;
    IVec2::new(x, y)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexDirection {
    NorthWest,
    NorthEast,
    East,
    SouthEast,
    SouthWest,
    West,
}

impl HexDirection {
    pub const ALL: [HexDirection; 6] = [
        HexDirection::NorthWest,
        HexDirection::NorthEast,
        HexDirection::East,
        HexDirection::SouthEast,
        HexDirection::SouthWest,
        HexDirection::West,
    ];
}

// (row delta, column delta on even destination rows, on odd destination
// rows), indexed by HexDirection. Diagonal steps shift column by the parity
// of the row they land on.
const NEIGHBOR_OFFSETS: [(i32, i32, i32); 6] = [
    (1, 0, -1),  // NorthWest
    (1, 1, 0),   // NorthEast
    (0, 1, 1),   // East
    (-1, 1, 0),  // SouthEast
    (-1, 0, -1), // SouthWest
    (0, -1, -1), // West
];

pub fn neighbor(x: i32, y: i32, direction: HexDirection) -> IVec2 {
    let (dy, dx_even, dx_odd) = NEIGHBOR_OFFSETS[direction as usize];
    let ny = y + dy;
    let dx = if ny.rem_euclid(2) == 0 { dx_even } else { dx_odd };
    IVec2::new(x + dx, ny)
}

/// The neighboring cell, or `None` when it falls off the grid.
pub fn neighbor_in_bounds(
    x: i32,
    y: i32,
    direction: HexDirection,
    width: usize,
    height: usize,
) -> Option<IVec2> {
    let n = neighbor(x, y, direction);
    if n.x < 0 || n.y < 0 || n.x >= width as i32 || n.y >= height as i32 {
        None
    } else {
        Some(n)
    }
}

use glam::Vec2;

use crate::map_core::rng::GenRng;

/// Poisson-disk scatter over the unit square: every returned point keeps at
/// least `radius` distance to every other. `sampling` bounds the candidate
/// attempts per active point before it is retired.
///
/// Growth starts from the square's center; with `center_point` the center
/// itself is part of the result, otherwise it only seeds the search.
pub fn generate(rng: &mut GenRng, radius: f32, center_point: bool, sampling: u32) -> Vec<Vec2> {
    let map_size = 1.0f32;
    let cell_size = radius / 2.0f32.sqrt();

    let grid_size = (map_size / cell_size).ceil() as usize;
    // 1-based point index per acceleration cell, 0 = empty.
    let mut grid = vec![0usize; grid_size * grid_size];

    let mut points: Vec<Vec2> = Vec::new();
    let mut active: Vec<Vec2> = Vec::new();

    let center = Vec2::splat(map_size / 2.0);
    if center_point {
        add_point(center, &mut points, &mut active, &mut grid, grid_size, cell_size);
    } else {
        active.push(center);
    }

    while !active.is_empty() {
        let index = rng.int_below(active.len() as i32) as usize;
        let current = active[index];

        let angle_seed = rng.value();
        let radius_eps = radius + 1.0e-7;

        let mut added = false;
        for attempt in 0..sampling {
            let angle =
                std::f32::consts::TAU * (angle_seed + attempt as f32 / sampling as f32);
            let next = current + radius_eps * Vec2::new(angle.cos(), angle.sin());

            if next.x < 0.0 || next.y < 0.0 || next.x >= map_size || next.y >= map_size {
                continue;
            }
            if !is_valid(next, &points, &grid, grid_size, cell_size, radius) {
                continue;
            }

            add_point(next, &mut points, &mut active, &mut grid, grid_size, cell_size);
            added = true;
            break;
        }

        if !added {
            active.swap_remove(index);
        }
    }

    points
}

fn add_point(
    position: Vec2,
    points: &mut Vec<Vec2>,
    active: &mut Vec<Vec2>,
    grid: &mut [usize],
    grid_size: usize,
    cell_size: f32,
) {
    points.push(position);
    active.push(position);

    let gx = (position.x / cell_size) as usize;
    let gy = (position.y / cell_size) as usize;
    grid[gy * grid_size + gx] = points.len();
}

fn is_valid(
    position: Vec2,
    points: &[Vec2],
    grid: &[usize],
    grid_size: usize,
    cell_size: f32,
    radius: f32,
) -> bool {
    let gx = (position.x / cell_size) as i32;
    let gy = (position.y / cell_size) as i32;

    let start_x = (gx - 2).max(0) as usize;
    let start_y = (gy - 2).max(0) as usize;
    let end_x = ((gx + 3).max(0) as usize).min(grid_size);
    let end_y = ((gy + 3).max(0) as usize).min(grid_size);

    for y in start_y..end_y {
        for x in start_x..end_x {
            let index = grid[y * grid_size + x];
            if index == 0 {
                continue;
            }
            if points[index - 1].distance_squared(position) < radius * radius {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::generate;
    use crate::map_core::rng::GenRng;

    #[test]
    fn points_keep_their_minimum_spacing() {
        let mut rng = GenRng::new(4);
        let radius = 0.2;
        let points = generate(&mut rng, radius, true, 10);

        assert!(!points.is_empty());
        for (i, a) in points.iter().enumerate() {
            for b in points.iter().skip(i + 1) {
                assert!(
                    a.distance(*b) >= radius - 1e-5,
                    "points {a} and {b} are too close"
                );
            }
        }
    }

    #[test]
    fn points_stay_inside_the_unit_square() {
        let mut rng = GenRng::new(8);
        for point in generate(&mut rng, 0.1, false, 10) {
            assert!((0.0..1.0).contains(&point.x));
            assert!((0.0..1.0).contains(&point.y));
        }
    }

    #[test]
    fn center_point_is_included_when_requested() {
        let mut rng = GenRng::new(1);
        let points = generate(&mut rng, 0.25, true, 10);
        assert_eq!(points[0], glam::Vec2::splat(0.5));
    }

    #[test]
    fn scatter_is_deterministic_per_seed() {
        let a = generate(&mut GenRng::new(21), 0.15, true, 10);
        let b = generate(&mut GenRng::new(21), 0.15, true, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn tighter_radius_packs_more_points() {
        let sparse = generate(&mut GenRng::new(2), 0.3, true, 10);
        let dense = generate(&mut GenRng::new(2), 0.08, true, 10);
        assert!(dense.len() > sparse.len());
    }
}

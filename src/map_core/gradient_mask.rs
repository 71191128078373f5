use crate::map_core::remap::map_range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskShape {
    Disk,
    Manhattan,
    Euclidean,
}

/// Radial falloff field over a `width * height` grid, row-major.
///
/// Cell coordinates are normalized to `[-1, 1]`, the shape's falloff is
/// raised to the `radius` power, and the observed range is remapped so the
/// center ends near 0 and the rim near 1 (flipped when `inverse`). Subtracting
/// the field from a noise field therefore sinks the rim.
///
/// `powf` of a negative falloff with a fractional `radius` is NaN; those
/// cells are excluded from range tracking and clamp to the rim value (1, or
/// 0 when `inverse`) at the end, as does every cell when the whole field is
/// degenerate.
pub fn generate(
    shape: MaskShape,
    radius: f32,
    width: usize,
    height: usize,
    inverse: bool,
) -> Vec<f32> {
    let mut values = vec![0.0f32; width * height];
    let mut min_value = f32::MAX;
    let mut max_value = f32::MIN;

    for y in 0..height {
        for x in 0..width {
            let sample_x = map_range(x as f32, 0.0, width as f32 - 1.0, -1.0, 1.0);
            let sample_y = map_range(y as f32, 0.0, height as f32 - 1.0, -1.0, 1.0);

            let falloff = match shape {
                MaskShape::Disk => 1.0 - (sample_x * sample_x + sample_y * sample_y),
                MaskShape::Manhattan => 1.0 - (sample_x.abs() + sample_y.abs()),
                MaskShape::Euclidean => {
                    1.0 - (sample_x * sample_x + sample_y * sample_y).sqrt()
                }
            };
            let falloff = falloff.powf(radius);

            if falloff > max_value {
                max_value = falloff;
            }
            if falloff < min_value {
                min_value = falloff;
            }
            values[y * width + x] = falloff;
        }
    }

    for value in &mut values {
        let remapped = if inverse {
            map_range(*value, min_value, max_value, 0.0, 1.0)
        } else {
            map_range(*value, min_value, max_value, 1.0, 0.0)
        };
        *value = if remapped.is_nan() {
            if inverse {
                0.0
            } else {
                1.0
            }
        } else {
            remapped
        };
    }

    values
}

#[cfg(test)]
mod tests {
    use super::{generate, MaskShape};

    const SHAPES: [MaskShape; 3] = [MaskShape::Disk, MaskShape::Manhattan, MaskShape::Euclidean];

    #[test]
    fn output_is_normalized_for_varied_parameters() {
        for shape in SHAPES {
            for radius in [0.5, 1.0, 2.0, 2.5, 7.0] {
                for inverse in [false, true] {
                    let field = generate(shape, radius, 11, 7, inverse);
                    assert_eq!(field.len(), 77);
                    for &v in &field {
                        assert!((0.0..=1.0).contains(&v), "value {v} out of range");
                    }
                }
            }
        }
    }

    #[test]
    fn center_is_open_and_rim_is_closed() {
        // Odd dimensions put one cell exactly at the normalized origin.
        let width = 9;
        let field = generate(MaskShape::Disk, 2.0, width, width, false);
        let center = field[4 * width + 4];
        let edge_mid = field[4 * width];
        assert!(center < 0.01, "center should stay open, got {center}");
        assert!(edge_mid > 0.99, "rim should saturate, got {edge_mid}");
    }

    #[test]
    fn inverse_flips_the_gradient() {
        let width = 9;
        let field = generate(MaskShape::Disk, 2.0, width, width, true);
        let center = field[4 * width + 4];
        let edge_mid = field[4 * width];
        assert!(center > 0.99);
        assert!(edge_mid < 0.01);
    }

    #[test]
    fn fractional_radius_corners_clamp_to_rim() {
        // Disk falloff is negative in the corners; a fractional power makes
        // it NaN, which must clamp instead of leaking out.
        let width = 8;
        let field = generate(MaskShape::Disk, 2.5, width, width, false);
        assert_eq!(field[0], 1.0);
        assert_eq!(field[width - 1], 1.0);
        assert!(field.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn degenerate_field_saturates() {
        let field = generate(MaskShape::Disk, 500.5, 4, 4, false);
        assert!(field.iter().all(|&v| v == 1.0));
    }
}

use crate::{sky::StarSize, types::Vec2};

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;
const AVALANCHE_1: u32 = 0x85eb_ca6b;
const AVALANCHE_2: u32 = 0xc2b2_ae35;

/// Murmur-style mix of a grid coordinate. Pure; the same `(x, y)` always
/// yields the same value.
pub fn coordinate_hash(x: i32, y: i32) -> i32 {
    let mut n = x as u32;
    n = n.wrapping_mul(C1);
    n = n.rotate_left(15).wrapping_mul(C2);
    n = n.rotate_left(13).wrapping_mul(5);

    n = n.wrapping_add(y as u32);
    n = (n ^ (n >> 16)).wrapping_mul(AVALANCHE_1);
    n = (n ^ (n >> 13)).wrapping_mul(AVALANCHE_2);
    (n ^ (n >> 16)) as i32
}

pub fn is_background_star(x: i32, y: i32, density: f64) -> bool {
    hash_fraction(coordinate_hash(x, y)) < density
}

fn hash_fraction(hash: i32) -> f64 {
    (hash as f64).abs() / u32::MAX as f64
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundStar {
    pub position: Vec2,
    pub size: StarSize,
}

/// Scans the grid covering `width x height` and keeps every point whose hash
/// falls under `density`. Columns are visited in the outer loop.
pub fn background_stars(width: u32, height: u32, step: u32, density: f64) -> Vec<BackgroundStar> {
    let mut stars = Vec::new();
    if step == 0 {
        return stars;
    }
    for x in (0..width).step_by(step as usize) {
        for y in (0..height).step_by(step as usize) {
            let (x, y) = (x as i32, y as i32);
            if is_background_star(x, y, density) {
                stars.push(BackgroundStar {
                    position: Vec2::new(x as f32, y as f32),
                    size: background_size(coordinate_hash(x, y)),
                });
            }
        }
    }
    stars
}

// One in eight background stars gets the medium treatment.
fn background_size(hash: i32) -> StarSize {
    if (hash.unsigned_abs() >> 4) & 0x7 == 0 {
        StarSize::Medium
    } else {
        StarSize::Small
    }
}

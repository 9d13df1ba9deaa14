use crate::texture::{FLAT_NORMAL, NORMAL_MAP_SIZE};
use image::{Rgba, RgbaImage};
use rand::Rng;

// Tangent-space slope colors: R tilts along tangent X, G along the
// bitangent, B stays the dominant channel so every texel remains a valid
// upper-hemisphere normal.
const SLOPE_LEFT: Rgba<u8> = Rgba([64, 128, 220, 255]);
const SLOPE_RIGHT: Rgba<u8> = Rgba([192, 128, 220, 255]);
const SLOPE_UP: Rgba<u8> = Rgba([128, 192, 220, 255]);
const SLOPE_DOWN: Rgba<u8> = Rgba([128, 64, 220, 255]);

const PLATE_COUNT: u32 = 30;
const PLATE_MIN: u32 = 40;
const PLATE_MAX: u32 = 120;
const BEVEL: u32 = 6;
const RIVET_RADIUS: i64 = 3;
const GROOVE_CELLS: u32 = 4;
const GROOVE_HALF_WIDTH: u32 = 3;

/// Rasterizes the plate normal map: a flat tangent-space base with
/// [`PLATE_COUNT`] randomly placed beveled plates, corner rivets, and a
/// coarse [`GROOVE_CELLS`]² groove grid drawn last (later strokes overwrite
/// earlier ones).
///
/// Plate placement uses an unseeded generator, so the exact texels differ
/// per process; only the format, channel ranges and tiling mode are
/// guaranteed.
pub fn plate_normal_map() -> RgbaImage {
    let flat = Rgba([FLAT_NORMAL[0], FLAT_NORMAL[1], FLAT_NORMAL[2], 255]);
    let mut img = RgbaImage::from_pixel(NORMAL_MAP_SIZE, NORMAL_MAP_SIZE, flat);
    let mut rng = rand::rng();

    for _ in 0..PLATE_COUNT {
        let w = rng.random_range(PLATE_MIN..=PLATE_MAX);
        let h = rng.random_range(PLATE_MIN..=PLATE_MAX);
        let x = rng.random_range(0..NORMAL_MAP_SIZE.saturating_sub(w));
        let y = rng.random_range(0..NORMAL_MAP_SIZE.saturating_sub(h));
        draw_plate(&mut img, x, y, w, h, flat);
    }

    draw_groove_grid(&mut img);

    img
}

/// A plate: flat interior, four beveled edges encoded as cardinal slopes,
/// and a rivet mark inset at each corner.
fn draw_plate(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, flat: Rgba<u8>) {
    fill_rect(img, x, y, w, h, flat);

    fill_rect(img, x, y, BEVEL, h, SLOPE_LEFT);
    fill_rect(img, x + w - BEVEL, y, BEVEL, h, SLOPE_RIGHT);
    fill_rect(img, x, y, w, BEVEL, SLOPE_UP);
    fill_rect(img, x, y + h - BEVEL, w, BEVEL, SLOPE_DOWN);

    let inset = BEVEL + RIVET_RADIUS as u32 + 2;
    for (rx, ry) in [
        (x + inset, y + inset),
        (x + w - inset, y + inset),
        (x + inset, y + h - inset),
        (x + w - inset, y + h - inset),
    ] {
        draw_rivet(img, rx as i64, ry as i64);
    }
}

/// A rivet reads as a tiny dome: the upper half slopes up, the lower half
/// slopes down.
fn draw_rivet(img: &mut RgbaImage, cx: i64, cy: i64) {
    for dy in -RIVET_RADIUS..=RIVET_RADIUS {
        for dx in -RIVET_RADIUS..=RIVET_RADIUS {
            if dx * dx + dy * dy > RIVET_RADIUS * RIVET_RADIUS {
                continue;
            }
            let color = if dy < 0 { SLOPE_UP } else { SLOPE_DOWN };
            put_clamped(img, cx + dx, cy + dy, color);
        }
    }
}

/// The coarse groove grid: every groove is a pair of opposing slope strokes
/// so it reads as an indentation.
fn draw_groove_grid(img: &mut RgbaImage) {
    let step = NORMAL_MAP_SIZE / GROOVE_CELLS;

    for k in 1..GROOVE_CELLS {
        let at = k * step;
        fill_rect(img, at - GROOVE_HALF_WIDTH, 0, GROOVE_HALF_WIDTH, NORMAL_MAP_SIZE, SLOPE_RIGHT);
        fill_rect(img, at, 0, GROOVE_HALF_WIDTH, NORMAL_MAP_SIZE, SLOPE_LEFT);
        fill_rect(img, 0, at - GROOVE_HALF_WIDTH, NORMAL_MAP_SIZE, GROOVE_HALF_WIDTH, SLOPE_DOWN);
        fill_rect(img, 0, at, NORMAL_MAP_SIZE, GROOVE_HALF_WIDTH, SLOPE_UP);
    }
}

fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x1 = (x + w).min(NORMAL_MAP_SIZE);
    let y1 = (y + h).min(NORMAL_MAP_SIZE);
    for py in y..y1 {
        for px in x..x1 {
            img.put_pixel(px, py, color);
        }
    }
}

fn put_clamped(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if (0..NORMAL_MAP_SIZE as i64).contains(&x) && (0..NORMAL_MAP_SIZE as i64).contains(&y) {
        img.put_pixel(x as u32, y as u32, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_texel_is_an_upper_hemisphere_normal() {
        let img = plate_normal_map();
        for p in img.pixels() {
            // Z stays dominant; X/Y never leave the bevel slope range.
            assert!(p.0[2] >= 200);
            assert!((64..=192).contains(&p.0[0]));
            assert!((64..=192).contains(&p.0[1]));
            assert_eq!(p.0[3], 255);
        }
    }

    #[test]
    fn map_contains_flat_and_perturbed_texels() {
        let img = plate_normal_map();
        let flat = Rgba([FLAT_NORMAL[0], FLAT_NORMAL[1], FLAT_NORMAL[2], 255]);
        assert!(img.pixels().any(|p| *p == flat));
        assert!(img.pixels().any(|p| *p != flat));
    }

    #[test]
    fn groove_grid_lands_on_cell_boundaries() {
        let img = plate_normal_map();
        let step = NORMAL_MAP_SIZE / GROOVE_CELLS;
        // The horizontal groove drawn last always survives overwrites.
        assert_eq!(*img.get_pixel(1, step), SLOPE_UP);
    }
}

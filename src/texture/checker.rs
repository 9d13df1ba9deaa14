use crate::texture::{CHECKER_CELLS, CHECKER_SIZE};
use image::{Rgba, RgbaImage};

const TONE_LIGHT: Rgba<u8> = Rgba([202, 204, 210, 255]);
const TONE_DARK: Rgba<u8> = Rgba([58, 60, 68, 255]);
const GRID_LINE: Rgba<u8> = Rgba([24, 25, 30, 255]);
const BORDER: Rgba<u8> = Rgba([240, 160, 40, 255]);

const GRID_LINE_WIDTH: u32 = 2;
const BORDER_WIDTH: u32 = 4;

/// Rasterizes the UV reference grid: a [`CHECKER_CELLS`]² two-tone checker
/// with lines on every cell boundary and a border marking the chart edge.
/// Fully deterministic.
pub fn checker_grid() -> RgbaImage {
    let cell = CHECKER_SIZE / CHECKER_CELLS;

    let mut img = RgbaImage::from_fn(CHECKER_SIZE, CHECKER_SIZE, |x, y| {
        let cx = x / cell;
        let cy = y / cell;
        if (cx + cy) % 2 == 0 {
            TONE_LIGHT
        } else {
            TONE_DARK
        }
    });

    // Cell-boundary lines.
    for k in 0..=CHECKER_CELLS {
        let at = (k * cell).min(CHECKER_SIZE - 1);
        for w in 0..GRID_LINE_WIDTH {
            let line = at.saturating_sub(w);
            for t in 0..CHECKER_SIZE {
                img.put_pixel(line, t, GRID_LINE);
                img.put_pixel(t, line, GRID_LINE);
            }
        }
    }

    // Chart border.
    for t in 0..CHECKER_SIZE {
        for w in 0..BORDER_WIDTH {
            img.put_pixel(t, w, BORDER);
            img.put_pixel(t, CHECKER_SIZE - 1 - w, BORDER);
            img.put_pixel(w, t, BORDER);
            img.put_pixel(CHECKER_SIZE - 1 - w, t, BORDER);
        }
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checker_is_deterministic() {
        assert_eq!(checker_grid().as_raw(), checker_grid().as_raw());
    }

    #[test]
    fn checker_alternates_between_two_tones() {
        let img = checker_grid();
        let cell = CHECKER_SIZE / CHECKER_CELLS;
        let mid = cell / 2;
        assert_eq!(*img.get_pixel(mid, mid), TONE_LIGHT);
        assert_eq!(*img.get_pixel(mid + cell, mid), TONE_DARK);
        assert_eq!(*img.get_pixel(mid + cell, mid + cell), TONE_LIGHT);
    }

    #[test]
    fn checker_border_is_painted() {
        let img = checker_grid();
        assert_eq!(*img.get_pixel(0, CHECKER_SIZE / 2), BORDER);
        assert_eq!(*img.get_pixel(CHECKER_SIZE - 1, CHECKER_SIZE / 2), BORDER);
    }
}

use crate::models::{AspectRatio, ImageSize, Resolution};

const GRID: u32 = 8;

/// Pixel size for a resolution tier and aspect ratio.
///
/// The longer side gets the tier's base edge, the shorter side is scaled by
/// the ratio, and both are snapped to the nearest multiple of 8. Rounding is
/// done in integers, halves round up.
pub fn calculate_size(resolution: Resolution, ratio: AspectRatio) -> ImageSize {
    let base = resolution.base_edge();
    let (w_ratio, h_ratio) = ratio.parts();

    let (width, height) = if w_ratio >= h_ratio {
        (base, scale(base, h_ratio, w_ratio))
    } else {
        (scale(base, w_ratio, h_ratio), base)
    };

    ImageSize {
        width: snap_to_grid(width),
        height: snap_to_grid(height),
    }
}

/// `round(base * num / den)`
fn scale(base: u32, num: u32, den: u32) -> u32 {
    let (base, num, den) = (base as u64, num as u64, den as u64);
    ((2 * base * num + den) / (2 * den)) as u32
}

fn snap_to_grid(value: u32) -> u32 {
    (((value + GRID / 2) / GRID) * GRID).max(GRID)
}

//! Terrain model: sunflower placement of jobs and the Gaussian height field.
//!
//! The surface and the job markers both go through [`field_height`], so a
//! marker always sits exactly on the surface drawn under it.

use super::model::Job;
use super::risk::years_passed;

/// Layout and shape constants for the landscape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainConfig {
    /// Spiral radius grows as `radius_factor * sqrt(index)`.
    pub radius_factor: f64,
    /// Gaussian sigma of a single peak.
    pub peak_width: f64,
    /// Multiplier applied to the summed field.
    pub height_scale: f64,
    /// Vertical offset of the whole terrain.
    pub offset_y: f64,
    /// Side length of the square plane the terrain is drawn on.
    pub plane_size: f64,
    /// Peaks the renderer draws at most.
    pub max_peaks: usize,
}

pub const TERRAIN: TerrainConfig = TerrainConfig {
    radius_factor: 6.0,
    peak_width: 2.5,
    height_scale: 1.2,
    offset_y: -3.0,
    plane_size: 70.0,
    max_peaks: 20,
};

const GOLDEN_ANGLE_DEG: f64 = 137.5;

// Peak height = clamp(BASE + growth * FACTOR, MIN, MAX)
const BASE_PEAK_HEIGHT: f64 = 1.2;
const GROWTH_HEIGHT_FACTOR: f64 = 0.08;
const MIN_PEAK_HEIGHT: f64 = 0.2;
const MAX_PEAK_HEIGHT: f64 = 4.0;

/// Years from the base year to the end of the timeline.
const TIMELINE_SPAN: f64 = 5.0;

/// Below this total colour weight the ground colour shows through.
const COLOR_WEIGHT_FLOOR: f64 = 0.001;

/// Colour of terrain far away from every peak (deep blue).
pub const GROUND_COLOR: [f64; 3] = [0.05, 0.1, 0.2];

/// One job's contribution to the height field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    pub x: f64,
    pub z: f64,
    /// Normalized height, already projected to the current year.
    pub height: f64,
}

/// Sunflower spiral position for the job at `index`.
pub fn position_for_index(index: usize) -> (f64, f64) {
    let angle = index as f64 * GOLDEN_ANGLE_DEG.to_radians();
    let radius = TERRAIN.radius_factor * (index as f64).sqrt();
    (radius * angle.cos(), radius * angle.sin())
}

/// Growth realised by `year`, interpolated linearly from the anchor rate.
pub fn growth_at(projected_growth: f64, year: f64) -> f64 {
    projected_growth * years_passed(year) / TIMELINE_SPAN
}

/// Visual peak height for a job's growth at `year`, bounded to
/// [0.2, 4.0]. Non-finite growth yields the base height.
pub fn peak_height(projected_growth: f64, year: f64) -> f64 {
    let growth = growth_at(projected_growth, year);
    if growth.is_nan() {
        return BASE_PEAK_HEIGHT;
    }
    (BASE_PEAK_HEIGHT + growth * GROWTH_HEIGHT_FACTOR).clamp(MIN_PEAK_HEIGHT, MAX_PEAK_HEIGHT)
}

/// One peak per job, in catalog order.
pub fn peaks_for(jobs: &[Job], year: f64) -> Vec<Peak> {
    jobs.iter()
        .enumerate()
        .map(|(i, job)| {
            let (x, z) = position_for_index(i);
            Peak {
                x,
                z,
                height: peak_height(job.projected_growth, year),
            }
        })
        .collect()
}

fn two_sigma_sq() -> f64 {
    2.0 * TERRAIN.peak_width * TERRAIN.peak_width
}

/// Terrain elevation at `(x, z)`: the scaled sum of every peak's Gaussian.
pub fn field_height(x: f64, z: f64, peaks: &[Peak]) -> f64 {
    let spread = two_sigma_sq();
    let total: f64 = peaks
        .iter()
        .map(|p| {
            let dx = x - p.x;
            let dz = z - p.z;
            p.height * (-(dx * dx + dz * dz) / spread).exp()
        })
        .sum();
    total * TERRAIN.height_scale
}

/// World-space Y of the surface at `(x, z)`.
pub fn surface_y(x: f64, z: f64, peaks: &[Peak]) -> f64 {
    field_height(x, z, peaks) + TERRAIN.offset_y
}

/// World-space Y of the marker for peak `index`.
pub fn marker_height(peaks: &[Peak], index: usize) -> Option<f64> {
    peaks.get(index).map(|p| surface_y(p.x, p.z, peaks))
}

/// Colour blending weight, with a looser falloff than the height field.
pub fn color_weight(dist_sq: f64) -> f64 {
    (-dist_sq / (two_sigma_sq() * 2.0)).exp()
}

/// Weighted average of peak colours at `(x, z)`. `colors` pairs with
/// `peaks` by index; extra entries on either side are ignored.
pub fn blend_color(x: f64, z: f64, peaks: &[Peak], colors: &[[f64; 3]]) -> [f64; 3] {
    let mut blended = [0.0; 3];
    let mut total = 0.0;
    for (p, c) in peaks.iter().zip(colors) {
        let dx = x - p.x;
        let dz = z - p.z;
        let w = color_weight(dx * dx + dz * dz);
        for (acc, channel) in blended.iter_mut().zip(c) {
            *acc += channel * w;
        }
        total += w;
    }
    if total < COLOR_WEIGHT_FLOOR {
        return GROUND_COLOR;
    }
    blended.map(|v| v / total)
}

/// Map a terminal cell to world `(x, z)` on the plane. Cell centres are
/// sampled; `z` grows downward on screen.
pub fn cell_to_world(col: u16, row: u16, cols: u16, rows: u16) -> (f64, f64) {
    let size = TERRAIN.plane_size;
    let u = (col as f64 + 0.5) / cols.max(1) as f64;
    let v = (row as f64 + 0.5) / rows.max(1) as f64;
    ((u - 0.5) * size, (v - 0.5) * size)
}

/// Inverse of [`cell_to_world`]; `None` when the point is off the plane.
pub fn world_to_cell(x: f64, z: f64, cols: u16, rows: u16) -> Option<(u16, u16)> {
    let size = TERRAIN.plane_size;
    let u = x / size + 0.5;
    let v = z / size + 0.5;
    if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
        return None;
    }
    Some(((u * cols as f64) as u16, (v * rows as f64) as u16))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_peak_height_bounded(growth in -1e6f64..1e6, year in 1900.0f64..2200.0) {
            let h = peak_height(growth, year);
            prop_assert!(h.is_finite());
            prop_assert!((0.2..=4.0).contains(&h), "got {}", h);
        }

        #[test]
        fn prop_field_height_nonnegative(
            x in -50.0f64..50.0,
            z in -50.0f64..50.0,
            heights in prop::collection::vec(0.2f64..4.0, 0..20),
        ) {
            let peaks: Vec<Peak> = heights
                .iter()
                .enumerate()
                .map(|(i, &height)| {
                    let (px, pz) = position_for_index(i);
                    Peak { x: px, z: pz, height }
                })
                .collect();
            let h = field_height(x, z, &peaks);
            prop_assert!(h.is_finite());
            prop_assert!(h >= 0.0);
        }

        #[test]
        fn prop_blend_color_channels_in_unit_range(x in -50.0f64..50.0, z in -50.0f64..50.0) {
            let peaks: Vec<Peak> = (0..5)
                .map(|i| {
                    let (px, pz) = position_for_index(i);
                    Peak { x: px, z: pz, height: 1.0 }
                })
                .collect();
            let colors = vec![[0.9, 0.2, 0.1]; 5];
            for channel in blend_color(x, z, &peaks, &colors) {
                prop_assert!((0.0..=1.0 + 1e-9).contains(&channel));
            }
        }
    }
}

//! Map normalized points onto a centered 3D voxel grid.
//!
//! World axes follow the usual scene-graph convention: `x` runs along weeks,
//! `y` is up, `z` runs along weekdays.

use std::collections::HashMap;

use serde::Serialize;

use crate::band::ColorBand;
use crate::constants::{BASE_HEIGHT, HEIGHT_SCALE, VOXEL_FOOTPRINT};
use crate::normalize::NormalizedPoint;

/// Voxel height for a contribution count. Strictly increasing and
/// sub-linear so busy days do not flatten the rest of the terrain.
pub fn voxel_height(count: u32) -> f32 {
    BASE_HEIGHT + HEIGHT_SCALE * (1.0 + count as f32).ln()
}

/// Grid extent of a point set, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub width: u32,
    pub depth: u32,
}

impl Bounds {
    /// `None` for an empty point set.
    pub fn of(points: &[NormalizedPoint]) -> Option<Self> {
        let max_x = points.iter().map(|p| p.x).max()?;
        let max_y = points.iter().map(|p| p.y).max()?;
        Some(Self {
            width: max_x + 1,
            depth: max_y + 1,
        })
    }
}

/// Offset that moves the terrain's center to the origin:
/// `(-(maxX + 1) / 2, -(maxY + 1) / 2)`, or `(0, 0)` when there is nothing
/// to center.
pub fn centering_offset(points: &[NormalizedPoint]) -> (f32, f32) {
    match Bounds::of(points) {
        Some(b) => (-(b.width as f32) / 2.0, -(b.depth as f32) / 2.0),
        None => (0.0, 0.0),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LayoutOptions {
    /// Re-center the terrain on the origin.
    pub center: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self { center: true }
    }
}

/// Render transform for one point. `index` is the point's position in the
/// normalized list and doubles as its instance id.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Voxel {
    pub index: usize,
    pub position: [f32; 3],
    pub scale: [f32; 3],
    pub color: ColorBand,
    pub count: u32,
}

impl Voxel {
    pub fn height(&self) -> f32 {
        self.scale[1]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Terrain {
    pub bounds: Bounds,
    pub offset: (f32, f32),
    pub voxels: Vec<Voxel>,
    #[serde(skip)]
    cells: HashMap<(u32, u32), usize>,
}

impl Terrain {
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Voxel whose footprint contains the ground-plane point `(x, z)`.
    pub fn hit_test(&self, x: f32, z: f32) -> Option<usize> {
        let gx = (x - self.offset.0).round();
        let gz = (z - self.offset.1).round();
        if gx < 0.0 || gz < 0.0 {
            return None;
        }
        let index = *self.cells.get(&(gx as u32, gz as u32))?;
        let v = &self.voxels[index];
        let half = VOXEL_FOOTPRINT / 2.0;
        let inside = (x - v.position[0]).abs() <= half && (z - v.position[2]).abs() <= half;
        inside.then_some(index)
    }

    /// Tallest voxel, for camera framing.
    pub fn max_height(&self) -> f32 {
        self.voxels.iter().map(Voxel::height).fold(0.0, f32::max)
    }
}

/// Result of laying out a point set. An empty input yields `NoData`, never
/// an empty grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerrainLayout {
    NoData,
    Grid(Terrain),
}

impl TerrainLayout {
    pub fn terrain(&self) -> Option<&Terrain> {
        match self {
            TerrainLayout::Grid(t) => Some(t),
            TerrainLayout::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, TerrainLayout::NoData)
    }
}

pub fn layout(points: &[NormalizedPoint], options: LayoutOptions) -> TerrainLayout {
    let Some(bounds) = Bounds::of(points) else {
        return TerrainLayout::NoData;
    };
    let offset = if options.center {
        centering_offset(points)
    } else {
        (0.0, 0.0)
    };

    let mut cells = HashMap::with_capacity(points.len());
    let voxels = points
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let height = voxel_height(p.z);
            cells.insert((p.x, p.y), index);
            Voxel {
                index,
                position: [p.x as f32 + offset.0, height / 2.0, p.y as f32 + offset.1],
                scale: [VOXEL_FOOTPRINT, height, VOXEL_FOOTPRINT],
                color: p.color,
                count: p.z,
            }
        })
        .collect();

    TerrainLayout::Grid(Terrain {
        bounds,
        offset,
        voxels,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn point(x: u32, y: u32, z: u32) -> NormalizedPoint {
        NormalizedPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            x,
            y,
            z,
            color: ColorBand::from_count(z),
        }
    }

    #[test]
    fn test_height_is_monotonic_and_sublinear() {
        let mut prev = voxel_height(0);
        for n in 1..200 {
            let h = voxel_height(n);
            assert!(h > prev, "height must grow at n={n}");
            prev = h;
        }
        let step_low = voxel_height(2) - voxel_height(1);
        let step_high = voxel_height(101) - voxel_height(100);
        assert!(step_high < step_low);
    }

    #[test]
    fn test_centering_offset() {
        let points = vec![point(0, 0, 1), point(51, 6, 3)];
        let (ox, oz) = centering_offset(&points);
        assert_relative_eq!(ox, -26.0);
        assert_relative_eq!(oz, -3.5);
    }

    #[test]
    fn test_centering_single_point() {
        let (ox, oz) = centering_offset(&[point(0, 3, 5)]);
        assert_relative_eq!(ox, -0.5);
        assert_relative_eq!(oz, -2.0);
    }

    #[test]
    fn test_centering_empty() {
        assert_eq!(centering_offset(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_empty_is_no_data() {
        let out = layout(&[], LayoutOptions::default());
        assert!(out.is_no_data());
        assert!(out.terrain().is_none());
    }

    #[test]
    fn test_voxel_sits_on_ground() {
        let out = layout(&[point(2, 1, 7)], LayoutOptions { center: false });
        let t = out.terrain().unwrap();
        let v = &t.voxels[0];
        assert_relative_eq!(v.position[0], 2.0);
        assert_relative_eq!(v.position[2], 1.0);
        assert_relative_eq!(v.position[1], v.height() / 2.0);
        assert_relative_eq!(v.scale[0], VOXEL_FOOTPRINT);
    }

    #[test]
    fn test_hit_test() {
        let points = vec![point(0, 0, 1), point(3, 2, 4)];
        let out = layout(&points, LayoutOptions::default());
        let t = out.terrain().unwrap();
        let target = &t.voxels[1];
        assert_eq!(t.hit_test(target.position[0], target.position[2]), Some(1));
        assert_eq!(t.hit_test(target.position[0] + 0.3, target.position[2] - 0.3), Some(1));
        // Gap between footprints.
        assert_eq!(t.hit_test(target.position[0] + 0.45, target.position[2]), None);
        // Empty cell.
        assert_eq!(t.hit_test(t.offset.0 + 1.0, t.offset.1 + 1.0), None);
    }

    #[test]
    fn test_max_height() {
        let out = layout(&[point(0, 0, 1), point(1, 0, 20)], LayoutOptions::default());
        assert_relative_eq!(out.terrain().unwrap().max_height(), voxel_height(20));
    }
}

//! Draw plans for the two terrain render back ends.
//!
//! Both back ends consume the same [`Terrain`]; they differ only in how the
//! voxels are packaged for the renderer. Small terrains get one mesh per
//! voxel, large ones a single instanced batch.

use serde::Serialize;

use crate::constants::{HOVER_EMISSIVE, IDLE_EMISSIVE, INSTANCED_THRESHOLD};
use crate::interaction::InteractionState;
use crate::layout::{Terrain, TerrainLayout, Voxel};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Mesh,
    Instanced,
}

/// Instanced above [`INSTANCED_THRESHOLD`] points, or whenever forced.
pub fn choose_backend(point_count: usize, force_instanced: bool) -> BackendKind {
    if force_instanced || point_count > INSTANCED_THRESHOLD {
        BackendKind::Instanced
    } else {
        BackendKind::Mesh
    }
}

pub trait RenderBackend {
    type Output;

    fn render(&self, terrain: &Terrain, interaction: InteractionState) -> Self::Output;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeshDraw {
    pub index: usize,
    pub position: [f32; 3],
    pub scale: [f32; 3],
    pub color: &'static str,
    pub emissive: f32,
}

/// One draw call per voxel.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshBackend;

impl RenderBackend for MeshBackend {
    type Output = Vec<MeshDraw>;

    fn render(&self, terrain: &Terrain, interaction: InteractionState) -> Vec<MeshDraw> {
        let highlighted = interaction.highlighted();
        terrain
            .voxels
            .iter()
            .map(|v| MeshDraw {
                index: v.index,
                position: v.position,
                scale: v.scale,
                color: v.color.hex(),
                emissive: if highlighted == Some(v.index) {
                    HOVER_EMISSIVE
                } else {
                    IDLE_EMISSIVE
                },
            })
            .collect()
    }
}

/// Per-instance buffers for a single batched draw. Matrices are column-major
/// translate-then-scale transforms of a unit cube.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InstancedBatch {
    pub count: usize,
    pub matrices: Vec<[f32; 16]>,
    pub colors: Vec<[f32; 3]>,
    pub highlighted: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InstancedBackend;

impl RenderBackend for InstancedBackend {
    type Output = InstancedBatch;

    fn render(&self, terrain: &Terrain, interaction: InteractionState) -> InstancedBatch {
        InstancedBatch {
            count: terrain.len(),
            matrices: terrain.voxels.iter().map(instance_matrix).collect(),
            colors: terrain.voxels.iter().map(|v| v.color.rgb()).collect(),
            highlighted: interaction.highlighted(),
        }
    }
}

fn instance_matrix(v: &Voxel) -> [f32; 16] {
    let [sx, sy, sz] = v.scale;
    let [tx, ty, tz] = v.position;
    [
        sx, 0.0, 0.0, 0.0, //
        0.0, sy, 0.0, 0.0, //
        0.0, 0.0, sz, 0.0, //
        tx, ty, tz, 1.0,
    ]
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "backend", content = "draws", rename_all = "snake_case")]
pub enum RenderPlan {
    Mesh(Vec<MeshDraw>),
    Instanced(InstancedBatch),
}

impl RenderPlan {
    pub fn kind(&self) -> BackendKind {
        match self {
            RenderPlan::Mesh(_) => BackendKind::Mesh,
            RenderPlan::Instanced(_) => BackendKind::Instanced,
        }
    }
}

/// Build the draw plan for a layout. `None` when there is no data: nothing
/// is drawn, not even a ground plane.
pub fn plan(
    layout: &TerrainLayout,
    interaction: InteractionState,
    force_instanced: bool,
) -> Option<RenderPlan> {
    let terrain = layout.terrain()?;
    let plan = match choose_backend(terrain.len(), force_instanced) {
        BackendKind::Mesh => RenderPlan::Mesh(MeshBackend.render(terrain, interaction)),
        BackendKind::Instanced => {
            RenderPlan::Instanced(InstancedBackend.render(terrain, interaction))
        }
    };
    tracing::debug!(voxels = terrain.len(), backend = ?plan.kind(), "planned terrain render");
    Some(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::ColorBand;
    use crate::layout::{LayoutOptions, layout};
    use crate::normalize::NormalizedPoint;
    use chrono::NaiveDate;

    fn points(n: usize) -> Vec<NormalizedPoint> {
        (0..n)
            .map(|i| NormalizedPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                x: (i / 7) as u32,
                y: (i % 7) as u32,
                z: 1 + (i % 13) as u32,
                color: ColorBand::from_count(1 + (i % 13) as u32),
            })
            .collect()
    }

    #[test]
    fn test_choose_backend_threshold() {
        assert_eq!(choose_backend(500, false), BackendKind::Mesh);
        assert_eq!(choose_backend(501, false), BackendKind::Instanced);
        assert_eq!(choose_backend(3, true), BackendKind::Instanced);
    }

    #[test]
    fn test_no_data_plans_nothing() {
        let l = layout(&[], LayoutOptions::default());
        assert!(plan(&l, InteractionState::Idle, false).is_none());
        assert!(plan(&l, InteractionState::Idle, true).is_none());
    }

    #[test]
    fn test_mesh_plan_emphasizes_hovered() {
        let l = layout(&points(10), LayoutOptions::default());
        let Some(RenderPlan::Mesh(draws)) = plan(&l, InteractionState::Hovering(4), false) else {
            panic!("expected mesh plan");
        };
        assert_eq!(draws.len(), 10);
        assert_eq!(draws[4].emissive, HOVER_EMISSIVE);
        assert!(draws.iter().filter(|d| d.index != 4).all(|d| d.emissive == IDLE_EMISSIVE));
    }

    #[test]
    fn test_large_terrain_is_instanced() {
        let l = layout(&points(600), LayoutOptions::default());
        let Some(RenderPlan::Instanced(batch)) = plan(&l, InteractionState::Selected(7), false)
        else {
            panic!("expected instanced plan");
        };
        assert_eq!(batch.count, 600);
        assert_eq!(batch.matrices.len(), 600);
        assert_eq!(batch.colors.len(), 600);
        assert_eq!(batch.highlighted, Some(7));
    }

    #[test]
    fn test_back_ends_agree_on_transforms() {
        let l = layout(&points(20), LayoutOptions::default());
        let t = l.terrain().unwrap();
        let meshes = MeshBackend.render(t, InteractionState::Idle);
        let batch = InstancedBackend.render(t, InteractionState::Idle);
        for (draw, m) in meshes.iter().zip(&batch.matrices) {
            assert_eq!([m[12], m[13], m[14]], draw.position);
            assert_eq!([m[0], m[5], m[10]], draw.scale);
        }
    }
}
